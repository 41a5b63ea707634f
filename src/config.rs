//! Service configuration
//!
//! Every setting can be given as a flag or through the environment (a `.env`
//! file is loaded first by the binary).

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::warn;

use crate::auth::UserStore;

pub const DEV_JWT_SECRET: &str = "dev-secret-change-in-production-minimum-32-characters";

/// Longest accepted token lifetime (one year)
pub const MAX_JWT_EXPIRATION_HOURS: i64 = 24 * 365;

#[derive(Parser, Debug, Clone)]
#[command(name = "auth-backend")]
#[command(about = "Credential login endpoint issuing role-carrying JWTs")]
pub struct Args {
    /// Address to listen on
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:8080")]
    pub bind: String,

    /// HMAC secret used to sign and verify tokens
    #[arg(long, env = "JWT_SECRET")]
    pub jwt_secret: Option<String>,

    /// Token lifetime in hours
    #[arg(long, env = "JWT_EXPIRATION_HOURS", default_value = "24")]
    pub jwt_expiration_hours: i64,

    /// TOML file with `[[users]]` entries; built-in users are used when absent
    #[arg(long, env = "USERS_FILE")]
    pub users_file: Option<PathBuf>,
}

/// Validated runtime configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub jwt_secret: String,
    pub jwt_expiration_hours: i64,
    pub users_file: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_args(args: Args) -> Result<Self> {
        let bind_addr: SocketAddr = args
            .bind
            .parse()
            .with_context(|| format!("Invalid bind address: {}", args.bind))?;

        if args.jwt_expiration_hours <= 0 || args.jwt_expiration_hours > MAX_JWT_EXPIRATION_HOURS {
            bail!(
                "JWT expiration must be between 1 and {}h, got {}h",
                MAX_JWT_EXPIRATION_HOURS,
                args.jwt_expiration_hours
            );
        }

        let jwt_secret = match args.jwt_secret.filter(|s| !s.trim().is_empty()) {
            Some(secret) => secret,
            None => {
                warn!("⚠️  JWT_SECRET not set, using development secret. CHANGE IN PRODUCTION!");
                DEV_JWT_SECRET.to_string()
            }
        };

        Ok(Self {
            bind_addr,
            jwt_secret,
            jwt_expiration_hours: args.jwt_expiration_hours,
            users_file: args.users_file,
        })
    }

    /// Build the user store this configuration points at
    pub fn load_user_store(&self) -> Result<UserStore> {
        match &self.users_file {
            Some(path) => UserStore::load(path),
            None => Ok(UserStore::with_default_users()),
        }
    }
}
