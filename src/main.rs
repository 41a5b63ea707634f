//! Auth Backend - credential login issuing signed role tokens
//! Mission: Trade a username/password for a JWT, guard protected routes with it

use anyhow::{Context, Result};
use auth_backend::{
    auth::{AuthState, JwtHandler},
    create_router, AppConfig, Args,
};
use clap::Parser;
use dotenv::dotenv;
use std::path::Path;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize environment and logging
    load_env();
    init_tracing();

    let config = AppConfig::from_args(Args::parse())?;

    info!("🚀 Auth backend starting");

    let user_store = Arc::new(config.load_user_store()?);
    info!(
        "🔐 User store ready with {} accounts: {:?}",
        user_store.len(),
        user_store.usernames()
    );

    let jwt_handler = Arc::new(
        JwtHandler::new(config.jwt_secret.clone())
            .with_expiration_hours(config.jwt_expiration_hours),
    );
    info!(
        "🔑 Tokens expire after {}h",
        jwt_handler.expiration_hours()
    );
    let auth_state = AuthState::new(user_store, jwt_handler.clone());

    let app = create_router(auth_state, jwt_handler);

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;
    info!("🎯 API server listening on {}", config.bind_addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

/// Initialize tracing
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "auth_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn load_env() {
    // 1) Standard dotenv search (cwd + parents)
    let _ = dotenv();

    // 2) Also try the crate's own .env when launched from elsewhere
    let manifest_env = Path::new(env!("CARGO_MANIFEST_DIR")).join(".env");
    if manifest_env.exists() {
        let _ = dotenv::from_path(&manifest_env);
    }
}
