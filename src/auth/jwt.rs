//! JWT Token Handler
//! Mission: Generate and validate JWT tokens securely

use crate::auth::models::Claims;
use anyhow::{Context, Result};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde_json::{Map, Value};
use tracing::debug;
use uuid::Uuid;

/// Produces signed tokens for an authenticated subject
pub trait TokenIssuer: Send + Sync {
    fn issue(&self, subject: &str, claims: Map<String, Value>) -> Result<String>;
}

/// JWT Handler for token operations (HS256)
pub struct JwtHandler {
    secret: String,
    expiration_hours: i64,
}

impl JwtHandler {
    /// Create a new JWT handler with secret key
    pub fn new(secret: String) -> Self {
        Self {
            secret,
            expiration_hours: 24, // 24-hour tokens by default
        }
    }

    pub fn with_expiration_hours(mut self, hours: i64) -> Self {
        self.expiration_hours = hours;
        self
    }

    pub fn expiration_hours(&self) -> i64 {
        self.expiration_hours
    }

    /// Generate a JWT token for a subject with extra claims
    pub fn generate_token(&self, subject: &str, extra: Map<String, Value>) -> Result<String> {
        let now = Utc::now();
        let lifetime = chrono::Duration::try_hours(self.expiration_hours)
            .context("Token lifetime out of range")?;
        let expiration = now
            .checked_add_signed(lifetime)
            .context("Invalid timestamp")?
            .timestamp() as usize;

        let claims = Claims {
            sub: subject.to_string(),
            iat: now.timestamp() as usize,
            exp: expiration,
            jti: Uuid::new_v4().to_string(),
            extra,
        };

        debug!(
            "Generating JWT for {} (jti {}), expires in {}h",
            subject, claims.jti, self.expiration_hours
        );

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .context("Failed to generate JWT")
    }

    /// Validate a JWT token and extract claims
    pub fn validate_token(&self, token: &str) -> Result<Claims> {
        let decoded = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .context("Invalid or expired token")?;

        debug!("Validated JWT for {}", decoded.claims.sub);

        Ok(decoded.claims)
    }
}

impl TokenIssuer for JwtHandler {
    fn issue(&self, subject: &str, claims: Map<String, Value>) -> Result<String> {
        self.generate_token(subject, claims)
    }
}
