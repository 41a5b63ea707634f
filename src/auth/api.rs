//! Authentication API Endpoints
//! Mission: Exchange valid credentials for a signed token

use crate::auth::{
    authenticator::authenticate,
    jwt::TokenIssuer,
    models::{LoginRequest, LoginResponse, ROLES_CLAIM},
    user_store::UserStore,
};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Map};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Shared auth state
#[derive(Clone)]
pub struct AuthState {
    pub user_store: Arc<UserStore>,
    pub token_issuer: Arc<dyn TokenIssuer>,
}

impl AuthState {
    pub fn new(user_store: Arc<UserStore>, token_issuer: Arc<dyn TokenIssuer>) -> Self {
        Self {
            user_store,
            token_issuer,
        }
    }
}

/// Login endpoint - POST /api/auth/login
pub async fn login(
    State(state): State<AuthState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AuthApiError> {
    info!("🔐 Login attempt: {}", payload.username);

    // Verify credentials
    if let Err(reason) = authenticate(&state.user_store, &payload) {
        warn!("❌ Failed login attempt: {} ({})", payload.username, reason);
        return Err(AuthApiError::InvalidCredentials);
    }

    // Get user details
    let user = state
        .user_store
        .find_by_username(&payload.username)
        .ok_or(AuthApiError::InvalidCredentials)?;

    let mut claims = Map::new();
    claims.insert(ROLES_CLAIM.to_string(), user.roles_claim());

    let token = state
        .token_issuer
        .issue(&user.username, claims)
        .map_err(|e| {
            error!("Token issuance failed for {}: {:#}", user.username, e);
            AuthApiError::InternalError
        })?;

    info!(
        "✅ Login successful: {} ({:?})",
        user.username, user.roles
    );

    Ok(Json(LoginResponse { token }))
}

/// Auth API errors
#[derive(Debug, PartialEq, Eq)]
pub enum AuthApiError {
    InvalidCredentials,
    InternalError,
}

impl IntoResponse for AuthApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthApiError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "Invalid username or password")
            }
            AuthApiError::InternalError => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
