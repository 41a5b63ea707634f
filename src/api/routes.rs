use axum::{
    extract::Request,
    middleware,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::debug;

use crate::auth::{
    api as auth_api, auth_middleware, middleware::extract_claims, AuthState, JwtHandler,
};
use crate::middleware::request_logging;

pub const HELLO_MESSAGE: &str = "Bonjour, endpoint protégé OK";

/// Create the API router
///
/// `jwt_handler` guards the protected routes; token issuance goes through
/// `auth_state.token_issuer`, which normally is the same handler.
pub fn create_router(auth_state: AuthState, jwt_handler: Arc<JwtHandler>) -> Router {
    // Auth routes (separate router with auth state)
    let auth_router = Router::new()
        .route("/api/auth/login", post(auth_api::login))
        .with_state(auth_state);

    let protected_routes = Router::new()
        .route("/api/hello", get(hello))
        .route_layer(middleware::from_fn_with_state(jwt_handler, auth_middleware));

    let public_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .merge(auth_router)
        .layer(middleware::from_fn(request_logging))
        .layer(CorsLayer::permissive())
}

// ===== Route Handlers =====

/// Health check endpoint
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Protected greeting - GET /api/hello
async fn hello(req: Request) -> Json<HelloResponse> {
    if let Some(claims) = extract_claims(&req) {
        debug!("Hello served to {} ({:?})", claims.sub, claims.roles());
    }

    Json(HelloResponse {
        message: HELLO_MESSAGE.to_string(),
    })
}

// ===== Response Types =====

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HelloResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::UserStore;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn test_app() -> (Router, Arc<JwtHandler>) {
        let jwt = Arc::new(JwtHandler::new("routes-test-secret".to_string()));
        let state = AuthState::new(Arc::new(UserStore::with_default_users()), jwt.clone());
        (create_router(state, jwt.clone()), jwt)
    }

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn login_request(body: Value) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri("/api/auth/login")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health_is_public() {
        let (app, _) = test_app();
        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "healthy");
    }

    #[tokio::test]
    async fn test_login_returns_token() {
        let (app, jwt) = test_app();
        let response = app
            .oneshot(login_request(json!({"username": "user", "password": "password"})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        let token = body["token"].as_str().unwrap();
        assert!(!token.is_empty());

        let claims = jwt.validate_token(token).unwrap();
        assert_eq!(claims.roles(), vec!["USER".to_string()]);
    }

    #[tokio::test]
    async fn test_login_failure_is_structured_401() {
        let (app, _) = test_app();
        let response = app
            .oneshot(login_request(json!({"username": "admin", "password": "wrong"})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = body_json(response).await;
        assert_eq!(body, json!({"error": "Invalid username or password"}));
    }

    #[tokio::test]
    async fn test_unknown_user_and_wrong_password_look_identical() {
        let (app, _) = test_app();

        let unknown = app
            .clone()
            .oneshot(login_request(json!({"username": "nobody", "password": "password"})))
            .await
            .unwrap();
        let wrong = app
            .oneshot(login_request(json!({"username": "user", "password": "nope"})))
            .await
            .unwrap();

        assert_eq!(unknown.status(), wrong.status());
        assert_eq!(body_json(unknown).await, body_json(wrong).await);
    }

    #[tokio::test]
    async fn test_malformed_login_body_rejected() {
        let (app, _) = test_app();
        let response = app
            .oneshot(login_request(json!({"username": "user"})))
            .await
            .unwrap();

        assert!(response.status().is_client_error());
    }

    #[tokio::test]
    async fn test_hello_requires_token() {
        let (app, _) = test_app();
        let response = app
            .oneshot(Request::builder().uri("/api/hello").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_hello_with_admin_token() {
        let (app, _) = test_app();

        let login = app
            .clone()
            .oneshot(login_request(json!({"username": "admin", "password": "admin123"})))
            .await
            .unwrap();
        let token = body_json(login).await["token"].as_str().unwrap().to_string();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/hello")
                    .header(header::AUTHORIZATION, format!("Bearer {}", token))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({"message": "Bonjour, endpoint protégé OK"})
        );
    }

    #[tokio::test]
    async fn test_cors_is_open() {
        let (app, _) = test_app();
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .header(header::ORIGIN, "http://localhost:4200")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "*"
        );
    }
}
