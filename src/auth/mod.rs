//! Authentication Module
//! Mission: Verify credentials, issue JWT tokens and guard protected routes

pub mod api;
pub mod authenticator;
pub mod jwt;
pub mod middleware;
pub mod models;
pub mod password;
pub mod user_store;

pub use api::AuthState;
pub use authenticator::authenticate;
pub use jwt::{JwtHandler, TokenIssuer};
pub use middleware::auth_middleware;
pub use user_store::UserStore;
