//! Auth Backend Library
//!
//! Credential login that mints role-carrying JWTs, plus a token-protected
//! greeting route. The binary in `main.rs` wires these into a server.

pub mod api;
pub mod auth;
pub mod config;
pub mod middleware;

pub use api::create_router;
pub use config::{AppConfig, Args};
