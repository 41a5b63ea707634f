//! HTTP middleware shared by all routes.
//!
//! Authentication lives in `crate::auth::middleware`; this module holds the
//! request logging layer.

pub mod logging;

pub use logging::request_logging;
