pub mod routes;

pub use routes::{create_router, HealthResponse, HelloResponse, HELLO_MESSAGE};
