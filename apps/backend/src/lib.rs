#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod ai;
pub mod config;
pub mod domain;
pub mod error;
pub mod errors;
pub mod health;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;

// Re-exports for public API
pub use error::AppError;
pub use middleware::cors::cors_middleware;
pub use state::app_state::AppState;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    backend_test_support::test_logging::init();
}
