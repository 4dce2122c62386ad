//! Cardiorisk Server
//!
//! HTTP surface of the cardiac-disease risk classifier: a liveness route, a
//! health route reporting the model state, Prometheus metrics, and the
//! `/predict` endpoint.

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod routes;
pub mod state;

pub use app::build_app;
pub use cli::Cli;
pub use config::{CorsConfig, ServerConfig};
pub use error::ApiError;
pub use state::AppState;
