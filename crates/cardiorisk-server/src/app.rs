use axum::{
    http::HeaderValue,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use std::any::Any;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowOrigin, Any as CorsAny, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::config::{CorsConfig, ServerConfig};
use crate::error::ApiError;
use crate::routes;
use crate::state::AppState;

/// Build the Axum application
pub fn build_app(state: AppState, config: &ServerConfig) -> Router {
    Router::new()
        .route("/", get(routes::root))
        .route("/health", get(routes::health))
        .route("/metrics", get(routes::metrics))
        .route("/predict", post(routes::predict))
        .fallback(routes::fallback)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.cors))
        .with_state(state)
}

/// Any origin by default; an explicit list when configured
fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let origin = if config.allows_any() {
        AllowOrigin::any()
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| match HeaderValue::from_str(o) {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!("Ignoring invalid CORS origin: {}", o);
                    None
                }
            })
            .collect();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(CorsAny)
        .allow_headers(CorsAny)
}

fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };

    error!("Handler panicked: {}", detail);
    ApiError::Internal(detail).into_response()
}
