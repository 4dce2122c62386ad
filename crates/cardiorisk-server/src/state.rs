//! Shared application state

use cardiorisk_model::{ModelProvider, PredictionService};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::ServerConfig;

/// Application state shared across all requests
#[derive(Clone)]
pub struct AppState {
    /// Prediction service over the loaded model
    pub service: Arc<PredictionService>,

    /// Prometheus metrics handle for rendering, when an exporter is installed
    pub metrics_handle: Option<PrometheusHandle>,
}

impl AppState {
    /// Load the model once and build the state
    pub fn new(config: &ServerConfig, metrics_handle: Option<PrometheusHandle>) -> Self {
        let provider = Arc::new(ModelProvider::load(&config.model_path));

        if provider.is_operational() {
            info!("Prediction service ready");
        } else {
            warn!("Prediction service degraded: /predict will refuse requests");
        }

        let service = PredictionService::new(provider, config.diagnosis.clone());
        Self::from_service(service, metrics_handle)
    }

    /// Wrap an existing service
    pub fn from_service(service: PredictionService, metrics_handle: Option<PrometheusHandle>) -> Self {
        Self {
            service: Arc::new(service),
            metrics_handle,
        }
    }
}
