//! Prediction service: validate, project, invoke, format

use crate::provider::ModelProvider;
use cardiorisk_core::{DiagnosisLabels, Error, FeatureRecord, PredictionResult, Result};
use std::sync::Arc;
use tracing::debug;

/// Floating-point slack tolerated on a returned probability
const PROBABILITY_EPSILON: f64 = 1e-9;

/// Turns one patient record into a prediction using the provider's
/// classifier. Holds no per-request state and is shared across requests.
#[derive(Debug, Clone)]
pub struct PredictionService {
    provider: Arc<ModelProvider>,
    labels: DiagnosisLabels,
}

impl PredictionService {
    pub fn new(provider: Arc<ModelProvider>, labels: DiagnosisLabels) -> Self {
        Self { provider, labels }
    }

    /// The provider backing this service
    pub fn provider(&self) -> &ModelProvider {
        &self.provider
    }

    /// Decode a JSON request body into a record
    pub fn decode(&self, body: &[u8]) -> Result<FeatureRecord> {
        FeatureRecord::from_json(body)
    }

    /// Decode and predict in one step.
    ///
    /// A degraded provider is reported before the body is looked at.
    pub fn predict_json(&self, body: &[u8]) -> Result<PredictionResult> {
        self.ensure_operational()?;
        let record = self.decode(body)?;
        self.predict(&record)
    }

    /// Predict for one record.
    ///
    /// Refuses with [`Error::ModelUnavailable`] when the provider is
    /// degraded, without invoking the stub.
    pub fn predict(&self, record: &FeatureRecord) -> Result<PredictionResult> {
        self.ensure_operational()?;

        let classifier = self.provider.classifier();

        debug!(record = ?record, "Received patient record");
        let row = record.project(classifier.feature_names())?;
        debug!(columns = ?classifier.feature_names(), values = ?row, "Row sent to classifier");

        let label = classifier.predict(&row)?;
        if label > 1 {
            return Err(Error::inference(format!(
                "classifier returned label {}, expected 0 or 1",
                label
            )));
        }

        let proba = classifier.predict_proba(&row)?;
        let positive = positive_probability(&proba)?;

        Ok(PredictionResult::new(label, positive, &self.labels))
    }
}

impl PredictionService {
    fn ensure_operational(&self) -> Result<()> {
        if self.provider.is_operational() {
            return Ok(());
        }
        Err(Error::model_unavailable(
            self.provider
                .degraded_reason()
                .unwrap_or("classifier not loaded"),
        ))
    }
}

/// Probability mass of class 1, checked to be a usable probability
fn positive_probability(proba: &[f64]) -> Result<f64> {
    let p = *proba.get(1).ok_or_else(|| {
        Error::inference(format!(
            "probability vector has {} entries, expected 2",
            proba.len()
        ))
    })?;

    if !p.is_finite() || p < -PROBABILITY_EPSILON || p > 1.0 + PROBABILITY_EPSILON {
        return Err(Error::inference(format!(
            "positive class probability {} is outside [0, 1]",
            p
        )));
    }

    Ok(p.clamp(0.0, 1.0))
}
