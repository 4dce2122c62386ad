//! Stand-in classifier used when no model artifact could be loaded

use crate::classifier::{canonical_feature_names, Classifier};
use cardiorisk_core::Result;

/// Classifier that always answers "negative, 50% confidence".
///
/// The provider installs it when loading fails so that the rest of the
/// service keeps a valid capability; the prediction service never serves its
/// answers to callers.
pub struct StubClassifier {
    feature_names: Vec<String>,
}

impl StubClassifier {
    pub fn new() -> Self {
        Self {
            feature_names: canonical_feature_names(),
        }
    }
}

impl Default for StubClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Classifier for StubClassifier {
    fn predict(&self, _row: &[f64]) -> Result<u8> {
        Ok(0)
    }

    fn predict_proba(&self, _row: &[f64]) -> Result<Vec<f64>> {
        Ok(vec![0.5, 0.5])
    }

    fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    fn name(&self) -> &str {
        "stub"
    }
}
