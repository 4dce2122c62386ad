//! Cardiorisk Core
//!
//! Types shared by the cardiorisk model and server crates.
//!
//! This crate provides:
//! - The 13-field patient feature record and its canonical column order
//! - Column projection into the order a model declares
//! - Prediction results and the diagnosis wording
//! - Error types and result handling

pub mod error;
pub mod features;
pub mod prediction;

pub use error::{Error, Result};
pub use features::{FeatureRecord, FEATURE_COLUMNS, FEATURE_COUNT};
pub use prediction::{to_percentage, DiagnosisLabels, PredictionResult};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::features::{FeatureRecord, FEATURE_COLUMNS, FEATURE_COUNT};
    pub use crate::prediction::{DiagnosisLabels, PredictionResult};
}
