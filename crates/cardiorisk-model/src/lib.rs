//! Cardiorisk Model
//!
//! The classifier capability behind the prediction endpoint.
//!
//! A model is described by a declarative artifact (YAML or JSON) holding a
//! fitted estimator. At startup the [`ModelProvider`] tries to load it once;
//! if that fails the provider falls back to a [`StubClassifier`] and reports
//! itself as degraded, and the [`PredictionService`] refuses to predict.

pub mod artifact;
pub mod classifier;
pub mod forest;
pub mod logistic;
pub mod provider;
pub mod service;
pub mod stub;

pub use artifact::{load_classifier, ArtifactFormat, EstimatorSpec, ModelArtifact};
pub use classifier::{canonical_feature_names, Classifier};
pub use forest::{DecisionTree, RandomForest, RandomForestSpec, TreeNode};
pub use logistic::{LogisticRegression, LogisticRegressionSpec, StandardScaler};
pub use provider::{ModelProvider, ProviderState};
pub use service::PredictionService;
pub use stub::StubClassifier;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::classifier::Classifier;
    pub use crate::provider::{ModelProvider, ProviderState};
    pub use crate::service::PredictionService;
    pub use crate::stub::StubClassifier;
}
