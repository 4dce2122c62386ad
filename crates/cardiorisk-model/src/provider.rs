//! Model provider: load the artifact once, or fall back to the stub

use crate::artifact::load_classifier;
use crate::classifier::Classifier;
use crate::stub::StubClassifier;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info};

/// Operational state of the provider.
///
/// `Degraded` is terminal: the artifact is never reloaded at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderState {
    /// Classifier loaded from the artifact
    Ready,
    /// Stub in use, predictions are refused
    Degraded,
}

/// Owner of the single classifier shared by every request
pub struct ModelProvider {
    classifier: Arc<dyn Classifier>,
    state: ProviderState,
    artifact_path: PathBuf,
    degraded_reason: Option<String>,
}

impl ModelProvider {
    /// Try to load the classifier at `path`.
    ///
    /// Never fails: any load error is logged and yields a degraded provider
    /// backed by [`StubClassifier`].
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        info!("Loading model artifact from {}", path.display());

        match load_classifier(path) {
            Ok(classifier) => {
                info!(
                    "Model '{}' loaded successfully ({} features)",
                    classifier.name(),
                    classifier.feature_names().len()
                );
                Self::ready(classifier, path)
            }
            Err(e) => {
                error!(
                    "Failed to load model from {}: {}. Falling back to stub classifier, predictions are disabled",
                    path.display(),
                    e
                );
                Self::degraded(path, e.to_string())
            }
        }
    }

    /// Provider around an already built classifier
    pub fn ready(classifier: Arc<dyn Classifier>, artifact_path: impl Into<PathBuf>) -> Self {
        Self {
            classifier,
            state: ProviderState::Ready,
            artifact_path: artifact_path.into(),
            degraded_reason: None,
        }
    }

    /// Provider running on the stub
    pub fn degraded(artifact_path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self {
            classifier: Arc::new(StubClassifier::new()),
            state: ProviderState::Degraded,
            artifact_path: artifact_path.into(),
            degraded_reason: Some(reason.into()),
        }
    }

    /// Current state
    pub fn state(&self) -> ProviderState {
        self.state
    }

    /// Whether a real model is loaded
    pub fn is_operational(&self) -> bool {
        self.state == ProviderState::Ready
    }

    /// The active classifier (the stub when degraded)
    pub fn classifier(&self) -> &Arc<dyn Classifier> {
        &self.classifier
    }

    /// Artifact location this provider was configured with
    pub fn artifact_path(&self) -> &Path {
        &self.artifact_path
    }

    /// Why loading failed, when degraded
    pub fn degraded_reason(&self) -> Option<&str> {
        self.degraded_reason.as_deref()
    }
}

impl std::fmt::Debug for ModelProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelProvider")
            .field("classifier", &self.classifier.name())
            .field("state", &self.state)
            .field("artifact_path", &self.artifact_path)
            .field("degraded_reason", &self.degraded_reason)
            .finish()
    }
}
