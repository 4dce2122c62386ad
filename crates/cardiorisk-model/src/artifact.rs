//! Model artifact format and loading
//!
//! An artifact is a YAML or JSON document describing a fitted estimator:
//!
//! ```yaml
//! name: heart-disease-logreg
//! version: "1.0"
//! estimator:
//!   type: logistic-regression
//!   coefficients: [0.01, 1.2, 0.8, 0.02, 0.004, -0.1, 0.3, -0.03, 0.9, 0.6, 0.5, 1.1, 0.9]
//!   intercept: -4.2
//! ```

use crate::classifier::{canonical_feature_names, Classifier};
use crate::forest::{RandomForest, RandomForestSpec};
use crate::logistic::{LogisticRegression, LogisticRegressionSpec};
use cardiorisk_core::{Error, Result, FEATURE_COLUMNS, FEATURE_COUNT};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Serialized estimator description
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    /// Model name
    #[serde(default)]
    pub name: String,

    /// Model version
    #[serde(default)]
    pub version: String,

    /// Column order the estimator's parameters refer to; defaults to the
    /// canonical order
    #[serde(default)]
    pub feature_names: Option<Vec<String>>,

    /// The fitted estimator
    pub estimator: EstimatorSpec,
}

/// Supported estimator families
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum EstimatorSpec {
    LogisticRegression(LogisticRegressionSpec),
    RandomForest(RandomForestSpec),
}

impl EstimatorSpec {
    fn kind(&self) -> &'static str {
        match self {
            Self::LogisticRegression(_) => "logistic-regression",
            Self::RandomForest(_) => "random-forest",
        }
    }
}

/// On-disk encoding of an artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactFormat {
    Yaml,
    Json,
}

impl ArtifactFormat {
    /// Pick the format from the file extension; anything that is not
    /// `.yaml`/`.yml` is read as JSON
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Self::Yaml
            }
            _ => Self::Json,
        }
    }
}

impl ModelArtifact {
    /// Read and parse an artifact file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::artifact(format!(
                "model file not found: {}",
                path.display()
            )));
        }
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content, ArtifactFormat::from_path(path))
    }

    /// Parse artifact content in the given format
    pub fn parse(content: &str, format: ArtifactFormat) -> Result<Self> {
        let artifact = match format {
            ArtifactFormat::Yaml => serde_yaml::from_str(content)?,
            ArtifactFormat::Json => serde_json::from_str(content)?,
        };
        Ok(artifact)
    }

    /// Display name, falling back to the estimator family
    pub fn display_name(&self) -> String {
        if self.name.is_empty() {
            self.estimator.kind().to_string()
        } else {
            self.name.clone()
        }
    }

    /// Validate the artifact and build the classifier it describes
    pub fn into_classifier(self) -> Result<Arc<dyn Classifier>> {
        let name = self.display_name();
        let feature_names = resolve_feature_names(self.feature_names)?;

        debug!(
            model = %name,
            version = %self.version,
            kind = self.estimator.kind(),
            "Building classifier from artifact"
        );

        let classifier: Arc<dyn Classifier> = match self.estimator {
            EstimatorSpec::LogisticRegression(spec) => {
                Arc::new(LogisticRegression::new(name, feature_names, spec)?)
            }
            EstimatorSpec::RandomForest(spec) => {
                Arc::new(RandomForest::new(name, feature_names, spec)?)
            }
        };

        Ok(classifier)
    }
}

/// Load a classifier from an artifact file
pub fn load_classifier(path: impl AsRef<Path>) -> Result<Arc<dyn Classifier>> {
    ModelArtifact::from_path(path)?.into_classifier()
}

/// Declared column order must name every canonical feature exactly once
fn resolve_feature_names(declared: Option<Vec<String>>) -> Result<Vec<String>> {
    let Some(names) = declared else {
        return Ok(canonical_feature_names());
    };

    if names.len() != FEATURE_COUNT {
        return Err(Error::artifact(format!(
            "feature_names must list {} columns, got {}",
            FEATURE_COUNT,
            names.len()
        )));
    }
    for (i, name) in names.iter().enumerate() {
        if !FEATURE_COLUMNS.contains(&name.as_str()) {
            return Err(Error::artifact(format!("unknown feature column `{}`", name)));
        }
        if names[..i].contains(name) {
            return Err(Error::artifact(format!("duplicate feature column `{}`", name)));
        }
    }

    Ok(names)
}
