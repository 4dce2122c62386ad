//! Logistic regression estimator

use crate::classifier::{check_row, Classifier};
use cardiorisk_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Fitted logistic regression parameters, as stored in a model artifact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticRegressionSpec {
    /// One weight per feature, in the artifact's column order
    pub coefficients: Vec<f64>,

    /// Bias term
    #[serde(default)]
    pub intercept: f64,

    /// Positive-class cutoff on the probability
    #[serde(default = "default_threshold")]
    pub threshold: f64,

    /// Optional standardization applied before the linear model
    #[serde(default)]
    pub scaler: Option<StandardScaler>,
}

fn default_threshold() -> f64 {
    0.5
}

/// Per-feature standardization: `(x - mean) / scale`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl StandardScaler {
    fn validate(&self, width: usize) -> Result<()> {
        if self.mean.len() != width || self.scale.len() != width {
            return Err(Error::artifact(format!(
                "scaler expects {} means and scales, got {} and {}",
                width,
                self.mean.len(),
                self.scale.len()
            )));
        }
        if self
            .mean
            .iter()
            .chain(self.scale.iter())
            .any(|v| !v.is_finite())
        {
            return Err(Error::artifact("scaler contains non-finite values"));
        }
        Ok(())
    }

    fn transform(&self, idx: usize, value: f64) -> f64 {
        // zero-variance features are left unscaled
        let scale = if self.scale[idx] == 0.0 {
            1.0
        } else {
            self.scale[idx]
        };
        (value - self.mean[idx]) / scale
    }
}

/// Binary logistic regression over the 13 patient features
#[derive(Debug, Clone)]
pub struct LogisticRegression {
    name: String,
    feature_names: Vec<String>,
    coefficients: Vec<f64>,
    intercept: f64,
    threshold: f64,
    scaler: Option<StandardScaler>,
}

impl LogisticRegression {
    /// Build and validate a model from its artifact parameters
    pub fn new(
        name: impl Into<String>,
        feature_names: Vec<String>,
        spec: LogisticRegressionSpec,
    ) -> Result<Self> {
        let width = feature_names.len();

        if spec.coefficients.len() != width {
            return Err(Error::artifact(format!(
                "expected {} coefficients, got {}",
                width,
                spec.coefficients.len()
            )));
        }
        if spec.coefficients.iter().any(|c| !c.is_finite()) || !spec.intercept.is_finite() {
            return Err(Error::artifact("coefficients must be finite"));
        }
        if !(spec.threshold > 0.0 && spec.threshold < 1.0) {
            return Err(Error::artifact(format!(
                "threshold must be within (0, 1), got {}",
                spec.threshold
            )));
        }
        if let Some(scaler) = &spec.scaler {
            scaler.validate(width)?;
        }

        Ok(Self {
            name: name.into(),
            feature_names,
            coefficients: spec.coefficients,
            intercept: spec.intercept,
            threshold: spec.threshold,
            scaler: spec.scaler,
        })
    }

    /// Linear score before the sigmoid
    pub fn decision_function(&self, row: &[f64]) -> Result<f64> {
        check_row(row, self.coefficients.len())?;

        let z = row
            .iter()
            .enumerate()
            .map(|(i, &x)| {
                let x = match &self.scaler {
                    Some(scaler) => scaler.transform(i, x),
                    None => x,
                };
                // an unused feature contributes nothing, even when it scales to inf
                if self.coefficients[i] == 0.0 {
                    0.0
                } else {
                    self.coefficients[i] * x
                }
            })
            .sum::<f64>()
            + self.intercept;

        // +inf and -inf terms cancelling out leave no usable score
        if z.is_nan() {
            return Err(Error::inference("decision score is undefined"));
        }
        Ok(z)
    }

    fn positive_probability(&self, row: &[f64]) -> Result<f64> {
        self.decision_function(row).map(sigmoid)
    }
}

fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

impl Classifier for LogisticRegression {
    fn predict(&self, row: &[f64]) -> Result<u8> {
        let p = self.positive_probability(row)?;
        Ok(u8::from(p > self.threshold))
    }

    fn predict_proba(&self, row: &[f64]) -> Result<Vec<f64>> {
        let p = self.positive_probability(row)?;
        Ok(vec![1.0 - p, p])
    }

    fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    fn name(&self) -> &str {
        &self.name
    }
}
