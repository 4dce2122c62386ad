//! Prediction results and diagnosis wording

use serde::{Deserialize, Serialize};

/// Outcome of one prediction, serialized with the field names the web
/// frontend consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Predicted class (0 = no disease, 1 = disease)
    #[serde(rename = "previsao_binaria")]
    pub label: u8,

    /// Probability of the positive class, as a percentage with 2 decimals
    #[serde(rename = "probabilidade_doenca")]
    pub probability_pct: f64,

    /// Human-readable diagnosis matching `label`
    #[serde(rename = "diagnostico")]
    pub diagnosis: String,
}

impl PredictionResult {
    /// Build a result from a raw label and positive-class probability
    pub fn new(label: u8, positive_probability: f64, labels: &DiagnosisLabels) -> Self {
        Self {
            label,
            probability_pct: to_percentage(positive_probability),
            diagnosis: labels.for_label(label).to_string(),
        }
    }

    /// Whether the positive class was predicted
    pub fn is_positive(&self) -> bool {
        self.label == 1
    }
}

/// Convert a probability in [0, 1] into a percentage rounded to 2 decimals.
///
/// Ties round away from zero.
pub fn to_percentage(probability: f64) -> f64 {
    (probability * 100.0 * 100.0).round() / 100.0
}

/// Diagnosis strings returned for each label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosisLabels {
    /// Text for label 1
    #[serde(default = "default_present")]
    pub present: String,

    /// Text for label 0
    #[serde(default = "default_absent")]
    pub absent: String,
}

impl DiagnosisLabels {
    /// Text for the given label; anything other than 1 reads as absent
    pub fn for_label(&self, label: u8) -> &str {
        if label == 1 {
            &self.present
        } else {
            &self.absent
        }
    }
}

impl Default for DiagnosisLabels {
    fn default() -> Self {
        Self {
            present: default_present(),
            absent: default_absent(),
        }
    }
}

fn default_present() -> String {
    "Doença Cardiáca Presente".to_string()
}

fn default_absent() -> String {
    "Doença Cardiáca Ausente".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_rounding() {
        assert_eq!(to_percentage(0.5), 50.0);
        assert_eq!(to_percentage(0.123456), 12.35);
        assert_eq!(to_percentage(0.0), 0.0);
        assert_eq!(to_percentage(1.0), 100.0);
        assert_eq!(to_percentage(0.87654), 87.65);
    }

    #[test]
    fn test_diagnosis_follows_label() {
        let labels = DiagnosisLabels::default();
        let positive = PredictionResult::new(1, 0.91, &labels);
        let negative = PredictionResult::new(0, 0.12, &labels);

        assert!(positive.is_positive());
        assert_eq!(positive.diagnosis, "Doença Cardiáca Presente");
        assert_eq!(negative.diagnosis, "Doença Cardiáca Ausente");
    }

    #[test]
    fn test_wire_field_names() {
        let result = PredictionResult::new(1, 0.7512, &DiagnosisLabels::default());
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["previsao_binaria"], 1);
        assert_eq!(json["probabilidade_doenca"], 75.12);
        assert_eq!(json["diagnostico"], "Doença Cardiáca Presente");
    }

    #[test]
    fn test_labels_partial_override() {
        let labels: DiagnosisLabels = serde_yaml::from_str("present: \"Heart disease\"").unwrap();
        assert_eq!(labels.present, "Heart disease");
        assert_eq!(labels.absent, "Doença Cardiáca Ausente");
    }
}
