//! Patient feature record and canonical column order
//!
//! The model was fitted on positionally encoded input, so the order in which
//! values reach it is part of the contract. Callers may send the JSON keys in
//! any order; [`FeatureRecord::project`] is the single place where values are
//! laid out for a model.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Number of features the classifier expects
pub const FEATURE_COUNT: usize = 13;

/// Canonical column order the classifier was trained against
pub const FEATURE_COLUMNS: [&str; FEATURE_COUNT] = [
    "age",
    "sex",
    "chest_pain_type",
    "resting_blood_pressure",
    "cholesterol",
    "fasting_blood_sugar",
    "resting_electrocardiogram",
    "max_heart_rate_achieved",
    "exercise_induced_angina",
    "st_depression",
    "st_slope",
    "num_major_vessels",
    "thalassemia",
];

/// One patient's clinical measurements.
///
/// All fields are required and numeric. Unknown keys are ignored when
/// decoding from JSON.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureRecord {
    pub age: f64,
    pub sex: f64,
    pub chest_pain_type: f64,
    pub resting_blood_pressure: f64,
    pub cholesterol: f64,
    pub fasting_blood_sugar: f64,
    pub resting_electrocardiogram: f64,
    pub max_heart_rate_achieved: f64,
    pub exercise_induced_angina: f64,
    pub st_depression: f64,
    pub st_slope: f64,
    pub num_major_vessels: f64,
    pub thalassemia: f64,
}

impl FeatureRecord {
    /// Decode a record from a JSON request body.
    ///
    /// Missing fields, non-numeric values and non-object bodies are reported
    /// as [`Error::Validation`] with serde's description of the problem.
    pub fn from_json(body: &[u8]) -> Result<Self> {
        serde_json::from_slice(body).map_err(|e| Error::validation(e.to_string()))
    }

    /// Build a record from values already in canonical order
    pub fn from_values(values: [f64; FEATURE_COUNT]) -> Self {
        let [
            age,
            sex,
            chest_pain_type,
            resting_blood_pressure,
            cholesterol,
            fasting_blood_sugar,
            resting_electrocardiogram,
            max_heart_rate_achieved,
            exercise_induced_angina,
            st_depression,
            st_slope,
            num_major_vessels,
            thalassemia,
        ] = values;
        Self {
            age,
            sex,
            chest_pain_type,
            resting_blood_pressure,
            cholesterol,
            fasting_blood_sugar,
            resting_electrocardiogram,
            max_heart_rate_achieved,
            exercise_induced_angina,
            st_depression,
            st_slope,
            num_major_vessels,
            thalassemia,
        }
    }

    /// Values in canonical column order
    pub fn values(&self) -> [f64; FEATURE_COUNT] {
        [
            self.age,
            self.sex,
            self.chest_pain_type,
            self.resting_blood_pressure,
            self.cholesterol,
            self.fasting_blood_sugar,
            self.resting_electrocardiogram,
            self.max_heart_rate_achieved,
            self.exercise_induced_angina,
            self.st_depression,
            self.st_slope,
            self.num_major_vessels,
            self.thalassemia,
        ]
    }

    /// Lay out the record's values in the given column order.
    ///
    /// `columns` must name each of the 13 features exactly once. Anything
    /// else (unknown name, duplicate, wrong count) is rejected rather than
    /// silently producing a misaligned row.
    pub fn project<S: AsRef<str>>(&self, columns: &[S]) -> Result<Vec<f64>> {
        if columns.len() != FEATURE_COUNT {
            return Err(Error::validation(format!(
                "expected {} feature columns, got {}",
                FEATURE_COUNT,
                columns.len()
            )));
        }

        let values = self.values();
        let mut seen = [false; FEATURE_COUNT];
        let mut row = Vec::with_capacity(FEATURE_COUNT);

        for column in columns {
            let name = column.as_ref();
            let idx = FEATURE_COLUMNS
                .iter()
                .position(|c| *c == name)
                .ok_or_else(|| Error::validation(format!("unknown feature column `{}`", name)))?;
            if seen[idx] {
                return Err(Error::validation(format!(
                    "duplicate feature column `{}`",
                    name
                )));
            }
            seen[idx] = true;
            row.push(values[idx]);
        }

        Ok(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const SAMPLE: &str = r#"{
        "age": 63, "sex": 1, "chest_pain_type": 3, "resting_blood_pressure": 145,
        "cholesterol": 233, "fasting_blood_sugar": 1, "resting_electrocardiogram": 0,
        "max_heart_rate_achieved": 150, "exercise_induced_angina": 0,
        "st_depression": 2.3, "st_slope": 0, "num_major_vessels": 0, "thalassemia": 1
    }"#;

    #[test]
    fn test_decode_sample_record() {
        let record = FeatureRecord::from_json(SAMPLE.as_bytes()).unwrap();
        assert_eq!(record.age, 63.0);
        assert_eq!(record.st_depression, 2.3);
        assert_eq!(record.thalassemia, 1.0);
    }

    #[test]
    fn test_values_follow_canonical_order() {
        let record = FeatureRecord::from_json(SAMPLE.as_bytes()).unwrap();
        assert_eq!(
            record.values(),
            [63.0, 1.0, 3.0, 145.0, 233.0, 1.0, 0.0, 150.0, 0.0, 2.3, 0.0, 0.0, 1.0]
        );
    }

    #[test]
    fn test_missing_field_is_validation_error() {
        let body = SAMPLE.replace(r#""cholesterol": 233,"#, "");
        let err = FeatureRecord::from_json(body.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert!(err.to_string().contains("cholesterol"), "{}", err);
    }

    #[test]
    fn test_string_value_is_validation_error() {
        let body = SAMPLE.replace(r#""age": 63"#, r#""age": "sixty""#);
        let err = FeatureRecord::from_json(body.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn test_numeric_string_is_rejected() {
        let body = SAMPLE.replace(r#""age": 63"#, r#""age": "63""#);
        assert!(FeatureRecord::from_json(body.as_bytes()).is_err());
    }

    #[test]
    fn test_non_object_body_is_rejected() {
        assert!(FeatureRecord::from_json(b"[1, 2, 3]").is_err());
        assert!(FeatureRecord::from_json(b"not json").is_err());
        assert!(FeatureRecord::from_json(b"").is_err());
    }

    #[test]
    fn test_extra_keys_are_ignored() {
        let body = SAMPLE.replacen('{', r#"{"patient_name": "x","#, 1);
        assert!(FeatureRecord::from_json(body.as_bytes()).is_ok());
    }

    #[test]
    fn test_project_canonical_matches_values() {
        let record = FeatureRecord::from_json(SAMPLE.as_bytes()).unwrap();
        let row = record.project(&FEATURE_COLUMNS).unwrap();
        assert_eq!(row, record.values().to_vec());
    }

    #[test]
    fn test_project_reversed_order() {
        let record = FeatureRecord::from_json(SAMPLE.as_bytes()).unwrap();
        let mut columns = FEATURE_COLUMNS.to_vec();
        columns.reverse();
        let row = record.project(&columns).unwrap();
        assert_eq!(row[0], record.thalassemia);
        assert_eq!(row[12], record.age);
    }

    #[test]
    fn test_project_rejects_bad_column_sets() {
        let record = FeatureRecord::from_values([0.0; FEATURE_COUNT]);

        assert!(record.project(&FEATURE_COLUMNS[..12]).is_err());

        let mut dup = FEATURE_COLUMNS.to_vec();
        dup[1] = "age";
        assert!(record.project(&dup).is_err());

        let mut unknown = FEATURE_COLUMNS.to_vec();
        unknown[4] = "chol";
        assert!(record.project(&unknown).is_err());
    }

    proptest! {
        #[test]
        fn prop_key_order_does_not_change_record(
            values in proptest::array::uniform13(-500.0f64..500.0),
            seed in any::<u64>(),
        ) {
            let mut pairs: Vec<(&str, f64)> =
                FEATURE_COLUMNS.iter().copied().zip(values.iter().copied()).collect();
            let canonical: serde_json::Map<String, serde_json::Value> = pairs
                .iter()
                .map(|(k, v)| (k.to_string(), serde_json::Value::from(*v)))
                .collect();
            let canonical = serde_json::to_vec(&canonical).unwrap();

            // deterministic shuffle driven by the seed
            let mut state = seed;
            for i in (1..pairs.len()).rev() {
                state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
                let j = (state >> 33) as usize % (i + 1);
                pairs.swap(i, j);
            }
            let shuffled = format!(
                "{{{}}}",
                pairs
                    .iter()
                    .map(|(k, v)| format!("\"{}\": {}", k, serde_json::to_string(v).unwrap()))
                    .collect::<Vec<_>>()
                    .join(", ")
            );

            let a = FeatureRecord::from_json(&canonical).unwrap();
            let b = FeatureRecord::from_json(shuffled.as_bytes()).unwrap();
            prop_assert_eq!(a, b);
        }
    }
}
