//! Classifier trait and shared helpers

use cardiorisk_core::{Error, Result, FEATURE_COLUMNS};

/// Binary classifier over a fixed-shape numeric row.
///
/// Implementations are constructed once and shared read-only across
/// requests, so both operations take `&self` and must be cheap, synchronous
/// in-memory computations.
pub trait Classifier: Send + Sync {
    /// Predict the class label (0 or 1) for one row
    fn predict(&self, row: &[f64]) -> Result<u8>;

    /// Estimate the probability of each class, indexed by label
    fn predict_proba(&self, row: &[f64]) -> Result<Vec<f64>>;

    /// Column order the model expects its rows in
    fn feature_names(&self) -> &[String];

    /// Get the classifier name
    fn name(&self) -> &str;
}

/// The canonical 13 column names as owned strings
pub fn canonical_feature_names() -> Vec<String> {
    FEATURE_COLUMNS.iter().map(|c| c.to_string()).collect()
}

/// Reject rows whose width does not match the model
pub(crate) fn check_row(row: &[f64], expected: usize) -> Result<()> {
    if row.len() != expected {
        return Err(Error::inference(format!(
            "expected {} features, got {}",
            expected,
            row.len()
        )));
    }
    if let Some(idx) = row.iter().position(|v| !v.is_finite()) {
        return Err(Error::inference(format!(
            "feature {} is not a finite number",
            idx
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_names() {
        let names = canonical_feature_names();
        assert_eq!(names.len(), 13);
        assert_eq!(names[0], "age");
        assert_eq!(names[12], "thalassemia");
    }

    #[test]
    fn test_check_row() {
        assert!(check_row(&[0.0; 13], 13).is_ok());
        assert!(check_row(&[0.0; 12], 13).is_err());

        let mut row = [0.0; 13];
        row[3] = f64::NAN;
        assert!(check_row(&row, 13).is_err());
    }
}
