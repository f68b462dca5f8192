//! Classifier port: Trait for the pre-trained antiviral model.
//!
//! The model is a black box trained elsewhere. This trait exposes only the
//! two calls the simulator needs, mirroring the `predict` /
//! `predict_proba` pair of the training toolkit.

/// Error type for model loading and inference.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("Cannot read model artifact {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Unrecognized model format: {0}")]
    Format(String),

    #[error("Invalid model: {0}")]
    Invalid(String),

    #[error("Feature count mismatch: got {got}, expected {expected}")]
    DimensionMismatch { got: usize, expected: usize },

    #[error("Prediction failed: {0}")]
    Prediction(String),
}

/// Trait for multi-class classifiers.
///
/// Implementations must be deterministic: the same input always yields the
/// same class and distribution.
pub trait Classifier: Send + Sync {
    /// Predict the class label for one sample.
    ///
    /// # Errors
    /// Returns `ModelError::DimensionMismatch` if `features` has the wrong
    /// length, or `ModelError::Prediction` if the model cannot score it.
    fn predict(&self, features: &[f64]) -> Result<i64, ModelError>;

    /// Class probability distribution for one sample, ordered as
    /// [`Classifier::classes`].
    ///
    /// # Errors
    /// Same conditions as [`Classifier::predict`].
    fn predict_proba(&self, features: &[f64]) -> Result<Vec<f64>, ModelError>;

    /// Class labels known to the model.
    fn classes(&self) -> &[i64];

    /// Number of inputs the model was trained on.
    fn n_features(&self) -> usize;

    /// Column names recorded at training time, when the artifact carries them.
    fn feature_names(&self) -> Option<&[String]> {
        None
    }
}

/// Index of the largest probability; ties go to the lowest index, NaN is skipped.
#[must_use]
pub(crate) fn argmax(values: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, v) in values.iter().copied().enumerate() {
        if v.is_nan() {
            continue;
        }
        if best.map_or(true, |(_, b)| v > b) {
            best = Some((i, v));
        }
    }
    best.map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argmax_first_on_ties() {
        assert_eq!(argmax(&[0.2, 0.4, 0.4]), Some(1));
        assert_eq!(argmax(&[1.0]), Some(0));
        assert_eq!(argmax(&[f64::NAN, 0.1]), Some(1));
        assert_eq!(argmax(&[]), None);
    }
}
