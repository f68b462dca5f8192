//! Prediction service: One inference call and confidence read-out.

use std::sync::Arc;

use crate::domain::{FeatureVector, PredictionResult};
use crate::ports::{Classifier, ModelError};
use crate::SimError;

/// Runs the classifier on a single encoded patient.
#[derive(Clone)]
pub struct PredictionService {
    classifier: Arc<dyn Classifier>,
}

impl PredictionService {
    pub fn new(classifier: Arc<dyn Classifier>) -> Self {
        Self { classifier }
    }

    /// Predict the class and read the confidence as the largest class
    /// probability.
    ///
    /// # Errors
    /// Returns `SimError::Inference` if either model call fails or the
    /// distribution is empty or not a probability.
    pub fn predict(&self, features: &FeatureVector) -> Result<PredictionResult, SimError> {
        let x = features.as_slice();

        let class_index = self.classifier.predict(x)?;
        let proba = self.classifier.predict_proba(x)?;

        let confidence = proba
            .iter()
            .copied()
            .fold(None, |acc: Option<f64>, p| Some(acc.map_or(p, |a| a.max(p))))
            .ok_or_else(|| ModelError::Prediction("empty probability distribution".into()))?;

        if !(0.0..=1.0).contains(&confidence) {
            return Err(ModelError::Prediction(format!(
                "confidence {confidence} outside [0, 1]"
            ))
            .into());
        }

        let result = PredictionResult::new(class_index, confidence);
        tracing::info!(
            "Prediction complete: class={}, recommendation={}, confidence={}",
            result.class_index,
            result.recommendation,
            result.confidence_display()
        );
        Ok(result)
    }
}
