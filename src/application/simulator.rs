//! Simulator service: encode a submission and predict its recommendation.
//!
//! Each submission is independent: encoding is pure, and the only state
//! shared between submissions is the cached model.

use crate::adapters::LoadedModel;
use crate::domain::{FeatureVector, PatientAttributes, PredictionResult};
use crate::SimError;

use super::{FeatureEncoder, ModelLoader, PredictionService};

/// Display state of one request.
#[derive(Debug, Clone, Default)]
pub enum SubmissionState {
    /// Nothing submitted yet
    #[default]
    Awaiting,
    /// Prediction succeeded
    Displayed(PredictionResult),
    /// Prediction failed; the form stays usable
    Failed(String),
}

/// Orchestrates encoder and predictor over a cached model.
#[derive(Debug)]
pub struct Simulator {
    loader: ModelLoader,
    encoder: FeatureEncoder,
}

impl Simulator {
    /// Create the simulator and load the model eagerly.
    ///
    /// # Errors
    /// Returns the loader error; callers must not collect input without a
    /// model.
    pub fn new(loader: ModelLoader) -> Result<Self, SimError> {
        loader.get()?;
        Ok(Self {
            loader,
            encoder: FeatureEncoder::new(),
        })
    }

    /// The cached model.
    ///
    /// # Errors
    /// Only fails if the model was never loaded, which `new` rules out.
    pub fn model(&self) -> Result<&LoadedModel, SimError> {
        self.loader.get()
    }

    /// Encoded vector for the processed-data view.
    #[must_use]
    pub fn encode(&self, attrs: &PatientAttributes) -> FeatureVector {
        self.encoder.encode(attrs)
    }

    /// Encode and predict.
    ///
    /// # Errors
    /// Returns `SimError::Validation` for out-of-range attributes and
    /// `SimError::Inference` if the model fails.
    pub fn predict(&self, attrs: &PatientAttributes) -> Result<PredictionResult, SimError> {
        attrs.validate().map_err(SimError::Validation)?;
        let model = self.loader.get()?;
        let features = self.encoder.encode(attrs);
        PredictionService::new(model.classifier.clone()).predict(&features)
    }

    /// Run one submission to its display state. Validation and model
    /// failures both end in `Failed`.
    #[must_use]
    pub fn submit(&self, attrs: &PatientAttributes) -> SubmissionState {
        match self.predict(attrs) {
            Ok(result) => SubmissionState::Displayed(result),
            Err(e) => {
                tracing::warn!("Prediction failed: {}", e);
                SubmissionState::Failed(format!("Erro ao realizar predição: {e}"))
            }
        }
    }
}
