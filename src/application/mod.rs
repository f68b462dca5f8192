//! Application layer: Use cases and services.
//!
//! This module orchestrates domain logic with the classifier port to
//! implement the simulator's single use case: encode, then predict.

mod encoder;
mod model_loader;
mod predictor;
mod simulator;

pub use encoder::{binarize, encode_sex, FeatureEncoder};
pub use model_loader::{check_schema, ModelLoader};
pub use predictor::PredictionService;
pub use simulator::{Simulator, SubmissionState};
