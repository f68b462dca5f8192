//! Domain layer: Core business types and logic.
//!
//! Pure Rust types with no I/O: patient answers, the model's feature
//! layout and the recommendation table.

mod features;
mod patient;
mod recommendation;

pub use features::{feature_index, FeatureVector, DEFAULTED_FEATURES, FEATURE_COUNT, FEATURE_ORDER};
pub use patient::{
    ClinicalFlag, PatientAttributes, AFFIRMATIVE, AGE_RANGE, DEFAULT_AGE, FEMALE, MALE, NEGATIVE,
};
pub use recommendation::{PredictionResult, Recommendation};
