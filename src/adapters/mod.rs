//! Adapters layer: Concrete implementations of ports.
//!
//! - `model`: JSON-exported classifiers (linear, tree ensemble)

pub mod model;

pub use model::{load_model, LoadedModel, ModelArtifact};
