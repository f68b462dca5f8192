//! Ports layer: Trait definitions for external operations.
//!
//! Following Hexagonal Architecture, these traits define the boundary
//! between the application and the externally trained model.

mod classifier;

pub(crate) use classifier::argmax;
pub use classifier::{Classifier, ModelError};
