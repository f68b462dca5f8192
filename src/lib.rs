//! # Antiviral Sim
//!
//! Treatment simulator for SRAG/INFLUD patients.
//!
//! This crate provides:
//! - Deterministic encoding of form answers into the classifier's feature vector
//! - A single-call prediction pipeline with confidence read-out
//! - Terminal UI for local use
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Core business types (patient attributes, feature layout, recommendations)
//! - `ports`: Trait definitions for external operations (the classifier)
//! - `adapters`: Concrete implementations (JSON-exported models)
//! - `application`: Use cases orchestrating domain and ports
//! - `tui`: Terminal user interface

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod tui;

pub use domain::{FeatureVector, PatientAttributes, PredictionResult, Recommendation};

/// Result type for simulator operations
pub type Result<T> = std::result::Result<T, SimError>;

/// Main error type for the simulator
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    #[error("Model unavailable ({path}): {source}")]
    ModelUnavailable {
        path: String,
        #[source]
        source: ports::ModelError,
    },

    #[error("Model schema mismatch: {0}")]
    SchemaMismatch(String),

    #[error("{0}")]
    Inference(#[from] ports::ModelError),

    #[error("Invalid patient data: {0}")]
    Validation(String),
}
