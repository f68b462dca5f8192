//! Model adapter: Implementations of `Classifier` backed by JSON artifacts.
//!
//! The training pipeline exports its fitted estimator as JSON tagged by
//! `kind`:
//! - `linear`: multinomial logistic regression
//! - `forest`: averaging tree ensemble
//!
//! Artifacts are read once, validated structurally, and fingerprinted with
//! SHA-256 so the UI can show which model is in use.

mod forest;
mod linear;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::ports::{Classifier, ModelError};

pub use forest::{DecisionTree, ForestModel, LEAF};
pub use linear::LinearModel;

/// Artifact file names searched when the configured path is a directory.
pub const MODEL_FILE_CANDIDATES: [&str; 2] = ["modelo_antiviral.json", "model.json"];

/// Serialized model, as written by the export script.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelArtifact {
    Linear(LinearModel),
    Forest(ForestModel),
}

impl ModelArtifact {
    /// Validate and wrap as a shareable classifier.
    ///
    /// # Errors
    /// Returns `ModelError::Invalid` if the parameters are inconsistent.
    pub fn into_classifier(self) -> Result<Arc<dyn Classifier>, ModelError> {
        match self {
            Self::Linear(model) => {
                model.validate()?;
                Ok(Arc::new(model))
            }
            Self::Forest(model) => {
                model.validate()?;
                Ok(Arc::new(model))
            }
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::Linear(_) => "linear",
            Self::Forest(_) => "forest",
        }
    }
}

/// A classifier together with where it came from.
#[derive(Clone)]
pub struct LoadedModel {
    pub classifier: Arc<dyn Classifier>,
    /// Hex SHA-256 of the artifact bytes
    pub fingerprint: String,
    pub source: PathBuf,
}

impl LoadedModel {
    /// First 12 hex digits of the fingerprint, for compact display.
    #[must_use]
    pub fn short_fingerprint(&self) -> &str {
        let end = self.fingerprint.len().min(12);
        &self.fingerprint[..end]
    }
}

impl std::fmt::Debug for LoadedModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedModel")
            .field("fingerprint", &self.fingerprint)
            .field("source", &self.source)
            .field("n_features", &self.classifier.n_features())
            .field("classes", &self.classifier.classes())
            .finish()
    }
}

fn sha256_hex(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    digest.iter().map(|b| format!("{b:02x}")).collect()
}

/// Resolve the artifact file for `path`, searching known names in a directory.
fn resolve_artifact_path(path: &Path) -> Result<PathBuf, ModelError> {
    if !path.is_dir() {
        return Ok(path.to_path_buf());
    }

    MODEL_FILE_CANDIDATES
        .iter()
        .map(|name| path.join(name))
        .find(|p| p.is_file())
        .ok_or_else(|| {
            ModelError::Format(format!(
                "no model artifact in {} (expected one of {:?})",
                path.display(),
                MODEL_FILE_CANDIDATES
            ))
        })
}

/// Parse an artifact from raw bytes.
///
/// # Errors
/// Returns `ModelError::Format` for malformed JSON or an unknown `kind`,
/// and `ModelError::Invalid` for inconsistent parameters.
pub fn parse_model(bytes: &[u8]) -> Result<Arc<dyn Classifier>, ModelError> {
    let artifact: ModelArtifact =
        serde_json::from_slice(bytes).map_err(|e| ModelError::Format(e.to_string()))?;
    tracing::debug!("Parsed {} model artifact", artifact.kind());
    artifact.into_classifier()
}

/// Read, fingerprint and validate the artifact at `path`.
///
/// # Errors
/// Returns `ModelError::Io` if the file cannot be read, otherwise the
/// errors of [`parse_model`].
pub fn load_model(path: &Path) -> Result<LoadedModel, ModelError> {
    let source = resolve_artifact_path(path)?;
    let bytes = std::fs::read(&source).map_err(|e| ModelError::Io {
        path: source.display().to_string(),
        source: e,
    })?;

    let fingerprint = sha256_hex(&bytes);
    let classifier = parse_model(&bytes)?;

    tracing::info!(
        "Loaded model from {:?} (n_features={}, classes={:?}, sha256={})",
        source,
        classifier.n_features(),
        classifier.classes(),
        fingerprint
    );

    Ok(LoadedModel {
        classifier,
        fingerprint,
        source,
    })
}
