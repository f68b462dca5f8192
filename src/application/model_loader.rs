//! Model loader: Load the classifier once and keep it for the process.

use std::path::PathBuf;
use std::sync::OnceLock;

use crate::adapters::{load_model, LoadedModel};
use crate::domain::{FEATURE_COUNT, FEATURE_ORDER};
use crate::ports::{Classifier, ModelError};
use crate::SimError;

type LoadFn = dyn Fn() -> Result<LoadedModel, ModelError> + Send + Sync;

/// Lazily loads and caches the classifier.
///
/// The first successful [`ModelLoader::get`] stores the model; later calls
/// return the cached handle without touching the artifact again. Failed
/// loads are not cached.
pub struct ModelLoader {
    source: String,
    load: Box<LoadFn>,
    cached: OnceLock<LoadedModel>,
}

impl ModelLoader {
    /// Loader reading a JSON artifact from `path` (file or directory).
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let source = path.display().to_string();
        Self::with_loader(source, move || load_model(&path))
    }

    /// Loader backed by an arbitrary load function.
    pub fn with_loader<F>(source: impl Into<String>, load: F) -> Self
    where
        F: Fn() -> Result<LoadedModel, ModelError> + Send + Sync + 'static,
    {
        Self {
            source: source.into(),
            load: Box::new(load),
            cached: OnceLock::new(),
        }
    }

    /// Where the model is loaded from.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.cached.get().is_some()
    }

    /// Cached model, loading it on first use.
    ///
    /// # Errors
    /// Returns `SimError::ModelUnavailable` if the artifact cannot be loaded
    /// and `SimError::SchemaMismatch` if its inputs disagree with the
    /// encoder's column order.
    pub fn get(&self) -> Result<&LoadedModel, SimError> {
        if let Some(model) = self.cached.get() {
            return Ok(model);
        }

        tracing::info!("Loading model from {}", self.source);
        let loaded = (self.load)().map_err(|source| SimError::ModelUnavailable {
            path: self.source.clone(),
            source,
        })?;
        check_schema(loaded.classifier.as_ref())?;

        Ok(self.cached.get_or_init(|| loaded))
    }
}

impl std::fmt::Debug for ModelLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelLoader")
            .field("source", &self.source)
            .field("loaded", &self.is_loaded())
            .finish()
    }
}

/// Reject models whose inputs do not line up with [`FEATURE_ORDER`].
///
/// Named artifacts must list exactly the same columns in the same order;
/// unnamed ones must at least agree on the input count.
///
/// # Errors
/// Returns `SimError::SchemaMismatch` describing the first difference.
pub fn check_schema(classifier: &dyn Classifier) -> Result<(), SimError> {
    if let Some(names) = classifier.feature_names() {
        if names.len() != FEATURE_COUNT {
            return Err(SimError::SchemaMismatch(format!(
                "model declares {} columns, encoder produces {}",
                names.len(),
                FEATURE_COUNT
            )));
        }
        if let Some((i, (got, want))) = names
            .iter()
            .zip(FEATURE_ORDER.iter())
            .enumerate()
            .find(|(_, (got, want))| got.as_str() != **want)
        {
            return Err(SimError::SchemaMismatch(format!(
                "column {i} is {got:?} in the model but {want:?} in the encoder"
            )));
        }
        return Ok(());
    }

    if classifier.n_features() != FEATURE_COUNT {
        return Err(SimError::SchemaMismatch(format!(
            "model expects {} inputs, encoder produces {}",
            classifier.n_features(),
            FEATURE_COUNT
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::model::LinearModel;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn linear(n: usize, names: Option<Vec<String>>) -> LoadedModel {
        LoadedModel {
            classifier: Arc::new(LinearModel {
                classes: vec![0, 1],
                feature_names: names,
                coefficients: vec![vec![0.0; n], vec![0.0; n]],
                intercepts: vec![0.0, 0.0],
            }),
            fingerprint: "ab".repeat(32),
            source: PathBuf::from("memory"),
        }
    }

    fn ordered_names() -> Vec<String> {
        FEATURE_ORDER.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_loads_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let loader = ModelLoader::with_loader("memory", move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(linear(FEATURE_COUNT, None))
        });

        assert!(!loader.is_loaded());
        for _ in 0..3 {
            loader.get().expect("load");
        }
        assert!(loader.is_loaded());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_failure_is_model_unavailable() {
        let loader = ModelLoader::with_loader("missing.json", || {
            Err(ModelError::Format("boom".into()))
        });
        let err = loader.get().unwrap_err();
        assert!(matches!(err, SimError::ModelUnavailable { .. }));
        assert!(err.to_string().contains("missing.json"));
        assert!(!loader.is_loaded());
    }

    #[test]
    fn test_missing_artifact_from_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let loader = ModelLoader::from_path(dir.path().join("modelo_antiviral.json"));
        assert!(matches!(
            loader.get(),
            Err(SimError::ModelUnavailable {
                source: ModelError::Io { .. },
                ..
            })
        ));
    }

    #[test]
    fn test_schema_by_count() {
        assert!(check_schema(linear(FEATURE_COUNT, None).classifier.as_ref()).is_ok());
        assert!(matches!(
            check_schema(linear(54, None).classifier.as_ref()),
            Err(SimError::SchemaMismatch(_))
        ));
    }

    #[test]
    fn test_schema_by_names() {
        let ok = linear(FEATURE_COUNT, Some(ordered_names()));
        assert!(check_schema(ok.classifier.as_ref()).is_ok());

        let mut swapped = ordered_names();
        swapped.swap(0, 1);
        let err = check_schema(linear(FEATURE_COUNT, Some(swapped)).classifier.as_ref())
            .unwrap_err();
        assert!(err.to_string().contains("column 0"));
    }

    #[test]
    fn test_schema_mismatch_blocks_caching() {
        let loader = ModelLoader::with_loader("memory", || Ok(linear(3, None)));
        assert!(matches!(loader.get(), Err(SimError::SchemaMismatch(_))));
        assert!(!loader.is_loaded());
    }
}
