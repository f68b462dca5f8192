//! Tree ensemble exported in the scikit-learn array layout.
//!
//! Each tree is a set of parallel node arrays. A node is a leaf when its
//! left child is [`LEAF`]; otherwise samples with
//! `x[feature] <= threshold` descend left.

use serde::{Deserialize, Serialize};

use crate::ports::{argmax, Classifier, ModelError};

/// Child marker for leaf nodes.
pub const LEAF: i64 = -1;

/// One decision tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTree {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    /// Per-node class weights (counts or fractions), one column per class.
    pub value: Vec<Vec<f64>>,
}

impl DecisionTree {
    fn node_count(&self) -> usize {
        self.children_left.len()
    }

    fn validate(&self, n_features: usize, n_classes: usize) -> Result<(), String> {
        let n = self.node_count();
        if n == 0 {
            return Err("tree has no nodes".into());
        }
        if self.children_right.len() != n
            || self.feature.len() != n
            || self.threshold.len() != n
            || self.value.len() != n
        {
            return Err("node arrays differ in length".into());
        }

        let in_range = |child: i64| child >= 0 && (child as usize) < n;
        for node in 0..n {
            if self.children_left[node] == LEAF {
                let weights = &self.value[node];
                if weights.len() != n_classes {
                    return Err(format!(
                        "leaf {node} has {} class weights, expected {n_classes}",
                        weights.len()
                    ));
                }
                if weights.iter().any(|w| !w.is_finite() || *w < 0.0)
                    || weights.iter().sum::<f64>() <= 0.0
                {
                    return Err(format!("leaf {node} has no usable class weights"));
                }
                continue;
            }

            if !in_range(self.children_left[node]) || !in_range(self.children_right[node]) {
                return Err(format!("node {node} points outside the tree"));
            }
            let f = self.feature[node];
            if f < 0 || f as usize >= n_features {
                return Err(format!("node {node} splits on unknown feature {f}"));
            }
            if self.threshold[node].is_nan() {
                return Err(format!("node {node} has a NaN threshold"));
            }
        }
        Ok(())
    }

    /// Normalized class distribution at the leaf reached by `features`.
    fn leaf_distribution(&self, features: &[f64]) -> Result<Vec<f64>, ModelError> {
        let mut node = 0usize;
        // A well-formed tree reaches a leaf in fewer steps than it has nodes.
        for _ in 0..=self.node_count() {
            if self.children_left[node] == LEAF {
                let weights = &self.value[node];
                let total: f64 = weights.iter().sum();
                return Ok(weights.iter().map(|w| w / total).collect());
            }

            let x = features[self.feature[node] as usize];
            node = if x <= self.threshold[node] {
                self.children_left[node] as usize
            } else {
                self.children_right[node] as usize
            };
        }
        Err(ModelError::Prediction("tree traversal did not reach a leaf".into()))
    }
}

/// Averaging ensemble of decision trees (random forest style).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForestModel {
    pub classes: Vec<i64>,
    #[serde(default)]
    pub feature_names: Option<Vec<String>>,
    pub n_features: usize,
    pub trees: Vec<DecisionTree>,
}

impl ForestModel {
    /// Check every tree against the declared inputs and classes.
    ///
    /// # Errors
    /// Returns `ModelError::Invalid` naming the first bad tree.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.classes.is_empty() {
            return Err(ModelError::Invalid("forest has no classes".into()));
        }
        if self.n_features == 0 {
            return Err(ModelError::Invalid("forest has no inputs".into()));
        }
        if self.trees.is_empty() {
            return Err(ModelError::Invalid("forest has no trees".into()));
        }
        if let Some(names) = &self.feature_names {
            if names.len() != self.n_features {
                return Err(ModelError::Invalid(format!(
                    "{} feature names for n_features = {}",
                    names.len(),
                    self.n_features
                )));
            }
        }

        for (i, tree) in self.trees.iter().enumerate() {
            tree.validate(self.n_features, self.classes.len())
                .map_err(|e| ModelError::Invalid(format!("tree {i}: {e}")))?;
        }
        Ok(())
    }
}

impl Classifier for ForestModel {
    fn predict(&self, features: &[f64]) -> Result<i64, ModelError> {
        let proba = self.predict_proba(features)?;
        argmax(&proba)
            .map(|i| self.classes[i])
            .ok_or_else(|| ModelError::Prediction("empty probability distribution".into()))
    }

    fn predict_proba(&self, features: &[f64]) -> Result<Vec<f64>, ModelError> {
        if features.len() != self.n_features {
            return Err(ModelError::DimensionMismatch {
                got: features.len(),
                expected: self.n_features,
            });
        }
        if features.iter().any(|x| x.is_nan()) {
            return Err(ModelError::Prediction("input contains NaN".into()));
        }

        let mut proba = vec![0.0; self.classes.len()];
        for tree in &self.trees {
            let dist = tree.leaf_distribution(features)?;
            for (acc, p) in proba.iter_mut().zip(dist) {
                *acc += p;
            }
        }

        let n_trees = self.trees.len() as f64;
        Ok(proba.into_iter().map(|p| p / n_trees).collect())
    }

    fn classes(&self) -> &[i64] {
        &self.classes
    }

    fn n_features(&self) -> usize {
        self.n_features
    }

    fn feature_names(&self) -> Option<&[String]> {
        self.feature_names.as_deref()
    }
}
