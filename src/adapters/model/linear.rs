//! Multinomial logistic regression exported as JSON.

use serde::{Deserialize, Serialize};

use crate::ports::{argmax, Classifier, ModelError};

/// Linear model parameters.
///
/// `coefficients` has one row per class, except binary models which may
/// carry a single row scoring the second class.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearModel {
    pub classes: Vec<i64>,
    #[serde(default)]
    pub feature_names: Option<Vec<String>>,
    pub coefficients: Vec<Vec<f64>>,
    pub intercepts: Vec<f64>,
}

impl LinearModel {
    /// Check that parameter shapes agree with each other.
    ///
    /// # Errors
    /// Returns `ModelError::Invalid` describing the first inconsistency.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.classes.is_empty() {
            return Err(ModelError::Invalid("linear model has no classes".into()));
        }

        let rows = self.coefficients.len();
        let binary_single_row = self.classes.len() == 2 && rows == 1;
        if rows != self.classes.len() && !binary_single_row {
            return Err(ModelError::Invalid(format!(
                "linear model has {} coefficient rows for {} classes",
                rows,
                self.classes.len()
            )));
        }
        if self.intercepts.len() != rows {
            return Err(ModelError::Invalid(format!(
                "linear model has {} intercepts for {} coefficient rows",
                self.intercepts.len(),
                rows
            )));
        }

        let n = self.n_features();
        if n == 0 {
            return Err(ModelError::Invalid("linear model has no inputs".into()));
        }
        if let Some(row) = self.coefficients.iter().position(|r| r.len() != n) {
            return Err(ModelError::Invalid(format!(
                "coefficient row {row} has {} values, expected {n}",
                self.coefficients[row].len()
            )));
        }
        if let Some(names) = &self.feature_names {
            if names.len() != n {
                return Err(ModelError::Invalid(format!(
                    "{} feature names for {n} coefficients",
                    names.len()
                )));
            }
        }
        if self
            .coefficients
            .iter()
            .flatten()
            .chain(self.intercepts.iter())
            .any(|v| !v.is_finite())
        {
            return Err(ModelError::Invalid("non-finite model parameter".into()));
        }

        Ok(())
    }

    fn decision_function(&self, features: &[f64]) -> Result<Vec<f64>, ModelError> {
        let n = self.n_features();
        if features.len() != n {
            return Err(ModelError::DimensionMismatch {
                got: features.len(),
                expected: n,
            });
        }

        Ok(self
            .coefficients
            .iter()
            .zip(&self.intercepts)
            .map(|(row, b)| row.iter().zip(features).map(|(w, x)| w * x).sum::<f64>() + b)
            .collect())
    }
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

fn softmax(scores: &[f64]) -> Vec<f64> {
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
    let total: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / total).collect()
}

impl Classifier for LinearModel {
    fn predict(&self, features: &[f64]) -> Result<i64, ModelError> {
        let proba = self.predict_proba(features)?;
        argmax(&proba)
            .map(|i| self.classes[i])
            .ok_or_else(|| ModelError::Prediction("empty probability distribution".into()))
    }

    fn predict_proba(&self, features: &[f64]) -> Result<Vec<f64>, ModelError> {
        let scores = self.decision_function(features)?;

        let proba = if scores.len() == 1 && self.classes.len() == 2 {
            let p = sigmoid(scores[0]);
            vec![1.0 - p, p]
        } else {
            softmax(&scores)
        };

        if proba.iter().any(|p| !p.is_finite()) {
            return Err(ModelError::Prediction(
                "non-finite probability (input out of range?)".into(),
            ));
        }
        Ok(proba)
    }

    fn classes(&self) -> &[i64] {
        &self.classes
    }

    fn n_features(&self) -> usize {
        self.coefficients.first().map_or(0, Vec::len)
    }

    fn feature_names(&self) -> Option<&[String]> {
        self.feature_names.as_deref()
    }
}
