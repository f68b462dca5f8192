//! Prediction result types.
//!
//! Represents the output of the antiviral classifier after label mapping.

use serde::{Deserialize, Serialize};

/// Antiviral recommendation derived from the model class index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recommendation {
    /// Class 0
    NoAntiviral,
    /// Class 1
    Oseltamivir,
    /// Class 2
    Zanamivir,
    /// Class 3
    OtherAntiviral,
    /// Any index outside the known table
    Unknown,
}

impl Recommendation {
    /// Map a model class index. Total: unknown indices become `Unknown`.
    #[must_use]
    pub fn from_class_index(index: i64) -> Self {
        match index {
            0 => Self::NoAntiviral,
            1 => Self::Oseltamivir,
            2 => Self::Zanamivir,
            3 => Self::OtherAntiviral,
            _ => Self::Unknown,
        }
    }

    /// Label shown to the user.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::NoAntiviral => "Nenhum antiviral recomendado",
            Self::Oseltamivir => "🧪 Oseltamivir",
            Self::Zanamivir => "💊 Zanamivir",
            Self::OtherAntiviral => "Outro antiviral",
            Self::Unknown => "Desconhecido",
        }
    }
}

impl std::fmt::Display for Recommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of a single prediction request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Class returned by the model's `predict`
    pub class_index: i64,

    /// Maximum of the model's probability distribution (0.0 to 1.0)
    pub confidence: f64,

    /// Label mapped from `class_index`
    pub recommendation: Recommendation,

    /// When the prediction was made
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl PredictionResult {
    #[must_use]
    pub fn new(class_index: i64, confidence: f64) -> Self {
        Self {
            class_index,
            confidence,
            recommendation: Recommendation::from_class_index(class_index),
            created_at: chrono::Utc::now(),
        }
    }

    /// Confidence as a two-decimal percentage, e.g. `82.00%`.
    #[must_use]
    pub fn confidence_display(&self) -> String {
        format!("{:.2}%", self.confidence * 100.0)
    }
}
