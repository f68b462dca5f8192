//! Feature encoder: form answers to the model's numeric schema.

use std::collections::BTreeMap;

use crate::domain::{
    ClinicalFlag, FeatureVector, PatientAttributes, AFFIRMATIVE, DEFAULTED_FEATURES, MALE,
};

/// Exact match on the affirmative literal: "Sim" is 1, anything else is 0.
#[must_use]
pub fn binarize(answer: &str) -> f64 {
    if answer == AFFIRMATIVE {
        1.0
    } else {
        0.0
    }
}

/// "Masculino" is 1, anything else is 0.
#[must_use]
pub fn encode_sex(sex: &str) -> f64 {
    if sex == MALE {
        1.0
    } else {
        0.0
    }
}

/// Stateless encoder from [`PatientAttributes`] to [`FeatureVector`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FeatureEncoder;

impl FeatureEncoder {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Assemble named fields, zero the columns the form does not cover and
    /// reindex into model order.
    #[must_use]
    pub fn encode(&self, attrs: &PatientAttributes) -> FeatureVector {
        let mut named: BTreeMap<&str, f64> = BTreeMap::new();
        named.insert("age", f64::from(attrs.age));
        named.insert("sex_m", encode_sex(&attrs.sex));

        for flag in ClinicalFlag::ALL {
            named.insert(flag.feature_name(), binarize(attrs.flag(flag)));
        }

        for name in DEFAULTED_FEATURES {
            named.insert(name, 0.0);
        }

        let vector = FeatureVector::reindex(&named);
        tracing::debug!("Encoded {} model features", vector.len());
        vector
    }
}
