//! Patient attributes collected by the simulator form.
//!
//! Values are kept as the literal strings the form offers ("Sim"/"Não",
//! "Masculino"/"Feminino") so the encoder can apply its exact-match rules.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Affirmative answer literal for clinical flags.
pub const AFFIRMATIVE: &str = "Sim";

/// Negative answer literal for clinical flags.
pub const NEGATIVE: &str = "Não";

/// Sex literal encoded as `sex_m = 1`.
pub const MALE: &str = "Masculino";

/// The other sex literal offered by the form.
pub const FEMALE: &str = "Feminino";

/// Inclusive age range offered by the form slider.
pub const AGE_RANGE: std::ops::RangeInclusive<u8> = 0..=100;

/// Default age preset on a fresh form.
pub const DEFAULT_AGE: u8 = 45;

/// Yes/No clinical flags asked by the form, in form order.
///
/// The first seven are symptoms, the rest are comorbidities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ClinicalFlag {
    Febre,
    Tosse,
    Dispneia,
    Saturacao,
    Diarreia,
    Vomito,
    DorAbdominal,
    Diabetes,
    Cardiopatia,
    Asma,
    Renal,
    Obesidade,
    Imunodepressao,
    Neurologica,
    Hepatica,
    Pneumopatia,
}

impl ClinicalFlag {
    /// Every flag, in the order the form presents them.
    pub const ALL: [ClinicalFlag; 16] = [
        Self::Febre,
        Self::Tosse,
        Self::Dispneia,
        Self::Saturacao,
        Self::Diarreia,
        Self::Vomito,
        Self::DorAbdominal,
        Self::Diabetes,
        Self::Cardiopatia,
        Self::Asma,
        Self::Renal,
        Self::Obesidade,
        Self::Imunodepressao,
        Self::Neurologica,
        Self::Hepatica,
        Self::Pneumopatia,
    ];

    /// Label shown next to the form widget.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Febre => "Febre",
            Self::Tosse => "Tosse",
            Self::Dispneia => "Dispneia",
            Self::Saturacao => "Saturação <95%",
            Self::Diarreia => "Diarreia",
            Self::Vomito => "Vômito",
            Self::DorAbdominal => "Dor abdominal",
            Self::Diabetes => "Diabetes",
            Self::Cardiopatia => "Cardiopatia",
            Self::Asma => "Asma",
            Self::Renal => "Doença renal crônica",
            Self::Obesidade => "Obesidade",
            Self::Imunodepressao => "Imunodepressão",
            Self::Neurologica => "Doença neurológica",
            Self::Hepatica => "Doença hepática",
            Self::Pneumopatia => "Pneumopatia",
        }
    }

    /// Model feature this flag feeds.
    #[must_use]
    pub fn feature_name(&self) -> &'static str {
        match self {
            Self::Febre => "febre_bin",
            Self::Tosse => "tosse_bin",
            Self::Dispneia => "dispneia_bin",
            Self::Saturacao => "saturacao_bin",
            Self::Diarreia => "diarreia_bin",
            Self::Vomito => "vomito_bin",
            Self::DorAbdominal => "dor_abd_bin",
            Self::Diabetes => "diabetes_bin",
            Self::Cardiopatia => "cardiopati_bin",
            Self::Asma => "asma_bin",
            Self::Renal => "renal_bin",
            Self::Obesidade => "obesidade_bin",
            Self::Imunodepressao => "imunodepre_bin",
            Self::Neurologica => "neurologic_bin",
            Self::Hepatica => "hepatica_bin",
            Self::Pneumopatia => "pneumopati_bin",
        }
    }
}

/// One form submission.
///
/// Flags missing from `flags` read as an empty answer, which encodes to 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientAttributes {
    /// Age in years (0-100)
    pub age: u8,

    /// Sex literal as selected on the form
    pub sex: String,

    /// Textual answer per clinical flag
    pub flags: BTreeMap<ClinicalFlag, String>,
}

impl PatientAttributes {
    /// Create attributes with every clinical flag answered `answer`.
    #[must_use]
    pub fn uniform(age: u8, sex: impl Into<String>, answer: &str) -> Self {
        let flags = ClinicalFlag::ALL
            .iter()
            .map(|flag| (*flag, answer.to_string()))
            .collect();

        Self {
            age,
            sex: sex.into(),
            flags,
        }
    }

    /// Set a single flag answer.
    #[must_use]
    pub fn with_flag(mut self, flag: ClinicalFlag, answer: impl Into<String>) -> Self {
        self.flags.insert(flag, answer.into());
        self
    }

    /// Answer recorded for `flag`, or "" when absent.
    #[must_use]
    pub fn flag(&self, flag: ClinicalFlag) -> &str {
        self.flags.get(&flag).map_or("", String::as_str)
    }

    /// Check the age against the slider range.
    ///
    /// # Errors
    /// Returns a description of the violation.
    pub fn validate(&self) -> Result<(), String> {
        if !AGE_RANGE.contains(&self.age) {
            return Err(format!(
                "Idade {} fora do intervalo [{}, {}]",
                self.age,
                AGE_RANGE.start(),
                AGE_RANGE.end()
            ));
        }
        Ok(())
    }
}

impl Default for PatientAttributes {
    fn default() -> Self {
        Self::uniform(DEFAULT_AGE, MALE, AFFIRMATIVE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_flag_feature_names_are_unique() {
        let names: HashSet<_> = ClinicalFlag::ALL.iter().map(|f| f.feature_name()).collect();
        assert_eq!(names.len(), 16);
    }

    #[test]
    fn test_missing_flag_reads_empty() {
        let mut attrs = PatientAttributes::uniform(30, FEMALE, NEGATIVE);
        attrs.flags.remove(&ClinicalFlag::Asma);
        assert_eq!(attrs.flag(ClinicalFlag::Asma), "");
        assert_eq!(attrs.flag(ClinicalFlag::Febre), NEGATIVE);
    }

    #[test]
    fn test_validation() {
        assert!(PatientAttributes::uniform(100, MALE, AFFIRMATIVE).validate().is_ok());
        assert!(PatientAttributes::uniform(0, FEMALE, NEGATIVE).validate().is_ok());
        assert!(PatientAttributes::uniform(101, MALE, NEGATIVE).validate().is_err());
    }

    #[test]
    fn test_default_matches_fresh_form() {
        let attrs = PatientAttributes::default();
        assert_eq!(attrs.age, DEFAULT_AGE);
        assert_eq!(attrs.sex, MALE);
        assert!(ClinicalFlag::ALL
            .iter()
            .all(|f| attrs.flag(*f) == AFFIRMATIVE));
    }
}
