//! Feature vector layout expected by the antiviral classifier.
//!
//! The order below is the column order used at training time. The model
//! consumes values positionally, so any drift here silently corrupts
//! predictions.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Number of model inputs.
pub const FEATURE_COUNT: usize = 55;

/// Model column order.
pub const FEATURE_ORDER: [&str; FEATURE_COUNT] = [
    "age",
    "sex_m",
    "out_morbi_bin",
    "diabetes_bin",
    "cardiopati_bin",
    "nosocomial_bin",
    "asma_bin",
    "ave_suino_bin",
    "febre_bin",
    "tosse_bin",
    "dispneia_bin",
    "garganta_bin",
    "desc_resp_bin",
    "saturacao_bin",
    "diarreia_bin",
    "vomito_bin",
    "dor_abd_bin",
    "perd_olft_bin",
    "perd_pala_bin",
    "fadiga_bin",
    "fator_risc_bin",
    "puerpera_bin",
    "hematologi_bin",
    "sind_down_bin",
    "hepatica_bin",
    "renal_bin",
    "imunodepre_bin",
    "neurologic_bin",
    "pneumopati_bin",
    "obesidade_bin",
    "obes_imc_bin",
    "tabag_bin",
    "dt_interna_bin",
    "dt_evoluca_bin",
    "evolucao_bin",
    "antiviral_bin",
    "nu_idade_n_bin",
    "idade_bin",
    "cs_sexo_bin",
    "cs_gestant_bin",
    "vacina_cov_bin",
    "vacina_bin",
    "out_antiv_bin",
    "hospital_bin",
    "uti_bin",
    "dt_entuti_bin",
    "dt_saiduti_bin",
    "suport_ven_bin",
    "raiox_res_bin",
    "tomo_res_bin",
    "tp_amostra_bin",
    "pos_an_flu_bin",
    "tp_flu_an_bin",
    "co_detec_bin",
    "classi_fin_bin",
];

/// Model inputs the form never asks about; always encoded as 0.
pub const DEFAULTED_FEATURES: [&str; 37] = [
    "out_morbi_bin",
    "nosocomial_bin",
    "ave_suino_bin",
    "garganta_bin",
    "desc_resp_bin",
    "perd_olft_bin",
    "perd_pala_bin",
    "fadiga_bin",
    "fator_risc_bin",
    "puerpera_bin",
    "hematologi_bin",
    "sind_down_bin",
    "obes_imc_bin",
    "tabag_bin",
    "dt_interna_bin",
    "dt_evoluca_bin",
    "evolucao_bin",
    "antiviral_bin",
    "nu_idade_n_bin",
    "idade_bin",
    "cs_sexo_bin",
    "cs_gestant_bin",
    "vacina_cov_bin",
    "vacina_bin",
    "out_antiv_bin",
    "hospital_bin",
    "uti_bin",
    "dt_entuti_bin",
    "dt_saiduti_bin",
    "suport_ven_bin",
    "raiox_res_bin",
    "tomo_res_bin",
    "tp_amostra_bin",
    "pos_an_flu_bin",
    "tp_flu_an_bin",
    "co_detec_bin",
    "classi_fin_bin",
];

/// Position of `name` in [`FEATURE_ORDER`].
#[must_use]
pub fn feature_index(name: &str) -> Option<usize> {
    FEATURE_ORDER.iter().position(|n| *n == name)
}

/// Ordered numeric model input.
///
/// Always exactly [`FEATURE_COUNT`] values, laid out as [`FEATURE_ORDER`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    values: Vec<f64>,
}

impl FeatureVector {
    /// Reindex named values into model order.
    ///
    /// Columns missing from `named` are filled with 0. Names the model does
    /// not know are dropped.
    #[must_use]
    pub fn reindex(named: &BTreeMap<&str, f64>) -> Self {
        let values = FEATURE_ORDER
            .iter()
            .map(|name| named.get(name).copied().unwrap_or(0.0))
            .collect();
        Self { values }
    }

    /// Build from positional values.
    ///
    /// # Errors
    /// Returns error if the length is not [`FEATURE_COUNT`].
    pub fn from_vec(values: Vec<f64>) -> Result<Self, String> {
        if values.len() != FEATURE_COUNT {
            return Err(format!(
                "Expected {} features, got {}",
                FEATURE_COUNT,
                values.len()
            ));
        }
        Ok(Self { values })
    }

    /// Value of the named column.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<f64> {
        feature_index(name).map(|i| self.values[i])
    }

    /// Positional view handed to the classifier.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// `(name, value)` pairs in model order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        FEATURE_ORDER.iter().copied().zip(self.values.iter().copied())
    }
}
