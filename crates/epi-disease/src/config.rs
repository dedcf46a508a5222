//! Disease parameter file parsing.
//!
//! The file is JSON with four kinds of blocks:
//!
//! ```json
//! {
//!   "contact": { "pSC": 0.2, "pFA": 1.0 },
//!   "disease": { "nstrain": 2, "p_trans": [0.2, 0.3] },
//!   "diseases": {
//!     "flu": { "incubation_length_mean": 2.0 }
//!   },
//!   "policy": { "symptomatic_withdraw": true }
//! }
//! ```
//!
//! `disease` is the global default block; entries under `diseases` override
//! it per named disease.  Every field is optional — unset fields keep the
//! built-in defaults of [`DiseaseParams`].  Parameters are write-once: the
//! built tables are immutable for the whole run.

use std::collections::HashMap;

use epi_core::{EpiError, EpiResult};
use serde::Deserialize;

use crate::{DiseaseParams, MAX_DISEASES, MAX_STRAINS};

// ── File schema ──────────────────────────────────────────────────────────────

/// Contact-probability scalars.  Key names mirror the upstream input decks.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    #[serde(rename = "pSC")]
    pub p_sc: Option<f32>,
    #[serde(rename = "pCO")]
    pub p_co: Option<f32>,
    #[serde(rename = "pNH")]
    pub p_nh: Option<f32>,
    #[serde(rename = "pWO")]
    pub p_wo: Option<f32>,
    #[serde(rename = "pFA")]
    pub p_fa: Option<f32>,
    #[serde(rename = "pBAR")]
    pub p_bar: Option<f32>,
}

/// One disease block — the global default or a per-disease override.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct DiseaseBlock {
    pub nstrain: Option<usize>,
    pub p_trans: Option<Vec<f32>>,
    pub p_asymp: Option<Vec<f32>>,
    pub reduced_inf: Option<Vec<f32>>,
    pub vac_eff: Option<f32>,
    pub reinfect_prob: Option<f32>,
    pub infect: Option<f32>,
    pub incubation_length_mean: Option<f32>,
    pub incubation_length_std: Option<f32>,
    pub infectious_length_mean: Option<f32>,
    pub infectious_length_std: Option<f32>,
    pub symptomdev_length_mean: Option<f32>,
    pub symptomdev_length_std: Option<f32>,
    pub mean_immune_time: Option<f32>,
    pub immune_time_spread: Option<f32>,
}

/// Withdrawal/shelter policy block.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    pub symptomatic_withdraw: Option<bool>,
    pub shelter_compliance: Option<f32>,
    pub symptomatic_withdraw_compliance: Option<f32>,
}

/// The whole parameter file.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct ParamsFile {
    pub contact: ContactConfig,
    pub disease: DiseaseBlock,
    pub diseases: HashMap<String, DiseaseBlock>,
    pub policy: PolicyConfig,
}

// ── WithdrawPolicy ───────────────────────────────────────────────────────────

/// Runtime policy toggles shared by all diseases.
#[derive(Copy, Clone, Debug)]
pub struct WithdrawPolicy {
    /// When set, newly symptomatic agents withdraw with probability
    /// `symptomatic_withdraw_compliance`.
    pub symptomatic_withdraw: bool,
    /// Probability that an agent complies with a shelter-in-place order.
    pub shelter_compliance: f32,
    /// Probability that a newly symptomatic agent actually withdraws.
    pub symptomatic_withdraw_compliance: f32,
}

impl Default for WithdrawPolicy {
    fn default() -> Self {
        Self {
            symptomatic_withdraw: true,
            shelter_compliance: 0.95,
            symptomatic_withdraw_compliance: 0.95,
        }
    }
}

impl WithdrawPolicy {
    pub fn from_config(cfg: &PolicyConfig) -> Self {
        let d = Self::default();
        Self {
            symptomatic_withdraw: cfg.symptomatic_withdraw.unwrap_or(d.symptomatic_withdraw),
            shelter_compliance: cfg.shelter_compliance.unwrap_or(d.shelter_compliance),
            symptomatic_withdraw_compliance: cfg
                .symptomatic_withdraw_compliance
                .unwrap_or(d.symptomatic_withdraw_compliance),
        }
    }
}

// ── Parsing and building ─────────────────────────────────────────────────────

/// Parse a JSON parameter file.
pub fn parse_params_file(json: &str) -> EpiResult<ParamsFile> {
    serde_json::from_str(json).map_err(|e| EpiError::Config(format!("parameter file: {e}")))
}

/// Build one finalized `DiseaseParams` per named disease.
///
/// Application order per disease: built-in defaults, then the `contact`
/// block, then the global `disease` block, then the matching entry under
/// `diseases`.  Tables are derived last via [`DiseaseParams::initialize`].
pub fn build_params(file: &ParamsFile, names: &[&str]) -> EpiResult<Vec<DiseaseParams>> {
    if names.is_empty() || names.len() > MAX_DISEASES {
        return Err(EpiError::Config(format!(
            "{} diseases requested; expected 1..={MAX_DISEASES}",
            names.len()
        )));
    }

    let mut out = Vec::with_capacity(names.len());
    for &name in names {
        let mut p = DiseaseParams {
            name: name.to_string(),
            ..DiseaseParams::default()
        };
        apply_contact(&file.contact, &mut p);
        apply_block(&file.disease, &mut p)?;
        if let Some(block) = file.diseases.get(name) {
            apply_block(block, &mut p)?;
        }
        p.validate()?;
        p.initialize();
        out.push(p);
    }
    Ok(out)
}

fn apply_contact(c: &ContactConfig, p: &mut DiseaseParams) {
    if let Some(v) = c.p_sc {
        p.p_sc = v;
    }
    if let Some(v) = c.p_co {
        p.p_co = v;
    }
    if let Some(v) = c.p_nh {
        p.p_nh = v;
    }
    if let Some(v) = c.p_wo {
        p.p_wo = v;
    }
    if let Some(v) = c.p_fa {
        p.p_fa = v;
    }
    if let Some(v) = c.p_bar {
        p.p_bar = v;
    }
}

fn apply_block(b: &DiseaseBlock, p: &mut DiseaseParams) -> EpiResult<()> {
    if let Some(n) = b.nstrain {
        if n == 0 || n > MAX_STRAINS {
            return Err(EpiError::TooManyStrains {
                name: p.name.clone(),
                got: n,
            });
        }
        p.nstrain = n;
    }
    copy_strain_array(&b.p_trans, &mut p.p_trans, p.nstrain);
    copy_strain_array(&b.p_asymp, &mut p.p_asymp, p.nstrain);
    copy_strain_array(&b.reduced_inf, &mut p.reduced_inf, p.nstrain);

    if let Some(v) = b.vac_eff {
        p.vac_eff = v;
    }
    if let Some(v) = b.reinfect_prob {
        p.reinfect_prob = v;
    }
    if let Some(v) = b.infect {
        p.infect = v;
    }
    if let Some(v) = b.incubation_length_mean {
        p.incubation_length_mean = v;
    }
    if let Some(v) = b.incubation_length_std {
        p.incubation_length_std = v;
    }
    if let Some(v) = b.infectious_length_mean {
        p.infectious_length_mean = v;
    }
    if let Some(v) = b.infectious_length_std {
        p.infectious_length_std = v;
    }
    if let Some(v) = b.symptomdev_length_mean {
        p.symptomdev_length_mean = v;
    }
    if let Some(v) = b.symptomdev_length_std {
        p.symptomdev_length_std = v;
    }
    if let Some(v) = b.mean_immune_time {
        p.mean_immune_time = v;
    }
    if let Some(v) = b.immune_time_spread {
        p.immune_time_spread = v;
    }
    Ok(())
}

/// Copy up to `nstrain` entries from an optional config array; excess
/// entries are ignored (matching the upstream reader, which only consumes
/// `nstrain` values).
fn copy_strain_array(src: &Option<Vec<f32>>, dst: &mut [f32; MAX_STRAINS], nstrain: usize) {
    if let Some(values) = src {
        for (i, &v) in values.iter().take(nstrain.min(MAX_STRAINS)).enumerate() {
            dst[i] = v;
        }
    }
}
