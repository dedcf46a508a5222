//! Write-once, per-disease transmission and progression constants.
//!
//! One `DiseaseParams` exists per tracked disease.  It is built from the
//! parameter file at setup ([`crate::config::build_params`]), finalized by
//! [`DiseaseParams::initialize`], and thereafter shared read-only into every
//! interaction kernel and the status updater — no synchronization needed.
//!
//! # Rate tables
//!
//! The one-on-one contact kernels select a base transmission rate from a
//! per-age table keyed by the *susceptible* agent's age group.  Which table
//! applies depends on the transmitter: child vs adult, attending/working at
//! a school or not (the `_sc` variants cover transmitters with no school
//! tie, who spend the day at home), and within-family vs
//! neighborhood-cluster contact.  `xmit_school` and `xmit_hood` cover
//! classroom and ambient-neighborhood mixing.

use epi_core::{EpiError, EpiResult, NUM_AGE_GROUPS, TaskRng};
use rand::distributions::Distribution;
use rand_distr::Normal;

use crate::SymptomState;

/// Maximum number of diseases tracked simultaneously.
pub const MAX_DISEASES: usize = 10;

/// Maximum number of strains per disease.
pub const MAX_STRAINS: usize = 2;

/// Minimum value for any drawn progression period, in days.
const MIN_PERIOD: f32 = 1.0;

// ── Built-in base rate tables (before contact-scalar scaling) ────────────────

const XMIT_CHILD: [f32; NUM_AGE_GROUPS] = [0.6, 0.6, 0.3, 0.3, 0.3];
const XMIT_ADULT: [f32; NUM_AGE_GROUPS] = [0.3, 0.3, 0.4, 0.4, 0.4];
const XMIT_CHILD_SC: [f32; NUM_AGE_GROUPS] = [0.9, 0.9, 0.3, 0.3, 0.3];
const XMIT_ADULT_SC: [f32; NUM_AGE_GROUPS] = [0.45, 0.45, 0.4, 0.4, 0.4];
const XMIT_NC_CHILD: [f32; NUM_AGE_GROUPS] = [0.075, 0.075, 0.05, 0.05, 0.05];
const XMIT_NC_ADULT: [f32; NUM_AGE_GROUPS] = [0.04, 0.04, 0.05, 0.05, 0.05];
const XMIT_NC_CHILD_SC: [f32; NUM_AGE_GROUPS] = [0.1125, 0.1125, 0.05, 0.05, 0.05];
const XMIT_NC_ADULT_SC: [f32; NUM_AGE_GROUPS] = [0.06, 0.06, 0.05, 0.05, 0.05];
const XMIT_SCHOOL: [f32; NUM_AGE_GROUPS] = [0.0105, 0.0105, 0.0045, 0.0045, 0.0045];
const XMIT_HOOD: [f32; NUM_AGE_GROUPS] = [0.0000725, 0.0002175, 0.00058, 0.00058, 0.00058];

// ── Periods ──────────────────────────────────────────────────────────────────

/// One agent's freshly drawn progression timers, in days.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Periods {
    /// Days from infection until the agent becomes infectious.
    pub incubation: f32,
    /// Days the agent stays infectious once incubation has passed.
    pub infectious: f32,
    /// Days from infection until symptoms develop (unless asymptomatic).
    pub symptomdev: f32,
}

// ── DiseaseParams ────────────────────────────────────────────────────────────

/// Immutable per-disease parameter table.
#[derive(Clone, Debug)]
pub struct DiseaseParams {
    pub name: String,

    /// Number of strains (1 or 2).
    pub nstrain: usize,
    /// Per-strain transmissibility.
    pub p_trans: [f32; MAX_STRAINS],
    /// Per-strain probability of a fully asymptomatic course.
    pub p_asymp: [f32; MAX_STRAINS],
    /// Per-strain relative infectiousness of asymptomatic carriers.
    pub reduced_inf: [f32; MAX_STRAINS],

    /// Vaccine efficacy factor applied to every transmission rate.
    pub vac_eff: f32,
    /// Probability gate on reinfection of `Susceptible` (post-immune) agents.
    pub reinfect_prob: f32,
    /// Overall infection rate scale (`effective = infect × vac_eff × table`).
    pub infect: f32,

    pub incubation_length_mean: f32,
    pub incubation_length_std: f32,
    pub infectious_length_mean: f32,
    pub infectious_length_std: f32,
    pub symptomdev_length_mean: f32,
    pub symptomdev_length_std: f32,

    /// Mean immune duration after recovery, in days.
    pub mean_immune_time: f32,
    /// Half-width of the uniform spread around the mean immune duration.
    pub immune_time_spread: f32,

    // ── Contact-probability scalars (from the `contact` config block) ─────
    pub p_sc: f32,
    pub p_co: f32,
    pub p_nh: f32,
    pub p_wo: f32,
    pub p_fa: f32,
    /// Bar/venue contact probability.  Parsed for config compatibility;
    /// negative disables.  No venue model consumes it yet.
    pub p_bar: f32,

    // ── Derived rate tables, filled by `initialize` ───────────────────────
    pub xmit_child: [f32; NUM_AGE_GROUPS],
    pub xmit_adult: [f32; NUM_AGE_GROUPS],
    pub xmit_child_sc: [f32; NUM_AGE_GROUPS],
    pub xmit_adult_sc: [f32; NUM_AGE_GROUPS],
    pub xmit_nc_child: [f32; NUM_AGE_GROUPS],
    pub xmit_nc_adult: [f32; NUM_AGE_GROUPS],
    pub xmit_nc_child_sc: [f32; NUM_AGE_GROUPS],
    pub xmit_nc_adult_sc: [f32; NUM_AGE_GROUPS],
    pub xmit_school: [f32; NUM_AGE_GROUPS],
    pub xmit_hood: [f32; NUM_AGE_GROUPS],
}

impl Default for DiseaseParams {
    fn default() -> Self {
        Self {
            name: String::new(),
            nstrain: 2,
            p_trans: [0.20, 0.30],
            p_asymp: [0.40, 0.40],
            reduced_inf: [0.75, 0.75],
            vac_eff: 1.0,
            reinfect_prob: 0.0,
            infect: 1.0,
            incubation_length_mean: 5.0,
            incubation_length_std: 1.0,
            infectious_length_mean: 6.0,
            infectious_length_std: 1.0,
            symptomdev_length_mean: 5.0,
            symptomdev_length_std: 1.0,
            mean_immune_time: 180.0,
            immune_time_spread: 30.0,
            p_sc: 0.2,
            p_co: 1.45,
            p_nh: 1.45,
            p_wo: 0.5,
            p_fa: 1.0,
            p_bar: -1.0,
            xmit_child: XMIT_CHILD,
            xmit_adult: XMIT_ADULT,
            xmit_child_sc: XMIT_CHILD_SC,
            xmit_adult_sc: XMIT_ADULT_SC,
            xmit_nc_child: XMIT_NC_CHILD,
            xmit_nc_adult: XMIT_NC_ADULT,
            xmit_nc_child_sc: XMIT_NC_CHILD_SC,
            xmit_nc_adult_sc: XMIT_NC_ADULT_SC,
            xmit_school: XMIT_SCHOOL,
            xmit_hood: XMIT_HOOD,
        }
    }
}

impl DiseaseParams {
    /// Derive the final rate tables from the base tables and the contact
    /// scalars.  Call exactly once, after all config overrides are applied.
    ///
    /// Scaling: family tables by `p_fa`, cluster tables by `p_co`, classroom
    /// by `p_sc`, ambient neighborhood by `p_nh`.  (`p_wo` is applied at the
    /// work kernel; `p_bar` is reserved.)
    pub fn initialize(&mut self) {
        for i in 0..NUM_AGE_GROUPS {
            self.xmit_child[i] = XMIT_CHILD[i] * self.p_fa;
            self.xmit_adult[i] = XMIT_ADULT[i] * self.p_fa;
            self.xmit_child_sc[i] = XMIT_CHILD_SC[i] * self.p_fa;
            self.xmit_adult_sc[i] = XMIT_ADULT_SC[i] * self.p_fa;
            self.xmit_nc_child[i] = XMIT_NC_CHILD[i] * self.p_co;
            self.xmit_nc_adult[i] = XMIT_NC_ADULT[i] * self.p_co;
            self.xmit_nc_child_sc[i] = XMIT_NC_CHILD_SC[i] * self.p_co;
            self.xmit_nc_adult_sc[i] = XMIT_NC_ADULT_SC[i] * self.p_co;
            self.xmit_school[i] = XMIT_SCHOOL[i] * self.p_sc;
            self.xmit_hood[i] = XMIT_HOOD[i] * self.p_nh;
        }
    }

    /// Check structural invariants (strain count).
    pub fn validate(&self) -> EpiResult<()> {
        if self.nstrain == 0 || self.nstrain > MAX_STRAINS {
            return Err(EpiError::TooManyStrains {
                name: self.name.clone(),
                got: self.nstrain,
            });
        }
        Ok(())
    }

    // ── Draws at the moment of new infection ──────────────────────────────

    /// Pick a strain proportionally to per-strain transmissibility.
    pub fn draw_strain(&self, rng: &mut TaskRng) -> u8 {
        if self.nstrain < 2 {
            return 0;
        }
        let total = self.p_trans[0] + self.p_trans[1];
        if total <= 0.0 {
            return 0;
        }
        if rng.random::<f32>() * total < self.p_trans[1] { 1 } else { 0 }
    }

    /// Redraw the agent's personal progression timers (Normal, clamped to at
    /// least one day).
    pub fn draw_periods(&self, rng: &mut TaskRng) -> Periods {
        Periods {
            incubation: draw_normal(
                self.incubation_length_mean,
                self.incubation_length_std,
                rng,
            ),
            infectious: draw_normal(
                self.infectious_length_mean,
                self.infectious_length_std,
                rng,
            ),
            symptomdev: draw_normal(
                self.symptomdev_length_mean,
                self.symptomdev_length_std,
                rng,
            ),
        }
    }

    /// Draw the post-recovery immune duration: uniform in
    /// `mean ± spread`, at least one day.
    pub fn draw_immune_time(&self, rng: &mut TaskRng) -> f32 {
        let lo = self.mean_immune_time - self.immune_time_spread;
        let hi = self.mean_immune_time + self.immune_time_spread;
        let t = if hi > lo { rng.gen_range(lo..hi) } else { lo };
        t.max(MIN_PERIOD)
    }

    /// Decide whether this infection runs an asymptomatic course.
    pub fn draw_symptom_state(&self, strain: u8, rng: &mut TaskRng) -> SymptomState {
        let s = (strain as usize).min(MAX_STRAINS - 1);
        if rng.random::<f32>() < self.p_asymp[s] {
            SymptomState::Asymptomatic
        } else {
            SymptomState::Presymptomatic
        }
    }
}

/// Normal draw clamped to `MIN_PERIOD`; a non-positive std collapses to the
/// mean.
fn draw_normal(mean: f32, std: f32, rng: &mut TaskRng) -> f32 {
    let v = match Normal::new(mean, std.max(0.0)) {
        Ok(dist) => dist.sample(rng.inner()),
        Err(_) => mean,
    };
    v.max(MIN_PERIOD)
}
