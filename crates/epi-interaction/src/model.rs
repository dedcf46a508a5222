//! The interaction-model trait and the name-keyed model registry.

use epi_agent::Tile;
use epi_core::{EpiError, EpiResult, LocationMode, Tick, TileId};
use epi_disease::DiseaseParams;
use epi_spatial::{BinChoice, BinSet};
use rustc_hash::FxHashMap;

use crate::{generic, home, nborhood, school, work};

/// Canonical model names, as used in day-phase configuration.
pub mod names {
    pub const HOME: &str = "home";
    pub const WORK: &str = "work";
    pub const SCHOOL: &str = "school";
    pub const NBORHOOD: &str = "nborhood";
    pub const GENERIC: &str = "generic";
}

// ── InteractCtx ──────────────────────────────────────────────────────────────

/// Per-tile, per-disease invocation context handed to a model.
#[derive(Copy, Clone, Debug)]
pub struct InteractCtx {
    /// Simulated day, part of every task's RNG key.
    pub day: Tick,
    /// Run-level RNG seed.
    pub seed: u64,
    /// Tile being processed.
    pub tile: TileId,
    /// Disease index within the population's parameter tables.
    pub disease: usize,
    /// Location mode the population is currently in.
    pub mode: LocationMode,
    /// Global scale on all non-household mixing.
    pub social_scale: f32,
}

// ── InteractionModel ─────────────────────────────────────────────────────────

/// One transmission strategy.
///
/// `interact_tile` is called once per (tile, disease) with exclusive access
/// to the tile; implementations must not touch state outside it.  Contact
/// models accumulate into the tile's survival products and leave status
/// alone; only density-driven models may mutate status directly.
pub trait InteractionModel: Send + Sync {
    /// Registry name.
    fn name(&self) -> &'static str;

    /// Which cell array this model's bins are built over.
    fn bin_choice(&self) -> BinChoice;

    fn interact_tile(
        &self,
        tile: &mut Tile,
        bins: &BinSet,
        params: &DiseaseParams,
        ctx: &InteractCtx,
    );
}

// ── ModelRegistry ────────────────────────────────────────────────────────────

/// Name-keyed collection of interaction models.
pub struct ModelRegistry {
    models: FxHashMap<&'static str, Box<dyn InteractionModel>>,
}

impl ModelRegistry {
    /// An empty registry (no models).
    pub fn empty() -> Self {
        Self {
            models: FxHashMap::default(),
        }
    }

    /// The five built-in models.
    pub fn standard() -> Self {
        let mut reg = Self::empty();
        reg.register(Box::new(home::HomeInteraction));
        reg.register(Box::new(work::WorkInteraction));
        reg.register(Box::new(school::SchoolInteraction));
        reg.register(Box::new(nborhood::NborhoodInteraction));
        reg.register(Box::new(generic::GenericInteraction));
        reg
    }

    /// Add or replace a model under its own name.
    pub fn register(&mut self, model: Box<dyn InteractionModel>) {
        self.models.insert(model.name(), model);
    }

    pub fn get(&self, name: &str) -> EpiResult<&dyn InteractionModel> {
        self.models
            .get(name)
            .map(Box::as_ref)
            .ok_or_else(|| EpiError::UnknownInteractionModel(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.models.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.models.keys().copied()
    }
}

// ── Shared kernel helpers ────────────────────────────────────────────────────

/// Transmitter-side infectiousness scale: overall rate × vaccine efficacy,
/// reduced for asymptomatic carriers.
pub(crate) fn transmitter_factor(tile: &Tile, d: usize, slot: usize, params: &DiseaseParams) -> f32 {
    use epi_disease::SymptomState;
    let state = &tile.diseases[d];
    let mut f = params.infect * params.vac_eff;
    if state.symptom[slot] == SymptomState::Asymptomatic {
        let s = (state.strain[slot] as usize).min(params.reduced_inf.len() - 1);
        f *= params.reduced_inf[s];
    }
    f
}

/// Fold one contact's infection probability into the susceptible agent's
/// survival product.  No-op contributions are skipped.
#[inline]
pub(crate) fn apply_contact(tile: &Tile, d: usize, slot: usize, infect_prob: f32) {
    let survival = 1.0 - infect_prob;
    if survival < 1.0 {
        tile.diseases[d].prob[slot].multiply(survival.max(0.0));
    }
}
