//! Simulation assembly and up-front validation.

use epi_agent::Population;
use epi_core::{EpiError, EpiResult, SimClock, SimConfig, SimRng};
use epi_disease::WithdrawPolicy;
use epi_interaction::ModelRegistry;
use epi_spatial::BinCache;

use crate::sim::{default_phases, DayPhase, EpiSim};

/// Builds an [`EpiSim`], validating the phase schedule against the model
/// registry so a typo in a model name fails at build time, not mid-run.
pub struct SimBuilder {
    config: SimConfig,
    population: Population,
    registry: ModelRegistry,
    phases: Vec<DayPhase>,
    policy: WithdrawPolicy,
}

impl SimBuilder {
    /// Start from a config and a built population, with the standard model
    /// registry, the default three-phase day and default policy.
    pub fn new(config: SimConfig, population: Population) -> Self {
        Self {
            config,
            population,
            registry: ModelRegistry::standard(),
            phases: default_phases(),
            policy: WithdrawPolicy::default(),
        }
    }

    /// Replace the model registry (e.g. to add a custom model).
    pub fn registry(mut self, registry: ModelRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Replace the daily phase schedule.
    pub fn phases(mut self, phases: Vec<DayPhase>) -> Self {
        self.phases = phases;
        self
    }

    pub fn policy(mut self, policy: WithdrawPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn build(self) -> EpiResult<EpiSim> {
        for phase in &self.phases {
            for name in &phase.models {
                if !self.registry.contains(name) {
                    return Err(EpiError::UnknownInteractionModel(name.clone()));
                }
            }
        }
        if self.config.bin_cell_size == 0 {
            return Err(EpiError::Config("bin_cell_size must be positive".into()));
        }

        log::info!(
            "simulation built: {} agents, {} diseases, {} tiles, {} phases",
            self.population.agent_count(),
            self.population.num_diseases(),
            self.population.tiles.len(),
            self.phases.len()
        );
        let rng = SimRng::new(self.config.seed);
        Ok(EpiSim {
            bins: BinCache::new(self.config.bin_cell_size),
            clock: SimClock::new(),
            population: self.population,
            registry: self.registry,
            phases: self.phases,
            policy: self.policy,
            rng,
            config: self.config,
        })
    }
}
