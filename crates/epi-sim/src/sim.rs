//! The assembled simulation and its day loop.

use epi_agent::{DiseaseCounts, Population};
use epi_core::{EpiResult, LocationMode, SimClock, SimConfig, SimRng, Tick};
use epi_disease::WithdrawPolicy;
use epi_interaction::{names, run_interaction, ModelRegistry};
use epi_spatial::BinCache;

use crate::observer::EpiObserver;
use crate::updater::update_status;

// ── DayPhase ─────────────────────────────────────────────────────────────────

/// One slice of the daily schedule: a location mode plus the interaction
/// models to run in it, in order.
#[derive(Clone, Debug)]
pub struct DayPhase {
    pub mode: LocationMode,
    pub models: Vec<String>,
}

impl DayPhase {
    pub fn new(mode: LocationMode, models: &[&str]) -> Self {
        Self {
            mode,
            models: models.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// The standard three-phase day: the working day (workplaces, schools and
/// ambient work-side mixing), the evening back in the home neighborhood,
/// then the night within households.
pub fn default_phases() -> Vec<DayPhase> {
    vec![
        DayPhase::new(
            LocationMode::Work,
            &[names::WORK, names::SCHOOL, names::NBORHOOD],
        ),
        DayPhase::new(LocationMode::Home, &[names::NBORHOOD]),
        DayPhase::new(LocationMode::Home, &[names::HOME]),
    ]
}

// ── EpiSim ───────────────────────────────────────────────────────────────────

/// A fully assembled simulation.  Build via [`crate::SimBuilder`].
pub struct EpiSim {
    pub(crate) config: SimConfig,
    pub(crate) clock: SimClock,
    pub(crate) population: Population,
    pub(crate) registry: ModelRegistry,
    pub(crate) bins: BinCache,
    pub(crate) phases: Vec<DayPhase>,
    pub(crate) policy: WithdrawPolicy,
    pub(crate) rng: SimRng,
}

impl EpiSim {
    #[inline]
    pub fn current_day(&self) -> Tick {
        self.clock.current_tick
    }

    #[inline]
    pub fn population(&self) -> &Population {
        &self.population
    }

    #[inline]
    pub fn population_mut(&mut self) -> &mut Population {
        &mut self.population
    }

    /// Per-disease counts for the current state.
    pub fn counts(&self) -> EpiResult<Vec<DiseaseCounts>> {
        (0..self.population.num_diseases())
            .map(|d| self.population.disease_counts(d))
            .collect()
    }

    /// Seed initial infections (delegates to the population, drawing from
    /// the simulation's own RNG stream).
    pub fn seed_infections(&mut self, d: usize, strain: usize, count: u32) -> EpiResult<u32> {
        let seeded = self
            .population
            .seed_infections(d, strain, count, &mut self.rng)?;
        log::info!(
            "seeded {seeded} initial infections of disease {d} strain {strain}"
        );
        Ok(seeded)
    }

    /// Issue a shelter-in-place order at the configured compliance.
    pub fn shelter_start(&mut self) {
        log::info!("shelter-in-place starts on {}", self.clock.current_tick);
        self.population
            .shelter_start(self.policy.shelter_compliance, &mut self.rng);
    }

    /// Lift the shelter-in-place order.
    pub fn shelter_stop(&mut self) {
        log::info!("shelter-in-place ends on {}", self.clock.current_tick);
        let policy = self.policy;
        self.population.shelter_stop(&policy, &mut self.rng);
    }

    /// Run one full simulated day and return per-disease counts.
    pub fn step_day(&mut self) -> EpiResult<Vec<DiseaseCounts>> {
        let day = self.clock.current_tick;
        log::debug!("starting {day}");
        self.population.reset_probs();

        for phase in &self.phases {
            self.population.set_mode(phase.mode);
            for name in &phase.models {
                let model = self.registry.get(name)?;
                run_interaction(
                    model,
                    &mut self.population,
                    &mut self.bins,
                    day,
                    self.config.seed,
                    self.config.social_scale,
                );
            }
        }

        update_status(&mut self.population, &self.policy, day, self.config.seed);
        let counts = self.counts()?;

        self.bins.invalidate_all();
        self.clock.advance();
        Ok(counts)
    }

    /// Run the configured number of days under the given observer.
    pub fn run(&mut self, observer: &mut dyn EpiObserver) -> EpiResult<()> {
        let days = self.config.days;
        self.run_days(days, observer)
    }

    /// Run `days` more days under the given observer.
    pub fn run_days(&mut self, days: u64, observer: &mut dyn EpiObserver) -> EpiResult<()> {
        for _ in 0..days {
            let day = self.clock.current_tick;
            observer.on_day_start(day);
            let counts = self.step_day()?;
            observer.on_day_end(day, &counts);
        }
        observer.on_sim_end();
        Ok(())
    }
}
