//! Per-day observation hooks.

use epi_agent::DiseaseCounts;
use epi_core::Tick;

/// Callbacks fired by [`crate::EpiSim::run_days`] around each simulated day.
///
/// All methods default to no-ops, so implementations override only what
/// they care about.
pub trait EpiObserver {
    fn on_day_start(&mut self, _day: Tick) {}

    /// Called after the day's status update with one entry per disease.
    fn on_day_end(&mut self, _day: Tick, _counts: &[DiseaseCounts]) {}

    fn on_sim_end(&mut self) {}
}

/// Observer that observes nothing.
pub struct NoopObserver;

impl EpiObserver for NoopObserver {}

/// Logs per-disease counts at `info` level at the end of every day.
pub struct LogObserver;

impl EpiObserver for LogObserver {
    fn on_day_end(&mut self, day: Tick, counts: &[DiseaseCounts]) {
        for (d, c) in counts.iter().enumerate() {
            log::info!(
                "{day} disease={d} exposed={} infectious={} immune={} susceptible={} dead={} withdrawn={}",
                c.exposed,
                c.infectious,
                c.immune,
                c.susceptible,
                c.dead,
                c.withdrawn
            );
        }
    }
}
