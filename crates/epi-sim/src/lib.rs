//! `epi-sim` — the day-cycle driver tying the engine together.
//!
//! One simulated day is: reset survival accumulators, run the configured
//! day phases (each phase sets a location mode and runs a list of
//! interaction models), advance every agent's disease state once, report
//! counts, invalidate the spatial bins.
//!
//! [`SimBuilder`] assembles an [`EpiSim`] and validates the phase schedule
//! against the model registry up front; [`EpiObserver`] hooks let callers
//! watch per-day counts without owning the loop.

pub mod builder;
pub mod observer;
pub mod sim;
pub mod updater;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use observer::{EpiObserver, LogObserver, NoopObserver};
pub use sim::{default_phases, DayPhase, EpiSim};
pub use updater::update_status;
