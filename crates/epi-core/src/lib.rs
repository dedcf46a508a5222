//! `epi-core` — foundational types for the `epi-abm` epidemic engine.
//!
//! This crate is a dependency of every other `epi-*` crate.  It intentionally
//! has no `epi-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `AgentId`, `TileId`, `FamilyId`, `NborhoodId`, …      |
//! | [`grid`]        | `Cell`, `GridBox` (integer grid geometry)             |
//! | [`demo`]        | `AgeGroup`, `LocationMode`                            |
//! | [`time`]        | `Tick` (one simulated day), `SimClock`, `SimConfig`   |
//! | [`rng`]         | `TaskRng` (per-task, counter-keyed), `SimRng` (global)|
//! | [`prob`]        | `SurvivalProb` (atomic multiplicative accumulator)    |
//! | [`error`]       | `EpiError`, `EpiResult`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod demo;
pub mod error;
pub mod grid;
pub mod ids;
pub mod prob;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use demo::{AgeGroup, LocationMode, NUM_AGE_GROUPS};
pub use error::{EpiError, EpiResult};
pub use grid::{Cell, GridBox};
pub use ids::{AgentId, FamilyId, NborhoodId, TileId, WorkgroupId};
pub use prob::SurvivalProb;
pub use rng::{SimRng, TaskRng};
pub use time::{SimClock, SimConfig, Tick};
