//! `epi-disease` — per-disease parameter tables and progression-state types.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                  |
//! |--------------|-----------------------------------------------------------|
//! | [`status`]   | `Status`, `SymptomState` (per-agent, per-disease FSM states) |
//! | [`params`]   | `DiseaseParams` — write-once transmission/progression constants and derived rate tables |
//! | [`config`]   | JSON parameter file: contact scalars, global disease defaults, per-disease overrides, withdrawal policy |
//!
//! `DiseaseParams` values are constructed once at setup, immutable for the
//! run, and shared by reference into every parallel interaction kernel.

pub mod config;
pub mod params;
pub mod status;


pub use config::{ParamsFile, WithdrawPolicy, build_params, parse_params_file};
pub use params::{DiseaseParams, MAX_DISEASES, MAX_STRAINS, Periods};
pub use status::{Status, SymptomState};
