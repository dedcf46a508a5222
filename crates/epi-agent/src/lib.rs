//! `epi-agent` — tiled Structure-of-Arrays agent population storage.
//!
//! # Crate layout
//!
//! | Module           | Contents                                                |
//! |------------------|---------------------------------------------------------|
//! | [`store`]        | `Tile` (per-tile SoA arrays), `DiseaseState`, `AgentSpec`, `Population` |
//! | [`builder`]      | `PopulationBuilder` (fluent construction)               |
//! | [`counts`]       | `DiseaseCounts` aggregation, `CellField` per-cell summary |
//! | [`demographics`] | `DemographicData` unit/community tables, school assignment |
//!
//! The population owns every per-agent array and the per-disease parameter
//! tables.  Agents are partitioned into tiles; an agent's identity is its
//! slot index within its tile, and tiles share no mutable state (one worker
//! per tile in the parallel phases).

pub mod builder;
pub mod counts;
pub mod demographics;
pub mod store;


pub use builder::PopulationBuilder;
pub use counts::{CellField, DiseaseCounts};
pub use demographics::{DemographicData, assign_school};
pub use store::{AgentSpec, DiseaseState, Population, Tile};
