//! `epi-interaction` — pluggable agent-to-agent transmission models.
//!
//! Each model is one strategy for pairing agents and accumulating
//! per-contact infection probability into the susceptible agent's
//! [`epi_core::SurvivalProb`].  Five models ship by default:
//!
//! | Name        | Pairs                                          | Bins   |
//! |-------------|------------------------------------------------|--------|
//! | `home`      | households and neighborhood family clusters    | home   |
//! | `work`      | workgroups and work clusters                   | work   |
//! | `school`    | shared classrooms                              | work   |
//! | `nborhood`  | ambient neighborhood mixing                    | active |
//! | `generic`   | density-driven, bin-wide force of infection    | active |
//!
//! The `generic` model is the exception to the accumulate-then-update rule:
//! it mutates disease status directly during the pass (its draws depend only
//! on the bin's pre-pass infected counts, so in-pass mutations cannot
//! feed back within one day).
//!
//! Custom models implement [`InteractionModel`] and register under a unique
//! name in the [`ModelRegistry`].

pub mod driver;
pub mod model;

mod generic;
mod home;
mod nborhood;
mod school;
mod work;


pub use driver::run_interaction;
pub use model::{InteractCtx, InteractionModel, ModelRegistry, names};
