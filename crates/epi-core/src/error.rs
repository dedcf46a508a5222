//! Engine error type.
//!
//! Every variant here represents a programmer or configuration error, not a
//! runtime data error — the simulation is stateless-per-tick with respect to
//! failure, so callers abort the run rather than retry.  Recoverable
//! situations (an agent with no contacts, an empty bin) are plain no-ops and
//! never surface as errors.

use thiserror::Error;

/// The top-level error type for all `epi-*` crates.
#[derive(Debug, Error)]
pub enum EpiError {
    #[error("unknown interaction model {0:?}")]
    UnknownInteractionModel(String),

    #[error("disease index {index} out of range ({count} diseases configured)")]
    DiseaseIndexOutOfRange { index: usize, count: usize },

    #[error("disease {name:?} configures {got} strains; at most 2 are supported")]
    TooManyStrains { name: String, got: usize },

    #[error("strain index {index} out of range ({nstrain} strains configured)")]
    StrainOutOfRange { index: usize, nstrain: usize },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("{what} length {got} does not match expected count {expected}")]
    CountMismatch {
        expected: usize,
        got: usize,
        what: &'static str,
    },
}

/// Shorthand result type for all `epi-*` crates.
pub type EpiResult<T> = Result<T, EpiError>;
