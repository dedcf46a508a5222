//! Atomic multiplicative survival-probability accumulator.
//!
//! During an interaction pass, many concurrent tasks may each contribute a
//! per-contact survival factor to the *same* agent's accumulator (two bin
//! neighbors hitting agent *i*, or two diseases' passes racing if a caller
//! ever interleaves them).  The accumulator therefore supports a lock-free
//! atomic multiply built from a compare-exchange loop over the `f32` bit
//! pattern.
//!
//! Multiplication is commutative, so the final product is independent of the
//! order in which contributions land, up to floating-point associativity.

use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

/// Per-agent, per-disease running product of `1 − per-contact infection
/// probability`, reset to 1.0 at the start of each interaction phase and
/// consumed once per day by the status updater.
///
/// Products of factors in `[0, 1]` stay in `[0, 1]`; no clamping is needed.
pub struct SurvivalProb(AtomicU32);

impl SurvivalProb {
    /// A fresh accumulator holding 1.0 (no contacts yet).
    pub fn new() -> Self {
        Self(AtomicU32::new(1.0_f32.to_bits()))
    }

    /// Current value.  Relaxed load — callers read only at barrier points.
    #[inline]
    pub fn get(&self) -> f32 {
        f32::from_bits(self.0.load(Ordering::Relaxed))
    }

    /// Overwrite with `value` (used by tests and the reset pass).
    #[inline]
    pub fn set(&self, value: f32) {
        self.0.store(value.to_bits(), Ordering::Relaxed);
    }

    /// Reset to 1.0 for the next interaction phase.
    #[inline]
    pub fn reset(&self) {
        self.set(1.0);
    }

    /// Atomically multiply the stored value by `factor`.
    ///
    /// Lock-free CAS loop; safe for any number of concurrent writers.
    #[inline]
    pub fn multiply(&self, factor: f32) {
        let mut current = self.0.load(Ordering::Relaxed);
        loop {
            let next = (f32::from_bits(current) * factor).to_bits();
            match self
                .0
                .compare_exchange_weak(current, next, Ordering::Relaxed, Ordering::Relaxed)
            {
                Ok(_) => return,
                Err(observed) => current = observed,
            }
        }
    }
}

impl Default for SurvivalProb {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for SurvivalProb {
    fn clone(&self) -> Self {
        Self(AtomicU32::new(self.0.load(Ordering::Relaxed)))
    }
}

impl fmt::Debug for SurvivalProb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SurvivalProb({})", self.get())
    }
}
