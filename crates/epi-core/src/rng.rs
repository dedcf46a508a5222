//! Deterministic per-task and simulation-level RNG wrappers.
//!
//! # Determinism strategy
//!
//! Every parallel kernel task (one logical task per agent × disease, or per
//! bin for the generic model) constructs its own `TaskRng` keyed by
//!
//!   (global_seed, day, tile, slot, disease)
//!
//! The key components are folded into a `SmallRng` seed with a golden-ratio
//! mix, which spreads consecutive keys uniformly across the seed space.
//! This means:
//!
//! - Tasks never share RNG state (no contention, no ordering dependency).
//! - A run is bit-reproducible under a fixed seed regardless of how tasks
//!   are scheduled across threads.
//! - Any single task's draws can be replayed in isolation for analysis.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::{Tick, TileId};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Fold one key component into a running seed hash.
#[inline]
fn mix(h: u64, v: u64) -> u64 {
    (h ^ v.wrapping_mul(MIXING_CONSTANT))
        .rotate_left(27)
        .wrapping_mul(0x94d0_49bb_1331_11eb)
}

// ── TaskRng ───────────────────────────────────────────────────────────────────

/// Counter-keyed deterministic RNG for one parallel kernel task.
///
/// Cheap to construct; create one at the top of each task rather than
/// storing per-agent RNG state.  The type is `!Sync` to prevent accidental
/// sharing across threads.
pub struct TaskRng(SmallRng);

impl TaskRng {
    /// Seed deterministically from the run seed and the task's identity.
    ///
    /// `slot` is the agent slot within the tile (or the bin index for
    /// per-bin tasks — the two task shapes never coexist within one pass,
    /// so the streams cannot collide).
    pub fn new(global_seed: u64, day: Tick, tile: TileId, slot: u32, disease: usize) -> Self {
        let mut s = mix(global_seed, day.0);
        s = mix(s, tile.0 as u64);
        s = mix(s, slot as u64);
        s = mix(s, disease as u64);
        TaskRng(SmallRng::seed_from_u64(s))
    }

    /// Expose the inner `SmallRng` for use with `rand` distribution types.
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    /// Sample a uniformly distributed value of any `Standard`-distributed type.
    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        rand::distributions::Standard: rand::distributions::Distribution<T>,
    {
        self.0.r#gen()
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// `true` with probability `p` (clamped to [0, 1]).
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }
}

// ── SimRng ────────────────────────────────────────────────────────────────────

/// Simulation-level RNG for global, single-threaded operations (initial case
/// seeding, shelter draws, demographic assignment).
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        rand::distributions::Standard: rand::distributions::Distribution<T>,
    {
        self.0.r#gen()
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }
}
