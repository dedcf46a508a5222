//! `epi-spatial` — groups each tile's agents into square spatial bins.
//!
//! Interaction kernels only ever pair agents that share a bin, so candidate
//! search is O(bin population), not O(tile population).  A [`bins::BinSet`]
//! is a counting-sort index over one tile's agent cells; [`cache::BinCache`]
//! keeps one set per tile for home cells and one for work cells, rebuilt
//! lazily after invalidation.

pub mod bins;
pub mod cache;

#[cfg(test)]
mod tests;

pub use bins::BinSet;
pub use cache::{BinCache, BinChoice};
