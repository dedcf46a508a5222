//! Lazily rebuilt per-tile bin sets.
//!
//! Home cells never change, but agents flip between home and work cells as
//! the day phases change location mode, and the work-side layout differs per
//! tile.  The cache keeps both families of bin sets and rebuilds one family
//! at a time on demand.

use epi_agent::Tile;
use epi_core::{Cell, GridBox, LocationMode};

use crate::bins::BinSet;

/// Which cell array a kernel wants its bins built over.
///
/// `Active` resolves through the population's current [`LocationMode`]:
/// ambient-neighborhood and generic-model kernels mix agents wherever they
/// currently are, while the home and work kernels pin their own side.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum BinChoice {
    Home,
    Work,
    Active,
}

impl BinChoice {
    fn resolve(self, mode: LocationMode) -> LocationMode {
        match self {
            BinChoice::Home => LocationMode::Home,
            BinChoice::Work => LocationMode::Work,
            BinChoice::Active => mode,
        }
    }
}

/// One bin set per tile, per side (home/work), built on first use.
pub struct BinCache {
    bin_size: u32,
    home: Vec<BinSet>,
    work: Vec<BinSet>,
    home_valid: bool,
    work_valid: bool,
}

impl BinCache {
    pub fn new(bin_size: u32) -> Self {
        Self {
            bin_size,
            home: Vec::new(),
            work: Vec::new(),
            home_valid: false,
            work_valid: false,
        }
    }

    #[inline]
    pub fn bin_size(&self) -> u32 {
        self.bin_size
    }

    /// Make sure the bin sets backing `choice` under `mode` are current.
    pub fn ensure(&mut self, tiles: &[Tile], choice: BinChoice, mode: LocationMode) {
        match choice.resolve(mode) {
            LocationMode::Home => {
                if !self.home_valid {
                    self.home = tiles
                        .iter()
                        .map(|t| BinSet::build(t.bounds, self.bin_size, &t.home))
                        .collect();
                    self.home_valid = true;
                }
            }
            LocationMode::Work => {
                if !self.work_valid {
                    // Work cells may fall outside the tile's own box, so the
                    // work-side set covers their actual extent.
                    self.work = tiles
                        .iter()
                        .map(|t| BinSet::build(enclosing_box(&t.work), self.bin_size, &t.work))
                        .collect();
                    self.work_valid = true;
                }
            }
        }
    }

    /// Per-tile bin sets for `choice` under `mode`.
    ///
    /// # Panics
    /// Panics if the matching [`BinCache::ensure`] call has not happened.
    pub fn bins(&self, choice: BinChoice, mode: LocationMode) -> &[BinSet] {
        match choice.resolve(mode) {
            LocationMode::Home => {
                assert!(self.home_valid, "home bins used before ensure()");
                &self.home
            }
            LocationMode::Work => {
                assert!(self.work_valid, "work bins used before ensure()");
                &self.work
            }
        }
    }

    /// Drop both families; the next `ensure` rebuilds from scratch.
    pub fn invalidate_all(&mut self) {
        self.home_valid = false;
        self.work_valid = false;
    }
}

/// Smallest closed-open box covering all of `cells`; empty input gives a
/// degenerate box.
fn enclosing_box(cells: &[Cell]) -> GridBox {
    let mut it = cells.iter();
    let Some(&first) = it.next() else {
        return GridBox::empty();
    };
    let mut lo = first;
    let mut hi = first;
    for &c in it {
        lo.x = lo.x.min(c.x);
        lo.y = lo.y.min(c.y);
        hi.x = hi.x.max(c.x);
        hi.y = hi.y.max(c.y);
    }
    GridBox::new(lo, Cell::new(hi.x + 1, hi.y + 1))
}
