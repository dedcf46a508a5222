//! Population-level aggregation: per-disease status tallies and the per-cell
//! occupancy/infection field.

use epi_core::{Cell, GridBox};

// ── DiseaseCounts ────────────────────────────────────────────────────────────

/// Whole-population status tally for one disease at one point in time.
///
/// `exposed` and `infectious` partition the `Infected` status by whether the
/// agent has passed incubation.  `symptomatic` and `withdrawn` overlap the
/// other buckets rather than partitioning them.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct DiseaseCounts {
    pub never: u64,
    pub exposed: u64,
    pub infectious: u64,
    pub immune: u64,
    pub susceptible: u64,
    pub dead: u64,
    pub symptomatic: u64,
    pub withdrawn: u64,
    pub total: u64,
}

impl DiseaseCounts {
    /// Agents currently carrying the disease (exposed or infectious).
    #[inline]
    pub fn infected(&self) -> u64 {
        self.exposed + self.infectious
    }
}

// ── CellField ────────────────────────────────────────────────────────────────

/// Row-major per-cell summary over a grid box: agent occupancy plus infected
/// counts per disease, keyed by the agents' home cells.
#[derive(Clone, Debug)]
pub struct CellField {
    bounds: GridBox,
    num_diseases: usize,
    occupancy: Vec<u32>,
    /// `num_diseases` consecutive planes of `bounds.num_cells()` entries.
    infected: Vec<u32>,
}

impl CellField {
    pub fn new(bounds: GridBox, num_diseases: usize) -> Self {
        let n = bounds.num_cells();
        Self {
            bounds,
            num_diseases,
            occupancy: vec![0; n],
            infected: vec![0; n * num_diseases],
        }
    }

    #[inline]
    pub fn bounds(&self) -> GridBox {
        self.bounds
    }

    #[inline]
    pub fn num_diseases(&self) -> usize {
        self.num_diseases
    }

    pub(crate) fn add_occupant(&mut self, cell: Cell) {
        if !self.bounds.is_empty() {
            let i = self.bounds.cell_index(cell);
            self.occupancy[i] += 1;
        }
    }

    pub(crate) fn add_infected(&mut self, d: usize, cell: Cell) {
        if !self.bounds.is_empty() {
            let i = self.bounds.cell_index(cell);
            self.infected[d * self.bounds.num_cells() + i] += 1;
        }
    }

    /// Number of agents homed in `cell` (0 for out-of-bounds cells).
    pub fn occupancy(&self, cell: Cell) -> u32 {
        if self.bounds.is_empty() || !self.bounds.contains(cell) {
            return 0;
        }
        self.occupancy[self.bounds.cell_index(cell)]
    }

    /// Number of agents homed in `cell` currently infected with disease `d`.
    pub fn infected(&self, d: usize, cell: Cell) -> u32 {
        if self.bounds.is_empty() || !self.bounds.contains(cell) || d >= self.num_diseases {
            return 0;
        }
        self.infected[d * self.bounds.num_cells() + self.bounds.cell_index(cell)]
    }
}
