//! Counting-sort spatial bin index over one tile's agents.

use epi_core::{Cell, GridBox};

/// Immutable grouping of one tile's agent slots into square bins of
/// `bin_size × bin_size` grid cells.
///
/// Layout is a classic counting sort: `permutation` lists every slot index
/// grouped by bin, and `offsets` (length `num_bins + 1`) delimits each bin's
/// slice.  Cells outside the covered box are clamped to the nearest bin, so
/// every input cell lands somewhere.
#[derive(Clone, Debug)]
pub struct BinSet {
    bounds: GridBox,
    bin_size: u32,
    nx: u32,
    ny: u32,
    permutation: Vec<u32>,
    offsets: Vec<u32>,
}

impl BinSet {
    /// Bin the given per-slot cells over `bounds`.
    ///
    /// A degenerate box (or `bin_size == 0`) yields an empty set with zero
    /// bins; callers iterate nothing and no kernel runs.
    pub fn build(bounds: GridBox, bin_size: u32, cells: &[Cell]) -> Self {
        if bounds.is_empty() || bin_size == 0 {
            return Self {
                bounds: GridBox::empty(),
                bin_size,
                nx: 0,
                ny: 0,
                permutation: Vec::new(),
                offsets: vec![0],
            };
        }
        let nx = bounds.width().div_ceil(bin_size);
        let ny = bounds.height().div_ceil(bin_size);
        let num_bins = (nx * ny) as usize;

        let mut counts = vec![0u32; num_bins];
        for &cell in cells {
            counts[bin_index(bounds, bin_size, nx, cell)] += 1;
        }

        let mut offsets = Vec::with_capacity(num_bins + 1);
        let mut running = 0u32;
        offsets.push(0);
        for &c in &counts {
            running += c;
            offsets.push(running);
        }

        let mut cursor: Vec<u32> = offsets[..num_bins].to_vec();
        let mut permutation = vec![0u32; cells.len()];
        for (slot, &cell) in cells.iter().enumerate() {
            let b = bin_index(bounds, bin_size, nx, cell);
            permutation[cursor[b] as usize] = slot as u32;
            cursor[b] += 1;
        }

        debug_assert_eq!(offsets[num_bins] as usize, cells.len());
        Self {
            bounds,
            bin_size,
            nx,
            ny,
            permutation,
            offsets,
        }
    }

    #[inline]
    pub fn num_bins(&self) -> usize {
        (self.nx * self.ny) as usize
    }

    /// Number of binned agent slots.
    #[inline]
    pub fn num_items(&self) -> usize {
        self.permutation.len()
    }

    /// Bin containing `cell` (clamped into the covered box).
    ///
    /// # Panics
    /// Panics in debug mode if the set is empty.
    #[inline]
    pub fn bin_for(&self, cell: Cell) -> usize {
        bin_index(self.bounds, self.bin_size, self.nx, cell)
    }

    /// Slot indices of the agents in `bin`, in stable input order.
    #[inline]
    pub fn agents_in(&self, bin: usize) -> &[u32] {
        let lo = self.offsets[bin] as usize;
        let hi = self.offsets[bin + 1] as usize;
        &self.permutation[lo..hi]
    }

    /// Iterate `(bin, slots)` over the non-empty bins.
    pub fn iter_bins(&self) -> impl Iterator<Item = (usize, &[u32])> {
        (0..self.num_bins())
            .map(|b| (b, self.agents_in(b)))
            .filter(|(_, slots)| !slots.is_empty())
    }
}

#[inline]
fn bin_index(bounds: GridBox, bin_size: u32, nx: u32, cell: Cell) -> usize {
    let c = bounds.clamp(cell);
    let bx = (c.x - bounds.lo.x) as u32 / bin_size;
    let by = (c.y - bounds.lo.y) as u32 / bin_size;
    (by * nx + bx) as usize
}
