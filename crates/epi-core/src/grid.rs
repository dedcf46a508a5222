//! Integer grid geometry: cells and rectangular cell boxes.
//!
//! The spatial domain is a 2-D integer grid.  Agents carry grid-cell
//! coordinates for their home and work locations; tiles own rectangular
//! sub-boxes of the grid.  All geometry here is closed-open: a `GridBox`
//! contains cells `lo.x <= x < hi.x`, `lo.y <= y < hi.y`.

use std::fmt;

// ── Cell ─────────────────────────────────────────────────────────────────────

/// A single grid-cell coordinate.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

// ── GridBox ──────────────────────────────────────────────────────────────────

/// A rectangular, closed-open box of grid cells: `[lo, hi)` in both axes.
///
/// A box with `hi.x <= lo.x` or `hi.y <= lo.y` is *degenerate* (contains no
/// cells).  Degenerate boxes are legal inputs everywhere; binning a
/// degenerate box yields an empty bin set.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridBox {
    pub lo: Cell,
    pub hi: Cell,
}

impl GridBox {
    pub const fn new(lo: Cell, hi: Cell) -> Self {
        Self { lo, hi }
    }

    /// A degenerate box containing no cells.
    pub const fn empty() -> Self {
        Self::new(Cell::new(0, 0), Cell::new(0, 0))
    }

    #[inline]
    pub fn width(&self) -> u32 {
        (self.hi.x - self.lo.x).max(0) as u32
    }

    #[inline]
    pub fn height(&self) -> u32 {
        (self.hi.y - self.lo.y).max(0) as u32
    }

    #[inline]
    pub fn num_cells(&self) -> usize {
        self.width() as usize * self.height() as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.num_cells() == 0
    }

    #[inline]
    pub fn contains(&self, c: Cell) -> bool {
        c.x >= self.lo.x && c.x < self.hi.x && c.y >= self.lo.y && c.y < self.hi.y
    }

    /// Clamp `c` to the nearest cell inside the box.
    ///
    /// # Panics
    /// Panics in debug mode if the box is degenerate.
    #[inline]
    pub fn clamp(&self, c: Cell) -> Cell {
        debug_assert!(!self.is_empty(), "clamp on a degenerate GridBox");
        Cell {
            x: c.x.clamp(self.lo.x, self.hi.x - 1),
            y: c.y.clamp(self.lo.y, self.hi.y - 1),
        }
    }

    /// Row-major index of `c` within the box (clamping out-of-box cells).
    #[inline]
    pub fn cell_index(&self, c: Cell) -> usize {
        let c = self.clamp(c);
        (c.y - self.lo.y) as usize * self.width() as usize + (c.x - self.lo.x) as usize
    }

    /// The smallest box covering both `self` and `other`.
    ///
    /// Degenerate operands are ignored (union with an empty box is identity).
    pub fn union(&self, other: &GridBox) -> GridBox {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        GridBox {
            lo: Cell::new(self.lo.x.min(other.lo.x), self.lo.y.min(other.lo.y)),
            hi: Cell::new(self.hi.x.max(other.hi.x), self.hi.y.max(other.hi.y)),
        }
    }
}
