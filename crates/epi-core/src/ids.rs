//! Strongly typed, zero-cost identifier wrappers.
//!
//! All IDs are `Copy + Ord + Hash` so they can be used as map keys and sorted
//! collection elements without ceremony.  The inner integer is `pub` to allow
//! direct indexing into SoA `Vec`s via `id.0 as usize`, but callers should
//! prefer the `.index()` helpers for clarity.
//!
//! An `AgentId` is the agent's slot index *within its tile*; there is no
//! cross-tile agent identity.  `FamilyId` and `WorkgroupId` are group labels,
//! not indices — four consecutive labels form one "cluster" (see
//! [`FamilyId::cluster`]), which drives the neighborhood-cluster contact rule.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID" — equivalent to the type's MAX.
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }
    };
}

typed_id! {
    /// Slot index of an agent within its tile's SoA storage.
    pub struct AgentId(u32);
}

typed_id! {
    /// Index of a spatial tile (one tile = one worker's agents).
    pub struct TileId(u32);
}

typed_id! {
    /// Household label.  Agents with equal `FamilyId` and equal home
    /// neighborhood share a household.
    pub struct FamilyId(u32);
}

typed_id! {
    /// Neighborhood label (home or work, depending on which array it sits in).
    pub struct NborhoodId(u32);
}

typed_id! {
    /// Workgroup label within a work neighborhood.
    pub struct WorkgroupId(u32);
}

impl FamilyId {
    /// Neighborhood-cluster label: four consecutive families form a cluster.
    #[inline(always)]
    pub fn cluster(self) -> u32 {
        self.0 / 4
    }
}

impl WorkgroupId {
    /// Work-cluster label: four consecutive workgroups form a cluster.
    #[inline(always)]
    pub fn cluster(self) -> u32 {
        self.0 / 4
    }
}
