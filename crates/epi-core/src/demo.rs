//! Demographic categoricals shared by the population store and the
//! disease-parameter tables.

use std::fmt;

// ── AgeGroup ─────────────────────────────────────────────────────────────────

/// Five-way age bracket.  The discriminant doubles as the index into the
/// per-age transmission-rate tables, so the order here is load-bearing.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum AgeGroup {
    /// Under 5 years.
    #[default]
    Under5 = 0,
    /// 5–17 years.
    Age5To17 = 1,
    /// 18–29 years.
    Age18To29 = 2,
    /// 30–64 years.
    Age30To64 = 3,
    /// 65 years and older.
    Age65Plus = 4,
}

/// Number of age groups (length of every per-age rate table).
pub const NUM_AGE_GROUPS: usize = 5;

impl AgeGroup {
    pub const ALL: [AgeGroup; NUM_AGE_GROUPS] = [
        AgeGroup::Under5,
        AgeGroup::Age5To17,
        AgeGroup::Age18To29,
        AgeGroup::Age30To64,
        AgeGroup::Age65Plus,
    ];

    /// Index into per-age rate tables.
    #[inline(always)]
    pub fn index(self) -> usize {
        self as usize
    }

    /// The two youngest brackets count as children in the contact rules.
    #[inline(always)]
    pub fn is_child(self) -> bool {
        (self as u8) <= 1
    }
}

impl fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AgeGroup::Under5 => "<5",
            AgeGroup::Age5To17 => "5-17",
            AgeGroup::Age18To29 => "18-29",
            AgeGroup::Age30To64 => "30-64",
            AgeGroup::Age65Plus => "65+",
        };
        f.write_str(s)
    }
}

// ── LocationMode ─────────────────────────────────────────────────────────────

/// Which of an agent's two locations is currently active.
///
/// Neighborhood (ambient) interactions and the generic model use whichever
/// location mode the day phase has selected; home and work interactions are
/// pinned to their own bin sets regardless of mode.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LocationMode {
    #[default]
    Home,
    Work,
}
