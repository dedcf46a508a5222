//! Census-unit demographic inputs and school assignment.
//!
//! A *unit* is one census block of the input data: a population total, its
//! age-group breakdown, a household-size histogram, and how many residents
//! leave for work during the day.  Units are the natural granularity for
//! population synthesis; the builder turns them into agents with household
//! and neighborhood structure.

use epi_core::{Cell, EpiError, EpiResult, NborhoodId, SimRng, NUM_AGE_GROUPS};

/// Largest household size tracked by the census histogram.
pub const MAX_HOUSEHOLD_SIZE: usize = 7;

/// One census unit's demographic inputs.
#[derive(Clone, Debug, Default)]
pub struct DemographicData {
    /// Total residents of the unit.
    pub unit_population: u32,
    /// Residents per age group; must sum to `unit_population`.
    pub age_counts: [u32; NUM_AGE_GROUPS],
    /// `household_sizes[k]` = number of households with `k + 1` members.
    pub household_sizes: [u32; MAX_HOUSEHOLD_SIZE],
    /// Residents who commute out of the unit during the day.
    pub daytime_workers: u32,
    /// Grid cell where the unit's community starts.
    pub community_start: Cell,
    /// Number of communities (neighborhood groups) laid out for this unit.
    pub community_to_unit: u32,
}

impl DemographicData {
    /// Check internal consistency of the census inputs.
    pub fn validate(&self) -> EpiResult<()> {
        let age_total: u32 = self.age_counts.iter().sum();
        if age_total != self.unit_population {
            return Err(EpiError::CountMismatch {
                expected: self.unit_population as usize,
                got: age_total as usize,
                what: "age group counts",
            });
        }
        if self.daytime_workers > self.unit_population {
            return Err(EpiError::Config(format!(
                "unit has {} daytime workers but only {} residents",
                self.daytime_workers, self.unit_population
            )));
        }
        Ok(())
    }

    /// Households described by the histogram.
    pub fn num_households(&self) -> u32 {
        self.household_sizes.iter().sum()
    }

    /// Residents accounted for by the household histogram.
    pub fn household_population(&self) -> u32 {
        self.household_sizes
            .iter()
            .enumerate()
            .map(|(k, &n)| (k as u32 + 1) * n)
            .sum()
    }
}

/// Draw a school assignment for a school-age agent in the given home
/// neighborhood.
///
/// Returns the school encoding used by [`crate::AgentSpec::school`]:
/// elementary schools are numbered `3 + nborhood / 2` (two neighborhoods
/// share one), middle school is `2`, high school is `1`, and `0` means
/// school-age but unenrolled.  The split is 36% elementary, 32% middle,
/// 25% high, 7% unenrolled.
pub fn assign_school(nborhood: NborhoodId, rng: &mut SimRng) -> i32 {
    let draw = rng.gen_range(0u32..100);
    if draw < 36 {
        3 + (nborhood.0 / 2) as i32
    } else if draw < 68 {
        2
    } else if draw < 93 {
        1
    } else {
        0
    }
}
