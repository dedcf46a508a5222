//! Classroom transmission.

use epi_agent::Tile;
use epi_disease::DiseaseParams;
use epi_spatial::{BinChoice, BinSet};

use crate::model::{apply_contact, names, transmitter_factor, InteractCtx, InteractionModel};

/// Contact among students of the same school.
///
/// Only positive school codes attend (zero is school-age but unenrolled,
/// negative is no school tie); schools are scoped to the home neighborhood.
/// Runs over work-side bins, since school is where students spend the work
/// phase of the day.
pub(crate) struct SchoolInteraction;

impl InteractionModel for SchoolInteraction {
    fn name(&self) -> &'static str {
        names::SCHOOL
    }

    fn bin_choice(&self) -> BinChoice {
        BinChoice::Work
    }

    fn interact_tile(
        &self,
        tile: &mut Tile,
        bins: &BinSet,
        params: &DiseaseParams,
        ctx: &InteractCtx,
    ) {
        let d = ctx.disease;
        for (_, slots) in bins.iter_bins() {
            for &ti in slots {
                let i = ti as usize;
                if tile.school[i] <= 0 || tile.withdrawn[i] || !tile.is_infectious(d, i) {
                    continue;
                }
                let base = transmitter_factor(tile, d, i, params);

                for &tj in slots {
                    let j = tj as usize;
                    if i == j
                        || tile.school[j] != tile.school[i]
                        || tile.withdrawn[j]
                        || tile.nborhood[i] != tile.nborhood[j]
                        || !tile.is_susceptible(d, j)
                    {
                        continue;
                    }
                    let age = tile.age_group[j].index();
                    apply_contact(tile, d, j, base * params.xmit_school[age]);
                }
            }
        }
    }
}
