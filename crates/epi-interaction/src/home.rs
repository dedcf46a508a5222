//! Household and neighborhood-cluster transmission.

use epi_agent::Tile;
use epi_core::NUM_AGE_GROUPS;
use epi_disease::DiseaseParams;
use epi_spatial::{BinChoice, BinSet};

use crate::model::{apply_contact, names, transmitter_factor, InteractCtx, InteractionModel};

/// Contact within households, plus the weaker mixing across a household's
/// neighborhood cluster (four consecutive families).
///
/// Rate-table selection follows the *transmitter*: child vs adult rates,
/// with the boosted `_sc` variants for agents with no school tie (they
/// spend the whole day at home).  The table is then indexed by the
/// *susceptible* agent's age group.  Household contact happens regardless of
/// withdrawal; cluster contact requires both agents out and about.
pub(crate) struct HomeInteraction;

impl InteractionModel for HomeInteraction {
    fn name(&self) -> &'static str {
        names::HOME
    }

    fn bin_choice(&self) -> BinChoice {
        BinChoice::Home
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
                if !tile.is_infectious(d, i) {
                    continue;
                }
                let base = transmitter_factor(tile, d, i, params);
                let family = family_table(tile, i, params);
                let cluster = cluster_table(tile, i, params);

                for &tj in slots {
                    let j = tj as usize;
                    if i == j || !tile.is_susceptible(d, j) {
                        continue;
                    }
                    if tile.nborhood[i] != tile.nborhood[j] {
                        continue;
                    }
                    let age = tile.age_group[j].index();
                    if tile.family[i] == tile.family[j] {
                        apply_contact(tile, d, j, base * family[age]);
                    } else if !tile.withdrawn[i]
                        && !tile.withdrawn[j]
                        && tile.family[i].cluster() == tile.family[j].cluster()
                    {
                        apply_contact(tile, d, j, base * cluster[age] * ctx.social_scale);
                    }
                }
            }
        }
    }
}

/// Within-family rate table for transmitter `i`.
fn family_table<'a>(
    tile: &Tile,
    i: usize,
    params: &'a DiseaseParams,
) -> &'a [f32; NUM_AGE_GROUPS] {
    match (tile.age_group[i].is_child(), tile.school[i] < 0) {
        (true, false) => &params.xmit_child,
        (true, true) => &params.xmit_child_sc,
        (false, false) => &params.xmit_adult,
        (false, true) => &params.xmit_adult_sc,
    }
}

/// Neighborhood-cluster rate table for transmitter `i`.
fn cluster_table<'a>(
    tile: &Tile,
    i: usize,
    params: &'a DiseaseParams,
) -> &'a [f32; NUM_AGE_GROUPS] {
    match (tile.age_group[i].is_child(), tile.school[i] < 0) {
        (true, false) => &params.xmit_nc_child,
        (true, true) => &params.xmit_nc_child_sc,
        (false, false) => &params.xmit_nc_adult,
        (false, true) => &params.xmit_nc_adult_sc,
    }
}
