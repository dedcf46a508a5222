//! Ambient neighborhood transmission.

use epi_agent::Tile;
use epi_core::{LocationMode, WorkgroupId};
use epi_disease::DiseaseParams;
use epi_spatial::{BinChoice, BinSet};

use crate::model::{apply_contact, names, transmitter_factor, InteractCtx, InteractionModel};

/// Low-rate background mixing among everyone sharing a neighborhood, on
/// whichever side of the day the population is on.
///
/// Pairs already covered by a closer-contact model are excluded: household
/// members in home mode, workgroup colleagues in work mode.
pub(crate) struct NborhoodInteraction;

impl InteractionModel for NborhoodInteraction {
    fn name(&self) -> &'static str {
        names::NBORHOOD
    }

    fn bin_choice(&self) -> BinChoice {
        BinChoice::Active
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
                if !tile.is_infectious(d, i) || tile.withdrawn[i] {
                    continue;
                }
                let base = transmitter_factor(tile, d, i, params);

                for &tj in slots {
                    let j = tj as usize;
                    if i == j || !tile.is_susceptible(d, j) || tile.withdrawn[j] {
                        continue;
                    }
                    let paired = match ctx.mode {
                        LocationMode::Home => {
                            tile.nborhood[i] == tile.nborhood[j]
                                && tile.family[i] != tile.family[j]
                        }
                        LocationMode::Work => {
                            // Only an actual shared workgroup excludes the
                            // pair; two non-workers both carry the invalid
                            // sentinel and still mix ambiently.
                            tile.work_nborhood[i] == tile.work_nborhood[j]
                                && (tile.workgroup[i] == WorkgroupId::INVALID
                                    || tile.workgroup[i] != tile.workgroup[j])
                        }
                    };
                    if !paired {
                        continue;
                    }
                    let age = tile.age_group[j].index();
                    apply_contact(tile, d, j, base * params.xmit_hood[age] * ctx.social_scale);
                }
            }
        }
    }
}
