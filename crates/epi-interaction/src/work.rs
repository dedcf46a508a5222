//! Workplace transmission: workgroups and work clusters.

use epi_agent::Tile;
use epi_core::WorkgroupId;
use epi_disease::DiseaseParams;
use epi_spatial::{BinChoice, BinSet};

use crate::model::{apply_contact, names, transmitter_factor, InteractCtx, InteractionModel};

/// Contact among coworkers, binned by work cell.
///
/// Agents sharing a work neighborhood and workgroup mix at the adult family
/// rates scaled by the workplace contact probability; agents sharing only a
/// work cluster (four consecutive workgroups) mix at the weaker cluster
/// rates.  Withdrawn agents are absent from the workplace entirely.
pub(crate) struct WorkInteraction;

impl InteractionModel for WorkInteraction {
    fn name(&self) -> &'static str {
        names::WORK
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
                if !tile.is_infectious(d, i)
                    || tile.withdrawn[i]
                    || tile.workgroup[i] == WorkgroupId::INVALID
                {
                    continue;
                }
                let base = transmitter_factor(tile, d, i, params);

                for &tj in slots {
                    let j = tj as usize;
                    if i == j
                        || !tile.is_susceptible(d, j)
                        || tile.withdrawn[j]
                        || tile.workgroup[j] == WorkgroupId::INVALID
                        || tile.work_nborhood[i] != tile.work_nborhood[j]
                    {
                        continue;
                    }
                    let age = tile.age_group[j].index();
                    if tile.workgroup[i] == tile.workgroup[j] {
                        apply_contact(tile, d, j, base * params.xmit_adult[age] * params.p_wo);
                    } else if tile.workgroup[i].cluster() == tile.workgroup[j].cluster() {
                        apply_contact(
                            tile,
                            d,
                            j,
                            base * params.xmit_nc_adult[age] * ctx.social_scale,
                        );
                    }
                }
            }
        }
    }
}
