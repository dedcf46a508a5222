//! Density-driven, bin-wide force of infection.

use epi_agent::Tile;
use epi_core::TaskRng;
use epi_disease::{DiseaseParams, Status, MAX_STRAINS};
use epi_spatial::{BinChoice, BinSet};

use crate::model::{names, InteractCtx, InteractionModel};

/// Per-infectious-agent attack rate, by strain.
const ATTACK_RATE: [f32; MAX_STRAINS] = [1.0e-4, 2.0e-4];

/// Well-mixed transmission within each spatial bin, proportional to the
/// bin's infected head count per strain.  Every currently infected agent
/// contributes, incubating or not.
///
/// Unlike the contact models this one mutates status directly: each
/// susceptible agent draws once against the bin's pre-pass infected
/// counts.  Counts are taken per bin before its draws, and bins partition
/// the tile's slots, so in-pass infections never feed back into the same
/// day's counts.
pub(crate) struct GenericInteraction;

impl InteractionModel for GenericInteraction {
    fn name(&self) -> &'static str {
        names::GENERIC
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
        for (bin, slots) in bins.iter_bins() {
            let mut infected = [0u32; MAX_STRAINS];
            for &t in slots {
                let i = t as usize;
                if tile.diseases[d].status[i] == Status::Infected {
                    let s = (tile.diseases[d].strain[i] as usize).min(MAX_STRAINS - 1);
                    infected[s] += 1;
                }
            }
            if infected.iter().all(|&n| n == 0) {
                continue;
            }
            let p0 = infected[0] as f32 * ATTACK_RATE[0];
            let p1 = infected[1] as f32 * ATTACK_RATE[1];

            let mut rng = TaskRng::new(ctx.seed, ctx.day, ctx.tile, bin as u32, d);
            for &t in slots {
                let j = t as usize;
                if !tile.is_susceptible(d, j) {
                    continue;
                }
                // Post-immune agents pass a reinfection gate first.
                if tile.diseases[d].status[j] == Status::Susceptible
                    && rng.random::<f32>() >= params.reinfect_prob
                {
                    continue;
                }
                let r = rng.random::<f32>();
                let strain = if r < p0 {
                    0u8
                } else if r < p0 + p1 {
                    1u8
                } else {
                    continue;
                };
                let periods = params.draw_periods(&mut rng);
                let symptom = params.draw_symptom_state(strain, &mut rng);
                tile.infect(d, j, strain, periods, symptom);
            }
        }
    }
}
