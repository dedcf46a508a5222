//! Once-per-day disease state advancement.

use epi_agent::{Population, Tile};
use epi_core::{TaskRng, Tick, TileId};
use epi_disease::{DiseaseParams, Status, SymptomState, WithdrawPolicy};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Advance every agent's state for every disease by one day.
///
/// Runs after all interaction phases: consumes the day's survival
/// accumulators to decide new infections, ages existing infections, applies
/// recovery and immunity countdown, and flips symptom state (with the
/// withdrawal policy applied to the newly symptomatic).
///
/// Each (agent, disease) draws from its own counter-keyed RNG, so the
/// outcome is independent of tile scheduling.
pub fn update_status(pop: &mut Population, policy: &WithdrawPolicy, day: Tick, seed: u64) {
    let tiles = &mut pop.tiles;
    let params = &pop.params;

    let per_tile = |(t, tile): (usize, &mut Tile)| {
        for (d, p) in params.iter().enumerate() {
            update_tile(tile, TileId(t as u32), d, p, policy, day, seed);
        }
    };

    #[cfg(feature = "parallel")]
    tiles.par_iter_mut().enumerate().for_each(per_tile);

    #[cfg(not(feature = "parallel"))]
    tiles.iter_mut().enumerate().for_each(per_tile);
}

fn update_tile(
    tile: &mut Tile,
    tile_id: TileId,
    d: usize,
    params: &DiseaseParams,
    policy: &WithdrawPolicy,
    day: Tick,
    seed: u64,
) {
    for slot in 0..tile.count() {
        let mut rng = TaskRng::new(seed, day, tile_id, slot as u32, d);
        let state = &mut tile.diseases[d];
        match state.status[slot] {
            Status::Never | Status::Susceptible => {
                let survival = state.prob[slot].get();
                if survival >= 1.0 {
                    continue;
                }
                if state.status[slot] == Status::Susceptible
                    && rng.random::<f32>() >= params.reinfect_prob
                {
                    continue;
                }
                if rng.random::<f32>() > survival {
                    let strain = params.draw_strain(&mut rng);
                    let periods = params.draw_periods(&mut rng);
                    let symptom = params.draw_symptom_state(strain, &mut rng);
                    tile.infect(d, slot, strain, periods, symptom);
                }
            }
            Status::Infected => {
                state.counter[slot] += 1.0;
                let course = state.incubation[slot] + state.infectious[slot];
                if state.counter[slot] > course {
                    state.status[slot] = Status::Immune;
                    state.counter[slot] = params.draw_immune_time(&mut rng);
                    state.symptom[slot] = SymptomState::Presymptomatic;
                    tile.withdrawn[slot] = false;
                } else if state.symptom[slot] == SymptomState::Presymptomatic
                    && state.counter[slot] >= state.symptomdev[slot]
                {
                    state.symptom[slot] = SymptomState::Symptomatic;
                    if policy.symptomatic_withdraw
                        && rng.gen_bool(policy.symptomatic_withdraw_compliance as f64)
                    {
                        tile.withdrawn[slot] = true;
                    }
                }
            }
            Status::Immune => {
                state.counter[slot] -= 1.0;
                if state.counter[slot] <= 0.0 {
                    state.status[slot] = Status::Susceptible;
                    state.counter[slot] = 0.0;
                }
            }
            Status::Dead => {}
        }
    }
}
