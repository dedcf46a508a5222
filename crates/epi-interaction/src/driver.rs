//! Runs one interaction model over the whole population.

use epi_agent::{Population, Tile};
use epi_core::{Tick, TileId};
use epi_spatial::{BinCache, BinSet};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::model::{InteractCtx, InteractionModel};

/// Run `model` once over every tile and disease.
///
/// Bins are built (or reused) for the model's bin choice under the
/// population's current location mode.  Each tile is processed by exactly
/// one worker; with the `parallel` feature tiles run on the rayon pool,
/// otherwise sequentially.  Diseases are processed one after another within
/// a tile.
pub fn run_interaction(
    model: &dyn InteractionModel,
    pop: &mut Population,
    cache: &mut BinCache,
    day: Tick,
    seed: u64,
    social_scale: f32,
) {
    let mode = pop.mode;
    cache.ensure(&pop.tiles, model.bin_choice(), mode);
    let sets = cache.bins(model.bin_choice(), mode);

    let tiles = &mut pop.tiles;
    let params = &pop.params;
    log::debug!(
        "interaction model={} day={} tiles={}",
        model.name(),
        day.0,
        tiles.len()
    );

    let per_tile = |(t, (tile, set)): (usize, (&mut Tile, &BinSet))| {
        for (d, p) in params.iter().enumerate() {
            let ctx = InteractCtx {
                day,
                seed,
                tile: TileId(t as u32),
                disease: d,
                mode,
                social_scale,
            };
            model.interact_tile(tile, set, p, &ctx);
        }
    };

    #[cfg(feature = "parallel")]
    tiles
        .par_iter_mut()
        .zip(sets.par_iter())
        .enumerate()
        .for_each(per_tile);

    #[cfg(not(feature = "parallel"))]
    tiles.iter_mut().zip(sets.iter()).enumerate().for_each(per_tile);
}
