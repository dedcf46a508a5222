//! Fluent population construction.
//!
//! Tiles are declared first, then agents are pushed into them; `build`
//! freezes the layout into a [`Population`].  The builder owns validation
//! that per-call code would otherwise repeat (tile IDs in range, home cells
//! inside the tile box).

use epi_core::{EpiError, EpiResult, GridBox, LocationMode, TileId};
use epi_disease::DiseaseParams;

use crate::store::{AgentSpec, Population, Tile};

pub struct PopulationBuilder {
    params: Vec<DiseaseParams>,
    tiles: Vec<Tile>,
}

impl PopulationBuilder {
    /// Start a builder over the given finalized disease parameter tables.
    pub fn new(params: Vec<DiseaseParams>) -> Self {
        Self {
            params,
            tiles: Vec::new(),
        }
    }

    /// Declare a tile owning the given grid box.  Boxes may be degenerate
    /// (an empty tile is legal) and are not required to be disjoint.
    pub fn add_tile(&mut self, bounds: GridBox) -> TileId {
        let id = TileId(self.tiles.len() as u32);
        self.tiles.push(Tile::new(bounds, self.params.len()));
        id
    }

    /// Place one agent in a tile.  The agent's home cell must fall inside
    /// the tile's box; the work cell is unconstrained.
    ///
    /// Returns the agent's slot within the tile.
    pub fn add_agent(&mut self, tile: TileId, spec: AgentSpec) -> EpiResult<u32> {
        let Some(t) = self.tiles.get_mut(tile.index()) else {
            return Err(EpiError::Config(format!(
                "agent placed in undeclared tile {tile}"
            )));
        };
        if !t.bounds.contains(spec.home) {
            return Err(EpiError::Config(format!(
                "agent home cell {} outside tile {tile} box {:?}",
                spec.home, t.bounds
            )));
        }
        Ok(t.push_agent(&spec, &self.params))
    }

    /// Freeze into a population, starting in `Home` mode with every agent
    /// never-infected.
    pub fn build(self) -> Population {
        Population {
            tiles: self.tiles,
            params: self.params,
            mode: LocationMode::Home,
        }
    }
}
