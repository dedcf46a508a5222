//! Tiled SoA population storage.
//!
//! Agents never move between tiles and tiles never share mutable state, so a
//! parallel pass can hand each worker one `&mut Tile` without locking.  The
//! only cross-task write path is the per-agent [`SurvivalProb`] accumulator,
//! which is atomic.
//!
//! Per-disease state is a parallel SoA block ([`DiseaseState`]) so a kernel
//! touching disease *d* stays within one contiguous set of arrays.

use epi_core::{
    AgeGroup, Cell, EpiError, EpiResult, FamilyId, GridBox, LocationMode, NborhoodId, SimRng,
    SurvivalProb, TaskRng, Tick, TileId, WorkgroupId,
};
use epi_disease::{DiseaseParams, Periods, Status, SymptomState, WithdrawPolicy};

use crate::counts::{CellField, DiseaseCounts};

// ── DiseaseState ─────────────────────────────────────────────────────────────

/// One disease's per-agent arrays within a tile.  All vectors share the
/// tile's agent count.
#[derive(Clone, Debug, Default)]
pub struct DiseaseState {
    pub status: Vec<Status>,
    /// Infecting strain index; meaningful only while `status != Never`.
    pub strain: Vec<u8>,
    pub symptom: Vec<SymptomState>,
    /// Days since infection while `Infected`; days of immunity left while
    /// `Immune`.
    pub counter: Vec<f32>,
    pub incubation: Vec<f32>,
    pub infectious: Vec<f32>,
    pub symptomdev: Vec<f32>,
    /// Running survival product for the current day's interaction phases.
    pub prob: Vec<SurvivalProb>,
}

impl DiseaseState {
    /// Append one agent's slot, initialized as never-infected with the
    /// disease's mean progression timers.
    fn push_slot(&mut self, params: &DiseaseParams) {
        self.status.push(Status::Never);
        self.strain.push(0);
        self.symptom.push(SymptomState::Presymptomatic);
        self.counter.push(0.0);
        self.incubation.push(params.incubation_length_mean);
        self.infectious.push(params.infectious_length_mean);
        self.symptomdev.push(params.symptomdev_length_mean);
        self.prob.push(SurvivalProb::new());
    }
}

// ── AgentSpec ────────────────────────────────────────────────────────────────

/// Everything needed to place one agent (see [`crate::PopulationBuilder`]).
#[derive(Copy, Clone, Debug, Default)]
pub struct AgentSpec {
    pub age_group: AgeGroup,
    pub family: FamilyId,
    pub home: Cell,
    pub work: Cell,
    pub nborhood: NborhoodId,
    pub work_nborhood: NborhoodId,
    /// School tie: `> 0` identifies the attended school within the
    /// neighborhood, `0` is school-age but unenrolled, negative means no
    /// school tie at all (the agent spends the day at home).
    pub school: i32,
    pub workgroup: WorkgroupId,
}

// ── Tile ─────────────────────────────────────────────────────────────────────

/// One rectangular tile's agents, stored column-wise.
///
/// The agent's identity is its slot index; every `Vec` here is indexed by it.
#[derive(Clone, Debug)]
pub struct Tile {
    /// Grid region this tile owns.  Home cells of resident agents fall
    /// inside it; work cells may not.
    pub bounds: GridBox,

    pub age_group: Vec<AgeGroup>,
    pub family: Vec<FamilyId>,
    pub home: Vec<Cell>,
    pub work: Vec<Cell>,
    pub nborhood: Vec<NborhoodId>,
    pub work_nborhood: Vec<NborhoodId>,
    /// See [`AgentSpec::school`] for the encoding.
    pub school: Vec<i32>,
    pub workgroup: Vec<WorkgroupId>,
    /// Withdrawn agents skip cluster, workgroup and ambient contacts.
    pub withdrawn: Vec<bool>,

    /// One SoA block per tracked disease, all of equal length.
    pub diseases: Vec<DiseaseState>,
}

impl Tile {
    pub fn new(bounds: GridBox, num_diseases: usize) -> Self {
        Self {
            bounds,
            age_group: Vec::new(),
            family: Vec::new(),
            home: Vec::new(),
            work: Vec::new(),
            nborhood: Vec::new(),
            work_nborhood: Vec::new(),
            school: Vec::new(),
            workgroup: Vec::new(),
            withdrawn: Vec::new(),
            diseases: vec![DiseaseState::default(); num_diseases],
        }
    }

    /// Number of agents resident in this tile.
    #[inline]
    pub fn count(&self) -> usize {
        self.age_group.len()
    }

    pub(crate) fn push_agent(&mut self, spec: &AgentSpec, params: &[DiseaseParams]) -> u32 {
        let slot = self.count() as u32;
        self.age_group.push(spec.age_group);
        self.family.push(spec.family);
        self.home.push(spec.home);
        self.work.push(spec.work);
        self.nborhood.push(spec.nborhood);
        self.work_nborhood.push(spec.work_nborhood);
        self.school.push(spec.school);
        self.workgroup.push(spec.workgroup);
        self.withdrawn.push(false);
        for (state, p) in self.diseases.iter_mut().zip(params) {
            state.push_slot(p);
        }
        slot
    }

    /// The agent's active grid cell under the given location mode.
    #[inline]
    pub fn location(&self, slot: usize, mode: LocationMode) -> Cell {
        match mode {
            LocationMode::Home => self.home[slot],
            LocationMode::Work => self.work[slot],
        }
    }

    /// Infectious for disease `d`: infected and past incubation.
    #[inline]
    pub fn is_infectious(&self, d: usize, slot: usize) -> bool {
        let state = &self.diseases[d];
        state.status[slot] == Status::Infected && state.counter[slot] >= state.incubation[slot]
    }

    /// Can the agent acquire disease `d` at all (never-infected or
    /// post-immune susceptible)?
    #[inline]
    pub fn is_susceptible(&self, d: usize, slot: usize) -> bool {
        self.diseases[d].status[slot].is_susceptible()
    }

    /// Reset every survival accumulator for disease `d` to 1.0.
    pub fn reset_probs(&self, d: usize) {
        for prob in &self.diseases[d].prob {
            prob.reset();
        }
    }

    /// Mark one agent newly infected with disease `d`.
    pub fn infect(
        &mut self,
        d: usize,
        slot: usize,
        strain: u8,
        periods: Periods,
        symptom: SymptomState,
    ) {
        let state = &mut self.diseases[d];
        state.status[slot] = Status::Infected;
        state.strain[slot] = strain;
        state.symptom[slot] = symptom;
        state.counter[slot] = 0.0;
        state.incubation[slot] = periods.incubation;
        state.infectious[slot] = periods.infectious;
        state.symptomdev[slot] = periods.symptomdev;
    }
}

// ── Population ───────────────────────────────────────────────────────────────

/// The whole simulated population plus its disease parameter tables.
#[derive(Clone, Debug)]
pub struct Population {
    pub tiles: Vec<Tile>,
    /// One finalized parameter table per tracked disease; read-only after
    /// construction.
    pub params: Vec<DiseaseParams>,
    /// Location mode the current day phase has put agents in.
    pub mode: LocationMode,
}

impl Population {
    /// Number of tracked diseases.
    #[inline]
    pub fn num_diseases(&self) -> usize {
        self.params.len()
    }

    /// Parameter table for disease `d`.
    pub fn disease_params(&self, d: usize) -> EpiResult<&DiseaseParams> {
        self.params.get(d).ok_or(EpiError::DiseaseIndexOutOfRange {
            index: d,
            count: self.params.len(),
        })
    }

    /// Total agents across all tiles.
    pub fn agent_count(&self) -> usize {
        self.tiles.iter().map(Tile::count).sum()
    }

    pub fn set_mode(&mut self, mode: LocationMode) {
        self.mode = mode;
    }

    /// Reset every survival accumulator of every disease to 1.0.
    pub fn reset_probs(&self) {
        for tile in &self.tiles {
            for d in 0..tile.diseases.len() {
                tile.reset_probs(d);
            }
        }
    }

    /// Aggregate status counts for disease `d` over the whole population.
    pub fn disease_counts(&self, d: usize) -> EpiResult<DiseaseCounts> {
        self.disease_params(d)?;
        let mut counts = DiseaseCounts::default();
        for tile in &self.tiles {
            let state = &tile.diseases[d];
            for slot in 0..tile.count() {
                counts.total += 1;
                if tile.withdrawn[slot] {
                    counts.withdrawn += 1;
                }
                match state.status[slot] {
                    Status::Never => counts.never += 1,
                    Status::Susceptible => counts.susceptible += 1,
                    Status::Immune => counts.immune += 1,
                    Status::Dead => counts.dead += 1,
                    Status::Infected => {
                        if state.counter[slot] < state.incubation[slot] {
                            counts.exposed += 1;
                        } else {
                            counts.infectious += 1;
                        }
                        if state.symptom[slot] == SymptomState::Symptomatic {
                            counts.symptomatic += 1;
                        }
                    }
                }
            }
        }
        Ok(counts)
    }

    /// Per-cell occupancy and infection summary over the union of all tile
    /// boxes, keyed by home cell.
    pub fn cell_data(&self) -> CellField {
        let bounds = self
            .tiles
            .iter()
            .fold(GridBox::empty(), |acc, t| acc.union(&t.bounds));
        let mut field = CellField::new(bounds, self.num_diseases());
        for tile in &self.tiles {
            for slot in 0..tile.count() {
                let cell = tile.home[slot];
                field.add_occupant(cell);
                for (d, state) in tile.diseases.iter().enumerate() {
                    if state.status[slot] == Status::Infected {
                        field.add_infected(d, cell);
                    }
                }
            }
        }
        field
    }

    /// Infect up to `count` randomly chosen susceptible agents with the given
    /// strain of disease `d`.  Returns the number actually infected (fewer if
    /// the population runs out of susceptible candidates).
    pub fn seed_infections(
        &mut self,
        d: usize,
        strain: usize,
        count: u32,
        rng: &mut SimRng,
    ) -> EpiResult<u32> {
        let params = self.disease_params(d)?.clone();
        if strain >= params.nstrain {
            return Err(EpiError::StrainOutOfRange {
                index: strain,
                nstrain: params.nstrain,
            });
        }
        let total = self.agent_count();
        if total == 0 {
            return Ok(0);
        }

        let mut seeded = 0;
        let mut attempts = 0u32;
        // Rejection sampling over the flat agent index; bail out once the
        // susceptible pool is plausibly exhausted.
        while seeded < count && attempts < count.saturating_mul(100).max(1000) {
            attempts += 1;
            let mut pick = rng.gen_range(0..total);
            let (tile_idx, slot) = {
                let mut t = 0;
                while pick >= self.tiles[t].count() {
                    pick -= self.tiles[t].count();
                    t += 1;
                }
                (t, pick)
            };
            let tile = &mut self.tiles[tile_idx];
            if !tile.is_susceptible(d, slot) {
                continue;
            }
            let mut task = TaskRng::new(
                rng.random::<u64>(),
                Tick(0),
                TileId(tile_idx as u32),
                slot as u32,
                d,
            );
            let periods = params.draw_periods(&mut task);
            let symptom = params.draw_symptom_state(strain as u8, &mut task);
            tile.infect(d, slot, strain as u8, periods, symptom);
            seeded += 1;
        }
        Ok(seeded)
    }

    /// Start a shelter-in-place order: each agent withdraws with the given
    /// compliance probability.  Agents already withdrawn stay withdrawn.
    pub fn shelter_start(&mut self, compliance: f32, rng: &mut SimRng) {
        for tile in &mut self.tiles {
            for flag in &mut tile.withdrawn {
                *flag |= rng.gen_bool(compliance as f64);
            }
        }
    }

    /// End a shelter-in-place order.  Withdrawal flags are cleared, except
    /// that currently symptomatic agents re-withdraw per policy.
    pub fn shelter_stop(&mut self, policy: &WithdrawPolicy, rng: &mut SimRng) {
        for tile in &mut self.tiles {
            for slot in 0..tile.count() {
                let symptomatic = tile.diseases.iter().any(|state| {
                    state.status[slot] == Status::Infected
                        && state.symptom[slot] == SymptomState::Symptomatic
                });
                tile.withdrawn[slot] = symptomatic
                    && policy.symptomatic_withdraw
                    && rng.gen_bool(policy.symptomatic_withdraw_compliance as f64);
            }
        }
    }
}
