//! Unit tests for epi-sim.

use epi_agent::{AgentSpec, Population, PopulationBuilder};
use epi_core::{AgeGroup, Cell, FamilyId, GridBox, NborhoodId, SimConfig};
use epi_disease::{DiseaseParams, Periods, Status, SymptomState};

fn params() -> DiseaseParams {
    let mut p = DiseaseParams {
        name: "test".to_string(),
        ..DiseaseParams::default()
    };
    p.initialize();
    p
}

/// One tile, one household of `n` adults in the same cell.
fn household(n: usize, p: DiseaseParams) -> Population {
    let mut b = PopulationBuilder::new(vec![p]);
    let tile = b.add_tile(GridBox::new(Cell::new(0, 0), Cell::new(4, 4)));
    for _ in 0..n {
        let spec = AgentSpec {
            age_group: AgeGroup::Age30To64,
            family: FamilyId(0),
            home: Cell::new(1, 1),
            work: Cell::new(1, 1),
            nborhood: NborhoodId(0),
            work_nborhood: NborhoodId(0),
            ..AgentSpec::default()
        };
        b.add_agent(tile, spec).unwrap();
    }
    b.build()
}

fn config(seed: u64, days: u64) -> SimConfig {
    SimConfig {
        days,
        seed,
        bin_cell_size: 1,
        social_scale: 1.0,
    }
}

#[cfg(test)]
mod updater {
    use epi_core::Tick;
    use epi_disease::{Periods, Status, SymptomState, WithdrawPolicy};

    use super::{household, params};
    use crate::update_status;

    fn full_compliance() -> WithdrawPolicy {
        WithdrawPolicy {
            symptomatic_withdraw: true,
            shelter_compliance: 1.0,
            symptomatic_withdraw_compliance: 1.0,
        }
    }

    #[test]
    fn infection_rate_matches_the_accumulator() {
        // With every survival product at 0.7, roughly 30% of agents should
        // convert.  4000 draws put five sigma at about 145.
        let mut pop = household(4000, params());
        for prob in &pop.tiles[0].diseases[0].prob {
            prob.set(0.7);
        }
        update_status(&mut pop, &full_compliance(), Tick(0), 123);
        let infected = pop.disease_counts(0).unwrap().infected();
        assert!(
            (1050..=1350).contains(&infected),
            "got {infected} infections from 4000 draws at p=0.3"
        );
    }

    #[test]
    fn unit_survival_never_infects() {
        let mut pop = household(100, params());
        update_status(&mut pop, &full_compliance(), Tick(0), 9);
        assert_eq!(pop.disease_counts(0).unwrap().never, 100);
    }

    #[test]
    fn symptom_development_triggers_withdrawal() {
        let mut pop = household(1, params());
        let periods = Periods {
            incubation: 5.0,
            infectious: 6.0,
            symptomdev: 4.0,
        };
        pop.tiles[0].infect(0, 0, 0, periods, SymptomState::Presymptomatic);
        pop.tiles[0].diseases[0].counter[0] = 3.0;

        update_status(&mut pop, &full_compliance(), Tick(0), 1);
        let state = &pop.tiles[0].diseases[0];
        assert_eq!(state.symptom[0], SymptomState::Symptomatic);
        assert!(pop.tiles[0].withdrawn[0]);
    }

    #[test]
    fn withdrawal_respects_the_policy_toggle() {
        let mut pop = household(1, params());
        let periods = Periods {
            incubation: 5.0,
            infectious: 6.0,
            symptomdev: 4.0,
        };
        pop.tiles[0].infect(0, 0, 0, periods, SymptomState::Presymptomatic);
        pop.tiles[0].diseases[0].counter[0] = 3.0;

        let policy = WithdrawPolicy {
            symptomatic_withdraw: false,
            ..full_compliance()
        };
        update_status(&mut pop, &policy, Tick(0), 1);
        assert_eq!(
            pop.tiles[0].diseases[0].symptom[0],
            SymptomState::Symptomatic
        );
        assert!(!pop.tiles[0].withdrawn[0]);
    }

    #[test]
    fn asymptomatic_agents_never_develop_symptoms() {
        let mut pop = household(1, params());
        let periods = Periods {
            incubation: 2.0,
            infectious: 3.0,
            symptomdev: 1.0,
        };
        pop.tiles[0].infect(0, 0, 0, periods, SymptomState::Asymptomatic);
        for day in 0..4 {
            update_status(&mut pop, &full_compliance(), Tick(day), 1);
        }
        assert_eq!(
            pop.tiles[0].diseases[0].symptom[0],
            SymptomState::Asymptomatic
        );
        assert!(!pop.tiles[0].withdrawn[0]);
    }

    #[test]
    fn recovery_and_immunity_round_trip_exactly() {
        let mut p = params();
        p.mean_immune_time = 3.0;
        p.immune_time_spread = 0.0;
        let mut pop = household(1, p);
        let periods = Periods {
            incubation: 5.0,
            infectious: 6.0,
            symptomdev: 4.0,
        };
        pop.tiles[0].infect(0, 0, 0, periods, SymptomState::Symptomatic);
        pop.tiles[0].diseases[0].counter[0] = 11.0;
        pop.tiles[0].withdrawn[0] = true;

        // Counter passes incubation + infectious: recover.
        update_status(&mut pop, &full_compliance(), Tick(0), 1);
        {
            let state = &pop.tiles[0].diseases[0];
            assert_eq!(state.status[0], Status::Immune);
            assert_eq!(state.counter[0], 3.0);
            assert_eq!(state.symptom[0], SymptomState::Presymptomatic);
            assert!(!pop.tiles[0].withdrawn[0], "recovery clears withdrawal");
        }

        // Exactly three more days of immunity, then susceptible again.
        for day in 1..=3 {
            update_status(&mut pop, &full_compliance(), Tick(day), 1);
        }
        assert_eq!(pop.tiles[0].diseases[0].status[0], Status::Susceptible);
        update_status(&mut pop, &full_compliance(), Tick(4), 1);
        assert_eq!(pop.tiles[0].diseases[0].status[0], Status::Susceptible);
    }

    #[test]
    fn reinfection_gate_blocks_post_immune_agents() {
        let mut pop = household(200, params());
        for slot in 0..200 {
            pop.tiles[0].diseases[0].status[slot] = Status::Susceptible;
            pop.tiles[0].diseases[0].prob[slot].set(0.0);
        }
        // Default reinfect_prob is zero: certain exposure, no infections.
        update_status(&mut pop, &full_compliance(), Tick(0), 5);
        assert_eq!(pop.disease_counts(0).unwrap().infected(), 0);

        let mut open = params();
        open.reinfect_prob = 1.0;
        let mut pop = household(200, open);
        for slot in 0..200 {
            pop.tiles[0].diseases[0].status[slot] = Status::Susceptible;
            pop.tiles[0].diseases[0].prob[slot].set(0.0);
        }
        update_status(&mut pop, &full_compliance(), Tick(0), 5);
        assert_eq!(pop.disease_counts(0).unwrap().infected(), 200);
    }

    #[test]
    fn dead_is_absorbing() {
        let mut pop = household(1, params());
        pop.tiles[0].diseases[0].status[0] = Status::Dead;
        pop.tiles[0].diseases[0].prob[0].set(0.0);
        for day in 0..10 {
            update_status(&mut pop, &full_compliance(), Tick(day), 1);
        }
        assert_eq!(pop.tiles[0].diseases[0].status[0], Status::Dead);
    }
}

#[cfg(test)]
mod builder {
    use epi_core::LocationMode;

    use super::{config, household, params};
    use crate::sim::DayPhase;
    use crate::SimBuilder;

    #[test]
    fn unknown_phase_model_fails_at_build() {
        let b = SimBuilder::new(config(1, 10), household(2, params())).phases(vec![
            DayPhase::new(LocationMode::Home, &["home", "teleport"]),
        ]);
        assert!(b.build().is_err());
    }

    #[test]
    fn zero_bin_size_fails_at_build() {
        let mut cfg = config(1, 10);
        cfg.bin_cell_size = 0;
        assert!(SimBuilder::new(cfg, household(2, params())).build().is_err());
    }

    #[test]
    fn defaults_build_cleanly() {
        let sim = SimBuilder::new(config(1, 10), household(2, params()))
            .build()
            .unwrap();
        assert_eq!(sim.current_day().0, 0);
        assert_eq!(sim.population().agent_count(), 2);
    }
}

#[cfg(test)]
mod day_loop {
    use epi_agent::DiseaseCounts;
    use epi_core::Tick;

    use super::{config, household, params, Periods, Status, SymptomState};
    use crate::{EpiObserver, SimBuilder};

    #[test]
    fn stale_accumulators_are_reset_before_interactions() {
        let mut sim = SimBuilder::new(config(1, 1), household(10, params()))
            .build()
            .unwrap();
        for prob in &sim.population().tiles[0].diseases[0].prob {
            prob.set(0.0);
        }
        let counts = sim.step_day().unwrap();
        assert_eq!(counts[0].never, 10, "pre-day accumulator state must not leak");
        assert_eq!(sim.current_day(), Tick(1));
    }

    #[test]
    fn household_epidemic_progresses_and_conserves_agents() {
        let mut sim = SimBuilder::new(config(7, 60), household(5, params()))
            .build()
            .unwrap();
        assert_eq!(sim.seed_infections(0, 0, 1).unwrap(), 1);

        struct Totals(Vec<u64>);
        impl EpiObserver for Totals {
            fn on_day_end(&mut self, _day: Tick, counts: &[DiseaseCounts]) {
                self.0.push(counts[0].total);
            }
        }
        let mut totals = Totals(Vec::new());
        sim.run(&mut totals).unwrap();

        assert_eq!(totals.0.len(), 60);
        assert!(totals.0.iter().all(|&t| t == 5));
        let end = sim.counts().unwrap();
        assert!(end[0].immune >= 1, "the seeded case recovers within 60 days");
        assert!(end[0].never < 5);
    }

    #[test]
    fn same_seed_reproduces_the_run() {
        let run = |seed: u64| {
            let mut sim = SimBuilder::new(config(seed, 20), household(6, params()))
                .build()
                .unwrap();
            sim.seed_infections(0, 0, 1).unwrap();
            let mut days = Vec::new();
            for _ in 0..20 {
                days.push(sim.step_day().unwrap());
            }
            days
        };
        assert_eq!(run(99), run(99));
    }

    #[test]
    fn observer_sees_every_day_in_order() {
        #[derive(Default)]
        struct Recorder {
            started: Vec<u64>,
            ended: Vec<u64>,
            finished: bool,
        }
        impl EpiObserver for Recorder {
            fn on_day_start(&mut self, day: Tick) {
                self.started.push(day.0);
            }
            fn on_day_end(&mut self, day: Tick, _counts: &[DiseaseCounts]) {
                self.ended.push(day.0);
            }
            fn on_sim_end(&mut self) {
                self.finished = true;
            }
        }

        let mut sim = SimBuilder::new(config(1, 0), household(2, params()))
            .build()
            .unwrap();
        let mut rec = Recorder::default();
        sim.run_days(3, &mut rec).unwrap();
        assert_eq!(rec.started, vec![0, 1, 2]);
        assert_eq!(rec.ended, vec![0, 1, 2]);
        assert!(rec.finished);
    }

    #[test]
    fn infection_spreads_through_the_household() {
        // A symptomatic infectious adult in a 4-person household at 40%
        // daily transmission per pair: after 8 infectious days the chance a
        // given housemate is still uninfected is under 2%.
        let mut sim = SimBuilder::new(config(3, 8), household(4, params()))
            .build()
            .unwrap();
        let periods = Periods {
            incubation: 1.0,
            infectious: 30.0,
            symptomdev: 40.0,
        };
        sim.population_mut().tiles[0].infect(0, 0, 0, periods, SymptomState::Presymptomatic);
        sim.population_mut().tiles[0].diseases[0].counter[0] = 1.0;

        for _ in 0..8 {
            sim.step_day().unwrap();
        }
        let state = &sim.population().tiles[0].diseases[0];
        let newly_infected = (1..4)
            .filter(|&slot| state.status[slot] == Status::Infected)
            .count();
        assert!(newly_infected >= 1, "no spread in 8 days is a regression");
    }
}
