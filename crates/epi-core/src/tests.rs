//! Unit tests for epi-core.

#[cfg(test)]
mod grid {
    use crate::{Cell, GridBox};

    #[test]
    fn box_dimensions() {
        let b = GridBox::new(Cell::new(2, 3), Cell::new(6, 5));
        assert_eq!(b.width(), 4);
        assert_eq!(b.height(), 2);
        assert_eq!(b.num_cells(), 8);
        assert!(!b.is_empty());
    }

    #[test]
    fn degenerate_box_is_empty() {
        assert!(GridBox::empty().is_empty());
        let inverted = GridBox::new(Cell::new(5, 5), Cell::new(3, 3));
        assert!(inverted.is_empty());
        assert_eq!(inverted.num_cells(), 0);
    }

    #[test]
    fn contains_and_clamp() {
        let b = GridBox::new(Cell::new(0, 0), Cell::new(4, 4));
        assert!(b.contains(Cell::new(0, 0)));
        assert!(b.contains(Cell::new(3, 3)));
        assert!(!b.contains(Cell::new(4, 0)));
        assert!(!b.contains(Cell::new(-1, 2)));
        assert_eq!(b.clamp(Cell::new(9, -3)), Cell::new(3, 0));
    }

    #[test]
    fn cell_index_row_major() {
        let b = GridBox::new(Cell::new(1, 1), Cell::new(4, 4)); // 3x3
        assert_eq!(b.cell_index(Cell::new(1, 1)), 0);
        assert_eq!(b.cell_index(Cell::new(3, 1)), 2);
        assert_eq!(b.cell_index(Cell::new(1, 2)), 3);
        assert_eq!(b.cell_index(Cell::new(3, 3)), 8);
    }

    #[test]
    fn union_covers_both() {
        let a = GridBox::new(Cell::new(0, 0), Cell::new(2, 2));
        let b = GridBox::new(Cell::new(4, 1), Cell::new(6, 5));
        let u = a.union(&b);
        assert_eq!(u, GridBox::new(Cell::new(0, 0), Cell::new(6, 5)));
        assert_eq!(a.union(&GridBox::empty()), a);
        assert_eq!(GridBox::empty().union(&b), b);
    }
}

#[cfg(test)]
mod ids {
    use crate::{AgentId, FamilyId, WorkgroupId};

    #[test]
    fn default_is_invalid() {
        assert_eq!(AgentId::default(), AgentId::INVALID);
    }

    #[test]
    fn family_cluster_groups_of_four() {
        assert_eq!(FamilyId(0).cluster(), 0);
        assert_eq!(FamilyId(3).cluster(), 0);
        assert_eq!(FamilyId(4).cluster(), 1);
        assert_eq!(WorkgroupId(7).cluster(), 1);
        assert_eq!(WorkgroupId(8).cluster(), 2);
    }
}

#[cfg(test)]
mod age_groups {
    use crate::AgeGroup;

    #[test]
    fn children_are_the_two_youngest() {
        assert!(AgeGroup::Under5.is_child());
        assert!(AgeGroup::Age5To17.is_child());
        assert!(!AgeGroup::Age18To29.is_child());
        assert!(!AgeGroup::Age65Plus.is_child());
    }

    #[test]
    fn index_matches_declaration_order() {
        for (i, g) in AgeGroup::ALL.iter().enumerate() {
            assert_eq!(g.index(), i);
        }
    }
}

#[cfg(test)]
mod survival_prob {
    use crate::SurvivalProb;

    #[test]
    fn fresh_accumulator_is_one() {
        let p = SurvivalProb::new();
        assert_eq!(p.get(), 1.0);
    }

    #[test]
    fn multiply_accumulates_product() {
        let p = SurvivalProb::new();
        p.multiply(0.5);
        p.multiply(0.5);
        assert_eq!(p.get(), 0.25);
    }

    #[test]
    fn product_of_unit_interval_factors_stays_in_unit_interval() {
        let p = SurvivalProb::new();
        for i in 0..1000 {
            p.multiply(1.0 - (i % 97) as f32 / 100.0);
            let v = p.get();
            assert!((0.0..=1.0).contains(&v), "accumulator left [0,1]: {v}");
        }
    }

    #[test]
    fn reset_restores_one() {
        let p = SurvivalProb::new();
        p.multiply(0.1);
        p.reset();
        assert_eq!(p.get(), 1.0);
    }

    #[test]
    fn concurrent_multiplies_commute() {
        use std::sync::Arc;
        let p = Arc::new(SurvivalProb::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let p = Arc::clone(&p);
                std::thread::spawn(move || {
                    for _ in 0..250 {
                        p.multiply(0.999);
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        let expected = 0.999_f32.powi(1000);
        assert!((p.get() - expected).abs() < 1e-3);
    }
}

#[cfg(test)]
mod task_rng {
    use crate::{TaskRng, Tick, TileId};

    #[test]
    fn identical_keys_replay_identically() {
        let mut a = TaskRng::new(42, Tick(3), TileId(1), 7, 0);
        let mut b = TaskRng::new(42, Tick(3), TileId(1), 7, 0);
        for _ in 0..16 {
            assert_eq!(a.random::<u64>(), b.random::<u64>());
        }
    }

    #[test]
    fn any_key_component_changes_the_stream() {
        let base: u64 = TaskRng::new(42, Tick(3), TileId(1), 7, 0).random();
        assert_ne!(base, TaskRng::new(43, Tick(3), TileId(1), 7, 0).random());
        assert_ne!(base, TaskRng::new(42, Tick(4), TileId(1), 7, 0).random());
        assert_ne!(base, TaskRng::new(42, Tick(3), TileId(2), 7, 0).random());
        assert_ne!(base, TaskRng::new(42, Tick(3), TileId(1), 8, 0).random());
        assert_ne!(base, TaskRng::new(42, Tick(3), TileId(1), 7, 1).random());
    }

    #[test]
    fn gen_bool_extremes() {
        let mut rng = TaskRng::new(0, Tick(0), TileId(0), 0, 0);
        assert!(rng.gen_bool(1.0));
        assert!(!rng.gen_bool(0.0));
        // Out-of-range probabilities are clamped, not panicking.
        assert!(rng.gen_bool(2.5));
    }
}
