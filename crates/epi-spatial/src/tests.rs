//! Unit tests for epi-spatial.

#[cfg(test)]
mod bins {
    use epi_core::{Cell, GridBox};

    use crate::BinSet;

    fn ten_by_ten() -> GridBox {
        GridBox::new(Cell::new(0, 0), Cell::new(10, 10))
    }

    #[test]
    fn every_slot_appears_exactly_once() {
        let cells: Vec<Cell> = (0..37).map(|i| Cell::new(i % 10, (i * 7) % 10)).collect();
        let set = BinSet::build(ten_by_ten(), 3, &cells);
        assert_eq!(set.num_items(), 37);

        let mut seen = vec![false; 37];
        for bin in 0..set.num_bins() {
            for &slot in set.agents_in(bin) {
                assert!(!seen[slot as usize], "slot {slot} binned twice");
                seen[slot as usize] = true;
            }
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn agents_land_in_the_bin_of_their_cell() {
        let cells = vec![Cell::new(0, 0), Cell::new(9, 9), Cell::new(4, 4)];
        let set = BinSet::build(ten_by_ten(), 5, &cells);
        assert_eq!(set.num_bins(), 4);
        assert_eq!(set.agents_in(set.bin_for(Cell::new(0, 0))), &[0]);
        assert_eq!(set.agents_in(set.bin_for(Cell::new(9, 9))), &[1]);
        assert_eq!(set.agents_in(set.bin_for(Cell::new(4, 4))), &[2]);
    }

    #[test]
    fn bin_width_not_dividing_the_box_still_covers_it() {
        // 10 cells with bin size 3 -> 4 bins per axis.
        let set = BinSet::build(ten_by_ten(), 3, &[Cell::new(9, 9)]);
        assert_eq!(set.num_bins(), 16);
        assert_eq!(set.bin_for(Cell::new(9, 9)), 15);
    }

    #[test]
    fn out_of_box_cells_are_clamped() {
        let cells = vec![Cell::new(-5, 3), Cell::new(100, 100)];
        let set = BinSet::build(ten_by_ten(), 5, &cells);
        assert_eq!(set.bin_for(Cell::new(-5, 3)), set.bin_for(Cell::new(0, 3)));
        assert_eq!(
            set.agents_in(set.bin_for(Cell::new(9, 9))),
            &[1],
            "far cell clamps into the last bin"
        );
    }

    #[test]
    fn rebuilding_from_unchanged_positions_is_idempotent() {
        let cells: Vec<Cell> = (0..50).map(|i| Cell::new((i * 3) % 10, (i * 7) % 10)).collect();
        let first = BinSet::build(ten_by_ten(), 3, &cells);
        let second = BinSet::build(ten_by_ten(), 3, &cells);

        assert_eq!(first.num_bins(), second.num_bins());
        assert_eq!(first.num_items(), second.num_items());
        for bin in 0..first.num_bins() {
            let mut a = first.agents_in(bin).to_vec();
            let mut b = second.agents_in(bin).to_vec();
            a.sort_unstable();
            b.sort_unstable();
            assert_eq!(a, b, "bin {bin} changed across identical rebuilds");
        }
    }

    #[test]
    fn degenerate_box_yields_no_bins() {
        let set = BinSet::build(GridBox::empty(), 5, &[]);
        assert_eq!(set.num_bins(), 0);
        assert_eq!(set.num_items(), 0);
        assert_eq!(set.iter_bins().count(), 0);
    }

    #[test]
    fn iter_bins_skips_empty_bins() {
        let cells = vec![Cell::new(1, 1), Cell::new(1, 2)];
        let set = BinSet::build(ten_by_ten(), 5, &cells);
        let collected: Vec<_> = set.iter_bins().collect();
        assert_eq!(collected.len(), 1);
        assert_eq!(collected[0].1, &[0, 1]);
    }
}

#[cfg(test)]
mod cache {
    use epi_agent::{AgentSpec, Population, PopulationBuilder};
    use epi_core::{Cell, GridBox, LocationMode};
    use epi_disease::DiseaseParams;

    use crate::{BinCache, BinChoice};

    fn population() -> Population {
        let mut p = DiseaseParams::default();
        p.initialize();
        let mut b = PopulationBuilder::new(vec![p]);
        let tile = b.add_tile(GridBox::new(Cell::new(0, 0), Cell::new(10, 10)));
        for i in 0..8 {
            let spec = AgentSpec {
                home: Cell::new(i, 0),
                work: Cell::new(40 + i, 40),
                ..AgentSpec::default()
            };
            b.add_agent(tile, spec).unwrap();
        }
        b.build()
    }

    #[test]
    fn home_and_work_sides_are_cached_independently() {
        let pop = population();
        let mut cache = BinCache::new(4);

        cache.ensure(&pop.tiles, BinChoice::Home, pop.mode);
        let home = cache.bins(BinChoice::Home, pop.mode);
        assert_eq!(home.len(), 1);
        assert_eq!(home[0].num_items(), 8);

        cache.ensure(&pop.tiles, BinChoice::Work, pop.mode);
        let work = cache.bins(BinChoice::Work, pop.mode);
        assert_eq!(work[0].num_items(), 8);
        // Work cells sit far from the tile box; the work set covers them.
        assert!(work[0].num_bins() >= 1);
    }

    #[test]
    fn active_choice_follows_the_location_mode() {
        let pop = population();
        let mut cache = BinCache::new(4);
        cache.ensure(&pop.tiles, BinChoice::Active, LocationMode::Work);
        // Only the work side was built.
        let _ = cache.bins(BinChoice::Work, LocationMode::Home);
        let _ = cache.bins(BinChoice::Active, LocationMode::Work);
    }

    #[test]
    #[should_panic(expected = "before ensure")]
    fn using_unbuilt_bins_panics() {
        let pop = population();
        let cache = BinCache::new(4);
        let _ = cache.bins(BinChoice::Home, pop.mode);
    }

    #[test]
    fn invalidation_forces_a_rebuild() {
        let mut pop = population();
        let mut cache = BinCache::new(4);
        cache.ensure(&pop.tiles, BinChoice::Home, pop.mode);

        // Move an agent's home cell and invalidate; the rebuilt set reflects
        // the new cell.
        pop.tiles[0].home[0] = Cell::new(9, 9);
        cache.invalidate_all();
        cache.ensure(&pop.tiles, BinChoice::Home, pop.mode);
        let set = &cache.bins(BinChoice::Home, pop.mode)[0];
        assert!(set.agents_in(set.bin_for(Cell::new(9, 9))).contains(&0));
    }
}
