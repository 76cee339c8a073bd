use std::sync::Arc;

use invasion_domain::{AlienId, CityName, SimulationStage};

use super::*;
use crate::infrastructure::map_file::{parse_map, MapData};
use crate::infrastructure::ports::{MockNamePort, MockRandomPort, RandomPort};
use crate::infrastructure::random::{ScriptedRandom, SeededRandom};

fn namer() -> Arc<dyn NamePort> {
    let mut namer = MockNamePort::new();
    namer
        .expect_name_for()
        .returning(|id| format!("alien_{}", id));
    Arc::new(namer)
}

fn config(alien_count: u32, max_iterations: u64) -> SimulationConfig {
    SimulationConfig {
        alien_count,
        max_iterations,
    }
}

fn simulation(map: &str, config: SimulationConfig, random: Arc<dyn RandomPort>) -> Simulation {
    Simulation::new(config, parse_map(map).unwrap(), random, namer())
}

fn names(cities: &[CityName]) -> Vec<&str> {
    cities.iter().map(CityName::as_str).collect()
}

const EXAMPLE_MAP: &str = "\
Foo north=Bar west=Baz south=Qux
Bar south=Foo west=Bee
Baz east=Foo
Qux north=Foo
Bee east=Bar
";

mod initialize {
    use super::*;

    #[test]
    fn spawns_named_aliens_at_random_cities() {
        // Cities in name order: A, B, C.
        let mut sim = simulation(
            "A east=B\nB east=C\n",
            config(2, 10),
            Arc::new(ScriptedRandom::new([0, 2])),
        );

        sim.initialize().unwrap();

        assert_eq!(sim.stage(), SimulationStage::SpawningAliens);
        let world = sim.world();
        assert_eq!(world.occupant("A"), Some(AlienId::new(0)));
        assert_eq!(world.occupant("C"), Some(AlienId::new(1)));
        assert_eq!(
            world.alien(AlienId::new(1)).map(|a| a.name().as_str()),
            Some("alien_1")
        );
        assert_eq!(world.free_alien_count(), 2);
    }

    #[test]
    fn unusable_name_falls_back_to_default() {
        let mut namer = MockNamePort::new();
        namer.expect_name_for().returning(|_| "   ".to_string());
        let mut sim = Simulation::new(
            config(1, 10),
            parse_map("A east=B\n").unwrap(),
            Arc::new(ScriptedRandom::new([0])),
            Arc::new(namer),
        );

        sim.initialize().unwrap();

        assert_eq!(
            sim.world().alien(AlienId::new(0)).map(|a| a.name().as_str()),
            Some("alien_0")
        );
        assert_eq!(sim.world().occupant("A"), Some(AlienId::new(0)));
    }

    #[test]
    fn spawn_draws_from_every_current_city() {
        let mut random = MockRandomPort::new();
        random
            .expect_gen_index()
            .withf(|upper| *upper == 5)
            .times(1)
            .return_const(4_usize);

        let mut sim = simulation(EXAMPLE_MAP, config(1, 10), Arc::new(random));
        sim.initialize().unwrap();

        assert_eq!(sim.world().occupant("Qux"), Some(AlienId::new(0)));
    }

    #[test]
    fn spawn_collision_destroys_city() {
        // Bar, Baz, Bee, Foo, Qux: both aliens roll Foo.
        let mut sim = simulation(
            EXAMPLE_MAP,
            config(2, 10),
            Arc::new(ScriptedRandom::new([3, 3])),
        );

        sim.initialize().unwrap();

        let world = sim.world();
        assert_eq!(world.city_count(), 4);
        assert!(world.city("Foo").is_none());
        assert!(world.all_aliens_dead());
        assert_eq!(world.city("Bar").map(|c| c.neighbour_count()), Some(1));
        world.verify_invariants().unwrap();

        let report = sim.run().unwrap();
        assert_eq!(report.outcome, Outcome::AllAliensDead);
        assert_eq!(report.rounds, 0);
        assert_eq!(names(&report.destroyed), vec!["Foo"]);
    }

    #[test]
    fn no_cities_aborts() {
        let mut sim = simulation("", config(1, 10), Arc::new(SeededRandom::new(1)));
        let err = sim.initialize().unwrap_err();
        assert!(matches!(err, SimulationError::NoCities));
    }

    #[test]
    fn malformed_map_aborts_before_spawning() {
        let mut sim = simulation("Foo up=Bar\n", config(1, 10), Arc::new(SeededRandom::new(1)));
        let err = sim.initialize().unwrap_err();
        assert!(matches!(
            err,
            SimulationError::Domain(DomainError::InvalidDirection(_))
        ));
        assert_eq!(sim.world().city_count(), 0);
    }

    #[test]
    fn initialize_twice_is_out_of_order() {
        let mut sim = simulation("A east=B\n", config(0, 10), Arc::new(SeededRandom::new(1)));
        sim.initialize().unwrap();
        assert!(matches!(
            sim.initialize(),
            Err(SimulationError::OutOfOrder {
                expected: SimulationStage::Start,
                ..
            })
        ));
    }
}

mod run {
    use super::*;

    #[test]
    fn run_before_initialize_is_out_of_order() {
        let mut sim = simulation("A east=B\n", config(1, 10), Arc::new(SeededRandom::new(1)));
        assert!(matches!(
            sim.run(),
            Err(SimulationError::OutOfOrder {
                expected: SimulationStage::SpawningAliens,
                actual: SimulationStage::Start,
            })
        ));
    }

    #[test]
    fn moving_into_occupied_city_destroys_it() {
        // A - B - C: alien 0 spawns in A, alien 1 in C. Alien 0 steps into B,
        // then alien 1 follows and both die.
        let mut sim = simulation(
            "A east=B\nB east=C\n",
            config(2, 10),
            Arc::new(ScriptedRandom::new([0, 2, 0, 0])),
        );
        sim.initialize().unwrap();

        let report = sim.run().unwrap();

        assert_eq!(report.outcome, Outcome::AllAliensDead);
        assert_eq!(report.rounds, 1);
        assert_eq!(names(&report.destroyed), vec!["B"]);
        assert!(report.survivors.is_empty());
        assert_eq!(sim.world().map_lines(), vec!["A", "C"]);
        assert_eq!(sim.stage(), SimulationStage::End);
    }

    #[test]
    fn alien_killed_earlier_in_round_is_skipped() {
        // Alien 0 walks from A into alien 1's city B; alien 1 is still in the
        // round snapshot but must not move.
        let random = ScriptedRandom::new([0, 1, 0]);
        let mut sim = simulation("A east=B\n", config(2, 10), Arc::new(random));
        sim.initialize().unwrap();
        assert_eq!(sim.world().occupant("B"), Some(AlienId::new(1)));

        let report = sim.run().unwrap();

        assert_eq!(report.outcome, Outcome::AllAliensDead);
        assert_eq!(report.rounds, 1);
        assert_eq!(names(&report.destroyed), vec!["B"]);
        assert_eq!(sim.world().map_lines(), vec!["A"]);
    }

    #[test]
    fn alien_trapped_earlier_in_round_is_skipped() {
        // Cities in name order: P, Q, R. Alien 0 spawns in R, alien 1 in P,
        // alien 2 in Q. Alien 0 walks into Q, which strands alien 1 in P
        // before its turn comes up.
        let random = ScriptedRandom::new([2, 0, 1, 0, 0]);
        let mut sim = simulation("P east=Q\nQ east=R\n", config(3, 10), Arc::new(random));
        sim.initialize().unwrap();
        assert_eq!(sim.world().free_alien_count(), 3);

        let report = sim.run().unwrap();

        assert_eq!(report.outcome, Outcome::AllAliensTrapped);
        assert_eq!(report.rounds, 1);
        assert_eq!(names(&report.destroyed), vec!["Q"]);
        let survivors: Vec<_> = report.survivors.iter().map(|a| a.id()).collect();
        assert_eq!(survivors, vec![AlienId::new(1)]);
        assert_eq!(sim.world().occupant("P"), Some(AlienId::new(1)));
        sim.world().verify_invariants().unwrap();
    }

    #[test]
    fn isolated_aliens_end_trapped() {
        let mut sim = simulation("A\nB\n", config(1, 10), Arc::new(SeededRandom::new(3)));
        sim.initialize().unwrap();

        let report = sim.run().unwrap();

        assert_eq!(report.outcome, Outcome::AllAliensTrapped);
        assert_eq!(report.rounds, 0);
        assert_eq!(report.survivors.len(), 1);
        assert!(report.destroyed.is_empty());
    }

    #[test]
    fn lone_alien_wanders_until_iteration_limit() {
        let mut sim = simulation("A east=B\n", config(1, 3), Arc::new(SeededRandom::new(5)));
        sim.initialize().unwrap();

        let report = sim.run().unwrap();

        assert_eq!(report.outcome, Outcome::IterationLimit);
        assert_eq!(report.rounds, 3);
        assert_eq!(report.survivors.len(), 1);
        assert_eq!(sim.world().city_count(), 2);
    }

    #[test]
    fn iteration_limit_takes_priority() {
        let mut sim = simulation("A\n", config(0, 0), Arc::new(SeededRandom::new(5)));
        sim.initialize().unwrap();

        let report = sim.run().unwrap();
        assert_eq!(report.outcome, Outcome::IterationLimit);
        assert_eq!(report.rounds, 0);
    }

    #[test]
    fn no_aliens_counts_as_all_dead() {
        let mut sim = simulation("", config(0, 10), Arc::new(SeededRandom::new(5)));
        sim.initialize().unwrap();

        let report = sim.run().unwrap();
        assert_eq!(report.outcome, Outcome::AllAliensDead);
    }
}

mod properties {
    use super::*;

    fn grid(size: usize) -> MapData {
        let name = |x: usize, y: usize| format!("C{}x{}", x, y);
        let mut map = MapData::new();
        for x in 0..size {
            for y in 0..size {
                let mut specs = Vec::new();
                if y + 1 < size {
                    specs.push(format!("north={}", name(x, y + 1)));
                }
                if x + 1 < size {
                    specs.push(format!("east={}", name(x + 1, y)));
                }
                map.insert(name(x, y), specs);
            }
        }
        map
    }

    fn run_grid(seed: u64, aliens: u32) -> (SimulationReport, Simulation) {
        let mut sim = Simulation::new(
            config(aliens, 200),
            grid(6),
            Arc::new(SeededRandom::new(seed)),
            namer(),
        );
        sim.initialize().unwrap();
        let report = sim.run().unwrap();
        (report, sim)
    }

    #[test]
    fn every_run_terminates_with_consistent_world() {
        for seed in 0..20 {
            let (report, sim) = run_grid(seed, 12);
            let world = sim.world();

            assert!(report.rounds <= 200);
            world.verify_invariants().unwrap();
            assert_eq!(world.city_count() + report.destroyed.len(), 36);
            assert_eq!(report.survivors.len(), world.alien_count());
            for city in &report.destroyed {
                assert!(world.city(city.as_str()).is_none());
            }
        }
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let (first, first_sim) = run_grid(42, 10);
        let (second, second_sim) = run_grid(42, 10);

        assert_eq!(first, second);
        assert_eq!(first_sim.world().map_lines(), second_sim.world().map_lines());
    }
}
