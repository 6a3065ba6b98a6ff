use bilebio_core::config::RegionConfig;
use bilebio_core::{Action, Direction, Game, GameRng, Region, SimConfig};
use proptest::{
    arbitrary::any,
    test_runner::{Config as ProptestConfig, TestCaseError, TestRunner},
};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

fn choose<T: Copy>(rng: &mut ChaCha8Rng, slice: &[T]) -> T {
    let p = rng.next_u64() as usize % slice.len();
    slice[p]
}

fn check_world(game: &Game) -> Result<(), String> {
    if !game.index().is_consistent() {
        return Err("index views disagree".to_string());
    }
    for (pos, id) in game.index().iter() {
        if !game.region().is_walkable(pos) {
            return Err(format!("entity on rock at {pos:?}"));
        }
        if game.coord_of(id) != Ok(pos) {
            return Err(format!("coord_of disagrees for {pos:?}"));
        }
        let entity = game.entity(id).ok_or_else(|| format!("indexed {id:?} missing from arena"))?;
        if entity.vitals.hearts > entity.vitals.max_hearts || entity.vitals.hearts < 0 {
            return Err(format!("hearts out of range at {pos:?}"));
        }
    }
    if game.index().pending_add_count() != 0 || game.index().pending_removal_count() != 0 {
        return Err("queued changes survived a turn".to_string());
    }
    Ok(())
}

fn run_random_game(map_seed: u64, input_seed: u64, turns: usize) -> Result<(), String> {
    let mut game = Game::new(map_seed, SimConfig::default()).map_err(|e| e.to_string())?;
    let mut rng = ChaCha8Rng::seed_from_u64(input_seed);
    for _ in 0..turns {
        if game.is_over() {
            game.advance_level();
        }
        if rng.next_u64() % 4 != 0 {
            game.player_act(choose(&mut rng, &Direction::ALL), Action::Move);
        }
        game.rest_act();
        check_world(&game).map_err(|e| format!("map_seed {map_seed}: {e}"))?;
    }
    Ok(())
}

#[test]
fn random_play_preserves_world_invariants() {
    let mut runner = TestRunner::new(ProptestConfig::with_cases(24));
    runner
        .run(&(any::<u64>(), any::<u64>()), |(map_seed, input_seed)| {
            run_random_game(map_seed, input_seed, 300).map_err(TestCaseError::fail)?;
            Ok(())
        })
        .expect("random play should preserve invariants");
}

#[test]
fn generated_regions_are_connected_for_any_size() {
    let mut runner = TestRunner::new(ProptestConfig::with_cases(64));
    runner
        .run(&(any::<u64>(), 3_usize..48, 3_usize..48), |(seed, width, height)| {
            let mut region = Region::new();
            let mut rng = GameRng::new(seed);
            region.generate(width, height, &RegionConfig::default(), &mut rng);

            let open = region.open_tiles().len();
            if open == 0 {
                return Err(TestCaseError::fail("no walkable tiles"));
            }
            if !region.is_walkable(region.center()) {
                return Err(TestCaseError::fail("center is not open"));
            }
            if region.reachable_from(region.center()) != open {
                return Err(TestCaseError::fail(format!("{width}x{height} seed {seed} is split")));
            }
            for _ in 0..16 {
                let pos = region.random_empty_tile(&mut rng).expect("open tiles exist");
                if !region.in_bounds(pos) || !region.is_walkable(pos) {
                    return Err(TestCaseError::fail(format!("bad random tile {pos:?}")));
                }
            }
            Ok(())
        })
        .expect("every generated region should be one connected cave");
}
