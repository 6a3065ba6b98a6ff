use anyhow::{Result, bail, ensure};
use bilebio_core::{Action, Direction, Game, Pos, SimConfig};
use bilebio_tools::logging::init_tracing;
use bilebio_tools::seed::derive_run_seed;
use clap::Parser;
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 1000)]
    turns: u32,
    /// Independent games to play, each on a seed derived from `--seed`
    #[arg(short, long, default_value_t = 8)]
    runs: u64,
    /// Chance per turn that a new root is planted somewhere random
    #[arg(long, default_value_t = 0.02)]
    plant_chance: f64,
}

fn choose<T: Copy>(rng: &mut ChaCha8Rng, slice: &[T]) -> T {
    let p = rng.next_u64() as usize % slice.len();
    slice[p]
}

fn unit(rng: &mut ChaCha8Rng) -> f64 {
    (rng.next_u64() >> 11) as f64 / (1_u64 << 53) as f64
}

fn check_invariants(game: &Game) -> Result<()> {
    ensure!(game.index().is_consistent(), "index views disagree");
    for (pos, id) in game.index().iter() {
        ensure!(game.region().is_walkable(pos), "entity {id:?} stands on rock at {pos:?}");
        let Some(entity) = game.entity(id) else {
            bail!("indexed entity {id:?} is missing from the arena");
        };
        ensure!(
            entity.vitals.hearts <= entity.vitals.max_hearts,
            "entity {id:?} has more hearts than its maximum"
        );
        ensure!(entity.vitals.hearts >= 0, "entity {id:?} has negative hearts");
    }
    ensure!(game.index().pending_add_count() == 0, "births left uncommitted");
    ensure!(game.index().pending_removal_count() == 0, "removals left uncommitted");
    Ok(())
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();
    println!(
        "Starting fuzz harness on seed {} for {} runs of {} turns...",
        args.seed, args.runs, args.turns
    );

    for run in 0..args.runs {
        let run_seed = derive_run_seed(args.seed, run);
        let mut game = Game::new(run_seed, SimConfig::default())?;
        let mut rng = ChaCha8Rng::seed_from_u64(run_seed);

        for _ in 0..args.turns {
            if game.is_over() {
                game.advance_level();
            }
            // Bias toward moving so the player actually meets the organism.
            if unit(&mut rng) < 0.8
                && let Some(direction) = Direction::from_delta(
                    choose(&mut rng, &[-1, 0, 1]),
                    choose(&mut rng, &[-1, 0, 1]),
                )
            {
                game.player_act(direction, Action::Move);
            }
            if unit(&mut rng) < args.plant_chance
                && let Some(&pos) = choose_open(&mut rng, &game)
            {
                game.place_root(pos);
            }
            game.rest_act();
            check_invariants(&game)?;
        }
        println!(
            "run {run}: seed {run_seed} finished turn {} with {} plants",
            game.turn(),
            game.plant_count()
        );
    }

    println!("Fuzzing completed successfully.");
    Ok(())
}

fn choose_open<'a>(rng: &mut ChaCha8Rng, game: &'a Game) -> Option<&'a Pos> {
    let open = game.region().open_tiles();
    if open.is_empty() {
        return None;
    }
    Some(&open[rng.next_u64() as usize % open.len()])
}
