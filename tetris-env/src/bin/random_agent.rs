use std::{path::PathBuf, thread, time::Duration};

use clap::Parser;
use log::info;
use tetris_core::tetris::Game;
use tetris_env::{Display, EnvConfig, Result, TerminalDisplay, TetrisEnv};

const FRAME_DELAY: Duration = Duration::from_millis(50);

/// Plays Tetris episodes with uniformly sampled actions
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// JSON environment config
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of episodes to play
    #[arg(long, default_value_t = 1)]
    episodes: usize,

    /// Seed for action sampling
    #[arg(long)]
    seed: Option<u64>,

    /// Draw every step in the terminal
    #[arg(long)]
    render: bool,
}

fn play<D: Display>(env: &mut TetrisEnv<Game, D>, args: &Args) -> Result<()> {
    let seed = env.seed(args.seed);
    info!("Action sampling seeded with {seed:?}");
    for episode in 1..=args.episodes {
        env.reset();
        let mut total = 0.0;
        let mut steps = 0usize;
        loop {
            let action = env.sample_action();
            let step = env.step(action)?;
            total += step.reward;
            steps += 1;
            if args.render {
                env.render("human")?;
                thread::sleep(FRAME_DELAY);
            }
            if step.done {
                info!(
                    "Episode {episode}: {steps} steps, reward {total}, info {:?}",
                    step.info
                );
                break;
            }
        }
    }
    env.close();
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => EnvConfig::load(path)?,
        None => EnvConfig::default(),
    };
    let game = Game::new(config.game_config());
    if args.render {
        play(
            &mut TetrisEnv::with_display(game, TerminalDisplay::stdout(), &config)?,
            &args,
        )
    } else {
        play(&mut TetrisEnv::new(game, &config)?, &args)
    }
}
