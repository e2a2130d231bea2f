// Plays the engine against itself from the starting position.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use ataxx::config::{Profile, SearchConfig};
use ataxx::game::Game;
use ataxx::{Decision, Searcher};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Search preset
    #[arg(long, value_enum, default_value_t = Profile::Compact)]
    profile: Profile,

    /// JSON search config, overrides --profile
    #[arg(long)]
    config: Option<PathBuf>,

    /// Stop after this many moves and passes
    #[arg(long, default_value_t = 400)]
    max_plies: u32,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn main() {
    let args = Args::parse();
    let log_level = if args.debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, log_level),
    )
    .format(|buf, record| writeln!(buf, "[{}] {}: {}", record.level(), record.target(), record.args()))
    .init();

    if let Err(e) = run(&args) {
        log::error!("Fatal error: {e:#}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let config = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            SearchConfig::load_from_json(&text)?
        }
        None => SearchConfig::for_profile(args.profile),
    };

    let mut game = Game::new();
    let mut searcher = Searcher::new(config);
    println!("{}", game.board());

    while !game.is_game_over() && game.plies() < args.max_plies {
        let color = game.to_move();
        match game.step(&mut searcher)? {
            Decision::Move(mv) => println!("{:>3}. {color} {mv}", game.plies()),
            Decision::Pass => println!("{:>3}. {color} pass", game.plies()),
        }
        println!("{}", game.board());
    }

    let result = game.to_game_result();
    match result.winner {
        Some(winner) => println!(
            "{winner} wins {}-{}",
            result.red_count.max(result.blue_count),
            result.red_count.min(result.blue_count)
        ),
        None => println!("draw {}-{}", result.red_count, result.blue_count),
    }
    Ok(())
}
