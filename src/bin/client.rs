// Network client: registers with the game server and answers every turn.

use std::io::{BufReader, Write};
use std::net::TcpStream;
use std::path::PathBuf;

use anyhow::{Context, Result};
use ataxx::client::Session;
use ataxx::config::{Profile, SearchConfig};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Server address
    #[arg(long)]
    ip: String,

    /// Server port
    #[arg(long, value_parser = clap::value_parser!(u16).range(1..))]
    port: u16,

    /// Name announced in `register`; decides our color at game start
    #[arg(long)]
    username: String,

    /// Search preset
    #[arg(long, value_enum, default_value_t = Profile::Deep)]
    profile: Profile,

    /// JSON search config, overrides --profile
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn main() {
    let args = Args::parse();
    init_logger(args.debug);

    if let Err(e) = run(&args) {
        log::error!("Fatal error: {e:#}");
        std::process::exit(1);
    }
}

fn init_logger(debug: bool) {
    let log_level = if debug { "debug" } else { "info" };
    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, log_level),
    )
    .format(|buf, record| writeln!(buf, "[{}] {}: {}", record.level(), record.target(), record.args()))
    .target(env_logger::Target::Stderr)
    .init();
}

fn load_config(args: &Args) -> Result<SearchConfig> {
    match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            SearchConfig::load_from_json(&text)
                .with_context(|| format!("invalid search config {}", path.display()))
        }
        None => Ok(SearchConfig::for_profile(args.profile)),
    }
}

fn run(args: &Args) -> Result<()> {
    let config = load_config(args)?;
    log::debug!("search config: {config:?}");

    let stream = TcpStream::connect((args.ip.as_str(), args.port))
        .with_context(|| format!("failed to connect to {}:{}", args.ip, args.port))?;
    stream.set_nodelay(true)?;
    log::info!("[{}] connected to {}:{}", args.username, args.ip, args.port);

    let reader = BufReader::new(stream.try_clone()?);
    let summary = Session::new(reader, stream, args.username.as_str(), config).run()?;

    log::info!(
        "session finished as {}: {} moves, {} passes{}",
        summary.color,
        summary.moves_sent,
        summary.passes_sent,
        if summary.game_over { "" } else { " (connection closed early)" }
    );
    Ok(())
}
