use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use env_logger::Env;
use log::info;
use rand::{rngs::StdRng, SeedableRng};
use tui_2048::config::GameConfig;
use tui_2048::session::Session;
use tui_2048::terminal::Screen;

#[derive(Debug, Parser)]
#[command(name = "tui-2048", about = "Play 2048 in the terminal with W/A/S/D")]
struct Args {
    /// Seed the tile RNG for a reproducible game
    #[arg(long)]
    seed: Option<u64>,

    /// Path to a TOML config file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Do not clear the screen between turns
    #[arg(long)]
    no_clear: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let cfg = match &args.config {
        Some(path) => GameConfig::from_toml(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => GameConfig::default(),
    };
    let cfg = cfg.with_overrides(args.seed, args.no_clear);

    let rng = match cfg.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    info!("starting session (seed: {:?})", cfg.seed);

    let mut session = Session::new(rng);
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout().lock();
    session.play(&mut input, &mut out, Screen::new(cfg.clear_screen))?;
    Ok(())
}
