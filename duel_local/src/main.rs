mod config;
mod fsm;
mod input;
mod session;
mod sink;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use duel_core::{EntityKind, Key};
use tracing::info;

use crate::config::load_config;
use crate::input::{InputSource, RandomInput, ScriptedInput};
use crate::session::{Session, SessionOptions};

#[derive(Parser, Debug)]
#[command(about = "Run a two-player space duel headlessly", version)]
struct Args {
    /// TOML match configuration; defaults are used when omitted
    #[arg(long)]
    config: Option<PathBuf>,
    /// TOML input script of [[frames]] entries
    #[arg(long)]
    script: Option<PathBuf>,
    /// Seed for random key mashing when no script is given
    #[arg(long, default_value_t = 1)]
    seed: u64,
    /// Frame limit per round
    #[arg(long, default_value_t = 10_000)]
    frames: u64,
    #[arg(long, default_value_t = 1)]
    rounds: u32,
    /// Pace frames at 60 FPS instead of running flat out
    #[arg(long)]
    realtime: bool,
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let config = load_config(args.config.as_deref())?;
    let options = SessionOptions {
        rounds: args.rounds,
        max_frames: args.frames,
        realtime: args.realtime,
    };

    match &args.script {
        Some(path) => {
            let input = ScriptedInput::load(path)?;
            info!(script = %path.display(), frames = input.remaining(), "scripted input");
            run(config, input, options)
        }
        None => {
            info!(seed = args.seed, "random input");
            let layout = config.resolve()?;
            let keys: Vec<Key> = layout
                .sides
                .iter()
                .flat_map(|side| side.keys.keys())
                .collect();
            run(config, RandomInput::new(args.seed, keys), options)
        }
    }
}

fn run<I: InputSource>(
    config: duel_core::Config,
    input: I,
    options: SessionOptions,
) -> Result<()> {
    let mut session = Session::new(config, input, options)?;
    let summaries = session.run();

    let decided = summaries.iter().filter(|s| s.winner.is_some()).count();
    info!(
        rounds = summaries.len(),
        decided,
        live_entities = session.sink().live(),
        live_projectiles = session.sink().count(EntityKind::Projectile),
        frames_presented = session.sink().frames_presented(),
        final_state = ?session.game().state(),
        session_state = ?session.fsm_state(),
        "session finished"
    );
    Ok(())
}
