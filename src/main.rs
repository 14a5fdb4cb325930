use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use nebula_core::SimConfig;
use nebula_render::menu::Prompting;
use nebula_render::{Session, TerminalContext};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Terminal particle nebula: random walk, merging and fading on a grid.
#[derive(Debug, Parser)]
#[command(name = "nebula", version)]
struct Cli {
    /// TOML file with simulation parameters
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Seed for a repeatable run
    #[arg(long)]
    seed: Option<u64>,
    /// Directory frame files are saved to and replayed from
    #[arg(long, value_name = "DIR")]
    frames_dir: Option<PathBuf>,
    /// Disable colored particles
    #[arg(long)]
    no_color: bool,
    #[command(subcommand)]
    mode: Option<Mode>,
}

/// Skip the menu and go straight to one mode
#[derive(Debug, Subcommand)]
enum Mode {
    /// Step through a run, saving frames on request
    Interactive,
    /// Save a fixed number of frames
    Batch {
        /// Frames to save
        #[arg(long)]
        steps: Option<u32>,
    },
    /// Play back saved frames
    Replay,
    /// Ten steps with the default parameters
    Example,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    let mut config = match &cli.config {
        Some(path) => SimConfig::load(path)?,
        None => SimConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }
    if let Some(dir) = cli.frames_dir {
        config.frames_dir = dir;
    }
    if let Some(Mode::Batch { steps: Some(steps) }) = cli.mode {
        config.steps = steps;
    }
    config.validate().context("invalid simulation parameters")?;
    info!(?config, mode = ?cli.mode, "starting");

    let ctx = TerminalContext::detect(cli.no_color);
    let mut session = Session::new(io::stdin().lock(), io::stdout().lock(), ctx, config);

    match cli.mode {
        None => session.run_menu(),
        Some(Mode::Interactive) => session.run_interactive(Prompting::UseConfig),
        Some(Mode::Batch { .. }) => session.run_batch(Prompting::UseConfig),
        Some(Mode::Replay) => session.run_replay().map(|_| ()),
        Some(Mode::Example) => session.run_example(),
    }
}

/// Logs go to stderr so they never land inside the grid on stdout.
/// `RUST_LOG` overrides the default `warn` level.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
