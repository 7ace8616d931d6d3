#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs a headless House Defence session.

mod audio;
mod autopilot;
mod script;

use std::{fs, path::Path, path::PathBuf, time::Duration};

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use house_defence_core::GameConfig;
use house_defence_rendering::{forward_audio, Color, FrameInput, Presentation, RenderingBackend, Scene};
use house_defence_rendering_text::TextBackend;
use house_defence_system_game_loop::{Config, GameLoop};
use house_defence_world::{query, World};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::{autopilot::Autopilot, script::Script};

const DEFAULT_TICK_MS: u64 = 16;

/// Headless House Defence simulation.
#[derive(Debug, Parser)]
#[command(name = "house-defence", version, about)]
struct Args {
    /// TOML file overriding the built-in game configuration.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Seed for the enemy spawn jitter.
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Number of ticks to simulate.
    #[arg(long, default_value_t = 3600)]
    ticks: u64,
    /// Simulated length of a tick in milliseconds.
    #[arg(long = "tick-ms", default_value_t = DEFAULT_TICK_MS)]
    tick_ms: u64,
    /// Intent script to replay instead of the autopilot.
    #[arg(long)]
    script: Option<PathBuf>,
    /// Log filter directive, overriding `RUST_LOG`.
    #[arg(long)]
    log: Option<String>,
    /// Print a frame every this many ticks.
    #[arg(long = "render-every", default_value_t = 60)]
    render_every: u64,
    /// Width of the printed field in characters.
    #[arg(long, default_value_t = 80)]
    columns: usize,
}

/// Entry point for the House Defence command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log.as_deref())?;

    let config = load_config(args.config.as_deref())?;
    let script = args.script.as_deref().map(Script::load).transpose()?;
    let tick_ms = if args.tick_ms == 0 {
        warn!(fallback = DEFAULT_TICK_MS, "ignoring zero tick length");
        DEFAULT_TICK_MS
    } else {
        args.tick_ms
    };

    let mut world = World::new(config);
    info!(seed = args.seed, ticks = args.ticks, "{}", query::welcome_banner(&world));
    let scene = Scene::from_snapshot(&query::snapshot(&world), &world.config);

    let (audio, audio_thread) = audio::start_audio_thread()?;
    let mut game_loop = GameLoop::new(Config::new(args.seed));
    let mut events = Vec::new();

    let backend = TextBackend::new(args.columns)?
        .with_frames(args.ticks)
        .with_tick(Duration::from_millis(tick_ms))
        .with_render_every(args.render_every)?
        .with_input(move |tick, scene| match &script {
            Some(script) => FrameInput::new(script.intents_at(tick).to_vec()),
            None => FrameInput::new(Autopilot.intents(scene)),
        });

    backend.run(
        Presentation::new("House Defence", Color::from_rgb_u8(24, 20, 36), scene),
        move |dt, input, scene| {
            events.clear();
            game_loop.step(&mut world, &input.intents, dt, &mut events);
            forward_audio(&audio, &events);
            scene.update(&query::snapshot(&world), &world.config, &events);
        },
    )?;

    let drained = audio_thread
        .join()
        .map_err(|_| anyhow!("audio thread panicked"))?;
    info!(cues = drained, "session finished");
    Ok(())
}

fn init_logging(directive: Option<&str>) -> Result<()> {
    let filter = match directive {
        Some(directive) => EnvFilter::try_new(directive)
            .with_context(|| format!("invalid log filter `{directive}`"))?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<GameConfig> {
    let config = match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            parse_config(&text).with_context(|| format!("invalid config {}", path.display()))?
        }
        None => GameConfig::default(),
    };
    config.validate().context("configuration rejected")?;
    Ok(config)
}

fn parse_config(text: &str) -> Result<GameConfig> {
    toml::from_str(text).context("failed to parse TOML")
}
