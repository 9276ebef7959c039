//! Toomy Runner headless entry point
//!
//! Runs the simulation with the autopilot at the configured frame rate,
//! drawing into a counting canvas. With `--watch` the tuning file and asset
//! bundles are hot-reloaded while the run continues.

use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;

use toomy_runner::consts::DEFAULT_FPS;
use toomy_runner::draw::draw_debug_banner;
use toomy_runner::platform::{FsAssetLoader, LogAudio, NullCanvas};
use toomy_runner::reload::{HotReload, ReloadOutcome, Reloadable};
use toomy_runner::sim::{SimEvent, autopilot};
use toomy_runner::{CollisionPolicy, Game, LevelMode, SimConfig, Tuning};

#[derive(Parser, Debug)]
#[command(name = "toomy-runner")]
#[command(about = "Side-scrolling platformer core, driven by the autopilot")]
struct Cli {
    /// Target frames per second
    #[arg(long, default_value_t = DEFAULT_FPS, value_parser = clap::value_parser!(u32).range(1..))]
    fps: u32,

    /// Initial speed multiplier (clamped to 0.25..=3.0)
    #[arg(long, default_value_t = 1.0)]
    speed: f32,

    /// Level seed (defaults to the current time)
    #[arg(long)]
    seed: Option<u64>,

    /// Tuning JSON file
    #[arg(long)]
    tuning: Option<PathBuf>,

    /// Resource bundle to load (repeatable)
    #[arg(long = "asset")]
    assets: Vec<PathBuf>,

    /// Stop after this many ticks
    #[arg(long)]
    frames: Option<u64>,

    /// Hot-reload the tuning file and assets while running
    #[arg(long)]
    watch: bool,

    /// Collision policy: axis or continuous
    #[arg(long, default_value = "axis", value_parser = parse_collision)]
    collision: CollisionPolicy,

    /// Level mode: static or endless
    #[arg(long, default_value = "static", value_parser = parse_level)]
    level: LevelMode,
}

fn parse_collision(s: &str) -> Result<CollisionPolicy, String> {
    CollisionPolicy::from_str(s).ok_or_else(|| format!("unknown collision policy '{s}'"))
}

fn parse_level(s: &str) -> Result<LevelMode, String> {
    LevelMode::from_str(s).ok_or_else(|| format!("unknown level mode '{s}'"))
}

fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let seed = cli.seed.unwrap_or_else(time_seed);
    let config = SimConfig::new(cli.fps, cli.speed)?
        .with_seed(seed)
        .with_collision(cli.collision)
        .with_level(cli.level)
        .with_assets(cli.assets);

    let tuning = match &cli.tuning {
        Some(path) => Tuning::load(path)
            .with_context(|| format!("loading tuning from {}", path.display()))?,
        None => Tuning::default(),
    };

    log::info!(
        "Toomy Runner starting: {} fps, {:.2}x, seed {}, {} collision, {} level",
        config.fps,
        config.speed,
        seed,
        config.collision.as_str(),
        config.level.as_str()
    );

    let frame_time = Duration::from_secs_f64(1.0 / f64::from(config.fps));
    let mut game = Game::new(config, tuning);
    let mut audio = LogAudio;
    let mut canvas = NullCanvas::default();
    let mut loader = FsAssetLoader::default();

    let mut harness = HotReload::new();
    harness.init(game.init_params())?;
    harness
        .load_assets(&mut game, &mut loader)
        .context("loading assets")?;
    if cli.watch {
        match &cli.tuning {
            Some(path) => harness.watch_module(path)?,
            None => log::warn!("--watch without --tuning: only assets are watched"),
        }
    }
    game.start_music(&mut audio);

    let mut frames = 0u64;
    loop {
        if cli.frames.is_some_and(|limit| frames >= limit) {
            break;
        }

        let input = autopilot::plan(game.world());
        let events = game.step(&input, &mut audio);
        frames += 1;

        game.draw(&mut canvas);
        if cli.watch {
            draw_debug_banner(&mut canvas);
        }

        if events.contains(&SimEvent::QuitRequested) {
            log::info!("Quit requested");
            break;
        }

        if cli.watch {
            match harness.poll(SystemTime::now(), &mut game, &mut loader) {
                Ok(ReloadOutcome::Module) => log::info!("Tuning reloaded"),
                Ok(ReloadOutcome::Assets(paths)) => {
                    log::info!("Reloaded {} asset(s)", paths.len())
                }
                Ok(_) => {}
                Err(err) if err.is_fatal() => return Err(err.into()),
                Err(err) => log::error!("Reload failed: {}", err),
            }
        }

        std::thread::sleep(frame_time);
    }

    let world = game.world();
    log::info!(
        "Finished after {} frames: score {}, game time {:.1}s, {} blits, {} bytes of assets",
        frames,
        world.score,
        world.clock.game_time(),
        canvas.blits,
        loader.bytes_loaded
    );
    Ok(())
}
