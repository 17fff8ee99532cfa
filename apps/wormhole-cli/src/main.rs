use std::ops::ControlFlow;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use glam::Vec2;
use tracing_subscriber::EnvFilter;
use wormhole_driver::{FixedStepScheduler, FrameDriver, Scene, SceneConfig, SceneSummary};
use wormhole_input::{Action, ClickOutcome};
use wormhole_path::{Path, wormhole_loop};
use wormhole_render::{DebugTextRenderer, NullRenderer};

#[derive(Parser)]
#[command(name = "wormhole-cli", about = "Headless wormhole flythrough")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Scene config (YAML). Defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the RNG seed from the config
    #[arg(short, long)]
    seed: Option<u64>,

    /// Print the final summary as JSON
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and scene configuration
    Info,
    /// Run the flythrough for a number of frames
    Run {
        /// Number of frames to simulate
        #[arg(short, long, default_value = "600")]
        frames: u64,
        /// Milliseconds per frame
        #[arg(long, default_value_t = 1000.0 / 60.0)]
        dt_ms: f64,
        /// Print a frame description every N frames (0 = never)
        #[arg(short, long, default_value = "0")]
        every: u64,
        /// Include every live object in printed frames
        #[arg(long)]
        objects: bool,
    },
    /// Fly to a point in time, click, and run until the burst settles
    Click {
        /// Pointer x in normalized device coordinates
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        x: f32,
        /// Pointer y in normalized device coordinates
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        y: f32,
        /// Scene time of the click
        #[arg(long, default_value = "0")]
        at_ms: f64,
        /// Give up waiting for bursts after this many frames
        #[arg(long, default_value = "1000")]
        max_frames: u64,
    },
    /// Sample the camera path
    Path {
        /// Number of evenly spaced samples
        #[arg(short = 'n', long, default_value = "16")]
        samples: usize,
    },
}

const FRAME_MS: f64 = 1000.0 / 60.0;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();

    let mut config = match &cli.config {
        Some(path) => SceneConfig::load(path)
            .with_context(|| format!("loading scene config {}", path.display()))?,
        None => SceneConfig::default(),
    };
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    tracing::info!(
        seed = ?config.seed,
        objects = config.object_count,
        custom_path = config.path.is_some(),
        "scene config ready"
    );

    match cli.command {
        Commands::Info => {
            println!("wormhole-cli v{}", env!("CARGO_PKG_VERSION"));
            print!("{}", config.to_yaml()?);
        }
        Commands::Run {
            frames,
            dt_ms,
            every,
            objects,
        } => {
            let scene = Scene::from_config(&config)?;
            let renderer = DebugTextRenderer::new().with_objects(objects);
            let mut driver = FrameDriver::new(scene, renderer);
            let mut scheduler = FixedStepScheduler::new(dt_ms, frames);
            driver.run(&mut scheduler, |report, text| {
                if every > 0 && report.frame % every == 0 {
                    print!("{text}");
                }
                ControlFlow::Continue(())
            })?;
            print_summary(&driver.summary(), cli.json)?;
        }
        Commands::Click {
            x,
            y,
            at_ms,
            max_frames,
        } => {
            let scene = Scene::from_config(&config)?;
            let mut driver = FrameDriver::new(scene, NullRenderer);

            while driver.scene().rig.elapsed_ms() + FRAME_MS * config.rig.speed <= at_ms {
                driver.run_frame(FRAME_MS)?;
            }

            match driver.dispatch(&Action::ClickNdc(Vec2::new(x, y)))? {
                Some(ClickOutcome::Exploded {
                    object,
                    burst,
                    distance,
                }) => {
                    println!(
                        "Hit {} at distance {distance:.3}; spawned {burst}",
                        object.id
                    );
                    let mut scheduler = FixedStepScheduler::new(FRAME_MS, max_frames);
                    let frames = driver.run(&mut scheduler, |report, ()| {
                        if report.finished_bursts.contains(&burst) {
                            ControlFlow::Break(())
                        } else {
                            ControlFlow::Continue(())
                        }
                    })?;
                    println!("{burst} settled after {frames} frames");
                }
                Some(ClickOutcome::Miss) | None => println!("Miss"),
            }
            print_summary(&driver.summary(), cli.json)?;
        }
        Commands::Path { samples } => {
            let path = match &config.path {
                Some(points) => Path::from_arrays(points)?,
                None => Path::new(wormhole_loop())?,
            };
            println!(
                "Path: {} control points, length {:.3}",
                path.control_points().len(),
                path.length()
            );
            let samples = samples.max(1);
            for i in 0..samples {
                let t = i as f32 / samples as f32;
                let p = path.point_at(t);
                let tangent = path.tangent_at(t);
                println!(
                    "t={t:.4} pos=({:.3}, {:.3}, {:.3}) tangent=({:.3}, {:.3}, {:.3})",
                    p.x, p.y, p.z, tangent.x, tangent.y, tangent.z
                );
            }
        }
    }

    Ok(())
}

fn print_summary(summary: &SceneSummary, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(summary)?);
    } else {
        println!("{summary}");
    }
    Ok(())
}
