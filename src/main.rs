//! Maze Runner - a third-person 3D maze exploration game.
//!
//! The player walks and jumps through a procedurally generated perfect maze, collecting
//! floating items. Clearing every item generates a fresh maze and the run continues.
//!
//! # Architecture
//! - `maze/`: grid model and the randomized depth-first carver
//! - `game/`: simulation core (collision, player physics, items, pickups, frame loop, scene)
//! - `app/`: winit event loop and input decoding
//! - `renderer/`: wgpu scene renderer
//! - `background/`: starfield
//! - `math/`: vectors and matrices
//! - `benchmarks/`: frame-budget profiling
//!
//! # Usage
//! `maze-runner --size 25 --items 30 [--seed N]`. Set `RUST_LOG` to change log verbosity.

pub mod app;
pub mod background;
pub mod benchmarks;
pub mod config;
pub mod error;
pub mod game;
pub mod math;
pub mod maze;
pub mod renderer;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use winit::event_loop::EventLoop;

use crate::config::{Args, GameConfig};

#[cfg(feature = "dhat-heap")]
#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

fn main() -> anyhow::Result<()> {
    #[cfg(feature = "dhat-heap")]
    let _profiler = dhat::Profiler::new_heap();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("maze_runner=info")),
        )
        .init();

    let args = Args::parse();
    let config = GameConfig::from(&args);
    info!(
        size = config.maze_size,
        items = config.item_count,
        seed = ?config.seed,
        width = args.width,
        height = args.height,
        "starting maze runner"
    );
    info!("controls: WASD or arrows to move, hold left mouse to look, SPACE to jump, ESC to quit");
    info!("press SPACE to start");

    let shutdown = Arc::new(AtomicBool::new(false));
    let flag = shutdown.clone();
    ctrlc::set_handler(move || flag.store(true, Ordering::SeqCst))
        .context("failed to install Ctrl-C handler")?;

    let event_loop = EventLoop::new().context("failed to create event loop")?;
    let mut app = app::App::new(config, args.width, args.height, shutdown);
    event_loop
        .run_app(&mut app)
        .context("event loop terminated abnormally")?;

    benchmarks::log_summary();

    if let Some(err) = app.take_error() {
        return Err(err).context("renderer failed");
    }
    info!("goodbye");
    Ok(())
}
