//! AppState module.
//!
//! This module defines the [`AppState`] struct, which holds all state required for a running
//! session once the window exists: the renderer, the game loop and the input state.

use std::sync::Arc;
use std::time::Instant;

use tracing::trace;
use winit::window::Window;

use crate::app::keys::KeyState;
use crate::benchmarks::{self, BenchmarkConfig, Profiler};
use crate::config::GameConfig;
use crate::error::RenderError;
use crate::game::{FrameOutcome, GameLoop};
use crate::renderer::wgpu_lib::WgpuRenderer;

/// Holds all state required for a running game session.
pub struct AppState {
    pub window: Arc<Window>,
    /// The WGPU renderer, also the game loop's scene sink.
    pub wgpu_renderer: WgpuRenderer,
    pub game_loop: GameLoop,
    /// The current input state (pressed keys, buffered look, quit).
    pub key_state: KeyState,
    last_frame: Instant,
    title: String,
    profiler: Profiler,
}

impl AppState {
    /// Creates the surface and renderer for `window` and a fresh game.
    ///
    /// # Errors
    /// [`RenderError`] if the surface or renderer cannot be created.
    pub async fn new(
        instance: &wgpu::Instance,
        window: Arc<Window>,
        config: GameConfig,
    ) -> Result<Self, RenderError> {
        let size = window.inner_size();
        let surface = instance.create_surface(window.clone())?;
        let wgpu_renderer = WgpuRenderer::new(instance, surface, size.width, size.height).await?;
        let game_loop = GameLoop::new(config);

        let mut state = Self {
            window,
            wgpu_renderer,
            game_loop,
            key_state: KeyState::new(),
            last_frame: Instant::now(),
            title: String::new(),
            profiler: Profiler::new(BenchmarkConfig::default()),
        };
        state.update_title();
        Ok(state)
    }

    /// Resizes the WGPU surface. Zero sizes (minimised windows) are ignored.
    pub fn resize_surface(&mut self, width: u32, height: u32) {
        self.wgpu_renderer.resize(width, height);
    }

    /// Runs one frame: decode input, simulate, render, then refresh the title.
    ///
    /// # Errors
    /// Fatal renderer failures.
    pub fn redraw(&mut self) -> Result<FrameOutcome, RenderError> {
        let now = Instant::now();
        let dt = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;

        self.profiler.start_section("input");
        let intent = self.key_state.intent();
        self.profiler.end_section("input");

        let outcome = self
            .game_loop
            .frame(&intent, dt, &mut self.wgpu_renderer)?;
        let fps = benchmarks::record_frame();
        trace!(fps, "frame");

        self.update_title();
        Ok(outcome)
    }

    /// Shows progress in the window title. The window is only touched when the text changes.
    pub fn update_title(&mut self) {
        let world = self.game_loop.world();
        let title = if self.game_loop.is_started() {
            format!("Maze Runner - Collected {} / {}", world.collected, world.total)
        } else {
            "Maze Runner - Press SPACE to start".to_string()
        };
        if title != self.title {
            self.window.set_title(&title);
            self.title = title;
        }
    }
}
