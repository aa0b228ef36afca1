//! Event handler module.
//!
//! Contains the [`App`] struct and its event handling logic.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use tracing::{error, info, warn};
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{DeviceEvent, DeviceId, ElementState, KeyEvent, MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow},
    window::{CursorGrabMode, Window, WindowId},
};

use crate::app::app_state::AppState;
use crate::app::keys::{GameKey, winit_key_to_game_key};
use crate::config::{GameConfig, constants};
use crate::error::RenderError;
use crate::game::FrameOutcome;

/// Main application struct that manages the window lifecycle and event handling.
///
/// # Lifecycle
/// 1. Created with [`App::new`], which initialises the WGPU instance
/// 2. `resumed` creates the window, surface and [`AppState`]
/// 3. Events are handled via the [`ApplicationHandler`] trait methods
/// 4. The loop exits on a quit frame or a fatal render error, kept for [`App::take_error`]
pub struct App {
    /// The WGPU instance for graphics operations.
    pub instance: wgpu::Instance,
    /// The current application state, None until the window exists.
    pub state: Option<AppState>,
    config: GameConfig,
    window_size: PhysicalSize<u32>,
    shutdown: Arc<AtomicBool>,
    error: Option<RenderError>,
    frame_budget: Duration,
    next_frame: Instant,
}

impl App {
    /// Creates a new [`App`].
    ///
    /// # Arguments
    /// - `config`: Settings for every maze of the session
    /// - `width`, `height`: Requested window size
    /// - `shutdown`: Raised from outside the event loop (Ctrl-C) to request a quit
    pub fn new(config: GameConfig, width: u32, height: u32, shutdown: Arc<AtomicBool>) -> Self {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        Self {
            instance,
            state: None,
            config,
            window_size: PhysicalSize::new(width, height),
            shutdown,
            error: None,
            frame_budget: Duration::from_secs(1) / constants::TARGET_FPS,
            next_frame: Instant::now(),
        }
    }

    /// The fatal error that stopped the loop, if any.
    pub fn take_error(&mut self) -> Option<RenderError> {
        self.error.take()
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: RenderError) {
        error!(%err, "stopping");
        self.error = Some(err);
        event_loop.exit();
    }

    fn set_look_capture(window: &Window, captured: bool) {
        if captured {
            let grabbed = window
                .set_cursor_grab(CursorGrabMode::Locked)
                .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined));
            if let Err(err) = grabbed {
                warn!(%err, "failed to grab cursor");
            }
            window.set_cursor_visible(false);
        } else {
            if let Err(err) = window.set_cursor_grab(CursorGrabMode::None) {
                warn!(%err, "failed to release cursor");
            }
            window.set_cursor_visible(true);
        }
    }
}

impl ApplicationHandler for App {
    /// Creates the window and all rendering state on first resume.
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }
        let attributes = Window::default_attributes()
            .with_title("Maze Runner")
            .with_inner_size(self.window_size);
        let window = match event_loop.create_window(attributes) {
            Ok(window) => Arc::new(window),
            Err(err) => return self.fail(event_loop, err.into()),
        };

        match pollster::block_on(AppState::new(&self.instance, window, self.config.clone())) {
            Ok(state) => {
                self.state = Some(state);
                self.next_frame = Instant::now();
            }
            Err(err) => self.fail(event_loop, err),
        }
    }

    /// Buffers mouse motion for look control.
    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta } = event {
            if let Some(state) = self.state.as_mut() {
                state.key_state.add_mouse_motion(delta.0, delta.1);
            }
        }
    }

    /// Handles window events including input, resize, close requests and redraws.
    fn window_event(&mut self, event_loop: &ActiveEventLoop, _: WindowId, event: WindowEvent) {
        let Some(state) = self.state.as_mut() else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => {
                info!("window close requested");
                state.key_state.request_quit();
                state.window.request_redraw();
            }

            WindowEvent::Resized(new_size) => {
                state.resize_surface(new_size.width, new_size.height);
            }

            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        logical_key: key,
                        state: key_state,
                        repeat: false,
                        ..
                    },
                ..
            } => {
                if let Some(game_key) = winit_key_to_game_key(&key) {
                    match key_state {
                        ElementState::Pressed => {
                            if game_key == GameKey::Quit {
                                info!("escape pressed");
                            }
                            state.key_state.press_key(game_key);
                        }
                        ElementState::Released => state.key_state.release_key(game_key),
                    }
                }
            }

            WindowEvent::MouseInput {
                state: mouse_state,
                button: MouseButton::Left,
                ..
            } => match mouse_state {
                ElementState::Pressed => {
                    state.key_state.press_key(GameKey::Look);
                    Self::set_look_capture(&state.window, true);
                }
                ElementState::Released => {
                    state.key_state.release_key(GameKey::Look);
                    Self::set_look_capture(&state.window, false);
                }
            },

            WindowEvent::RedrawRequested => match state.redraw() {
                Ok(FrameOutcome::Continue) => {}
                Ok(FrameOutcome::Quit) => {
                    info!("quit requested, leaving after the finished frame");
                    event_loop.exit();
                }
                Err(err) => self.fail(event_loop, err),
            },

            _ => {}
        }
    }

    /// Paces redraws to the frame budget and forwards Ctrl-C as a quit request.
    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(state) = self.state.as_mut() else {
            if self.shutdown.load(Ordering::SeqCst) {
                event_loop.exit();
            }
            return;
        };

        if self.shutdown.load(Ordering::SeqCst) && !state.key_state.quit_requested() {
            info!("interrupt received");
            state.key_state.request_quit();
        }

        let now = Instant::now();
        if now >= self.next_frame {
            state.window.request_redraw();
            self.next_frame = now + self.frame_budget;
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.next_frame));
    }
}
