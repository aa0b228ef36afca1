//! Application module.
//!
//! This module is the windowing collaborator: it owns the winit event loop, decodes raw input
//! into per-frame intents and drives the game loop once per redraw.
//!
//! # Module Structure
//!
//! - [`app_state`]: Contains the [`AppState`] struct which holds all per-window state
//! - [`event_handler`]: Contains the [`App`] struct and event handling logic
//! - [`keys`]: Key mapping and the input state decoded into [`crate::game::input::InputIntent`]
//!
//! # Event Flow
//!
//! 1. **Input Events**: Window and device events update the [`keys::KeyState`]
//! 2. **Pacing**: `about_to_wait` requests a redraw once per frame budget
//! 3. **Frame**: a redraw decodes input, advances the game loop and renders its scene
//!
//! Everything runs on the event loop thread; the only cross-thread signal is the Ctrl-C flag.

pub mod app_state;
pub mod event_handler;
pub mod keys;

pub use app_state::AppState;
pub use event_handler::App;
