//! Keyboard and mouse input handling for the game.
//!
//! This module defines the [`GameKey`] enum for abstracting game actions from physical keys,
//! and provides [`KeyState`] for tracking pressed keys and decoding them into an
//! [`InputIntent`] once per frame.

use std::collections::HashSet;

use winit::keyboard;

use crate::game::input::InputIntent;

/// In-game actions that can be triggered by keyboard or mouse input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameKey {
    /// Left mouse button, enables look while held.
    Look,
    /// Move forward (W or Up Arrow).
    MoveForward,
    /// Move backward (S or Down Arrow).
    MoveBackward,
    /// Strafe left (A or Left Arrow).
    MoveLeft,
    /// Strafe right (D or Right Arrow).
    MoveRight,
    /// Jump, also starts the game (Space).
    Jump,
    /// Leave the game (Escape).
    Quit,
}

/// Tracks pressed keys, buffered mouse motion and a pending quit request.
#[derive(Debug, Default)]
pub struct KeyState {
    /// Set of currently pressed keys.
    pub pressed_keys: HashSet<GameKey>,
    look_delta: [f32; 2],
    quit: bool,
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a key as pressed.
    pub fn press_key(&mut self, key: GameKey) {
        if key == GameKey::Quit {
            self.quit = true;
        }
        self.pressed_keys.insert(key);
    }

    /// Marks a key as released.
    pub fn release_key(&mut self, key: GameKey) {
        self.pressed_keys.remove(&key);
    }

    /// Checks if a key is currently pressed.
    pub fn is_pressed(&self, key: GameKey) -> bool {
        self.pressed_keys.contains(&key)
    }

    /// Buffers raw mouse motion. Ignored unless look is held.
    pub fn add_mouse_motion(&mut self, dx: f64, dy: f64) {
        if self.is_pressed(GameKey::Look) {
            self.look_delta[0] += dx as f32;
            self.look_delta[1] += dy as f32;
        }
    }

    /// Buffers a quit request from outside the keyboard.
    pub fn request_quit(&mut self) {
        self.quit = true;
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    /// Decodes the current state into this frame's intent and drains buffered look motion.
    pub fn intent(&mut self) -> InputIntent {
        let axis = |positive: GameKey, negative: GameKey| {
            match (self.is_pressed(positive), self.is_pressed(negative)) {
                (true, false) => 1.0,
                (false, true) => -1.0,
                _ => 0.0,
            }
        };
        let intent = InputIntent {
            forward: axis(GameKey::MoveForward, GameKey::MoveBackward),
            strafe: axis(GameKey::MoveRight, GameKey::MoveLeft),
            look_delta: self.look_delta,
            jump: self.is_pressed(GameKey::Jump),
            quit: self.quit,
        };
        self.look_delta = [0.0, 0.0];
        intent
    }
}

macro_rules! match_char_key {
    ($c:expr, {
        $($key:literal => $variant:expr),* $(,)?
    }) => {{
        match $c.to_ascii_lowercase().as_str() {
            $($key => Some($variant),)*
            _ => None,
        }
    }};
}

macro_rules! match_named_key {
    ($k:expr, {
        $($key:ident => $variant:expr),* $(,)?
    }) => {{
        match $k {
            $(winit::keyboard::NamedKey::$key => Some($variant),)*
            _ => None,
        }
    }};
}

/// Converts a winit [`keyboard::Key`] to a [`GameKey`] if it matches a mapped action.
///
/// # Returns
/// * `Some(GameKey)` if the key maps to a game action.
/// * `None` otherwise.
pub fn winit_key_to_game_key(key: &keyboard::Key) -> Option<GameKey> {
    match key {
        keyboard::Key::Named(named) => match_named_key!(named, {
            ArrowUp => GameKey::MoveForward,
            ArrowDown => GameKey::MoveBackward,
            ArrowLeft => GameKey::MoveLeft,
            ArrowRight => GameKey::MoveRight,
            Space => GameKey::Jump,
            Escape => GameKey::Quit,
        }),

        keyboard::Key::Character(c) => match_char_key!(c, {
            "w" => GameKey::MoveForward,
            "s" => GameKey::MoveBackward,
            "a" => GameKey::MoveLeft,
            "d" => GameKey::MoveRight,
        }),

        _ => None,
    }
}
