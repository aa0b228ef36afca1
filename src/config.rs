//! Command line arguments and gameplay tuning.
//!
//! [`Args`] is parsed once in `main` with `clap`; it is folded into a [`GameConfig`] that every
//! simulation stage receives by reference. The tuning values in [`constants`] are coupled: the
//! jump impulse and gravity decide the apex height, and that apex has to clear
//! [`constants::JUMP_CLEARANCE`] or walls can never be hopped.

use clap::Parser;

/// Fixed tuning values for the world and the player.
pub mod constants {
    /// Edge length of one grid cell in world units.
    pub const CELL_SIZE: f32 = 4.0;
    /// Visual height of a wall block.
    pub const WALL_HEIGHT: f32 = 5.5;
    /// Below this height a wall cell blocks movement.
    pub const JUMP_CLEARANCE: f32 = 3.0;
    /// Resting height of the player.
    pub const GROUND_HEIGHT: f32 = 1.0;
    /// Downward acceleration, units per second squared.
    pub const GRAVITY: f32 = -30.0;
    /// Vertical velocity applied on jump. Apex is `GROUND_HEIGHT + v² / (2·|g|)` ≈ 4.27.
    pub const JUMP_IMPULSE: f32 = 14.0;
    /// Horizontal speed in units per second.
    pub const MOVE_SPEED: f32 = 10.0;
    /// Items strictly closer than this are collected.
    pub const PICKUP_RADIUS: f32 = 1.5;
    /// Resting height of a collectible item.
    pub const ITEM_HEIGHT: f32 = 1.5;
    /// Vertical bob amplitude of an item.
    pub const BOB_AMPLITUDE: f32 = 0.3;
    /// Bob angular frequency in radians per second.
    pub const BOB_FREQUENCY: f32 = 2.0;
    /// Item spin in degrees per second.
    pub const SPIN_RATE: f32 = 50.0;
    /// Third-person camera distance behind the player.
    pub const CAMERA_DISTANCE: f32 = 8.0;
    /// Third-person camera height above the player.
    pub const CAMERA_HEIGHT: f32 = 5.0;
    /// Pitch is clamped to ±this many degrees.
    pub const PITCH_LIMIT: f32 = 89.0;
    /// Pitch at spawn, looking slightly down.
    pub const INITIAL_PITCH: f32 = -20.0;
    /// Sampling attempts per item before it is skipped.
    pub const PLACEMENT_RETRIES: usize = 100;
    /// Longest simulated step; slower frames are clamped to this.
    pub const MAX_FRAME_DT: f32 = 0.1;
    /// Frame pacing target.
    pub const TARGET_FPS: u32 = 60;
}

/// Command line arguments.
#[derive(Parser, Debug, Clone)]
#[command(name = "maze-runner", version, about = "Explore a night-time maze and collect every item")]
pub struct Args {
    /// Maze edge length in cells. Must be odd and at least 5.
    #[arg(long, default_value_t = 25, value_parser = parse_maze_size)]
    pub size: usize,

    /// Number of items scattered per maze.
    #[arg(long, default_value_t = 30)]
    pub items: usize,

    /// Seed for a reproducible session. Entropy-seeded when omitted.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Initial window width in pixels.
    #[arg(long, default_value_t = 1280)]
    pub width: u32,

    /// Initial window height in pixels.
    #[arg(long, default_value_t = 720)]
    pub height: u32,

    /// Degrees of rotation per pixel of mouse movement.
    #[arg(long, default_value_t = 0.1)]
    pub mouse_sensitivity: f32,
}

/// Validates a maze size argument.
///
/// # Arguments
/// * `raw` - The value given on the command line.
///
/// # Returns
/// The size when it is an odd integer of at least 5, otherwise a message for clap to show.
pub fn parse_maze_size(raw: &str) -> Result<usize, String> {
    let size: usize = raw
        .parse()
        .map_err(|_| format!("`{raw}` is not a whole number"))?;
    if size < 5 {
        return Err(format!("maze size must be at least 5, got {size}"));
    }
    if size % 2 == 0 {
        return Err(format!("maze size must be odd, got {size}"));
    }
    Ok(size)
}

/// Everything the simulation needs to know about the current session.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Maze edge length in cells (odd, ≥ 5).
    pub maze_size: usize,
    /// Items requested per maze.
    pub item_count: usize,
    /// Optional RNG seed.
    pub seed: Option<u64>,
    /// Degrees per pixel of look-delta.
    pub mouse_sensitivity: f32,
    pub cell_size: f32,
    pub jump_clearance: f32,
    pub ground_height: f32,
    pub gravity: f32,
    pub jump_impulse: f32,
    pub move_speed: f32,
    pub pickup_radius: f32,
    pub item_height: f32,
    pub placement_retries: usize,
    pub max_frame_dt: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            maze_size: 25,
            item_count: 30,
            seed: None,
            mouse_sensitivity: 0.1,
            cell_size: constants::CELL_SIZE,
            jump_clearance: constants::JUMP_CLEARANCE,
            ground_height: constants::GROUND_HEIGHT,
            gravity: constants::GRAVITY,
            jump_impulse: constants::JUMP_IMPULSE,
            move_speed: constants::MOVE_SPEED,
            pickup_radius: constants::PICKUP_RADIUS,
            item_height: constants::ITEM_HEIGHT,
            placement_retries: constants::PLACEMENT_RETRIES,
            max_frame_dt: constants::MAX_FRAME_DT,
        }
    }
}

impl From<&Args> for GameConfig {
    fn from(args: &Args) -> Self {
        Self {
            maze_size: args.size,
            item_count: args.items,
            seed: args.seed,
            mouse_sensitivity: args.mouse_sensitivity,
            ..Self::default()
        }
    }
}

impl GameConfig {
    /// Returns a config for a maze of `maze_size` with `item_count` items and default tuning.
    pub fn with_maze(maze_size: usize, item_count: usize) -> Self {
        Self {
            maze_size,
            item_count,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Odd sizes from 5 upwards are accepted.
    #[test]
    fn test_parse_maze_size_accepts_odd() {
        assert_eq!(parse_maze_size("5"), Ok(5));
        assert_eq!(parse_maze_size("25"), Ok(25));
    }

    /// Even, tiny, and non-numeric sizes are rejected.
    #[test]
    fn test_parse_maze_size_rejects_invalid() {
        assert!(parse_maze_size("4").is_err());
        assert!(parse_maze_size("3").is_err());
        assert!(parse_maze_size("26").is_err());
        assert!(parse_maze_size("big").is_err());
    }

    /// Arguments flow into the config while tuning stays at defaults.
    #[test]
    fn test_args_into_config() {
        let args = Args::parse_from(["maze-runner", "--size", "9", "--items", "4", "--seed", "7"]);
        let config = GameConfig::from(&args);
        assert_eq!(config.maze_size, 9);
        assert_eq!(config.item_count, 4);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.cell_size, constants::CELL_SIZE);
    }

    /// The jump apex clears the wall threshold.
    #[test]
    fn test_jump_apex_clears_walls() {
        let config = GameConfig::default();
        let apex = config.ground_height
            + config.jump_impulse * config.jump_impulse / (2.0 * config.gravity.abs());
        assert!(apex > config.jump_clearance);
        assert!(apex < constants::WALL_HEIGHT);
    }
}
