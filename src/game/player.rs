//! Player state and movement logic.
//!
//! This module defines [`PlayerState`], which tracks the player's position, vertical motion and
//! look direction, and integrates one frame of input against the maze.
//!
//! # Overview
//!
//! Each [`PlayerState::step`]:
//! - Turns the forward/strafe intent into a displacement rotated by the camera yaw
//! - Applies the X and Z parts separately, each only if the [`CollisionOracle`] allows it, so
//!   the player slides along walls instead of stopping dead on a diagonal
//! - Starts a jump when grounded and asked to
//! - Integrates gravity, then height, then clamps to the ground
//!
//! # Coordinate System
//!
//! Right-handed, Y up. At yaw 0 the player faces -Z and strafes along +X. Angles are in degrees:
//! - **Yaw**: grows turning right, unbounded
//! - **Pitch**: clamped to ±89°

use crate::config::{GameConfig, constants};
use crate::game::collision::CollisionOracle;
use crate::game::input::InputIntent;
use crate::game::scene::LookAt;
use crate::maze::Grid;
use crate::math::{Vec3, deg_to_rad};

/// Mutable state of the player character.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerState {
    /// World position; `y` is the height of the player's feet plus the ground offset.
    pub position: Vec3,
    /// Vertical velocity in units per second.
    pub vertical_velocity: f32,
    /// Standing on the ground and able to jump.
    pub grounded: bool,
    /// Horizontal look angle in degrees.
    pub yaw: f32,
    /// Vertical look angle in degrees.
    pub pitch: f32,
}

impl PlayerState {
    /// Creates a player standing at the centre of the grid's start cell.
    pub fn spawn(grid: &Grid, config: &GameConfig) -> Self {
        Self {
            position: grid.cell_center(grid.start(), config.cell_size, config.ground_height),
            vertical_velocity: 0.0,
            grounded: true,
            yaw: 0.0,
            pitch: constants::INITIAL_PITCH,
        }
    }

    /// Moves the player back to the start cell of `grid`, keeping the look direction.
    pub fn rehome(&mut self, grid: &Grid, config: &GameConfig) {
        self.position = grid.cell_center(grid.start(), config.cell_size, config.ground_height);
        self.vertical_velocity = 0.0;
        self.grounded = true;
    }

    /// Applies a mouse delta to the look direction.
    ///
    /// # Arguments
    /// * `delta` - Pixel movement `[dx, dy]`; positive `dx` turns right, positive `dy` looks down
    /// * `sensitivity` - Degrees per pixel
    pub fn apply_look(&mut self, delta: [f32; 2], sensitivity: f32) {
        self.yaw += delta[0] * sensitivity;
        self.pitch -= delta[1] * sensitivity;
        self.pitch = self
            .pitch
            .clamp(-constants::PITCH_LIMIT, constants::PITCH_LIMIT);
    }

    /// Integrates one frame of movement, jumping and gravity.
    ///
    /// # Arguments
    /// * `oracle` - Collision queries for the current maze
    /// * `input` - This frame's intent; axes outside `[-1, 1]` are clamped
    /// * `config` - Speeds, gravity and ground height
    /// * `dt` - Frame time in seconds
    pub fn step(
        &mut self,
        oracle: &CollisionOracle<'_>,
        input: &InputIntent,
        config: &GameConfig,
        dt: f32,
    ) {
        let input = input.clamped();
        let (dx, dz) = self.displacement(input.forward, input.strafe, config.move_speed * dt);

        if dx != 0.0 && !oracle.is_blocked(self.position.x + dx, self.position.z, self.position.y)
        {
            self.position.x += dx;
        }
        if dz != 0.0 && !oracle.is_blocked(self.position.x, self.position.z + dz, self.position.y)
        {
            self.position.z += dz;
        }

        if input.jump && self.grounded {
            self.vertical_velocity = config.jump_impulse;
            self.grounded = false;
        }

        self.vertical_velocity += config.gravity * dt;
        self.position.y += self.vertical_velocity * dt;

        if self.position.y <= config.ground_height {
            self.position.y = config.ground_height;
            self.vertical_velocity = 0.0;
            self.grounded = true;
        }
    }

    /// Rotates a local (forward, strafe) intent by the yaw into a world XZ displacement.
    fn displacement(&self, forward: f32, strafe: f32, distance: f32) -> (f32, f32) {
        // Local frame: +X right, -Z forward.
        let local_x = strafe * distance;
        let local_z = -forward * distance;
        let (sin, cos) = deg_to_rad(self.yaw).sin_cos();
        (
            local_x * cos - local_z * sin,
            local_x * sin + local_z * cos,
        )
    }

    /// Third-person camera behind the player, orbiting with yaw and pitch.
    pub fn camera(&self) -> LookAt {
        let (yaw_sin, yaw_cos) = deg_to_rad(self.yaw).sin_cos();
        let (pitch_sin, pitch_cos) = deg_to_rad(self.pitch).sin_cos();
        let reach = constants::CAMERA_DISTANCE * pitch_cos;
        let p = self.position;

        LookAt {
            eye: Vec3::new(
                p.x - yaw_sin * reach,
                p.y + constants::CAMERA_HEIGHT + pitch_sin * constants::CAMERA_DISTANCE,
                p.z + yaw_cos * reach,
            ),
            target: Vec3::new(p.x, p.y + 1.0, p.z),
            up: Vec3::UP,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::{Cell, CellState};

    const DT: f32 = 1.0 / 60.0;

    /// A 7×7 grid with a straight corridor along row 3.
    fn corridor() -> (Grid, GameConfig) {
        let mut grid = Grid::filled(7);
        for col in 1..6 {
            grid.set(Cell::new(3, col), CellState::Open);
        }
        grid.set(Cell::new(1, 1), CellState::Open);
        (grid, GameConfig::with_maze(7, 0))
    }

    fn player_at(grid: &Grid, config: &GameConfig, cell: Cell) -> PlayerState {
        let mut player = PlayerState::spawn(grid, config);
        player.position = grid.cell_center(cell, config.cell_size, config.ground_height);
        player
    }

    /// Standing still on the ground is a fixed point.
    #[test]
    fn test_idle_grounded_player_is_unchanged() {
        let (grid, config) = corridor();
        let oracle = CollisionOracle::new(&grid, &config);
        let mut player = player_at(&grid, &config, Cell::new(3, 3));
        let before = player.clone();
        for _ in 0..120 {
            player.step(&oracle, &InputIntent::idle(), &config, DT);
        }
        assert_eq!(player, before);
    }

    /// Jumping gives upward velocity and the player lands again in bounded time.
    #[test]
    fn test_jump_rises_and_lands() {
        let (grid, config) = corridor();
        let oracle = CollisionOracle::new(&grid, &config);
        let mut player = player_at(&grid, &config, Cell::new(3, 3));
        let jump = InputIntent {
            jump: true,
            ..InputIntent::idle()
        };

        player.step(&oracle, &jump, &config, DT);
        assert!(player.vertical_velocity > 0.0);
        assert!(!player.grounded);

        let mut apex = player.position.y;
        let mut frames = 1;
        while !player.grounded {
            player.step(&oracle, &InputIntent::idle(), &config, DT);
            apex = apex.max(player.position.y);
            frames += 1;
            assert!(frames < 200, "player never landed");
        }
        assert_eq!(player.position.y, config.ground_height);
        assert_eq!(player.vertical_velocity, 0.0);
        assert!(apex > config.jump_clearance);
    }

    /// Holding jump mid-air does not re-trigger.
    #[test]
    fn test_no_double_jump() {
        let (grid, config) = corridor();
        let oracle = CollisionOracle::new(&grid, &config);
        let mut player = player_at(&grid, &config, Cell::new(3, 3));
        let jump = InputIntent {
            jump: true,
            ..InputIntent::idle()
        };
        player.step(&oracle, &jump, &config, DT);
        let first = player.vertical_velocity;
        player.step(&oracle, &jump, &config, DT);
        assert!(player.vertical_velocity < first);
    }

    /// At yaw 0 forward is -Z, at yaw 90 forward is +X.
    #[test]
    fn test_movement_follows_yaw() {
        let (grid, config) = corridor();
        let oracle = CollisionOracle::new(&grid, &config);
        let forward = InputIntent {
            forward: 1.0,
            ..InputIntent::idle()
        };

        let mut player = player_at(&grid, &config, Cell::new(3, 3));
        player.yaw = 90.0;
        let start = player.position;
        player.step(&oracle, &forward, &config, 0.1);
        assert!((player.position.x - start.x - 1.0).abs() < 1e-4);
        assert!((player.position.z - start.z).abs() < 1e-4);

        let mut player = player_at(&grid, &config, Cell::new(3, 3));
        player.yaw = 0.0;
        let start = player.position;
        player.step(&oracle, &forward, &config, 0.3);
        // Three units of -Z lands in row 2, which is wall, so the move is refused.
        assert_eq!(player.position.z, start.z);
    }

    /// A diagonal push into a wall keeps the free axis moving.
    #[test]
    fn test_slides_along_walls() {
        let (grid, config) = corridor();
        let oracle = CollisionOracle::new(&grid, &config);
        let mut player = player_at(&grid, &config, Cell::new(3, 3));
        player.yaw = 45.0;
        let start = player.position;
        // Forward at 45° pushes +X and -Z. Take a step large enough to leave row 3.
        let forward = InputIntent {
            forward: 1.0,
            ..InputIntent::idle()
        };
        player.step(&oracle, &forward, &config, 0.3);
        assert!(player.position.x > start.x);
        assert_eq!(player.position.z, start.z);
    }

    /// A jumping player clears a wall cell that blocks a grounded one.
    #[test]
    fn test_jump_carries_over_wall() {
        let (grid, config) = corridor();
        let oracle = CollisionOracle::new(&grid, &config);
        let mut player = player_at(&grid, &config, Cell::new(3, 3));
        player.position.y = config.jump_clearance + 0.5;
        player.vertical_velocity = 0.0;
        player.grounded = false;
        let forward = InputIntent {
            forward: 1.0,
            ..InputIntent::idle()
        };
        let start_z = player.position.z;
        player.step(&oracle, &forward, &config, 0.3);
        assert!(player.position.z < start_z);
    }

    #[test]
    fn test_pitch_is_clamped() {
        let (grid, config) = corridor();
        let mut player = PlayerState::spawn(&grid, &config);
        player.apply_look([10.0, -10_000.0], 0.1);
        assert_eq!(player.pitch, constants::PITCH_LIMIT);
        assert!((player.yaw - 1.0).abs() < 1e-6);
        player.apply_look([0.0, 10_000.0], 0.1);
        assert_eq!(player.pitch, -constants::PITCH_LIMIT);
    }

    /// The camera sits opposite the forward direction.
    #[test]
    fn test_camera_trails_player() {
        let (grid, config) = corridor();
        let mut player = PlayerState::spawn(&grid, &config);
        player.pitch = 0.0;
        let cam = player.camera();
        assert!((cam.eye.z - (player.position.z + constants::CAMERA_DISTANCE)).abs() < 1e-4);
        assert!((cam.eye.x - player.position.x).abs() < 1e-4);
        assert_eq!(cam.target.y, player.position.y + 1.0);
        assert_eq!(cam.up, Vec3::UP);
    }

    #[test]
    fn test_rehome_keeps_look() {
        let (grid, config) = corridor();
        let mut player = player_at(&grid, &config, Cell::new(3, 5));
        player.yaw = 123.0;
        player.position.y = 2.0;
        player.vertical_velocity = 4.0;
        player.grounded = false;
        player.rehome(&grid, &config);
        assert_eq!(
            player.position,
            grid.cell_center(grid.start(), config.cell_size, config.ground_height)
        );
        assert!(player.grounded);
        assert_eq!(player.yaw, 123.0);
    }
}
