//! Renderer-agnostic description of one frame.
//!
//! The game loop builds a [`Scene`] from the [`World`] after simulating and hands it to a
//! [`SceneSink`]. Nothing here knows about GPUs or windows; the renderer decides how boxes and
//! camera specs become pixels.

use crate::config::constants;
use crate::game::World;
use crate::maze::CellState;
use crate::math::Vec3;

/// Edge length of the ground slab, wide enough to reach the horizon under the starfield.
const GROUND_EXTENT: f32 = 1000.0;
const GROUND_THICKNESS: f32 = 0.1;

/// Camera placement as a look-at triple.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LookAt {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
}

/// Axis-aligned box for one wall cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallBox {
    pub center: Vec3,
    pub size: Vec3,
}

/// Pose of a live item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemPose {
    pub position: Vec3,
    /// Degrees about +Y.
    pub spin: f32,
}

/// Everything a renderer needs to draw a frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    /// Thin slab whose top face is the floor at `y = 0`.
    pub ground: WallBox,
    pub walls: Vec<WallBox>,
    /// Live items only.
    pub items: Vec<ItemPose>,
    /// Avatar position and heading.
    pub player: Vec3,
    pub player_yaw: f32,
    pub camera: LookAt,
    /// Seconds since the session started, for ambient effects.
    pub elapsed: f32,
    pub collected: usize,
    pub total: usize,
    /// `false` while waiting at the start gate.
    pub started: bool,
}

impl Scene {
    /// Snapshots `world` for rendering.
    pub fn from_world(world: &World, cell_size: f32, elapsed: f32, started: bool) -> Self {
        let half_height = constants::WALL_HEIGHT / 2.0;
        let walls = world
            .grid
            .cells()
            .filter(|&(_, state)| state == CellState::Wall)
            .map(|(cell, _)| WallBox {
                center: world.grid.cell_center(cell, cell_size, half_height),
                size: Vec3::new(cell_size, constants::WALL_HEIGHT, cell_size),
            })
            .collect();

        let items = world
            .items
            .iter()
            .filter(|item| !item.collected)
            .map(|item| ItemPose {
                position: item.position,
                spin: item.spin,
            })
            .collect();

        Self {
            ground: WallBox {
                center: Vec3::new(0.0, -GROUND_THICKNESS / 2.0, 0.0),
                size: Vec3::new(GROUND_EXTENT, GROUND_THICKNESS, GROUND_EXTENT),
            },
            walls,
            items,
            player: world.player.position,
            player_yaw: world.player.yaw,
            camera: world.player.camera(),
            elapsed,
            collected: world.collected,
            total: world.total,
            started,
        }
    }
}

/// Consumer of finished frames.
pub trait SceneSink {
    type Error;

    /// Draws or records `scene`.
    fn submit(&mut self, scene: &Scene) -> Result<(), Self::Error>;
}
