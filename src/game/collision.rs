//! Grid-based collision queries.
//!
//! Collision is a point test against the maze grid. Anything off the grid is solid. A wall cell
//! is solid only below the jump clearance height, which is what lets the player hop over walls.
//! Open cells never block.

use crate::config::GameConfig;
use crate::maze::Grid;

/// Answers "is this position blocked" for one maze.
#[derive(Debug, Clone, Copy)]
pub struct CollisionOracle<'a> {
    grid: &'a Grid,
    cell_size: f32,
    jump_clearance: f32,
}

impl<'a> CollisionOracle<'a> {
    pub fn new(grid: &'a Grid, config: &GameConfig) -> Self {
        Self {
            grid,
            cell_size: config.cell_size,
            jump_clearance: config.jump_clearance,
        }
    }

    /// Returns `true` if the player may not occupy the given world position.
    ///
    /// # Arguments
    /// * `x`, `z` - Horizontal world position
    /// * `y` - Height of the player at that position
    pub fn is_blocked(&self, x: f32, z: f32, y: f32) -> bool {
        match self.grid.world_to_cell(x, z, self.cell_size) {
            None => true,
            Some(cell) => self.grid.is_wall(cell) && y < self.jump_clearance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::{Cell, generator};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn setup() -> (Grid, GameConfig) {
        let config = GameConfig::with_maze(7, 0);
        let grid = generator::generate(7, &mut StdRng::seed_from_u64(3));
        (grid, config)
    }

    #[test]
    fn test_outside_grid_is_always_blocked() {
        let (grid, config) = setup();
        let oracle = CollisionOracle::new(&grid, &config);
        // Grid spans [-14, 14) on both axes.
        for y in [0.0, 1.0, 3.0, 100.0] {
            assert!(oracle.is_blocked(-14.5, 0.0, y));
            assert!(oracle.is_blocked(0.0, 14.0, y));
            assert!(oracle.is_blocked(40.0, -40.0, y));
        }
    }

    #[test]
    fn test_open_cell_never_blocked() {
        let (grid, config) = setup();
        let oracle = CollisionOracle::new(&grid, &config);
        let p = grid.cell_center(grid.start(), config.cell_size, 0.0);
        for y in [-5.0, 0.0, 1.0, 2.99, 3.0, 50.0] {
            assert!(!oracle.is_blocked(p.x, p.z, y));
        }
    }

    /// Wall cells block strictly below the clearance height.
    #[test]
    fn test_wall_cell_blocks_below_clearance() {
        let (grid, config) = setup();
        let oracle = CollisionOracle::new(&grid, &config);
        let corner = Cell::new(0, 0);
        assert!(grid.is_wall(corner));
        let p = grid.cell_center(corner, config.cell_size, 0.0);
        assert!(oracle.is_blocked(p.x, p.z, 1.0));
        assert!(oracle.is_blocked(p.x, p.z, 2.99));
        assert!(!oracle.is_blocked(p.x, p.z, 3.0));
        assert!(!oracle.is_blocked(p.x, p.z, 4.5));
    }
}
