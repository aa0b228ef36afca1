//! Maze grid and generation.
//!
//! [`Grid`] is the square wall/open matrix the rest of the game reads. It is produced by
//! [`generator::generate`] and replaced wholesale whenever a maze is cleared.
//!
//! Grid coordinates map onto the world XZ plane: columns run along +X and rows along +Z, with
//! the grid centred on the world origin. [`Grid::cell_center`] and [`Grid::world_to_cell`] are
//! exact inverses for any point inside a cell.

pub mod generator;
mod grid;

pub use grid::{Cell, CellState, Grid};
