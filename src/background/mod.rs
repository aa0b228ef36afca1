//! Ambient scenery drawn behind the maze.

pub mod stars;
