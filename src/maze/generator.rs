//! Maze generation using randomized iterative depth-first carving.
//!
//! Odd coordinates are rooms and the cells between them are walls that may be knocked out.
//! Starting from [`Grid::start`], the carver walks to a random unvisited room two cells away,
//! opening the wall in between, and backtracks when every neighbour has been visited. The open
//! cells therefore form a spanning tree over all rooms: every open cell is reachable and there
//! are no loops. Two boundary breaches are opened afterwards.
//!
//! # Examples
//!
//! ```ignore
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let grid = generate(25, &mut rng);
//! assert!(grid.is_open(grid.start()));
//! ```

use rand::Rng;
use rand::seq::SliceRandom;
use tracing::debug;

use super::{Cell, CellState, Grid};

/// Room-to-room steps as (row, col) offsets: north, east, south, west.
const STEPS: [(isize, isize); 4] = [(-2, 0), (0, 2), (2, 0), (0, -2)];

/// Generates a perfect maze of `size × size` cells.
///
/// # Arguments
/// * `size` - Odd edge length of at least 5
/// * `rng` - Source for shuffling directions and picking among candidates
///
/// # Returns
/// A grid whose open cells form a single tree rooted at [`Grid::start`], plus the entrance and
/// exit breaches on the left and right edges.
pub fn generate<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Grid {
    debug_assert!(size >= 5 && size % 2 == 1, "maze size must be odd and >= 5");

    let mut grid = Grid::filled(size);
    let start = grid.start();
    grid.set(start, CellState::Open);

    let mut stack = vec![start];
    let mut candidates = Vec::with_capacity(STEPS.len());

    while let Some(&current) = stack.last() {
        let mut steps = STEPS;
        steps.shuffle(rng);

        candidates.clear();
        candidates.extend(
            steps
                .iter()
                .filter_map(|&step| carve_target(&grid, current, step)),
        );

        match candidates.choose(rng) {
            Some(&(next, between)) => {
                grid.set(between, CellState::Open);
                grid.set(next, CellState::Open);
                stack.push(next);
            }
            None => {
                stack.pop();
            }
        }
    }

    let entrance = grid.entrance();
    let exit = grid.exit();
    grid.set(entrance, CellState::Open);
    grid.set(exit, CellState::Open);

    debug!(size, open_cells = grid.open_count(), "maze generated");
    grid
}

/// Returns the room two cells away along `step` and the wall between, if that room lies
/// strictly inside the boundary and has not been carved yet.
fn carve_target(grid: &Grid, from: Cell, (dr, dc): (isize, isize)) -> Option<(Cell, Cell)> {
    let row = from.row.checked_add_signed(dr)?;
    let col = from.col.checked_add_signed(dc)?;
    let inner = 1..grid.size() - 1;
    if !inner.contains(&row) || !inner.contains(&col) {
        return None;
    }
    let next = Cell::new(row, col);
    if !grid.is_wall(next) {
        return None;
    }
    let between = Cell::new(
        from.row.checked_add_signed(dr / 2)?,
        from.col.checked_add_signed(dc / 2)?,
    );
    Some((next, between))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn adjacency_edges(grid: &Grid) -> usize {
        // Count each edge once by only looking right and down.
        grid.cells()
            .filter(|&(_, s)| s == CellState::Open)
            .map(|(cell, _)| {
                let right = grid.is_open(Cell::new(cell.row, cell.col + 1)) as usize;
                let down = grid.is_open(Cell::new(cell.row + 1, cell.col)) as usize;
                right + down
            })
            .sum()
    }

    /// Every open cell is reachable from the start.
    #[test]
    fn test_generated_maze_is_connected() {
        for (size, seed) in [(5, 1), (7, 2), (11, 3), (25, 4), (31, 5)] {
            let mut rng = StdRng::seed_from_u64(seed);
            let grid = generate(size, &mut rng);
            let reachable = grid.reachable_from(grid.start());
            assert_eq!(reachable.len(), grid.open_count(), "size {size}");
        }
    }

    /// Open cells and the openings between them form a tree.
    #[test]
    fn test_generated_maze_has_no_cycles() {
        for seed in 0..10 {
            let mut rng = StdRng::seed_from_u64(seed);
            let grid = generate(15, &mut rng);
            assert_eq!(adjacency_edges(&grid), grid.open_count() - 1);
        }
    }

    /// Every room is visited: k² rooms, k² - 1 carved walls, and the two breaches.
    #[test]
    fn test_every_room_is_carved() {
        let mut rng = StdRng::seed_from_u64(9);
        let size = 21;
        let grid = generate(size, &mut rng);
        let k = (size - 1) / 2;
        assert_eq!(grid.open_count(), 2 * k * k - 1 + 2);
        for row in (1..size).step_by(2) {
            for col in (1..size).step_by(2) {
                assert!(grid.is_open(Cell::new(row, col)));
            }
        }
    }

    /// The outer ring stays solid apart from the two breaches.
    #[test]
    fn test_boundary_only_breached_twice() {
        let mut rng = StdRng::seed_from_u64(11);
        let grid = generate(9, &mut rng);
        let open_border: Vec<Cell> = grid
            .cells()
            .filter(|&(c, s)| {
                s == CellState::Open
                    && (c.row == 0 || c.col == 0 || c.row == 8 || c.col == 8)
            })
            .map(|(c, _)| c)
            .collect();
        assert_eq!(open_border, vec![grid.entrance(), grid.exit()]);
    }

    /// A 5×5 maze opens all four corner-adjacent rooms.
    #[test]
    fn test_smallest_maze_layout() {
        let mut rng = StdRng::seed_from_u64(42);
        let grid = generate(5, &mut rng);
        let reachable = grid.reachable_from(grid.start());
        for room in [(1, 1), (1, 3), (3, 1), (3, 3)] {
            assert!(reachable.contains(&Cell::new(room.0, room.1)));
        }
        assert_eq!(grid.open_count(), 9);
    }

    /// Different seeds give different layouts, and the same seed the same one.
    #[test]
    fn test_seeds_drive_layout() {
        let a = generate(25, &mut StdRng::seed_from_u64(1));
        let b = generate(25, &mut StdRng::seed_from_u64(2));
        let c = generate(25, &mut StdRng::seed_from_u64(1));
        assert_ne!(a, b);
        assert_eq!(a, c);
    }
}
