use crate::math::Vec3;

/// Represents a cell in the maze grid
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    /// Row index of the cell (world Z axis)
    pub row: usize,
    /// Column index of the cell (world X axis)
    pub col: usize,
}

impl Cell {
    /// Creates a new Cell with the given coordinates
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// State of a single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellState {
    Wall,
    Open,
}

/// Square matrix of wall and open cells.
///
/// The edge length is odd so that carving always lands on odd coordinates. Cells are stored
/// row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    cells: Vec<CellState>,
}

impl Grid {
    /// Creates a grid where every cell is a wall.
    pub fn filled(size: usize) -> Self {
        Self {
            size,
            cells: vec![CellState::Wall; size * size],
        }
    }

    /// Edge length in cells.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Interior cell where carving begins and the player spawns.
    pub fn start(&self) -> Cell {
        Cell::new(1, 1)
    }

    /// Breach on the left edge beside the start cell.
    pub fn entrance(&self) -> Cell {
        Cell::new(1, 0)
    }

    /// Breach on the right edge beside the far corner.
    pub fn exit(&self) -> Cell {
        Cell::new(self.size - 2, self.size - 1)
    }

    /// Returns the state of `cell`, or `None` outside the grid.
    pub fn get(&self, cell: Cell) -> Option<CellState> {
        if cell.row < self.size && cell.col < self.size {
            Some(self.cells[cell.row * self.size + cell.col])
        } else {
            None
        }
    }

    pub fn is_open(&self, cell: Cell) -> bool {
        self.get(cell) == Some(CellState::Open)
    }

    pub fn is_wall(&self, cell: Cell) -> bool {
        self.get(cell) == Some(CellState::Wall)
    }

    pub(crate) fn set(&mut self, cell: Cell, state: CellState) {
        if cell.row < self.size && cell.col < self.size {
            self.cells[cell.row * self.size + cell.col] = state;
        }
    }

    /// Iterates every cell in row-major order alongside its state.
    pub fn cells(&self) -> impl Iterator<Item = (Cell, CellState)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, &state)| (Cell::new(i / self.size, i % self.size), state))
    }

    pub fn open_count(&self) -> usize {
        self.cells.iter().filter(|&&s| s == CellState::Open).count()
    }

    /// Open cells sharing an edge with `cell`.
    pub fn open_neighbors(&self, cell: Cell) -> impl Iterator<Item = Cell> + '_ {
        const OFFSETS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
        OFFSETS.into_iter().filter_map(move |(dr, dc)| {
            let row = cell.row.checked_add_signed(dr)?;
            let col = cell.col.checked_add_signed(dc)?;
            let next = Cell::new(row, col);
            self.is_open(next).then_some(next)
        })
    }

    /// Half of the grid's world-space extent.
    fn half_extent(&self, cell_size: f32) -> f32 {
        self.size as f32 * cell_size / 2.0
    }

    /// World-space centre of `cell` at height `y`.
    ///
    /// # Arguments
    /// * `cell` - Grid coordinate to convert
    /// * `cell_size` - Edge length of one cell in world units
    /// * `y` - Height of the returned point
    pub fn cell_center(&self, cell: Cell, cell_size: f32, y: f32) -> Vec3 {
        let half = self.half_extent(cell_size);
        Vec3::new(
            (cell.col as f32 + 0.5) * cell_size - half,
            y,
            (cell.row as f32 + 0.5) * cell_size - half,
        )
    }

    /// Maps a world XZ position onto the grid.
    ///
    /// Uses floor division so positions just outside the near edge fall outside the grid
    /// instead of truncating onto row or column zero.
    ///
    /// # Returns
    /// * `Some(Cell)` for positions over the grid.
    /// * `None` for positions outside it.
    pub fn world_to_cell(&self, x: f32, z: f32, cell_size: f32) -> Option<Cell> {
        let half = self.half_extent(cell_size);
        let col = ((x + half) / cell_size).floor();
        let row = ((z + half) / cell_size).floor();
        let limit = self.size as f32;
        if !(0.0..limit).contains(&col) || !(0.0..limit).contains(&row) {
            return None;
        }
        Some(Cell::new(row as usize, col as usize))
    }
}

#[cfg(test)]
impl Grid {
    /// Every open cell reachable from `origin` through edge-adjacent open cells.
    pub fn reachable_from(&self, origin: Cell) -> std::collections::HashSet<Cell> {
        let mut seen = std::collections::HashSet::new();
        if !self.is_open(origin) {
            return seen;
        }
        let mut queue = std::collections::VecDeque::from([origin]);
        seen.insert(origin);
        while let Some(cell) = queue.pop_front() {
            for next in self.open_neighbors(cell) {
                if seen.insert(next) {
                    queue.push_back(next);
                }
            }
        }
        seen
    }
}
