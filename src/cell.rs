use core::fmt;
use smallvec::SmallVec;

use crate::N_SMALLVEC_SIZE;

/// A position on a square grid, addressed by row and column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub const fn new(row: usize, col: usize) -> Cell {
        Cell { row, col }
    }

    /// The [Manhattan distance](https://en.wikipedia.org/wiki/Taxicab_geometry) between two cells,
    /// which is the exact move count on an empty 4-connected grid.
    pub fn manhattan_distance(&self, other: &Cell) -> u32 {
        (self.row.abs_diff(other.row) + self.col.abs_diff(other.col)) as u32
    }

    /// The orthogonal neighbours of this cell that lie on a grid of the given side length,
    /// ordered down, up, right, left. Passability is not considered here.
    pub fn neumann_neighborhood(&self, size: usize) -> SmallVec<[Cell; N_SMALLVEC_SIZE]> {
        let mut neighborhood = SmallVec::new();
        if self.row + 1 < size {
            neighborhood.push(Cell::new(self.row + 1, self.col));
        }
        if self.row > 0 {
            neighborhood.push(Cell::new(self.row - 1, self.col));
        }
        if self.col + 1 < size {
            neighborhood.push(Cell::new(self.row, self.col + 1));
        }
        if self.col > 0 {
            neighborhood.push(Cell::new(self.row, self.col - 1));
        }
        neighborhood
    }

    pub fn is_adjacent(&self, other: &Cell) -> bool {
        self.manhattan_distance(other) == 1
    }
}

impl From<(usize, usize)> for Cell {
    fn from((row, col): (usize, usize)) -> Self {
        Cell::new(row, col)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// What a cell currently represents to someone looking at the board. The search itself only
/// cares whether a cell is passable; everything else is bookkeeping for display.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum CellState {
    #[default]
    Empty,
    Barrier,
    Start,
    End,
    /// Discovered and waiting in the open set.
    Open,
    /// Expanded.
    Closed,
    Path,
}

impl CellState {
    pub fn is_passable(&self) -> bool {
        *self != CellState::Barrier
    }

    /// Whether this state was produced by a search run rather than by editing.
    pub fn is_search_mark(&self) -> bool {
        matches!(self, CellState::Open | CellState::Closed | CellState::Path)
    }

    pub fn symbol(&self) -> char {
        match self {
            CellState::Empty => '.',
            CellState::Barrier => '#',
            CellState::Start => 'S',
            CellState::End => 'E',
            CellState::Open => 'o',
            CellState::Closed => 'x',
            CellState::Path => '*',
        }
    }
}
