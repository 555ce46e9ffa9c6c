use core::fmt;
use grid_util::grid::{BoolGrid, Grid};
use itertools::Itertools;
use log::debug;
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

use crate::{Cell, PathError, Result, DEFAULT_GRID_SIZE, N_SMALLVEC_SIZE};

/// [PathingGrid] is a square grid of cells that are either blocked or passable. Blocked cells are
/// stored as [true] in the underlying [BoolGrid]. Connected components of passable cells are
/// maintained in a [UnionFind] so that callers can cheaply ask whether two cells are connected.
///
/// Adjacency is never stored; it is derived from the bounds and the current passability whenever
/// it is asked for, so it stays correct after edits.
#[derive(Clone, Debug)]
pub struct PathingGrid {
    pub grid: BoolGrid,
    pub components: UnionFind<usize>,
    pub components_dirty: bool,
    size: usize,
}

impl Default for PathingGrid {
    fn default() -> PathingGrid {
        PathingGrid::new(DEFAULT_GRID_SIZE)
    }
}

impl PathingGrid {
    /// Creates a `size` by `size` grid on which every cell is passable.
    pub fn new(size: usize) -> PathingGrid {
        let mut pathing_grid = PathingGrid {
            grid: BoolGrid::new(size, size, false),
            components: UnionFind::new(size * size),
            components_dirty: true,
            size,
        };
        pathing_grid.generate_components();
        pathing_grid
    }

    /// Side length of the grid.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.row < self.size && cell.col < self.size
    }

    fn check_bounds(&self, cell: Cell) -> Result<()> {
        if self.in_bounds(cell) {
            Ok(())
        } else {
            Err(PathError::OutOfRange {
                cell,
                size: self.size,
            })
        }
    }

    fn blocked(&self, cell: Cell) -> bool {
        self.grid.get(cell.col, cell.row)
    }

    fn get_ix(&self, cell: Cell) -> usize {
        cell.row * self.size + cell.col
    }

    pub(crate) fn can_move_to(&self, cell: Cell) -> bool {
        self.in_bounds(cell) && !self.blocked(cell)
    }

    pub fn is_passable(&self, cell: Cell) -> Result<bool> {
        self.check_bounds(cell)?;
        Ok(!self.blocked(cell))
    }

    /// Marks a cell as passable or as a barrier. Joins newly connected components and flags the
    /// components as dirty if they are (potentially) broken apart into multiple.
    pub fn set_passable(&mut self, cell: Cell, passable: bool) -> Result<()> {
        self.check_bounds(cell)?;
        let was_passable = !self.blocked(cell);
        self.grid.set(cell.col, cell.row, !passable);
        if was_passable && !passable {
            self.components_dirty = true;
        } else if passable {
            let cell_ix = self.get_ix(cell);
            for n in self.neighborhood(cell) {
                let n_ix = self.get_ix(n);
                self.components.union(cell_ix, n_ix);
            }
        }
        Ok(())
    }

    /// Sets the passability of every cell in the `rows` by `cols` rectangle whose top-left
    /// corner is `top_left`. Nothing is changed if part of the rectangle is outside the grid.
    pub fn set_rect(&mut self, top_left: Cell, rows: usize, cols: usize, passable: bool) -> Result<()> {
        if rows == 0 || cols == 0 {
            return Ok(());
        }
        self.check_bounds(Cell::new(top_left.row + rows - 1, top_left.col + cols - 1))?;
        for row in top_left.row..top_left.row + rows {
            for col in top_left.col..top_left.col + cols {
                self.set_passable(Cell::new(row, col), passable)?;
            }
        }
        Ok(())
    }

    /// Passable orthogonal neighbours of an in-bounds cell, in the order down, up, right, left.
    pub(crate) fn neighborhood(&self, cell: Cell) -> SmallVec<[Cell; N_SMALLVEC_SIZE]> {
        cell.neumann_neighborhood(self.size)
            .into_iter()
            .filter(|n| !self.blocked(*n))
            .collect()
    }

    /// The passable cells orthogonally adjacent to `cell`, ordered down, up, right, left.
    pub fn neighbors(&self, cell: Cell) -> Result<SmallVec<[Cell; N_SMALLVEC_SIZE]>> {
        self.check_bounds(cell)?;
        Ok(self.neighborhood(cell))
    }

    /// Checks that `path` can be walked from `start`: every step moves to an orthogonally
    /// adjacent cell and never enters a barrier.
    pub fn is_valid_path(&self, start: Cell, path: &[Cell]) -> bool {
        self.in_bounds(start)
            && path.iter().all(|&cell| self.can_move_to(cell))
            && std::iter::once(&start)
                .chain(path)
                .tuple_windows()
                .all(|(a, b)| a.is_adjacent(b))
    }

    /// Retrieves the component id a given [Cell] belongs to.
    pub fn get_component(&self, cell: Cell) -> Result<usize> {
        self.check_bounds(cell)?;
        Ok(self.components.find(self.get_ix(cell)))
    }

    /// Checks if start and goal are on the same component. Out-of-bounds cells and barriers are
    /// never reachable. Returns [None] while the components are dirty; call
    /// [update](Self::update) after placing barriers.
    pub fn reachable(&self, start: Cell, goal: Cell) -> Option<bool> {
        if self.components_dirty {
            return None;
        }
        Some(
            self.can_move_to(start)
                && self.can_move_to(goal)
                && self
                    .components
                    .equiv(self.get_ix(start), self.get_ix(goal)),
        )
    }

    /// Checks if start and goal are not on the same component, see [reachable](Self::reachable).
    pub fn unreachable(&self, start: Cell, goal: Cell) -> Option<bool> {
        self.reachable(start, goal).map(|reachable| !reachable)
    }

    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            self.generate_components();
        }
    }

    /// Generates a new [UnionFind] structure and links up grid neighbours to the same components.
    pub fn generate_components(&mut self) {
        debug!("Generating connected components for {0}x{0} grid", self.size);
        self.components = UnionFind::new(self.size * self.size);
        self.components_dirty = false;
        for row in 0..self.size {
            for col in 0..self.size {
                let cell = Cell::new(row, col);
                if self.blocked(cell) {
                    continue;
                }
                let cell_ix = self.get_ix(cell);
                // Joining down and right covers every edge once
                for n in [Cell::new(row + 1, col), Cell::new(row, col + 1)] {
                    if self.can_move_to(n) {
                        let n_ix = self.get_ix(n);
                        self.components.union(cell_ix, n_ix);
                    }
                }
            }
        }
    }
}

impl fmt::Display for PathingGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in 0..self.size {
            let line = (0..self.size)
                .map(|col| if self.blocked(Cell::new(row, col)) { '#' } else { '.' })
                .collect::<String>();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
