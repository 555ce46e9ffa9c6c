//! # grid_astar
//!
//! Shortest paths on a square, 4-connected grid of passable cells and barriers using
//! [A*](https://en.wikipedia.org/wiki/A*_search_algorithm) with the
//! [Manhattan distance](https://en.wikipedia.org/wiki/Taxicab_geometry) as heuristic. All moves
//! cost the same.
//!
//! The search can be watched: every cell that enters the open set, every cell that is expanded
//! and every cell of the final path is reported to a callback as a [SearchEvent], and the
//! callback can cancel the run by returning [ControlFlow::Break](std::ops::ControlFlow::Break).
//! Ties between cells with equal estimated cost are broken by the order in which they were
//! queued, so identical inputs always produce identical paths.
//!
//! ```
//! use grid_astar::{find_path, Cell, PathingGrid, PathResult};
//! use std::ops::ControlFlow;
//!
//! let mut grid = PathingGrid::new(3);
//! grid.set_passable(Cell::new(1, 0), false).unwrap();
//! let result = find_path(&grid, Cell::new(0, 0), Cell::new(2, 0), |_| ControlFlow::Continue(())).unwrap();
//! assert!(matches!(result, PathResult::Found(path) if path.len() == 4));
//! ```
pub mod board;
pub mod cell;
pub mod error;
pub mod pathing_grid;
pub mod search;
pub mod solver;

use std::ops::ControlFlow;

pub use board::Board;
pub use cell::{Cell, CellState};
pub use error::{PathError, Result};
pub use pathing_grid::PathingGrid;
pub use search::{PathResult, SearchEvent};
pub use solver::{astar::AstarSolver, dijkstra::DijkstraSolver, GridSolver};

/// Side length of a grid built with [Default].
pub const DEFAULT_GRID_SIZE: usize = 50;
/// Cost of a single orthogonal move.
pub const STEP_COST: u32 = 1;
/// A cell has at most 4 neighbours.
pub const N_SMALLVEC_SIZE: usize = 4;

/// Finds a shortest path with [AstarSolver], see [GridSolver::find_path].
pub fn find_path<F>(grid: &PathingGrid, start: Cell, end: Cell, on_step: F) -> Result<PathResult>
where
    F: FnMut(SearchEvent) -> ControlFlow<()>,
{
    AstarSolver::new().find_path(grid, start, end, on_step)
}
