use std::ops::ControlFlow;

use log::{debug, info};

use crate::search::astar_observed;
use crate::{Cell, PathError, PathResult, PathingGrid, Result, SearchEvent};

pub mod astar;
pub mod dijkstra;

pub trait GridSolver {
    type Successors: IntoIterator<Item = (Cell, u32)>;

    /// Lower bound on the cost of moving from `p1` to `p2`.
    fn heuristic(&self, p1: &Cell, p2: &Cell) -> u32;

    fn successors(&self, grid: &PathingGrid, node: &Cell) -> Self::Successors;

    /// Computes a shortest path from `start` to `end`, reporting progress to `on_step` after every
    /// change to the open or closed set. Returning [ControlFlow::Break] from `on_step` cancels the
    /// search. The returned path excludes `start` and ends with `end`.
    ///
    /// Fails with [PathError::InvalidEndpoints] before doing any work if either endpoint is
    /// outside the grid, is a barrier, or if they coincide.
    fn find_path<F>(
        &self,
        grid: &PathingGrid,
        start: Cell,
        end: Cell,
        on_step: F,
    ) -> Result<PathResult>
    where
        F: FnMut(SearchEvent) -> ControlFlow<()>,
    {
        validate_endpoints(grid, start, end)?;
        debug!(
            "Searching from {} to {} on a {}x{} grid",
            start,
            end,
            grid.size(),
            grid.size()
        );
        let result = astar_observed(
            &start,
            &end,
            |node| self.successors(grid, node),
            |node| self.heuristic(node, &end),
            on_step,
        );
        match &result {
            PathResult::Found(path) => info!("Path from {} to {} has {} steps", start, end, path.len()),
            PathResult::NotFound => info!("No path from {} to {}", start, end),
            PathResult::Cancelled => info!("Search from {} to {} was cancelled", start, end),
        }
        Ok(result)
    }

    /// [find_path](Self::find_path) without an observer.
    fn find_path_unobserved(&self, grid: &PathingGrid, start: Cell, end: Cell) -> Result<PathResult> {
        self.find_path(grid, start, end, |_| ControlFlow::Continue(()))
    }

    /// Number of moves along a path as returned by [find_path](Self::find_path).
    fn get_path_cost(&self, path: &[Cell]) -> u32 {
        path.len() as u32 * crate::STEP_COST
    }
}

fn validate_endpoints(grid: &PathingGrid, start: Cell, end: Cell) -> Result<()> {
    for (name, cell) in [("start", start), ("end", end)] {
        if !grid.in_bounds(cell) {
            return Err(PathError::InvalidEndpoints(format!(
                "{} {} is outside the {}x{} grid",
                name,
                cell,
                grid.size(),
                grid.size()
            )));
        }
        if !grid.can_move_to(cell) {
            return Err(PathError::InvalidEndpoints(format!(
                "{} {} is a barrier",
                name, cell
            )));
        }
    }
    if start == end {
        return Err(PathError::InvalidEndpoints(format!(
            "start and end are both {}",
            start
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::astar::AstarSolver;

    fn invalid(result: Result<PathResult>) -> bool {
        matches!(result, Err(PathError::InvalidEndpoints(_)))
    }

    #[test]
    fn rejects_bad_endpoints() {
        let mut grid = PathingGrid::new(3);
        grid.set_passable(Cell::new(1, 1), false).unwrap();
        let solver = AstarSolver::new();
        let corner = Cell::new(0, 0);
        assert!(invalid(solver.find_path_unobserved(&grid, corner, corner)));
        assert!(invalid(solver.find_path_unobserved(&grid, corner, Cell::new(1, 1))));
        assert!(invalid(solver.find_path_unobserved(&grid, Cell::new(1, 1), corner)));
        assert!(invalid(solver.find_path_unobserved(&grid, corner, Cell::new(0, 3))));
        assert!(invalid(solver.find_path_unobserved(&grid, Cell::new(9, 9), corner)));
    }

    #[test]
    fn rejection_happens_before_observing() {
        let grid = PathingGrid::new(3);
        let mut calls = 0;
        let result = AstarSolver::new().find_path(&grid, Cell::new(2, 2), Cell::new(2, 2), |_| {
            calls += 1;
            ControlFlow::Continue(())
        });
        assert!(invalid(result));
        assert_eq!(calls, 0);
    }

    #[test]
    fn error_messages_name_the_cell() {
        let grid = PathingGrid::new(3);
        let err = AstarSolver::new()
            .find_path_unobserved(&grid, Cell::new(0, 0), Cell::new(3, 1))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid endpoints: end (3, 1) is outside the 3x3 grid"
        );
    }
}
