use smallvec::SmallVec;

use crate::{solver::GridSolver, Cell, PathingGrid, N_SMALLVEC_SIZE, STEP_COST};

/// Uninformed search. Explores in rings around the start, which makes it a slow but simple
/// reference for the lengths [AstarSolver](crate::solver::astar::AstarSolver) produces.
#[derive(Clone, Debug, Default)]
pub struct DijkstraSolver;

impl DijkstraSolver {
    pub fn new() -> DijkstraSolver {
        DijkstraSolver
    }
}

impl GridSolver for DijkstraSolver {
    type Successors = SmallVec<[(Cell, u32); N_SMALLVEC_SIZE]>;

    fn successors(&self, grid: &PathingGrid, node: &Cell) -> Self::Successors {
        grid.neighborhood(*node)
            .into_iter()
            .map(|n| (n, STEP_COST))
            .collect()
    }

    fn heuristic(&self, _: &Cell, _: &Cell) -> u32 {
        0
    }
}
