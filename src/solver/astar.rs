use smallvec::SmallVec;

use crate::{solver::GridSolver, Cell, PathingGrid, N_SMALLVEC_SIZE, STEP_COST};

/// A* with the Manhattan distance as heuristic, which is exact on an empty 4-grid and never
/// overestimates otherwise, so the paths it finds are shortest paths.
#[derive(Clone, Debug, Default)]
pub struct AstarSolver;

impl AstarSolver {
    pub fn new() -> AstarSolver {
        AstarSolver
    }
}

impl GridSolver for AstarSolver {
    type Successors = SmallVec<[(Cell, u32); N_SMALLVEC_SIZE]>;

    fn successors(&self, grid: &PathingGrid, node: &Cell) -> Self::Successors {
        grid.neighborhood(*node)
            .into_iter()
            .map(|n| (n, STEP_COST))
            .collect()
    }

    fn heuristic(&self, p1: &Cell, p2: &Cell) -> u32 {
        p1.manhattan_distance(p2) * STEP_COST
    }
}
