use crate::cell::Cell;
use crate::frontier::{Frontier, LifoFrontier};
use crate::solver::GridSolver;

/// Depth-first search: always expands the most recently discovered cell. Finds a path whenever
/// one exists, but not necessarily a short one.
#[derive(Clone, Copy, Debug, Default)]
pub struct DfsSolver;

impl GridSolver for DfsSolver {
    fn frontier(&self) -> Box<dyn Frontier> {
        Box::new(LifoFrontier::default())
    }

    fn tracks_cost(&self) -> bool {
        false
    }

    fn heuristic(&self, _: &Cell, _: &Cell) -> u32 {
        0
    }
}
