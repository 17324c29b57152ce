use crate::cell::Cell;
use crate::frontier::{FifoFrontier, Frontier};
use crate::solver::GridSolver;

/// Breadth-first search: expands cells in the order they were discovered.
#[derive(Clone, Copy, Debug, Default)]
pub struct BfsSolver;

impl GridSolver for BfsSolver {
    fn frontier(&self) -> Box<dyn Frontier> {
        Box::new(FifoFrontier::default())
    }

    fn tracks_cost(&self) -> bool {
        false
    }

    fn heuristic(&self, _: &Cell, _: &Cell) -> u32 {
        0
    }
}
