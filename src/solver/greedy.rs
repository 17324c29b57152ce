use crate::cell::Cell;
use crate::frontier::{Frontier, MinKeyFrontier};
use crate::solver::GridSolver;

/// Greedy best-first search: always expands the discovered cell that looks closest to the goal.
/// The key of a cell never changes, so there is nothing to relax and no cost is tracked.
#[derive(Clone, Copy, Debug, Default)]
pub struct GreedySolver;

impl GridSolver for GreedySolver {
    fn frontier(&self) -> Box<dyn Frontier> {
        Box::new(MinKeyFrontier::default())
    }

    fn tracks_cost(&self) -> bool {
        false
    }

    fn heuristic(&self, p1: &Cell, p2: &Cell) -> u32 {
        p1.manhattan_distance(p2)
    }

    fn score(&self, _cost: u32, cell: &Cell, goal: &Cell) -> Option<u32> {
        Some(self.heuristic(cell, goal))
    }
}
