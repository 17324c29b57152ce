use crate::cell::Cell;
use crate::frontier::{Frontier, MinKeyFrontier};
use crate::solver::GridSolver;
use crate::STEP_COST;

/// A*: orders by cost so far plus the Manhattan distance to the goal. With the default
/// `heuristic_factor` of 1.0 the heuristic is admissible on a 4-connected unit-cost grid, so the
/// first path to reach the goal is a shortest one.
#[derive(Clone, Debug)]
pub struct AstarSolver {
    /// Scales the heuristic. Values above 1.0 give Weighted A*, which tends to expand fewer cells
    /// but may return a longer path.
    pub heuristic_factor: f32,
}

impl AstarSolver {
    pub fn new() -> AstarSolver {
        AstarSolver {
            heuristic_factor: 1.0,
        }
    }
}

impl Default for AstarSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl GridSolver for AstarSolver {
    fn frontier(&self) -> Box<dyn Frontier> {
        Box::new(MinKeyFrontier::default())
    }

    fn tracks_cost(&self) -> bool {
        true
    }

    /// Just the Manhattan distance times the heuristic factor.
    fn heuristic(&self, p1: &Cell, p2: &Cell) -> u32 {
        ((p1.manhattan_distance(p2) * STEP_COST) as f32 * self.heuristic_factor) as u32
    }

    /// The f-score: cost so far plus the heuristic.
    fn score(&self, cost: u32, cell: &Cell, goal: &Cell) -> Option<u32> {
        Some(cost + self.heuristic(cell, goal))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn f_score() {
        let solver = AstarSolver::new();
        let goal = Cell::new(4, 4);
        assert_eq!(solver.score(3, &Cell::new(1, 2), &goal), Some(8));
        assert_eq!(solver.key(3, &Cell::new(1, 2), &goal), 8);
        assert_eq!(solver.heuristic(&goal, &goal), 0);
    }

    #[test]
    fn heuristic_factor_scales_estimate() {
        let solver = AstarSolver {
            heuristic_factor: 1.5,
        };
        assert_eq!(solver.heuristic(&Cell::new(0, 0), &Cell::new(2, 2)), 6);
    }
}
