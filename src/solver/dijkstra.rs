use crate::cell::Cell;
use crate::frontier::{Frontier, MinKeyFrontier};
use crate::solver::GridSolver;

#[derive(Clone, Copy, Debug, Default)]
pub struct DijkstraSolver;

impl GridSolver for DijkstraSolver {
    fn frontier(&self) -> Box<dyn Frontier> {
        Box::new(MinKeyFrontier::default())
    }

    fn tracks_cost(&self) -> bool {
        true
    }

    /// Dijkstra has no notion of the goal's direction.
    fn heuristic(&self, _: &Cell, _: &Cell) -> u32 {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_is_cost() {
        let goal = Cell::new(9, 9);
        assert_eq!(DijkstraSolver.score(4, &Cell::new(0, 0), &goal), None);
        assert_eq!(DijkstraSolver.key(4, &Cell::new(0, 0), &goal), 4);
    }
}
