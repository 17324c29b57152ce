use core::fmt;
use std::str::FromStr;

use crate::cell::Cell;
use crate::error::UnknownAlgorithm;
use crate::frontier::Frontier;

pub mod astar;
pub mod bfs;
pub mod dfs;
pub mod dijkstra;
pub mod greedy;

use astar::AstarSolver;
use bfs::BfsSolver;
use dfs::DfsSolver;
use dijkstra::DijkstraSolver;
use greedy::GreedySolver;

/// A search strategy: decides how the frontier is ordered and which numbers the
/// [SearchDriver](crate::search_driver::SearchDriver) keeps per cell.
pub trait GridSolver: fmt::Debug {
    /// A fresh, empty frontier with this strategy's ordering.
    fn frontier(&self) -> Box<dyn Frontier>;

    /// Whether the best known cost from the start is tracked per cell. Strategies that track
    /// cost relax: a cell is pushed again whenever a strictly cheaper way to it is found.
    /// The others only ever push a cell the first time it is discovered.
    fn tracks_cost(&self) -> bool;

    /// Estimated remaining cost from `p1` to `p2`.
    fn heuristic(&self, p1: &Cell, p2: &Cell) -> u32;

    /// The priority score recorded for a cell reached with `cost`, for strategies that keep one.
    fn score(&self, _cost: u32, _cell: &Cell, _goal: &Cell) -> Option<u32> {
        None
    }

    /// Key the cell is pushed with: the score if there is one, the cost otherwise.
    fn key(&self, cost: u32, cell: &Cell, goal: &Cell) -> u32 {
        self.score(cost, cell, goal).unwrap_or(cost)
    }
}

/// The strategies a run can be started with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Algorithm {
    BreadthFirst,
    DepthFirst,
    Dijkstra,
    Astar,
    GreedyBestFirst,
}

impl Algorithm {
    pub const ALL: [Algorithm; 5] = [
        Algorithm::BreadthFirst,
        Algorithm::DepthFirst,
        Algorithm::Astar,
        Algorithm::Dijkstra,
        Algorithm::GreedyBestFirst,
    ];

    pub fn solver(self) -> Box<dyn GridSolver> {
        match self {
            Algorithm::BreadthFirst => Box::new(BfsSolver),
            Algorithm::DepthFirst => Box::new(DfsSolver),
            Algorithm::Dijkstra => Box::new(DijkstraSolver),
            Algorithm::Astar => Box::new(AstarSolver::new()),
            Algorithm::GreedyBestFirst => Box::new(GreedySolver),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Algorithm::BreadthFirst => "BFS",
            Algorithm::DepthFirst => "DFS",
            Algorithm::Dijkstra => "Dijkstra",
            Algorithm::Astar => "A*",
            Algorithm::GreedyBestFirst => "Greedy BFS",
        }
    }

    /// One-line explanation shown to the user next to the grid.
    pub fn description(self) -> &'static str {
        match self {
            Algorithm::BreadthFirst => {
                "Breadth-first Search is unweighted and guarantees the shortest path!"
            }
            Algorithm::DepthFirst => {
                "Depth-first Search is unweighted and does not guarantee the shortest path!"
            }
            Algorithm::Dijkstra => {
                "Dijkstra's Algorithm is weighted and guarantees the shortest path!"
            }
            Algorithm::Astar => "A* Search is weighted and guarantees the shortest path!",
            Algorithm::GreedyBestFirst => {
                "Greedy Best-first Search is weighted and does not guarantee the shortest path!"
            }
        }
    }

    pub fn is_weighted(self) -> bool {
        matches!(
            self,
            Algorithm::Dijkstra | Algorithm::Astar | Algorithm::GreedyBestFirst
        )
    }

    pub fn guarantees_shortest_path(self) -> bool {
        matches!(
            self,
            Algorithm::BreadthFirst | Algorithm::Dijkstra | Algorithm::Astar
        )
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bfs" | "breadth-first" => Ok(Algorithm::BreadthFirst),
            "dfs" | "depth-first" => Ok(Algorithm::DepthFirst),
            "dijkstra" => Ok(Algorithm::Dijkstra),
            "a*" | "astar" => Ok(Algorithm::Astar),
            "greedy bfs" | "greedy" | "greedy best-first" => Ok(Algorithm::GreedyBestFirst),
            _ => Err(UnknownAlgorithm(s.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for algorithm in Algorithm::ALL {
            assert_eq!(algorithm.name().parse::<Algorithm>(), Ok(algorithm));
            assert_eq!(algorithm.to_string(), algorithm.name());
        }
        assert_eq!("  ASTAR ".parse::<Algorithm>(), Ok(Algorithm::Astar));
        assert_eq!(
            "bogo".parse::<Algorithm>(),
            Err(UnknownAlgorithm("bogo".to_owned()))
        );
    }

    #[test]
    fn optimality_flags() {
        let optimal: Vec<_> = Algorithm::ALL
            .into_iter()
            .filter(|a| a.guarantees_shortest_path())
            .collect();
        assert_eq!(
            optimal,
            vec![Algorithm::BreadthFirst, Algorithm::Astar, Algorithm::Dijkstra]
        );
        assert!(!Algorithm::DepthFirst.is_weighted());
        assert!(Algorithm::GreedyBestFirst.is_weighted());
    }

    #[test]
    fn only_relaxing_solvers_track_cost() {
        let tracking: Vec<_> = Algorithm::ALL
            .into_iter()
            .filter(|a| a.solver().tracks_cost())
            .collect();
        assert_eq!(tracking, vec![Algorithm::Astar, Algorithm::Dijkstra]);
    }
}
