//! # stepwise_pathfinding
//!
//! Grid search that can be watched. Five strategies (breadth-first, depth-first, Dijkstra, A*
//! and greedy best-first) run on a 4-connected, uniform-cost grid, one expansion per
//! [step](search_driver::SearchDriver::step), so that a front end can draw every expansion before
//! the next one happens.
//!
//! A [SearchSession](session::SearchSession) owns the grid and at most one running search; a
//! [StepScheduler](scheduler::StepScheduler) decides when the next step is due, without ever
//! blocking, and can be cancelled at any time.
//!
//! ```
//! use stepwise_pathfinding::{Algorithm, Cell, SearchSession, SessionConfig};
//!
//! let mut session = SearchSession::new(&SessionConfig::new(3, 3));
//! session.set_start(Cell::new(0, 0));
//! session.set_end(Cell::new(2, 2));
//! session.toggle_wall(Cell::new(1, 1));
//! let summary = session.run_to_end(Algorithm::Astar).unwrap();
//! assert_eq!(summary.path.map(|p| p.len()), Some(5));
//! ```
pub mod cell;
pub mod config;
pub mod error;
pub mod frontier;
pub mod pathing_grid;
pub mod scheduler;
pub mod search_driver;
pub mod session;
pub mod solver;

pub use cell::Cell;
pub use config::{SessionConfig, Speed};
pub use error::{RunRejected, UnknownAlgorithm};
pub use pathing_grid::PathingGrid;
pub use scheduler::{StepScheduler, Stepper};
pub use search_driver::{Parents, SearchDriver, SearchState, StepResult};
pub use session::{RunColor, RunSummary, RunToken, SearchEvent, SearchSession, StepOutcome};
pub use solver::{Algorithm, GridSolver};

use log::warn;

/// Cost of moving to an edge neighbour.
pub const STEP_COST: u32 = 1;
pub const DEFAULT_ROWS: usize = 20;
pub const DEFAULT_COLS: usize = 40;

/// Follows the parent links back from `end` and returns the path from `start` to `end`, both
/// included. Returns [None] if the chain breaks off before reaching `start`, which cannot happen
/// for links produced by a [SearchDriver].
pub fn reconstruct_path(parents: &Parents, start: Cell, end: Cell) -> Option<Vec<Cell>> {
    let mut path = vec![end];
    let mut current = end;
    while current != start {
        // A chain longer than the map has looped
        if path.len() > parents.len() + 1 {
            warn!("Parent links from {} loop without reaching {}", end, start);
            return None;
        }
        match parents.get(&current) {
            Some(&parent) => {
                current = parent;
                path.push(current);
            }
            None => {
                warn!("Parent chain from {} ends at {} before reaching {}", end, current, start);
                return None;
            }
        }
    }
    path.reverse();
    Some(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain(cells: &[(i32, i32)]) -> Parents {
        cells
            .windows(2)
            .map(|w| (Cell::from(w[1]), Cell::from(w[0])))
            .collect()
    }

    #[test]
    fn follows_links_back_to_start() {
        let parents = chain(&[(0, 0), (0, 1), (1, 1), (1, 2)]);
        let path = reconstruct_path(&parents, Cell::new(0, 0), Cell::new(1, 2)).unwrap();
        assert_eq!(
            path,
            vec![
                Cell::new(0, 0),
                Cell::new(0, 1),
                Cell::new(1, 1),
                Cell::new(1, 2)
            ]
        );
    }

    #[test]
    fn start_equal_to_end() {
        let path = reconstruct_path(&Parents::default(), Cell::new(2, 2), Cell::new(2, 2));
        assert_eq!(path, Some(vec![Cell::new(2, 2)]));
    }

    #[test]
    fn broken_chain_is_reported() {
        let parents = chain(&[(0, 1), (0, 2), (0, 3)]);
        assert_eq!(reconstruct_path(&parents, Cell::new(0, 0), Cell::new(0, 3)), None);
    }

    #[test]
    fn looping_chain_terminates() {
        let mut parents = Parents::default();
        parents.insert(Cell::new(0, 1), Cell::new(0, 2));
        parents.insert(Cell::new(0, 2), Cell::new(0, 1));
        assert_eq!(reconstruct_path(&parents, Cell::new(0, 0), Cell::new(0, 2)), None);
    }
}
