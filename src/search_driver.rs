//! The search loop of a best-first search, unrolled so that a caller can run it one expansion at
//! a time and draw each expansion before asking for the next.
//!
//! Relaxing strategies use a plain priority queue with lazy deletion: an improved cell is pushed
//! again and the stale entry is discarded when it is eventually popped.
use fxhash::{FxBuildHasher, FxHashMap, FxHashSet};
use indexmap::IndexMap;
use log::debug;
use smallvec::SmallVec;

use crate::cell::Cell;
use crate::error::RunRejected;
use crate::frontier::Frontier;
use crate::pathing_grid::PathingGrid;
use crate::solver::GridSolver;
use crate::STEP_COST;

pub type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Maps every discovered cell other than the start to the cell it was reached from. Iterates in
/// discovery order.
pub type Parents = FxIndexMap<Cell, Cell>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchState {
    Idle,
    Running,
    Succeeded,
    Failed,
}

impl SearchState {
    pub fn is_terminal(self) -> bool {
        matches!(self, SearchState::Succeeded | SearchState::Failed)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepResult {
    /// A cell was expanded; carries the cells it newly discovered or improved, in order.
    Continue(SmallVec<[Cell; 4]>),
    /// A stale frontier entry was dropped. Nothing visible happened, step again right away.
    Retry,
    /// The end was expanded. Carries the parent links for path reconstruction.
    Found(Parents),
    /// The frontier ran dry without reaching the end.
    Exhausted,
    /// The driver is not running; the call had no effect.
    Halted,
}

/// Runs one search, one expansion per [step](SearchDriver::step).
#[derive(Debug)]
pub struct SearchDriver {
    solver: Box<dyn GridSolver>,
    frontier: Box<dyn Frontier>,
    state: SearchState,
    start: Cell,
    end: Cell,
    visited: FxHashSet<Cell>,
    parents: Parents,
    costs: FxHashMap<Cell, u32>,
    scores: FxHashMap<Cell, u32>,
}

impl SearchDriver {
    pub fn new(solver: Box<dyn GridSolver>) -> SearchDriver {
        let frontier = solver.frontier();
        SearchDriver {
            solver,
            frontier,
            state: SearchState::Idle,
            start: Cell::default(),
            end: Cell::default(),
            visited: FxHashSet::default(),
            parents: Parents::default(),
            costs: FxHashMap::default(),
            scores: FxHashMap::default(),
        }
    }

    /// Begins a search between the grid's endpoints, seeding the frontier with the start.
    pub fn start(&mut self, grid: &PathingGrid) -> Result<(), RunRejected> {
        if self.state == SearchState::Running {
            return Err(RunRejected::AlreadyRunning);
        }
        let start = grid.start().ok_or(RunRejected::MissingStart)?;
        let end = grid.end().ok_or(RunRejected::MissingEnd)?;
        if start == end {
            return Err(RunRejected::SameEndpoints);
        }
        for cell in [start, end] {
            if !grid.in_bounds(&cell) {
                return Err(RunRejected::OutOfBounds(cell));
            }
            if grid.is_blocked(&cell) {
                return Err(RunRejected::BlockedEndpoint(cell));
            }
        }
        self.clear();
        self.start = start;
        self.end = end;
        if self.solver.tracks_cost() {
            self.costs.insert(start, 0);
        }
        if let Some(score) = self.solver.score(0, &start, &end) {
            self.scores.insert(start, score);
        }
        let key = self.solver.key(0, &start, &end);
        self.frontier.push(start, key);
        self.state = SearchState::Running;
        Ok(())
    }

    /// Drops all search state and returns to [SearchState::Idle].
    pub fn clear(&mut self) {
        self.frontier = self.solver.frontier();
        self.visited.clear();
        self.parents.clear();
        self.costs.clear();
        self.scores.clear();
        self.state = SearchState::Idle;
    }

    /// Performs a single expansion. The grid must be the one the search was started on and must
    /// not have changed since.
    pub fn step(&mut self, grid: &PathingGrid) -> StepResult {
        if self.state != SearchState::Running {
            return StepResult::Halted;
        }
        let Some(current) = self.frontier.pop() else {
            self.state = SearchState::Failed;
            return StepResult::Exhausted;
        };
        // We may have inserted a cell several times into the frontier if we found a better way
        // to reach it. The first entry to surface wins; the others are discarded.
        if !self.visited.insert(current) {
            debug!("Discarding stale frontier entry for {}", current);
            return StepResult::Retry;
        }
        if current == self.end {
            self.state = SearchState::Succeeded;
            return StepResult::Found(std::mem::take(&mut self.parents));
        }

        let mut discovered = SmallVec::new();
        for neighbour in grid.open_neighbors4(&current) {
            if self.visited.contains(&neighbour) {
                continue;
            }
            if self.solver.tracks_cost() {
                let new_cost = self.costs[&current] + STEP_COST;
                if self.costs.get(&neighbour).is_some_and(|&c| c <= new_cost) {
                    continue;
                }
                self.costs.insert(neighbour, new_cost);
                self.discover(neighbour, current, new_cost);
            } else if !self.parents.contains_key(&neighbour) {
                self.discover(neighbour, current, 0);
            } else {
                continue;
            }
            discovered.push(neighbour);
        }
        StepResult::Continue(discovered)
    }

    fn discover(&mut self, cell: Cell, parent: Cell, cost: u32) {
        self.parents.insert(cell, parent);
        if let Some(score) = self.solver.score(cost, &cell, &self.end) {
            self.scores.insert(cell, score);
        }
        let key = self.solver.key(cost, &cell, &self.end);
        self.frontier.push(cell, key);
    }

    pub fn state(&self) -> SearchState {
        self.state
    }
    pub fn solver(&self) -> &dyn GridSolver {
        self.solver.as_ref()
    }
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }
    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }
    pub fn is_visited(&self, cell: &Cell) -> bool {
        self.visited.contains(cell)
    }
    /// The cell `cell` was reached from. Empty after [StepResult::Found] handed the links out.
    pub fn parent(&self, cell: &Cell) -> Option<Cell> {
        self.parents.get(cell).copied()
    }
    /// Number of cells discovered so far, start excluded.
    pub fn discovered_count(&self) -> usize {
        self.parents.len()
    }
    pub fn cost(&self, cell: &Cell) -> Option<u32> {
        self.costs.get(cell).copied()
    }
    pub fn score(&self, cell: &Cell) -> Option<u32> {
        self.scores.get(cell).copied()
    }
}
