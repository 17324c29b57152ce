//! The state a visualizer front end talks to: the grid, its endpoints and the one search that
//! may be in progress.
//!
//! While a search runs the grid is read-only; edits are refused rather than failing loudly so
//! that a stray click cannot disturb a running animation.
use core::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::cell::Cell;
use crate::config::SessionConfig;
use crate::error::RunRejected;
use crate::pathing_grid::PathingGrid;
use crate::reconstruct_path;
use crate::search_driver::{SearchDriver, StepResult};
use crate::solver::Algorithm;

/// Identifies one run and carries its cancellation flag. Clones share the flag, so cancelling
/// any clone cancels them all.
#[derive(Clone, Debug)]
pub struct RunToken {
    id: u64,
    cancelled: Arc<AtomicBool>,
}

impl RunToken {
    fn new(id: u64) -> Self {
        Self {
            id,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }
}

impl PartialEq for RunToken {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && Arc::ptr_eq(&self.cancelled, &other.cancelled)
    }
}

impl Eq for RunToken {}

/// Colour used to paint the cells a run discovers. Each run gets its own.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl RunColor {
    /// Random colour with every channel in 50..=255, which keeps it readable against black walls.
    pub fn random<R: Rng>(rng: &mut R) -> RunColor {
        RunColor {
            r: rng.gen_range(50..=255),
            g: rng.gen_range(50..=255),
            b: rng.gen_range(50..=255),
        }
    }
}

impl fmt::Display for RunColor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// What the renderer has to recolour.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchEvent {
    /// A cell was discovered (or reached more cheaply) by the current run.
    Visited { cell: Cell, color: RunColor },
    /// A cell of the final path, emitted from start to end.
    PathCell(Cell),
    /// The run ended without reaching the end.
    NoPath,
}

/// Result of [SearchSession::step].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// One cell was expanded; more steps follow.
    Continue(Vec<SearchEvent>),
    /// A stale entry was skipped. Step again without waiting.
    Retry,
    /// The run is over; these are its last events.
    Finished(Vec<SearchEvent>),
    /// The token does not belong to the active run, or was cancelled. Nothing happened.
    Stale,
}

/// How a finished run went.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunSummary {
    pub algorithm: Algorithm,
    /// Cells taken off the frontier and expanded.
    pub expanded: usize,
    /// Cells discovered, start excluded.
    pub discovered: usize,
    /// The path from start to end, both included, if one was found.
    pub path: Option<Vec<Cell>>,
}

impl RunSummary {
    /// Number of moves along the path.
    pub fn path_length(&self) -> Option<usize> {
        self.path.as_ref().map(|p| p.len() - 1)
    }
}

#[derive(Debug)]
struct ActiveRun {
    algorithm: Algorithm,
    driver: SearchDriver,
    token: RunToken,
    color: RunColor,
}

#[derive(Debug)]
pub struct SearchSession {
    grid: PathingGrid,
    active: Option<ActiveRun>,
    last_summary: Option<RunSummary>,
    next_run_id: u64,
    rng: StdRng,
}

impl SearchSession {
    pub fn new(config: &SessionConfig) -> SearchSession {
        let rng = match config.color_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        SearchSession {
            grid: PathingGrid::new(config.rows, config.cols),
            active: None,
            last_summary: None,
            next_run_id: 0,
            rng,
        }
    }

    pub fn grid(&self) -> &PathingGrid {
        &self.grid
    }
    /// The active run, unless its token has been cancelled from outside, for instance by
    /// [StepScheduler::cancel](crate::scheduler::StepScheduler::cancel).
    fn live_run(&self) -> Option<&ActiveRun> {
        self.active.as_ref().filter(|run| !run.token.is_cancelled())
    }
    /// Drops a run whose token was cancelled without going through [cancel_run](Self::cancel_run).
    fn discard_cancelled(&mut self) {
        if self.live_run().is_none() {
            if let Some(run) = self.active.take() {
                info!(
                    "Discarding cancelled {} after {} expansions",
                    run.algorithm,
                    run.driver.visited_count()
                );
            }
        }
    }
    pub fn is_running(&self) -> bool {
        self.live_run().is_some()
    }
    pub fn active_algorithm(&self) -> Option<Algorithm> {
        self.live_run().map(|run| run.algorithm)
    }
    /// Token of the run in progress, if any.
    pub fn active_token(&self) -> Option<&RunToken> {
        self.live_run().map(|run| &run.token)
    }
    /// Cells expanded so far by the run in progress.
    pub fn visited_count(&self) -> usize {
        self.live_run().map_or(0, |run| run.driver.visited_count())
    }
    /// Summary of the most recent run that reached a terminal state.
    pub fn last_summary(&self) -> Option<&RunSummary> {
        self.last_summary.as_ref()
    }

    fn editable(&mut self, what: &str) -> bool {
        self.discard_cancelled();
        if self.is_running() {
            debug!("Ignoring {} while a search is running", what);
            false
        } else {
            true
        }
    }
    pub fn toggle_wall(&mut self, cell: Cell) -> bool {
        self.editable("wall toggle") && self.grid.toggle_wall(cell)
    }
    pub fn paint_wall(&mut self, cell: Cell) -> bool {
        self.editable("wall painting") && self.grid.paint_wall(cell)
    }
    pub fn set_start(&mut self, cell: Cell) -> bool {
        self.editable("start placement") && self.grid.set_start(cell)
    }
    pub fn set_end(&mut self, cell: Cell) -> bool {
        self.editable("end placement") && self.grid.set_end(cell)
    }
    /// Clears the board: no walls, no endpoints.
    pub fn clear(&mut self) -> bool {
        if !self.editable("clear") {
            return false;
        }
        self.grid.clear();
        self.last_summary = None;
        true
    }

    /// Starts a new run. Refused if one is already in progress or the endpoints are not usable;
    /// a refused request changes nothing.
    pub fn start_run(&mut self, algorithm: Algorithm) -> Result<RunToken, RunRejected> {
        self.discard_cancelled();
        if self.is_running() {
            debug!("Refusing to start {}: a search is already running", algorithm);
            return Err(RunRejected::AlreadyRunning);
        }
        let mut driver = SearchDriver::new(algorithm.solver());
        driver.start(&self.grid).map_err(|e| {
            debug!("Refusing to start {}: {}", algorithm, e);
            e
        })?;

        self.grid.update();
        if let (Some(start), Some(end)) = (self.grid.start(), self.grid.end()) {
            if self.grid.reachable(&start, &end) {
                info!("Starting {}: {} is reachable from {}", algorithm, end, start);
            } else {
                info!("Starting {}: {} is not reachable from {}", algorithm, end, start);
            }
        }

        let token = RunToken::new(self.next_run_id);
        self.next_run_id += 1;
        self.active = Some(ActiveRun {
            algorithm,
            driver,
            token: token.clone(),
            color: RunColor::random(&mut self.rng),
        });
        Ok(token)
    }

    /// Aborts the run in progress. Steps scheduled with its token become no-ops.
    pub fn cancel_run(&mut self) -> bool {
        self.discard_cancelled();
        match self.active.take() {
            Some(run) => {
                info!("Cancelled {} after {} expansions", run.algorithm, run.driver.visited_count());
                run.token.cancel();
                true
            }
            None => false,
        }
    }

    /// Advances the run identified by `token` by one expansion.
    pub fn step(&mut self, token: &RunToken) -> StepOutcome {
        self.discard_cancelled();
        let Some(run) = self.active.as_mut() else {
            return StepOutcome::Stale;
        };
        if run.token != *token {
            return StepOutcome::Stale;
        }
        match run.driver.step(&self.grid) {
            StepResult::Continue(cells) => StepOutcome::Continue(
                cells
                    .into_iter()
                    .map(|cell| SearchEvent::Visited {
                        cell,
                        color: run.color,
                    })
                    .collect(),
            ),
            StepResult::Retry => StepOutcome::Retry,
            StepResult::Found(parents) => {
                let discovered = parents.len();
                let path = match (self.grid.start(), self.grid.end()) {
                    (Some(start), Some(end)) => reconstruct_path(&parents, start, end),
                    _ => None,
                };
                let events = match &path {
                    Some(path) => path.iter().map(|c| SearchEvent::PathCell(*c)).collect(),
                    None => vec![SearchEvent::NoPath],
                };
                self.finish(discovered, path);
                StepOutcome::Finished(events)
            }
            StepResult::Exhausted => {
                let discovered = run.driver.discovered_count();
                self.finish(discovered, None);
                StepOutcome::Finished(vec![SearchEvent::NoPath])
            }
            // A finished run is taken out of the session, so its driver is never stepped again
            StepResult::Halted => StepOutcome::Stale,
        }
    }

    fn finish(&mut self, discovered: usize, path: Option<Vec<Cell>>) {
        let Some(run) = self.active.take() else {
            return;
        };
        run.token.cancel();
        let summary = RunSummary {
            algorithm: run.algorithm,
            expanded: run.driver.visited_count(),
            discovered,
            path,
        };
        match summary.path_length() {
            Some(length) => info!(
                "{}: path found, {} moves after {} expansions",
                summary.algorithm, length, summary.expanded
            ),
            None => info!(
                "{}: no path found after {} expansions",
                summary.algorithm, summary.expanded
            ),
        }
        self.last_summary = Some(summary);
    }

    /// Runs a search from start to finish without pausing between steps.
    pub fn run_to_end(&mut self, algorithm: Algorithm) -> Result<RunSummary, RunRejected> {
        let token = self.start_run(algorithm)?;
        while !matches!(self.step(&token), StepOutcome::Finished(_) | StepOutcome::Stale) {}
        Ok(self
            .last_summary
            .clone()
            .unwrap_or(RunSummary {
                algorithm,
                expanded: 0,
                discovered: 0,
                path: None,
            }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(rows: usize, cols: usize) -> SearchSession {
        let mut session = SearchSession::new(&SessionConfig::new(rows, cols).with_seed(7));
        session.set_start(Cell::new(0, 0));
        session.set_end(Cell::new(rows as i32 - 1, cols as i32 - 1));
        session
    }

    #[test]
    fn start_requires_distinct_endpoints() {
        let mut session = SearchSession::new(&SessionConfig::new(3, 3));
        assert_eq!(
            session.start_run(Algorithm::BreadthFirst),
            Err(RunRejected::MissingStart)
        );
        session.set_start(Cell::new(1, 1));
        session.set_end(Cell::new(1, 1));
        assert_eq!(
            session.start_run(Algorithm::BreadthFirst),
            Err(RunRejected::SameEndpoints)
        );
        assert!(!session.is_running());
    }

    #[test]
    fn edits_are_refused_while_running() {
        let mut session = session(4, 4);
        let token = session.start_run(Algorithm::Dijkstra).unwrap();
        let before = session.grid().to_string();
        assert!(!session.toggle_wall(Cell::new(1, 1)));
        assert!(!session.paint_wall(Cell::new(1, 1)));
        assert!(!session.set_start(Cell::new(2, 2)));
        assert!(!session.set_end(Cell::new(2, 2)));
        assert!(!session.clear());
        assert_eq!(session.grid().to_string(), before);
        assert!(matches!(session.step(&token), StepOutcome::Continue(_)));
    }

    #[test]
    fn second_run_is_refused_and_first_is_untouched() {
        let mut session = session(5, 5);
        let token = session.start_run(Algorithm::BreadthFirst).unwrap();
        session.step(&token);
        session.step(&token);
        assert_eq!(
            session.start_run(Algorithm::Astar),
            Err(RunRejected::AlreadyRunning)
        );
        assert_eq!(session.active_algorithm(), Some(Algorithm::BreadthFirst));
        assert_eq!(session.visited_count(), 2);
        assert!(matches!(session.step(&token), StepOutcome::Continue(_)));
    }

    #[test]
    fn cancelled_token_is_stale() {
        let mut session = session(5, 5);
        let token = session.start_run(Algorithm::DepthFirst).unwrap();
        assert!(session.cancel_run());
        assert!(token.is_cancelled());
        assert_eq!(session.step(&token), StepOutcome::Stale);
        assert!(!session.is_running());
        // A new run does not revive the old token
        let fresh = session.start_run(Algorithm::DepthFirst).unwrap();
        assert_ne!(fresh, token);
        assert_eq!(session.step(&token), StepOutcome::Stale);
        assert!(matches!(session.step(&fresh), StepOutcome::Continue(_)));
    }

    #[test]
    fn cancelling_the_token_frees_the_session() {
        let mut session = session(5, 5);
        let token = session.start_run(Algorithm::BreadthFirst).unwrap();
        assert!(matches!(session.step(&token), StepOutcome::Continue(_)));
        token.cancel();
        assert!(!session.is_running());
        assert_eq!(session.active_token(), None);
        assert_eq!(session.visited_count(), 0);
        assert!(session.toggle_wall(Cell::new(2, 2)));
        assert_eq!(session.step(&token), StepOutcome::Stale);
        let fresh = session.start_run(Algorithm::BreadthFirst).unwrap();
        assert!(matches!(session.step(&fresh), StepOutcome::Continue(_)));
    }

    #[test]
    fn finished_run_emits_path_and_frees_session() {
        let mut session = session(1, 4);
        let token = session.start_run(Algorithm::BreadthFirst).unwrap();
        let mut last = StepOutcome::Stale;
        for _ in 0..10 {
            last = session.step(&token);
            if matches!(last, StepOutcome::Finished(_)) {
                break;
            }
        }
        let expected: Vec<_> = (0..4).map(|c| SearchEvent::PathCell(Cell::new(0, c))).collect();
        assert_eq!(last, StepOutcome::Finished(expected));
        assert!(!session.is_running());
        assert!(token.is_cancelled());
        let summary = session.last_summary().unwrap();
        assert_eq!(summary.path_length(), Some(3));
        assert_eq!(summary.expanded, 4);
        assert!(session.toggle_wall(Cell::new(0, 1)));
    }

    #[test]
    fn visited_events_carry_run_color() {
        let mut session = session(3, 3);
        let token = session.start_run(Algorithm::GreedyBestFirst).unwrap();
        let StepOutcome::Continue(events) = session.step(&token) else {
            panic!("first step should expand the start");
        };
        let colors: Vec<_> = events
            .iter()
            .filter_map(|e| match e {
                SearchEvent::Visited { color, .. } => Some(*color),
                _ => None,
            })
            .collect();
        assert_eq!(colors.len(), 2);
        assert_eq!(colors[0], colors[1]);
        assert!(colors[0].r >= 50 && colors[0].g >= 50 && colors[0].b >= 50);
    }

    #[test]
    fn color_renders_as_hex() {
        let color = RunColor {
            r: 255,
            g: 50,
            b: 171,
        };
        assert_eq!(color.to_string(), "#ff32ab");
    }

    #[test]
    fn unreachable_end_reports_no_path() {
        let mut session = session(3, 3);
        session.toggle_wall(Cell::new(1, 2));
        session.toggle_wall(Cell::new(2, 1));
        let summary = session.run_to_end(Algorithm::Astar).unwrap();
        assert_eq!(summary.path, None);
        assert_eq!(summary.expanded, 6);
    }
}
