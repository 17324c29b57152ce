use core::fmt;
use grid_util::grid::{BoolGrid, ValueGrid};
use itertools::iproduct;
use log::debug;
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

use crate::cell::Cell;

/// [PathingGrid] is the occupancy map the searches run on: a [BoolGrid] with [true] meaning
/// blocked, plus the optional start and end cells. Endpoints are tracked next to the
/// occupancy so that a cell's role never hides a wall flag: placing an endpoint clears the wall
/// under it and walls cannot be placed on an endpoint.
///
/// Connected components are maintained with a [UnionFind] structure so that reachability can be
/// answered without searching.
#[derive(Clone, Debug)]
pub struct PathingGrid {
    grid: BoolGrid,
    start: Option<Cell>,
    end: Option<Cell>,
    pub components: UnionFind<usize>,
    pub components_dirty: bool,
}

impl Default for PathingGrid {
    fn default() -> PathingGrid {
        PathingGrid::new(crate::DEFAULT_ROWS, crate::DEFAULT_COLS)
    }
}

impl PathingGrid {
    /// Creates an open grid without endpoints.
    pub fn new(rows: usize, cols: usize) -> PathingGrid {
        let mut grid = PathingGrid {
            grid: BoolGrid::new(cols, rows, false),
            start: None,
            end: None,
            components: UnionFind::new(rows * cols),
            components_dirty: false,
        };
        grid.generate_components();
        grid
    }
    pub fn rows(&self) -> usize {
        self.grid.height()
    }
    pub fn cols(&self) -> usize {
        self.grid.width()
    }
    pub fn start(&self) -> Option<Cell> {
        self.start
    }
    pub fn end(&self) -> Option<Cell> {
        self.end
    }
    pub fn in_bounds(&self, cell: &Cell) -> bool {
        self.grid.point_in_bounds(cell.point())
    }
    fn ix(&self, cell: &Cell) -> usize {
        self.grid.get_ix_point(&cell.point())
    }
    pub fn is_blocked(&self, cell: &Cell) -> bool {
        self.in_bounds(cell) && self.grid.get_point(cell.point())
    }
    /// Whether the cell lies on the grid and is not a wall.
    pub fn is_open(&self, cell: &Cell) -> bool {
        self.in_bounds(cell) && !self.grid.get_point(cell.point())
    }
    fn is_endpoint(&self, cell: &Cell) -> bool {
        self.start == Some(*cell) || self.end == Some(*cell)
    }
    /// The up to four cells sharing an edge with `cell` that lie on the grid, walls included.
    pub fn neighbors4(&self, cell: &Cell) -> SmallVec<[Cell; 4]> {
        let mut neighbours = cell.neumann_neighborhood();
        neighbours.retain(|n| self.in_bounds(n));
        neighbours
    }
    /// Like [neighbors4](Self::neighbors4) but without walls.
    pub fn open_neighbors4(&self, cell: &Cell) -> SmallVec<[Cell; 4]> {
        let mut neighbours = cell.neumann_neighborhood();
        neighbours.retain(|n| self.is_open(n));
        neighbours
    }
    /// Iterates over every cell, row by row.
    pub fn cells(&self) -> impl Iterator<Item = Cell> {
        iproduct!(0..self.rows() as i32, 0..self.cols() as i32).map(|(r, c)| Cell::new(r, c))
    }
    pub fn wall_count(&self) -> usize {
        self.cells().filter(|c| self.is_blocked(c)).count()
    }

    /// Flips the wall flag of `cell`. Endpoints and cells off the grid are left alone, in which
    /// case [false] is returned.
    pub fn toggle_wall(&mut self, cell: Cell) -> bool {
        if !self.in_bounds(&cell) || self.is_endpoint(&cell) {
            debug!("Ignoring wall toggle on {}", cell);
            return false;
        }
        let blocked = self.is_blocked(&cell);
        self.set_blocked(cell, !blocked);
        true
    }
    /// Places a wall on `cell` if it is not one already. Used when painting walls by dragging,
    /// where passing over a wall twice must not erase it.
    pub fn paint_wall(&mut self, cell: Cell) -> bool {
        if !self.in_bounds(&cell) || self.is_endpoint(&cell) || self.is_blocked(&cell) {
            return false;
        }
        self.set_blocked(cell, true);
        true
    }
    /// Moves the start to `cell`, clearing any wall there and on the previous start.
    pub fn set_start(&mut self, cell: Cell) -> bool {
        if !self.in_bounds(&cell) {
            debug!("Start {} lies outside the grid", cell);
            return false;
        }
        if let Some(previous) = self.start.replace(cell) {
            self.set_blocked(previous, false);
        }
        self.set_blocked(cell, false);
        true
    }
    /// Moves the end to `cell`, clearing any wall there and on the previous end.
    pub fn set_end(&mut self, cell: Cell) -> bool {
        if !self.in_bounds(&cell) {
            debug!("End {} lies outside the grid", cell);
            return false;
        }
        if let Some(previous) = self.end.replace(cell) {
            self.set_blocked(previous, false);
        }
        self.set_blocked(cell, false);
        true
    }
    /// Opens every cell and forgets both endpoints.
    pub fn clear(&mut self) {
        self.grid = BoolGrid::new(self.cols(), self.rows(), false);
        self.start = None;
        self.end = None;
        self.generate_components();
    }

    /// Updates a cell's wall flag. Joins newly connected components and flags the components as
    /// dirty if they are (potentially) broken apart.
    fn set_blocked(&mut self, cell: Cell, blocked: bool) {
        let point = cell.point();
        if self.grid.get_point(point) == blocked {
            return;
        }
        if blocked {
            self.components_dirty = true;
        } else {
            let ix = self.ix(&cell);
            for n in self.open_neighbors4(&cell) {
                self.components.union(ix, self.ix(&n));
            }
        }
        self.grid.set_point(point, blocked);
    }
    /// Checks if both cells are open and on the same component. Components must be current, see
    /// [update](Self::update).
    pub fn reachable(&self, start: &Cell, goal: &Cell) -> bool {
        self.is_open(start)
            && self.is_open(goal)
            && self.components.equiv(self.ix(start), self.ix(goal))
    }
    pub fn unreachable(&self, start: &Cell, goal: &Cell) -> bool {
        !self.reachable(start, goal)
    }
    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            self.generate_components();
        }
    }
    /// Generates a new [UnionFind] structure and links up open 4-neighbours to the same
    /// components.
    pub fn generate_components(&mut self) {
        self.components = UnionFind::new(self.rows() * self.cols());
        self.components_dirty = false;
        for cell in self.cells().filter(|c| self.is_open(c)).collect::<Vec<_>>() {
            let ix = self.ix(&cell);
            // Looking right and down is enough to visit every edge once
            for n in [Cell::new(cell.row, cell.col + 1), Cell::new(cell.row + 1, cell.col)] {
                if self.is_open(&n) {
                    self.components.union(ix, self.ix(&n));
                }
            }
        }
    }
}

impl fmt::Display for PathingGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in 0..self.rows() as i32 {
            for col in 0..self.cols() as i32 {
                let cell = Cell::new(row, col);
                let c = if self.start == Some(cell) {
                    'S'
                } else if self.end == Some(cell) {
                    'E'
                } else if self.is_blocked(&cell) {
                    '#'
                } else {
                    '.'
                };
                write!(f, "{}", c)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
