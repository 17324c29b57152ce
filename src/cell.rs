use core::fmt;
use grid_util::point::Point;
use smallvec::SmallVec;

/// Offsets of the four edge neighbours: right, down, left, up. Expansion order follows this
/// array, so it is part of what makes runs reproducible.
const NEUMANN_OFFSETS: [(i32, i32); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

/// A coordinate on the grid, in row/column terms. It is a view of a [Point] with `x` the column
/// and `y` the row, which is what the underlying [BoolGrid](grid_util::grid::BoolGrid) indexes
/// by. Coordinates are signed so that neighbours of border cells can be generated and then
/// rejected by [PathingGrid::in_bounds](crate::pathing_grid::PathingGrid::in_bounds).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub row: i32,
    pub col: i32,
}

impl Cell {
    pub const fn new(row: i32, col: i32) -> Cell {
        Cell { row, col }
    }

    #[inline]
    pub fn point(&self) -> Point {
        Point::new(self.col, self.row)
    }

    pub fn manhattan_distance(&self, other: &Cell) -> u32 {
        self.point().manhattan_distance(&other.point()) as u32
    }

    /// The four cells sharing an edge with this one, unfiltered, in the order right, down, left,
    /// up.
    pub fn neumann_neighborhood(&self) -> SmallVec<[Cell; 4]> {
        let mut neighbours: SmallVec<[Cell; 4]> = self
            .point()
            .neumann_neighborhood_smallvec()
            .into_iter()
            .map(Cell::from)
            .collect();
        // grid_util walks its own direction order
        neighbours.sort_by_key(|n| {
            NEUMANN_OFFSETS
                .iter()
                .position(|&offset| offset == (n.row - self.row, n.col - self.col))
        });
        neighbours
    }

    pub fn is_adjacent(&self, other: &Cell) -> bool {
        self.manhattan_distance(other) == 1
    }
}

impl From<(i32, i32)> for Cell {
    fn from((row, col): (i32, i32)) -> Cell {
        Cell::new(row, col)
    }
}

impl From<Point> for Cell {
    fn from(point: Point) -> Cell {
        Cell::new(point.y, point.x)
    }
}

impl From<Cell> for Point {
    fn from(cell: Cell) -> Point {
        cell.point()
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighborhood_order_is_right_down_left_up() {
        let n = Cell::new(3, 3).neumann_neighborhood();
        assert_eq!(
            n.as_slice(),
            &[
                Cell::new(3, 4),
                Cell::new(4, 3),
                Cell::new(3, 2),
                Cell::new(2, 3)
            ]
        );
    }

    #[test]
    fn point_view_swaps_axes() {
        let cell = Cell::new(2, 7);
        let point = cell.point();
        assert_eq!((point.x, point.y), (7, 2));
        assert_eq!(Cell::from(point), cell);
        assert_eq!(Point::from(cell), point);
    }

    #[test]
    fn border_neighbors_are_generated_unfiltered() {
        let n = Cell::new(0, 0).neumann_neighborhood();
        assert_eq!(n.len(), 4);
        assert_eq!(n[2], Cell::new(0, -1));
        assert_eq!(n[3], Cell::new(-1, 0));
    }

    #[test]
    fn manhattan() {
        assert_eq!(Cell::new(0, 0).manhattan_distance(&Cell::new(19, 39)), 58);
        assert_eq!(Cell::new(2, 5).manhattan_distance(&Cell::new(2, 5)), 0);
        assert!(Cell::new(1, 1).is_adjacent(&Cell::new(0, 1)));
        assert!(!Cell::new(1, 1).is_adjacent(&Cell::new(0, 0)));
    }
}
