use core::fmt;

use crate::cell::Cell;

/// Reasons a request to start a run is turned down. A rejected request leaves the session
/// exactly as it was.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunRejected {
    /// Another run is still in progress.
    AlreadyRunning,
    MissingStart,
    MissingEnd,
    /// Start and end refer to the same cell.
    SameEndpoints,
    /// An endpoint sits on a wall.
    BlockedEndpoint(Cell),
    /// An endpoint lies outside the grid.
    OutOfBounds(Cell),
}

impl fmt::Display for RunRejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyRunning => f.write_str("a search is already running"),
            Self::MissingStart => f.write_str("set a start cell before running a search"),
            Self::MissingEnd => f.write_str("set an end cell before running a search"),
            Self::SameEndpoints => f.write_str("start and end must be different cells"),
            Self::BlockedEndpoint(cell) => write!(f, "endpoint {cell} is a wall"),
            Self::OutOfBounds(cell) => write!(f, "endpoint {cell} is outside the grid"),
        }
    }
}

impl std::error::Error for RunRejected {}

/// Returned when parsing an [Algorithm](crate::solver::Algorithm) from an unknown name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownAlgorithm(pub String);

impl fmt::Display for UnknownAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown search algorithm \u{201c}{}\u{201d}", self.0)
    }
}

impl std::error::Error for UnknownAlgorithm {}
