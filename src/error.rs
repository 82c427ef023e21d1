use grid_util::point::Point;

use crate::cell::CellState;
use crate::{MAX_GRID_SIZE, MIN_GRID_SIZE};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("grid size {size} is outside {min}..={max}", min = MIN_GRID_SIZE, max = MAX_GRID_SIZE)]
    InvalidGridSize { size: usize },

    #[error("invalid grid size input: {0:?}")]
    InvalidGridInput(String),

    #[error("no start cell has been placed")]
    MissingStart,

    #[error("no goal cell has been placed")]
    MissingGoal,

    #[error("unknown policy: {0:?}")]
    UnknownPolicy(String),

    #[error("position {0:?} is outside the grid")]
    OutOfBounds(Point),

    #[error("cell {point:?} is already {state:?}")]
    CellOccupied { point: Point, state: CellState },

    #[error("no path from {from:?} to {to:?}")]
    NoPathFound { from: Point, to: Point },

    #[error("search aborted by caller")]
    AbortedByCaller,
}

impl Error {
    /// Rejected setup or route request; nothing on the grid was touched.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Error::InvalidGridSize { .. }
                | Error::InvalidGridInput(_)
                | Error::MissingStart
                | Error::MissingGoal
                | Error::UnknownPolicy(_)
        )
    }

    /// The search was cut short and the route is incomplete rather than failed.
    pub fn is_incomplete(&self) -> bool {
        matches!(self, Error::AbortedByCaller)
    }
}
