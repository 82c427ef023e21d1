use crate::error::{Error, Result};
use crate::grid::Grid;
use crate::{MAX_GRID_SIZE, MIN_GRID_SIZE};

/// Side length in pixels of the area the grid is laid over.
pub const DEFAULT_WIDTH: u32 = 800;

/// Validated grid setup. [Grid::new] accepts any size; this is the entry point for sizes coming
/// from a user.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridConfig {
    pub size: usize,
    pub width: u32,
}

impl GridConfig {
    pub fn new(size: usize, width: u32) -> Result<GridConfig> {
        if !(MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&size) {
            return Err(Error::InvalidGridSize { size });
        }
        Ok(GridConfig { size, width })
    }

    /// Parses the answer to a "how many rows" prompt. Callers re-prompt on error; nothing has
    /// been created at that point.
    pub fn parse_size(input: &str) -> Result<usize> {
        let size: usize = input
            .trim()
            .parse()
            .map_err(|_| Error::InvalidGridInput(input.to_owned()))?;
        GridConfig::new(size, DEFAULT_WIDTH).map(|c| c.size)
    }

    pub fn build(&self) -> Grid {
        Grid::new(self.size, self.width)
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        GridConfig {
            size: MIN_GRID_SIZE,
            width: DEFAULT_WIDTH,
        }
    }
}
