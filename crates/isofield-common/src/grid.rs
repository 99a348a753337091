//! Sampling grid specification.

use crate::error::{FieldError, FieldResult};
use serde::{Deserialize, Serialize};

/// A `k x m` lattice of sample nodes laid over the domain rectangle.
///
/// `columns` (k) and `rows` (m) count nodes, not cells: the grid has
/// `(k - 1) x (m - 1)` cells. Both are at least 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GridDimensions", into = "GridDimensions")]
pub struct GridSpec {
    columns: usize,
    rows: usize,
}

/// Unvalidated grid dimensions as they appear in configuration files.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GridDimensions {
    pub columns: usize,
    pub rows: usize,
}

impl GridSpec {
    /// Create a grid specification with `columns x rows` nodes.
    pub fn new(columns: usize, rows: usize) -> FieldResult<Self> {
        if columns < 2 || rows < 2 {
            return Err(FieldError::InvalidResolution { columns, rows });
        }
        Ok(Self { columns, rows })
    }

    /// Number of nodes per row (k).
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Number of nodes per column (m).
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Total number of nodes.
    pub fn len(&self) -> usize {
        self.columns * self.rows
    }

    /// Always false; a valid grid has at least four nodes.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Number of cells as `(columns - 1, rows - 1)`.
    pub fn cell_count(&self) -> (usize, usize) {
        (self.columns - 1, self.rows - 1)
    }

    /// Row-major index of node `(col, row)`.
    pub fn flat_index(&self, col: usize, row: usize) -> usize {
        row * self.columns + col
    }

    /// Iterate over the lower-left node of every cell, row by row.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> {
        let (cells_x, cells_y) = self.cell_count();
        (0..cells_y).flat_map(move |y| (0..cells_x).map(move |x| (x, y)))
    }
}

impl TryFrom<GridDimensions> for GridSpec {
    type Error = FieldError;

    fn try_from(dims: GridDimensions) -> Result<Self, Self::Error> {
        GridSpec::new(dims.columns, dims.rows)
    }
}

impl From<GridSpec> for GridDimensions {
    fn from(grid: GridSpec) -> Self {
        GridDimensions {
            columns: grid.columns,
            rows: grid.rows,
        }
    }
}
