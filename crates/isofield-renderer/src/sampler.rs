//! Per-call sampling of the scalar field at grid nodes.

use crate::contour::Point;
use crate::field::ScalarField;
use isofield_common::{DomainRect, GridSpec};

/// Field values and domain coordinates for every node of a sampling grid.
///
/// Stored row-major: node `(col, row)` lives at `row * columns + col`.
#[derive(Debug, Clone)]
pub struct NodeValueTable {
    grid: GridSpec,
    coords: Vec<Point>,
    values: Vec<f64>,
}

impl NodeValueTable {
    /// Evaluate `field` once at each of the `k x m` nodes laid over `domain`.
    pub fn sample<F: ScalarField + ?Sized>(field: &F, domain: &DomainRect, grid: GridSpec) -> Self {
        let mut coords = Vec::with_capacity(grid.len());
        let mut values = Vec::with_capacity(grid.len());

        for row in 0..grid.rows() {
            for col in 0..grid.columns() {
                let (x, y) = domain.node_coord(&grid, col, row);
                coords.push(Point::new(x, y));
                values.push(field.apply(x, y));
            }
        }

        Self { grid, coords, values }
    }

    /// Build a table from precomputed row-major samples.
    ///
    /// Returns `None` if `values` does not hold exactly one sample per node.
    pub fn from_values(domain: &DomainRect, grid: GridSpec, values: Vec<f64>) -> Option<Self> {
        if values.len() != grid.len() {
            return None;
        }

        let coords = (0..grid.rows())
            .flat_map(|row| (0..grid.columns()).map(move |col| (col, row)))
            .map(|(col, row)| {
                let (x, y) = domain.node_coord(&grid, col, row);
                Point::new(x, y)
            })
            .collect();

        Some(Self { grid, coords, values })
    }

    pub fn grid(&self) -> GridSpec {
        self.grid
    }

    /// Sampled value at node `(col, row)`.
    pub fn value(&self, col: usize, row: usize) -> f64 {
        self.values[self.grid.flat_index(col, row)]
    }

    /// Domain coordinate of node `(col, row)`.
    pub fn coord(&self, col: usize, row: usize) -> Point {
        self.coords[self.grid.flat_index(col, row)]
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// (min, max) over finite samples, or `None` if there are none.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.values
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |range, v| match range {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}
