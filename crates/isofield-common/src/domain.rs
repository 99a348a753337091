//! Domain rectangle and conversions between domain, pixel and grid space.
//!
//! The lower-left corner `(a, c)` of the rectangle is the origin of both the
//! pixel raster and the sampling grid. Pixel row `py` maps to domain
//! `y = c + py * dy`, so rows grow with `y` (no vertical flip).

use crate::error::{FieldError, FieldResult};
use crate::grid::GridSpec;
use serde::{Deserialize, Serialize};

/// The continuous region `[a, b] x [c, d]` over which a field is drawn.
///
/// Always satisfies `b > a` and `d > c` with finite bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "DomainBounds", into = "DomainBounds")]
pub struct DomainRect {
    a: f64,
    b: f64,
    c: f64,
    d: f64,
}

/// Unvalidated bounds as they appear in configuration files.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DomainBounds {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

/// Size of one output pixel measured in domain units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelSize {
    pub dx: f64,
    pub dy: f64,
}

impl DomainRect {
    /// Create a domain rectangle, rejecting degenerate or non-finite bounds.
    pub fn new(a: f64, b: f64, c: f64, d: f64) -> FieldResult<Self> {
        let finite = a.is_finite() && b.is_finite() && c.is_finite() && d.is_finite();
        if !finite || b <= a || d <= c {
            return Err(FieldError::InvalidDomain { a, b, c, d });
        }
        Ok(Self { a, b, c, d })
    }

    pub fn a(&self) -> f64 {
        self.a
    }

    pub fn b(&self) -> f64 {
        self.b
    }

    pub fn c(&self) -> f64 {
        self.c
    }

    pub fn d(&self) -> f64 {
        self.d
    }

    /// Width of the rectangle in domain units (`b - a`).
    pub fn width(&self) -> f64 {
        self.b - self.a
    }

    /// Height of the rectangle in domain units (`d - c`).
    pub fn height(&self) -> f64 {
        self.d - self.c
    }

    /// Check if a point is contained within this rectangle (edges inclusive).
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.a && x <= self.b && y >= self.c && y <= self.d
    }

    /// Domain extent of a single pixel for an image of the given size.
    pub fn pixel_size(&self, width: u32, height: u32) -> PixelSize {
        PixelSize {
            dx: self.width() / width as f64,
            dy: self.height() / height as f64,
        }
    }

    /// Domain coordinate of the center of pixel `(px, py)`.
    pub fn pixel_center_to_domain(&self, px: u32, py: u32, pixel: &PixelSize) -> (f64, f64) {
        (
            self.a + px as f64 * pixel.dx + pixel.dx / 2.0,
            self.c + py as f64 * pixel.dy + pixel.dy / 2.0,
        )
    }

    /// Pixel containing the domain point `(x, y)`.
    ///
    /// The result is not clamped: points on the far edges of the domain map
    /// one past the last column/row, and points outside the rectangle map
    /// outside the image. Drawing routines clip.
    pub fn domain_to_pixel(&self, x: f64, y: f64, pixel: &PixelSize) -> (i64, i64) {
        (
            ((x - self.a) / pixel.dx).floor() as i64,
            ((y - self.c) / pixel.dy).floor() as i64,
        )
    }

    /// Domain extent of one sampling-grid cell, `((b-a)/(k-1), (d-c)/(m-1))`.
    pub fn cell_size(&self, grid: &GridSpec) -> (f64, f64) {
        (
            self.width() / (grid.columns() - 1) as f64,
            self.height() / (grid.rows() - 1) as f64,
        )
    }

    /// Domain coordinate of grid node `(col, row)`.
    pub fn node_coord(&self, grid: &GridSpec, col: usize, row: usize) -> (f64, f64) {
        let (cw, ch) = self.cell_size(grid);
        (self.a + col as f64 * cw, self.c + row as f64 * ch)
    }
}

impl TryFrom<DomainBounds> for DomainRect {
    type Error = FieldError;

    fn try_from(bounds: DomainBounds) -> Result<Self, Self::Error> {
        DomainRect::new(bounds.a, bounds.b, bounds.c, bounds.d)
    }
}

impl From<DomainRect> for DomainBounds {
    fn from(rect: DomainRect) -> Self {
        DomainBounds {
            a: rect.a,
            b: rect.b,
            c: rect.c,
            d: rect.d,
        }
    }
}
