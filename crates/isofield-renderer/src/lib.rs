//! Scalar-field visualization onto raster images.
//!
//! Implements three drawing stages over a caller-owned image:
//! - Color-banded heat map
//! - Sampling grid overlay
//! - Isolines (reduced marching squares)

pub mod bands;
pub mod contour;
pub mod field;
pub mod gridlines;
pub mod sampler;
pub mod style;
pub mod visualizer;

pub use field::{LinearField, SampledField, ScalarField};
pub use visualizer::FieldVisualizer;
