//! Common types shared by the scalar-field visualizer crates.

pub mod domain;
pub mod error;
pub mod grid;
pub mod style;

pub use domain::{DomainRect, PixelSize};
pub use error::{FieldError, FieldResult};
pub use grid::GridSpec;
pub use style::{Color, NodeCrossingPolicy, Palette, SaddlePolicy, VisualizerConfig};
