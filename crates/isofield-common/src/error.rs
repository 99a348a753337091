//! Error types for the scalar-field visualizer.

use thiserror::Error;

/// Result type alias using FieldError.
pub type FieldResult<T> = Result<T, FieldError>;

/// Primary error type for visualizer construction and drawing.
#[derive(Debug, Error)]
pub enum FieldError {
    // === Configuration Errors ===
    #[error("Invalid domain rectangle [{a}, {b}] x [{c}, {d}]: requires b > a and d > c")]
    InvalidDomain { a: f64, b: f64, c: f64, d: f64 },

    #[error("Invalid grid resolution {columns}x{rows}: at least 2x2 nodes required")]
    InvalidResolution { columns: usize, rows: usize },

    #[error("Palette must contain at least one color")]
    EmptyPalette,

    #[error("Field reported invalid extrema: min={min}, max={max}")]
    InvalidExtrema { min: f64, max: f64 },

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    // === Rendering Errors ===
    #[error("Output image is empty ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },

    // === Loading Errors ===
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(String),
}

impl FieldError {
    /// Whether the error was caused by the visualizer's configuration rather
    /// than by arguments of a single drawing call.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            FieldError::InvalidDomain { .. }
                | FieldError::EmptyPalette
                | FieldError::InvalidExtrema { .. }
                | FieldError::InvalidColor(_)
                | FieldError::Config(_)
        )
    }
}

// Conversion from common error types
impl From<std::io::Error> for FieldError {
    fn from(err: std::io::Error) -> Self {
        FieldError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for FieldError {
    fn from(err: serde_json::Error) -> Self {
        FieldError::Config(format!("JSON error: {}", err))
    }
}
