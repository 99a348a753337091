//! Colors, palettes and the JSON configuration schema for the visualizer.

use crate::domain::DomainRect;
use crate::error::{FieldError, FieldResult};
use crate::grid::GridSpec;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Color representation supporting multiple formats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Color {
    /// Hex string ("#RRGGBB" or "#RRGGBBAA") or a color name
    Hex(String),

    /// RGB array: [r, g, b] or [r, g, b, a]
    Array(Vec<u8>),

    /// Explicit RGBA
    Rgba { r: u8, g: u8, b: u8, a: u8 },
}

impl Color {
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color::Rgba { r, g, b, a: 255 }
    }

    /// Convert to RGBA bytes, rejecting malformed hex strings and arrays.
    ///
    /// Strings that are not hex are looked up as color names.
    pub fn to_rgba(&self) -> FieldResult<[u8; 4]> {
        match self {
            Color::Hex(s) if s.starts_with('#') => parse_hex_color(s),
            Color::Hex(s) => named_color(s)
                .or_else(|| parse_hex_color(s).ok())
                .ok_or_else(|| FieldError::InvalidColor(s.clone())),
            Color::Array(arr) => match arr.as_slice() {
                [r, g, b] => Ok([*r, *g, *b, 255]),
                [r, g, b, a] => Ok([*r, *g, *b, *a]),
                _ => Err(FieldError::InvalidColor(format!("{:?}", arr))),
            },
            Color::Rgba { r, g, b, a } => Ok([*r, *g, *b, *a]),
        }
    }
}

fn parse_hex_color(s: &str) -> FieldResult<[u8; 4]> {
    let hex = s.trim_start_matches('#');
    let invalid = || FieldError::InvalidColor(s.to_string());

    if !hex.is_ascii() || (hex.len() != 6 && hex.len() != 8) {
        return Err(invalid());
    }

    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
    let alpha = if hex.len() == 8 { channel(6)? } else { 255 };
    Ok([channel(0)?, channel(2)?, channel(4)?, alpha])
}

fn named_color(name: &str) -> Option<[u8; 4]> {
    let rgba = match name.to_lowercase().as_str() {
        "transparent" => [0, 0, 0, 0],
        "black" => [0, 0, 0, 255],
        "white" => [255, 255, 255, 255],
        "red" => [255, 0, 0, 255],
        "green" => [0, 255, 0, 255],
        "blue" => [0, 0, 255, 255],
        "yellow" => [255, 255, 0, 255],
        "cyan" => [0, 255, 255, 255],
        "magenta" => [255, 0, 255, 255],
        "orange" => [255, 165, 0, 255],
        "purple" => [128, 0, 128, 255],
        "gray" | "grey" => [128, 128, 128, 255],
        _ => return None,
    };
    Some(rgba)
}

/// Ordered, non-empty list of band colors. Band 0 holds the lowest values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<[u8; 4]>,
}

impl Palette {
    pub fn new(colors: Vec<[u8; 4]>) -> FieldResult<Self> {
        if colors.is_empty() {
            return Err(FieldError::EmptyPalette);
        }
        Ok(Self { colors })
    }

    /// Resolve configuration colors into a palette.
    pub fn from_colors(colors: &[Color]) -> FieldResult<Self> {
        let resolved = colors
            .iter()
            .map(Color::to_rgba)
            .collect::<FieldResult<Vec<_>>>()?;
        Self::new(resolved)
    }

    /// Number of bands (N).
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always false; construction rejects empty palettes.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn get(&self, band: usize) -> Option<[u8; 4]> {
        self.colors.get(band).copied()
    }

    /// Color of the highest band.
    pub fn last(&self) -> [u8; 4] {
        self.colors[self.colors.len() - 1]
    }

    pub fn colors(&self) -> &[[u8; 4]] {
        &self.colors
    }
}

/// How a saddle cell (four crossings) is resolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaddlePolicy {
    /// Leave the cell undrawn.
    #[default]
    Skip,
    /// Compare the mean of the four corners with the level and draw two
    /// segments separating the corners on the other side.
    AverageTieBreak,
}

/// How crossings that land exactly on a grid node are counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeCrossingPolicy {
    /// Every edge report counts, even when two edges report the same node.
    #[default]
    PerEdge,
    /// A node reported by both edges meeting at it counts once.
    Merge,
}

/// Root visualizer configuration loaded from JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisualizerConfig {
    /// Version of the config schema
    #[serde(default = "default_version")]
    pub version: String,

    pub domain: DomainRect,

    /// Band colors, lowest band first
    pub palette: Vec<Color>,

    /// Default sampling grid for gridlines and isolines
    #[serde(default)]
    pub grid: Option<GridSpec>,

    #[serde(default)]
    pub grid_lines: GridLineConfig,

    #[serde(default)]
    pub isolines: IsolineConfig,
}

fn default_version() -> String {
    "1.0".to_string()
}

impl VisualizerConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> FieldResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse configuration from a JSON string.
    pub fn from_json(json: &str) -> FieldResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Check that every color resolves and the palette is non-empty.
    ///
    /// Domain and grid are validated while parsing.
    pub fn validate(&self) -> FieldResult<()> {
        self.palette()?;
        self.grid_lines.color.to_rgba()?;
        self.isolines.line_color.to_rgba()?;
        self.isolines.marker_color.to_rgba()?;
        if let Some(interval) = self.isolines.interval {
            if !(interval.is_finite() && interval > 0.0) {
                return Err(FieldError::Config(format!(
                    "isoline interval must be positive, got {}",
                    interval
                )));
            }
        }
        Ok(())
    }

    pub fn palette(&self) -> FieldResult<Palette> {
        Palette::from_colors(&self.palette)
    }
}

/// Gridline appearance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridLineConfig {
    #[serde(default = "default_line_color")]
    pub color: Color,
}

impl Default for GridLineConfig {
    fn default() -> Self {
        Self {
            color: default_line_color(),
        }
    }
}

/// Isoline levels and appearance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IsolineConfig {
    /// Explicit levels; take precedence over `interval`
    #[serde(default)]
    pub levels: Option<Vec<f64>>,

    /// Spacing for automatically generated levels
    #[serde(default)]
    pub interval: Option<f64>,

    #[serde(default = "default_line_color")]
    pub line_color: Color,

    #[serde(default = "default_marker_color")]
    pub marker_color: Color,

    #[serde(default)]
    pub saddle: SaddlePolicy,

    #[serde(default)]
    pub node_crossings: NodeCrossingPolicy,
}

impl Default for IsolineConfig {
    fn default() -> Self {
        Self {
            levels: None,
            interval: None,
            line_color: default_line_color(),
            marker_color: default_marker_color(),
            saddle: SaddlePolicy::default(),
            node_crossings: NodeCrossingPolicy::default(),
        }
    }
}

fn default_line_color() -> Color {
    Color::rgb(0, 0, 0)
}

fn default_marker_color() -> Color {
    Color::rgb(255, 0, 0)
}
