//! Isoline (contour) extraction and rendering.
//!
//! Each grid cell is examined independently. The requested level is
//! intersected with the cell's four edges by linear interpolation between
//! the edge's node values, and the cell is classified by how many distinct
//! crossings it has:
//!
//! - 0: no contour passes through the cell
//! - 2: one segment joins the two crossings
//! - 1 or 3: inconsistent, left undrawn
//! - 4: saddle, left undrawn unless [`SaddlePolicy::AverageTieBreak`] is set
//!
//! This is a reduced marching-squares case table. Cells with 1 or 3
//! crossings arise when the level touches a node exactly and are not
//! resolved.

use image::{GenericImage, Rgba};
use imageproc::drawing::{draw_hollow_circle_mut, draw_line_segment_mut};
use isofield_common::{
    DomainRect, FieldError, FieldResult, NodeCrossingPolicy, PixelSize, SaddlePolicy,
};

use crate::sampler::NodeValueTable;
use crate::style::IsolineStyle;

/// A point in domain coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A line segment between two points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

impl Segment {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// True if both segments join the same two points, in either direction.
    pub fn same_endpoints(&self, other: &Segment) -> bool {
        (self.start == other.start && self.end == other.end)
            || (self.start == other.end && self.end == other.start)
    }
}

/// Node offsets of one cell edge, relative to the cell's lower-left node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeOffset {
    pub from: (usize, usize),
    pub to: (usize, usize),
}

impl EdgeOffset {
    const fn new(x1: usize, y1: usize, x2: usize, y2: usize) -> Self {
        Self {
            from: (x1, y1),
            to: (x2, y2),
        }
    }
}

/// Cell edges in the order they are examined: bottom, left, right, top.
pub const CELL_EDGES: [EdgeOffset; 4] = [
    EdgeOffset::new(0, 0, 1, 0),
    EdgeOffset::new(0, 0, 0, 1),
    EdgeOffset::new(1, 0, 1, 1),
    EdgeOffset::new(0, 1, 1, 1),
];

const BOTTOM: usize = 0;
const LEFT: usize = 1;
const RIGHT: usize = 2;
const TOP: usize = 3;

/// Result of intersecting a level with one edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EdgeCrossing {
    /// The level is strictly above or below both endpoint values, or a value
    /// is not usable (non-finite endpoint, NaN level).
    None,
    /// Both endpoints equal the level; the whole edge lies on the isoline and
    /// no single crossing point exists. Not counted as a crossing.
    Degenerate,
    /// The level crosses the edge at this point.
    Point(Point),
}

/// Classification of one grid cell for a given level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CellCase {
    /// No crossings.
    Empty,
    /// A corner value is NaN or infinite; the cell is skipped.
    NoData,
    /// Exactly two crossings joined by one segment.
    Segment(Segment),
    /// One or three crossings; nothing is drawn.
    Inconsistent { crossings: usize },
    /// Four crossings. Holds two segments only when the saddle was resolved.
    Saddle(Option<[Segment; 2]>),
}

impl CellCase {
    /// Segments to draw for this cell.
    pub fn segments(&self) -> Vec<Segment> {
        match self {
            CellCase::Segment(segment) => vec![*segment],
            CellCase::Saddle(Some(pair)) => pair.to_vec(),
            _ => vec![],
        }
    }
}

/// Tunables for cell classification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContourOptions {
    pub saddle: SaddlePolicy,
    pub node_crossings: NodeCrossingPolicy,
}

/// Number of cells that ended in each case during one extraction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CellTally {
    pub empty: usize,
    pub no_data: usize,
    pub segment: usize,
    pub inconsistent: usize,
    pub saddle: usize,
}

impl CellTally {
    /// Cells with crossings that produced no segment.
    pub fn unresolved(&self) -> usize {
        self.inconsistent + self.saddle
    }
}

/// All segments found for one level.
#[derive(Debug, Clone)]
pub struct IsolineExtraction {
    pub level: f64,
    pub segments: Vec<Segment>,
    pub cells: CellTally,
}

/// Generate contour levels automatically based on data range and interval
pub fn generate_contour_levels(min_value: f64, max_value: f64, interval: f64) -> Vec<f64> {
    if interval.is_nan() || interval <= 0.0 || !min_value.is_finite() || !max_value.is_finite() {
        return vec![];
    }
    if max_value <= min_value {
        return vec![];
    }

    // Start from first multiple of interval at or above min_value
    let first = (min_value / interval).ceil();
    let mut levels = Vec::new();

    let mut i = 0.0;
    loop {
        let level = (first + i) * interval;
        if level > max_value {
            break;
        }
        levels.push(level);
        i += 1.0;
    }

    levels
}

/// Linearly interpolate the crossing of `level` along the edge `p1`-`p2`.
///
/// The crossing exists iff `level` lies between `f1` and `f2` inclusive;
/// the test is symmetric in the two endpoints. A level equal to an endpoint
/// value yields that endpoint exactly.
pub fn interpolate_edge(p1: Point, f1: f64, p2: Point, f2: f64, level: f64) -> EdgeCrossing {
    if !f1.is_finite() || !f2.is_finite() || level.is_nan() {
        return EdgeCrossing::None;
    }
    if (level < f1 && level < f2) || (level > f1 && level > f2) {
        return EdgeCrossing::None;
    }
    if f1 == f2 {
        // Only reachable with f1 == f2 == level
        return EdgeCrossing::Degenerate;
    }
    if level == f1 {
        return EdgeCrossing::Point(p1);
    }
    if level == f2 {
        return EdgeCrossing::Point(p2);
    }

    let t = (level - f1) / (f2 - f1);
    EdgeCrossing::Point(Point::new(
        p1.x + (p2.x - p1.x) * t,
        p1.y + (p2.y - p1.y) * t,
    ))
}

/// Classify the cell whose lower-left node is `(x, y)`.
pub fn classify_cell(
    table: &NodeValueTable,
    x: usize,
    y: usize,
    level: f64,
    options: &ContourOptions,
) -> CellCase {
    let corners = [
        table.value(x, y),
        table.value(x + 1, y),
        table.value(x, y + 1),
        table.value(x + 1, y + 1),
    ];
    if corners.iter().any(|v| !v.is_finite()) {
        return CellCase::NoData;
    }

    let mut crossings = [Point::default(); 4];
    let mut count = 0;

    for edge in &CELL_EDGES {
        let (x1, y1) = (x + edge.from.0, y + edge.from.1);
        let (x2, y2) = (x + edge.to.0, y + edge.to.1);
        let crossing = interpolate_edge(
            table.coord(x1, y1),
            table.value(x1, y1),
            table.coord(x2, y2),
            table.value(x2, y2),
            level,
        );

        if let EdgeCrossing::Point(p) = crossing {
            let duplicate = options.node_crossings == NodeCrossingPolicy::Merge
                && crossings[..count].contains(&p);
            if !duplicate {
                crossings[count] = p;
                count += 1;
            }
        }
    }

    match count {
        0 => CellCase::Empty,
        2 => CellCase::Segment(Segment::new(crossings[0], crossings[1])),
        4 => CellCase::Saddle(resolve_saddle(&crossings, &corners, level, options.saddle)),
        n => CellCase::Inconsistent { crossings: n },
    }
}

/// Pair up the four crossings of a saddle cell.
///
/// `crossings` is in edge order (bottom, left, right, top) and `corners` is
/// `[v00, v10, v01, v11]`. When the cell-center average lies on the same
/// side of the level as `v00`, the `v00`-`v11` diagonal is connected and the
/// two other corners are cut off; otherwise `v00` and `v11` are cut off.
fn resolve_saddle(
    crossings: &[Point; 4],
    corners: &[f64; 4],
    level: f64,
    policy: SaddlePolicy,
) -> Option<[Segment; 2]> {
    match policy {
        SaddlePolicy::Skip => None,
        SaddlePolicy::AverageTieBreak => {
            let center = corners.iter().sum::<f64>() / 4.0;
            let pairs = if (center > level) == (corners[0] > level) {
                [(BOTTOM, RIGHT), (LEFT, TOP)]
            } else {
                [(BOTTOM, LEFT), (RIGHT, TOP)]
            };
            Some(pairs.map(|(a, b)| Segment::new(crossings[a], crossings[b])))
        }
    }
}

/// Walk every cell of `table` and collect the segments for `level`.
pub fn extract_isolines(
    table: &NodeValueTable,
    level: f64,
    options: &ContourOptions,
) -> IsolineExtraction {
    let mut segments = Vec::new();
    let mut cells = CellTally::default();

    for (x, y) in table.grid().cells() {
        let case = classify_cell(table, x, y, level, options);
        match case {
            CellCase::Empty => cells.empty += 1,
            CellCase::NoData => cells.no_data += 1,
            CellCase::Segment(_) => cells.segment += 1,
            CellCase::Inconsistent { crossings } => {
                tracing::trace!(x, y, crossings, level, "Unresolved contour cell");
                cells.inconsistent += 1;
            }
            CellCase::Saddle(resolved) => {
                tracing::trace!(x, y, level, resolved = resolved.is_some(), "Saddle contour cell");
                cells.saddle += 1;
            }
        }
        segments.extend(case.segments());
    }

    IsolineExtraction {
        level,
        segments,
        cells,
    }
}

/// Convert a domain point to integer pixel coordinates usable by the
/// drawing primitives.
fn to_pixel(domain: &DomainRect, point: Point, pixel: &PixelSize) -> (i32, i32) {
    let (px, py) = domain.domain_to_pixel(point.x, point.y, pixel);
    let clamp = |v: i64| v.clamp(i32::MIN as i64, i32::MAX as i64) as i32;
    (clamp(px), clamp(py))
}

/// Draw extracted segments onto `image`, marking each endpoint.
///
/// Returns the number of segments drawn.
pub fn render_isolines<I>(
    image: &mut I,
    domain: &DomainRect,
    extraction: &IsolineExtraction,
    style: &IsolineStyle,
) -> FieldResult<usize>
where
    I: GenericImage<Pixel = Rgba<u8>>,
{
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(FieldError::EmptyImage { width, height });
    }

    let pixel = domain.pixel_size(width, height);
    for segment in &extraction.segments {
        let start = to_pixel(domain, segment.start, &pixel);
        let end = to_pixel(domain, segment.end, &pixel);

        draw_hollow_circle_mut(image, start, style.marker_radius, style.marker_color);
        draw_hollow_circle_mut(image, end, style.marker_radius, style.marker_color);

        draw_line_segment_mut(
            image,
            (start.0 as f32, start.1 as f32),
            (end.0 as f32, end.1 as f32),
            style.line_color,
        );
    }

    Ok(extraction.segments.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use isofield_common::GridSpec;

    fn table_2x2(values: [f64; 4]) -> NodeValueTable {
        let domain = DomainRect::new(0.0, 1.0, 0.0, 1.0).unwrap();
        let grid = GridSpec::new(2, 2).unwrap();
        NodeValueTable::from_values(&domain, grid, values.to_vec()).unwrap()
    }

    #[test]
    fn test_generate_contour_levels() {
        let levels = generate_contour_levels(0.0, 20.0, 5.0);
        assert_eq!(levels, vec![0.0, 5.0, 10.0, 15.0, 20.0]);

        let levels = generate_contour_levels(2.0, 18.0, 5.0);
        assert_eq!(levels, vec![5.0, 10.0, 15.0]);
    }

    #[test]
    fn test_interpolate_edge() {
        let crossing = interpolate_edge(Point::new(0.0, 0.0), 0.0, Point::new(1.0, 0.0), 10.0, 5.0);
        assert_eq!(crossing, EdgeCrossing::Point(Point::new(0.5, 0.0)));
    }

    #[test]
    fn test_interpolate_degenerate_edge() {
        let crossing = interpolate_edge(Point::new(0.0, 0.0), 3.0, Point::new(1.0, 0.0), 3.0, 3.0);
        assert_eq!(crossing, EdgeCrossing::Degenerate);

        let crossing = interpolate_edge(Point::new(0.0, 0.0), 3.0, Point::new(1.0, 0.0), 3.0, 4.0);
        assert_eq!(crossing, EdgeCrossing::None);
    }

    #[test]
    fn test_classify_flat_cell() {
        let table = table_2x2([5.0; 4]);
        let case = classify_cell(&table, 0, 0, 5.0, &ContourOptions::default());
        assert_eq!(case, CellCase::Empty);
    }

    #[test]
    fn test_classify_single_corner() {
        // v00 above, others below: bottom and left edges cross
        let table = table_2x2([10.0, 0.0, 0.0, 0.0]);
        let case = classify_cell(&table, 0, 0, 5.0, &ContourOptions::default());
        assert_eq!(
            case,
            CellCase::Segment(Segment::new(Point::new(0.5, 0.0), Point::new(0.0, 0.5)))
        );
    }

    #[test]
    fn test_classify_nan_cell() {
        let table = table_2x2([f64::NAN, 10.0, 0.0, 10.0]);
        let case = classify_cell(&table, 0, 0, 5.0, &ContourOptions::default());
        assert_eq!(case, CellCase::NoData);
    }
}
