//! Overlay of the sampling grid's interior cell boundaries.

use image::{GenericImage, Rgba};
use imageproc::drawing::draw_line_segment_mut;
use isofield_common::{DomainRect, FieldError, FieldResult, GridSpec};

/// Pixel columns and rows of the interior grid lines.
///
/// Returns `k - 2` columns and `m - 2` rows; the domain boundary itself is
/// never part of the result.
pub fn interior_line_positions(
    domain: &DomainRect,
    grid: &GridSpec,
    width: u32,
    height: u32,
) -> (Vec<i64>, Vec<i64>) {
    let pixel = domain.pixel_size(width, height);

    let columns = (1..grid.columns() - 1)
        .map(|i| {
            let (x, y) = domain.node_coord(grid, i, 0);
            domain.domain_to_pixel(x, y, &pixel).0
        })
        .collect();
    let rows = (1..grid.rows() - 1)
        .map(|j| {
            let (x, y) = domain.node_coord(grid, 0, j);
            domain.domain_to_pixel(x, y, &pixel).1
        })
        .collect();

    (columns, rows)
}

/// Draw the interior grid lines across the full image.
pub fn render_grid_lines<I>(
    image: &mut I,
    domain: &DomainRect,
    grid: &GridSpec,
    color: Rgba<u8>,
) -> FieldResult<()>
where
    I: GenericImage<Pixel = Rgba<u8>>,
{
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(FieldError::EmptyImage { width, height });
    }

    let (columns, rows) = interior_line_positions(domain, grid, width, height);
    let right = (width - 1) as f32;
    let bottom = (height - 1) as f32;

    for &x in &columns {
        draw_line_segment_mut(image, (x as f32, 0.0), (x as f32, bottom), color);
    }
    for &y in &rows {
        draw_line_segment_mut(image, (0.0, y as f32), (right, y as f32), color);
    }

    tracing::debug!(
        columns = grid.columns(),
        rows = grid.rows(),
        vertical_lines = columns.len(),
        horizontal_lines = rows.len(),
        "Rendered grid lines"
    );

    Ok(())
}
