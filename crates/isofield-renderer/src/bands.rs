//! Color-banded heat map rendering.
//!
//! The field's value range is split into one equal-width band per palette
//! color and every pixel takes the color of the band its center falls in.

use image::{GenericImage, Rgba};
use isofield_common::{DomainRect, FieldError, FieldResult, Palette};

use crate::field::ScalarField;

/// Maps field values to palette bands.
#[derive(Debug, Clone)]
pub struct BandColorizer {
    palette: Palette,
    min: f64,
    max: f64,
    step: f64,
}

impl BandColorizer {
    /// Create a colorizer for values in `[min, max]`.
    pub fn new(palette: Palette, min: f64, max: f64) -> FieldResult<Self> {
        if !min.is_finite() || !max.is_finite() || max < min {
            return Err(FieldError::InvalidExtrema { min, max });
        }
        let step = (max - min) / palette.len() as f64;
        Ok(Self {
            palette,
            min,
            max,
            step,
        })
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// Width of one band, `(max - min) / N`.
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Band holding `value`, always within `[0, N - 1]`.
    ///
    /// `max` itself belongs to the last band. Values below `min`, NaN and
    /// every value of a constant field (zero step) belong to band 0.
    pub fn band_index(&self, value: f64) -> usize {
        let last = self.palette.len() - 1;
        if self.step <= 0.0 || value.is_nan() {
            return 0;
        }

        let band = ((value - self.min) / self.step).floor();
        if band <= 0.0 {
            0
        } else if band >= last as f64 {
            last
        } else {
            band as usize
        }
    }

    /// Palette color for `value`.
    pub fn color_for(&self, value: f64) -> [u8; 4] {
        self.color_of_band(self.band_index(value))
    }

    /// Color of `band`; indices past the end map to the last color.
    pub fn color_of_band(&self, band: usize) -> [u8; 4] {
        self.palette.get(band).unwrap_or_else(|| self.palette.last())
    }

    /// Values separating adjacent bands, `min + i * step` for `i in 1..N`.
    pub fn band_levels(&self) -> Vec<f64> {
        if self.step <= 0.0 {
            return vec![];
        }
        (1..self.palette.len())
            .map(|i| self.min + i as f64 * self.step)
            .collect()
    }
}

/// Paint every pixel of `image` with the band color of the field value at
/// the pixel's center.
pub fn render_bands<I, F>(
    image: &mut I,
    field: &F,
    domain: &DomainRect,
    colorizer: &BandColorizer,
) -> FieldResult<()>
where
    I: GenericImage<Pixel = Rgba<u8>>,
    F: ScalarField + ?Sized,
{
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(FieldError::EmptyImage { width, height });
    }

    let pixel = domain.pixel_size(width, height);
    let mut band_counts = vec![0usize; colorizer.palette().len()];

    for py in 0..height {
        for px in 0..width {
            let (x, y) = domain.pixel_center_to_domain(px, py, &pixel);
            let band = colorizer.band_index(field.apply(x, y));
            band_counts[band] += 1;
            image.put_pixel(px, py, Rgba(colorizer.color_of_band(band)));
        }
    }

    tracing::debug!(
        width = width,
        height = height,
        bands = colorizer.palette().len(),
        step = colorizer.step(),
        ?band_counts,
        "Rendered band map"
    );

    Ok(())
}
