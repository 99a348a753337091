//! Entry point tying the field, domain and palette to the drawing stages.

use image::{GenericImage, Rgba};
use isofield_common::{DomainRect, FieldError, FieldResult, GridSpec, Palette, VisualizerConfig};

use crate::bands::{render_bands, BandColorizer};
use crate::contour::{extract_isolines, render_isolines, IsolineExtraction};
use crate::field::ScalarField;
use crate::gridlines::render_grid_lines;
use crate::sampler::NodeValueTable;
use crate::style::{configured_levels, GridLineStyle, IsolineStyle};

/// Draws heat maps, grid overlays and isolines of one scalar field.
///
/// Field, domain, palette and the derived band width are fixed at
/// construction. Every drawing call samples what it needs afresh and only
/// writes pixels of the caller's image.
#[derive(Debug, Clone)]
pub struct FieldVisualizer<F> {
    field: F,
    domain: DomainRect,
    colorizer: BandColorizer,
    grid_style: GridLineStyle,
    isoline_style: IsolineStyle,
}

impl<F: ScalarField> FieldVisualizer<F> {
    /// Create a visualizer, querying the field's extrema over `domain` once.
    pub fn new(palette: Palette, field: F, domain: DomainRect) -> FieldResult<Self> {
        let min = field.min(&domain);
        let max = field.max(&domain);
        let colorizer = BandColorizer::new(palette, min, max)?;

        tracing::debug!(
            a = domain.a(),
            b = domain.b(),
            c = domain.c(),
            d = domain.d(),
            min = min,
            max = max,
            bands = colorizer.palette().len(),
            step = colorizer.step(),
            "Created field visualizer"
        );

        Ok(Self {
            field,
            domain,
            colorizer,
            grid_style: GridLineStyle::default(),
            isoline_style: IsolineStyle::default(),
        })
    }

    /// Create a visualizer from a parsed configuration.
    pub fn from_config(config: &VisualizerConfig, field: F) -> FieldResult<Self> {
        config.validate()?;
        Ok(Self::new(config.palette()?, field, config.domain)?
            .with_grid_style(GridLineStyle::from_config(&config.grid_lines)?)
            .with_isoline_style(IsolineStyle::from_config(&config.isolines)?))
    }

    pub fn with_grid_style(mut self, style: GridLineStyle) -> Self {
        self.grid_style = style;
        self
    }

    pub fn with_isoline_style(mut self, style: IsolineStyle) -> Self {
        self.isoline_style = style;
        self
    }

    pub fn field(&self) -> &F {
        &self.field
    }

    pub fn domain(&self) -> &DomainRect {
        &self.domain
    }

    pub fn colorizer(&self) -> &BandColorizer {
        &self.colorizer
    }

    pub fn isoline_style(&self) -> &IsolineStyle {
        &self.isoline_style
    }

    /// Paint every pixel with the color of the band its center falls in.
    pub fn draw_map<'a, I>(&self, image: &'a mut I) -> FieldResult<&'a mut I>
    where
        I: GenericImage<Pixel = Rgba<u8>>,
    {
        render_bands(image, &self.field, &self.domain, &self.colorizer)?;
        Ok(image)
    }

    /// Draw the interior boundaries of a `k x m` node grid.
    pub fn draw_grid<'a, I>(&self, image: &'a mut I, k: usize, m: usize) -> FieldResult<&'a mut I>
    where
        I: GenericImage<Pixel = Rgba<u8>>,
    {
        let grid = GridSpec::new(k, m)?;
        render_grid_lines(image, &self.domain, &grid, self.grid_style.color)?;
        Ok(image)
    }

    /// Draw the isoline at `level` extracted on a `k x m` node grid.
    pub fn draw_isolines<'a, I>(
        &self,
        image: &'a mut I,
        k: usize,
        m: usize,
        level: f64,
    ) -> FieldResult<&'a mut I>
    where
        I: GenericImage<Pixel = Rgba<u8>>,
    {
        self.draw_isolines_at(image, k, m, &[level])
    }

    /// Draw isolines for several levels, sampling the field only once.
    pub fn draw_isolines_at<'a, I>(
        &self,
        image: &'a mut I,
        k: usize,
        m: usize,
        levels: &[f64],
    ) -> FieldResult<&'a mut I>
    where
        I: GenericImage<Pixel = Rgba<u8>>,
    {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(FieldError::EmptyImage { width, height });
        }

        for extraction in self.extract_isolines(k, m, levels)? {
            let drawn = render_isolines(image, &self.domain, &extraction, &self.isoline_style)?;
            tracing::debug!(
                level = extraction.level,
                columns = k,
                rows = m,
                segments = drawn,
                inconsistent_cells = extraction.cells.inconsistent,
                saddle_cells = extraction.cells.saddle,
                "Rendered isolines"
            );
        }

        Ok(image)
    }

    /// Draw an isoline at every boundary between adjacent palette bands.
    pub fn draw_band_isolines<'a, I>(
        &self,
        image: &'a mut I,
        k: usize,
        m: usize,
    ) -> FieldResult<&'a mut I>
    where
        I: GenericImage<Pixel = Rgba<u8>>,
    {
        let levels = self.colorizer.band_levels();
        self.draw_isolines_at(image, k, m, &levels)
    }

    /// Draw the levels requested by a configuration's isoline section.
    pub fn draw_configured_isolines<'a, I>(
        &self,
        image: &'a mut I,
        config: &VisualizerConfig,
    ) -> FieldResult<&'a mut I>
    where
        I: GenericImage<Pixel = Rgba<u8>>,
    {
        let grid = config
            .grid
            .ok_or_else(|| FieldError::Config("isolines require a grid section".to_string()))?;
        let levels = configured_levels(&config.isolines, self.colorizer.min(), self.colorizer.max());
        if levels.is_empty() {
            tracing::warn!("No isoline levels configured; nothing drawn");
        }
        self.draw_isolines_at(image, grid.columns(), grid.rows(), &levels)
    }

    /// Sample the field on a `k x m` grid and extract segments for each level
    /// without drawing.
    pub fn extract_isolines(
        &self,
        k: usize,
        m: usize,
        levels: &[f64],
    ) -> FieldResult<Vec<IsolineExtraction>> {
        let grid = GridSpec::new(k, m)?;
        let table = NodeValueTable::sample(&self.field, &self.domain, grid);
        Ok(levels
            .iter()
            .map(|&level| extract_isolines(&table, level, &self.isoline_style.options))
            .collect())
    }
}
