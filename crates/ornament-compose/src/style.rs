// Imports
use crate::validation::{ensure, ensure_non_negative};
use crate::{Color, ValidationError};
use serde::{Deserialize, Serialize};

/// The rasterization backend a shape is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename = "raster_backend")]
pub enum RasterBackend {
    /// Pixel exact edges, without antialiasing.
    #[serde(rename = "precise")]
    Precise,
    /// Antialiased edges.
    #[serde(rename = "antialiased")]
    Antialiased,
}

impl Default for RasterBackend {
    fn default() -> Self {
        Self::Antialiased
    }
}

/// How a shape outline is painted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeStyle {
    /// The color.
    pub color: Color,
    /// Whether the shape is filled instead of stroked.
    pub filled: bool,
    /// The stroke width. Zero strokes a hairline, filled shapes must have zero width.
    pub stroke_width: f64,
    /// The rasterization backend.
    pub backend: RasterBackend,
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            filled: false,
            stroke_width: 0.0,
            backend: RasterBackend::default(),
        }
    }
}

impl ShapeStyle {
    /// The stroke width that is used when zero is requested for a stroked shape.
    pub const HAIRLINE_WIDTH: f64 = 1.0;

    /// A new style.
    ///
    /// Fails when the stroke width is negative, or non-zero for a filled shape.
    pub fn new(
        color: Color,
        filled: bool,
        stroke_width: f64,
        backend: RasterBackend,
    ) -> Result<Self, ValidationError> {
        ensure_non_negative("stroke width", stroke_width)?;
        ensure(!filled || stroke_width == 0.0, || {
            format!("filled shapes must have a stroke width of 0, got `{stroke_width}`")
        })?;

        Ok(Self {
            color,
            filled,
            stroke_width,
            backend,
        })
    }

    /// A filled style.
    pub fn filled(color: Color, backend: RasterBackend) -> Self {
        Self {
            color,
            filled: true,
            stroke_width: 0.0,
            backend,
        }
    }

    /// A stroked style.
    pub fn stroked(
        color: Color,
        stroke_width: f64,
        backend: RasterBackend,
    ) -> Result<Self, ValidationError> {
        Self::new(color, false, stroke_width, backend)
    }

    /// A stroked style with the thinnest possible outline.
    pub fn hairline(color: Color, backend: RasterBackend) -> Self {
        Self {
            color,
            filled: false,
            stroke_width: 0.0,
            backend,
        }
    }

    /// The width the outline is actually stroked with. Zero when filled.
    pub fn effective_stroke_width(&self) -> f64 {
        if self.filled {
            0.0
        } else {
            self.stroke_width.max(Self::HAIRLINE_WIDTH)
        }
    }

    /// How far the painted area extends beyond the outline path.
    pub fn bounds_margin(&self) -> f64 {
        self.effective_stroke_width() * 0.5
    }
}
