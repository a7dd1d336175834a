// Imports
use super::DecorationKind;
use crate::render::Image;
use crate::text::TextStyle;
use crate::widget::Widget;
use ornament_compose::shapes::{
    Arc, Bezier, Circle, Ellipse, Line, Pie, Polygon, Rectangle, Shapeable,
};
use ornament_compose::validation::{self, ValidationError};
use ornament_compose::{Color, RasterBackend, ShapeStyle};

/// A draw function that receives the target context and the owning widget.
pub struct DrawCallback(Box<dyn Fn(&cairo::Context, &dyn Widget)>);

impl std::fmt::Debug for DrawCallback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("DrawCallback")
            .field(&String::from("- no debug impl -"))
            .finish()
    }
}

impl DrawCallback {
    pub fn new(callback: impl Fn(&cairo::Context, &dyn Widget) + 'static) -> Self {
        Self(Box::new(callback))
    }

    pub fn call(&self, cx: &cairo::Context, widget: &dyn Widget) {
        (self.0)(cx, widget)
    }
}

/// Distinguishes free lines from axis aligned ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOrientation {
    Free,
    Horizontal,
    Vertical,
}

/// The kind specific parameters of a decoration.
///
/// All positions are offsets relative to the anchor, which is the center of the owning widget.
/// The constructors validate the geometric preconditions of each kind.
#[derive(Debug)]
pub enum DecorationParams {
    /// Draws nothing.
    None,
    Pixel {
        pos: na::Vector2<f64>,
        color: Color,
    },
    Line {
        line: Line,
        orientation: LineOrientation,
        style: ShapeStyle,
    },
    Rect {
        rect: Rectangle,
        style: ShapeStyle,
    },
    Circle {
        circle: Circle,
        style: ShapeStyle,
    },
    Ellipse {
        ellipse: Ellipse,
        style: ShapeStyle,
    },
    Arc {
        arc: Arc,
        style: ShapeStyle,
    },
    Pie {
        pie: Pie,
        style: ShapeStyle,
    },
    /// A stroked or filled polygon.
    Polygon {
        polygon: Polygon,
        style: ShapeStyle,
    },
    /// A polygon filled with a repeating texture.
    TexturedPolygon {
        polygon: Polygon,
        texture: cairo::ImageSurface,
        /// The texture origin, relative to the anchor.
        texture_offset: na::Vector2<f64>,
    },
    Bezier {
        bezier: Bezier,
        style: ShapeStyle,
    },
    /// A raw surface blit.
    Surface {
        pos: na::Vector2<f64>,
        surface: cairo::ImageSurface,
        /// When true `pos` is the center of the surface, else its upper-left corner.
        centered: bool,
    },
    Image {
        pos: na::Vector2<f64>,
        image: Image,
        /// When true `pos` is the center of the image, else its upper-left corner.
        centered: bool,
    },
    Text {
        pos: na::Vector2<f64>,
        text: String,
        style: TextStyle,
        /// When true the text is centered on the anchor.
        centered: bool,
    },
    Callable(DrawCallback),
}

impl DecorationParams {
    pub fn none() -> Self {
        Self::None
    }

    pub fn pixel(pos: na::Vector2<f64>, color: Color) -> Self {
        Self::Pixel { pos, color }
    }

    /// A line. The width must be positive.
    pub fn line(
        start: na::Vector2<f64>,
        end: na::Vector2<f64>,
        color: Color,
        width: f64,
        backend: RasterBackend,
    ) -> Result<Self, ValidationError> {
        validation::ensure_positive("line width", width)?;
        Ok(Self::Line {
            line: Line::new(start, end),
            orientation: LineOrientation::Free,
            style: ShapeStyle::stroked(color, width, backend)?,
        })
    }

    /// A one pixel wide horizontal line.
    pub fn hline(x1: f64, x2: f64, y: f64, color: Color) -> Self {
        Self::Line {
            line: Line::horizontal(x1, x2, y),
            orientation: LineOrientation::Horizontal,
            style: ShapeStyle::hairline(color, RasterBackend::Precise),
        }
    }

    /// A one pixel wide vertical line.
    pub fn vline(x: f64, y1: f64, y2: f64, color: Color) -> Self {
        Self::Line {
            line: Line::vertical(x, y1, y2),
            orientation: LineOrientation::Vertical,
            style: ShapeStyle::hairline(color, RasterBackend::Precise),
        }
    }

    /// A rectangle with its upper-left corner at `pos`. Filled when `width` is zero.
    pub fn rect(
        pos: na::Vector2<f64>,
        size: na::Vector2<f64>,
        color: Color,
        width: f64,
        backend: RasterBackend,
    ) -> Result<Self, ValidationError> {
        validation::ensure_non_negative("rectangle border width", width)?;
        let style = if width == 0.0 {
            ShapeStyle::filled(color, backend)
        } else {
            ShapeStyle::stroked(color, width, backend)?
        };
        Ok(Self::Rect {
            rect: Rectangle::new(pos, size)?,
            style,
        })
    }

    pub fn circle(
        center: na::Vector2<f64>,
        radius: f64,
        color: Color,
        filled: bool,
        width: f64,
        backend: RasterBackend,
    ) -> Result<Self, ValidationError> {
        Ok(Self::Circle {
            circle: Circle::new(center, radius)?,
            style: ShapeStyle::new(color, filled, width, backend)?,
        })
    }

    pub fn ellipse(
        center: na::Vector2<f64>,
        radii: na::Vector2<f64>,
        color: Color,
        filled: bool,
        backend: RasterBackend,
    ) -> Result<Self, ValidationError> {
        Ok(Self::Ellipse {
            ellipse: Ellipse::new(center, radii)?,
            style: ShapeStyle::new(color, filled, 0.0, backend)?,
        })
    }

    /// An arc from `start_angle` to `end_angle` in degrees. A width of zero strokes a hairline.
    pub fn arc(
        center: na::Vector2<f64>,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        color: Color,
        width: f64,
        backend: RasterBackend,
    ) -> Result<Self, ValidationError> {
        Ok(Self::Arc {
            arc: Arc::new(center, radius, start_angle, end_angle)?,
            style: ShapeStyle::stroked(color, width, backend)?,
        })
    }

    pub fn pie(
        center: na::Vector2<f64>,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        color: Color,
        backend: RasterBackend,
    ) -> Result<Self, ValidationError> {
        Ok(Self::Pie {
            pie: Pie::new(center, radius, start_angle, end_angle)?,
            style: ShapeStyle::filled(color, backend),
        })
    }

    pub fn polygon(
        points: Vec<na::Vector2<f64>>,
        color: Color,
        filled: bool,
        width: f64,
        backend: RasterBackend,
    ) -> Result<Self, ValidationError> {
        Ok(Self::Polygon {
            polygon: Polygon::new(points)?,
            style: ShapeStyle::new(color, filled, width, backend)?,
        })
    }

    pub fn filled_polygon(
        points: Vec<na::Vector2<f64>>,
        color: Color,
        backend: RasterBackend,
    ) -> Result<Self, ValidationError> {
        Self::polygon(points, color, true, 0.0, backend)
    }

    /// A polygon filled with the texture repeated in both directions, starting at `texture_offset`.
    pub fn textured_polygon(
        points: Vec<na::Vector2<f64>>,
        texture: &Image,
        texture_offset: na::Vector2<f64>,
    ) -> Result<Self, ValidationError> {
        let polygon = Polygon::new(points)?;
        let texture = texture
            .to_cairo_surface()
            .map_err(|e| ValidationError::new(format!("invalid polygon texture, Err: {e:?}")))?;
        Ok(Self::TexturedPolygon {
            polygon,
            texture,
            texture_offset,
        })
    }

    /// A bezier curve through the control points, evaluated at `steps` points and stroked as a hairline.
    pub fn bezier(
        control_points: Vec<na::Vector2<f64>>,
        color: Color,
        steps: usize,
        backend: RasterBackend,
    ) -> Result<Self, ValidationError> {
        Ok(Self::Bezier {
            bezier: Bezier::new(control_points, steps)?,
            style: ShapeStyle::hairline(color, backend),
        })
    }

    pub fn surface(pos: na::Vector2<f64>, surface: cairo::ImageSurface, centered: bool) -> Self {
        Self::Surface {
            pos,
            surface,
            centered,
        }
    }

    pub fn image(
        pos: na::Vector2<f64>,
        image: Image,
        centered: bool,
    ) -> Result<Self, ValidationError> {
        image
            .assert_valid()
            .map_err(|e| ValidationError::new(format!("{e}")))?;
        Ok(Self::Image {
            pos,
            image,
            centered,
        })
    }

    /// A text. Centered text is placed on the anchor and can't have an offset.
    pub fn text(
        pos: na::Vector2<f64>,
        text: impl Into<String>,
        style: TextStyle,
        centered: bool,
    ) -> Result<Self, ValidationError> {
        style.validate()?;
        validation::ensure(!centered || pos == na::Vector2::zeros(), || {
            format!(
                "centered text must have a zero offset, got `({}, {})`",
                pos[0], pos[1]
            )
        })?;
        Ok(Self::Text {
            pos,
            text: text.into(),
            style,
            centered,
        })
    }

    pub fn callable(callback: impl Fn(&cairo::Context, &dyn Widget) + 'static) -> Self {
        Self::Callable(DrawCallback::new(callback))
    }

    pub fn kind(&self) -> DecorationKind {
        match self {
            DecorationParams::None => DecorationKind::None,
            DecorationParams::Pixel { .. } => DecorationKind::Pixel,
            DecorationParams::Line { orientation, .. } => match orientation {
                LineOrientation::Free => DecorationKind::Line,
                LineOrientation::Horizontal => DecorationKind::HLine,
                LineOrientation::Vertical => DecorationKind::VLine,
            },
            DecorationParams::Rect { .. } => DecorationKind::Rect,
            DecorationParams::Circle { .. } => DecorationKind::Circle,
            DecorationParams::Ellipse { .. } => DecorationKind::Ellipse,
            DecorationParams::Arc { .. } => DecorationKind::Arc,
            DecorationParams::Pie { .. } => DecorationKind::Pie,
            DecorationParams::Polygon { style, .. } => {
                if style.filled {
                    DecorationKind::FilledPolygon
                } else {
                    DecorationKind::Polygon
                }
            }
            DecorationParams::TexturedPolygon { .. } => DecorationKind::TexturedPolygon,
            DecorationParams::Bezier { .. } => DecorationKind::Bezier,
            DecorationParams::Surface { .. } => DecorationKind::Surface,
            DecorationParams::Image { .. } => DecorationKind::Image,
            DecorationParams::Text { .. } => DecorationKind::Text,
            DecorationParams::Callable(_) => DecorationKind::Callable,
        }
    }

    /// The characteristic points relative to the anchor.
    ///
    /// For bezier curves these are the generated curve points.
    pub fn offsets(&self) -> Vec<na::Vector2<f64>> {
        match self {
            DecorationParams::None | DecorationParams::Callable(_) => vec![],
            DecorationParams::Pixel { pos, .. }
            | DecorationParams::Surface { pos, .. }
            | DecorationParams::Image { pos, .. }
            | DecorationParams::Text { pos, .. } => vec![*pos],
            DecorationParams::Line { line, .. } => line.offsets(),
            DecorationParams::Rect { rect, .. } => rect.offsets(),
            DecorationParams::Circle { circle, .. } => circle.offsets(),
            DecorationParams::Ellipse { ellipse, .. } => ellipse.offsets(),
            DecorationParams::Arc { arc, .. } => arc.offsets(),
            DecorationParams::Pie { pie, .. } => pie.offsets(),
            DecorationParams::Polygon { polygon, .. }
            | DecorationParams::TexturedPolygon { polygon, .. } => polygon.offsets(),
            DecorationParams::Bezier { bezier, .. } => bezier.offsets(),
        }
    }

    /// The characteristic points in surface coordinates, for the given anchor.
    pub fn resolve(&self, anchor: na::Point2<f64>) -> Vec<na::Vector2<f64>> {
        self.offsets()
            .into_iter()
            .map(|offset| anchor.coords + offset)
            .collect()
    }

    /// The result of callables may depend on state outside of the decorator.
    pub fn is_callable(&self) -> bool {
        matches!(self, DecorationParams::Callable(_))
    }
}
