// Modules
pub mod draw;
pub mod params;

// Re-exports
pub use params::{DecorationParams, DrawCallback, LineOrientation};

// Imports
use std::borrow::Borrow;
use std::fmt::Display;
use std::ops::{Index, IndexMut};

/// The unique id of a decoration, within the decorator that holds it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DecorationId(String);

impl DecorationId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for DecorationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for DecorationId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for DecorationId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for DecorationId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Whether decorations are drawn before or after the widget content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Partition {
    /// Drawn before the widget content.
    Prev,
    /// Drawn after the widget content.
    Post,
}

impl Partition {
    pub const ALL: [Partition; 2] = [Partition::Prev, Partition::Post];

    /// Both partitions when `None`, else only the given one.
    pub fn selected(partition: Option<Partition>) -> &'static [Partition] {
        match partition {
            None => &Self::ALL,
            Some(Partition::Prev) => &[Partition::Prev],
            Some(Partition::Post) => &[Partition::Post],
        }
    }
}

impl Display for Partition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Partition::Prev => write!(f, "prev"),
            Partition::Post => write!(f, "post"),
        }
    }
}

/// Holds one value per partition.
#[derive(Debug, Clone, Default)]
pub struct PartitionMap<T> {
    prev: T,
    post: T,
}

impl<T> Index<Partition> for PartitionMap<T> {
    type Output = T;

    fn index(&self, partition: Partition) -> &Self::Output {
        match partition {
            Partition::Prev => &self.prev,
            Partition::Post => &self.post,
        }
    }
}

impl<T> IndexMut<Partition> for PartitionMap<T> {
    fn index_mut(&mut self, partition: Partition) -> &mut Self::Output {
        match partition {
            Partition::Prev => &mut self.prev,
            Partition::Post => &mut self.post,
        }
    }
}

/// The kind of a decoration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecorationKind {
    None,
    Pixel,
    Line,
    HLine,
    VLine,
    Rect,
    Circle,
    Ellipse,
    Arc,
    Pie,
    Polygon,
    FilledPolygon,
    TexturedPolygon,
    Bezier,
    Surface,
    Image,
    Text,
    Callable,
}

impl DecorationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DecorationKind::None => "none",
            DecorationKind::Pixel => "pixel",
            DecorationKind::Line => "line",
            DecorationKind::HLine => "hline",
            DecorationKind::VLine => "vline",
            DecorationKind::Rect => "rect",
            DecorationKind::Circle => "circle",
            DecorationKind::Ellipse => "ellipse",
            DecorationKind::Arc => "arc",
            DecorationKind::Pie => "pie",
            DecorationKind::Polygon => "polygon",
            DecorationKind::FilledPolygon => "filled_polygon",
            DecorationKind::TexturedPolygon => "textured_polygon",
            DecorationKind::Bezier => "bezier",
            DecorationKind::Surface => "surface",
            DecorationKind::Image => "image",
            DecorationKind::Text => "text",
            DecorationKind::Callable => "callable",
        }
    }
}

impl Display for DecorationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A decoration record.
#[derive(Debug)]
pub struct Decoration {
    pub id: DecorationId,
    pub partition: Partition,
    pub params: DecorationParams,
    /// Disabled decorations are retained, but skipped when drawing.
    pub enabled: bool,
}

impl Decoration {
    pub fn new(id: DecorationId, partition: Partition, params: DecorationParams) -> Self {
        Self {
            id,
            partition,
            params,
            enabled: true,
        }
    }

    pub fn kind(&self) -> DecorationKind {
        self.params.kind()
    }
}
