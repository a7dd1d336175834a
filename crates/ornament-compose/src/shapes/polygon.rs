// Imports
use super::Shapeable;
use crate::ext::Vector2Ext;
use crate::validation::{self, ValidationError};

/// A closed polygon.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    /// The vertices, relative to the anchor.
    pub points: Vec<na::Vector2<f64>>,
}

impl Shapeable for Polygon {
    fn offsets(&self) -> Vec<na::Vector2<f64>> {
        self.points.clone()
    }

    fn outline_path(&self, resolved: &[na::Vector2<f64>]) -> kurbo::BezPath {
        let mut path = kurbo::BezPath::new();
        let Some((first, rest)) = resolved.split_first() else {
            return path;
        };
        path.move_to(first.to_kurbo_point());
        for p in rest {
            path.line_to(p.to_kurbo_point());
        }
        path.close_path();
        path
    }
}

impl Polygon {
    /// The minimum number of vertices.
    pub const MIN_POINTS: usize = 3;

    /// A new polygon, needs at least three vertices.
    pub fn new(points: Vec<na::Vector2<f64>>) -> Result<Self, ValidationError> {
        validation::ensure_min_points("polygon", &points, Self::MIN_POINTS)?;
        Ok(Self { points })
    }
}
