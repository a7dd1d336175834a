// Imports
use super::Shapeable;
use crate::ext::Vector2Ext;
use crate::validation::{self, ValidationError};
use kurbo::Shape;

/// A circle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    /// The center, relative to the anchor.
    pub center: na::Vector2<f64>,
    /// The radius.
    pub radius: f64,
}

impl Shapeable for Circle {
    fn offsets(&self) -> Vec<na::Vector2<f64>> {
        vec![self.center]
    }

    fn outline_path(&self, resolved: &[na::Vector2<f64>]) -> kurbo::BezPath {
        match self.to_kurbo(resolved) {
            Some(circle) => circle.to_path(super::PATH_TOLERANCE),
            None => kurbo::BezPath::new(),
        }
    }
}

impl Circle {
    /// A new circle. The radius must be positive.
    pub fn new(center: na::Vector2<f64>, radius: f64) -> Result<Self, ValidationError> {
        validation::ensure_positive("circle radius", radius)?;
        Ok(Self { center, radius })
    }

    /// The circle as kurbo type, at the resolved center.
    pub fn to_kurbo(&self, resolved: &[na::Vector2<f64>]) -> Option<kurbo::Circle> {
        match resolved {
            [center] => Some(kurbo::Circle::new(center.to_kurbo_point(), self.radius)),
            _ => None,
        }
    }
}
