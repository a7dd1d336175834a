// Imports
use super::Shapeable;
use crate::ext::Vector2Ext;
use crate::validation::{self, ValidationError};
use kurbo::Shape;

/// An axis aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rectangle {
    /// The upper-left corner.
    pub pos: na::Vector2<f64>,
    /// Width and height.
    pub size: na::Vector2<f64>,
}

impl Shapeable for Rectangle {
    fn offsets(&self) -> Vec<na::Vector2<f64>> {
        vec![self.pos, self.pos + self.size]
    }

    fn outline_path(&self, resolved: &[na::Vector2<f64>]) -> kurbo::BezPath {
        match Self::to_kurbo(resolved) {
            Some(rect) => rect.to_path(super::PATH_TOLERANCE),
            None => kurbo::BezPath::new(),
        }
    }
}

impl Rectangle {
    /// A new rectangle. Width and height must be positive.
    pub fn new(pos: na::Vector2<f64>, size: na::Vector2<f64>) -> Result<Self, ValidationError> {
        validation::ensure_positive("rectangle width", size[0])?;
        validation::ensure_positive("rectangle height", size[1])?;
        Ok(Self { pos, size })
    }

    /// The rectangle as kurbo type, with the given resolved corners.
    pub fn to_kurbo(resolved: &[na::Vector2<f64>]) -> Option<kurbo::Rect> {
        match resolved {
            [upper_left, lower_right] => Some(kurbo::Rect::from_points(
                upper_left.to_kurbo_point(),
                lower_right.to_kurbo_point(),
            )),
            _ => None,
        }
    }
}
