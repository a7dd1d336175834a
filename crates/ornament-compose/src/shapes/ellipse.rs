// Imports
use super::Shapeable;
use crate::ext::Vector2Ext;
use crate::validation::{self, ValidationError};
use kurbo::Shape;

/// An axis aligned ellipse.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipse {
    /// The center, relative to the anchor.
    pub center: na::Vector2<f64>,
    /// The radii of the ellipse.
    pub radii: na::Vector2<f64>,
}

impl Shapeable for Ellipse {
    fn offsets(&self) -> Vec<na::Vector2<f64>> {
        vec![self.center]
    }

    fn outline_path(&self, resolved: &[na::Vector2<f64>]) -> kurbo::BezPath {
        match self.to_kurbo(resolved) {
            Some(ellipse) => ellipse.to_path(super::PATH_TOLERANCE),
            None => kurbo::BezPath::new(),
        }
    }
}

impl Ellipse {
    /// A new ellipse. Both radii must be positive.
    pub fn new(center: na::Vector2<f64>, radii: na::Vector2<f64>) -> Result<Self, ValidationError> {
        validation::ensure_positive("ellipse x radius", radii[0])?;
        validation::ensure_positive("ellipse y radius", radii[1])?;
        Ok(Self { center, radii })
    }

    /// The ellipse as kurbo type, at the resolved center.
    pub fn to_kurbo(&self, resolved: &[na::Vector2<f64>]) -> Option<kurbo::Ellipse> {
        match resolved {
            [center] => Some(kurbo::Ellipse::new(
                center.to_kurbo_point(),
                self.radii.to_kurbo_vec(),
                0.0,
            )),
            _ => None,
        }
    }
}
