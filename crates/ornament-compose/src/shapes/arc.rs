// Imports
use super::Shapeable;
use crate::ext::Vector2Ext;
use crate::validation::{self, ValidationError};
use kurbo::Shape;

/// A circular arc.
///
/// Angles are in degrees and run counter-clockwise on screen, starting at the positive x-axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arc {
    /// The center, relative to the anchor.
    pub center: na::Vector2<f64>,
    /// The radius.
    pub radius: f64,
    /// The start angle, in degrees.
    pub start_angle: f64,
    /// The end angle, in degrees.
    pub end_angle: f64,
}

impl Shapeable for Arc {
    fn offsets(&self) -> Vec<na::Vector2<f64>> {
        vec![self.center]
    }

    fn outline_path(&self, resolved: &[na::Vector2<f64>]) -> kurbo::BezPath {
        let mut path = kurbo::BezPath::new();
        if let Some(arc) = self.to_kurbo(resolved) {
            path.extend(arc.path_elements(super::PATH_TOLERANCE));
        }
        path
    }
}

impl Arc {
    /// A new arc. The radius must be positive and the angles finite.
    pub fn new(
        center: na::Vector2<f64>,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
    ) -> Result<Self, ValidationError> {
        validation::ensure_positive("arc radius", radius)?;
        validation::ensure(start_angle.is_finite() && end_angle.is_finite(), || {
            format!("arc angles must be finite, got `{start_angle}` and `{end_angle}`")
        })?;
        Ok(Self {
            center,
            radius,
            start_angle,
            end_angle,
        })
    }

    /// The swept angle in degrees, in range [0.0, 360.0].
    ///
    /// An end angle smaller than the start angle wraps around.
    pub fn sweep(&self) -> f64 {
        let sweep = self.end_angle - self.start_angle;
        if sweep < 0.0 {
            sweep.rem_euclid(360.0)
        } else {
            sweep.min(360.0)
        }
    }

    /// The point on the arc at the given angle (degrees), with the resolved center.
    pub fn point_at(center: na::Vector2<f64>, radius: f64, angle: f64) -> na::Vector2<f64> {
        let angle = angle.to_radians();
        center + na::vector![angle.cos(), -angle.sin()] * radius
    }

    /// The arc as kurbo type, at the resolved center.
    ///
    /// Kurbo angles run clockwise on screen, so they are negated.
    pub fn to_kurbo(&self, resolved: &[na::Vector2<f64>]) -> Option<kurbo::Arc> {
        match resolved {
            [center] => Some(kurbo::Arc {
                center: center.to_kurbo_point(),
                radii: kurbo::Vec2::new(self.radius, self.radius),
                start_angle: -self.start_angle.to_radians(),
                sweep_angle: -self.sweep().to_radians(),
                x_rotation: 0.0,
            }),
            _ => None,
        }
    }
}

/// A filled circle sector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pie(pub Arc);

impl Shapeable for Pie {
    fn offsets(&self) -> Vec<na::Vector2<f64>> {
        self.0.offsets()
    }

    fn outline_path(&self, resolved: &[na::Vector2<f64>]) -> kurbo::BezPath {
        let mut path = kurbo::BezPath::new();
        let (Some(arc), [center]) = (self.0.to_kurbo(resolved), resolved) else {
            return path;
        };
        let arc_start = Arc::point_at(*center, self.0.radius, self.0.start_angle);

        path.move_to(center.to_kurbo_point());
        path.line_to(arc_start.to_kurbo_point());
        path.extend(arc.append_iter(super::PATH_TOLERANCE));
        path.close_path();
        path
    }
}

impl Pie {
    /// A new pie. The radius must be positive and the angles finite.
    pub fn new(
        center: na::Vector2<f64>,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
    ) -> Result<Self, ValidationError> {
        Ok(Self(Arc::new(center, radius, start_angle, end_angle)?))
    }
}
