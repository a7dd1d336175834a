// Imports
use super::Shapeable;
use crate::ext::Vector2Ext;
use crate::validation::{self, ValidationError};

/// A bezier curve of arbitrary degree, approximated by a polyline.
#[derive(Debug, Clone, PartialEq)]
pub struct Bezier {
    /// The control points, relative to the anchor.
    pub control_points: Vec<na::Vector2<f64>>,
    /// The number of points the curve is evaluated at.
    pub steps: usize,
}

impl Shapeable for Bezier {
    /// The generated curve points.
    fn offsets(&self) -> Vec<na::Vector2<f64>> {
        let last = (self.steps.max(Self::MIN_STEPS) - 1) as f64;
        (0..self.steps)
            .map(|i| self.eval(i as f64 / last))
            .collect()
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
        path
    }
}

impl Bezier {
    /// The minimum number of control points.
    pub const MIN_POINTS: usize = 3;
    /// The minimum number of steps.
    pub const MIN_STEPS: usize = 2;

    /// A new bezier curve. Needs at least three control points and two steps.
    pub fn new(
        control_points: Vec<na::Vector2<f64>>,
        steps: usize,
    ) -> Result<Self, ValidationError> {
        validation::ensure_min_points("bezier curve", &control_points, Self::MIN_POINTS)?;
        validation::ensure(steps >= Self::MIN_STEPS, || {
            format!(
                "bezier curve needs at least {} steps, got {steps}",
                Self::MIN_STEPS
            )
        })?;
        Ok(Self {
            control_points,
            steps,
        })
    }

    /// Evaluates the curve at `t` in range [0.0, 1.0] (De Casteljau).
    pub fn eval(&self, t: f64) -> na::Vector2<f64> {
        let mut points = self.control_points.clone();
        for k in (1..points.len()).rev() {
            for i in 0..k {
                points[i] = points[i].lerp(&points[i + 1], t);
            }
        }
        points.into_iter().next().unwrap_or_else(na::Vector2::zeros)
    }
}
