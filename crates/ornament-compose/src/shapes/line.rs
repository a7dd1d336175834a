// Imports
use super::Shapeable;
use crate::ext::Vector2Ext;

/// A line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    /// The line start
    pub start: na::Vector2<f64>,
    /// The line end
    pub end: na::Vector2<f64>,
}

impl Shapeable for Line {
    fn offsets(&self) -> Vec<na::Vector2<f64>> {
        vec![self.start, self.end]
    }

    fn outline_path(&self, resolved: &[na::Vector2<f64>]) -> kurbo::BezPath {
        let mut path = kurbo::BezPath::new();
        if let [start, end] = resolved {
            path.move_to(start.to_kurbo_point());
            path.line_to(end.to_kurbo_point());
        }
        path
    }
}

impl Line {
    /// A new line
    pub fn new(start: na::Vector2<f64>, end: na::Vector2<f64>) -> Self {
        Self { start, end }
    }

    /// A horizontal line at height `y`, spanning from `x1` to `x2`.
    pub fn horizontal(x1: f64, x2: f64, y: f64) -> Self {
        Self::new(na::vector![x1, y], na::vector![x2, y])
    }

    /// A vertical line at `x`, spanning from `y1` to `y2`.
    pub fn vertical(x: f64, y1: f64, y2: f64) -> Self {
        Self::new(na::vector![x, y1], na::vector![x, y2])
    }

    /// The line as kurbo type, with the given resolved points.
    pub fn to_kurbo(resolved: &[na::Vector2<f64>]) -> Option<kurbo::Line> {
        match resolved {
            [start, end] => Some(kurbo::Line::new(
                start.to_kurbo_point(),
                end.to_kurbo_point(),
            )),
            _ => None,
        }
    }
}
