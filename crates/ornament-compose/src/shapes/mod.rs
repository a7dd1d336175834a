// Modules
mod arc;
mod bezier;
mod circle;
mod ellipse;
mod line;
mod polygon;
mod rectangle;

// Re-exports
pub use arc::{Arc, Pie};
pub use bezier::Bezier;
pub use circle::Circle;
pub use ellipse::Ellipse;
pub use line::Line;
pub use polygon::Polygon;
pub use rectangle::Rectangle;

// Imports
use crate::ext::AabbExt;
use kurbo::Shape;
use p2d::bounding_volume::Aabb;

/// The accuracy curves are flattened / approximated with.
pub const PATH_TOLERANCE: f64 = 0.1;

/// Shapes that are declared relative to an anchor point.
///
/// The anchor is only known at draw time, so a shape is described by its characteristic points (offsets) which get
/// resolved against the anchor, and by everything that does not depend on position (radii, angles, ..).
pub trait Shapeable {
    /// The characteristic points, relative to the anchor.
    fn offsets(&self) -> Vec<na::Vector2<f64>>;
    /// The characteristic points, resolved against the anchor.
    fn resolve(&self, anchor: na::Point2<f64>) -> Vec<na::Vector2<f64>> {
        self.offsets()
            .into_iter()
            .map(|offset| anchor.coords + offset)
            .collect()
    }
    /// The outline path with the given resolved points.
    ///
    /// Is empty if the points don't match the shape.
    fn outline_path(&self, resolved: &[na::Vector2<f64>]) -> kurbo::BezPath;
    /// The bounds of the outline with the given resolved points. Does not include any stroke width.
    fn bounds(&self, resolved: &[na::Vector2<f64>]) -> Option<Aabb> {
        let path = self.outline_path(resolved);
        if path.elements().is_empty() {
            return None;
        }
        Some(Aabb::from_kurbo_rect(path.bounding_box()))
    }
}
