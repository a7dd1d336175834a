// Imports
use p2d::bounding_volume::Aabb;

/// Extension trait for [`na::Vector2<f64>`].
pub trait Vector2Ext
where
    Self: Sized,
{
    /// Round to the next integer
    fn round(&self) -> Self;
    /// Floor to the next integer
    fn floor(&self) -> Self;
    /// Converts to kurbo::Point
    fn to_kurbo_point(&self) -> kurbo::Point;
    /// Converts to kurbo::Vec2
    fn to_kurbo_vec(&self) -> kurbo::Vec2;
    /// Approximate equality
    fn approx_eq(&self, other: &Self) -> bool;
}

impl Vector2Ext for na::Vector2<f64> {
    fn round(&self) -> Self {
        na::vector![self[0].round(), self[1].round()]
    }

    fn floor(&self) -> Self {
        na::vector![self[0].floor(), self[1].floor()]
    }

    fn to_kurbo_point(&self) -> kurbo::Point {
        kurbo::Point {
            x: self[0],
            y: self[1],
        }
    }

    fn to_kurbo_vec(&self) -> kurbo::Vec2 {
        kurbo::Vec2 {
            x: self[0],
            y: self[1],
        }
    }

    fn approx_eq(&self, other: &Self) -> bool {
        approx::relative_eq!(self[0], other[0]) && approx::relative_eq!(self[1], other[1])
    }
}

/// Extension trait for [p2d::bounding_volume::Aabb].
pub trait AabbExt
where
    Self: Sized,
{
    /// The smallest Aabb containing all points. None when the iterator is empty.
    fn from_vectors(points: impl IntoIterator<Item = na::Vector2<f64>>) -> Option<Self>;
    /// Asserts the Aabb is valid
    fn assert_valid(&self) -> anyhow::Result<()>;
    /// Extends the aabb to the nearest integer of its vertices
    fn ceil(&self) -> Self;
    /// extends on every side by the given size
    fn extend_by(&self, extend_by: na::Vector2<f64>) -> Self;
    /// Ensures the Aabb is positive (maxs >= mins)
    fn ensure_positive(&mut self);
    /// Converts a Aabb to a kurbo Rectangle
    fn to_kurbo_rect(&self) -> kurbo::Rect;
    /// Converts a kurbo Rectangle to Aabb
    fn from_kurbo_rect(rect: kurbo::Rect) -> Self;
    /// Approximate equality
    fn approx_eq(&self, other: &Self) -> bool;
}

impl AabbExt for Aabb {
    fn from_vectors(points: impl IntoIterator<Item = na::Vector2<f64>>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        let mut bounds = Aabb::new(first.into(), first.into());
        for p in points {
            bounds.take_point(p.into());
        }
        Some(bounds)
    }

    fn assert_valid(&self) -> anyhow::Result<()> {
        if self.extents()[0] < 0.0
            || self.extents()[1] < 0.0
            || self.maxs[0] < self.mins[0]
            || self.maxs[1] < self.mins[1]
        {
            Err(anyhow::anyhow!(
                "Assert bounds valid failed, invalid bounds `{:?}`.",
                self,
            ))
        } else {
            Ok(())
        }
    }

    fn ceil(&self) -> Aabb {
        Aabb::new(
            na::point![self.mins[0].floor(), self.mins[1].floor()],
            na::point![self.maxs[0].ceil(), self.maxs[1].ceil()],
        )
    }

    fn extend_by(&self, extend_by: na::Vector2<f64>) -> Aabb {
        Aabb::new(
            (self.mins.coords - extend_by).into(),
            (self.maxs.coords + extend_by).into(),
        )
    }

    fn ensure_positive(&mut self) {
        if self.mins[0] > self.maxs[0] {
            std::mem::swap(&mut self.mins[0], &mut self.maxs[0]);
        }
        if self.mins[1] > self.maxs[1] {
            std::mem::swap(&mut self.mins[1], &mut self.maxs[1]);
        }
    }

    fn to_kurbo_rect(&self) -> kurbo::Rect {
        kurbo::Rect::from_points(
            kurbo::Point::new(self.mins[0], self.mins[1]),
            kurbo::Point::new(self.maxs[0], self.maxs[1]),
        )
    }

    fn from_kurbo_rect(rect: kurbo::Rect) -> Self {
        let rect = rect.abs();
        Aabb::new(na::point![rect.x0, rect.y0], na::point![rect.x1, rect.y1])
    }

    fn approx_eq(&self, other: &Self) -> bool {
        self.mins.coords.approx_eq(&other.mins.coords)
            && self.maxs.coords.approx_eq(&other.maxs.coords)
    }
}
