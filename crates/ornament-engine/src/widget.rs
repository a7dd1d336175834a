// Imports
use p2d::bounding_volume::Aabb;

/// The interactive element decorations are attached to.
///
/// The decorator reads the geometry at draw time, it never owns the widget.
pub trait Widget {
    /// A stable identity. Generated decoration ids are namespaced with it.
    fn widget_id(&self) -> &str;

    /// The upper-left corner of the rendered content rect in surface coordinates, padding excluded.
    fn position(&self) -> na::Vector2<f64>;

    /// Width and height of the rendered content rect.
    fn size(&self) -> na::Vector2<f64>;

    /// Snapshot of the current geometry.
    fn geometry(&self) -> WidgetGeometry {
        WidgetGeometry {
            position: self.position(),
            size: self.size(),
        }
    }

    /// The content rect.
    fn bounds(&self) -> Aabb {
        self.geometry().bounds()
    }

    /// The center of the content rect, which is the anchor all decorations are placed relative to.
    fn center(&self) -> na::Point2<f64> {
        self.geometry().center()
    }
}

/// Position and size of a widget at one point in time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WidgetGeometry {
    /// Upper-left corner.
    pub position: na::Vector2<f64>,
    /// Width and height.
    pub size: na::Vector2<f64>,
}

impl WidgetGeometry {
    pub fn bounds(&self) -> Aabb {
        Aabb::new(
            self.position.into(),
            (self.position + self.size).into(),
        )
    }

    pub fn center(&self) -> na::Point2<f64> {
        (self.position + self.size * 0.5).into()
    }

    /// How the geometry changed compared to a previous snapshot.
    pub fn change_since(&self, previous: Option<&WidgetGeometry>) -> GeometryChange {
        match previous {
            None => GeometryChange::Initial,
            Some(previous) if previous.size != self.size => GeometryChange::Resized,
            Some(previous) if previous.position != self.position => GeometryChange::Moved,
            Some(_) => GeometryChange::Unchanged,
        }
    }
}

/// See [WidgetGeometry::change_since].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryChange {
    /// There was no previous geometry.
    Initial,
    Unchanged,
    /// The position changed, the size did not.
    Moved,
    /// The size changed.
    Resized,
}
