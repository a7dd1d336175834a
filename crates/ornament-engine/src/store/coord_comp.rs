// Imports
use super::DecorationStore;
use crate::decoration::Partition;
use crate::widget::{GeometryChange, WidgetGeometry};
use tracing::{debug, trace};

/// The resolved coordinates of a decoration.
#[derive(Debug, Clone, PartialEq)]
pub struct CoordEntry {
    /// The anchor the points were resolved against.
    pub anchor: na::Point2<f64>,
    /// The characteristic points of the decoration in surface coordinates.
    pub points: Vec<na::Vector2<f64>>,
}

/// Per partition state of the coordinate cache.
#[derive(Debug, Clone, Default)]
pub struct CoordComponent {
    /// When true, the coordinate entries of the partition can't be trusted.
    pub(super) dirty: bool,
    /// The widget geometry observed by the last draw.
    pub(super) last_geometry: Option<WidgetGeometry>,
}

impl DecorationStore {
    /// Compares the geometry with the one of the last draw and invalidates the caches of the partition accordingly.
    ///
    /// A moved widget only invalidates the coordinates, the render buffer is position independent.
    pub(crate) fn sync_geometry(&mut self, partition: Partition, geometry: WidgetGeometry) {
        let change = geometry.change_since(self.coord_components[partition].last_geometry.as_ref());
        match change {
            GeometryChange::Unchanged => {}
            GeometryChange::Initial | GeometryChange::Moved => {
                self.set_coords_dirty(partition);
            }
            GeometryChange::Resized => {
                self.set_coords_dirty(partition);
                self.set_render_dirty(partition);
            }
        }
        if change != GeometryChange::Unchanged {
            debug!(%partition, ?change, "widget geometry changed");
        }
        self.coord_components[partition].last_geometry = Some(geometry);
    }

    /// Resolves the coordinates of all enabled decorations of the partition.
    ///
    /// Entries are only recomputed when the partition is dirty or when they are missing.
    /// Disabled decorations lose their entry on recomputation. The partition is clean afterwards.
    pub(crate) fn resolve_coords(&mut self, partition: Partition, anchor: na::Point2<f64>) {
        let dirty = self.coord_components[partition].dirty;

        for &key in self.order[partition].iter() {
            let Some(decoration) = self.decorations.get(key) else {
                continue;
            };
            if !decoration.enabled {
                if dirty {
                    self.coord_entries.remove(key);
                }
                continue;
            }
            if dirty || !self.coord_entries.contains_key(key) {
                trace!(id = %decoration.id, "resolving decoration coordinates");
                self.coord_entries.insert(
                    key,
                    CoordEntry {
                        anchor,
                        points: decoration.params.resolve(anchor),
                    },
                );
            }
        }

        self.coord_components[partition].dirty = false;
    }

    pub(crate) fn set_coords_dirty(&mut self, partition: Partition) {
        self.coord_components[partition].dirty = true;
    }

    /// Whether the coordinate entries of the partition are stale.
    pub fn coords_dirty(&self, partition: Partition) -> bool {
        self.coord_components[partition].dirty
    }

    /// The cached coordinates of the decoration, if any.
    pub fn coord_entry(&self, id: &str) -> Option<&CoordEntry> {
        self.key(id).and_then(|key| self.coord_entries.get(key))
    }

    /// The number of cached coordinate entries, of both partitions.
    pub fn coord_cache_len(&self) -> usize {
        self.coord_entries.len()
    }
}
