// Imports
use super::DecorationStore;
use crate::decoration::Partition;
use crate::render;
use crate::widget::Widget;
use anyhow::Context;
use ornament_compose::ext::{AabbExt, Vector2Ext};
use p2d::bounding_volume::{Aabb, BoundingVolume};
use tracing::debug;

/// The largest width and height cairo can allocate an image surface with.
const MAX_BUFFER_SIZE: f64 = 32767.0;

/// A pre-rendered partition.
#[derive(Debug)]
pub struct CachedBuffer {
    surface: cairo::ImageSurface,
    /// The upper-left corner of the buffer, relative to the anchor it was rendered with.
    offset: na::Vector2<f64>,
    /// The anchor the buffer was rendered with.
    anchor: na::Point2<f64>,
    generation: u64,
}

impl CachedBuffer {
    pub fn surface(&self) -> &cairo::ImageSurface {
        &self.surface
    }

    pub fn offset(&self) -> na::Vector2<f64> {
        self.offset
    }

    /// Width and height in pixels.
    pub fn pixel_size(&self) -> (i32, i32) {
        (self.surface.width(), self.surface.height())
    }

    /// Increases with every rebuild of any partition of the store.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether the buffer lands on the same pixel grid when painted at the anchor.
    ///
    /// Painting at a fractional pixel offset would resample the buffer.
    pub fn aligned_with(&self, anchor: na::Point2<f64>) -> bool {
        let shift = anchor.coords - self.anchor.coords;
        shift.iter().all(|v| (v - v.round()).abs() < 1e-6)
    }
}

/// Per partition state of the render cache.
#[derive(Debug, Default)]
pub struct RenderComponent {
    /// When true, the buffer (if any) does not reflect the decorations anymore.
    pub(super) dirty: bool,
    pub(super) buffer: Option<CachedBuffer>,
}

impl DecorationStore {
    pub(crate) fn set_render_dirty(&mut self, partition: Partition) {
        self.render_components[partition].dirty = true;
    }

    /// Drops the buffers of both partitions. Non empty partitions become dirty.
    pub(crate) fn clear_rendering(&mut self) {
        for partition in Partition::ALL {
            let dirty = !self.order[partition].is_empty();
            self.render_components[partition] = RenderComponent {
                dirty,
                buffer: None,
            };
        }
    }

    /// Invalidates both the coordinate and render caches of the partition, or of both when `None`.
    pub(crate) fn force_cache_update(&mut self, partition: Option<Partition>) {
        for &p in Partition::selected(partition) {
            self.set_coords_dirty(p);
            self.set_render_dirty(p);
        }
        debug!(partition = ?partition, "forced cache update");
    }

    /// Whether the render buffer of the partition is stale.
    pub fn render_dirty(&self, partition: Partition) -> bool {
        self.render_components[partition].dirty
    }

    pub fn render_buffer(&self, partition: Partition) -> Option<&CachedBuffer> {
        self.render_components[partition].buffer.as_ref()
    }

    /// Draws the enabled decorations of the partition onto the context.
    ///
    /// With `cache` the partition is rendered into a buffer first, which is rebuilt only when it is dirty,
    /// and the buffer is then painted at the current widget anchor.
    /// Fails on the first decoration that can't be drawn.
    pub(crate) fn draw_partition(
        &mut self,
        partition: Partition,
        cx: &cairo::Context,
        widget: &dyn Widget,
        cache: bool,
        buffer_margin: f64,
    ) -> anyhow::Result<()> {
        let geometry = widget.geometry();

        if self.order[partition].is_empty() {
            self.render_components[partition] = RenderComponent::default();
            self.coord_components[partition].dirty = false;
            self.coord_components[partition].last_geometry = Some(geometry);
            return Ok(());
        }

        self.sync_geometry(partition, geometry);
        let anchor = geometry.center();
        self.resolve_coords(partition, anchor);

        if !cache {
            return self.draw_immediate(partition, cx, widget);
        }

        let needs_rebuild = {
            let render_comp = &self.render_components[partition];
            render_comp.dirty
                || render_comp
                    .buffer
                    .as_ref()
                    .map_or(true, |buffer| !buffer.aligned_with(anchor))
        };
        if needs_rebuild {
            self.regenerate_buffer(partition, cx, widget, anchor, buffer_margin)?;
        }

        if let Some(buffer) = &self.render_components[partition].buffer {
            let origin = (anchor.coords + buffer.offset).round();
            cx.save()?;
            cx.set_source_surface(&buffer.surface, origin[0], origin[1])?;
            cx.paint()?;
            cx.restore()?;
        }
        Ok(())
    }

    /// Renders the partition into a new buffer.
    ///
    /// The buffer covers the widget bounds and the bounds of all enabled decorations, loosened by the margin.
    /// Callables can draw anywhere, so when one is enabled the clip extents of the target are covered as well.
    /// Buffers that would exceed the surface size limit are clipped to the target.
    fn regenerate_buffer(
        &mut self,
        partition: Partition,
        cx: &cairo::Context,
        widget: &dyn Widget,
        anchor: na::Point2<f64>,
        buffer_margin: f64,
    ) -> anyhow::Result<()> {
        let target_bounds = render::clip_bounds(cx)?;
        let mut bounds = widget.bounds();
        let mut covers_target = false;
        for &key in self.order[partition].iter() {
            let (Some(decoration), Some(entry)) =
                (self.decorations.get(key), self.coord_entries.get(key))
            else {
                continue;
            };
            if !decoration.enabled {
                continue;
            }
            match decoration.params.bounds(&entry.points) {
                Some(decoration_bounds) => bounds.merge(&decoration_bounds),
                None if decoration.params.is_callable() => covers_target = true,
                None => {}
            }
        }
        if covers_target {
            bounds.merge(&target_bounds);
        }
        let mut bounds = bounds
            .extend_by(na::Vector2::repeat(buffer_margin.max(0.0)))
            .ceil();
        if bounds.extents()[0].max(bounds.extents()[1]) > MAX_BUFFER_SIZE {
            let target_bounds = target_bounds.ceil();
            debug!(%partition, ?bounds, ?target_bounds, "clipping oversized decoration buffer to the target");
            bounds = bounds
                .intersection(&target_bounds)
                .unwrap_or_else(|| Aabb::new(target_bounds.mins, target_bounds.mins));
        }

        let surface = render::gen_surface_with_cairo(
            |cairo_cx| self.draw_immediate(partition, cairo_cx, widget),
            bounds,
        )
        .with_context(|| format!("rendering the {partition} decorations into a buffer failed"))?;

        self.render_generation += 1;
        let buffer = CachedBuffer {
            surface,
            offset: bounds.mins.coords - anchor.coords,
            anchor,
            generation: self.render_generation,
        };
        debug!(
            %partition,
            width = buffer.surface.width(),
            height = buffer.surface.height(),
            generation = buffer.generation,
            "regenerated decoration buffer"
        );
        self.render_components[partition] = RenderComponent {
            dirty: false,
            buffer: Some(buffer),
        };
        Ok(())
    }

    /// Draws the enabled decorations of the partition in insertion order, with their cached coordinates.
    fn draw_immediate(
        &self,
        partition: Partition,
        cx: &cairo::Context,
        widget: &dyn Widget,
    ) -> anyhow::Result<()> {
        for &key in self.order[partition].iter() {
            let (Some(decoration), Some(entry)) =
                (self.decorations.get(key), self.coord_entries.get(key))
            else {
                continue;
            };
            if !decoration.enabled {
                continue;
            }
            decoration
                .params
                .draw(cx, entry.anchor, &entry.points, widget)
                .with_context(|| {
                    format!(
                        "drawing {} decoration `{}` failed",
                        decoration.kind(),
                        decoration.id
                    )
                })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoration::DecorationParams;
    use crate::render::Image;
    use crate::widget::tests::TestWidget;
    use ornament_compose::Color;

    fn target() -> cairo::ImageSurface {
        cairo::ImageSurface::create(cairo::Format::ARgb32, 600, 400).unwrap()
    }

    fn rgba_at(surface: &cairo::ImageSurface, x: usize, y: usize) -> [u8; 4] {
        let image = Image::try_from_cairo_surface(surface).unwrap();
        let i = (y * image.pixel_width as usize + x) * 4;
        [image.data[i], image.data[i + 1], image.data[i + 2], image.data[i + 3]]
    }

    #[test]
    fn cached_draw_reuses_buffer() {
        let mut widget = TestWidget::button();
        let surface = target();
        let cx = cairo::Context::new(&surface).unwrap();
        let mut store = DecorationStore::new(widget.widget_id());
        store
            .insert(
                Partition::Prev,
                DecorationParams::pixel(na::vector![0.0, 0.0], Color::RED),
                None,
            )
            .unwrap();
        assert!(store.render_dirty(Partition::Prev));

        store
            .draw_partition(Partition::Prev, &cx, &widget, true, 1.0)
            .unwrap();
        assert!(!store.render_dirty(Partition::Prev));
        let generation = store.render_buffer(Partition::Prev).unwrap().generation();

        store
            .draw_partition(Partition::Prev, &cx, &widget, true, 1.0)
            .unwrap();
        assert_eq!(
            store.render_buffer(Partition::Prev).unwrap().generation(),
            generation
        );

        // moving keeps the buffer
        widget.translate(na::vector![1.0, 0.0]);
        store
            .draw_partition(Partition::Prev, &cx, &widget, true, 1.0)
            .unwrap();
        assert_eq!(
            store.render_buffer(Partition::Prev).unwrap().generation(),
            generation
        );

        // resizing rebuilds it
        widget.size = na::vector![120.0, 40.0];
        store
            .draw_partition(Partition::Prev, &cx, &widget, true, 1.0)
            .unwrap();
        assert!(store.render_buffer(Partition::Prev).unwrap().generation() > generation);
    }

    #[test]
    fn buffer_is_painted_at_anchor() {
        let mut widget = TestWidget::button();
        let surface = target();
        let mut store = DecorationStore::new(widget.widget_id());
        store
            .insert(
                Partition::Post,
                DecorationParams::pixel(na::vector![0.0, 0.0], Color::RED),
                None,
            )
            .unwrap();
        {
            let cx = cairo::Context::new(&surface).unwrap();
            store
                .draw_partition(Partition::Post, &cx, &widget, true, 1.0)
                .unwrap();
            widget.translate(na::vector![10.0, 0.0]);
            store
                .draw_partition(Partition::Post, &cx, &widget, true, 1.0)
                .unwrap();
        }
        surface.flush();

        let image = Image::try_from_cairo_surface(&surface).unwrap();
        let pixel = |x: usize, y: usize| {
            let i = (y * image.pixel_width as usize + x) * 4;
            image.data[i..i + 4].to_vec()
        };
        assert_eq!(pixel(299, 173), vec![255, 0, 0, 255]);
        assert_eq!(pixel(309, 173), vec![255, 0, 0, 255]);
        assert_eq!(pixel(304, 173), vec![0, 0, 0, 0]);
    }

    #[test]
    fn buffer_covers_overflowing_decorations() {
        let widget = TestWidget::button();
        let surface = target();
        let cx = cairo::Context::new(&surface).unwrap();
        let mut store = DecorationStore::new(widget.widget_id());
        store
            .insert(
                Partition::Prev,
                DecorationParams::pixel(na::vector![-150.0, 0.0], Color::RED),
                None,
            )
            .unwrap();
        store
            .draw_partition(Partition::Prev, &cx, &widget, true, 1.0)
            .unwrap();

        let buffer = store.render_buffer(Partition::Prev).unwrap();
        assert!(buffer.offset()[0] <= -150.0);
        assert!(buffer.pixel_size().0 >= 151);
    }

    #[test]
    fn failing_decoration_aborts_the_draw() {
        let widget = TestWidget::button();
        let surface = target();
        let cx = cairo::Context::new(&surface).unwrap();
        let mut store = DecorationStore::new(widget.widget_id());
        // an image with inconsistent data can only be created by bypassing the validating constructor
        store
            .insert(
                Partition::Prev,
                DecorationParams::Image {
                    pos: na::vector![0.0, 0.0],
                    image: Image {
                        data: glib::Bytes::from_owned(vec![0u8; 3]),
                        pixel_width: 4,
                        pixel_height: 4,
                        memory_format: Default::default(),
                    },
                    centered: true,
                },
                None,
            )
            .unwrap();

        assert!(store
            .draw_partition(Partition::Prev, &cx, &widget, true, 1.0)
            .is_err());
        assert!(store.render_dirty(Partition::Prev));
        assert!(store.render_buffer(Partition::Prev).is_none());
    }

    #[test]
    fn empty_partition_stays_clean() {
        let widget = TestWidget::button();
        let surface = target();
        let cx = cairo::Context::new(&surface).unwrap();
        let mut store = DecorationStore::new(widget.widget_id());
        let id = store
            .insert(Partition::Prev, DecorationParams::none(), None)
            .unwrap();
        store.remove(id.as_str()).unwrap();
        assert!(store.render_dirty(Partition::Prev));

        store
            .draw_partition(Partition::Prev, &cx, &widget, true, 1.0)
            .unwrap();
        assert!(!store.render_dirty(Partition::Prev));
        assert!(store.render_buffer(Partition::Prev).is_none());
    }

    #[test]
    fn callables_outside_the_widget_are_buffered() {
        let widget = TestWidget::button();
        for cache in [false, true] {
            let surface = target();
            let mut store = DecorationStore::new(widget.widget_id());
            store
                .insert(
                    Partition::Post,
                    DecorationParams::callable(|cx, widget| {
                        let pos = widget.position();
                        cx.set_source_rgba(1.0, 0.0, 0.0, 1.0);
                        cx.rectangle(pos[0] - 20.0, pos[1], 4.0, 4.0);
                        let _ = cx.fill();
                    }),
                    None,
                )
                .unwrap();
            {
                let cx = cairo::Context::new(&surface).unwrap();
                store
                    .draw_partition(Partition::Post, &cx, &widget, cache, 1.0)
                    .unwrap();
            }
            surface.flush();

            assert_eq!(rgba_at(&surface, 231, 155), [255, 0, 0, 255], "cache: {cache}");
        }
    }

    #[test]
    fn oversized_buffer_is_clipped_to_the_target() {
        let widget = TestWidget::button();
        let surface = target();
        let mut store = DecorationStore::new(widget.widget_id());
        for x in [0.0, 40000.0] {
            store
                .insert(
                    Partition::Post,
                    DecorationParams::pixel(na::vector![x, 0.0], Color::RED),
                    None,
                )
                .unwrap();
        }
        {
            let cx = cairo::Context::new(&surface).unwrap();
            store
                .draw_partition(Partition::Post, &cx, &widget, true, 1.0)
                .unwrap();
        }
        surface.flush();

        let (width, height) = store.render_buffer(Partition::Post).unwrap().pixel_size();
        assert!(width <= 600 && height <= 400);
        assert_eq!(rgba_at(&surface, 299, 173), [255, 0, 0, 255]);
    }

    #[test]
    fn sub_pixel_moves_rebuild_the_buffer() {
        let mut widget = TestWidget::button();
        let surface = target();
        let cx = cairo::Context::new(&surface).unwrap();
        let mut store = DecorationStore::new(widget.widget_id());
        store
            .insert(
                Partition::Prev,
                DecorationParams::pixel(na::vector![0.0, 0.0], Color::RED),
                None,
            )
            .unwrap();
        store
            .draw_partition(Partition::Prev, &cx, &widget, true, 1.0)
            .unwrap();
        let generation = store.render_buffer(Partition::Prev).unwrap().generation();

        widget.translate(na::vector![0.5, 0.0]);
        store
            .draw_partition(Partition::Prev, &cx, &widget, true, 1.0)
            .unwrap();
        let buffer = store.render_buffer(Partition::Prev).unwrap();
        assert!(buffer.generation() > generation);
        let generation = buffer.generation();
        let origin = widget.center().coords + buffer.offset();
        assert_eq!(origin, origin.map(f64::round));

        widget.translate(na::vector![1.0, 0.0]);
        store
            .draw_partition(Partition::Prev, &cx, &widget, true, 1.0)
            .unwrap();
        let buffer = store.render_buffer(Partition::Prev).unwrap();
        assert_eq!(buffer.generation(), generation);
        assert!(buffer.aligned_with(widget.center()));
    }
}
