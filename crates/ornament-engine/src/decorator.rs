// Imports
use crate::decoration::{DecorationId, DecorationKind, DecorationParams, Partition};
use crate::render::Image;
use crate::store::{CachedBuffer, CoordEntry, DecorationStore};
use crate::text::TextStyle;
use crate::widget::Widget;
use crate::{DecoratorConfig, DecoratorError};
use ornament_compose::Color;
use tracing::warn;

/// Decorates a widget with shapes, images, text and draw callbacks.
///
/// Decorations are placed relative to the widget center and drawn either before (`prev`) or after (`post`)
/// the widget content. When caching is enabled, each partition is pre-rendered into a buffer that is only
/// rebuilt when the decorations change or the widget is resized.
///
/// A decorator is created for exactly one widget and can't be duplicated.
#[derive(Debug)]
pub struct Decorator {
    config: DecoratorConfig,
    store: DecorationStore,
}

impl Decorator {
    pub fn new(widget: &dyn Widget, config: DecoratorConfig) -> Self {
        Self {
            store: DecorationStore::new(widget.widget_id()),
            config,
        }
    }

    /// The id of the widget this decorator belongs to.
    pub fn owner_id(&self) -> &str {
        self.store.owner_id()
    }

    pub fn config(&self) -> &DecoratorConfig {
        &self.config
    }

    /// Always fails, decorators hold callables and images that can't be duplicated.
    pub fn try_clone(&self) -> Result<Self, DecoratorError> {
        Err(DecoratorError::UnsupportedOperation(
            "decorators can't be copied",
        ))
    }

    /// Adds a decoration with a generated id.
    pub fn add(
        &mut self,
        partition: Partition,
        params: DecorationParams,
    ) -> Result<DecorationId, DecoratorError> {
        self.insert(partition, params, None)
    }

    /// Adds a decoration with a custom id, which must not be taken already.
    pub fn add_with_id(
        &mut self,
        id: impl Into<DecorationId>,
        partition: Partition,
        params: DecorationParams,
    ) -> Result<DecorationId, DecoratorError> {
        self.insert(partition, params, Some(id.into()))
    }

    fn insert(
        &mut self,
        partition: Partition,
        params: DecorationParams,
        id: Option<DecorationId>,
    ) -> Result<DecorationId, DecoratorError> {
        let callable = params.is_callable();
        let id = self.store.insert(partition, params, id)?;
        if callable && self.config.cache && self.config.verbose {
            warn!(
                id = %id,
                "callable decoration added while caching is enabled, it will only be called when the buffer is rebuilt"
            );
        }
        Ok(id)
    }

    #[allow(dead_code)]
    pub(crate) fn add_none(&mut self, partition: Partition) -> Result<DecorationId, DecoratorError> {
        self.add(partition, DecorationParams::none())
    }

    pub fn add_pixel(
        &mut self,
        pos: na::Vector2<f64>,
        color: Color,
        partition: Partition,
    ) -> Result<DecorationId, DecoratorError> {
        self.add(partition, DecorationParams::pixel(pos, color))
    }

    pub fn add_line(
        &mut self,
        start: na::Vector2<f64>,
        end: na::Vector2<f64>,
        color: Color,
        width: f64,
        partition: Partition,
    ) -> Result<DecorationId, DecoratorError> {
        let params =
            DecorationParams::line(start, end, color, width, self.config.default_backend)?;
        self.add(partition, params)
    }

    pub fn add_hline(
        &mut self,
        x1: f64,
        x2: f64,
        y: f64,
        color: Color,
        partition: Partition,
    ) -> Result<DecorationId, DecoratorError> {
        self.add(partition, DecorationParams::hline(x1, x2, y, color))
    }

    pub fn add_vline(
        &mut self,
        x: f64,
        y1: f64,
        y2: f64,
        color: Color,
        partition: Partition,
    ) -> Result<DecorationId, DecoratorError> {
        self.add(partition, DecorationParams::vline(x, y1, y2, color))
    }

    /// Adds a rectangle with its upper-left corner at `pos`. A `width` of zero fills it.
    pub fn add_rect(
        &mut self,
        pos: na::Vector2<f64>,
        size: na::Vector2<f64>,
        color: Color,
        width: f64,
        partition: Partition,
    ) -> Result<DecorationId, DecoratorError> {
        let params = DecorationParams::rect(pos, size, color, width, self.config.default_backend)?;
        self.add(partition, params)
    }

    pub fn add_circle(
        &mut self,
        center: na::Vector2<f64>,
        radius: f64,
        color: Color,
        filled: bool,
        width: f64,
        partition: Partition,
    ) -> Result<DecorationId, DecoratorError> {
        let params = DecorationParams::circle(
            center,
            radius,
            color,
            filled,
            width,
            self.config.default_backend,
        )?;
        self.add(partition, params)
    }

    pub fn add_ellipse(
        &mut self,
        center: na::Vector2<f64>,
        radii: na::Vector2<f64>,
        color: Color,
        filled: bool,
        partition: Partition,
    ) -> Result<DecorationId, DecoratorError> {
        let params =
            DecorationParams::ellipse(center, radii, color, filled, self.config.default_backend)?;
        self.add(partition, params)
    }

    /// Adds an arc. Angles are in degrees, counter-clockwise.
    #[allow(clippy::too_many_arguments)]
    pub fn add_arc(
        &mut self,
        center: na::Vector2<f64>,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        color: Color,
        width: f64,
        partition: Partition,
    ) -> Result<DecorationId, DecoratorError> {
        let params = DecorationParams::arc(
            center,
            radius,
            start_angle,
            end_angle,
            color,
            width,
            self.config.default_backend,
        )?;
        self.add(partition, params)
    }

    /// Adds a filled circle sector. Angles are in degrees, counter-clockwise.
    pub fn add_pie(
        &mut self,
        center: na::Vector2<f64>,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        color: Color,
        partition: Partition,
    ) -> Result<DecorationId, DecoratorError> {
        let params = DecorationParams::pie(
            center,
            radius,
            start_angle,
            end_angle,
            color,
            self.config.default_backend,
        )?;
        self.add(partition, params)
    }

    pub fn add_polygon(
        &mut self,
        points: Vec<na::Vector2<f64>>,
        color: Color,
        filled: bool,
        width: f64,
        partition: Partition,
    ) -> Result<DecorationId, DecoratorError> {
        let params =
            DecorationParams::polygon(points, color, filled, width, self.config.default_backend)?;
        self.add(partition, params)
    }

    pub fn add_filled_polygon(
        &mut self,
        points: Vec<na::Vector2<f64>>,
        color: Color,
        partition: Partition,
    ) -> Result<DecorationId, DecoratorError> {
        let params =
            DecorationParams::filled_polygon(points, color, self.config.default_backend)?;
        self.add(partition, params)
    }

    pub fn add_textured_polygon(
        &mut self,
        points: Vec<na::Vector2<f64>>,
        texture: &Image,
        texture_offset: na::Vector2<f64>,
        partition: Partition,
    ) -> Result<DecorationId, DecoratorError> {
        let params = DecorationParams::textured_polygon(points, texture, texture_offset)?;
        self.add(partition, params)
    }

    pub fn add_bezier(
        &mut self,
        control_points: Vec<na::Vector2<f64>>,
        color: Color,
        steps: usize,
        partition: Partition,
    ) -> Result<DecorationId, DecoratorError> {
        let params =
            DecorationParams::bezier(control_points, color, steps, self.config.default_backend)?;
        self.add(partition, params)
    }

    pub fn add_surface(
        &mut self,
        pos: na::Vector2<f64>,
        surface: cairo::ImageSurface,
        centered: bool,
        partition: Partition,
    ) -> Result<DecorationId, DecoratorError> {
        self.add(partition, DecorationParams::surface(pos, surface, centered))
    }

    pub fn add_image(
        &mut self,
        pos: na::Vector2<f64>,
        image: Image,
        centered: bool,
        partition: Partition,
    ) -> Result<DecorationId, DecoratorError> {
        let params = DecorationParams::image(pos, image, centered)?;
        self.add(partition, params)
    }

    pub fn add_text(
        &mut self,
        pos: na::Vector2<f64>,
        text: impl Into<String>,
        style: TextStyle,
        centered: bool,
        partition: Partition,
    ) -> Result<DecorationId, DecoratorError> {
        let params = DecorationParams::text(pos, text, style, centered)?;
        self.add(partition, params)
    }

    /// Adds a callback that draws onto the target with the owning widget.
    ///
    /// With caching enabled it is only called when the buffer is rebuilt, so it should not depend on state
    /// that changes between frames.
    pub fn add_callable(
        &mut self,
        callback: impl Fn(&cairo::Context, &dyn Widget) + 'static,
        partition: Partition,
    ) -> Result<DecorationId, DecoratorError> {
        self.add(partition, DecorationParams::callable(callback))
    }

    pub fn remove(&mut self, id: &str) -> Result<(), DecoratorError> {
        self.store.remove(id).map(|_| ())
    }

    /// Removes all decorations of the partition, or of both partitions when `None`.
    pub fn remove_all(&mut self, partition: Option<Partition>) {
        self.store.remove_all(partition)
    }

    pub fn enable(&mut self, id: &str) -> Result<(), DecoratorError> {
        self.store.set_enabled(id, true)
    }

    pub fn disable(&mut self, id: &str) -> Result<(), DecoratorError> {
        self.store.set_enabled(id, false)
    }

    pub fn is_enabled(&self, id: &str) -> Result<bool, DecoratorError> {
        self.store.is_enabled(id)
    }

    pub fn count(&self, partition: Partition) -> usize {
        self.store.count(partition)
    }

    pub fn total_count(&self) -> usize {
        self.store.total_count()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.store.contains(id)
    }

    /// The ids of the partition in drawing order.
    pub fn ids(&self, partition: Partition) -> Vec<DecorationId> {
        self.store.ids(partition)
    }

    pub fn partition_of(&self, id: &str) -> Result<Partition, DecoratorError> {
        self.store.partition_of(id)
    }

    pub fn kind_of(&self, id: &str) -> Result<DecorationKind, DecoratorError> {
        self.store.kind_of(id)
    }

    pub fn cache(&self) -> bool {
        self.config.cache
    }

    /// Enables or disables caching. Drops all render buffers.
    pub fn set_cache(&mut self, cache: bool) {
        self.config.cache = cache;
        self.store.clear_rendering();
    }

    /// Invalidates the caches of the partition, or of both when `None`.
    ///
    /// Needed when the widget changes in a way that is not reflected in its position or size.
    pub fn force_cache_update(&mut self, partition: Option<Partition>) {
        self.store.force_cache_update(partition)
    }

    pub fn coord_entry(&self, id: &str) -> Option<&CoordEntry> {
        self.store.coord_entry(id)
    }

    pub fn coord_cache_len(&self) -> usize {
        self.store.coord_cache_len()
    }

    pub fn coords_dirty(&self, partition: Partition) -> bool {
        self.store.coords_dirty(partition)
    }

    pub fn render_dirty(&self, partition: Partition) -> bool {
        self.store.render_dirty(partition)
    }

    pub fn render_buffer(&self, partition: Partition) -> Option<&CachedBuffer> {
        self.store.render_buffer(partition)
    }

    /// Draws the decorations that go before the widget content.
    pub fn draw_prev(
        &mut self,
        cx: &cairo::Context,
        widget: &dyn Widget,
    ) -> Result<(), DecoratorError> {
        self.draw(Partition::Prev, cx, widget)
    }

    /// Draws the decorations that go after the widget content.
    pub fn draw_post(
        &mut self,
        cx: &cairo::Context,
        widget: &dyn Widget,
    ) -> Result<(), DecoratorError> {
        self.draw(Partition::Post, cx, widget)
    }

    fn draw(
        &mut self,
        partition: Partition,
        cx: &cairo::Context,
        widget: &dyn Widget,
    ) -> Result<(), DecoratorError> {
        if widget.widget_id() != self.store.owner_id() {
            return Err(DecoratorError::WidgetMismatch {
                expected: self.store.owner_id().to_owned(),
                found: widget.widget_id().to_owned(),
            });
        }
        self.store.draw_partition(
            partition,
            cx,
            widget,
            self.config.cache,
            self.config.buffer_margin,
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::tests::solid_image;
    use crate::widget::tests::TestWidget;
    use std::cell::Cell;
    use std::rc::Rc;

    fn target() -> cairo::ImageSurface {
        cairo::ImageSurface::create(cairo::Format::ARgb32, 600, 400).unwrap()
    }

    fn cached_decorator(widget: &TestWidget) -> Decorator {
        Decorator::new(widget, DecoratorConfig::default().with_cache(true))
    }

    fn rgba_at(surface: &cairo::ImageSurface, x: usize, y: usize) -> [u8; 4] {
        let image = Image::try_from_cairo_surface(surface).unwrap();
        let i = (y * image.pixel_width as usize + x) * 4;
        [image.data[i], image.data[i + 1], image.data[i + 2], image.data[i + 3]]
    }

    /// Adds one decoration of every kind to the partition.
    fn add_all_kinds(deco: &mut Decorator, partition: Partition) -> Vec<DecorationId> {
        let image = solid_image(8, 8, [20, 40, 200, 255]);
        let triangle = vec![
            na::vector![-20.0, -10.0],
            na::vector![20.0, -10.0],
            na::vector![0.0, 15.0],
        ];
        vec![
            deco.add_none(partition).unwrap(),
            deco.add_pixel(na::vector![1.0, 1.0], Color::RED, partition)
                .unwrap(),
            deco.add_line(
                na::vector![-40.0, 0.0],
                na::vector![40.0, 0.0],
                Color::BLUE,
                2.0,
                partition,
            )
            .unwrap(),
            deco.add_hline(-40.0, 40.0, 10.0, Color::GREEN, partition)
                .unwrap(),
            deco.add_vline(0.0, -15.0, 15.0, Color::GREEN, partition)
                .unwrap(),
            deco.add_rect(
                na::vector![-45.0, -15.0],
                na::vector![90.0, 30.0],
                Color::BLACK,
                1.0,
                partition,
            )
            .unwrap(),
            deco.add_circle(na::vector![-30.0, 0.0], 8.0, Color::RED, true, 0.0, partition)
                .unwrap(),
            deco.add_ellipse(
                na::vector![30.0, 0.0],
                na::vector![10.0, 6.0],
                Color::BLUE,
                false,
                partition,
            )
            .unwrap(),
            deco.add_arc(
                na::vector![0.0, 0.0],
                12.0,
                0.0,
                180.0,
                Color::BLACK,
                1.0,
                partition,
            )
            .unwrap(),
            deco.add_pie(
                na::vector![0.0, 0.0],
                6.0,
                90.0,
                270.0,
                Color::GREEN,
                partition,
            )
            .unwrap(),
            deco.add_polygon(triangle.clone(), Color::RED, false, 1.0, partition)
                .unwrap(),
            deco.add_filled_polygon(triangle.clone(), Color::RED, partition)
                .unwrap(),
            deco.add_textured_polygon(triangle.clone(), &image, na::Vector2::zeros(), partition)
                .unwrap(),
            deco.add_bezier(triangle, Color::BLUE, 20, partition)
                .unwrap(),
            deco.add_surface(
                na::vector![10.0, 0.0],
                image.to_cairo_surface().unwrap(),
                true,
                partition,
            )
            .unwrap(),
            deco.add_image(na::vector![0.0, 0.0], image, true, partition)
                .unwrap(),
            deco.add_text(
                na::vector![-40.0, -10.0],
                "nice",
                TextStyle::default(),
                false,
                partition,
            )
            .unwrap(),
            deco.add_callable(
                |cx, widget| {
                    let center = widget.center();
                    cx.set_source_rgba(0.0, 0.0, 0.0, 1.0);
                    cx.rectangle(center[0] - 2.0, center[1] - 2.0, 4.0, 4.0);
                    let _ = cx.fill();
                },
                partition,
            )
            .unwrap(),
        ]
    }

    #[test]
    fn cached_draw_of_all_kinds() {
        let widget = TestWidget::button();
        let surface = target();
        let cx = cairo::Context::new(&surface).unwrap();
        let mut deco = cached_decorator(&widget);

        let ids = add_all_kinds(&mut deco, Partition::Prev);
        assert_eq!(deco.total_count(), ids.len());
        assert_eq!(deco.coord_cache_len(), 0);

        deco.draw_prev(&cx, &widget).unwrap();
        assert_eq!(deco.coord_cache_len(), ids.len());
        for id in &ids {
            assert!(deco.coord_entry(id.as_str()).is_some());
        }

        let buffer = deco.render_buffer(Partition::Prev).unwrap();
        let (width, height) = buffer.pixel_size();
        assert!(width > 0 && height > 0);
        let image = Image::try_from_cairo_surface(buffer.surface()).unwrap();
        assert!(image.data.chunks_exact(4).any(|px| px[3] > 0));
        assert!(deco.render_buffer(Partition::Post).is_none());
    }

    #[test]
    fn uncached_draw_of_all_kinds() {
        let widget = TestWidget::button();
        let surface = target();
        let mut deco = Decorator::new(&widget, DecoratorConfig::default());
        let ids = add_all_kinds(&mut deco, Partition::Post);
        {
            let cx = cairo::Context::new(&surface).unwrap();
            deco.draw_post(&cx, &widget).unwrap();
        }
        surface.flush();

        assert_eq!(deco.coord_cache_len(), ids.len());
        assert!(deco.render_buffer(Partition::Post).is_none());
        let image = Image::try_from_cairo_surface(&surface).unwrap();
        assert!(image.data.chunks_exact(4).any(|px| px[3] > 0));
    }

    #[test]
    fn second_draw_recomputes_nothing() {
        let widget = TestWidget::button();
        let surface = target();
        let cx = cairo::Context::new(&surface).unwrap();
        let mut deco = cached_decorator(&widget);
        let id = deco
            .add_bezier(
                vec![
                    na::vector![-50.0, 0.0],
                    na::vector![0.0, -40.0],
                    na::vector![50.0, 0.0],
                ],
                Color::BLUE,
                30,
                Partition::Prev,
            )
            .unwrap();

        deco.draw_prev(&cx, &widget).unwrap();
        let entry = deco.coord_entry(id.as_str()).unwrap().clone();
        let generation = deco.render_buffer(Partition::Prev).unwrap().generation();

        deco.draw_prev(&cx, &widget).unwrap();
        assert!(!deco.coords_dirty(Partition::Prev));
        assert!(!deco.render_dirty(Partition::Prev));
        assert_eq!(deco.coord_entry(id.as_str()).unwrap(), &entry);
        assert_eq!(
            deco.render_buffer(Partition::Prev).unwrap().generation(),
            generation
        );
    }

    #[test]
    fn mutations_dirty_only_the_render_cache() {
        let widget = TestWidget::button();
        let surface = target();
        let cx = cairo::Context::new(&surface).unwrap();
        let mut deco = cached_decorator(&widget);
        let id = deco
            .add_pixel(na::vector![0.0, 0.0], Color::RED, Partition::Prev)
            .unwrap();
        deco.draw_prev(&cx, &widget).unwrap();
        assert!(!deco.render_dirty(Partition::Prev));

        deco.add_pixel(na::vector![1.0, 0.0], Color::RED, Partition::Prev)
            .unwrap();
        assert!(deco.render_dirty(Partition::Prev));
        assert!(!deco.render_dirty(Partition::Post));
        assert!(!deco.coords_dirty(Partition::Prev));
        deco.draw_prev(&cx, &widget).unwrap();

        deco.disable(id.as_str()).unwrap();
        assert!(deco.render_dirty(Partition::Prev));
        assert!(!deco.coords_dirty(Partition::Prev));
        deco.draw_prev(&cx, &widget).unwrap();

        deco.enable(id.as_str()).unwrap();
        assert!(deco.is_enabled(id.as_str()).unwrap());
        assert!(deco.render_dirty(Partition::Prev));
        deco.draw_prev(&cx, &widget).unwrap();

        deco.remove(id.as_str()).unwrap();
        assert!(deco.render_dirty(Partition::Prev));
        assert!(!deco.coords_dirty(Partition::Prev));
        assert!(deco.coord_entry(id.as_str()).is_none());
    }

    #[test]
    fn disabled_decorations_are_not_drawn() {
        let widget = TestWidget::button();
        for cache in [false, true] {
            let mut deco = Decorator::new(&widget, DecoratorConfig::default().with_cache(cache));
            let id = deco
                .add_pixel(na::vector![0.0, 0.0], Color::RED, Partition::Post)
                .unwrap();
            deco.disable(id.as_str()).unwrap();

            for (enabled, expected) in [(false, [0u8, 0, 0, 0]), (true, [255, 0, 0, 255])] {
                if enabled {
                    deco.enable(id.as_str()).unwrap();
                }
                let surface = target();
                {
                    let cx = cairo::Context::new(&surface).unwrap();
                    deco.draw_post(&cx, &widget).unwrap();
                }
                surface.flush();
                assert_eq!(
                    rgba_at(&surface, 299, 173),
                    expected,
                    "cache: {cache}, enabled: {enabled}"
                );

                if cache {
                    let buffer = deco.render_buffer(Partition::Post).unwrap();
                    let anchor = -buffer.offset();
                    assert_eq!(
                        rgba_at(buffer.surface(), anchor[0] as usize, anchor[1] as usize),
                        expected,
                        "enabled: {enabled}"
                    );
                } else {
                    assert!(deco.render_buffer(Partition::Post).is_none());
                }
            }
        }
    }

    #[test]
    fn moving_the_widget_shifts_coordinates() {
        let mut widget = TestWidget::button();
        let surface = target();
        let cx = cairo::Context::new(&surface).unwrap();
        let mut deco = cached_decorator(&widget);
        let image = solid_image(10, 10, [255, 0, 0, 255]);

        let ids = vec![
            deco.add_image(na::vector![0.0, 0.0], image.clone(), true, Partition::Prev)
                .unwrap(),
            deco.add_image(na::vector![0.0, 0.0], image.clone(), true, Partition::Post)
                .unwrap(),
            deco.add_none(Partition::Prev).unwrap(),
        ];
        deco.draw_prev(&cx, &widget).unwrap();
        deco.draw_post(&cx, &widget).unwrap();
        assert_eq!(deco.coord_cache_len(), 3);
        let entry = deco.coord_entry(ids[0].as_str()).unwrap();
        assert_eq!(entry.anchor, na::point![299.0, 173.0]);
        assert_eq!(entry.points, vec![na::vector![299.0, 173.0]]);

        let generation = deco.render_buffer(Partition::Prev).unwrap().generation();
        widget.translate(na::vector![1.0, 0.0]);
        deco.draw_prev(&cx, &widget).unwrap();
        deco.draw_post(&cx, &widget).unwrap();

        for id in &ids[..2] {
            let entry = deco.coord_entry(id.as_str()).unwrap();
            assert_eq!(entry.points, vec![na::vector![300.0, 173.0]]);
        }
        assert_eq!(
            deco.render_buffer(Partition::Prev).unwrap().generation(),
            generation
        );

        for _ in 0..4 {
            deco.add_pixel(na::vector![0.0, 0.0], Color::BLACK, Partition::Post)
                .unwrap();
        }
        deco.draw_post(&cx, &widget).unwrap();
        assert_eq!(deco.coord_cache_len(), 7);
    }

    #[test]
    fn remove_all_resets() {
        let widget = TestWidget::button();
        let surface = target();
        let cx = cairo::Context::new(&surface).unwrap();
        let mut deco = cached_decorator(&widget);
        add_all_kinds(&mut deco, Partition::Prev);
        deco.add_pixel(na::vector![0.0, 0.0], Color::RED, Partition::Post)
            .unwrap();
        deco.draw_prev(&cx, &widget).unwrap();
        deco.draw_post(&cx, &widget).unwrap();

        deco.remove_all(None);
        assert_eq!(deco.total_count(), 0);
        assert_eq!(deco.coord_cache_len(), 0);
        for partition in Partition::ALL {
            assert!(!deco.render_dirty(partition));
            assert!(!deco.coords_dirty(partition));
            assert!(deco.render_buffer(partition).is_none());
        }

        deco.draw_prev(&cx, &widget).unwrap();
        assert!(!deco.render_dirty(Partition::Prev));
    }

    #[test]
    fn lookup_errors() {
        let widget = TestWidget::button();
        let mut deco = Decorator::new(&widget, DecoratorConfig::default());
        assert!(matches!(deco.remove("none"), Err(DecoratorError::NotFound(_))));
        assert!(matches!(deco.enable("none"), Err(DecoratorError::NotFound(_))));
        assert!(matches!(deco.disable("none"), Err(DecoratorError::NotFound(_))));
        assert!(matches!(
            deco.try_clone(),
            Err(DecoratorError::UnsupportedOperation(_))
        ));
    }

    #[test]
    fn validation_errors() {
        let widget = TestWidget::button();
        let mut deco = Decorator::new(&widget, DecoratorConfig::default());
        assert!(matches!(
            deco.add_circle(na::vector![0.0, 0.0], 0.0, Color::RED, false, 1.0, Partition::Prev),
            Err(DecoratorError::Validation(_))
        ));
        assert!(matches!(
            deco.add_circle(na::vector![0.0, 0.0], 10.0, Color::RED, true, 1.0, Partition::Prev),
            Err(DecoratorError::Validation(_))
        ));
        assert!(matches!(
            deco.add_polygon(
                vec![na::vector![0.0, 0.0], na::vector![10.0, 0.0]],
                Color::RED,
                false,
                1.0,
                Partition::Prev
            ),
            Err(DecoratorError::Validation(_))
        ));
        assert!(matches!(
            deco.add_ellipse(
                na::vector![0.0, 0.0],
                na::vector![10.0, 0.0],
                Color::RED,
                false,
                Partition::Prev
            ),
            Err(DecoratorError::Validation(_))
        ));
        assert!(matches!(
            deco.add_text(
                na::vector![-150.0, 0.0],
                "nice",
                TextStyle::default(),
                true,
                Partition::Post
            ),
            Err(DecoratorError::Validation(_))
        ));
        assert!(matches!(
            deco.add_text(
                na::vector![0.0, 0.0],
                "nice",
                TextStyle::new("sans-serif", 0.0, Color::BLACK),
                false,
                Partition::Post
            ),
            Err(DecoratorError::Validation(_))
        ));
        assert_eq!(deco.total_count(), 0);
    }

    #[test]
    fn custom_ids() {
        let widget = TestWidget::button();
        let mut deco = Decorator::new(&widget, DecoratorConfig::default());
        let id = deco
            .add_with_id("frame", Partition::Post, DecorationParams::none())
            .unwrap();
        assert_eq!(id.as_str(), "frame");
        assert_eq!(deco.partition_of("frame").unwrap(), Partition::Post);
        assert_eq!(deco.kind_of("frame").unwrap(), DecorationKind::None);
        assert!(matches!(
            deco.add_with_id("frame", Partition::Prev, DecorationParams::none()),
            Err(DecoratorError::DuplicateId(_))
        ));

        let generated = deco.add_none(Partition::Prev).unwrap();
        assert!(generated.as_str().starts_with("button#"));
        assert_eq!(deco.ids(Partition::Prev), vec![generated]);
    }

    #[test]
    fn toggling_cache_invalidates_buffers() {
        let widget = TestWidget::button();
        let surface = target();
        let cx = cairo::Context::new(&surface).unwrap();
        let mut deco = cached_decorator(&widget);
        deco.add_pixel(na::vector![0.0, 0.0], Color::RED, Partition::Prev)
            .unwrap();
        deco.draw_prev(&cx, &widget).unwrap();
        assert!(deco.render_buffer(Partition::Prev).is_some());

        deco.set_cache(false);
        assert!(!deco.cache());
        assert!(deco.render_buffer(Partition::Prev).is_none());
        assert!(deco.render_dirty(Partition::Prev));
        assert!(!deco.render_dirty(Partition::Post));

        deco.draw_prev(&cx, &widget).unwrap();
        assert!(deco.render_buffer(Partition::Prev).is_none());

        deco.set_cache(true);
        deco.draw_prev(&cx, &widget).unwrap();
        assert!(deco.render_buffer(Partition::Prev).is_some());
        assert!(!deco.render_dirty(Partition::Prev));
    }

    #[test]
    fn force_cache_update_rebuilds() {
        let widget = TestWidget::button();
        let surface = target();
        let cx = cairo::Context::new(&surface).unwrap();
        let mut deco = cached_decorator(&widget);
        deco.add_pixel(na::vector![0.0, 0.0], Color::RED, Partition::Post)
            .unwrap();
        deco.draw_post(&cx, &widget).unwrap();
        let generation = deco.render_buffer(Partition::Post).unwrap().generation();

        deco.force_cache_update(Some(Partition::Post));
        assert!(deco.coords_dirty(Partition::Post));
        assert!(deco.render_dirty(Partition::Post));
        assert!(!deco.render_dirty(Partition::Prev));

        deco.draw_post(&cx, &widget).unwrap();
        assert!(deco.render_buffer(Partition::Post).unwrap().generation() > generation);
    }

    #[test]
    fn cached_callable_runs_once_per_rebuild() {
        let widget = TestWidget::button();
        let surface = target();
        let cx = cairo::Context::new(&surface).unwrap();
        let calls = Rc::new(Cell::new(0));
        let calls_c = Rc::clone(&calls);
        let mut deco = cached_decorator(&widget);
        deco.add_callable(move |_, _| calls_c.set(calls_c.get() + 1), Partition::Post)
            .unwrap();

        deco.draw_post(&cx, &widget).unwrap();
        deco.draw_post(&cx, &widget).unwrap();
        assert_eq!(calls.get(), 1);

        deco.set_cache(false);
        deco.draw_post(&cx, &widget).unwrap();
        deco.draw_post(&cx, &widget).unwrap();
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn drawing_with_another_widget_fails() {
        let widget = TestWidget::button();
        let other = TestWidget {
            id: String::from("other"),
            ..TestWidget::button()
        };
        let surface = target();
        let cx = cairo::Context::new(&surface).unwrap();
        let mut deco = Decorator::new(&widget, DecoratorConfig::default());
        assert!(matches!(
            deco.draw_prev(&cx, &other),
            Err(DecoratorError::WidgetMismatch { .. })
        ));
    }
}
