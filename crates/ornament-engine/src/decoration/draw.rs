// Imports
use super::DecorationParams;
use crate::render;
use crate::widget::Widget;
use ornament_compose::ext::{AabbExt, Vector2Ext};
use ornament_compose::shapes::Shapeable;
use ornament_compose::{Color, RasterBackend, ShapeStyle};
use p2d::bounding_volume::Aabb;
use piet::{RenderContext, TextLayout};

impl DecorationParams {
    /// Draws the decoration onto the context.
    ///
    /// `resolved` are the characteristic points for the current anchor, as returned by [DecorationParams::resolve].
    pub fn draw(
        &self,
        cx: &cairo::Context,
        anchor: na::Point2<f64>,
        resolved: &[na::Vector2<f64>],
        widget: &dyn Widget,
    ) -> anyhow::Result<()> {
        match self {
            DecorationParams::None => Ok(()),
            DecorationParams::Pixel { color, .. } => {
                let Some(pos) = resolved.first() else {
                    return Ok(());
                };
                draw_pixel(cx, *pos, *color)
            }
            DecorationParams::Line { line, style, .. } => {
                draw_shape(cx, line.outline_path(resolved), style)
            }
            DecorationParams::Rect { rect, style } => {
                draw_shape(cx, rect.outline_path(resolved), style)
            }
            DecorationParams::Circle { circle, style } => {
                draw_shape(cx, circle.outline_path(resolved), style)
            }
            DecorationParams::Ellipse { ellipse, style } => {
                draw_shape(cx, ellipse.outline_path(resolved), style)
            }
            DecorationParams::Arc { arc, style } => {
                draw_shape(cx, arc.outline_path(resolved), style)
            }
            DecorationParams::Pie { pie, style } => {
                draw_shape(cx, pie.outline_path(resolved), style)
            }
            DecorationParams::Polygon { polygon, style } => {
                draw_shape(cx, polygon.outline_path(resolved), style)
            }
            DecorationParams::TexturedPolygon {
                polygon,
                texture,
                texture_offset,
            } => {
                let origin = anchor.coords + texture_offset;
                cx.save()?;
                append_path(cx, &polygon.outline_path(resolved))?;
                cx.set_source_surface(texture, origin[0], origin[1])?;
                cx.source().set_extend(cairo::Extend::Repeat);
                cx.fill()?;
                cx.restore()?;
                Ok(())
            }
            DecorationParams::Bezier { bezier, style } => {
                draw_shape(cx, bezier.outline_path(resolved), style)
            }
            DecorationParams::Surface {
                surface, centered, ..
            } => {
                let Some(pos) = resolved.first() else {
                    return Ok(());
                };
                let size = na::vector![f64::from(surface.width()), f64::from(surface.height())];
                let upper_left = placement(*pos, size, *centered);
                cx.save()?;
                cx.set_source_surface(surface, upper_left[0], upper_left[1])?;
                cx.rectangle(upper_left[0], upper_left[1], size[0], size[1]);
                cx.fill()?;
                cx.restore()?;
                Ok(())
            }
            DecorationParams::Image {
                image, centered, ..
            } => {
                let Some(pos) = resolved.first() else {
                    return Ok(());
                };
                let upper_left = placement(*pos, image.size(), *centered);
                render::with_piet(cx, |piet_cx| image.draw_at(piet_cx, upper_left))
            }
            DecorationParams::Text {
                text,
                style,
                centered,
                ..
            } => {
                let Some(pos) = resolved.first() else {
                    return Ok(());
                };
                render::with_piet(cx, |piet_cx| {
                    let text_layout = style.build_text_layout(piet_cx.text(), text.clone())?;
                    let size = text_layout.size();
                    let upper_left = placement(*pos, na::vector![size.width, size.height], *centered);
                    piet_cx.draw_text(&text_layout, upper_left.to_kurbo_point());
                    Ok(())
                })
            }
            DecorationParams::Callable(callback) => {
                cx.save()?;
                callback.call(cx, widget);
                cx.restore()?;
                Ok(())
            }
        }
    }

    /// The area the decoration paints on, for the given resolved points.
    ///
    /// None when it can't be known in advance, like for callables.
    pub fn bounds(&self, resolved: &[na::Vector2<f64>]) -> Option<Aabb> {
        let shape_bounds = |bounds: Option<Aabb>, style: &ShapeStyle| {
            bounds.map(|b| b.extend_by(na::Vector2::repeat(style.bounds_margin())))
        };

        match self {
            DecorationParams::None | DecorationParams::Callable(_) => None,
            DecorationParams::Pixel { .. } => {
                let pos = resolved.first()?.floor();
                Some(Aabb::new(pos.into(), (pos + na::vector![1.0, 1.0]).into()))
            }
            DecorationParams::Line { line, style, .. } => shape_bounds(line.bounds(resolved), style),
            DecorationParams::Rect { rect, style } => shape_bounds(rect.bounds(resolved), style),
            DecorationParams::Circle { circle, style } => {
                shape_bounds(circle.bounds(resolved), style)
            }
            DecorationParams::Ellipse { ellipse, style } => {
                shape_bounds(ellipse.bounds(resolved), style)
            }
            DecorationParams::Arc { arc, style } => shape_bounds(arc.bounds(resolved), style),
            DecorationParams::Pie { pie, style } => shape_bounds(pie.bounds(resolved), style),
            DecorationParams::Polygon { polygon, style } => {
                shape_bounds(polygon.bounds(resolved), style)
            }
            DecorationParams::TexturedPolygon { polygon, .. } => polygon.bounds(resolved),
            DecorationParams::Bezier { bezier, style } => {
                shape_bounds(bezier.bounds(resolved), style)
            }
            DecorationParams::Surface {
                surface, centered, ..
            } => {
                let size = na::vector![f64::from(surface.width()), f64::from(surface.height())];
                Some(placed_bounds(*resolved.first()?, size, *centered))
            }
            DecorationParams::Image {
                image, centered, ..
            } => Some(placed_bounds(*resolved.first()?, image.size(), *centered)),
            DecorationParams::Text {
                text,
                style,
                centered,
                ..
            } => {
                let size = style.layout_size(&mut piet_cairo::CairoText::new(), text.clone())?;
                Some(placed_bounds(*resolved.first()?, size, *centered))
            }
        }
    }
}

/// The cairo antialias mode a backend rasterizes with.
pub fn antialias(backend: RasterBackend) -> cairo::Antialias {
    match backend {
        RasterBackend::Precise => cairo::Antialias::None,
        RasterBackend::Antialiased => cairo::Antialias::Good,
    }
}

/// The upper-left corner of an object of the given size placed at `pos`.
fn placement(pos: na::Vector2<f64>, size: na::Vector2<f64>, centered: bool) -> na::Vector2<f64> {
    if centered {
        pos - size * 0.5
    } else {
        pos
    }
}

fn placed_bounds(pos: na::Vector2<f64>, size: na::Vector2<f64>, centered: bool) -> Aabb {
    let upper_left = placement(pos, size, centered);
    Aabb::new(upper_left.into(), (upper_left + size).into())
}

fn draw_pixel(cx: &cairo::Context, pos: na::Vector2<f64>, color: Color) -> anyhow::Result<()> {
    let pos = pos.floor();
    cx.save()?;
    cx.set_antialias(cairo::Antialias::None);
    cx.set_source_rgba(color.r, color.g, color.b, color.a);
    cx.rectangle(pos[0], pos[1], 1.0, 1.0);
    cx.fill()?;
    cx.restore()?;
    Ok(())
}

fn draw_shape(cx: &cairo::Context, path: kurbo::BezPath, style: &ShapeStyle) -> anyhow::Result<()> {
    if path.elements().is_empty() || style.color.is_transparent() {
        return Ok(());
    }

    cx.save()?;
    cx.set_antialias(antialias(style.backend));
    let res = render::with_piet(cx, |piet_cx| {
        let color = piet::Color::from(style.color);
        if style.filled {
            piet_cx.fill(path, &color);
        } else {
            piet_cx.stroke(path, &color, style.effective_stroke_width());
        }
        Ok(())
    });
    cx.restore()?;
    res
}

/// Appends a kurbo path to the current cairo path.
fn append_path(cx: &cairo::Context, path: &kurbo::BezPath) -> anyhow::Result<()> {
    cx.new_path();
    for el in path.elements() {
        match *el {
            kurbo::PathEl::MoveTo(p) => cx.move_to(p.x, p.y),
            kurbo::PathEl::LineTo(p) => cx.line_to(p.x, p.y),
            kurbo::PathEl::QuadTo(p1, p2) => {
                let (x0, y0) = cx.current_point()?;
                let cubic = kurbo::QuadBez::new(kurbo::Point::new(x0, y0), p1, p2).raise();
                cx.curve_to(
                    cubic.p1.x, cubic.p1.y, cubic.p2.x, cubic.p2.y, cubic.p3.x, cubic.p3.y,
                );
            }
            kurbo::PathEl::CurveTo(p1, p2, p3) => {
                cx.curve_to(p1.x, p1.y, p2.x, p2.y, p3.x, p3.y)
            }
            kurbo::PathEl::ClosePath => cx.close_path(),
        }
    }
    Ok(())
}
