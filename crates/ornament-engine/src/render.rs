// Imports
use core::fmt::Debug;
use image::ImageReader;
use ornament_compose::ext::AabbExt;
use p2d::bounding_volume::Aabb;
use piet::RenderContext;
use std::io;

/// The memory format of [Image] data.
#[non_exhaustive]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ImageMemoryFormat {
    R8g8b8a8Premultiplied,
}

impl Default for ImageMemoryFormat {
    fn default() -> Self {
        Self::R8g8b8a8Premultiplied
    }
}

impl From<ImageMemoryFormat> for piet::ImageFormat {
    fn from(value: ImageMemoryFormat) -> Self {
        match value {
            ImageMemoryFormat::R8g8b8a8Premultiplied => piet::ImageFormat::RgbaPremul,
        }
    }
}

/// A bitmap image, used for image decorations and polygon textures.
#[derive(Clone)]
pub struct Image {
    /// The image data.
    pub data: glib::Bytes,
    /// Width of the image data.
    pub pixel_width: u32,
    /// Height of the image data.
    pub pixel_height: u32,
    /// Memory format.
    pub memory_format: ImageMemoryFormat,
}

impl Debug for Image {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Image")
            .field("data", &String::from("- no debug impl -"))
            .field("pixel_width", &self.pixel_width)
            .field("pixel_height", &self.pixel_height)
            .field("memory_format", &self.memory_format)
            .finish()
    }
}

impl From<image::DynamicImage> for Image {
    fn from(dynamic_image: image::DynamicImage) -> Self {
        let pixel_width = dynamic_image.width();
        let pixel_height = dynamic_image.height();
        let mut data = dynamic_image.into_rgba8().into_raw();
        premultiply_rgba(&mut data);

        Self {
            data: glib::Bytes::from_owned(data),
            pixel_width,
            pixel_height,
            memory_format: ImageMemoryFormat::R8g8b8a8Premultiplied,
        }
    }
}

impl Image {
    pub fn assert_valid(&self) -> anyhow::Result<()> {
        if self.pixel_width == 0
            || self.pixel_height == 0
            || self.data.len() != 4 * self.pixel_width as usize * self.pixel_height as usize
        {
            Err(anyhow::anyhow!(
                "Asserting image validity failed, invalid size or data."
            ))
        } else {
            Ok(())
        }
    }

    /// The size in pixels.
    pub fn size(&self) -> na::Vector2<f64> {
        na::vector![f64::from(self.pixel_width), f64::from(self.pixel_height)]
    }

    /// Decodes an image, guessing the format from its content.
    pub fn try_from_encoded_bytes(bytes: &[u8]) -> Result<Self, anyhow::Error> {
        let reader = ImageReader::new(io::Cursor::new(bytes)).with_guessed_format()?;
        Ok(Image::from(reader.decode()?))
    }

    pub fn try_from_cairo_surface(surface: &cairo::ImageSurface) -> anyhow::Result<Self> {
        let width = surface.width() as u32;
        let height = surface.height() as u32;
        let stride = surface.stride() as usize;
        let row_len = width as usize * 4;

        let mut bytes = Vec::with_capacity(row_len * height as usize);
        surface
            .with_data(|data| {
                for row in data.chunks(stride).take(height as usize) {
                    bytes.extend_from_slice(&row[..row_len]);
                }
            })
            .map_err(|e| anyhow::anyhow!("accessing image surface data failed, Err: {e:?}"))?;

        Ok(Image {
            // cairo renders to bgra8-premultiplied, but we convert it to rgba8-premultiplied
            data: glib::Bytes::from_owned(swap_red_blue(bytes)),
            pixel_width: width,
            pixel_height: height,
            memory_format: ImageMemoryFormat::R8g8b8a8Premultiplied,
        })
    }

    /// Copies the image into a new cairo surface, to be used as a source pattern.
    pub fn to_cairo_surface(&self) -> anyhow::Result<cairo::ImageSurface> {
        self.assert_valid()?;

        let mut surface = cairo::ImageSurface::create(
            cairo::Format::ARgb32,
            self.pixel_width as i32,
            self.pixel_height as i32,
        )
        .map_err(|e| {
            anyhow::anyhow!(
                "creating image surface with dimensions ({}, {}) failed, Err: {e:?}",
                self.pixel_width,
                self.pixel_height,
            )
        })?;
        let stride = surface.stride() as usize;
        let row_len = self.pixel_width as usize * 4;

        {
            let mut target = surface
                .data()
                .map_err(|e| anyhow::anyhow!("accessing image surface data failed, Err: {e:?}"))?;
            for (dst, src) in target
                .chunks_mut(stride)
                .zip(self.data.chunks_exact(row_len))
            {
                for (d, s) in dst[..row_len].chunks_exact_mut(4).zip(src.chunks_exact(4)) {
                    d[0] = s[2];
                    d[1] = s[1];
                    d[2] = s[0];
                    d[3] = s[3];
                }
            }
        }

        Ok(surface)
    }

    /// Draws the image with its upper-left corner at `pos`, in its natural size.
    ///
    /// Expects the image to be in rgba8-premultiplied format.
    pub fn draw_at(
        &self,
        cx: &mut impl piet::RenderContext,
        pos: na::Vector2<f64>,
    ) -> anyhow::Result<()> {
        self.assert_valid()?;
        let piet_image = cx
            .make_image(
                self.pixel_width as usize,
                self.pixel_height as usize,
                &self.data,
                piet::ImageFormat::from(self.memory_format),
            )
            .map_err(|e| anyhow::anyhow!("{e:?}"))?;
        let rect = Aabb::new(pos.into(), (pos + self.size()).into());
        cx.draw_image(
            &piet_image,
            rect.to_kurbo_rect(),
            piet::InterpolationMode::Bilinear,
        );
        Ok(())
    }
}

/// Generates a surface covering the bounds with a provided closure that draws onto a [cairo::Context].
///
/// The context is translated so that drawing happens in the coordinate space of the bounds.
pub fn gen_surface_with_cairo<F>(draw_func: F, mut bounds: Aabb) -> anyhow::Result<cairo::ImageSurface>
where
    F: FnOnce(&cairo::Context) -> anyhow::Result<()>,
{
    bounds.ensure_positive();
    bounds.assert_valid()?;

    let width = bounds.extents()[0].ceil().max(1.0) as i32;
    let height = bounds.extents()[1].ceil().max(1.0) as i32;

    let image_surface = cairo::ImageSurface::create(cairo::Format::ARgb32, width, height)
        .map_err(|e| {
            anyhow::anyhow!(
                "creating image surface with dimensions ({}, {}) failed, Err: {e:?}",
                width,
                height,
            )
        })?;

    {
        let cairo_cx = cairo::Context::new(&image_surface)?;
        cairo_cx.translate(-bounds.mins[0], -bounds.mins[1]);
        // Apply the draw function
        draw_func(&cairo_cx)?;
    }
    image_surface.flush();

    Ok(image_surface)
}

/// Runs a closure that draws onto a [piet_cairo::CairoRenderContext] wrapping the given cairo context.
pub fn with_piet<F>(cx: &cairo::Context, draw_func: F) -> anyhow::Result<()>
where
    F: FnOnce(&mut piet_cairo::CairoRenderContext) -> anyhow::Result<()>,
{
    let mut piet_cx = piet_cairo::CairoRenderContext::new(cx);
    // Apply the draw function
    draw_func(&mut piet_cx)?;
    piet_cx
        .finish()
        .map_err(|e| anyhow::anyhow!("finishing piet context failed, Err: {e:?}"))?;
    Ok(())
}

/// The clip extents of the context in user space.
pub fn clip_bounds(cx: &cairo::Context) -> anyhow::Result<Aabb> {
    let (x1, y1, x2, y2) = cx
        .clip_extents()
        .map_err(|e| anyhow::anyhow!("retrieving clip extents failed, Err: {e:?}"))?;
    let mut bounds = Aabb::new(na::point![x1, y1], na::point![x2, y2]);
    bounds.ensure_positive();
    Ok(bounds)
}

fn swap_red_blue(mut bytes: Vec<u8>) -> Vec<u8> {
    for src in bytes.chunks_exact_mut(4) {
        src.swap(0, 2);
    }
    bytes
}

fn premultiply_rgba(bytes: &mut [u8]) {
    for px in bytes.chunks_exact_mut(4) {
        let alpha = u16::from(px[3]);
        for c in &mut px[..3] {
            *c = ((u16::from(*c) * alpha + 127) / 255) as u8;
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// A solid image of the given size and color.
    pub(crate) fn solid_image(width: u32, height: u32, rgba: [u8; 4]) -> Image {
        Image::from(image::DynamicImage::ImageRgba8(image::RgbaImage::from_pixel(
            width,
            height,
            image::Rgba(rgba),
        )))
    }

    #[test]
    fn premultiplied_on_import() {
        let image = solid_image(2, 2, [255, 0, 0, 128]);
        image.assert_valid().unwrap();
        assert_eq!(&image.data[..4], &[128, 0, 0, 128]);
    }

    #[test]
    fn invalid_image() {
        let image = Image {
            data: glib::Bytes::from_owned(vec![0u8; 12]),
            pixel_width: 2,
            pixel_height: 2,
            memory_format: ImageMemoryFormat::default(),
        };
        assert!(image.assert_valid().is_err());
        assert!(image.to_cairo_surface().is_err());
    }

    #[test]
    fn cairo_surface_roundtrip() {
        let image = solid_image(3, 2, [0, 0, 255, 255]);
        let surface = image.to_cairo_surface().unwrap();
        assert_eq!((surface.width(), surface.height()), (3, 2));
        let back = Image::try_from_cairo_surface(&surface).unwrap();
        assert_eq!(&back.data[..], &image.data[..]);
    }

    #[test]
    fn gen_surface_covers_bounds() {
        let bounds = Aabb::new(na::point![10.0, 20.0], na::point![14.0, 23.5]);
        let surface = gen_surface_with_cairo(
            |cx| {
                cx.set_source_rgba(1.0, 0.0, 0.0, 1.0);
                cx.rectangle(10.0, 20.0, 1.0, 1.0);
                cx.fill()?;
                Ok(())
            },
            bounds,
        )
        .unwrap();
        assert_eq!((surface.width(), surface.height()), (4, 4));

        let image = Image::try_from_cairo_surface(&surface).unwrap();
        assert_eq!(&image.data[..4], &[255, 0, 0, 255]);
        assert_eq!(&image.data[4..8], &[0, 0, 0, 0]);
    }

    #[test]
    fn clip_bounds_in_user_space() {
        let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, 60, 40).unwrap();
        let cx = cairo::Context::new(&surface).unwrap();
        assert!(clip_bounds(&cx)
            .unwrap()
            .approx_eq(&Aabb::new(na::point![0.0, 0.0], na::point![60.0, 40.0])));

        cx.translate(10.0, 5.0);
        assert!(clip_bounds(&cx)
            .unwrap()
            .approx_eq(&Aabb::new(na::point![-10.0, -5.0], na::point![50.0, 35.0])));
    }
}
