//! Latitude rings.
//!
//! A ring is stroked anti-aliased onto a transparent layer covering the part
//! of its bounding box that falls inside the image. The label gap is then
//! punched out of the layer as a square centered on the bottom of the ring,
//! and the layer is alpha-blended over the base map.

use image::{Pixel, Rgba, RgbaImage};
use tiny_skia::{Paint, PathBuilder, Pixmap, PremultipliedColorU8, Stroke, Transform};

use daylen_core::Rgb;

use crate::error::{RenderError, RenderResult};
use crate::projection::PolarProjection;

/// Ring pixels plus where they go on the base map.
pub struct RingLayer {
    pub pixmap: Pixmap,
    /// Image coordinates of the layer's top-left pixel.
    pub origin: (u32, u32),
}

/// Stroke the ring for `latitude` and cut a `gap_size` square for its label.
///
/// Returns `None` when the ring has no radius or lies entirely outside an
/// image of `image_size`.
pub fn ring_layer(
    projection: &PolarProjection,
    image_size: (u32, u32),
    latitude: f64,
    thickness: u32,
    gap_size: u32,
    color: Rgb,
) -> RenderResult<Option<RingLayer>> {
    let radius = projection.radius(latitude);
    if radius <= 0.0 {
        return Ok(None);
    }

    // One extra pixel for anti-aliasing.
    let reach = radius + thickness as f64 / 2.0 + 1.0;
    let left = (projection.center_x - reach).floor().max(0.0);
    let top = (projection.center_y - reach).floor().max(0.0);
    let right = (projection.center_x + reach).ceil().min(image_size.0 as f64);
    let bottom = (projection.center_y + reach).ceil().min(image_size.1 as f64);
    if right <= left || bottom <= top {
        return Ok(None);
    }

    let width = (right - left) as u32;
    let height = (bottom - top) as u32;
    let mut pixmap = Pixmap::new(width, height)
        .ok_or_else(|| RenderError::canvas(format!("cannot allocate {}x{} ring layer", width, height)))?;

    // Ring center in layer coordinates; may lie outside the layer.
    let cx = (projection.center_x - left) as f32;
    let cy = (projection.center_y - top) as f32;

    let path = PathBuilder::from_circle(cx, cy, radius as f32)
        .ok_or_else(|| RenderError::canvas(format!("invalid ring radius {}", radius)))?;

    let mut paint = Paint::default();
    paint.set_color_rgba8(color.r, color.g, color.b, 255);
    paint.anti_alias = true;

    let stroke = Stroke {
        width: thickness as f32,
        ..Stroke::default()
    };

    pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);

    if gap_size > 0 {
        let half = gap_size as f32 / 2.0;
        clear_rect(&mut pixmap, cx - half, cy + radius as f32 - half, gap_size as f32);
    }

    Ok(Some(RingLayer {
        pixmap,
        origin: (left as u32, top as u32),
    }))
}

/// Make a square of the layer fully transparent.
fn clear_rect(pixmap: &mut Pixmap, x: f32, y: f32, size: f32) {
    let width = pixmap.width() as i64;
    let height = pixmap.height() as i64;
    let x0 = (x.floor() as i64).clamp(0, width);
    let y0 = (y.floor() as i64).clamp(0, height);
    let x1 = ((x + size).ceil() as i64).clamp(0, width);
    let y1 = ((y + size).ceil() as i64).clamp(0, height);

    let pixels = pixmap.pixels_mut();
    for row in y0..y1 {
        for col in x0..x1 {
            pixels[(row * width + col) as usize] = PremultipliedColorU8::TRANSPARENT;
        }
    }
}

/// Alpha-blend a ring layer over the base map.
pub fn composite(image: &mut RgbaImage, layer: &RingLayer) {
    let layer_width = layer.pixmap.width();
    let (ox, oy) = layer.origin;

    for (i, pixel) in layer.pixmap.pixels().iter().enumerate() {
        if pixel.alpha() == 0 {
            continue;
        }

        let x = ox + i as u32 % layer_width;
        let y = oy + i as u32 / layer_width;
        if x >= image.width() || y >= image.height() {
            continue;
        }

        let color = pixel.demultiply();
        let src = Rgba([color.red(), color.green(), color.blue(), color.alpha()]);
        image.get_pixel_mut(x, y).blend(&src);
    }
}
