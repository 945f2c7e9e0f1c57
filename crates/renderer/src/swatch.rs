//! Gradient swatch for eyeballing the ring color ramp.

use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;

use daylen_core::Gradient;

/// Default swatch cell side in pixels.
pub const DEFAULT_CELL_SIZE: u32 = 50;

/// Draw one square per whole value of the gradient domain, left to right
/// along the top edge of the image.
pub fn draw_gradient_swatch(image: &mut RgbaImage, gradient: &Gradient, cell_size: u32) {
    let span = gradient.max_value - gradient.min_value;
    if cell_size == 0 || span.is_nan() || span < 0.0 {
        return;
    }

    let first = gradient.min_value.ceil() as i64;
    let last = gradient.max_value.floor() as i64;

    for (pos, value) in (first..=last).enumerate() {
        let color = gradient.color_for(value as f64);
        let rect = Rect::at(pos as i32 * cell_size as i32, 0).of_size(cell_size, cell_size);
        draw_filled_rect_mut(image, rect, Rgba([color.r, color.g, color.b, 255]));
    }
}
