//! Text measuring and drawing for ring and date labels.

use std::path::Path;

use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_text_mut, text_size};
use rusttype::{Font, Scale};

use crate::error::{RenderError, RenderResult};

/// Load a TrueType font from disk.
pub fn load_font(path: &Path) -> RenderResult<Font<'static>> {
    let bytes = std::fs::read(path).map_err(|e| RenderError::io(path, e))?;
    Font::try_from_vec(bytes).ok_or_else(|| RenderError::FontLoad(path.to_path_buf()))
}

/// Width and height of `text` in pixels.
///
/// Without a font the size is estimated from the character count so ring
/// gaps keep a sensible width.
pub fn measure(font: Option<&Font<'_>>, text: &str, font_size: f32) -> (u32, u32) {
    match font {
        Some(font) => {
            let (w, h) = text_size(Scale::uniform(font_size), font, text);
            (w.max(0) as u32, h.max(0) as u32)
        }
        None => {
            let char_width = font_size * 0.6;
            (
                (text.chars().count() as f32 * char_width).ceil() as u32,
                font_size.ceil() as u32,
            )
        }
    }
}

/// Draw `text` with its top-left corner at (x, y).
pub fn draw_text(
    image: &mut RgbaImage,
    font: &Font<'_>,
    text: &str,
    font_size: f32,
    color: Rgba<u8>,
    x: i32,
    y: i32,
) {
    draw_text_mut(image, color, x, y, Scale::uniform(font_size), font, text);
}

/// Draw `text` centered on (x, y).
pub fn draw_text_centered(
    image: &mut RgbaImage,
    font: &Font<'_>,
    text: &str,
    font_size: f32,
    color: Rgba<u8>,
    center: (f64, f64),
) {
    let (w, h) = measure(Some(font), text, font_size);
    let x = (center.0 - w as f64 / 2.0).round() as i32;
    let y = (center.1 - h as f64 / 2.0).round() as i32;
    draw_text(image, font, text, font_size, color, x, y);
}
