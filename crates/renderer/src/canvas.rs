//! Base map plus the annotations drawn onto it.

use std::path::Path;

use image::{Rgba, RgbaImage};
use rusttype::Font;
use tracing::debug;

use daylen_core::{DateLabel, Gradient, RenderSink, Rgb, RingAnnotation};

use crate::error::{RenderError, RenderResult};
use crate::projection::PolarProjection;
use crate::ring::{composite, ring_layer};
use crate::swatch::draw_gradient_swatch;
use crate::text::{draw_text, draw_text_centered, measure};

/// A polar base map that accepts ring and date-label instructions.
///
/// Without a font, rings are still drawn with their label gaps but no text
/// is rendered.
pub struct MapCanvas {
    image: RgbaImage,
    projection: PolarProjection,
    font: Option<Font<'static>>,
    date_color: Rgb,
}

impl MapCanvas {
    pub fn new(image: RgbaImage, pixels_per_degree: f64) -> Self {
        let projection = PolarProjection::for_image(image.width(), image.height(), pixels_per_degree);
        Self {
            image,
            projection,
            font: None,
            date_color: Rgb::new(0, 0, 0),
        }
    }

    /// Load the base map from disk.
    pub fn open(path: &Path, pixels_per_degree: f64) -> RenderResult<Self> {
        let image = image::open(path)?.to_rgba8();
        debug!(
            path = %path.display(),
            width = image.width(),
            height = image.height(),
            "Loaded base map"
        );
        Ok(Self::new(image, pixels_per_degree))
    }

    pub fn with_font(mut self, font: Font<'static>) -> Self {
        self.font = Some(font);
        self
    }

    pub fn with_date_color(mut self, color: Rgb) -> Self {
        self.date_color = color;
        self
    }

    pub fn projection(&self) -> &PolarProjection {
        &self.projection
    }

    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    pub fn draw_swatch(&mut self, gradient: &Gradient, cell_size: u32) {
        draw_gradient_swatch(&mut self.image, gradient, cell_size);
    }

    /// Write the map; the format follows the file extension.
    pub fn save(&self, path: &Path) -> RenderResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| RenderError::io(parent, e))?;
        }
        self.image.save(path)?;
        debug!(path = %path.display(), "Saved map");
        Ok(())
    }
}

fn rgba(color: Rgb) -> Rgba<u8> {
    Rgba([color.r, color.g, color.b, 255])
}

impl RenderSink for MapCanvas {
    type Error = RenderError;

    fn draw_ring(&mut self, ring: &RingAnnotation) -> Result<(), Self::Error> {
        let gap_size = if ring.label.is_empty() {
            0
        } else {
            let (text_width, _) = measure(self.font.as_ref(), &ring.label, ring.font_size);
            text_width + ring.thickness * 2
        };

        let size = (self.image.width(), self.image.height());
        let Some(layer) = ring_layer(
            &self.projection,
            size,
            ring.latitude,
            ring.thickness,
            gap_size,
            ring.color,
        )?
        else {
            debug!(latitude = ring.latitude, "Ring falls outside the map");
            return Ok(());
        };
        composite(&mut self.image, &layer);

        if let Some(font) = &self.font {
            if !ring.label.is_empty() {
                let anchor = self.projection.label_anchor(ring.latitude);
                draw_text_centered(
                    &mut self.image,
                    font,
                    &ring.label,
                    ring.font_size,
                    rgba(ring.color),
                    anchor,
                );
            }
        }

        Ok(())
    }

    fn draw_date_label(&mut self, label: &DateLabel) -> Result<(), Self::Error> {
        if let Some(font) = &self.font {
            let (x, y) = label.position;
            draw_text(
                &mut self.image,
                font,
                &label.text,
                label.font_size,
                rgba(self.date_color),
                x,
                y,
            );
        }
        Ok(())
    }
}
