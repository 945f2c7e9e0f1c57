//! Draw instructions handed to a renderer.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::gradient::Rgb;
use crate::scanner::Isoline;
use crate::survey::SurveyPoint;

/// A colored ring at a latitude, interrupted by its label.
#[derive(Debug, Clone, PartialEq)]
pub struct RingAnnotation {
    pub latitude: f64,
    pub label: String,
    pub color: Rgb,
    /// Stroke width in pixels.
    pub thickness: u32,
    /// Label size in pixels.
    pub font_size: f32,
}

/// The date printed on the map.
#[derive(Debug, Clone, PartialEq)]
pub struct DateLabel {
    pub text: String,
    /// Top-left corner in pixels.
    pub position: (i32, i32),
    pub font_size: f32,
}

/// Consumer of draw instructions.
pub trait RenderSink {
    type Error;

    fn draw_ring(&mut self, ring: &RingAnnotation) -> Result<(), Self::Error>;

    fn draw_date_label(&mut self, label: &DateLabel) -> Result<(), Self::Error>;
}

/// Sizes and formats used when turning isolines into instructions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotationStyle {
    pub ring_thickness: u32,
    pub ring_font_size: f32,
    /// `chrono` strftime pattern.
    pub date_format: String,
    pub date_position: (i32, i32),
    pub date_font_size: f32,
}

impl Default for AnnotationStyle {
    fn default() -> Self {
        Self {
            ring_thickness: 3,
            ring_font_size: 40.0,
            date_format: "%B %-d, %Y".to_string(),
            date_position: (20, 20),
            date_font_size: 48.0,
        }
    }
}

/// Label text for a target day length: "24", "23.5".
pub fn format_day_length(hours: f64) -> String {
    if hours.fract().abs() < 0.01 {
        format!("{:.0}", hours)
    } else {
        format!("{:.1}", hours)
    }
}

/// Everything to draw for one date, in drawing order.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationPlan {
    pub rings: Vec<RingAnnotation>,
    pub date_label: DateLabel,
}

impl AnnotationPlan {
    /// One ring per isoline, labeled with its target day length.
    pub fn for_isolines(date: NaiveDate, isolines: &[Isoline], style: &AnnotationStyle) -> Self {
        let rings = isolines
            .iter()
            .map(|isoline| RingAnnotation {
                latitude: isoline.latitude,
                label: format_day_length(isoline.day_length),
                color: isoline.color,
                thickness: style.ring_thickness,
                font_size: style.ring_font_size,
            })
            .collect();

        Self {
            rings,
            date_label: date_label(date, style),
        }
    }

    /// One ring per surveyed latitude, labeled with the measured day length.
    pub fn for_survey(date: NaiveDate, points: &[SurveyPoint], style: &AnnotationStyle) -> Self {
        let rings = points
            .iter()
            .map(|point| RingAnnotation {
                latitude: point.latitude,
                label: format!("{:.1}", point.day_length),
                color: point.color,
                thickness: style.ring_thickness,
                font_size: style.ring_font_size,
            })
            .collect();

        Self {
            rings,
            date_label: date_label(date, style),
        }
    }

    /// Replay the plan into a sink: rings first, then the date.
    pub fn render_into<S: RenderSink + ?Sized>(&self, sink: &mut S) -> Result<(), S::Error> {
        for ring in &self.rings {
            sink.draw_ring(ring)?;
        }
        sink.draw_date_label(&self.date_label)
    }
}

fn date_label(date: NaiveDate, style: &AnnotationStyle) -> DateLabel {
    use std::fmt::Write;

    // An invalid strftime pattern falls back to ISO format.
    let mut text = String::new();
    if write!(text, "{}", date.format(&style.date_format)).is_err() {
        text = date.to_string();
    }

    DateLabel {
        text,
        position: style.date_position,
        font_size: style.date_font_size,
    }
}
