//! Day length at a fixed set of latitudes.
//!
//! The inverse of the isoline scan: instead of asking where a day length
//! occurs, ask what the day length is at evenly spaced latitudes.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::Result;
use crate::gradient::{Gradient, Rgb};
use crate::model::DayLengthModel;

/// Latitudes to survey: `start`, `start + step`, ... up to `end` exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurveyConfig {
    pub start: f64,
    pub end: f64,
    pub step: f64,
}

impl Default for SurveyConfig {
    fn default() -> Self {
        Self {
            start: 35.0,
            end: 90.0,
            step: 5.0,
        }
    }
}

impl SurveyConfig {
    pub fn latitudes(&self) -> Vec<f64> {
        if self.step.is_nan() || self.step <= 0.0 || self.end <= self.start {
            return Vec::new();
        }
        let count = ((self.end - self.start) / self.step).ceil() as usize;
        (0..count)
            .map(|i| self.start + i as f64 * self.step)
            .filter(|lat| *lat < self.end)
            .collect()
    }
}

/// A surveyed latitude with a finite day length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurveyPoint {
    pub latitude: f64,
    pub day_length: f64,
    pub color: Rgb,
}

/// Day length at each configured latitude.
///
/// Latitudes in polar day or polar night have no finite day length and are
/// logged and skipped.
pub fn survey_latitudes(
    model: &DayLengthModel,
    date: NaiveDate,
    config: &SurveyConfig,
    gradient: &Gradient,
) -> Result<Vec<SurveyPoint>> {
    let mut points = Vec::new();

    for latitude in config.latitudes() {
        let day_length = model.compute(date, latitude)?;
        if !day_length.is_finite() {
            warn!(%date, latitude, "Cannot get day length: sun does not cross the horizon");
            continue;
        }

        info!(%date, latitude, day_length = format!("{:.1}", day_length), "Surveyed latitude");
        points.push(SurveyPoint {
            latitude,
            day_length,
            color: gradient.color_for(day_length),
        });
    }

    Ok(points)
}
