//! Season direction for a date.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::debug;

use crate::ephemeris::{Ephemeris, EphemerisError, PolarKind, Twilight};
use crate::error::{DaylenError, Result};

/// Low reference latitude for season detection, in degrees.
pub const LOW_REFERENCE_LATITUDE: f64 = 30.0;

/// High reference latitude for season detection, in degrees.
pub const HIGH_REFERENCE_LATITUDE: f64 = 60.0;

/// Whether days lengthen or shorten toward the pole on a given date.
///
/// The season fixes three things at once: the direction in which day length
/// moves with latitude, the infinity substituted for polar conditions, and
/// the order in which target day lengths are swept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Season {
    /// Day length grows toward the pole (summer half of the year).
    LongDayward,
    /// Day length shrinks toward the pole (winter half of the year).
    ShortDayward,
}

impl Season {
    pub fn is_long_dayward(self) -> bool {
        matches!(self, Self::LongDayward)
    }

    /// Day length standing in for a latitude with no sunrise or sunset.
    pub fn saturation(self) -> f64 {
        match self {
            Self::LongDayward => f64::INFINITY,
            Self::ShortDayward => f64::NEG_INFINITY,
        }
    }

    /// True when `day_length` is already beyond `target` on the poleward side,
    /// so nothing further poleward can come back to it.
    pub fn overshoots(self, day_length: f64, target: f64) -> bool {
        match self {
            Self::LongDayward => day_length > target,
            Self::ShortDayward => day_length < target,
        }
    }

    /// True when `target` lies between the equatorward value `near` and the
    /// poleward value `far`.
    pub fn brackets(self, near: f64, far: f64, target: f64) -> bool {
        match self {
            Self::LongDayward => near <= target && target <= far,
            Self::ShortDayward => near >= target && target >= far,
        }
    }
}

/// Classifies dates by comparing sunrise at two reference latitudes.
#[derive(Clone)]
pub struct SeasonDetector {
    ephemeris: Arc<dyn Ephemeris>,
    twilight: Twilight,
}

impl SeasonDetector {
    pub fn new(ephemeris: Arc<dyn Ephemeris>, twilight: Twilight) -> Self {
        Self {
            ephemeris,
            twilight,
        }
    }

    /// Long-day-ward when the sun rises earlier at 60° than at 30°.
    pub fn detect(&self, date: NaiveDate) -> Result<Season> {
        let low = self
            .ephemeris
            .sunrise_sunset(date, LOW_REFERENCE_LATITUDE, 0.0, self.twilight)
            .map_err(|e| DaylenError::ephemeris(date, LOW_REFERENCE_LATITUDE, e))?;

        let season = match self
            .ephemeris
            .sunrise_sunset(date, HIGH_REFERENCE_LATITUDE, 0.0, self.twilight)
        {
            Ok(high) if high.rise < low.rise => Season::LongDayward,
            Ok(_) => Season::ShortDayward,
            // Deep twilight definitions can put 60° inside the polar region.
            Err(EphemerisError::Polar(PolarKind::PolarDay)) => Season::LongDayward,
            Err(EphemerisError::Polar(PolarKind::PolarNight)) => Season::ShortDayward,
            Err(e) => return Err(DaylenError::ephemeris(date, HIGH_REFERENCE_LATITUDE, e)),
        };

        debug!(%date, ?season, twilight = %self.twilight, "Detected season");
        Ok(season)
    }

    /// Shorthand for `detect(date)?.is_long_dayward()`.
    pub fn is_long_dayward(&self, date: NaiveDate) -> Result<bool> {
        Ok(self.detect(date)?.is_long_dayward())
    }
}
