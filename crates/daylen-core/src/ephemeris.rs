//! Sunrise/sunset provider.
//!
//! The search pipeline only needs one question answered: when does the sun
//! cross a given twilight threshold on a date at a latitude. [`Ephemeris`]
//! is that seam; [`SpaEphemeris`] answers it with the NREL Solar Position
//! Algorithm from the `solar-positioning` crate.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use solar_positioning::{spa, time::DeltaT, Horizon, SunriseResult};
use thiserror::Error;

use crate::error::DaylenError;

/// Sun elevation threshold that defines "sunrise" and "sunset".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Twilight {
    /// Upper limb on the horizon, refraction included.
    SunriseSunset,
    /// Sun 6° below the horizon.
    #[default]
    Civil,
    /// Sun 12° below the horizon.
    Nautical,
    /// Sun 18° below the horizon.
    Astronomical,
}

impl Twilight {
    /// The matching `solar-positioning` horizon.
    pub fn horizon(self) -> Horizon {
        match self {
            Self::SunriseSunset => Horizon::SunriseSunset,
            Self::Civil => Horizon::CivilTwilight,
            Self::Nautical => Horizon::NauticalTwilight,
            Self::Astronomical => Horizon::AstronomicalTwilight,
        }
    }

    /// Sun elevation at the threshold, in degrees.
    pub fn elevation_degrees(self) -> f64 {
        self.horizon().elevation_angle()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SunriseSunset => "sunrise_sunset",
            Self::Civil => "civil",
            Self::Nautical => "nautical",
            Self::Astronomical => "astronomical",
        }
    }
}

impl FromStr for Twilight {
    type Err = DaylenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sunrise_sunset" | "sunrise" | "official" => Ok(Self::SunriseSunset),
            "civil" => Ok(Self::Civil),
            "nautical" => Ok(Self::Nautical),
            "astronomical" => Ok(Self::Astronomical),
            _ => Err(DaylenError::UnknownTwilight(s.to_string())),
        }
    }
}

impl fmt::Display for Twilight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which way the sun fails to cross the threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolarKind {
    /// Sun stays above the threshold all day.
    PolarDay,
    /// Sun stays below the threshold all day.
    PolarNight,
}

/// Threshold crossings for one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SunTimes {
    pub rise: DateTime<Utc>,
    pub set: DateTime<Utc>,
}

impl SunTimes {
    /// Time between rise and set, in hours.
    pub fn day_length_hours(&self) -> f64 {
        (self.set - self.rise).num_milliseconds() as f64 / 3_600_000.0
    }
}

/// Errors reported by an [`Ephemeris`].
#[derive(Error, Debug)]
pub enum EphemerisError {
    /// No sunrise/sunset crossing exists for this date and latitude.
    #[error("no threshold crossing: {0:?}")]
    Polar(PolarKind),

    /// The underlying algorithm rejected the input.
    #[error("solar position algorithm failed: {0}")]
    Solar(#[from] solar_positioning::Error),

    /// The date has no representable UTC midnight.
    #[error("date {0} is out of range")]
    InvalidDate(NaiveDate),
}

/// Source of sunrise/sunset times.
pub trait Ephemeris: Send + Sync {
    /// Sunrise and sunset on `date` (UTC day) at the given position.
    ///
    /// Returns [`EphemerisError::Polar`] when the sun never crosses the
    /// twilight threshold that day.
    fn sunrise_sunset(
        &self,
        date: NaiveDate,
        latitude: f64,
        longitude: f64,
        twilight: Twilight,
    ) -> Result<SunTimes, EphemerisError>;
}

/// NREL SPA backed ephemeris with an estimated ΔT per date.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpaEphemeris;

impl SpaEphemeris {
    pub fn new() -> Self {
        Self
    }
}

impl Ephemeris for SpaEphemeris {
    fn sunrise_sunset(
        &self,
        date: NaiveDate,
        latitude: f64,
        longitude: f64,
        twilight: Twilight,
    ) -> Result<SunTimes, EphemerisError> {
        let midnight = date
            .and_hms_opt(0, 0, 0)
            .ok_or(EphemerisError::InvalidDate(date))?
            .and_utc();
        let delta_t = DeltaT::estimate_from_date_like(date)?;

        match spa::sunrise_sunset_for_horizon(
            midnight,
            latitude,
            longitude,
            delta_t,
            twilight.horizon(),
        )? {
            SunriseResult::RegularDay {
                sunrise, sunset, ..
            } => Ok(SunTimes {
                rise: sunrise,
                set: sunset,
            }),
            SunriseResult::AllDay { .. } => Err(EphemerisError::Polar(PolarKind::PolarDay)),
            SunriseResult::AllNight { .. } => Err(EphemerisError::Polar(PolarKind::PolarNight)),
        }
    }
}
