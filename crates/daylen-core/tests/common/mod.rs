//! Shared fixtures for day-length tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use chrono::{Datelike, Duration, NaiveDate};
use daylen_core::{
    DayLengthCache, DayLengthModel, Ephemeris, EphemerisError, PolarKind, SunTimes, Twilight,
};

/// Axial tilt used by the analytic ephemeris, in degrees.
pub const OBLIQUITY: f64 = 23.44;

/// Spherical-earth ephemeris with a sinusoidal declination and solar noon
/// fixed at 12:00 UTC. Smooth, fast and exactly monotonic in latitude.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalyticEphemeris;

impl AnalyticEphemeris {
    pub fn declination(date: NaiveDate) -> f64 {
        let day = date.ordinal() as f64;
        OBLIQUITY * (2.0 * std::f64::consts::PI * (day - 81.0) / 365.0).sin()
    }

    /// Latitude of the polar-day edge on a long-day-ward date.
    pub fn polar_day_edge(date: NaiveDate, twilight: Twilight) -> f64 {
        90.0 - Self::declination(date) + twilight.elevation_degrees()
    }

    /// Latitude of the polar-night edge on a short-day-ward date.
    pub fn polar_night_edge(date: NaiveDate, twilight: Twilight) -> f64 {
        90.0 + Self::declination(date) - twilight.elevation_degrees()
    }
}

impl Ephemeris for AnalyticEphemeris {
    fn sunrise_sunset(
        &self,
        date: NaiveDate,
        latitude: f64,
        _longitude: f64,
        twilight: Twilight,
    ) -> Result<SunTimes, EphemerisError> {
        let phi = latitude.to_radians();
        let delta = Self::declination(date).to_radians();
        let h0 = twilight.elevation_degrees().to_radians();

        let cos_h = (h0.sin() - phi.sin() * delta.sin()) / (phi.cos() * delta.cos());
        if cos_h < -1.0 {
            return Err(EphemerisError::Polar(PolarKind::PolarDay));
        }
        if cos_h > 1.0 {
            return Err(EphemerisError::Polar(PolarKind::PolarNight));
        }

        let half_day_ms = (cos_h.acos().to_degrees() / 15.0 * 3_600_000.0).round() as i64;
        let noon = date.and_hms_opt(12, 0, 0).unwrap().and_utc();
        Ok(SunTimes {
            rise: noon - Duration::milliseconds(half_day_ms),
            set: noon + Duration::milliseconds(half_day_ms),
        })
    }
}

/// Wraps an ephemeris and counts calls.
#[derive(Debug, Default)]
pub struct CountingEphemeris<E> {
    pub inner: E,
    calls: AtomicUsize,
}

impl<E> CountingEphemeris<E> {
    pub fn new(inner: E) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl<E: Ephemeris> Ephemeris for CountingEphemeris<E> {
    fn sunrise_sunset(
        &self,
        date: NaiveDate,
        latitude: f64,
        longitude: f64,
        twilight: Twilight,
    ) -> Result<SunTimes, EphemerisError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.sunrise_sunset(date, latitude, longitude, twilight)
    }
}

pub fn analytic_model(twilight: Twilight) -> DayLengthModel {
    DayLengthModel::new(
        Arc::new(AnalyticEphemeris),
        twilight,
        Arc::new(DayLengthCache::default()),
    )
}

pub fn summer_solstice() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 21).unwrap()
}

pub fn winter_solstice() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 12, 21).unwrap()
}
