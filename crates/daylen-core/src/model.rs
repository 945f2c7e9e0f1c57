//! Day length as a function of date and latitude.

use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::NaiveDate;
use lru::LruCache;
use tracing::trace;

use crate::cache::DayLengthCache;
use crate::config::DaylenConfig;
use crate::ephemeris::{Ephemeris, EphemerisError, SpaEphemeris, Twilight};
use crate::error::{DaylenError, Result};
use crate::season::{Season, SeasonDetector};

/// Longitude at which all day lengths are evaluated.
pub const REFERENCE_LONGITUDE: f64 = 0.0;

/// Number of dates whose season is remembered.
pub const SEASON_MEMO_CAPACITY: usize = 512;

/// Memoized day-length function.
///
/// `compute` returns hours between sunrise and sunset under the configured
/// twilight, or a signed infinity where the sun never crosses the threshold:
/// `+inf` on long-day-ward dates (polar day), `-inf` otherwise (polar night).
/// The saturated values keep the function monotonic in latitude, which is
/// what the bisection in [`crate::locator`] relies on.
pub struct DayLengthModel {
    ephemeris: Arc<dyn Ephemeris>,
    twilight: Twilight,
    detector: SeasonDetector,
    cache: Arc<DayLengthCache>,
    seasons: Mutex<LruCache<NaiveDate, Season>>,
}

impl DayLengthModel {
    pub fn new(ephemeris: Arc<dyn Ephemeris>, twilight: Twilight, cache: Arc<DayLengthCache>) -> Self {
        Self {
            detector: SeasonDetector::new(Arc::clone(&ephemeris), twilight),
            ephemeris,
            twilight,
            cache,
            seasons: Mutex::new(LruCache::new(
                NonZeroUsize::new(SEASON_MEMO_CAPACITY).unwrap_or(NonZeroUsize::MIN),
            )),
        }
    }

    /// Model backed by the SPA ephemeris with a fresh cache sized from `config`.
    pub fn with_spa(config: &DaylenConfig) -> Self {
        Self::new(
            Arc::new(SpaEphemeris::new()),
            config.twilight,
            Arc::new(DayLengthCache::new(config.cache_capacity)),
        )
    }

    pub fn twilight(&self) -> Twilight {
        self.twilight
    }

    pub fn cache(&self) -> &DayLengthCache {
        &self.cache
    }

    /// Season of `date`, detected once and remembered.
    pub fn season(&self, date: NaiveDate) -> Result<Season> {
        if let Some(season) = self.lock_seasons().get(&date).copied() {
            return Ok(season);
        }

        let season = self.detector.detect(date)?;
        self.lock_seasons().put(date, season);
        Ok(season)
    }

    /// Number of dates with a remembered season.
    pub fn memoized_seasons(&self) -> usize {
        self.lock_seasons().len()
    }

    fn lock_seasons(&self) -> MutexGuard<'_, LruCache<NaiveDate, Season>> {
        self.seasons.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Day length in hours at `latitude` on `date`.
    pub fn compute(&self, date: NaiveDate, latitude: f64) -> Result<f64> {
        debug_assert!(
            (-90.0..=90.0).contains(&latitude),
            "latitude {latitude} outside [-90, 90]"
        );

        if let Some(hours) = self.cache.get(date, self.twilight, latitude) {
            return Ok(hours);
        }

        let hours = match self
            .ephemeris
            .sunrise_sunset(date, latitude, REFERENCE_LONGITUDE, self.twilight)
        {
            Ok(times) => times.day_length_hours(),
            Err(EphemerisError::Polar(kind)) => {
                let saturated = self.season(date)?.saturation();
                trace!(%date, latitude, ?kind, saturated, "Polar condition");
                saturated
            }
            Err(e) => return Err(DaylenError::ephemeris(date, latitude, e)),
        };

        self.cache.insert(date, self.twilight, latitude, hours);
        Ok(hours)
    }
}
