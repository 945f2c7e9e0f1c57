//! Configuration for the day-length search.

use serde::{Deserialize, Serialize};

use crate::cache::DEFAULT_CACHE_CAPACITY;
use crate::ephemeris::Twilight;
use crate::error::{DaylenError, Result};
use crate::gradient::{Gradient, Rgb};

/// Top-level configuration for the search pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DaylenConfig {
    /// Threshold that defines sunrise and sunset.
    pub twilight: Twilight,

    /// Maximum number of memoized day lengths.
    pub cache_capacity: usize,

    pub search: SearchConfig,

    pub scan: ScanConfig,
}

impl Default for DaylenConfig {
    fn default() -> Self {
        Self {
            twilight: Twilight::Civil,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            search: SearchConfig::default(),
            scan: ScanConfig::default(),
        }
    }
}

impl DaylenConfig {
    /// Load configuration from environment variables.
    ///
    /// Unset or unparseable variables keep their defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("DAYLEN_TWILIGHT") {
            if let Ok(twilight) = val.parse() {
                config.twilight = twilight;
            }
        }

        if let Ok(val) = std::env::var("DAYLEN_CACHE_CAPACITY") {
            if let Ok(capacity) = val.parse() {
                config.cache_capacity = capacity;
            }
        }

        config.search = SearchConfig::from_env();
        config.scan = ScanConfig::from_env();
        config
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.cache_capacity == 0 {
            return Err(DaylenError::config("cache_capacity must be > 0"));
        }
        self.search.validate()?;
        self.scan.validate()
    }
}

fn env_f64(name: &str) -> Option<f64> {
    std::env::var(name).ok()?.parse().ok()
}

// ============================================================================
// Search Configuration
// ============================================================================

/// Bisection parameters for the isoline locator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Equatorward end of the searched latitude domain, in degrees.
    pub min_lat: f64,

    /// Poleward end of the searched latitude domain, in degrees.
    pub max_lat: f64,

    /// Day lengths within this many hours of the target count as a match.
    pub value_epsilon: f64,

    /// Three consecutive midpoints within this many degrees of each other
    /// end the search.
    pub convergence_epsilon: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_lat: -24.0,
            max_lat: 90.0,
            value_epsilon: 0.001,
            convergence_epsilon: 0.001,
        }
    }
}

impl SearchConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(val) = env_f64("DAYLEN_MIN_LAT") {
            config.min_lat = val;
        }
        if let Some(val) = env_f64("DAYLEN_MAX_LAT") {
            config.max_lat = val;
        }
        if let Some(val) = env_f64("DAYLEN_VALUE_EPSILON") {
            config.value_epsilon = val;
        }
        if let Some(val) = env_f64("DAYLEN_CONVERGENCE_EPSILON") {
            config.convergence_epsilon = val;
        }

        config
    }

    pub fn validate(&self) -> Result<()> {
        if !(-90.0..=90.0).contains(&self.min_lat) || !(-90.0..=90.0).contains(&self.max_lat) {
            return Err(DaylenError::config("latitude domain must lie within [-90, 90]"));
        }
        if self.min_lat >= self.max_lat {
            return Err(DaylenError::config("min_lat must be < max_lat"));
        }
        if !(self.value_epsilon > 0.0) {
            return Err(DaylenError::config("value_epsilon must be > 0"));
        }
        if !(self.convergence_epsilon > 0.0) {
            return Err(DaylenError::config("convergence_epsilon must be > 0"));
        }
        Ok(())
    }

    /// Whether `latitude` lies inside the searched domain.
    pub fn contains(&self, latitude: f64) -> bool {
        (self.min_lat..=self.max_lat).contains(&latitude)
    }
}

// ============================================================================
// Scan Configuration
// ============================================================================

/// Sweep and filter parameters for the isoline scanner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Distance between consecutive target day lengths, in hours.
    pub step_hours: f64,

    /// Longest target day length; the sweep covers [0, max_day_length].
    pub max_day_length: f64,

    /// Minimum distance between emitted isolines, in degrees.
    pub min_separation: f64,

    /// Isolines poleward of this latitude are dropped.
    pub polar_cutoff: f64,

    /// Ring color for a 0 h day.
    pub start_color: Rgb,

    /// Ring color for a `max_day_length` day.
    pub end_color: Rgb,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            step_hours: 0.5,
            max_day_length: 24.0,
            min_separation: 2.5,
            polar_cutoff: 85.0,
            start_color: Rgb::new(160, 0, 0),
            end_color: Rgb::new(0, 160, 0),
        }
    }
}

impl ScanConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(val) = env_f64("DAYLEN_STEP_HOURS") {
            config.step_hours = val;
        }
        if let Some(val) = env_f64("DAYLEN_MIN_SEPARATION") {
            config.min_separation = val;
        }
        if let Some(val) = env_f64("DAYLEN_POLAR_CUTOFF") {
            config.polar_cutoff = val;
        }
        if let Ok(val) = std::env::var("DAYLEN_START_COLOR") {
            if let Ok(color) = val.parse() {
                config.start_color = color;
            }
        }
        if let Ok(val) = std::env::var("DAYLEN_END_COLOR") {
            if let Ok(color) = val.parse() {
                config.end_color = color;
            }
        }

        config
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.step_hours > 0.0) {
            return Err(DaylenError::config("step_hours must be > 0"));
        }
        if !(self.max_day_length > 0.0 && self.max_day_length <= 24.0) {
            return Err(DaylenError::config("max_day_length must be in (0, 24]"));
        }
        if self.min_separation < 0.0 {
            return Err(DaylenError::config("min_separation must be >= 0"));
        }
        Ok(())
    }

    /// Gradient used to color isolines by their day length.
    pub fn gradient(&self) -> Gradient {
        Gradient::new(0.0, self.max_day_length, self.start_color, self.end_color)
    }

    /// Number of target day lengths in one sweep, both ends included.
    pub fn target_count(&self) -> usize {
        (self.max_day_length / self.step_hours).round() as usize + 1
    }
}
