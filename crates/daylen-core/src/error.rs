//! Error types for day-length computations.

use chrono::NaiveDate;
use thiserror::Error;

use crate::ephemeris::EphemerisError;

/// Errors that can occur while computing day lengths or isolines.
///
/// Polar conditions never show up here: the day-length model absorbs them
/// by saturating to an infinity.
#[derive(Error, Debug)]
pub enum DaylenError {
    /// The ephemeris failed for a reason other than a polar condition.
    #[error("ephemeris failed for {date} at latitude {latitude}: {source}")]
    Ephemeris {
        date: NaiveDate,
        latitude: f64,
        #[source]
        source: EphemerisError,
    },

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Color string could not be parsed.
    #[error("invalid color '{0}': expected #rrggbb")]
    InvalidColor(String),

    /// Unknown twilight name.
    #[error("unknown twilight '{0}': expected sunrise_sunset, civil, nautical or astronomical")]
    UnknownTwilight(String),
}

impl DaylenError {
    /// Create an Ephemeris error.
    pub fn ephemeris(date: NaiveDate, latitude: f64, source: EphemerisError) -> Self {
        Self::Ephemeris {
            date,
            latitude,
            source,
        }
    }

    /// Create a Config error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

/// Result type for day-length operations.
pub type Result<T> = std::result::Result<T, DaylenError>;
