//! Equal day-length isolines.
//!
//! For a calendar date this crate finds, for each target day length between
//! 0 and 24 hours, the latitude at which daylight lasts exactly that long,
//! and turns the surviving results into draw instructions for a map.
//!
//! # Architecture
//!
//! ```text
//! date
//!   │
//!   ▼
//! IsolineScanner::scan(date)        sweep 24 → 0 h (summer) or 0 → 24 h (winter)
//!   │
//!   ├─► IsolineLocator::locate(date, target)     bisection over latitude
//!   │         │
//!   │         └─► DayLengthModel::compute(date, lat)
//!   │                   │
//!   │                   ├─► DayLengthCache (LRU)
//!   │                   ├─► Ephemeris (sunrise/sunset)
//!   │                   └─► SeasonDetector (sign of polar saturation)
//!   │
//!   ├─► filter: not found / too close / beyond polar cutoff
//!   │
//!   └─► color_for(target)           HLS gradient
//!             │
//!             ▼
//!       AnnotationPlan ──► RenderSink
//! ```
//!
//! # Example
//!
//! ```ignore
//! use daylen_core::{AnnotationPlan, AnnotationStyle, DayLengthModel, DaylenConfig, IsolineScanner};
//!
//! let config = DaylenConfig::default();
//! let model = DayLengthModel::with_spa(&config);
//! let scanner = IsolineScanner::new(&model, config.search, config.scan);
//!
//! let date = chrono::NaiveDate::from_ymd_opt(2016, 6, 21).unwrap();
//! let isolines = scanner.scan(date)?;
//! let plan = AnnotationPlan::for_isolines(date, &isolines, &AnnotationStyle::default());
//! ```

pub mod annotation;
pub mod cache;
pub mod config;
pub mod ephemeris;
pub mod error;
pub mod gradient;
pub mod locator;
pub mod model;
pub mod scanner;
pub mod season;
pub mod survey;

pub use annotation::{
    format_day_length, AnnotationPlan, AnnotationStyle, DateLabel, RenderSink, RingAnnotation,
};
pub use cache::{CacheStats, DayLengthCache, DEFAULT_CACHE_CAPACITY};
pub use config::{DaylenConfig, ScanConfig, SearchConfig};
pub use ephemeris::{Ephemeris, EphemerisError, PolarKind, SpaEphemeris, SunTimes, Twilight};
pub use error::{DaylenError, Result};
pub use gradient::{color_for, Gradient, Hls, Rgb};
pub use locator::{IsolineLocator, MidpointHistory};
pub use model::{DayLengthModel, SEASON_MEMO_CAPACITY};
pub use scanner::{Isoline, IsolineScanner, ScanOutcome, ScanStep};
pub use season::{Season, SeasonDetector};
pub use survey::{survey_latitudes, SurveyConfig, SurveyPoint};
