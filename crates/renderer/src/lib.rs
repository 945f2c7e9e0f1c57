//! Map rendering for day-length isolines.
//!
//! Draws onto a north-polar azimuthal equidistant base map:
//! - Latitude rings (anti-aliased, with a gap for the label)
//! - Ring and date labels
//! - Gradient swatch for checking the color ramp

pub mod canvas;
pub mod error;
pub mod projection;
pub mod ring;
pub mod swatch;
pub mod text;

pub use canvas::MapCanvas;
pub use error::{RenderError, RenderResult};
pub use projection::{PolarProjection, DEFAULT_PIXELS_PER_DEGREE};
