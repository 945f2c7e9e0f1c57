//! Day-length map renderer.
//!
//! Loads a north-polar base map, finds equal day-length isolines (or surveys
//! fixed latitudes) for one or more dates, and writes annotated copies.

pub mod config;
pub mod render;

pub use config::MapConfig;
pub use render::{date_range, output_path, render_map, Mode, RenderJob, RenderSummary};
