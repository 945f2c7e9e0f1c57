//! One annotated map per date.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::ValueEnum;
use rusttype::Font;
use tracing::info;

use daylen_core::{survey_latitudes, AnnotationPlan, DayLengthModel, IsolineScanner};
use renderer::MapCanvas;

use crate::config::MapConfig;

/// What to draw on each map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Rings where day length equals each half-hour step.
    Isolines,
    /// Rings at fixed latitudes, labeled with their day length.
    Survey,
}

#[derive(Debug, Clone)]
pub struct RenderJob {
    pub date: NaiveDate,
    pub mode: Mode,
    pub output: PathBuf,
    pub debug_gradient: bool,
}

#[derive(Debug, Clone)]
pub struct RenderSummary {
    pub date: NaiveDate,
    pub output: PathBuf,
    pub rings: usize,
}

/// Dates from `start` through `end` inclusive, every `every_days` days.
pub fn date_range(start: NaiveDate, end: Option<NaiveDate>, every_days: u32) -> Result<Vec<NaiveDate>> {
    let end = end.unwrap_or(start);
    if end < start {
        bail!("end date {} is before start date {}", end, start);
    }
    if every_days == 0 {
        bail!("every_days must be > 0");
    }

    Ok(start
        .iter_days()
        .step_by(every_days as usize)
        .take_while(|date| *date <= end)
        .collect())
}

/// Output path for a date: `out.png` for a single map, `out-2016-06-21.png`
/// when rendering a range.
pub fn output_path(base: &Path, date: NaiveDate, suffix_date: bool) -> PathBuf {
    if !suffix_date {
        return base.to_path_buf();
    }

    let stem = base
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "out".to_string());
    let name = match base.extension() {
        Some(ext) => format!("{}-{}.{}", stem, date, ext.to_string_lossy()),
        None => format!("{}-{}", stem, date),
    };
    base.with_file_name(name)
}

fn plan_for(model: &DayLengthModel, config: &MapConfig, job: &RenderJob) -> Result<AnnotationPlan> {
    let plan = match job.mode {
        Mode::Isolines => {
            let scanner = IsolineScanner::new(model, config.core.search, config.core.scan);
            let isolines = scanner
                .scan(job.date)
                .with_context(|| format!("Isoline scan failed for {}", job.date))?;
            AnnotationPlan::for_isolines(job.date, &isolines, &config.style)
        }
        Mode::Survey => {
            let gradient = config.core.scan.gradient();
            let points = survey_latitudes(model, job.date, &config.survey, &gradient)
                .with_context(|| format!("Latitude survey failed for {}", job.date))?;
            AnnotationPlan::for_survey(job.date, &points, &config.style)
        }
    };
    Ok(plan)
}

/// Compute the annotations for one date and draw them onto a fresh copy of
/// the base map.
pub fn render_map(
    model: &DayLengthModel,
    config: &MapConfig,
    font: Option<&Font<'static>>,
    job: &RenderJob,
) -> Result<RenderSummary> {
    let start = Instant::now();
    let plan = plan_for(model, config, job)?;

    let mut canvas = MapCanvas::open(&config.input_image, config.pixels_per_degree)
        .with_context(|| format!("Failed to open base map {:?}", config.input_image))?
        .with_date_color(config.date_color);
    if let Some(font) = font {
        canvas = canvas.with_font(font.clone());
    }

    plan.render_into(&mut canvas)
        .with_context(|| format!("Failed to draw annotations for {}", job.date))?;

    if job.debug_gradient {
        canvas.draw_swatch(&config.core.scan.gradient(), config.swatch_cell_size);
    }

    canvas
        .save(&job.output)
        .with_context(|| format!("Failed to write {:?}", job.output))?;

    info!(
        date = %job.date,
        mode = ?job.mode,
        rings = plan.rings.len(),
        output = %job.output.display(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Rendered map"
    );

    Ok(RenderSummary {
        date: job.date,
        output: job.output.clone(),
        rings: plan.rings.len(),
    })
}
