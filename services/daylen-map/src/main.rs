//! Day-length map CLI
//!
//! Draws equal day-length isolines for one date or a range of dates onto a
//! north-polar base map.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use rayon::prelude::*;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use daylen_core::{DayLengthModel, Twilight};
use daylen_map::{date_range, output_path, render_map, MapConfig, Mode, RenderJob};
use renderer::text::load_font;

/// Day-length map renderer
#[derive(Parser, Debug)]
#[command(name = "daylen-map")]
#[command(about = "Draw equal day-length isolines onto a polar map")]
struct Args {
    /// YAML configuration file
    #[arg(short, long, env = "DAYLEN_MAP_CONFIG")]
    config: Option<PathBuf>,

    /// Date to render (YYYY-MM-DD)
    #[arg(short, long, default_value = "2016-06-21")]
    date: NaiveDate,

    /// Last date of a range to render (inclusive)
    #[arg(long)]
    end_date: Option<NaiveDate>,

    /// Days between rendered dates in a range
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    every_days: u32,

    /// What to draw
    #[arg(long, value_enum, default_value_t = Mode::Isolines)]
    mode: Mode,

    /// Base map image
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output image; ranges get the date appended to the file name
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// TrueType font for labels
    #[arg(long, env = "DAYLEN_FONT")]
    font: Option<PathBuf>,

    /// Sun elevation that defines sunrise and sunset
    /// (sunrise_sunset, civil, nautical, astronomical)
    #[arg(long)]
    twilight: Option<Twilight>,

    /// Map scale in pixels per degree of latitude
    #[arg(long)]
    pixels_per_degree: Option<f64>,

    /// Draw a swatch of the ring color gradient
    #[arg(long)]
    debug_gradient: bool,

    /// Number of maps rendered in parallel
    #[arg(long, env = "DAYLEN_THREADS")]
    threads: Option<usize>,

    /// Log level
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,
}

impl Args {
    /// Configuration file (or environment) with flags applied on top.
    fn resolve_config(&self) -> Result<MapConfig> {
        let mut config = MapConfig::load(self.config.as_deref())?;

        if let Some(input) = &self.input {
            config.input_image = input.clone();
        }
        if let Some(output) = &self.output {
            config.output_image = output.clone();
        }
        if let Some(font) = &self.font {
            config.font_path = Some(font.clone());
        }
        if let Some(twilight) = self.twilight {
            config.core.twilight = twilight;
        }
        if let Some(ppd) = self.pixels_per_degree {
            config.pixels_per_degree = ppd;
        }

        config.validate().context("Invalid configuration")?;
        Ok(config)
    }
}

fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let builder = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();
    init_tracing(&args.log_level, args.log_json);

    let config = args.resolve_config()?;

    if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("Failed to configure render thread pool")?;
    }

    let dates = date_range(args.date, args.end_date, args.every_days)?;
    let is_range = dates.len() > 1;

    let font = match &config.font_path {
        Some(path) => match load_font(path) {
            Ok(font) => Some(font),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to load font, labels will be skipped");
                None
            }
        },
        None => {
            warn!("No font configured, labels will be skipped");
            None
        }
    };

    info!(
        dates = dates.len(),
        mode = ?args.mode,
        twilight = %config.core.twilight,
        input = %config.input_image.display(),
        "Starting day-length map rendering"
    );

    let model = DayLengthModel::with_spa(&config.core);

    let results: Vec<_> = dates
        .par_iter()
        .map(|date| {
            let job = RenderJob {
                date: *date,
                mode: args.mode,
                output: output_path(&config.output_image, *date, is_range),
                debug_gradient: args.debug_gradient,
            };
            render_map(&model, &config, font.as_ref(), &job)
        })
        .collect();

    let mut failed = 0;
    for result in &results {
        if let Err(e) = result {
            error!(error = format!("{:#}", e), "Render failed");
            failed += 1;
        }
    }

    let stats = model.cache().stats();
    info!(
        rendered = results.len() - failed,
        failed,
        cache_hits = stats.hits,
        cache_misses = stats.misses,
        hit_rate = format!("{:.1}%", stats.hit_rate()),
        "Finished"
    );

    if failed > 0 {
        anyhow::bail!("{} of {} maps failed to render", failed, results.len());
    }
    Ok(())
}
