//! Sweep over target day lengths and pick the isolines worth drawing.

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::config::{ScanConfig, SearchConfig};
use crate::error::Result;
use crate::gradient::Rgb;
use crate::locator::IsolineLocator;
use crate::model::DayLengthModel;
use crate::season::Season;

/// An emitted isoline: a day length, where it occurs, and its ring color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Isoline {
    pub day_length: f64,
    pub latitude: f64,
    pub color: Rgb,
}

/// What happened to one target day length during a scan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScanOutcome {
    Emitted(Isoline),
    /// The latitude domain cannot produce this day length.
    NotFound,
    /// Too close to the previously emitted isoline.
    TooClose { latitude: f64, previous: f64 },
    /// Poleward of the polar cutoff.
    BeyondPolarCutoff { latitude: f64 },
}

impl ScanOutcome {
    pub fn isoline(&self) -> Option<&Isoline> {
        match self {
            Self::Emitted(isoline) => Some(isoline),
            _ => None,
        }
    }
}

/// One target day length and its outcome.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScanStep {
    pub target: f64,
    pub outcome: ScanOutcome,
}

/// Drives the locator across the target sweep and filters the results.
pub struct IsolineScanner<'a> {
    locator: IsolineLocator<'a>,
    config: ScanConfig,
}

impl<'a> IsolineScanner<'a> {
    pub fn new(model: &'a DayLengthModel, search: SearchConfig, config: ScanConfig) -> Self {
        Self {
            locator: IsolineLocator::new(model, search),
            config,
        }
    }

    pub fn locator(&self) -> &IsolineLocator<'a> {
        &self.locator
    }

    /// Target day lengths in sweep order.
    ///
    /// Long-day-ward dates sweep from the longest day down, short-day-ward
    /// dates from 0 up, so the isoline at the edge of the polar-day or
    /// polar-night region is tried first and claims its place before the
    /// inner isolines compete for the separation budget.
    pub fn targets(&self, season: Season) -> Vec<f64> {
        let count = self.config.target_count();
        (0..count)
            .map(|i| {
                let offset = (i as f64 * self.config.step_hours).min(self.config.max_day_length);
                match season {
                    Season::LongDayward => self.config.max_day_length - offset,
                    Season::ShortDayward => offset,
                }
            })
            .collect()
    }

    /// Every attempted target with its outcome, in sweep order.
    pub fn scan_detailed(&self, date: NaiveDate) -> Result<Vec<ScanStep>> {
        let season = self.locator.model().season(date)?;
        let gradient = self.config.gradient();
        let mut last_emitted: Option<f64> = None;
        let mut steps = Vec::with_capacity(self.config.target_count());

        for target in self.targets(season) {
            let outcome = match self.locator.locate(date, target)? {
                None => ScanOutcome::NotFound,
                Some(latitude) => match last_emitted {
                    Some(previous) if (latitude - previous).abs() < self.config.min_separation => {
                        ScanOutcome::TooClose { latitude, previous }
                    }
                    _ if latitude > self.config.polar_cutoff => {
                        ScanOutcome::BeyondPolarCutoff { latitude }
                    }
                    _ => {
                        last_emitted = Some(latitude);
                        ScanOutcome::Emitted(Isoline {
                            day_length: target,
                            latitude,
                            color: gradient.color_for(target),
                        })
                    }
                },
            };

            debug!(%date, target, ?outcome, "Scanned target");
            steps.push(ScanStep { target, outcome });
        }

        Ok(steps)
    }

    /// Isolines that survive the filters, in sweep order.
    pub fn scan(&self, date: NaiveDate) -> Result<Vec<Isoline>> {
        let isolines: Vec<Isoline> = self
            .scan_detailed(date)?
            .iter()
            .filter_map(|step| step.outcome.isoline().copied())
            .collect();

        let stats = self.locator.model().cache().stats();
        info!(
            %date,
            isolines = isolines.len(),
            cache_entries = stats.entries,
            cache_hit_rate = stats.hit_rate(),
            "Scanned day-length isolines"
        );

        Ok(isolines)
    }
}
