//! Bisection search for the latitude of a given day length.
//!
//! Day length is monotonic in latitude for a fixed date, so bisection over
//! the latitude domain finds where it equals a target. Two things make the
//! plain textbook loop insufficient:
//!
//! - Near the pole the model saturates to an infinity. A bracket straddling
//!   the polar-day edge has one finite and one infinite endpoint, and the
//!   finite side may approach the target too slowly for a value tolerance to
//!   ever fire. The search therefore also stops when its midpoint stops
//!   moving (the convergence guard).
//! - Targets outside the range the domain can produce must be reported as
//!   not found rather than converged onto a domain edge.
//!
//! ```text
//!   min_lat                 mid                  max_lat
//!      |---------------------|---------------------|
//!      1. dl(low) past target?          -> not found
//!      2. last three mids within eps?   -> latest mid
//!      3. dl(low|mid|high) ≈ target?    -> that latitude
//!      4. keep the half that brackets the target (upper half if neither)
//! ```
//!
//! Step 1 only inspects the low endpoint. A target that the high endpoint
//! cannot reach is not detected there; it ends through the convergence
//! guard at the poleward edge instead.

use chrono::NaiveDate;
use tracing::debug;

use crate::config::SearchConfig;
use crate::error::Result;
use crate::model::DayLengthModel;

/// Recent bisection midpoints in a fixed three-slot ring buffer.
#[derive(Debug, Clone, Default)]
pub struct MidpointHistory {
    slots: [f64; 3],
    len: usize,
    next: usize,
}

impl MidpointHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, latitude: f64) {
        self.slots[self.next] = latitude;
        self.next = (self.next + 1) % self.slots.len();
        self.len = (self.len + 1).min(self.slots.len());
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// True once three midpoints are recorded and all lie pairwise within
    /// `epsilon` degrees.
    pub fn converged(&self, epsilon: f64) -> bool {
        if self.len < self.slots.len() {
            return false;
        }
        let [a, b, c] = self.slots;
        (a - b).abs() <= epsilon && (b - c).abs() <= epsilon && (a - c).abs() <= epsilon
    }
}

/// Finds the latitude at which day length equals a target.
pub struct IsolineLocator<'a> {
    model: &'a DayLengthModel,
    config: SearchConfig,
}

impl<'a> IsolineLocator<'a> {
    pub fn new(model: &'a DayLengthModel, config: SearchConfig) -> Self {
        Self { model, config }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn model(&self) -> &'a DayLengthModel {
        self.model
    }

    /// Latitude where the day length on `date` equals `target` hours, or
    /// `None` when the domain cannot produce that day length.
    pub fn locate(&self, date: NaiveDate, target: f64) -> Result<Option<f64>> {
        debug_assert!(
            (0.0..=24.0).contains(&target),
            "target day length {target} outside [0, 24]"
        );

        let season = self.model.season(date)?;
        let mut low = self.config.min_lat;
        let mut high = self.config.max_lat;
        let mut history = MidpointHistory::new();
        let mut steps = 0u32;

        loop {
            steps += 1;
            let mid = (low + high) / 2.0;
            debug_assert!(self.config.contains(low) && self.config.contains(high));

            let at_low = self.model.compute(date, low)?;
            let at_mid = self.model.compute(date, mid)?;
            let at_high = self.model.compute(date, high)?;

            if season.overshoots(at_low, target) {
                debug!(%date, target, low, at_low, steps, "Target unreachable");
                return Ok(None);
            }

            history.push(mid);
            if history.converged(self.config.convergence_epsilon) {
                debug!(%date, target, latitude = mid, steps, "Converged by position");
                return Ok(Some(mid));
            }

            for (latitude, hours) in [(low, at_low), (mid, at_mid), (high, at_high)] {
                if (hours - target).abs() <= self.config.value_epsilon {
                    debug!(%date, target, latitude, steps, "Matched day length");
                    return Ok(Some(latitude));
                }
            }

            if season.brackets(at_low, at_mid, target) {
                high = mid;
            } else {
                // Upper half, whether it brackets the target or nothing does.
                low = mid;
            }
        }
    }
}
