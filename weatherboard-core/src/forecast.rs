//! Reductions of the raw forecast series into bounded display views.
//!
//! Both reductions follow provider order; nothing is sorted.

use chrono::{NaiveDate, Timelike};
use std::collections::HashSet;

use crate::model::{DailySummary, ForecastSample, HourlySummary};

pub const MAX_DAILY: usize = 5;
pub const MAX_HOURLY: usize = 5;

/// First sample of each distinct calendar date, in first-seen order, capped
/// at [`MAX_DAILY`] dates.
pub fn daily_summaries(samples: &[ForecastSample]) -> Vec<DailySummary> {
    let mut seen: HashSet<NaiveDate> = HashSet::new();
    let mut days = Vec::with_capacity(MAX_DAILY);

    for sample in samples {
        if days.len() == MAX_DAILY {
            break;
        }
        let date = sample.timestamp.date();
        if !seen.insert(date) {
            continue;
        }
        days.push(DailySummary {
            date,
            temperature_c: sample.temperature_c,
            description: sample.description.clone(),
            icon_id: sample.icon_id.clone(),
        });
    }

    days
}

/// Samples that land exactly on the hour, capped at [`MAX_HOURLY`].
/// An empty result is valid when the provider never lands on minute zero.
pub fn hourly_summaries(samples: &[ForecastSample]) -> Vec<HourlySummary> {
    samples
        .iter()
        .filter(|s| s.timestamp.minute() == 0)
        .take(MAX_HOURLY)
        .cloned()
        .collect()
}
