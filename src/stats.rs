//! Rolling statistics over the full set of daily records.
//!
//! Everything here is recomputed from scratch per request; the dataset is a
//! single user's local history, small enough that incremental maintenance
//! would buy nothing.

use crate::models::{DailyRecord, PeakDay, StatisticsSummary};
use crate::units::round2;
use chrono::{Duration, Months, NaiveDate};

/// Averages divide by the fixed window length once the window holds enough
/// points, matching the product behavior rather than averaging over however
/// many records happen to exist.
const WEEKLY_WINDOW_DAYS: usize = 7;
const MONTHLY_WINDOW_DAYS: usize = 30;

/// Completion rate is measured against this fixed per-day target, not the
/// user's configured goal template. Known product inconsistency, preserved.
pub const REFERENCE_DAILY_TARGET_ML: u64 = 2000;

/// Pure function of the record list and the reference date. Records are
/// taken in the order given; peak-day ties go to the first occurrence.
pub fn compute_summary(today: NaiveDate, records: &[DailyRecord]) -> StatisticsSummary {
    let week_ago = today - Duration::days(7);
    // Month-field subtraction with calendar clamping at month ends.
    let month_ago = today
        .checked_sub_months(Months::new(1))
        .unwrap_or(week_ago);

    let weekly: Vec<&DailyRecord> = records.iter().filter(|r| r.date >= week_ago).collect();
    let monthly: Vec<&DailyRecord> = records.iter().filter(|r| r.date >= month_ago).collect();

    let weekly_average_ml = window_average(&weekly, WEEKLY_WINDOW_DAYS);
    let monthly_average_ml = window_average(&monthly, MONTHLY_WINDOW_DAYS);

    let (completion_rate_percent, drink_frequency_per_day) = if records.is_empty() {
        (None, None)
    } else {
        let total_drank: u64 = records.iter().map(|r| r.drank_ml).sum();
        let total_drinks: u64 = records.iter().map(|r| r.count).sum();
        let days = records.len() as f64;
        let reference = days * REFERENCE_DAILY_TARGET_ML as f64;
        (
            Some(round2(total_drank as f64 / reference * 100.0)),
            Some(round2(total_drinks as f64 / days)),
        )
    };

    StatisticsSummary {
        weekly_average_ml,
        monthly_average_ml,
        completion_rate_percent,
        drink_frequency_per_day,
        peak_volume_day: peak_by(records, |r| r.drank_ml),
        peak_frequency_day: peak_by(records, |r| r.count),
    }
}

fn window_average(window: &[&DailyRecord], window_days: usize) -> Option<f64> {
    if window.len() < window_days {
        return None;
    }
    let total: u64 = window.iter().map(|r| r.drank_ml).sum();
    Some(round2(total as f64 / window_days as f64))
}

fn peak_by(records: &[DailyRecord], value: impl Fn(&DailyRecord) -> u64) -> Option<PeakDay> {
    let mut best: Option<&DailyRecord> = None;
    for record in records {
        match best {
            // Strict comparison: the first of equal maxima wins.
            Some(current) if value(record) <= value(current) => {}
            _ => best = Some(record),
        }
    }
    best.map(|r| PeakDay {
        date: r.date,
        value: value(r),
    })
}
