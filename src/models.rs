use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Aggregate for one calendar day: total volume and number of log events.
///
/// Stored under the `YYYY-MM-DD` key as `{ "drank": n, "count": n }`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct DayTotals {
    pub drank: u64,
    pub count: u64,
}

/// A day's totals together with the date they belong to.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DailyRecord {
    pub date: NaiveDate,
    pub drank_ml: u64,
    pub count: u64,
}

impl DailyRecord {
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            drank_ml: 0,
            count: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VolumeUnit {
    #[serde(rename = "ml")]
    Milliliters,
    #[serde(rename = "oz")]
    FluidOunces,
}

/// The user's configured daily target. One active template at a time,
/// stored under the `@selectedTemplate` key. `value` is in milliliters;
/// `unit` only controls display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GoalTemplate {
    pub value: f64,
    pub unit: VolumeUnit,
}

/// One scheduled reminder: a time of day plus the weekdays it repeats on.
/// Day codes are single letters `U M T W R F S` for Sunday through Saturday.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Reminder {
    pub date: String,
    pub days: Vec<String>,
}

/// One scheduled alarm entry under the `@alarms` key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Alarm {
    pub date: String,
    pub volume: String,
}

/// The amount stays a raw JSON value so absent, non-numeric, and fractional
/// inputs all reach the handler's validation instead of dying in the
/// extractor with a different status.
#[derive(Debug, Deserialize)]
pub struct DrinkRequest {
    #[serde(default)]
    pub amount_ml: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub struct GoalRequest {
    pub value: f64,
    pub unit: VolumeUnit,
}

#[derive(Debug, Deserialize)]
pub struct JumpRequest {
    pub date: NaiveDate,
}

/// What the tracking view shows for the cursor's date.
#[derive(Debug, Serialize)]
pub struct DayView {
    pub date: NaiveDate,
    pub label: String,
    pub drank_ml: u64,
    pub count: u64,
    pub goal: Option<GoalView>,
}

#[derive(Debug, Serialize)]
pub struct GoalView {
    pub target_ml: f64,
    pub display_value: f64,
    pub unit: VolumeUnit,
}

/// Derived statistics, recomputed from the full record set on each request.
/// `None` means "not enough data" for that field.
#[derive(Debug, Serialize, PartialEq)]
pub struct StatisticsSummary {
    pub weekly_average_ml: Option<f64>,
    pub monthly_average_ml: Option<f64>,
    pub completion_rate_percent: Option<f64>,
    pub drink_frequency_per_day: Option<f64>,
    pub peak_volume_day: Option<PeakDay>,
    pub peak_frequency_day: Option<PeakDay>,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct PeakDay {
    pub date: NaiveDate,
    pub value: u64,
}
