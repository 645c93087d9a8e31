//! Read/write access to daily records, the goal template, and the reminder
//! and alarm lists. Sole writer of persisted state; the cursor and the
//! statistics aggregator only ever read through here.

use crate::errors::AppError;
use crate::models::{Alarm, DailyRecord, DayTotals, GoalTemplate, Reminder, VolumeUnit};
use crate::storage::KvStore;
use chrono::NaiveDate;
use tracing::warn;

pub const GOAL_KEY: &str = "@selectedTemplate";
pub const REMINDERS_KEY: &str = "@reminders";
pub const ALARMS_KEY: &str = "@alarms";

const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// `None` if no goal was ever configured. A corrupt stored value is logged
/// and reported as unset instead of failing the caller.
pub fn get_goal(store: &KvStore) -> Option<GoalTemplate> {
    let raw = store.get(GOAL_KEY)?;
    match serde_json::from_str(raw) {
        Ok(goal) => Some(goal),
        Err(err) => {
            warn!("corrupt goal template, treating as unset: {err}");
            None
        }
    }
}

/// Overwrites the single active goal template. Idempotent.
pub fn set_goal(store: &mut KvStore, value: f64, unit: VolumeUnit) -> Result<(), AppError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(AppError::bad_request("goal value must be positive"));
    }
    let goal = GoalTemplate { value, unit };
    let raw = serde_json::to_string(&goal).map_err(AppError::internal)?;
    store.set(GOAL_KEY, raw);
    Ok(())
}

/// Absent means no drinks were logged that day; callers always see the zero
/// record in that case. A corrupt value is logged and also reads as zero.
pub fn get_daily_record(store: &KvStore, date: NaiveDate) -> DailyRecord {
    let key = date_key(date);
    let Some(raw) = store.get(&key) else {
        return DailyRecord::empty(date);
    };
    match serde_json::from_str::<DayTotals>(raw) {
        Ok(totals) => DailyRecord {
            date,
            drank_ml: totals.drank,
            count: totals.count,
        },
        Err(err) => {
            warn!("corrupt daily record for {key}, treating as empty: {err}");
            DailyRecord::empty(date)
        }
    }
}

/// Adds one drink of `amount_ml` to the record for `date`, creating it on
/// first use. Read-modify-write against a store with no atomic increment:
/// safe only under the single-writer usage model (one device, foreground
/// only). The caller must persist the store afterwards and discard the
/// in-memory increment if that persist fails.
pub fn append_drink(
    store: &mut KvStore,
    date: NaiveDate,
    amount_ml: u64,
) -> Result<DailyRecord, AppError> {
    if amount_ml == 0 {
        return Err(AppError::bad_request(
            "amount must be a positive integer number of milliliters",
        ));
    }

    let existing = get_daily_record(store, date);
    let updated = DayTotals {
        drank: existing.drank_ml.saturating_add(amount_ml),
        count: existing.count.saturating_add(1),
    };
    let raw = serde_json::to_string(&updated).map_err(AppError::internal)?;
    store.set(date_key(date), raw);

    Ok(DailyRecord {
        date,
        drank_ml: updated.drank,
        count: updated.count,
    })
}

/// Scans the full key space for calendar-date keys and decodes each one.
/// Malformed entries are logged and skipped so one corrupt day cannot sink
/// the whole statistics computation. Store enumeration order; callers sort
/// when order matters.
pub fn list_daily_records(store: &KvStore) -> Vec<DailyRecord> {
    let mut records = Vec::new();
    for key in store.all_keys() {
        let Some(date) = parse_date_key(key) else {
            continue;
        };
        let raw = store.get(key).unwrap_or_default();
        match serde_json::from_str::<DayTotals>(raw) {
            Ok(totals) => records.push(DailyRecord {
                date,
                drank_ml: totals.drank,
                count: totals.count,
            }),
            Err(err) => warn!("skipping corrupt daily record {key}: {err}"),
        }
    }
    records
}

pub fn get_reminders(store: &KvStore) -> Vec<Reminder> {
    decode_list(store, REMINDERS_KEY)
}

pub fn set_reminders(store: &mut KvStore, reminders: &[Reminder]) -> Result<(), AppError> {
    let raw = serde_json::to_string(reminders).map_err(AppError::internal)?;
    store.set(REMINDERS_KEY, raw);
    Ok(())
}

pub fn get_alarms(store: &KvStore) -> Vec<Alarm> {
    decode_list(store, ALARMS_KEY)
}

pub fn add_alarm(store: &mut KvStore, alarm: Alarm) -> Result<(), AppError> {
    let mut alarms = get_alarms(store);
    alarms.push(alarm);
    let raw = serde_json::to_string(&alarms).map_err(AppError::internal)?;
    store.set(ALARMS_KEY, raw);
    Ok(())
}

fn decode_list<T: serde::de::DeserializeOwned>(store: &KvStore, key: &str) -> Vec<T> {
    let Some(raw) = store.get(key) else {
        return Vec::new();
    };
    match serde_json::from_str(raw) {
        Ok(list) => list,
        Err(err) => {
            warn!("corrupt list under {key}, treating as empty: {err}");
            Vec::new()
        }
    }
}

pub fn date_key(date: NaiveDate) -> String {
    date.format(DATE_KEY_FORMAT).to_string()
}

/// Accepts exactly `YYYY-MM-DD`; everything else (`@`-prefixed keys, padded
/// variants, non-dates like `2026-13-40`) is not a daily record key.
fn parse_date_key(key: &str) -> Option<NaiveDate> {
    let bytes = key.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return None;
    }
    let digits_ok = bytes
        .iter()
        .enumerate()
        .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
    if !digits_ok {
        return None;
    }
    NaiveDate::parse_from_str(key, DATE_KEY_FORMAT).ok()
}
