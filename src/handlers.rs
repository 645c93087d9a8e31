use crate::errors::AppError;
use crate::models::{
    Alarm, DayView, DrinkRequest, GoalRequest, GoalTemplate, GoalView, JumpRequest, Reminder,
    StatisticsSummary, VolumeUnit,
};
use crate::repository;
use crate::state::AppState;
use crate::stats::compute_summary;
use crate::storage::{persist_store, KvStore};
use crate::ui::render_index;
use crate::units::ml_to_oz;
use axum::{extract::State, response::Html, Json};
use chrono::{Local, NaiveDate};
use tracing::info;

/// Opening the tracking view resets the cursor to today.
pub async fn index(State(state): State<AppState>) -> Html<String> {
    let today = today();
    let mut view = state.view.lock().await;
    view.cursor.reset(today);
    view.gate.settle();

    let store = state.store.lock().await;
    let day = day_view(&store, view.cursor.selected(), &view.cursor.label(today));
    Html(render_index(&day))
}

/// The daily record and goal at the cursor's date, without mutating anything.
pub async fn get_day(State(state): State<AppState>) -> Result<Json<DayView>, AppError> {
    let today = today();
    let view = state.view.lock().await;
    let store = state.store.lock().await;
    Ok(Json(day_view(
        &store,
        view.cursor.selected(),
        &view.cursor.label(today),
    )))
}

/// Today's record regardless of where the cursor points.
pub async fn get_today(State(state): State<AppState>) -> Result<Json<DayView>, AppError> {
    let today = today();
    let store = state.store.lock().await;
    Ok(Json(day_view(&store, today, "Today")))
}

/// Logs one drink against today. The amount must be a positive integer
/// number of milliliters; anything else is rejected before any mutation.
pub async fn log_drink(
    State(state): State<AppState>,
    Json(payload): Json<DrinkRequest>,
) -> Result<Json<DayView>, AppError> {
    let amount = parse_amount(payload.amount_ml.as_ref())?;

    let today = today();
    let mut store = state.store.lock().await;
    let snapshot = store.clone();
    let record = repository::append_drink(&mut store, today, amount)?;
    persist_or_rollback(&state, &mut store, snapshot).await?;

    info!("logged {amount} ml for {today} (total {} ml)", record.drank_ml);
    Ok(Json(day_view(&store, today, "Today")))
}

pub async fn get_goal(State(state): State<AppState>) -> Result<Json<Option<GoalView>>, AppError> {
    let store = state.store.lock().await;
    Ok(Json(repository::get_goal(&store).map(goal_view)))
}

pub async fn set_goal(
    State(state): State<AppState>,
    Json(payload): Json<GoalRequest>,
) -> Result<Json<GoalView>, AppError> {
    let mut store = state.store.lock().await;
    let snapshot = store.clone();
    repository::set_goal(&mut store, payload.value, payload.unit)?;
    persist_or_rollback(&state, &mut store, snapshot).await?;

    Ok(Json(goal_view(GoalTemplate {
        value: payload.value,
        unit: payload.unit,
    })))
}

/// Swipe back one day. Ignored while a previous swipe is still settling.
pub async fn cursor_previous(State(state): State<AppState>) -> Result<Json<DayView>, AppError> {
    let today = today();
    let mut view = state.view.lock().await;
    if view.gate.try_begin() {
        view.cursor.move_backward();
    }

    let store = state.store.lock().await;
    Ok(Json(day_view(
        &store,
        view.cursor.selected(),
        &view.cursor.label(today),
    )))
}

/// Swipe forward one day. A no-op at today (future days cannot be viewed)
/// and ignored while a previous swipe is still settling.
pub async fn cursor_next(State(state): State<AppState>) -> Result<Json<DayView>, AppError> {
    let today = today();
    let mut view = state.view.lock().await;
    if view.gate.try_begin() && !view.cursor.move_forward(today) {
        // Nothing moved, so there is no animation to wait out.
        view.gate.settle();
    }

    let store = state.store.lock().await;
    Ok(Json(day_view(
        &store,
        view.cursor.selected(),
        &view.cursor.label(today),
    )))
}

/// Explicit date-picker selection; future dates clamp to today.
pub async fn cursor_jump(
    State(state): State<AppState>,
    Json(payload): Json<JumpRequest>,
) -> Result<Json<DayView>, AppError> {
    let today = today();
    let mut view = state.view.lock().await;
    view.cursor.jump_to(payload.date, today);

    let store = state.store.lock().await;
    Ok(Json(day_view(
        &store,
        view.cursor.selected(),
        &view.cursor.label(today),
    )))
}

/// The swipe animation finished; the next gesture may proceed.
pub async fn cursor_settle(State(state): State<AppState>) -> Result<Json<DayView>, AppError> {
    let today = today();
    let mut view = state.view.lock().await;
    view.gate.settle();

    let store = state.store.lock().await;
    Ok(Json(day_view(
        &store,
        view.cursor.selected(),
        &view.cursor.label(today),
    )))
}

pub async fn cursor_reset(State(state): State<AppState>) -> Result<Json<DayView>, AppError> {
    let today = today();
    let mut view = state.view.lock().await;
    view.cursor.reset(today);
    view.gate.settle();

    let store = state.store.lock().await;
    Ok(Json(day_view(
        &store,
        view.cursor.selected(),
        &view.cursor.label(today),
    )))
}

/// Full-history statistics, recomputed from every stored daily record.
pub async fn get_stats(State(state): State<AppState>) -> Result<Json<StatisticsSummary>, AppError> {
    let store = state.store.lock().await;
    let mut records = repository::list_daily_records(&store);
    // Stable scan order for peak-day tie-breaking.
    records.sort_by_key(|r| r.date);
    Ok(Json(compute_summary(today(), &records)))
}

pub async fn get_reminders(State(state): State<AppState>) -> Result<Json<Vec<Reminder>>, AppError> {
    let store = state.store.lock().await;
    Ok(Json(repository::get_reminders(&store)))
}

/// Replaces the whole reminder list, the way the scheduling screen saves it.
pub async fn put_reminders(
    State(state): State<AppState>,
    Json(reminders): Json<Vec<Reminder>>,
) -> Result<Json<Vec<Reminder>>, AppError> {
    let mut store = state.store.lock().await;
    let snapshot = store.clone();
    repository::set_reminders(&mut store, &reminders)?;
    persist_or_rollback(&state, &mut store, snapshot).await?;
    Ok(Json(reminders))
}

pub async fn get_alarms(State(state): State<AppState>) -> Result<Json<Vec<Alarm>>, AppError> {
    let store = state.store.lock().await;
    Ok(Json(repository::get_alarms(&store)))
}

pub async fn add_alarm(
    State(state): State<AppState>,
    Json(alarm): Json<Alarm>,
) -> Result<Json<Vec<Alarm>>, AppError> {
    let mut store = state.store.lock().await;
    let snapshot = store.clone();
    repository::add_alarm(&mut store, alarm)?;
    persist_or_rollback(&state, &mut store, snapshot).await?;
    Ok(Json(repository::get_alarms(&store)))
}

fn day_view(store: &KvStore, date: NaiveDate, label: &str) -> DayView {
    let record = repository::get_daily_record(store, date);
    // The goal is date-independent today but re-read on every transition.
    let goal = repository::get_goal(store).map(goal_view);
    DayView {
        date,
        label: label.to_string(),
        drank_ml: record.drank_ml,
        count: record.count,
        goal,
    }
}

fn goal_view(goal: GoalTemplate) -> GoalView {
    let display_value = match goal.unit {
        VolumeUnit::Milliliters => goal.value,
        VolumeUnit::FluidOunces => ml_to_oz(goal.value),
    };
    GoalView {
        target_ml: goal.value,
        display_value,
        unit: goal.unit,
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Accepts only a positive integer number of milliliters. Absent,
/// non-numeric, fractional, zero, and negative inputs all get the same
/// validation rejection, and nothing is mutated for any of them.
fn parse_amount(value: Option<&serde_json::Value>) -> Result<u64, AppError> {
    value
        .and_then(serde_json::Value::as_u64)
        .filter(|a| *a > 0)
        .ok_or_else(|| {
            AppError::bad_request("amount must be a positive integer number of milliliters")
        })
}

/// A failed file write undoes the in-memory mutation, so the session never
/// keeps serving a value that disk never saw.
async fn persist_or_rollback(
    state: &AppState,
    store: &mut KvStore,
    snapshot: KvStore,
) -> Result<(), AppError> {
    if let Err(err) = persist_store(&state.data_path, store).await {
        *store = snapshot;
        return Err(err);
    }
    Ok(())
}
