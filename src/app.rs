use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/day", get(handlers::get_day))
        .route("/api/today", get(handlers::get_today))
        .route("/api/drink", post(handlers::log_drink))
        .route("/api/goal", get(handlers::get_goal).post(handlers::set_goal))
        .route("/api/cursor/previous", post(handlers::cursor_previous))
        .route("/api/cursor/next", post(handlers::cursor_next))
        .route("/api/cursor/jump", post(handlers::cursor_jump))
        .route("/api/cursor/settle", post(handlers::cursor_settle))
        .route("/api/cursor/reset", post(handlers::cursor_reset))
        .route("/api/stats", get(handlers::get_stats))
        .route(
            "/api/reminders",
            get(handlers::get_reminders).put(handlers::put_reminders),
        )
        .route("/api/alarms", get(handlers::get_alarms).post(handlers::add_alarm))
        .with_state(state)
}
