pub mod app;
pub mod cursor;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod state;
pub mod stats;
pub mod storage;
pub mod ui;
pub mod units;

pub use app::router;
pub use state::AppState;
pub use storage::{load_store, resolve_data_path};
