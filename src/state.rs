use crate::cursor::{DateCursor, SwipeGate};
use crate::storage::KvStore;
use chrono::NaiveDate;
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

/// Shared app state. The store is the persisted side; the cursor and swipe
/// gate are the transient view-model for the single-user tracking view.
#[derive(Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    pub store: Arc<Mutex<KvStore>>,
    pub view: Arc<Mutex<TrackingView>>,
}

pub struct TrackingView {
    pub cursor: DateCursor,
    pub gate: SwipeGate,
}

impl AppState {
    pub fn new(data_path: PathBuf, store: KvStore, today: NaiveDate) -> Self {
        Self {
            data_path,
            store: Arc::new(Mutex::new(store)),
            view: Arc::new(Mutex::new(TrackingView {
                cursor: DateCursor::new(today),
                gate: SwipeGate::default(),
            })),
        }
    }
}
