//! The currently viewed date in the tracking view, bounded above by today.
//!
//! Transient view-model state: never persisted, rebuilt pointing at today
//! each time the view is opened. Every operation takes `today` explicitly so
//! the bound and the label stay correct across a midnight rollover while the
//! view is open.

use chrono::{Duration, NaiveDate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateCursor {
    selected: NaiveDate,
}

impl DateCursor {
    pub fn new(today: NaiveDate) -> Self {
        Self { selected: today }
    }

    pub fn selected(&self) -> NaiveDate {
        self.selected
    }

    /// Stepping back is always legal.
    pub fn move_backward(&mut self) {
        self.selected -= Duration::days(1);
    }

    /// Stepping forward past today is silently ignored, not an error:
    /// future days cannot be viewed. Returns whether the cursor moved.
    pub fn move_forward(&mut self, today: NaiveDate) -> bool {
        if self.selected >= today {
            return false;
        }
        self.selected += Duration::days(1);
        true
    }

    /// Explicit date-picker selection; future dates clamp to today.
    pub fn jump_to(&mut self, date: NaiveDate, today: NaiveDate) {
        self.selected = date.min(today);
    }

    /// View re-open: back to today.
    pub fn reset(&mut self, today: NaiveDate) {
        self.selected = today;
    }

    /// Pure function of the selected date and the wall clock, recomputed on
    /// every read rather than cached.
    pub fn label(&self, today: NaiveDate) -> String {
        if self.selected == today {
            "Today".to_string()
        } else if self.selected == today - Duration::days(1) {
            "Yesterday".to_string()
        } else {
            self.selected.format("%B %-d, %Y").to_string()
        }
    }
}

/// Gesture debounce for swipe-driven cursor moves. A new transition is
/// rejected while the previous one is still settling, so a fast double-swipe
/// cannot move the cursor twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SwipeGate {
    #[default]
    Idle,
    Transitioning,
}

impl SwipeGate {
    /// Returns true and enters `Transitioning` if the gate was idle.
    pub fn try_begin(&mut self) -> bool {
        match self {
            SwipeGate::Idle => {
                *self = SwipeGate::Transitioning;
                true
            }
            SwipeGate::Transitioning => false,
        }
    }

    /// Called when the animation/settle sequence finishes.
    pub fn settle(&mut self) {
        *self = SwipeGate::Idle;
    }
}
