//! UI actions. Terminal events and background tasks both become actions;
//! the app loop is the only place that applies them.

use tripboard_core::{FilterType, Key};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Error,
}

/// A toast notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
}

impl Notification {
    pub fn info(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Info,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Error,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // ── Lifecycle ──────────────────────────────────────────────────
    Quit,
    Tick,
    Render,
    Resize(u16, u16),

    // ── Board ─────────────────────────────────────────────────────
    /// A key for the presenters.
    Board(Key),
    FocusNext,
    FocusPrev,
    SetFilter(FilterType),
    NewPoint,

    // ── Overlays ──────────────────────────────────────────────────
    ToggleHelp,

    // ── Data ──────────────────────────────────────────────────────
    /// Initial load finished; carries the failure message, if any.
    Loaded(Option<String>),
}
