//! Notification sink for recoverable failures and informational events.
//!
//! Rendering is someone else's job; the turn layer only hands over a
//! [`Notice`] and moves on. A repeated notice with the same `id` is meant to
//! replace the earlier one rather than stack.

use std::time::Duration;

use tracing::{error, info, warn};

use crate::errors::ErrorCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    pub id: ErrorCode,
    pub timeout: Duration,
}

impl Notice {
    pub fn error(id: ErrorCode, message: impl Into<String>, timeout: Duration) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
            id,
            timeout,
        }
    }

    pub fn info(id: ErrorCode, message: impl Into<String>, timeout: Duration) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
            id,
            timeout,
        }
    }
}

/// Receives notices. Implementations must not block.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Default sink: every notice becomes a log line.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        let id = notice.id.as_str();
        match notice.level {
            NoticeLevel::Error => error!(notice.id = id, "{}", notice.message),
            NoticeLevel::Warning => warn!(notice.id = id, "{}", notice.message),
            NoticeLevel::Info | NoticeLevel::Success => {
                info!(notice.id = id, "{}", notice.message)
            }
        }
    }
}
