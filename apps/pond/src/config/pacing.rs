//! Pacing of autonomous turns and roll presentation.
//!
//! Delays are loaded from the environment so a host can slow the
//! autonomous players down for spectators or remove pacing entirely:
//!
//! - `POND_THINK_DELAY_MS`: before each remote decision query (default 500)
//! - `POND_ACT_DELAY_MS`: between a decision and the call that enacts it (default 750)
//! - `POND_ROLL_DELAY_MS`: between clearing the old roll and rolling anew (default 100)
//! - `POND_NOTICE_TIMEOUT_MS`: how long a notification stays up (default 3000)

use std::env;
use std::time::Duration;

use crate::error::AppError;

pub const THINK_DELAY_VAR: &str = "POND_THINK_DELAY_MS";
pub const ACT_DELAY_VAR: &str = "POND_ACT_DELAY_MS";
pub const ROLL_DELAY_VAR: &str = "POND_ROLL_DELAY_MS";
pub const NOTICE_TIMEOUT_VAR: &str = "POND_NOTICE_TIMEOUT_MS";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacingConfig {
    pub think_delay: Duration,
    pub act_delay: Duration,
    pub roll_delay: Duration,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            think_delay: Duration::from_millis(500),
            act_delay: Duration::from_millis(750),
            roll_delay: Duration::from_millis(100),
        }
    }
}

impl PacingConfig {
    /// No pacing at all; steps still run as scheduled tasks.
    pub const fn immediate() -> Self {
        Self {
            think_delay: Duration::ZERO,
            act_delay: Duration::ZERO,
            roll_delay: Duration::ZERO,
        }
    }

    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from an arbitrary variable source; unset variables keep defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Ok(Self {
            think_delay: millis_var(&lookup, THINK_DELAY_VAR)?.unwrap_or(defaults.think_delay),
            act_delay: millis_var(&lookup, ACT_DELAY_VAR)?.unwrap_or(defaults.act_delay),
            roll_delay: millis_var(&lookup, ROLL_DELAY_VAR)?.unwrap_or(defaults.roll_delay),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationConfig {
    pub timeout: Duration,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(3000),
        }
    }
}

impl NotificationConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            timeout: millis_var(&lookup, NOTICE_TIMEOUT_VAR)?
                .unwrap_or(Self::default().timeout),
        })
    }
}

/// Parse an optional millisecond count; present-but-malformed is an error.
fn millis_var<F>(lookup: &F, name: &str) -> Result<Option<Duration>, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(name) else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<u64>()
        .map(|ms| Some(Duration::from_millis(ms)))
        .map_err(|_| {
            AppError::config(format!(
                "'{name}' must be a whole number of milliseconds, got '{trimmed}'"
            ))
        })
}
