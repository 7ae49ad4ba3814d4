use std::fmt;

use thiserror::Error;

use crate::errors::ErrorCode;

/// The remote operations the turn layer consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineOp {
    InitStore,
    StartGame,
    StopGame,
    GameState,
    RollDice,
    ChooseColumns,
    EndRun,
    CheckContinue,
    ChooseColumn,
    GameStatistics,
    Name,
}

impl EngineOp {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InitStore => "init_store",
            Self::StartGame => "start_game",
            Self::StopGame => "stop_game",
            Self::GameState => "get_game_state",
            Self::RollDice => "roll_dice",
            Self::ChooseColumns => "choose_columns",
            Self::EndRun => "end_run",
            Self::CheckContinue => "check_continue",
            Self::ChooseColumn => "choose_column",
            Self::GameStatistics => "get_game_statistics",
            Self::Name => "get_name",
        }
    }

    /// Whether the call changes game state on the engine.
    pub const fn is_mutating(&self) -> bool {
        matches!(self, Self::RollDice | Self::ChooseColumns | Self::EndRun)
    }
}

impl fmt::Display for EngineOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum EngineErrorKind {
    /// The engine refused the request.
    Rejected,
    /// The engine could not be reached.
    Unavailable,
    /// The response could not be understood.
    Malformed,
}

/// A failed remote call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{op} failed ({kind:?}): {detail}")]
pub struct EngineError {
    pub op: EngineOp,
    pub kind: EngineErrorKind,
    pub detail: String,
}

impl EngineError {
    pub fn rejected(op: EngineOp, detail: impl Into<String>) -> Self {
        Self {
            op,
            kind: EngineErrorKind::Rejected,
            detail: detail.into(),
        }
    }

    pub fn unavailable(op: EngineOp, detail: impl Into<String>) -> Self {
        Self {
            op,
            kind: EngineErrorKind::Unavailable,
            detail: detail.into(),
        }
    }

    pub fn malformed(op: EngineOp, detail: impl Into<String>) -> Self {
        Self {
            op,
            kind: EngineErrorKind::Malformed,
            detail: detail.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error("Configuration error: {detail}")]
    Config { detail: String },
    #[error("Decision error: {detail}")]
    Decision { detail: String },
    #[error("A mutating call is already in flight ({pending})")]
    Busy { pending: EngineOp },
    #[error("No participant is active")]
    NoActiveTurn,
}

impl AppError {
    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }

    pub fn decision(detail: impl Into<String>) -> Self {
        Self::Decision {
            detail: detail.into(),
        }
    }

    /// Notification identifier for this error, when it has a natural one.
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            AppError::Engine(err) => Some(code_for_op(err.op)),
            AppError::Decision { .. } => Some(ErrorCode::AiError),
            AppError::Config { .. } | AppError::Busy { .. } | AppError::NoActiveTurn => None,
        }
    }
}

/// The notification identifier used when `op` fails.
pub const fn code_for_op(op: EngineOp) -> ErrorCode {
    match op {
        EngineOp::InitStore => ErrorCode::StoreError,
        EngineOp::StartGame => ErrorCode::StartError,
        EngineOp::StopGame => ErrorCode::StopError,
        EngineOp::GameState => ErrorCode::GameStateError,
        EngineOp::RollDice => ErrorCode::RollDiceError,
        EngineOp::ChooseColumns => ErrorCode::ChooseColumnsError,
        EngineOp::EndRun => ErrorCode::EndRunError,
        EngineOp::CheckContinue | EngineOp::ChooseColumn => ErrorCode::AiError,
        EngineOp::GameStatistics => ErrorCode::StatsError,
        EngineOp::Name => ErrorCode::NameError,
    }
}
