//! Error types shared across the crate

use std::time::Duration;

use thiserror::Error;

/// Rejected login input. Nothing is mutated and no event is logged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoginError {
    #[error("player name is empty")]
    MissingName,
    #[error("student id is empty")]
    MissingStudentId,
    #[error("a player is already logged in")]
    AlreadyStarted,
}

impl LoginError {
    /// Prompt shown to the player when the login form is incomplete
    pub fn prompt(&self) -> &'static str {
        match self {
            LoginError::MissingName | LoginError::MissingStudentId => {
                "학번과 이름을 모두 입력해주세요."
            }
            LoginError::AlreadyStarted => "이미 게임이 시작되었습니다.",
        }
    }
}

/// Failure to deliver one event to the logging endpoint.
///
/// Always recoverable: the dispatcher logs it and moves to the next event.
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("network error: {0}")]
    Network(String),
    #[error("endpoint returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("malformed endpoint reply: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("endpoint rejected event: {0}")]
    Rejected(String),
}

/// Bad tuning or settings document
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(&'static str),
}

/// Endpoint-side failure while recording an event
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("timed out after {0:?} waiting for the event id lock")]
    LockTimeout(Duration),
    #[error("failed to append row: {0}")]
    Append(String),
}
