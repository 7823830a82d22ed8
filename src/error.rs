use crate::session::Status;

/// Errors surfaced by the quiz library.
///
/// Only configuration changes can fail at runtime; every other intent is a
/// silent no-op when its preconditions do not hold.
#[derive(Debug, thiserror::Error)]
pub enum QuizError {
    #[error("cannot change settings while a session is {status:?}")]
    InvalidState { status: Status },

    #[error("unsupported time limit {0}s (expected one of 5, 10, 15, 30, 60)")]
    UnsupportedTimeLimit(u32),

    #[error("character dataset is empty")]
    EmptyDataset,

    #[error("character dataset contains duplicate symbol {0:?}")]
    DuplicateSymbol(String),

    #[error("dataset file {0} not found")]
    DatasetMissing(String),

    #[error("failed to parse character dataset")]
    DatasetFormat(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, QuizError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_state_message_names_status() {
        let err = QuizError::InvalidState {
            status: Status::Cooldown,
        };
        assert_eq!(
            err.to_string(),
            "cannot change settings while a session is Cooldown"
        );
    }

    #[test]
    fn unsupported_time_limit_message() {
        let err = QuizError::UnsupportedTimeLimit(7);
        assert!(err.to_string().contains("7s"));
    }
}
