//! Domain error types.

/// Top-level error type for tradejournal.
#[derive(Debug, thiserror::Error)]
pub enum JournalError {
    #[error("storage error: {reason}")]
    Storage { reason: String },

    #[error("storage query error: {reason}")]
    StorageQuery { reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("invalid trade {trade_id}: {reason}")]
    InvalidTrade { trade_id: String, reason: String },

    #[error("invalid note {note_id}: {reason}")]
    InvalidNote { note_id: String, reason: String },

    #[error("invalid trade plan {plan_id}: {reason}")]
    InvalidPlan { plan_id: String, reason: String },

    #[error("no {kind} with id {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("trade {trade_id} has an unparseable timestamp {value:?}")]
    InvalidTimestamp { trade_id: String, value: String },

    #[error("refusing to analyze {count} trades (limit is {limit})")]
    TooManyTrades { count: usize, limit: usize },

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl JournalError {
    pub(crate) fn invalid_trade(trade_id: &str, reason: impl Into<String>) -> Self {
        JournalError::InvalidTrade {
            trade_id: trade_id.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_note(note_id: &str, reason: impl Into<String>) -> Self {
        JournalError::InvalidNote {
            note_id: note_id.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_plan(plan_id: &str, reason: impl Into<String>) -> Self {
        JournalError::InvalidPlan {
            plan_id: plan_id.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<&JournalError> for std::process::ExitCode {
    fn from(err: &JournalError) -> Self {
        let code: u8 = match err {
            JournalError::Io(_) => 1,
            JournalError::ConfigParse { .. }
            | JournalError::ConfigMissing { .. }
            | JournalError::ConfigInvalid { .. } => 2,
            JournalError::Storage { .. }
            | JournalError::StorageQuery { .. }
            | JournalError::Csv(_) => 3,
            JournalError::InvalidTrade { .. }
            | JournalError::InvalidNote { .. }
            | JournalError::InvalidPlan { .. }
            | JournalError::NotFound { .. }
            | JournalError::InvalidTimestamp { .. } => 4,
            JournalError::TooManyTrades { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
