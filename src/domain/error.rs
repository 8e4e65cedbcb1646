//! Domain error types.
//!
//! Ticker extraction itself never fails; these errors belong to the
//! record-keeping, configuration and collaborator plumbing around it.

/// Top-level error type for tickertrack.
#[derive(Debug, thiserror::Error)]
pub enum TickerTrackError {
    #[error("database error: {reason}")]
    Database { reason: String },

    #[error("database query error: {reason}")]
    DatabaseQuery { reason: String },

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

    #[error("no quote available for {ticker}")]
    QuoteNotFound { ticker: String },

    #[error("position {id} not found")]
    PositionNotFound { id: i64 },

    #[error("invalid strategy '{value}' (expected short, long or investment)")]
    InvalidStrategy { value: String },

    #[error("ocr failed: {reason}")]
    Ocr { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&TickerTrackError> for std::process::ExitCode {
    fn from(err: &TickerTrackError) -> Self {
        let code: u8 = match err {
            TickerTrackError::Io(_) => 1,
            TickerTrackError::ConfigParse { .. }
            | TickerTrackError::ConfigMissing { .. }
            | TickerTrackError::ConfigInvalid { .. } => 2,
            TickerTrackError::Database { .. } | TickerTrackError::DatabaseQuery { .. } => 3,
            TickerTrackError::QuoteNotFound { .. } => 4,
            TickerTrackError::PositionNotFound { .. }
            | TickerTrackError::InvalidStrategy { .. } => 5,
            TickerTrackError::Ocr { .. } => 6,
        };
        std::process::ExitCode::from(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::process::ExitCode;

    #[test]
    fn config_errors_share_exit_code() {
        let missing = TickerTrackError::ConfigMissing {
            section: "sqlite".into(),
            key: "path".into(),
        };
        let invalid = TickerTrackError::ConfigInvalid {
            section: "extraction".into(),
            key: "density_threshold".into(),
            reason: "must be non-negative".into(),
        };
        assert_eq!(ExitCode::from(&missing), ExitCode::from(2));
        assert_eq!(ExitCode::from(&invalid), ExitCode::from(2));
    }

    #[test]
    fn quote_not_found_message_names_ticker() {
        let err = TickerTrackError::QuoteNotFound {
            ticker: "ZZZZ".into(),
        };
        assert_eq!(err.to_string(), "no quote available for ZZZZ");
        assert_eq!(ExitCode::from(&err), ExitCode::from(4));
    }

    #[test]
    fn io_error_converts() {
        let err: TickerTrackError =
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(err, TickerTrackError::Io(_)));
        assert_eq!(ExitCode::from(&err), ExitCode::from(1));
    }
}
