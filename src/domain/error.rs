//! Domain error types.
//!
//! Errors surface as user-facing messages, not structured codes. Each error
//! is local to the operation that raised it; nothing is retried.

/// Top-level error type for fundfolio.
#[derive(Debug, thiserror::Error)]
pub enum FundfolioError {
    #[error("User with this email already exists")]
    DuplicateEmail,

    /// Deliberately does not say which field was wrong.
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("No account found with this email address")]
    UnknownEmail,

    #[error("User not found")]
    UserNotFound,

    #[error("Portfolio not found")]
    PortfolioNotFound,

    #[error("Fund not found")]
    FundNotFound,

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

    #[error("data error: {reason}")]
    Data { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&FundfolioError> for std::process::ExitCode {
    fn from(err: &FundfolioError) -> Self {
        let code: u8 = match err {
            FundfolioError::Io(_) => 1,
            FundfolioError::ConfigParse { .. }
            | FundfolioError::ConfigMissing { .. }
            | FundfolioError::ConfigInvalid { .. } => 2,
            FundfolioError::DuplicateEmail
            | FundfolioError::InvalidCredentials
            | FundfolioError::UnknownEmail
            | FundfolioError::UserNotFound => 3,
            FundfolioError::PortfolioNotFound | FundfolioError::FundNotFound => 4,
            FundfolioError::Data { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
