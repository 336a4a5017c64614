//! Domain error types.

/// Top-level error type for voltrader.
#[derive(Debug, thiserror::Error)]
pub enum VoltraderError {
    #[error("validation error: {reason}")]
    Validation { reason: String },

    #[error("arithmetic error: {reason}")]
    Arithmetic { reason: String },

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

impl VoltraderError {
    pub fn validation(reason: impl Into<String>) -> Self {
        VoltraderError::Validation {
            reason: reason.into(),
        }
    }

    pub fn arithmetic(reason: impl Into<String>) -> Self {
        VoltraderError::Arithmetic {
            reason: reason.into(),
        }
    }
}

impl From<&VoltraderError> for std::process::ExitCode {
    fn from(err: &VoltraderError) -> Self {
        let code: u8 = match err {
            VoltraderError::Io(_) => 1,
            VoltraderError::ConfigParse { .. }
            | VoltraderError::ConfigMissing { .. }
            | VoltraderError::ConfigInvalid { .. } => 2,
            VoltraderError::Validation { .. } => 3,
            VoltraderError::Arithmetic { .. } => 4,
            VoltraderError::Data { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
