//! Domain error types.

/// Top-level error type for niftysma.
#[derive(Debug, thiserror::Error)]
pub enum NiftySmaError {
    #[error("data source error for {path}: {reason}")]
    DataSource { path: String, reason: String },

    #[error("missing required column {column} in {path}")]
    MissingColumn { path: String, column: String },

    #[error("bad row at line {line}: {reason}")]
    BadRow { line: u64, reason: String },

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

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&NiftySmaError> for std::process::ExitCode {
    fn from(err: &NiftySmaError) -> Self {
        let code: u8 = match err {
            NiftySmaError::Io(_) => 1,
            NiftySmaError::ConfigParse { .. }
            | NiftySmaError::ConfigMissing { .. }
            | NiftySmaError::ConfigInvalid { .. } => 2,
            NiftySmaError::DataSource { .. } | NiftySmaError::MissingColumn { .. } => 3,
            NiftySmaError::BadRow { .. } => 4,
        };
        std::process::ExitCode::from(code)
    }
}
