use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{program} not found on PATH")]
    CommandNotFound { program: String },

    #[error("{program} failed ({status}): {stderr}")]
    CommandFailed {
        program: String,
        status: String,
        stderr: String,
    },

    #[error("Failed to read track information: {0}")]
    Probe(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Worker task failed: {0}")]
    Worker(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    TomlDe(#[from] toml::de::Error),

    #[error(transparent)]
    TomlSer(#[from] toml::ser::Error),
}

impl AppError {
    /// True when the backend binary itself is missing, so the caller can
    /// point at installation or the configured path instead of the file.
    pub fn is_command_not_found(&self) -> bool {
        matches!(self, AppError::CommandNotFound { .. })
    }
}
