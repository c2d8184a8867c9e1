use derive_more::{Display, Error};

/// Notification step that talks to an external service or the filesystem.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum DispatchStep {
    #[display("email")]
    Email,
    #[display("upload")]
    Upload,
    #[display("sms")]
    Sms,
    #[display("delete")]
    Delete,
}

#[derive(Debug, Display, Error, PartialEq)]
pub enum RelayError {
    #[display("Unable to find {_0}")]
    MissingSecret(#[error(not(source))] String),
    #[display("Invalid value for {_0}")]
    InvalidSecret(#[error(not(source))] String),
    #[display("Invalid media file path: {_0:?}")]
    InvalidMediaPath(#[error(not(source))] String),
    #[display("Unable to read media file {path}: {reason}")]
    MediaUnreadable { path: String, reason: String },
    #[display("[{step}] {reason}")]
    TransportFailure { step: DispatchStep, reason: String },
    #[display("Unable to delete media file {path}: {reason}")]
    Cleanup { path: String, reason: String },
}

impl RelayError {
    /// Wraps a service failure, keeping the whole context chain on one line.
    pub fn transport(step: DispatchStep, err: anyhow::Error) -> Self {
        RelayError::TransportFailure {
            step,
            reason: format!("{err:#}"),
        }
    }
}

impl From<envconfig::Error> for RelayError {
    fn from(err: envconfig::Error) -> Self {
        match err {
            envconfig::Error::EnvVarMissing { name } => RelayError::MissingSecret(name.to_string()),
            other => RelayError::InvalidSecret(other.to_string()),
        }
    }
}
