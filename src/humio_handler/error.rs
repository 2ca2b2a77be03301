use std::error::Error as StdError;

use thiserror::Error;

/// Failure delivering a record to the ingest endpoint.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The server answered with a status of 400 or above.
    #[error("ingest request rejected with status {code}: {message}")]
    Http { code: u16, message: String },
    /// No response was obtained.
    #[error("ingest request failed before a response was received: {source}")]
    Transport {
        #[source]
        source: Box<dyn StdError + Send + Sync + 'static>,
    },
    /// The record could not be encoded as JSON.
    #[error("failed to serialise record: {0}")]
    Serialise(#[from] serde_json::Error),
}

impl IngestError {
    pub(crate) fn transport(source: impl Into<Box<dyn StdError + Send + Sync + 'static>>) -> Self {
        Self::Transport {
            source: source.into(),
        }
    }

    /// HTTP status code, if the server responded.
    pub fn code(&self) -> Option<u16> {
        match self {
            Self::Http { code, .. } => Some(*code),
            Self::Transport { .. } | Self::Serialise(_) => None,
        }
    }
}
