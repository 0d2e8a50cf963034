use thiserror::Error;

/// Terminal failure of [`crate::FetchClient::fetch`], or the reason a single
/// attempt was retried.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("rate limited (HTTP 429) by {url}")]
    RateLimited { url: String },

    #[error("service unavailable (HTTP 503) at {url}")]
    ServerUnavailable { url: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("giving up on {url} after {attempts} attempts: {last}")]
    Exhausted {
        url: String,
        attempts: u32,
        #[source]
        last: Box<FetchError>,
    },

    /// Stand-in cause for [`FetchError::Exhausted`] when every attempt was
    /// answered with 429/503 and no transport error was captured.
    #[error("unknown request failure")]
    Unknown,
}

/// Coarse classification of a [`FetchError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchErrorKind {
    RateLimited,
    ServerUnavailable,
    TransportError,
    Exhausted,
}

impl FetchError {
    #[must_use]
    pub fn kind(&self) -> FetchErrorKind {
        match self {
            FetchError::RateLimited { .. } => FetchErrorKind::RateLimited,
            FetchError::ServerUnavailable { .. } => FetchErrorKind::ServerUnavailable,
            FetchError::Exhausted { .. } => FetchErrorKind::Exhausted,
            FetchError::Transport(_) | FetchError::UnexpectedStatus { .. } | FetchError::Unknown => {
                FetchErrorKind::TransportError
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("failed to write CSV to {path}: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error("failed to flush CSV to {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
