//! Error types for the feeds module

use thiserror::Error;

/// Errors that can occur while fetching or extracting a feed
#[derive(Debug, Error)]
pub enum FeedError {
    /// Network, DNS or timeout failure
    #[error("Transport error: {0}")]
    Transport(String),

    /// Upstream answered with a non-2xx status
    #[error("HTTP error (status {status}) for {url}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Requested URL
        url: String,
    },

    /// Payload is not valid JSON / XML
    #[error("Decode error: {0}")]
    Decode(String),

    /// Payload is well-formed but lacks the expected structure
    #[error("Schema error: {0}")]
    Schema(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Coarse classification of a [`FeedError`], used for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedErrorKind {
    Transport,
    Status,
    Decode,
    Schema,
    Config,
}

impl FeedError {
    pub fn kind(&self) -> FeedErrorKind {
        match self {
            FeedError::Transport(_) => FeedErrorKind::Transport,
            FeedError::Status { .. } => FeedErrorKind::Status,
            FeedError::Decode(_) => FeedErrorKind::Decode,
            FeedError::Schema(_) => FeedErrorKind::Schema,
            FeedError::InvalidConfig(_) => FeedErrorKind::Config,
        }
    }
}

impl std::fmt::Display for FeedErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            FeedErrorKind::Transport => "transport",
            FeedErrorKind::Status => "status",
            FeedErrorKind::Decode => "decode",
            FeedErrorKind::Schema => "schema",
            FeedErrorKind::Config => "config",
        };
        f.write_str(name)
    }
}
