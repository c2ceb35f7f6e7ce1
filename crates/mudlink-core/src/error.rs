#![forbid(unsafe_code)]

use thiserror::Error;

use crate::prompt::PromptId;

pub type Result<T> = std::result::Result<T, ClientError>;

/// Top-level error for every fallible core operation.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    #[error("prompt error: {0}")]
    Prompt(#[from] PromptError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("connection is closed")]
    Disconnected,
}

/// Failures decoding inbound frames or encoding outbound ones.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("malformed frame: {0}")]
    Malformed(#[source] serde_json::Error),

    #[error("unknown message type: {0:?}")]
    UnknownMessageType(String),

    #[error("failed to encode action: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Failures acting on prompts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PromptError {
    #[error("no prompt is active")]
    NoActivePrompt,

    #[error("prompt {id} is not the active prompt")]
    NotActive { id: PromptId },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config: {message}")]
    Invalid { message: String },
}

impl ConfigError {
    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid {
            message: message.into(),
        }
    }
}

impl ClientError {
    /// Whether the failure only affects the frame or click that caused it.
    ///
    /// Everything except configuration errors leaves the client usable.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Config(_))
    }
}
