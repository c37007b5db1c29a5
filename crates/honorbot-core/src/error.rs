// SPDX-FileCopyrightText: 2026 Honorbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for Honorbot.

use thiserror::Error;

/// The primary error type used across all Honorbot adapter traits and core operations.
///
/// Only failures travel through this type. Refused commands (missing admin
/// rights, locked elections, unknown users) are answered in the chat and
/// never surface as an `HonorError`.
#[derive(Debug, Error)]
pub enum HonorError {
    /// Configuration errors (missing token, invalid values).
    #[error("configuration error: {0}")]
    Config(String),

    /// Storage backend errors (database connection, query failure, serialization).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A collection was requested that does not exist in the database.
    #[error("there is no such collection as `{name}`")]
    UnknownCollection { name: String },

    /// Transport errors (network failure, API rejection, closed channel).
    #[error("channel error: {message}")]
    Channel {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The inbound event stream has ended for good.
    #[error("channel closed: {0}")]
    ChannelClosed(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl HonorError {
    /// Shorthand for a storage error carrying only a message.
    pub fn storage(message: impl Into<String>) -> Self {
        HonorError::Storage {
            source: message.into().into(),
        }
    }

    /// Shorthand for a channel error without an underlying source.
    pub fn channel(message: impl Into<String>) -> Self {
        HonorError::Channel {
            message: message.into(),
            source: None,
        }
    }

    /// Returns true when the error means the inbound channel is gone for good.
    pub fn is_channel_closed(&self) -> bool {
        matches!(self, HonorError::ChannelClosed(_))
    }
}
