// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Error types for mangorocket-portone.

use thiserror::Error;

/// Result type using PortOneError.
pub type Result<T> = std::result::Result<T, PortOneError>;

/// Errors that can occur when talking to the payment provider.
#[derive(Debug, Error)]
pub enum PortOneError {
    /// Configuration error (missing or invalid values).
    #[error("configuration error: {0}")]
    Config(String),

    /// Request failed at the transport level (DNS, TLS, timeout, connect).
    #[error("transport error: {0}")]
    Transport(String),

    /// Provider returned a non-success HTTP status.
    #[error("provider error [{status}]: {message}")]
    Api {
        /// HTTP status code returned by the provider.
        status: u16,
        /// Response body, verbatim.
        message: String,
    },

    /// Provider response body could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for PortOneError {
    fn from(err: reqwest::Error) -> Self {
        PortOneError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for PortOneError {
    fn from(err: serde_json::Error) -> Self {
        PortOneError::Decode(err.to_string())
    }
}
