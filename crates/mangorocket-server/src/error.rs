// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Error types for mangorocket-server.

use thiserror::Error;
use uuid::Uuid;

/// Purchase service errors.
///
/// Every error is terminal for the request that produced it; there are no
/// retries or queued reconciliation. The HTTP status mapping lives in
/// [`crate::server`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Configuration loading failed.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// No identity could be established for the caller.
    #[error("Unauthenticated: no valid token and no parseable payment ID")]
    Unauthenticated,

    /// Catalog item was not found.
    #[error("Item not found: {0}")]
    ItemNotFound(Uuid),

    /// Provider reports the payment was not captured.
    #[error("Payment not captured (provider status: {0})")]
    PaymentNotCaptured(String),

    /// Captured amount does not equal the catalog price.
    #[error("Amount mismatch: catalog price {expected}, captured {actual}")]
    AmountMismatch {
        /// Authoritative catalog price.
        expected: i64,
        /// Amount the provider captured.
        actual: i64,
    },

    /// An entitlement for this (user, item) pair already exists.
    #[error("Entitlement already granted")]
    AlreadyGranted,

    /// Payment provider was unreachable or answered with an error.
    #[error("Payment provider error: {0}")]
    Upstream(String),

    /// Request validation failed.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// Result type using the purchase service Error.
pub type Result<T> = std::result::Result<T, Error>;
