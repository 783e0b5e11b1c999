// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Configuration for the PortOne client.

use std::time::Duration;

use crate::error::{PortOneError, Result};

/// Default API base URL for the provider's v2 REST API.
pub const DEFAULT_API_BASE: &str = "https://api.portone.io";

/// Configuration for the PortOneClient.
#[derive(Debug, Clone)]
pub struct PortOneConfig {
    /// Base URL of the provider API.
    pub api_base: String,
    /// API secret sent as `Authorization: PortOne <secret>`.
    pub api_secret: String,
    /// Request timeout.
    pub request_timeout: Duration,
}

impl PortOneConfig {
    /// Create a configuration with the given API secret and defaults.
    pub fn new(api_secret: impl Into<String>) -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            api_secret: api_secret.into(),
            request_timeout: Duration::from_secs(10),
        }
    }

    /// Create a configuration from environment variables.
    ///
    /// Environment variables:
    /// - `PORTONE_API_SECRET`: API secret (required)
    /// - `PORTONE_API_BASE`: API base URL (default: "https://api.portone.io")
    /// - `PORTONE_REQUEST_TIMEOUT_MS`: Request timeout in milliseconds (default: 10000)
    pub fn from_env() -> Result<Self> {
        let api_secret = std::env::var("PORTONE_API_SECRET")
            .map_err(|_| PortOneError::Config("PORTONE_API_SECRET is not set".to_string()))?;

        let api_base =
            std::env::var("PORTONE_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.to_string());

        let request_timeout_ms: u64 = std::env::var("PORTONE_REQUEST_TIMEOUT_MS")
            .unwrap_or_else(|_| "10000".to_string())
            .parse()
            .map_err(|e| {
                PortOneError::Config(format!("invalid PORTONE_REQUEST_TIMEOUT_MS: {}", e))
            })?;

        Ok(Self {
            api_base,
            api_secret,
            request_timeout: Duration::from_millis(request_timeout_ms),
        })
    }

    /// Set the API base URL.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Set the request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}
