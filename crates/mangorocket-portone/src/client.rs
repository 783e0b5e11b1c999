// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! PortOneClient for fetching payments from the provider.

use tracing::debug;

use crate::config::PortOneConfig;
use crate::error::{PortOneError, Result};
use crate::types::Payment;

/// Async client for the provider's payments read API.
///
/// One request, no retries. The purchase flow treats every transport or API
/// error as an upstream failure, so the client reports them verbatim rather
/// than masking them behind backoff.
pub struct PortOneClient {
    http: reqwest::Client,
    config: PortOneConfig,
}

impl PortOneClient {
    /// Create a new client with the given configuration.
    pub fn new(config: PortOneConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| PortOneError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { http, config })
    }

    /// Create a client from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(PortOneConfig::from_env()?)
    }

    /// Get the client configuration.
    pub fn config(&self) -> &PortOneConfig {
        &self.config
    }

    /// Fetch a payment by its ID.
    ///
    /// Returns the provider's authoritative record, including status and the
    /// captured amount. A non-2xx response becomes [`PortOneError::Api`]; the
    /// caller decides how to surface it.
    pub async fn get_payment(&self, payment_id: &str) -> Result<Payment> {
        let url = format!(
            "{}/payments/{}",
            self.config.api_base.trim_end_matches('/'),
            payment_id
        );

        debug!(payment_id = %payment_id, "fetching payment from provider");

        let response = self
            .http
            .get(&url)
            .header(
                "Authorization",
                format!("PortOne {}", self.config.api_secret),
            )
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(PortOneError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        let payment: Payment = serde_json::from_str(&body)?;

        debug!(
            payment_id = %payment_id,
            status = ?payment.status,
            total = ?payment.total(),
            "payment fetched"
        );

        Ok(payment)
    }
}
