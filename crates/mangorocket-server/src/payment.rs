// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Payment verification seam over the provider client.

use async_trait::async_trait;
use std::collections::HashMap;

use mangorocket_portone::{PaymentStatus, PortOneClient};

use crate::error::{Error, Result};

/// Authoritative payment state as reported by the provider.
#[derive(Debug, Clone)]
pub struct VerifiedPayment {
    /// Provider status for the payment.
    pub status: PaymentStatus,
    /// Captured amount in whole won, when the provider reports one.
    pub amount: Option<i64>,
}

impl VerifiedPayment {
    /// Whether funds were actually captured.
    pub fn captured(&self) -> bool {
        self.status == PaymentStatus::Paid
    }
}

/// Fetches authoritative payment state from the provider.
///
/// One read per request, no retries. Transport and provider API failures
/// surface as [`Error::Upstream`]; only a well-formed provider response with
/// a non-captured status reaches the caller as a payment-state decision.
#[async_trait]
pub trait PaymentVerifier: Send + Sync {
    /// Fetch the payment with the given external ID.
    async fn fetch_payment(&self, payment_id: &str) -> Result<VerifiedPayment>;
}

/// Payment verifier backed by the PortOne read API.
pub struct PortOneVerifier {
    client: PortOneClient,
}

impl PortOneVerifier {
    /// Create a verifier over an existing client.
    pub fn new(client: PortOneClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PaymentVerifier for PortOneVerifier {
    async fn fetch_payment(&self, payment_id: &str) -> Result<VerifiedPayment> {
        let payment = self
            .client
            .get_payment(payment_id)
            .await
            .map_err(|e| Error::Upstream(e.to_string()))?;

        Ok(VerifiedPayment {
            status: payment.status,
            amount: payment.total(),
        })
    }
}

/// Payment verifier with fixed responses, for tests.
#[derive(Debug, Default)]
pub struct MockPaymentVerifier {
    payments: HashMap<String, VerifiedPayment>,
    unreachable: bool,
}

impl MockPaymentVerifier {
    /// Create an empty mock; unknown payment IDs report as provider errors.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a payment the mock will return.
    pub fn with_payment(mut self, payment_id: impl Into<String>, payment: VerifiedPayment) -> Self {
        self.payments.insert(payment_id.into(), payment);
        self
    }

    /// Make every fetch fail as if the provider were unreachable.
    pub fn unreachable(mut self) -> Self {
        self.unreachable = true;
        self
    }
}

#[async_trait]
impl PaymentVerifier for MockPaymentVerifier {
    async fn fetch_payment(&self, payment_id: &str) -> Result<VerifiedPayment> {
        if self.unreachable {
            return Err(Error::Upstream("provider unreachable".to_string()));
        }

        self.payments
            .get(payment_id)
            .cloned()
            .ok_or_else(|| Error::Upstream(format!("payment not found: {}", payment_id)))
    }
}
