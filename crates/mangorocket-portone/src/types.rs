// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Typed payment records returned by the provider.

use serde::{Deserialize, Serialize};

/// Payment status as reported by the provider.
///
/// Only `Paid` counts as captured funds. Statuses the provider adds later
/// deserialize as `Unknown` instead of failing the whole response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    /// Payment created but funds not captured.
    Ready,
    /// Funds captured.
    Paid,
    /// Waiting on a virtual account deposit.
    VirtualAccountIssued,
    /// Payment is pending provider-side processing.
    PayPending,
    /// Payment was cancelled in full.
    Cancelled,
    /// Payment was partially cancelled.
    PartialCancelled,
    /// Payment failed.
    Failed,
    /// Unrecognized status value.
    #[serde(other)]
    Unknown,
}

impl PaymentStatus {
    /// Wire name of the status as the provider spells it.
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Ready => "READY",
            PaymentStatus::Paid => "PAID",
            PaymentStatus::VirtualAccountIssued => "VIRTUAL_ACCOUNT_ISSUED",
            PaymentStatus::PayPending => "PAY_PENDING",
            PaymentStatus::Cancelled => "CANCELLED",
            PaymentStatus::PartialCancelled => "PARTIAL_CANCELLED",
            PaymentStatus::Failed => "FAILED",
            PaymentStatus::Unknown => "UNKNOWN",
        }
    }
}

/// Structured amount breakdown on a payment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentAmount {
    /// Total amount in minor currency units (whole won for KRW).
    pub total: i64,
}

/// Payment record returned by `GET /payments/{id}`.
///
/// Everything except `status` is optional: the legacy provider API shape
/// carries a flat `totalAmount` instead of the structured `amount` object,
/// and this client accepts both.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    /// Provider payment ID.
    #[serde(default)]
    pub id: Option<String>,
    /// Payment status.
    pub status: PaymentStatus,
    /// Structured amount breakdown (current API shape).
    #[serde(default)]
    pub amount: Option<PaymentAmount>,
    /// Flat total amount (legacy API shape).
    #[serde(default)]
    pub total_amount: Option<i64>,
    /// Order name as registered at checkout.
    #[serde(default)]
    pub order_name: Option<String>,
    /// ISO 4217 currency code.
    #[serde(default)]
    pub currency: Option<String>,
}

impl Payment {
    /// Captured total, preferring `amount.total` over the legacy `totalAmount`.
    pub fn total(&self) -> Option<i64> {
        self.amount.as_ref().map(|a| a.total).or(self.total_amount)
    }

    /// Whether the provider confirmed funds were captured.
    pub fn is_paid(&self) -> bool {
        self.status == PaymentStatus::Paid
    }
}
