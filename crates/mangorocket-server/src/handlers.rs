// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Purchase flow handlers.
//!
//! Handlers are protocol-agnostic: the HTTP layer in [`crate::server`]
//! extracts the request, calls the handler, and maps the result to a status
//! code. Every handler is stateless per request; all state lives in the
//! database.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::TokenVerifier;
use crate::db;
use crate::error::{Error, Result};
use crate::identity;
use crate::payment::PaymentVerifier;

/// Shared state for purchase handlers.
///
/// Contains the database pool and the injected auth/payment clients shared
/// across all handlers.
pub struct PurchaseHandlerState {
    /// PostgreSQL connection pool.
    pub pool: PgPool,
    /// Bearer-token verifier (auth provider client).
    pub auth: Arc<dyn TokenVerifier>,
    /// Payment verifier (provider client).
    pub payments: Arc<dyn PaymentVerifier>,
    /// When the server started (for uptime calculation).
    pub start_time: std::time::Instant,
    /// Server version string.
    pub version: String,
}

impl PurchaseHandlerState {
    /// Create a new purchase handler state.
    pub fn new(
        pool: PgPool,
        auth: Arc<dyn TokenVerifier>,
        payments: Arc<dyn PaymentVerifier>,
    ) -> Self {
        Self {
            pool,
            auth,
            payments,
            start_time: std::time::Instant::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Get the server uptime in milliseconds.
    pub fn uptime_ms(&self) -> i64 {
        self.start_time.elapsed().as_millis() as i64
    }
}

// ============================================================================
// Health Check
// ============================================================================

/// Health check response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthCheckResponse {
    /// Whether the server is healthy (database connected).
    pub healthy: bool,
    /// Server version.
    pub version: String,
    /// Server uptime in milliseconds.
    pub uptime_ms: i64,
}

/// Handle health check request.
pub async fn handle_health_check(state: &PurchaseHandlerState) -> Result<HealthCheckResponse> {
    let db_healthy = db::health_check(&state.pool).await.unwrap_or(false);

    Ok(HealthCheckResponse {
        healthy: db_healthy,
        version: state.version.clone(),
        uptime_ms: state.uptime_ms(),
    })
}

// ============================================================================
// Purchase Verification
// ============================================================================

/// Request to verify a claimed payment and grant the entitlement.
#[derive(Debug)]
pub struct VerifyPurchaseRequest {
    /// External payment identifier claimed by the client.
    pub payment_id: String,
    /// Catalog item being purchased.
    pub item_id: Uuid,
    /// Bearer token from the Authorization header, if any.
    pub bearer_token: Option<String>,
}

/// Receipt for a granted entitlement.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseReceipt {
    /// User the entitlement was granted to.
    pub user_id: Uuid,
    /// Purchased item.
    pub item_id: Uuid,
    /// External payment identifier.
    pub payment_id: String,
    /// Captured amount in whole won.
    pub amount: i64,
}

/// Handle purchase verification request.
///
/// Linear flow, no compensation: resolve identity, load the catalog price,
/// verify capture with the provider, check the amount, then insert the
/// entitlement guarded by the (user, item) uniqueness constraint. The cart
/// delete at the end is best-effort. A failed insert is reported and the
/// caller may retry safely; re-verification of an already-granted purchase
/// is rejected, not updated.
pub async fn handle_verify_purchase(
    state: &PurchaseHandlerState,
    request: VerifyPurchaseRequest,
) -> Result<PurchaseReceipt> {
    if request.payment_id.is_empty() {
        return Err(Error::InvalidRequest("paymentId is required".to_string()));
    }

    let user_id = identity::resolve_user(
        state.auth.as_ref(),
        request.bearer_token.as_deref(),
        &request.payment_id,
    )
    .await?;

    let item = db::get_catalog_item(&state.pool, request.item_id)
        .await?
        .ok_or(Error::ItemNotFound(request.item_id))?;

    let payment = state.payments.fetch_payment(&request.payment_id).await?;

    if !payment.captured() {
        return Err(Error::PaymentNotCaptured(payment.status.as_str().to_string()));
    }

    let amount = payment
        .amount
        .ok_or_else(|| Error::Upstream("provider response carried no amount".to_string()))?;

    if amount != item.price {
        warn!(
            user_id = %user_id,
            item_id = %request.item_id,
            expected = item.price,
            actual = amount,
            "captured amount does not match catalog price"
        );
        return Err(Error::AmountMismatch {
            expected: item.price,
            actual: amount,
        });
    }

    if db::get_entitlement(&state.pool, user_id, request.item_id)
        .await?
        .is_some()
    {
        return Err(Error::AlreadyGranted);
    }

    let inserted = db::insert_entitlement(
        &state.pool,
        user_id,
        request.item_id,
        &request.payment_id,
        amount,
    )
    .await?;

    if !inserted {
        // A concurrent duplicate submission won the race between the
        // existence check and the insert.
        return Err(Error::AlreadyGranted);
    }

    if let Err(e) = db::delete_cart_entry(&state.pool, user_id, request.item_id).await {
        warn!(
            user_id = %user_id,
            item_id = %request.item_id,
            "failed to delete cart entry after grant: {}", e
        );
    }

    info!(
        user_id = %user_id,
        item_id = %request.item_id,
        payment_id = %request.payment_id,
        amount,
        title = %item.title,
        "entitlement granted"
    );

    Ok(PurchaseReceipt {
        user_id,
        item_id: request.item_id,
        payment_id: request.payment_id,
        amount,
    })
}

// ============================================================================
// Entitlement Listing
// ============================================================================

/// Request to list the caller's entitlements.
#[derive(Debug)]
pub struct ListEntitlementsRequest {
    /// Bearer token from the Authorization header, if any.
    pub bearer_token: Option<String>,
}

/// One entitlement in a listing response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntitlementSummary {
    /// Purchased item.
    pub item_id: Uuid,
    /// External payment identifier.
    pub payment_id: String,
    /// Captured amount in whole won.
    pub amount: i64,
    /// Entitlement status.
    pub status: String,
    /// When the entitlement was granted.
    pub created_at: DateTime<Utc>,
}

/// Handle entitlement listing request.
///
/// Bearer-only: there is no payment ID to fall back to on a read.
pub async fn handle_list_entitlements(
    state: &PurchaseHandlerState,
    request: ListEntitlementsRequest,
) -> Result<Vec<EntitlementSummary>> {
    let token = request.bearer_token.ok_or(Error::Unauthenticated)?;
    let user_id = state
        .auth
        .verify(&token)
        .await?
        .ok_or(Error::Unauthenticated)?;

    let rows = db::list_entitlements(&state.pool, user_id).await?;

    Ok(rows
        .into_iter()
        .map(|e| EntitlementSummary {
            item_id: e.item_id,
            payment_id: e.payment_id,
            amount: e.amount,
            status: e.status,
            created_at: e.created_at,
        })
        .collect())
}
