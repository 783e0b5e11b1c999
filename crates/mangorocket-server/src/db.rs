// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Database operations for mangorocket-server.
//!
//! Three tables back the purchase flow: `catalog_items` (read-only here),
//! `entitlements` (insert-only, never mutated after creation), and
//! `cart_entries` (deleted best-effort when an entitlement is granted).
//!
//! The at-most-one-entitlement-per-(user, item) invariant is enforced by the
//! `entitlements_user_item_unique` constraint, not by application locking;
//! [`insert_entitlement`] reports a lost race through its return value.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// Catalog item record (a purchasable course, e-book, bundle, or live class).
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CatalogItem {
    /// Unique identifier for the item.
    pub item_id: Uuid,
    /// Content kind (course, ebook, bundle, live).
    pub kind: String,
    /// Display title.
    pub title: String,
    /// Authoritative price in whole won.
    pub price: i64,
    /// When the item was added to the catalog.
    pub created_at: DateTime<Utc>,
}

/// Entitlement record granting a user access to a purchased item.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Entitlement {
    /// User who owns the entitlement.
    pub user_id: Uuid,
    /// Item the entitlement grants access to.
    pub item_id: Uuid,
    /// External payment identifier, unique per transaction.
    pub payment_id: String,
    /// Amount captured for this purchase, in whole won.
    pub amount: i64,
    /// Entitlement status; always "completed" once written.
    pub status: String,
    /// When the entitlement was granted.
    pub created_at: DateTime<Utc>,
}

/// Cart entry record.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CartEntry {
    /// User the cart entry belongs to.
    pub user_id: Uuid,
    /// Item in the cart.
    pub item_id: Uuid,
    /// When the item was added to the cart.
    pub added_at: DateTime<Utc>,
}

/// Get a catalog item by ID.
pub async fn get_catalog_item(
    pool: &PgPool,
    item_id: Uuid,
) -> Result<Option<CatalogItem>, sqlx::Error> {
    sqlx::query_as::<_, CatalogItem>(
        r#"
        SELECT item_id, kind, title, price, created_at
        FROM catalog_items
        WHERE item_id = $1
        "#,
    )
    .bind(item_id)
    .fetch_optional(pool)
    .await
}

/// Get an existing entitlement for a (user, item) pair.
pub async fn get_entitlement(
    pool: &PgPool,
    user_id: Uuid,
    item_id: Uuid,
) -> Result<Option<Entitlement>, sqlx::Error> {
    sqlx::query_as::<_, Entitlement>(
        r#"
        SELECT user_id, item_id, payment_id, amount, status, created_at
        FROM entitlements
        WHERE user_id = $1 AND item_id = $2
        "#,
    )
    .bind(user_id)
    .bind(item_id)
    .fetch_optional(pool)
    .await
}

/// Insert a completed entitlement.
///
/// The insert is guarded by the (user_id, item_id) uniqueness constraint:
/// when a concurrent duplicate submission already inserted a row, this one
/// affects zero rows and returns false. The caller surfaces that as
/// AlreadyGranted rather than failing the statement.
pub async fn insert_entitlement(
    pool: &PgPool,
    user_id: Uuid,
    item_id: Uuid,
    payment_id: &str,
    amount: i64,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO entitlements (user_id, item_id, payment_id, amount, status, created_at)
        VALUES ($1, $2, $3, $4, 'completed', NOW())
        ON CONFLICT (user_id, item_id) DO NOTHING
        "#,
    )
    .bind(user_id)
    .bind(item_id)
    .bind(payment_id)
    .bind(amount)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// List a user's entitlements, newest first.
pub async fn list_entitlements(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<Entitlement>, sqlx::Error> {
    sqlx::query_as::<_, Entitlement>(
        r#"
        SELECT user_id, item_id, payment_id, amount, status, created_at
        FROM entitlements
        WHERE user_id = $1
        ORDER BY created_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

/// Delete a cart entry for a (user, item) pair.
///
/// Returns whether a row was deleted. The purchase flow treats failures here
/// as non-fatal.
pub async fn delete_cart_entry(
    pool: &PgPool,
    user_id: Uuid,
    item_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM cart_entries WHERE user_id = $1 AND item_id = $2")
        .bind(user_id)
        .bind(item_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Get a cart entry for a (user, item) pair.
pub async fn get_cart_entry(
    pool: &PgPool,
    user_id: Uuid,
    item_id: Uuid,
) -> Result<Option<CartEntry>, sqlx::Error> {
    sqlx::query_as::<_, CartEntry>(
        r#"
        SELECT user_id, item_id, added_at
        FROM cart_entries
        WHERE user_id = $1 AND item_id = $2
        "#,
    )
    .bind(user_id)
    .bind(item_id)
    .fetch_optional(pool)
    .await
}

/// Health check for database connectivity.
pub async fn health_check(pool: &PgPool) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(pool)
        .await
        .map(|_| true)
}
