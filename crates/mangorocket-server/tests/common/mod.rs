// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Common test infrastructure for mangorocket-server integration tests.
//!
//! Database tests are gated on `TEST_MANGOROCKET_DATABASE_URL` (or
//! `MANGOROCKET_DATABASE_URL`) and skip when neither is set.

#![allow(dead_code)]

use sqlx::PgPool;
use uuid::Uuid;

/// Get a database pool for testing, running migrations first.
pub async fn get_test_pool() -> Option<PgPool> {
    let database_url = std::env::var("TEST_MANGOROCKET_DATABASE_URL")
        .or_else(|_| std::env::var("MANGOROCKET_DATABASE_URL"))
        .ok()?;
    let pool = PgPool::connect(&database_url).await.ok()?;
    mangorocket_server::migrations::run(&pool).await.ok()?;
    Some(pool)
}

/// Build a client-assembled payment ID in the fixed wire format.
pub fn payment_id_for(item_id: Uuid, user_id: Uuid) -> String {
    format!("payment-{}-{}-1700000000", item_id, user_id)
}

/// Insert a catalog item with the given price, returning its ID.
pub async fn seed_catalog_item(pool: &PgPool, price: i64) -> Uuid {
    let item_id = Uuid::new_v4();
    sqlx::query(
        r#"
        INSERT INTO catalog_items (item_id, kind, title, price, created_at)
        VALUES ($1, 'course', 'Test Course', $2, NOW())
        "#,
    )
    .bind(item_id)
    .bind(price)
    .execute(pool)
    .await
    .expect("failed to seed catalog item");
    item_id
}

/// Insert a cart entry for a (user, item) pair.
pub async fn seed_cart_entry(pool: &PgPool, user_id: Uuid, item_id: Uuid) {
    sqlx::query(
        r#"
        INSERT INTO cart_entries (user_id, item_id, added_at)
        VALUES ($1, $2, NOW())
        ON CONFLICT (user_id, item_id) DO NOTHING
        "#,
    )
    .bind(user_id)
    .bind(item_id)
    .execute(pool)
    .await
    .expect("failed to seed cart entry");
}

/// Count entitlement rows for a (user, item) pair.
pub async fn count_entitlements(pool: &PgPool, user_id: Uuid, item_id: Uuid) -> i64 {
    sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM entitlements WHERE user_id = $1 AND item_id = $2",
    )
    .bind(user_id)
    .bind(item_id)
    .fetch_one(pool)
    .await
    .expect("failed to count entitlements")
}

/// Clean up test data for a (user, item) pair.
pub async fn cleanup(pool: &PgPool, user_id: Option<Uuid>, item_id: Option<Uuid>) {
    if let Some(uid) = user_id {
        sqlx::query("DELETE FROM entitlements WHERE user_id = $1")
            .bind(uid)
            .execute(pool)
            .await
            .ok();
        sqlx::query("DELETE FROM cart_entries WHERE user_id = $1")
            .bind(uid)
            .execute(pool)
            .await
            .ok();
    }
    if let Some(iid) = item_id {
        sqlx::query("DELETE FROM entitlements WHERE item_id = $1")
            .bind(iid)
            .execute(pool)
            .await
            .ok();
        sqlx::query("DELETE FROM cart_entries WHERE item_id = $1")
            .bind(iid)
            .execute(pool)
            .await
            .ok();
        sqlx::query("DELETE FROM catalog_items WHERE item_id = $1")
            .bind(iid)
            .execute(pool)
            .await
            .ok();
    }
}
