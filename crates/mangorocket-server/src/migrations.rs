// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Database migrations for mangorocket-server.
//!
//! Calling [`run`] applies the embedded migrations. Safe to call multiple
//! times; already-applied migrations are skipped.
//!
//! # Example
//!
//! ```ignore
//! use sqlx::PgPool;
//! use mangorocket_server::migrations;
//!
//! let pool = PgPool::connect(&database_url).await?;
//! migrations::run(&pool).await?;
//! ```

use sqlx::migrate::{MigrateError, Migrator};

/// Migrations embedded at compile time.
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Get the embedded migrator.
pub fn migrator() -> &'static Migrator {
    &MIGRATOR
}

/// Run all migrations.
pub async fn run(pool: &sqlx::PgPool) -> Result<(), MigrateError> {
    MIGRATOR.run(pool).await
}
