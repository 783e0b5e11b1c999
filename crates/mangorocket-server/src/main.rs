// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! MangoRocket Purchase Server binary.
//!
//! An HTTP server responsible for:
//! - Purchase verification (provider capture check, amount validation)
//! - Entitlement grants (at most one per user/item pair)
//! - Entitlement listing for authenticated users

use std::sync::Arc;
use tracing::{info, warn};

use mangorocket_portone::{PortOneClient, PortOneConfig};
use mangorocket_server::auth::{SupabaseAuth, TokenVerifier};
use mangorocket_server::config::Config;
use mangorocket_server::handlers::PurchaseHandlerState;
use mangorocket_server::payment::{PaymentVerifier, PortOneVerifier};
use mangorocket_server::{migrations, server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mangorocket_server=info".into()),
        )
        .init();

    // Load .env file if present
    if let Err(e) = dotenvy::dotenv() {
        warn!("No .env file loaded: {}", e);
    }

    // Load configuration
    let config = Config::from_env()?;
    let portone_config = PortOneConfig::from_env()?;

    info!(
        http_addr = %config.http_addr,
        provider = %portone_config.api_base,
        "Starting MangoRocket purchase server"
    );

    // Connect to database
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await?;

    info!("Connected to database");

    migrations::run(&pool).await?;

    info!("Database schema verified");

    // Construct the injected service clients (no global handles)
    let auth: Arc<dyn TokenVerifier> =
        Arc::new(SupabaseAuth::new(&config.supabase_url, &config.supabase_anon_key)?);
    let payments: Arc<dyn PaymentVerifier> =
        Arc::new(PortOneVerifier::new(PortOneClient::new(portone_config)?));

    let state = Arc::new(PurchaseHandlerState::new(pool, auth, payments));

    server::run_server(config.http_addr, state).await?;

    info!("MangoRocket purchase server shut down");

    Ok(())
}
