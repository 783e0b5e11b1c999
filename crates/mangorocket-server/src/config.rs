// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Configuration for mangorocket-server.

use std::net::SocketAddr;

/// Server configuration loaded from environment variables.
///
/// Payment provider credentials are loaded separately by
/// `mangorocket_portone::PortOneConfig::from_env`.
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection string.
    pub database_url: String,
    /// HTTP listen address.
    pub http_addr: SocketAddr,
    /// Base URL of the auth provider project.
    pub supabase_url: String,
    /// Public API key for the auth provider.
    pub supabase_anon_key: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = std::env::var("MANGOROCKET_DATABASE_URL")
            .or_else(|_| std::env::var("DATABASE_URL"))
            .map_err(|_| ConfigError::MissingEnvVar("MANGOROCKET_DATABASE_URL or DATABASE_URL"))?;

        let port: u16 = std::env::var("MANGOROCKET_HTTP_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidPort)?;

        let http_addr = SocketAddr::from(([0, 0, 0, 0], port));

        let supabase_url =
            std::env::var("SUPABASE_URL").map_err(|_| ConfigError::MissingEnvVar("SUPABASE_URL"))?;

        let supabase_anon_key = std::env::var("SUPABASE_ANON_KEY")
            .map_err(|_| ConfigError::MissingEnvVar("SUPABASE_ANON_KEY"))?;

        Ok(Self {
            database_url,
            http_addr,
            supabase_url,
            supabase_anon_key,
        })
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required environment variable is missing.
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(&'static str),
    /// The port number is invalid.
    #[error("Invalid port number")]
    InvalidPort,
}
