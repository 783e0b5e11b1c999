// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! MangoRocket Purchase Server
//!
//! HTTP API server for the marketplace's purchase verification and
//! entitlement flow: given a claimed external payment ID, verify with the
//! payment provider that funds were captured, validate the captured amount
//! against the catalog price, and grant access exactly once per
//! (user, item) pair, removing any pending cart record.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     Frontend / API clients                   │
//! └──────────────────────────────────────────────────────────────┘
//!                               │ HTTP (JSON)
//!                               ▼
//! ┌──────────────────────────────────────────────────────────────┐
//! │                mangorocket-server (this crate)               │
//! │  ┌────────────┐  ┌────────────┐  ┌─────────────────────┐     │
//! │  │  Identity  │  │   Price    │  │    Entitlement      │     │
//! │  │  Resolver  │  │   Oracle   │  │      Writer         │     │
//! │  └────────────┘  └────────────┘  └─────────────────────┘     │
//! └──────────────────────────────────────────────────────────────┘
//!        │                  │                    │
//!        ▼                  │                    │
//! ┌──────────────┐          │             ┌──────────────┐
//! │ Auth provider│          │             │   PortOne    │
//! │ (Supabase)   │          │             │ payments API │
//! └──────────────┘          ▼             └──────────────┘
//!                  ┌─────────────────┐
//!                  │   PostgreSQL    │
//!                  │ (catalog, ents, │
//!                  │     cart)       │
//!                  └─────────────────┘
//! ```
//!
//! # Operations
//!
//! | Endpoint | Description |
//! |----------|-------------|
//! | `POST /api/purchases/verify` | Verify a payment and grant the entitlement |
//! | `GET /api/entitlements` | List the caller's entitlements |
//! | `GET /health` | Database connectivity, version, uptime |
//!
//! # Flow
//!
//! The verification flow is linear, `unverified → verified → granted`, with
//! no branching retries and no compensation. Every invocation is stateless
//! and independently retryable: the entitlement insert is guarded by a
//! (user, item) uniqueness constraint, so a retry of a granted purchase is
//! rejected with AlreadyGranted rather than double-credited.
//!
//! # Configuration
//!
//! Configuration is loaded from environment variables:
//!
//! | Variable | Required | Default | Description |
//! |----------|----------|---------|-------------|
//! | `MANGOROCKET_DATABASE_URL` | Yes* | - | PostgreSQL connection string |
//! | `DATABASE_URL` | Yes* | - | Fallback if above not set |
//! | `MANGOROCKET_HTTP_PORT` | No | `8080` | HTTP listen port |
//! | `PORTONE_API_SECRET` | Yes | - | Payment provider API secret |
//! | `PORTONE_API_BASE` | No | `https://api.portone.io` | Provider base URL |
//! | `SUPABASE_URL` | Yes | - | Auth provider base URL |
//! | `SUPABASE_ANON_KEY` | Yes | - | Auth provider public API key |
//!
//! # Modules
//!
//! - [`config`]: Server configuration from environment variables
//! - [`db`]: PostgreSQL persistence for catalog, entitlements, and cart
//! - [`error`]: Error taxonomy for purchase operations
//! - [`auth`]: Bearer-token verification against the auth provider
//! - [`identity`]: Acting-user resolution (token first, payment-ID fallback)
//! - [`payment`]: Payment verification seam over the provider client
//! - [`handlers`]: Protocol-agnostic purchase flow handlers
//! - [`server`]: HTTP router and error-to-status mapping

#![deny(missing_docs)]

/// Server configuration loaded from environment variables.
pub mod config;

/// PostgreSQL database operations for catalog, entitlements, and cart.
pub mod db;

/// Error types for purchase operations.
pub mod error;

/// Bearer-token verification against the auth provider.
pub mod auth;

/// Acting-user resolution.
pub mod identity;

/// Payment verification seam over the provider client.
pub mod payment;

/// Purchase flow request handlers.
pub mod handlers;

/// HTTP server for the purchase API.
pub mod server;

/// Database migrations for mangorocket-server.
pub mod migrations;

pub use config::Config;
pub use error::Error;
