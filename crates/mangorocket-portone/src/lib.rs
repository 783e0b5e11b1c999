// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! MangoRocket PortOne client
//!
//! Typed async client for the PortOne payments read API. The purchase
//! verification flow uses a single provider operation: fetch a payment by ID
//! and inspect its status and captured amount.
//!
//! # Example
//!
//! ```no_run
//! use mangorocket_portone::{PortOneClient, PortOneConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = PortOneClient::new(PortOneConfig::new("my-api-secret"))?;
//!
//! let payment = client.get_payment("payment-abc-123").await?;
//! if payment.is_paid() {
//!     println!("captured: {:?}", payment.total());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! The client never retries; callers treat any transport or API error as an
//! upstream failure and surface it to their own caller.

mod client;
mod config;
mod error;
mod types;

pub use client::PortOneClient;
pub use config::PortOneConfig;
pub use error::{PortOneError, Result};
pub use types::{Payment, PaymentAmount, PaymentStatus};
