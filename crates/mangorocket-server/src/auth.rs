// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Bearer-token verification against the auth provider.

use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{Error, Result};

/// Verifies bearer tokens and resolves them to user IDs.
///
/// `Ok(None)` means the token did not validate; the identity resolver then
/// falls through to the payment-ID parse. Implementations reserve `Err` for
/// failures that should abort the request outright.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    /// Verify a bearer token, returning the principal's user ID if valid.
    async fn verify(&self, token: &str) -> Result<Option<Uuid>>;
}

/// Token verifier backed by a Supabase-style auth endpoint.
///
/// Calls `GET {base}/auth/v1/user` with the project API key and the caller's
/// bearer token; a 2xx response carries the authenticated user record.
pub struct SupabaseAuth {
    http: reqwest::Client,
    base_url: String,
    anon_key: String,
}

/// Authenticated user record returned by the auth provider.
#[derive(Debug, Deserialize)]
struct AuthUser {
    id: Uuid,
}

impl SupabaseAuth {
    /// Create a new verifier for the given auth project.
    pub fn new(base_url: impl Into<String>, anon_key: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .map_err(|e| Error::InvalidRequest(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: base_url.into(),
            anon_key: anon_key.into(),
        })
    }
}

#[async_trait]
impl TokenVerifier for SupabaseAuth {
    async fn verify(&self, token: &str) -> Result<Option<Uuid>> {
        let url = format!("{}/auth/v1/user", self.base_url.trim_end_matches('/'));

        let response = self
            .http
            .get(&url)
            .header("apikey", &self.anon_key)
            .bearer_auth(token)
            .send()
            .await;

        match response {
            Ok(resp) if resp.status().is_success() => match resp.json::<AuthUser>().await {
                Ok(user) => {
                    debug!(user_id = %user.id, "bearer token verified");
                    Ok(Some(user.id))
                }
                Err(e) => {
                    warn!("auth provider returned an undecodable user record: {}", e);
                    Ok(None)
                }
            },
            Ok(resp) => {
                debug!(status = %resp.status(), "bearer token rejected by auth provider");
                Ok(None)
            }
            Err(e) => {
                // An unreachable auth provider degrades to the payment-ID
                // fallback, matching the original flow.
                warn!("auth provider unreachable: {}", e);
                Ok(None)
            }
        }
    }
}

/// Token verifier with a fixed token-to-user mapping, for tests.
#[derive(Debug, Default)]
pub struct MockTokenVerifier {
    users: HashMap<String, Uuid>,
}

impl MockTokenVerifier {
    /// Create an empty mock that rejects every token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a token as valid for the given user.
    pub fn with_token(mut self, token: impl Into<String>, user_id: Uuid) -> Self {
        self.users.insert(token.into(), user_id);
        self
    }
}

#[async_trait]
impl TokenVerifier for MockTokenVerifier {
    async fn verify(&self, token: &str) -> Result<Option<Uuid>> {
        Ok(self.users.get(token).copied())
    }
}
