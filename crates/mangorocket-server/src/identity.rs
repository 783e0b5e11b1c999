// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Identity resolution for purchase requests.
//!
//! The acting user is taken from the bearer token when one validates.
//! Otherwise the user ID is parsed out of the client-assembled payment ID,
//! `payment-{itemId}-{userId}-{timestamp}`, where both IDs are 36-character
//! hyphenated UUIDs. The fallback trusts client-supplied string structure as
//! an identity source; that spoofing risk is inherited from the original
//! flow deliberately.

use uuid::Uuid;

use crate::auth::TokenVerifier;
use crate::error::{Error, Result};

/// Components parsed out of a client-assembled payment ID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentIdParts {
    /// Item the payment was created for.
    pub item_id: Uuid,
    /// User who created the payment.
    pub user_id: Uuid,
    /// Client-side creation timestamp (seconds).
    pub timestamp: i64,
}

/// Take a 36-character hyphenated UUID off the front of `s`.
fn split_uuid(s: &str) -> Option<(Uuid, &str)> {
    if s.len() < 36 || !s.is_char_boundary(36) {
        return None;
    }
    let (head, tail) = s.split_at(36);
    let uuid = Uuid::try_parse(head).ok()?;
    Some((uuid, tail))
}

/// Parse a `payment-{itemId}-{userId}-{timestamp}` payment ID.
///
/// Returns None for anything that does not match the fixed format exactly.
pub fn parse_payment_id(payment_id: &str) -> Option<PaymentIdParts> {
    let rest = payment_id.strip_prefix("payment-")?;

    let (item_id, rest) = split_uuid(rest)?;
    let rest = rest.strip_prefix('-')?;
    let (user_id, rest) = split_uuid(rest)?;
    let rest = rest.strip_prefix('-')?;
    let timestamp: i64 = rest.parse().ok()?;

    Some(PaymentIdParts {
        item_id,
        user_id,
        timestamp,
    })
}

/// Resolve the acting user for a purchase request.
///
/// Order matters: a validating bearer token always wins; the payment-ID
/// parse is only consulted when no token validates.
pub async fn resolve_user(
    auth: &dyn TokenVerifier,
    bearer_token: Option<&str>,
    payment_id: &str,
) -> Result<Uuid> {
    if let Some(token) = bearer_token {
        if let Some(user_id) = auth.verify(token).await? {
            return Ok(user_id);
        }
    }

    parse_payment_id(payment_id)
        .map(|parts| parts.user_id)
        .ok_or(Error::Unauthenticated)
}
