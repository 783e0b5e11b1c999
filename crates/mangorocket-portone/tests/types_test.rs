// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Wire-shape tests for provider payment records.

use mangorocket_portone::{Payment, PaymentStatus};

#[test]
fn test_decode_current_api_shape() {
    let json = r#"{
        "id": "pay-1",
        "status": "PAID",
        "amount": { "total": 10000, "taxFree": 0 },
        "orderName": "Intro to Rust",
        "currency": "KRW"
    }"#;

    let payment: Payment = serde_json::from_str(json).unwrap();

    assert_eq!(payment.id.as_deref(), Some("pay-1"));
    assert_eq!(payment.status, PaymentStatus::Paid);
    assert_eq!(payment.total(), Some(10000));
    assert_eq!(payment.currency.as_deref(), Some("KRW"));
}

#[test]
fn test_decode_legacy_api_shape() {
    let json = r#"{ "status": "PAID", "totalAmount": 5000 }"#;

    let payment: Payment = serde_json::from_str(json).unwrap();

    assert_eq!(payment.total(), Some(5000));
    assert!(payment.amount.is_none());
}

#[test]
fn test_decode_minimal_record() {
    let json = r#"{ "status": "FAILED" }"#;

    let payment: Payment = serde_json::from_str(json).unwrap();

    assert_eq!(payment.status, PaymentStatus::Failed);
    assert_eq!(payment.total(), None);
}

#[test]
fn test_decode_all_known_statuses() {
    let cases = [
        ("READY", PaymentStatus::Ready),
        ("PAID", PaymentStatus::Paid),
        ("VIRTUAL_ACCOUNT_ISSUED", PaymentStatus::VirtualAccountIssued),
        ("PAY_PENDING", PaymentStatus::PayPending),
        ("CANCELLED", PaymentStatus::Cancelled),
        ("PARTIAL_CANCELLED", PaymentStatus::PartialCancelled),
        ("FAILED", PaymentStatus::Failed),
    ];

    for (wire, expected) in cases {
        let json = format!(r#"{{ "status": "{}" }}"#, wire);
        let payment: Payment = serde_json::from_str(&json).unwrap();
        assert_eq!(payment.status, expected, "status {}", wire);
    }
}

#[test]
fn test_decode_unrecognized_status() {
    let json = r#"{ "status": "SETTLED_SOMEDAY" }"#;

    let payment: Payment = serde_json::from_str(json).unwrap();

    assert_eq!(payment.status, PaymentStatus::Unknown);
}

#[test]
fn test_missing_status_is_an_error() {
    let json = r#"{ "totalAmount": 5000 }"#;

    assert!(serde_json::from_str::<Payment>(json).is_err());
}
