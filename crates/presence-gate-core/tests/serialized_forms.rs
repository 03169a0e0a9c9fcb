// crates/presence-gate-core/tests/serialized_forms.rs
// ============================================================================
// Module: Serialized Form Tests
// Description: Validate the stable serialized shapes of the data model.
// Purpose: Keep wire forms stable for hosts that persist or log them.
// Dependencies: presence-gate-core, serde_json
// ============================================================================

//! ## Overview
//! Hosts serialize confirmation kinds, resolutions, and identifiers into
//! their own logs and IPC payloads. These shapes are part of the public
//! contract and must not drift.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

use presence_gate_core::ConfirmationKind;
use presence_gate_core::ConfirmationStrategy;
use presence_gate_core::DenialCause;
use presence_gate_core::RequestId;
use presence_gate_core::Resolution;
use serde_json::json;

#[test]
fn confirmation_kind_uses_tagged_snake_case() -> Result<(), Box<dyn std::error::Error>> {
    let kind = ConfirmationKind::Authenticate {
        facet: Some("example.com".to_string()),
    };
    let value = serde_json::to_value(&kind)?;
    assert_eq!(value, json!({"kind": "authenticate", "facet": "example.com"}));

    let back: ConfirmationKind =
        serde_json::from_value(json!({"kind": "register", "facet": null}))?;
    assert_eq!(back, ConfirmationKind::Register {
        facet: None,
    });
    Ok(())
}

#[test]
fn resolution_tags_the_outcome() -> Result<(), Box<dyn std::error::Error>> {
    let confirmed = serde_json::to_value(Resolution::Confirmed)?;
    assert_eq!(confirmed, json!({"outcome": "confirmed"}));

    let denied = serde_json::to_value(Resolution::Denied {
        cause: DenialCause::TimedOut,
    })?;
    assert_eq!(denied, json!({"outcome": "denied", "cause": "timed_out"}));
    Ok(())
}

#[test]
fn request_id_serializes_as_raw_number() -> Result<(), Box<dyn std::error::Error>> {
    let value = serde_json::to_value(RequestId::from_raw(42))?;
    assert_eq!(value, json!(42));
    Ok(())
}

#[test]
fn strategy_labels_match_configuration_documents() -> Result<(), Box<dyn std::error::Error>> {
    assert_eq!(serde_json::to_value(ConfirmationStrategy::Prompt)?, json!("prompt"));
    assert_eq!(serde_json::to_value(ConfirmationStrategy::Biometric)?, json!("biometric"));
    Ok(())
}
