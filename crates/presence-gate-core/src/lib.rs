// crates/presence-gate-core/src/lib.rs
// ============================================================================
// Module: Presence Gate Core Library
// Description: User-presence confirmation gate for security-key operations.
// Purpose: Arbitrate, time out, and resolve single-flight confirmation requests.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! Presence Gate obtains an explicit, time-bounded confirmation that a human
//! approved a cryptographic registration or authentication before the
//! operation completes. One request is pending at a time; a newer request
//! supersedes the old one with a `false` result, a 10-second watchdog
//! enforces the hard timeout and detects external prompt dismissal, and each
//! caller receives exactly one terminal boolean.
//! Invariants:
//! - At most one confirmation request is outstanding at any instant.
//! - Every request's callback fires exactly once, on whichever context
//!   triggers resolution.
//! - The gate never renders UI; hosts supply a [`PresentationService`] and
//!   optionally a [`BiometricService`].

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;
pub mod telemetry;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use crate::core::Clock;
pub use crate::core::ConfirmationKind;
pub use crate::core::ConfirmationStrategy;
pub use crate::core::DEFAULT_FACET_LABEL;
pub use crate::core::DenialCause;
pub use crate::core::MonotonicTime;
pub use crate::core::PromptHandle;
pub use crate::core::RequestId;
pub use crate::core::RequestPhase;
pub use crate::core::Resolution;
pub use crate::core::SystemClock;
pub use crate::interfaces::BiometricError;
pub use crate::interfaces::BiometricService;
pub use crate::interfaces::PresenceCallback;
pub use crate::interfaces::PresentationError;
pub use crate::interfaces::PresentationService;
pub use crate::interfaces::PromptSpec;
pub use crate::runtime::DEFAULT_ACCEPT_LABEL;
pub use crate::runtime::DEFAULT_REJECT_LABEL;
pub use crate::runtime::GateBuildError;
pub use crate::runtime::GateTuning;
pub use crate::runtime::PresenceGate;
pub use crate::runtime::PresenceGateBuilder;
pub use crate::runtime::USER_PRESENCE_TIMEOUT_MS;
pub use crate::runtime::WATCHDOG_POLL_INTERVAL_MS;
pub use crate::runtime::WatchdogDirective;
pub use crate::runtime::WatchdogMode;
pub use crate::telemetry::GateEvent;
pub use crate::telemetry::GateStage;
pub use crate::telemetry::NoopTelemetry;
pub use crate::telemetry::TelemetrySink;
