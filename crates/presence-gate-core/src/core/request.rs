// crates/presence-gate-core/src/core/request.rs
// ============================================================================
// Module: Presence Gate Request Model
// Description: Confirmation kinds, request identifiers, and lifecycle phases.
// Purpose: Define the caller-visible vocabulary of a confirmation request.
// Dependencies: serde, std
// ============================================================================

//! ## Overview
//! A confirmation request names the key operation awaiting approval
//! ([`ConfirmationKind`]) and is tracked by an opaque [`RequestId`] that the
//! gate hands to presentation and biometric services. Services echo the id on
//! every event-surface call; events carrying a stale id are ignored, which is
//! how completed or superseded requests are deregistered.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Label substituted when a confirmation request names no facet.
pub const DEFAULT_FACET_LABEL: &str = "site";

// ============================================================================
// SECTION: Confirmation Kind
// ============================================================================

/// Key operation for which user presence must be confirmed.
///
/// # Invariants
/// - The kind only drives the human-readable prompt label; it carries no
///   protocol semantics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConfirmationKind {
    /// Credential registration with an optional requesting facet.
    Register {
        /// Requesting facet (origin) when known.
        facet: Option<String>,
    },
    /// Authentication with an optional requesting facet.
    Authenticate {
        /// Requesting facet (origin) when known.
        facet: Option<String>,
    },
}

impl ConfirmationKind {
    /// Renders the prompt text shown to the user.
    ///
    /// The facet falls back to [`DEFAULT_FACET_LABEL`] when absent.
    #[must_use]
    pub fn prompt_label(&self) -> String {
        match self {
            Self::Register {
                facet,
            } => format!("Register with {}", facet.as_deref().unwrap_or(DEFAULT_FACET_LABEL)),
            Self::Authenticate {
                facet,
            } => {
                format!("Authenticate with {}", facet.as_deref().unwrap_or(DEFAULT_FACET_LABEL))
            }
        }
    }

    /// Returns a stable label for telemetry events.
    #[must_use]
    pub const fn action_label(&self) -> &'static str {
        match self {
            Self::Register {
                ..
            } => "register",
            Self::Authenticate {
                ..
            } => "authenticate",
        }
    }
}

// ============================================================================
// SECTION: Request Identity
// ============================================================================

/// Opaque identifier for one logical confirmation request.
///
/// # Invariants
/// - Assigned monotonically by the gate; never reused within a process.
/// - Echoed verbatim by services on every event-surface call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RequestId(u64);

impl RequestId {
    /// Creates a request identifier from its raw value.
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw identifier value.
    #[must_use]
    pub const fn as_raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque reference to a prompt currently displayed by the Presentation
/// Service.
///
/// # Invariants
/// - Issued by the Presentation Service at delivery confirmation; the gate
///   never interprets the value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PromptHandle(String);

impl PromptHandle {
    /// Creates a prompt handle from a service-issued token.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the service-issued token.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// ============================================================================
// SECTION: Lifecycle Phase
// ============================================================================

/// Lifecycle phase of a pending confirmation request.
///
/// # Invariants
/// - Phases advance forward only; a completed request never re-enters the
///   gate slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestPhase {
    /// Prompt display was requested but delivery is unconfirmed.
    AwaitingDisplay,
    /// Prompt is displayed (or a platform check is running); awaiting the
    /// user's action.
    AwaitingUserAction,
    /// A terminal result was delivered to the caller.
    Completed,
}

// ============================================================================
// SECTION: Confirmation Strategy
// ============================================================================

/// Mechanism used to obtain the presence confirmation.
///
/// # Invariants
/// - Variants are stable for serialization and configuration matching.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfirmationStrategy {
    /// Prompt-based confirmation via the Presentation Service.
    #[default]
    Prompt,
    /// Biometric confirmation via the platform authentication service.
    Biometric,
}
