// crates/presence-gate-core/src/core/outcome.rs
// ============================================================================
// Module: Presence Gate Outcome Model
// Description: Terminal resolutions and the internal denial taxonomy.
// Purpose: Collapse rich failure causes into the caller-facing boolean.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Callers only learn whether the human confirmed, yes or no. Internally every
//! denial keeps its distinct cause so telemetry can report why a request
//! failed, and so a future caller surface can expose the distinction without
//! re-deriving it.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Denial Taxonomy
// ============================================================================

/// Cause of a denied confirmation request.
///
/// # Invariants
/// - Variants are stable for telemetry labeling.
/// - Every cause maps to a caller-facing `false` result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DenialCause {
    /// A newer request preempted this one.
    Superseded,
    /// The request exceeded the hard timeout bound.
    TimedOut,
    /// The prompt disappeared without a recorded activation.
    Dismissed,
    /// The user activated the prompt with anything other than approval.
    Rejected,
    /// The Presentation Service could not show or track the prompt.
    PresentationFailed,
    /// The platform authentication service failed or is unsupported.
    PlatformAuthError,
}

impl DenialCause {
    /// Returns a stable label for the cause.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Superseded => "superseded",
            Self::TimedOut => "timed_out",
            Self::Dismissed => "dismissed",
            Self::Rejected => "rejected",
            Self::PresentationFailed => "presentation_failed",
            Self::PlatformAuthError => "platform_auth_error",
        }
    }
}

// ============================================================================
// SECTION: Resolution
// ============================================================================

/// Terminal resolution of a confirmation request.
///
/// # Invariants
/// - Exactly one resolution is ever produced per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Resolution {
    /// The user explicitly approved the operation.
    Confirmed,
    /// The request was denied for the recorded cause.
    Denied {
        /// Cause of the denial.
        cause: DenialCause,
    },
}

impl Resolution {
    /// Returns the boolean delivered to the caller.
    #[must_use]
    pub const fn as_bool(self) -> bool {
        matches!(self, Self::Confirmed)
    }

    /// Returns the denial cause when the request was denied.
    #[must_use]
    pub const fn cause(self) -> Option<DenialCause> {
        match self {
            Self::Confirmed => None,
            Self::Denied {
                cause,
            } => Some(cause),
        }
    }
}
