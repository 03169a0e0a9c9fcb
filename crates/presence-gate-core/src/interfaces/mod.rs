// crates/presence-gate-core/src/interfaces/mod.rs
// ============================================================================
// Module: Presence Gate Interfaces
// Description: Service-agnostic interfaces for prompt display and biometrics.
// Purpose: Define the contract surfaces the gate consumes from its hosts.
// Dependencies: crate::core, thiserror
// ============================================================================

//! ## Overview
//! The gate arbitrates and times out confirmation requests; it never renders
//! UI or talks to platform authentication itself. Hosts provide a
//! [`PresentationService`] (and optionally a [`BiometricService`]) and echo
//! the gate-issued [`RequestId`] back through the gate's event surface as
//! user interaction is observed. Implementations must fail closed: any error
//! surfaces to the caller as a denied confirmation.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::PromptHandle;
use crate::core::RequestId;

// ============================================================================
// SECTION: Caller Callback
// ============================================================================

/// Caller callback receiving the terminal confirmation result.
///
/// Invoked exactly once per request, on whatever context triggers resolution.
pub type PresenceCallback = Box<dyn FnOnce(bool) + Send + 'static>;

// ============================================================================
// SECTION: Prompt Specification
// ============================================================================

/// Prompt content handed to the Presentation Service.
///
/// # Invariants
/// - `text` is derived from the confirmation kind; labels come from gate
///   tuning and are never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptSpec {
    /// Human-readable prompt text naming the requested action.
    pub text: String,
    /// Label of the approval action.
    pub accept_label: String,
    /// Label of the rejection action.
    pub reject_label: String,
}

// ============================================================================
// SECTION: Presentation Service
// ============================================================================

/// Errors reported by Presentation Service implementations.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum PresentationError {
    /// The prompt could not be shown to the user.
    #[error("prompt display failed: {0}")]
    DisplayFailed(String),
    /// The prompt could not be removed.
    #[error("prompt removal failed: {0}")]
    RemoveFailed(String),
    /// Prompt visibility could not be determined.
    #[error("prompt visibility unavailable: {0}")]
    VisibilityUnavailable(String),
}

/// Renders confirmation prompts and reports user interaction.
///
/// Implementations deliver results asynchronously through the gate's event
/// surface, echoing the [`RequestId`] passed to [`PresentationService::display`]:
/// delivery confirmation via `on_presented`, suppression via
/// `on_presentation_failed`, and activation via `on_user_accepted` /
/// `on_user_rejected`.
pub trait PresentationService: Send + Sync {
    /// Requests that a prompt be shown for the identified request.
    ///
    /// # Errors
    ///
    /// Returns [`PresentationError`] when the display request cannot be
    /// issued at all; asynchronous suppression is reported through the event
    /// surface instead.
    fn display(&self, request_id: RequestId, prompt: &PromptSpec) -> Result<(), PresentationError>;

    /// Removes a displayed prompt. Best-effort; failures never block request
    /// completion.
    ///
    /// # Errors
    ///
    /// Returns [`PresentationError`] when removal fails.
    fn remove(&self, handle: &PromptHandle) -> Result<(), PresentationError>;

    /// Reports whether the identified prompt is still displayed to the user.
    ///
    /// # Errors
    ///
    /// Returns [`PresentationError`] when visibility cannot be determined.
    fn is_still_displayed(&self, handle: &PromptHandle) -> Result<bool, PresentationError>;
}

// ============================================================================
// SECTION: Biometric Service
// ============================================================================

/// Errors reported by platform biometric authentication.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum BiometricError {
    /// Biometric authentication is unavailable on this platform.
    #[error("platform authentication unsupported")]
    Unsupported,
    /// The platform authentication service reported an error.
    #[error("platform authentication failed: {0}")]
    Platform(String),
}

/// Delegates the presence question to platform biometric authentication.
///
/// Implementations report the asynchronous verdict through the gate's
/// `on_biometric_result`, echoing the [`RequestId`] passed to
/// [`BiometricService::evaluate`]. Fallback to a passphrase must be disabled;
/// only biometric verification answers the presence question.
pub trait BiometricService: Send + Sync {
    /// Starts a biometric presence evaluation with the given user-facing
    /// reason.
    ///
    /// # Errors
    ///
    /// Returns [`BiometricError`] when the evaluation cannot be started.
    fn evaluate(&self, request_id: RequestId, reason: &str) -> Result<(), BiometricError>;
}
