// crates/presence-gate-core/src/core/mod.rs
// ============================================================================
// Module: Presence Gate Core Model
// Description: Request vocabulary, outcomes, and time values.
// Purpose: Group the data model shared by interfaces and runtime.
// Dependencies: crate submodules
// ============================================================================

//! ## Overview
//! Core model types for the presence gate: confirmation kinds and request
//! identity, terminal outcomes with the internal denial taxonomy, and the
//! monotonic time values used for timeout tracking.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod outcome;
pub mod request;
pub mod time;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use outcome::DenialCause;
pub use outcome::Resolution;
pub use request::ConfirmationKind;
pub use request::ConfirmationStrategy;
pub use request::DEFAULT_FACET_LABEL;
pub use request::PromptHandle;
pub use request::RequestId;
pub use request::RequestPhase;
pub use time::Clock;
pub use time::MonotonicTime;
pub use time::SystemClock;
