// crates/presence-gate-core/src/runtime/mod.rs
// ============================================================================
// Module: Presence Gate Runtime
// Description: Gate arbitration runtime and watchdog.
// Purpose: Group the runtime components behind one namespace.
// Dependencies: crate submodules
// ============================================================================

//! ## Overview
//! Runtime components of the presence gate: the single-flight arbitration
//! core and the periodic watchdog enforcing timeout and dismissal detection.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod gate;
pub mod watchdog;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use gate::DEFAULT_ACCEPT_LABEL;
pub use gate::DEFAULT_REJECT_LABEL;
pub use gate::GateBuildError;
pub use gate::GateTuning;
pub use gate::PresenceGate;
pub use gate::PresenceGateBuilder;
pub use gate::USER_PRESENCE_TIMEOUT_MS;
pub use gate::WATCHDOG_POLL_INTERVAL_MS;
pub use gate::WatchdogMode;
pub use watchdog::WatchdogDirective;
