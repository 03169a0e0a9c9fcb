// crates/presence-gate-core/src/runtime/watchdog.rs
// ============================================================================
// Module: Presence Watchdog
// Description: Cancellable periodic tick driving timeout and dismissal checks.
// Purpose: Tie the polling task to the lifetime of one presented request.
// Dependencies: crate::runtime::gate, std
// ============================================================================

//! ## Overview
//! The underlying platforms give no push-based "dismissed" event, so the gate
//! polls: a watchdog ticks at the configured interval and asks the gate to
//! check elapsed time and prompt visibility. Cancellation is implicit; once
//! the request leaves the slot the next tick observes a stale id and the task
//! exits, so a stale timer can never fire against a newer request.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::core::RequestId;
use crate::runtime::gate::PresenceGate;

// ============================================================================
// SECTION: Watchdog Directive
// ============================================================================

/// Verdict of one watchdog tick.
///
/// # Invariants
/// - `Stop` is terminal for the tick source; no further ticks may be issued
///   for the same request id.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchdogDirective {
    /// The request is still pending; keep ticking.
    Continue,
    /// The request resolved or the id is stale; cancel the tick source.
    Stop,
}

// ============================================================================
// SECTION: Spawned Watchdog
// ============================================================================

/// Spawns a polling thread ticking [`PresenceGate::on_timeout_check`] for
/// `id` every `interval` until the gate answers [`WatchdogDirective::Stop`].
///
/// Returns `false` when the thread could not be spawned; the caller must
/// then resolve the request itself.
#[must_use]
pub(crate) fn spawn(gate: &Arc<PresenceGate>, id: RequestId, interval: Duration) -> bool {
    let worker = Arc::clone(gate);
    thread::Builder::new()
        .name(format!("presence-watchdog-{id}"))
        .spawn(move || run(worker, id, interval))
        .is_ok()
}

/// Tick loop for one presented request.
fn run(gate: Arc<PresenceGate>, id: RequestId, interval: Duration) {
    loop {
        thread::sleep(interval);
        if gate.on_timeout_check(id) == WatchdogDirective::Stop {
            break;
        }
    }
}
