// crates/presence-gate-core/src/telemetry.rs
// ============================================================================
// Module: Gate Telemetry
// Description: Observability hooks for confirmation request lifecycles.
// Purpose: Expose the internal denial taxonomy to diagnostics without hard deps.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! The caller boundary collapses every outcome into a boolean, so telemetry
//! is where the richer internal taxonomy stays visible. This module exposes a
//! thin event interface in the same dependency-light shape as the rest of the
//! workspace: hosts plug in structured logging or metrics without the gate
//! taking a hard dependency on either.
//! Security posture: events carry action labels and cause labels only, never
//! facet strings or other caller data.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::DenialCause;
use crate::core::RequestId;

// ============================================================================
// SECTION: Gate Events
// ============================================================================

/// Lifecycle stage reported by a gate event.
///
/// # Invariants
/// - Variants are stable for telemetry labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateStage {
    /// A confirmation request was accepted by the gate.
    Requested,
    /// The request was resolved synchronously by the skip flag.
    Skipped,
    /// The Presentation Service confirmed prompt delivery.
    Presented,
    /// The request reached its terminal resolution.
    Resolved {
        /// Caller-facing boolean result.
        confirmed: bool,
        /// Denial cause when the request was denied.
        cause: Option<DenialCause>,
        /// Milliseconds between prompt delivery and resolution, when a
        /// prompt was displayed.
        waited_ms: Option<u64>,
    },
}

/// Gate lifecycle event payload.
///
/// # Invariants
/// - `request_id` identifies one logical request across its events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateEvent {
    /// Request identifier.
    pub request_id: RequestId,
    /// Stable action label (`register` or `authenticate`).
    pub action: &'static str,
    /// Lifecycle stage.
    pub stage: GateStage,
}

// ============================================================================
// SECTION: Telemetry Sink
// ============================================================================

/// Receives gate lifecycle events.
pub trait TelemetrySink: Send + Sync {
    /// Records a gate event.
    fn record(&self, event: &GateEvent);
}

/// Telemetry sink that discards all events.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTelemetry;

impl TelemetrySink for NoopTelemetry {
    fn record(&self, _event: &GateEvent) {}
}
