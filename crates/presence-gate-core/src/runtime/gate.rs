// crates/presence-gate-core/src/runtime/gate.rs
// ============================================================================
// Module: Presence Gate Runtime
// Description: Single-flight arbitration for user-presence confirmation.
// Purpose: Deliver exactly one terminal result per request under concurrency.
// Dependencies: crate::core, crate::interfaces, crate::telemetry, thiserror
// ============================================================================

//! ## Overview
//! [`PresenceGate`] owns the single pending-request slot. A new request
//! supersedes the current one (its callback fires `false` before the new
//! prompt is requested), the watchdog enforces the hard timeout and detects
//! external dismissal, and every path funnels through one completion routine
//! that consumes the stored callback.
//! Invariants:
//! - At most one pending request exists at any instant.
//! - The slot mutex is never held across service calls or caller callbacks.
//! - A request leaves the slot exactly once, and leaving the slot is the only
//!   way its callback fires.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;
use std::sync::Weak;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;
use std::time::Duration;

use thiserror::Error;

use crate::core::Clock;
use crate::core::ConfirmationKind;
use crate::core::ConfirmationStrategy;
use crate::core::DenialCause;
use crate::core::MonotonicTime;
use crate::core::PromptHandle;
use crate::core::RequestId;
use crate::core::RequestPhase;
use crate::core::Resolution;
use crate::core::SystemClock;
use crate::interfaces::BiometricError;
use crate::interfaces::BiometricService;
use crate::interfaces::PresenceCallback;
use crate::interfaces::PresentationService;
use crate::interfaces::PromptSpec;
use crate::runtime::watchdog;
use crate::runtime::watchdog::WatchdogDirective;
use crate::telemetry::GateEvent;
use crate::telemetry::GateStage;
use crate::telemetry::NoopTelemetry;
use crate::telemetry::TelemetrySink;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Hard bound on the wait for a user action, in milliseconds.
pub const USER_PRESENCE_TIMEOUT_MS: u64 = 10_000;

/// Interval between watchdog ticks, in milliseconds.
pub const WATCHDOG_POLL_INTERVAL_MS: u64 = 100;

/// Default label of the approval action.
pub const DEFAULT_ACCEPT_LABEL: &str = "Approve";

/// Default label of the rejection action.
pub const DEFAULT_REJECT_LABEL: &str = "Reject";

// ============================================================================
// SECTION: Tuning
// ============================================================================

/// Timing and prompt-label tuning for the gate.
///
/// # Invariants
/// - `timeout_ms` and `poll_interval_ms` are nonzero and
///   `poll_interval_ms <= timeout_ms`; labels are nonempty. Enforced by
///   [`PresenceGateBuilder::build`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateTuning {
    /// Hard timeout bound in milliseconds.
    pub timeout_ms: u64,
    /// Watchdog poll interval in milliseconds.
    pub poll_interval_ms: u64,
    /// Label of the approval action.
    pub accept_label: String,
    /// Label of the rejection action.
    pub reject_label: String,
}

impl Default for GateTuning {
    fn default() -> Self {
        Self {
            timeout_ms: USER_PRESENCE_TIMEOUT_MS,
            poll_interval_ms: WATCHDOG_POLL_INTERVAL_MS,
            accept_label: DEFAULT_ACCEPT_LABEL.to_string(),
            reject_label: DEFAULT_REJECT_LABEL.to_string(),
        }
    }
}

// ============================================================================
// SECTION: Watchdog Mode
// ============================================================================

/// How watchdog ticks are driven.
///
/// # Invariants
/// - `External` hosts must call [`PresenceGate::on_timeout_check`] at the
///   configured poll interval while a prompt is displayed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WatchdogMode {
    /// The gate spawns a polling thread per presented request.
    #[default]
    Spawned,
    /// The host drives ticks through the event surface.
    External,
}

// ============================================================================
// SECTION: Pending Request
// ============================================================================

/// The single record of confirmation work in flight.
///
/// Never exposed by reference to callers; it lives only inside the gate slot
/// and is consumed by completion.
struct PendingRequest {
    /// Identifier echoed by the event surface.
    id: RequestId,
    /// Confirmation kind driving prompt text and telemetry labels.
    kind: ConfirmationKind,
    /// Caller callback, consumed exactly once.
    callback: PresenceCallback,
    /// Lifecycle phase.
    phase: RequestPhase,
    /// Instant of confirmed prompt delivery (or biometric start).
    started_at: Option<MonotonicTime>,
    /// Handle of the displayed prompt, once delivery is confirmed.
    prompt_handle: Option<PromptHandle>,
}

// ============================================================================
// SECTION: Build Errors
// ============================================================================

/// Errors returned when building a [`PresenceGate`].
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum GateBuildError {
    /// Biometric strategy was selected without a biometric service.
    #[error("biometric strategy requires a biometric service")]
    BiometricUnavailable,
    /// Tuning values are out of range.
    #[error("invalid gate tuning: {0}")]
    InvalidTuning(String),
}

// ============================================================================
// SECTION: Builder
// ============================================================================

/// Builder for a [`PresenceGate`].
///
/// # Invariants
/// - `build` succeeds only when tuning is valid and the selected strategy is
///   backed by a configured service.
pub struct PresenceGateBuilder {
    /// Presentation service showing prompts.
    presentation: Arc<dyn PresentationService>,
    /// Optional platform biometric service.
    biometric: Option<Arc<dyn BiometricService>>,
    /// Telemetry sink for lifecycle events.
    telemetry: Arc<dyn TelemetrySink>,
    /// Clock supplying monotonic instants.
    clock: Arc<dyn Clock>,
    /// Timing and label tuning.
    tuning: GateTuning,
    /// Confirmation strategy selected for `request`.
    strategy: ConfirmationStrategy,
    /// Watchdog drive mode.
    watchdog_mode: WatchdogMode,
    /// Initial state of the process-wide skip flag.
    skip: bool,
}

impl PresenceGateBuilder {
    /// Creates a builder around the required presentation service.
    #[must_use]
    pub fn new(presentation: Arc<dyn PresentationService>) -> Self {
        Self {
            presentation,
            biometric: None,
            telemetry: Arc::new(NoopTelemetry),
            clock: Arc::new(SystemClock::default()),
            tuning: GateTuning::default(),
            strategy: ConfirmationStrategy::Prompt,
            watchdog_mode: WatchdogMode::Spawned,
            skip: false,
        }
    }

    /// Registers a platform biometric service.
    #[must_use]
    pub fn with_biometric(mut self, biometric: Arc<dyn BiometricService>) -> Self {
        self.biometric = Some(biometric);
        self
    }

    /// Registers a telemetry sink.
    #[must_use]
    pub fn with_telemetry(mut self, telemetry: Arc<dyn TelemetrySink>) -> Self {
        self.telemetry = telemetry;
        self
    }

    /// Overrides the clock source.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Overrides timing and label tuning.
    #[must_use]
    pub fn with_tuning(mut self, tuning: GateTuning) -> Self {
        self.tuning = tuning;
        self
    }

    /// Selects the confirmation strategy used by `request`.
    #[must_use]
    pub const fn with_strategy(mut self, strategy: ConfirmationStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Selects how watchdog ticks are driven.
    #[must_use]
    pub const fn with_watchdog_mode(mut self, mode: WatchdogMode) -> Self {
        self.watchdog_mode = mode;
        self
    }

    /// Sets the initial state of the process-wide skip flag.
    #[must_use]
    pub const fn with_skip(mut self, skip: bool) -> Self {
        self.skip = skip;
        self
    }

    /// Builds the gate.
    ///
    /// # Errors
    ///
    /// Returns [`GateBuildError`] when tuning is invalid or the biometric
    /// strategy lacks a biometric service.
    pub fn build(self) -> Result<Arc<PresenceGate>, GateBuildError> {
        if self.tuning.timeout_ms == 0 {
            return Err(GateBuildError::InvalidTuning("timeout must be nonzero".to_string()));
        }
        if self.tuning.poll_interval_ms == 0 {
            return Err(GateBuildError::InvalidTuning(
                "poll interval must be nonzero".to_string(),
            ));
        }
        if self.tuning.poll_interval_ms > self.tuning.timeout_ms {
            return Err(GateBuildError::InvalidTuning(
                "poll interval must not exceed timeout".to_string(),
            ));
        }
        if self.tuning.accept_label.is_empty() || self.tuning.reject_label.is_empty() {
            return Err(GateBuildError::InvalidTuning("prompt labels must be nonempty".to_string()));
        }
        if self.strategy == ConfirmationStrategy::Biometric && self.biometric.is_none() {
            return Err(GateBuildError::BiometricUnavailable);
        }
        Ok(Arc::new_cyclic(|self_ref| PresenceGate {
            presentation: self.presentation,
            biometric: self.biometric,
            telemetry: self.telemetry,
            clock: self.clock,
            tuning: self.tuning,
            strategy: self.strategy,
            watchdog_mode: self.watchdog_mode,
            skip_all: AtomicBool::new(self.skip),
            next_request_id: AtomicU64::new(0),
            current: Mutex::new(None),
            self_ref: self_ref.clone(),
        }))
    }
}

// ============================================================================
// SECTION: Presence Gate
// ============================================================================

/// Single-flight user-presence confirmation gate.
///
/// # Invariants
/// - At most one [`PendingRequest`] occupies the slot at any instant.
/// - Supersession resolves the previous holder with `false` before the new
///   prompt is requested.
/// - Event-surface calls carrying a stale [`RequestId`] are no-ops.
pub struct PresenceGate {
    /// Presentation service showing prompts.
    presentation: Arc<dyn PresentationService>,
    /// Optional platform biometric service.
    biometric: Option<Arc<dyn BiometricService>>,
    /// Telemetry sink for lifecycle events.
    telemetry: Arc<dyn TelemetrySink>,
    /// Clock supplying monotonic instants.
    clock: Arc<dyn Clock>,
    /// Timing and label tuning.
    tuning: GateTuning,
    /// Confirmation strategy used by `request`.
    strategy: ConfirmationStrategy,
    /// Watchdog drive mode.
    watchdog_mode: WatchdogMode,
    /// Process-wide skip flag for non-interactive modes.
    skip_all: AtomicBool,
    /// Monotonic request identifier source.
    next_request_id: AtomicU64,
    /// The single pending-request slot.
    current: Mutex<Option<PendingRequest>>,
    /// Weak self-handle used to hand the gate to spawned watchdogs.
    self_ref: Weak<Self>,
}

impl PresenceGate {
    // ------------------------------------------------------------------
    // Caller surface
    // ------------------------------------------------------------------

    /// Starts a confirmation request for `kind`.
    ///
    /// Returns immediately; the terminal boolean arrives later through
    /// `callback`, invoked exactly once. When the process-wide skip flag or
    /// `skip_once` is set the callback fires synchronously with `true` and no
    /// service is contacted. Any currently pending request is resolved with
    /// `false` before the new prompt is requested.
    pub fn request(&self, kind: ConfirmationKind, skip_once: bool, callback: PresenceCallback) {
        if skip_once || self.skip_all.load(Ordering::Relaxed) {
            let id = self.next_id();
            self.telemetry.record(&GateEvent {
                request_id: id,
                action: kind.action_label(),
                stage: GateStage::Skipped,
            });
            callback(true);
            return;
        }
        match self.strategy {
            ConfirmationStrategy::Prompt => self.start_prompt(kind, callback),
            ConfirmationStrategy::Biometric => self.start_biometric(kind, callback),
        }
    }

    /// Starts a biometric confirmation regardless of the configured strategy.
    ///
    /// Honors the single-flight rule: any pending request (prompt-based or
    /// biometric) is resolved with `false` first. Without a configured
    /// biometric service the request resolves with `false` immediately.
    pub fn request_biometric(&self, kind: ConfirmationKind, callback: PresenceCallback) {
        self.start_biometric(kind, callback);
    }

    /// Sets the process-wide skip flag.
    pub fn set_skip(&self, skip: bool) {
        self.skip_all.store(skip, Ordering::Relaxed);
    }

    /// Returns the process-wide skip flag.
    #[must_use]
    pub fn skip(&self) -> bool {
        self.skip_all.load(Ordering::Relaxed)
    }

    /// Presentation policy hook: prompts are always shown, even while the
    /// host application is foregrounded. A security confirmation is never
    /// silently suppressed.
    #[must_use]
    pub const fn should_present(&self) -> bool {
        true
    }

    /// Returns the identifier of the currently pending request, if any.
    #[must_use]
    pub fn current_request_id(&self) -> Option<RequestId> {
        self.lock_slot().as_ref().map(|request| request.id)
    }

    // ------------------------------------------------------------------
    // Event surface
    // ------------------------------------------------------------------

    /// Reports confirmed prompt delivery for `id`.
    ///
    /// Transitions the request to awaiting the user's action, records the
    /// prompt handle and delivery instant, and starts timeout/dismissal
    /// polling. Stale ids and repeated delivery reports do not change gate
    /// state, but the delivered prompt no longer belongs to any pending
    /// request and is removed so it cannot stay on screen.
    pub fn on_presented(&self, id: RequestId, handle: PromptHandle) {
        let now = self.clock.now();
        let action = {
            let mut slot = self.lock_slot();
            match slot.as_mut() {
                Some(request)
                    if request.id == id && request.phase == RequestPhase::AwaitingDisplay =>
                {
                    request.phase = RequestPhase::AwaitingUserAction;
                    request.prompt_handle = Some(handle.clone());
                    request.started_at = Some(now);
                    Some(request.kind.action_label())
                }
                _ => None,
            }
        };
        let Some(action) = action else {
            let _ = self.presentation.remove(&handle);
            return;
        };
        self.telemetry.record(&GateEvent {
            request_id: id,
            action,
            stage: GateStage::Presented,
        });
        if self.watchdog_mode == WatchdogMode::Spawned
            && let Some(gate) = self.self_ref.upgrade()
        {
            let interval = Duration::from_millis(self.tuning.poll_interval_ms);
            if !watchdog::spawn(&gate, id, interval) {
                self.resolve(id, Resolution::Denied {
                    cause: DenialCause::PresentationFailed,
                });
            }
        }
    }

    /// Reports that the platform suppressed the prompt for `id`.
    pub fn on_presentation_failed(&self, id: RequestId) {
        self.resolve(id, Resolution::Denied {
            cause: DenialCause::PresentationFailed,
        });
    }

    /// Reports that the user approved the prompt for `id`.
    pub fn on_user_accepted(&self, id: RequestId) {
        self.resolve(id, Resolution::Confirmed);
    }

    /// Reports a non-approval activation for `id`.
    ///
    /// Every activation other than an explicit approve is a rejection; there
    /// are no partial states.
    pub fn on_user_rejected(&self, id: RequestId) {
        self.resolve(id, Resolution::Denied {
            cause: DenialCause::Rejected,
        });
    }

    /// Reports an observed dismissal of the prompt for `id`.
    pub fn on_dismissed(&self, id: RequestId) {
        self.resolve(id, Resolution::Denied {
            cause: DenialCause::Dismissed,
        });
    }

    /// Watchdog tick for `id`: enforces the timeout bound and detects
    /// external dismissal.
    ///
    /// Returns [`WatchdogDirective::Stop`] once the id is stale or the
    /// request resolved, cancelling the periodic task. The visibility query
    /// runs outside the slot lock.
    pub fn on_timeout_check(&self, id: RequestId) -> WatchdogDirective {
        let now = self.clock.now();
        let (handle, started_at) = {
            let slot = self.lock_slot();
            match slot.as_ref() {
                Some(request)
                    if request.id == id && request.phase == RequestPhase::AwaitingUserAction =>
                {
                    match (&request.prompt_handle, request.started_at) {
                        (Some(handle), Some(started_at)) => (handle.clone(), started_at),
                        _ => return WatchdogDirective::Stop,
                    }
                }
                _ => return WatchdogDirective::Stop,
            }
        };
        if now.saturating_millis_since(started_at) >= self.tuning.timeout_ms {
            self.resolve(id, Resolution::Denied {
                cause: DenialCause::TimedOut,
            });
            return WatchdogDirective::Stop;
        }
        match self.presentation.is_still_displayed(&handle) {
            Ok(true) => WatchdogDirective::Continue,
            Ok(false) => {
                self.resolve(id, Resolution::Denied {
                    cause: DenialCause::Dismissed,
                });
                WatchdogDirective::Stop
            }
            Err(_) => {
                self.resolve(id, Resolution::Denied {
                    cause: DenialCause::PresentationFailed,
                });
                WatchdogDirective::Stop
            }
        }
    }

    /// Reports the platform biometric verdict for `id`.
    pub fn on_biometric_result(&self, id: RequestId, result: Result<bool, BiometricError>) {
        let resolution = match result {
            Ok(true) => Resolution::Confirmed,
            Ok(false) => Resolution::Denied {
                cause: DenialCause::Rejected,
            },
            Err(_) => Resolution::Denied {
                cause: DenialCause::PlatformAuthError,
            },
        };
        self.resolve(id, resolution);
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    /// Locks the pending-request slot, recovering from poisoning.
    fn lock_slot(&self) -> MutexGuard<'_, Option<PendingRequest>> {
        self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Allocates the next request identifier.
    fn next_id(&self) -> RequestId {
        RequestId::from_raw(self.next_request_id.fetch_add(1, Ordering::Relaxed).wrapping_add(1))
    }

    /// Resolves the current request with `false` if one is pending.
    fn supersede_current(&self) {
        let previous = self.lock_slot().take();
        if let Some(previous) = previous {
            self.finish(previous, Resolution::Denied {
                cause: DenialCause::Superseded,
            });
        }
    }

    /// Installs `request` as the unique current request.
    ///
    /// A request installed by a racing caller in the window after
    /// [`Self::supersede_current`] is displaced and resolved as superseded,
    /// never dropped silently.
    fn install(&self, request: PendingRequest) {
        let displaced = self.lock_slot().replace(request);
        if let Some(previous) = displaced {
            self.finish(previous, Resolution::Denied {
                cause: DenialCause::Superseded,
            });
        }
    }

    /// Takes the current request out of the slot when its id matches.
    fn take_current_if(&self, id: RequestId) -> Option<PendingRequest> {
        let mut slot = self.lock_slot();
        match slot.as_ref() {
            Some(request) if request.id == id => slot.take(),
            _ => None,
        }
    }

    /// Resolves the request identified by `id`, ignoring stale ids.
    fn resolve(&self, id: RequestId, resolution: Resolution) {
        if let Some(request) = self.take_current_if(id) {
            self.finish(request, resolution);
        }
    }

    /// Completes a request already removed from the slot: best-effort prompt
    /// removal, telemetry, then the caller callback, exactly once.
    fn finish(&self, mut request: PendingRequest, resolution: Resolution) {
        request.phase = RequestPhase::Completed;
        let waited_ms = request
            .started_at
            .map(|started_at| self.clock.now().saturating_millis_since(started_at));
        if let Some(handle) = request.prompt_handle.take() {
            let _ = self.presentation.remove(&handle);
        }
        self.telemetry.record(&GateEvent {
            request_id: request.id,
            action: request.kind.action_label(),
            stage: GateStage::Resolved {
                confirmed: resolution.as_bool(),
                cause: resolution.cause(),
                waited_ms,
            },
        });
        (request.callback)(resolution.as_bool());
    }

    /// Starts a prompt-based confirmation.
    fn start_prompt(&self, kind: ConfirmationKind, callback: PresenceCallback) {
        self.supersede_current();
        let id = self.next_id();
        let prompt = PromptSpec {
            text: kind.prompt_label(),
            accept_label: self.tuning.accept_label.clone(),
            reject_label: self.tuning.reject_label.clone(),
        };
        self.telemetry.record(&GateEvent {
            request_id: id,
            action: kind.action_label(),
            stage: GateStage::Requested,
        });
        self.install(PendingRequest {
            id,
            kind,
            callback,
            phase: RequestPhase::AwaitingDisplay,
            started_at: None,
            prompt_handle: None,
        });
        if self.presentation.display(id, &prompt).is_err() {
            self.resolve(id, Resolution::Denied {
                cause: DenialCause::PresentationFailed,
            });
        }
    }

    /// Starts a biometric confirmation.
    fn start_biometric(&self, kind: ConfirmationKind, callback: PresenceCallback) {
        self.supersede_current();
        let id = self.next_id();
        let reason = kind.prompt_label();
        self.telemetry.record(&GateEvent {
            request_id: id,
            action: kind.action_label(),
            stage: GateStage::Requested,
        });
        self.install(PendingRequest {
            id,
            kind,
            callback,
            phase: RequestPhase::AwaitingUserAction,
            started_at: Some(self.clock.now()),
            prompt_handle: None,
        });
        let Some(biometric) = self.biometric.as_ref() else {
            self.resolve(id, Resolution::Denied {
                cause: DenialCause::PlatformAuthError,
            });
            return;
        };
        if biometric.evaluate(id, &reason).is_err() {
            self.resolve(id, Resolution::Denied {
                cause: DenialCause::PlatformAuthError,
            });
        }
    }
}
