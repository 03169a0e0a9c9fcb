// crates/presence-gate-config/src/lib.rs
// ============================================================================
// Module: Presence Gate Config Library
// Description: Canonical configuration model, TOML loading, and validation.
// Purpose: Configure gate strategy, skip flag, timing, and prompt labels.
// Dependencies: presence-gate-core, serde, thiserror, toml
// ============================================================================

//! ## Overview
//! Deployments configure the presence gate through a small TOML document:
//! which confirmation strategy answers the presence question, whether the
//! process-wide skip flag starts set (automation contexts only), the timeout
//! and watchdog tuning, and the prompt button labels. Validation fails closed;
//! an invalid document never produces a gate.
//!
//! Missing fields fall back to the core defaults (10 s timeout, 100 ms poll,
//! prompt strategy, skip unset).

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Path;

use presence_gate_core::ConfirmationStrategy;
use presence_gate_core::DEFAULT_ACCEPT_LABEL;
use presence_gate_core::DEFAULT_REJECT_LABEL;
use presence_gate_core::GateTuning;
use presence_gate_core::PresenceGateBuilder;
use presence_gate_core::USER_PRESENCE_TIMEOUT_MS;
use presence_gate_core::WATCHDOG_POLL_INTERVAL_MS;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Config Errors
// ============================================================================

/// Errors produced while loading or validating gate configuration.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file could not be read.
    #[error("config io error: {0}")]
    Io(String),
    /// Configuration document failed to parse.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Configuration values are out of range.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Configuration Model
// ============================================================================

/// Gate configuration loaded from TOML.
///
/// # Invariants
/// - `validate` holds for every value constructed through the loaders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GateConfig {
    /// Confirmation strategy answering the presence question.
    #[serde(default)]
    pub strategy: ConfirmationStrategy,
    /// Initial state of the process-wide skip flag.
    #[serde(default)]
    pub skip: bool,
    /// Hard timeout bound in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Watchdog poll interval in milliseconds.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// Label of the approval action.
    #[serde(default = "default_accept_label")]
    pub accept_label: String,
    /// Label of the rejection action.
    #[serde(default = "default_reject_label")]
    pub reject_label: String,
}

/// Default timeout bound.
fn default_timeout_ms() -> u64 {
    USER_PRESENCE_TIMEOUT_MS
}

/// Default watchdog poll interval.
fn default_poll_interval_ms() -> u64 {
    WATCHDOG_POLL_INTERVAL_MS
}

/// Default approval label.
fn default_accept_label() -> String {
    DEFAULT_ACCEPT_LABEL.to_string()
}

/// Default rejection label.
fn default_reject_label() -> String {
    DEFAULT_REJECT_LABEL.to_string()
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            strategy: ConfirmationStrategy::Prompt,
            skip: false,
            timeout_ms: default_timeout_ms(),
            poll_interval_ms: default_poll_interval_ms(),
            accept_label: default_accept_label(),
            reject_label: default_reject_label(),
        }
    }
}

impl GateConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when parsing fails or values are out of range.
    pub fn from_toml_str(document: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(document).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses, and validates a TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file cannot be read, parsing fails,
    /// or values are out of range.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let document =
            std::fs::read_to_string(path).map_err(|err| ConfigError::Io(err.to_string()))?;
        Self::from_toml_str(&document)
    }

    /// Validates configuration values, failing closed.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when any value is out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_ms == 0 {
            return Err(ConfigError::Invalid("timeout_ms must be nonzero".to_string()));
        }
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::Invalid("poll_interval_ms must be nonzero".to_string()));
        }
        if self.poll_interval_ms > self.timeout_ms {
            return Err(ConfigError::Invalid(
                "poll_interval_ms must not exceed timeout_ms".to_string(),
            ));
        }
        if self.accept_label.trim().is_empty() {
            return Err(ConfigError::Invalid("accept_label must be nonempty".to_string()));
        }
        if self.reject_label.trim().is_empty() {
            return Err(ConfigError::Invalid("reject_label must be nonempty".to_string()));
        }
        Ok(())
    }

    /// Returns the gate tuning described by this configuration.
    #[must_use]
    pub fn tuning(&self) -> GateTuning {
        GateTuning {
            timeout_ms: self.timeout_ms,
            poll_interval_ms: self.poll_interval_ms,
            accept_label: self.accept_label.clone(),
            reject_label: self.reject_label.clone(),
        }
    }

    /// Applies this configuration to a gate builder.
    #[must_use]
    pub fn apply(&self, builder: PresenceGateBuilder) -> PresenceGateBuilder {
        builder.with_tuning(self.tuning()).with_strategy(self.strategy).with_skip(self.skip)
    }
}
