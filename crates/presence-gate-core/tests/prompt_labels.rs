// crates/presence-gate-core/tests/prompt_labels.rs
// ============================================================================
// Module: Prompt Label Tests
// Description: Validate prompt text rendering and label plumbing.
// Purpose: Ensure users see the action and facet they are approving.
// Dependencies: presence-gate-core
// ============================================================================

//! ## Overview
//! Verifies the facet fallback in prompt labels and that configured button
//! labels reach the Presentation Service unchanged.

use std::sync::Arc;
use std::sync::Mutex;

use presence_gate_core::ConfirmationKind;
use presence_gate_core::GateTuning;
use presence_gate_core::PresenceGateBuilder;
use presence_gate_core::PresentationError;
use presence_gate_core::PresentationService;
use presence_gate_core::PromptHandle;
use presence_gate_core::PromptSpec;
use presence_gate_core::RequestId;
use presence_gate_core::WatchdogMode;

#[test]
fn register_without_facet_falls_back_to_site() {
    let kind = ConfirmationKind::Register {
        facet: None,
    };
    assert_eq!(kind.prompt_label(), "Register with site");
}

#[test]
fn register_with_facet_names_the_facet() {
    let kind = ConfirmationKind::Register {
        facet: Some("example.org".to_string()),
    };
    assert_eq!(kind.prompt_label(), "Register with example.org");
}

#[test]
fn authenticate_without_facet_falls_back_to_site() {
    let kind = ConfirmationKind::Authenticate {
        facet: None,
    };
    assert_eq!(kind.prompt_label(), "Authenticate with site");
}

#[test]
fn authenticate_with_facet_names_the_facet() {
    let kind = ConfirmationKind::Authenticate {
        facet: Some("example.com".to_string()),
    };
    assert_eq!(kind.prompt_label(), "Authenticate with example.com");
}

#[derive(Debug, Default)]
struct SpecRecorder {
    prompts: Mutex<Vec<PromptSpec>>,
}

impl PresentationService for SpecRecorder {
    fn display(&self, _request_id: RequestId, prompt: &PromptSpec) -> Result<(), PresentationError> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.clone());
        }
        Ok(())
    }

    fn remove(&self, _handle: &PromptHandle) -> Result<(), PresentationError> {
        Ok(())
    }

    fn is_still_displayed(&self, _handle: &PromptHandle) -> Result<bool, PresentationError> {
        Ok(true)
    }
}

#[test]
fn configured_labels_reach_the_service() -> Result<(), Box<dyn std::error::Error>> {
    let presentation = Arc::new(SpecRecorder::default());
    let gate = PresenceGateBuilder::new(Arc::clone(&presentation) as Arc<dyn PresentationService>)
        .with_tuning(GateTuning {
            accept_label: "Allow".to_string(),
            reject_label: "Deny".to_string(),
            ..GateTuning::default()
        })
        .with_watchdog_mode(WatchdogMode::External)
        .build()?;

    gate.request(
        ConfirmationKind::Authenticate {
            facet: Some("example.com".to_string()),
        },
        false,
        Box::new(|_confirmed| {}),
    );

    let prompts = presentation.prompts.lock().map_err(|_| "prompt lock poisoned")?.clone();
    let expected = vec![PromptSpec {
        text: "Authenticate with example.com".to_string(),
        accept_label: "Allow".to_string(),
        reject_label: "Deny".to_string(),
    }];
    if prompts != expected {
        return Err(format!("unexpected prompt specs: {prompts:?}").into());
    }
    Ok(())
}
