//! Submission controller
//!
//! ```text
//!            submit()                 2xx              actions, reset
//!   Idle ───────────────▶ Submitting ─────────▶ Succeeded ──────────────▶ Idle
//!    ▲ ▲                      │
//!    │ └── (dropped future) ──┤ non-2xx / transport error
//!    │                        ▼
//!    └────── submit() ───── Failed
//! ```
//!
//! Field edits stay legal while a submission is in flight; only a second
//! submit is refused.

use crate::definition::PostSubmitAction;
use crate::error::{FormError, Result};
use crate::personalization::{ContextUpdate, PersonalizationContext};
use crate::store::FormStore;
use crate::transport::{SubmissionPayload, SubmissionTransport, SubmitResponse};
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Where a form is in its submission lifecycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Submitting,
    Succeeded,
    Failed { message: String },
}

impl SubmissionState {
    /// `Succeeded` only lasts until the store has been reset
    pub fn can_submit(&self) -> bool {
        matches!(self, SubmissionState::Idle | SubmissionState::Failed { .. })
    }
}

/// Shows a message to the person filling in the form
pub trait UserNotifier: Send + Sync {
    fn notify(&self, message: &str);
}

/// Notifier that only logs
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl UserNotifier for TracingNotifier {
    fn notify(&self, message: &str) {
        warn!(message, "Form notification");
    }
}

/// Puts the state back to `Idle` if the submit future is dropped before it
/// settles.
struct InFlight<'a> {
    state: &'a Mutex<SubmissionState>,
    settled: bool,
}

impl InFlight<'_> {
    fn advance(&self, next: SubmissionState) {
        *self.state.lock() = next;
    }

    fn settle(mut self, next: SubmissionState) {
        *self.state.lock() = next;
        self.settled = true;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.settled {
            *self.state.lock() = SubmissionState::Idle;
        }
    }
}

/// Sends the form's state and runs the post-submit actions
pub struct SubmissionController {
    form_identifier: String,
    actions: Vec<PostSubmitAction>,
    store: Arc<FormStore>,
    transport: Arc<dyn SubmissionTransport>,
    personalization: Arc<dyn PersonalizationContext>,
    notifier: Arc<dyn UserNotifier>,
    state: Mutex<SubmissionState>,
}

impl SubmissionController {
    pub fn new(
        form_identifier: impl Into<String>,
        actions: Vec<PostSubmitAction>,
        store: Arc<FormStore>,
        transport: Arc<dyn SubmissionTransport>,
        personalization: Arc<dyn PersonalizationContext>,
    ) -> Self {
        Self {
            form_identifier: form_identifier.into(),
            actions,
            store,
            transport,
            personalization,
            notifier: Arc::new(TracingNotifier),
            state: Mutex::new(SubmissionState::Idle),
        }
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn UserNotifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn form_identifier(&self) -> &str {
        &self.form_identifier
    }

    pub fn state(&self) -> SubmissionState {
        self.state.lock().clone()
    }

    /// Whether the submit control should be enabled
    pub fn can_submit(&self) -> bool {
        self.state.lock().can_submit()
    }

    fn begin(&self) -> Result<InFlight<'_>> {
        let mut state = self.state.lock();
        if !state.can_submit() {
            return Err(FormError::SubmissionInFlight);
        }
        *state = SubmissionState::Submitting;
        Ok(InFlight {
            state: &self.state,
            settled: false,
        })
    }

    /// Submit the current state.
    ///
    /// On success the configured actions run and the store returns to its
    /// defaults. On failure the user is notified and the store is left as
    /// it was so the form can be corrected and sent again.
    pub async fn submit(&self) -> Result<SubmitResponse> {
        let in_flight = self.begin()?;

        let payload = SubmissionPayload {
            form_identifier: self.form_identifier.clone(),
            state: self.store.snapshot(),
        };
        info!(form = %self.form_identifier, fields = payload.state.len(), "Submitting form");

        match self.transport.send(&payload).await {
            Ok(response) => {
                in_flight.advance(SubmissionState::Succeeded);
                self.apply_actions();
                self.store.restore_defaults();
                in_flight.settle(SubmissionState::Idle);
                info!(form = %self.form_identifier, "Form submitted");
                Ok(response)
            }
            Err(e) => {
                let message = match &e {
                    FormError::SubmissionRejected { message, .. } => message.clone(),
                    other => other.to_string(),
                };
                warn!(form = %self.form_identifier, error = %e, "Form submission failed");
                in_flight.settle(SubmissionState::Failed { message });
                self.notifier.notify(&e.user_message());
                Err(e)
            }
        }
    }

    /// Failures are logged and skipped; the submission itself already
    /// succeeded.
    fn apply_actions(&self) {
        for action in &self.actions {
            match action {
                PostSubmitAction::SetQuirk { name, value } => {
                    let update = ContextUpdate::quirk(name.clone(), value.clone());
                    if let Err(e) = self.personalization.update(update) {
                        let e = FormError::PostSubmitAction(e.to_string());
                        error!(form = %self.form_identifier, quirk = %name, error = %e, "Post-submit action failed");
                    }
                }
            }
        }
    }
}
