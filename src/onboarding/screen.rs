//! OnboardingScreen — glues form state to the workflow and decides what the
//! user sees after a submit.

use std::sync::Arc;

use super::form::{FormEvent, FormState};
use super::model::{Field, UserId};
use super::validation::FieldErrors;
use super::workflow::OnboardingWorkflow;
use crate::error::WorkflowError;

/// Modal dialog raised when a submission fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub message: String,
}

impl From<&WorkflowError> for Alert {
    fn from(err: &WorkflowError) -> Self {
        Self {
            title: err.alert_title().to_string(),
            message: err.user_message(),
        }
    }
}

/// What a submit attempt led to.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Validation failed; nothing was sent.
    Blocked(FieldErrors),
    /// A submission was already running; this one was dropped.
    Ignored,
    /// Registered, onboarded, saved, and navigated Home.
    Completed(UserId),
    /// The workflow failed; show this alert.
    Failed(Alert),
}

pub struct OnboardingScreen {
    state: FormState,
    workflow: Arc<OnboardingWorkflow>,
}

impl OnboardingScreen {
    pub fn new(workflow: Arc<OnboardingWorkflow>) -> Self {
        Self {
            state: FormState::new(),
            workflow,
        }
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn dispatch(&mut self, event: FormEvent) {
        self.state = self.state.reduce(event);
    }

    /// Convenience for a front end that sets a value and leaves the input.
    pub fn enter(&mut self, field: Field, value: impl Into<String>) {
        self.dispatch(FormEvent::Changed(field, value.into()));
        self.dispatch(FormEvent::Blurred(field));
    }

    pub async fn submit(&mut self) -> SubmitOutcome {
        if self.state.is_submitting() {
            return SubmitOutcome::Ignored;
        }

        self.dispatch(FormEvent::Submitted);
        let Some(record) = self.state.pending_submission().cloned() else {
            return SubmitOutcome::Blocked(self.state.errors().clone());
        };

        let result = self.workflow.run(record).await;
        self.dispatch(FormEvent::Finished(
            result.as_ref().cloned().map_err(|e| e.user_message()),
        ));

        match result {
            Ok(user_id) => SubmitOutcome::Completed(user_id),
            Err(e) => SubmitOutcome::Failed(Alert::from(&e)),
        }
    }
}
