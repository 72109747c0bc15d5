//! Form state — an immutable record advanced by a pure reducer.

use std::collections::BTreeSet;

use super::model::{Field, OnboardingForm, UserId, ValidatedRegistration};
use super::validation::{FieldErrors, validate, validate_field};

/// Something the user (or the workflow) did to the form.
#[derive(Debug, Clone)]
pub enum FormEvent {
    Changed(Field, String),
    Blurred(Field),
    Submitted,
    /// The workflow finished. Carries the user id or the message to show.
    Finished(Result<UserId, String>),
}

/// Snapshot of the onboarding form.
#[derive(Debug, Clone, Default)]
pub struct FormState {
    values: OnboardingForm,
    errors: FieldErrors,
    touched: BTreeSet<Field>,
    submitting: bool,
    pending: Option<ValidatedRegistration>,
    submit_count: u32,
    error_message: Option<String>,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one event and return the next state.
    pub fn reduce(&self, event: FormEvent) -> FormState {
        let mut next = self.clone();
        match event {
            FormEvent::Changed(field, value) => {
                next.values = next.values.with(field, value);
                next.set_field_error(field);
            }
            FormEvent::Blurred(field) => {
                next.touched.insert(field);
                next.set_field_error(field);
            }
            FormEvent::Submitted => {
                if next.submitting {
                    return next;
                }
                next.touched.extend(Field::ALL);
                next.submit_count += 1;
                match validate(&next.values) {
                    Ok(record) => {
                        next.errors.clear();
                        next.submitting = true;
                        next.pending = Some(record);
                    }
                    Err(errors) => next.errors = errors,
                }
            }
            FormEvent::Finished(result) => {
                next.submitting = false;
                next.pending = None;
                next.error_message = result.err();
            }
        }
        next
    }

    fn set_field_error(&mut self, field: Field) {
        match validate_field(field, &self.values) {
            Some(msg) => {
                self.errors.insert(field, msg);
            }
            None => {
                self.errors.remove(&field);
            }
        }
    }

    /// The error to render under `field`, once the user has interacted with it.
    pub fn visible_error(&self, field: Field) -> Option<&str> {
        if !self.touched.contains(&field) {
            return None;
        }
        self.errors.get(&field).map(String::as_str)
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn is_touched(&self, field: Field) -> bool {
        self.touched.contains(&field)
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// The validated record of the submission in flight.
    pub fn pending_submission(&self) -> Option<&ValidatedRegistration> {
        self.pending.as_ref()
    }

    /// How many submit attempts were accepted or blocked (ignored ones excluded).
    pub fn submit_count(&self) -> u32 {
        self.submit_count
    }

    /// Inline message from the last failed submission.
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn values(&self) -> &OnboardingForm {
        &self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> FormState {
        [
            (Field::Username, "sam"),
            (Field::Password, "hunter2"),
            (Field::Age, "30"),
            (Field::FitnessGoals, "Run 5k"),
        ]
        .into_iter()
        .fold(FormState::new(), |state, (field, value)| {
            state.reduce(FormEvent::Changed(field, value.into()))
        })
    }

    #[test]
    fn errors_hidden_until_touched() {
        let state = FormState::new().reduce(FormEvent::Changed(Field::Age, "-3".into()));
        assert!(state.errors().contains_key(&Field::Age));
        assert_eq!(state.visible_error(Field::Age), None);

        let state = state.reduce(FormEvent::Blurred(Field::Age));
        assert_eq!(
            state.visible_error(Field::Age),
            Some("Age must be a positive number")
        );
    }

    #[test]
    fn blur_only_touches_that_field() {
        let state = FormState::new().reduce(FormEvent::Blurred(Field::Username));
        assert_eq!(state.visible_error(Field::Username), Some("Username is required"));
        assert!(!state.is_touched(Field::Password));
        assert_eq!(state.visible_error(Field::Password), None);
    }

    #[test]
    fn fixing_a_field_clears_its_error() {
        let state = FormState::new()
            .reduce(FormEvent::Blurred(Field::Username))
            .reduce(FormEvent::Changed(Field::Username, "sam".into()));
        assert_eq!(state.visible_error(Field::Username), None);
    }

    #[test]
    fn empty_submit_is_blocked_and_shows_every_error() {
        let state = FormState::new().reduce(FormEvent::Submitted);
        assert!(!state.is_submitting());
        assert_eq!(state.submit_count(), 1);
        for field in Field::ALL {
            assert!(state.visible_error(field).is_some(), "{field} should show an error");
        }
    }

    #[test]
    fn valid_submit_enters_submitting() {
        let state = filled().reduce(FormEvent::Submitted);
        assert!(state.is_submitting());
        assert!(state.errors().is_empty());
        assert_eq!(state.pending_submission().map(|r| r.age), Some(30));
    }

    #[test]
    fn submit_while_in_flight_is_ignored() {
        let first = filled().reduce(FormEvent::Submitted);
        let second = first.reduce(FormEvent::Submitted);
        assert!(second.is_submitting());
        assert_eq!(second.submit_count(), 1);
    }

    #[test]
    fn finished_failure_sets_inline_message() {
        let state = filled()
            .reduce(FormEvent::Submitted)
            .reduce(FormEvent::Finished(Err("Username already taken".into())));
        assert!(!state.is_submitting());
        assert!(state.pending_submission().is_none());
        assert_eq!(state.error_message(), Some("Username already taken"));

        let state = state
            .reduce(FormEvent::Submitted)
            .reduce(FormEvent::Finished(Ok(UserId::Numeric(42))));
        assert_eq!(state.error_message(), None);
        assert_eq!(state.submit_count(), 2);
    }

    #[test]
    fn reduce_does_not_mutate_previous_state() {
        let before = FormState::new();
        let _after = before.reduce(FormEvent::Changed(Field::Username, "sam".into()));
        assert_eq!(before.values().username, "");
    }
}
