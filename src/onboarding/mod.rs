//! Onboarding — registration plus fitness-profile capture.
//!
//! The user fills a four-field form. Once it validates, the workflow
//! registers an account, onboards it with age and fitness goals, stores the
//! new user id, and hands off to the Home screen. Any failure ends the
//! submission and is surfaced as an alert plus an inline message.

pub mod form;
pub mod model;
pub mod screen;
pub mod state;
pub mod validation;
pub mod workflow;

pub use form::{FormEvent, FormState};
pub use model::{
    FIELDS, Field, FieldSpec, OnboardingForm, OnboardingRequest, RegistrationRequest, Stage,
    USER_ID_KEY, UserId, ValidatedRegistration,
};
pub use screen::{Alert, OnboardingScreen, SubmitOutcome};
pub use state::WorkflowPhase;
pub use validation::{FieldErrors, validate, validate_field};
pub use workflow::OnboardingWorkflow;
