//! OnboardingWorkflow — sequences the register and onboard calls and
//! reconciles them into one outcome.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::RwLock;
use tracing::Instrument;
use uuid::Uuid;

use crate::api::{AccountApi, ApiResponse};
use crate::error::{ApiError, WorkflowError};
use crate::navigation::{Navigator, Route};
use crate::store::KeyValueStore;

use super::model::{
    OnboardingResult, RegistrationResult, Stage, USER_ID_KEY, UserId, ValidatedRegistration,
    server_message,
};
use super::state::WorkflowPhase;

/// Drives one submission at a time through registration and onboarding.
///
/// If onboarding fails after registration succeeded, the account stays
/// registered; nothing is rolled back.
pub struct OnboardingWorkflow {
    api: Arc<dyn AccountApi>,
    store: Arc<dyn KeyValueStore>,
    navigator: Arc<dyn Navigator>,
    phase: Arc<RwLock<WorkflowPhase>>,
    in_flight: AtomicBool,
}

/// Clears the in-flight flag however `run` exits.
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl OnboardingWorkflow {
    pub fn new(
        api: Arc<dyn AccountApi>,
        store: Arc<dyn KeyValueStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            api,
            store,
            navigator,
            phase: Arc::new(RwLock::new(WorkflowPhase::default())),
            in_flight: AtomicBool::new(false),
        }
    }

    /// Phase of the current (or most recent) submission.
    pub async fn current_phase(&self) -> WorkflowPhase {
        self.phase.read().await.clone()
    }

    /// Whether a submission is running right now.
    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Run one submission: register, onboard, persist the id, navigate Home.
    ///
    /// Returns immediately with `AlreadySubmitting` if another submission on
    /// this workflow has not finished yet.
    pub async fn run(&self, record: ValidatedRegistration) -> Result<UserId, WorkflowError> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::warn!("Submission ignored: another one is in flight");
            return Err(WorkflowError::AlreadySubmitting);
        }
        let _guard = InFlightGuard(&self.in_flight);

        let span = tracing::info_span!(
            "submission",
            submission_id = %Uuid::new_v4(),
            username = %record.username
        );
        async move {
            *self.phase.write().await = WorkflowPhase::Idle;
            let result = self.register_and_onboard(&record).await;
            if let Err(e) = &result {
                tracing::error!(error = %e, "Registration or onboarding failed");
                self.transition(WorkflowPhase::Failed {
                    reason: e.user_message(),
                })
                .await;
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn register_and_onboard(
        &self,
        record: &ValidatedRegistration,
    ) -> Result<UserId, WorkflowError> {
        self.transition(WorkflowPhase::AwaitingRegistration).await;
        tracing::info!("Registering user");
        let response = self.api.register(&record.registration_request()).await;
        let response = accept(Stage::Registration, response)?;
        let registration = RegistrationResult {
            user_id: UserId::from_body(&response.body).ok_or(WorkflowError::MissingUserId)?,
            status: response.status,
        };
        let user_id = registration.user_id;

        self.transition(WorkflowPhase::AwaitingOnboarding).await;
        tracing::info!(%user_id, status = registration.status, "User registered, onboarding");
        let response = self
            .api
            .onboard(&record.onboarding_request(user_id.clone()))
            .await;
        let response = accept(Stage::Onboarding, response)?;
        let onboarding = OnboardingResult {
            status: response.status,
            message: server_message(&response.body),
        };
        tracing::debug!(
            status = onboarding.status,
            message = onboarding.message.as_deref().unwrap_or(""),
            "Onboarding accepted"
        );

        self.store.set(USER_ID_KEY, &user_id.to_string()).await?;
        self.transition(WorkflowPhase::Done {
            user_id: user_id.clone(),
        })
        .await;
        tracing::info!(%user_id, "User onboarded");

        self.navigator.navigate(Route::Home);
        Ok(user_id)
    }

    async fn transition(&self, target: WorkflowPhase) {
        let mut phase = self.phase.write().await;
        let from = phase.to_string();
        let to = target.to_string();
        match phase.advance(target) {
            Ok(()) => tracing::debug!(from = %from, to = %to, "Workflow phase changed"),
            Err(e) => tracing::warn!("Failed to advance workflow phase: {}", e),
        }
    }
}

/// Turn a raw call result into the 201 response or the failure to report.
fn accept(
    stage: Stage,
    response: Result<ApiResponse, ApiError>,
) -> Result<ApiResponse, WorkflowError> {
    match response {
        Ok(response) if response.is_created() => Ok(response),
        Ok(response) => {
            let message = server_message(&response.body);
            tracing::warn!(
                %stage,
                status = response.status,
                message = message.as_deref().unwrap_or(""),
                "Request rejected"
            );
            Err(WorkflowError::Rejected {
                stage,
                status: response.status,
                message,
            })
        }
        Err(ApiError::Transport { reason, .. }) => Err(WorkflowError::Transport { stage, reason }),
    }
}
