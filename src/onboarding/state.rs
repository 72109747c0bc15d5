//! Workflow state machine — tracks which remote call a submission is waiting on.

use serde::Serialize;

use super::model::UserId;

/// Phases of one submission.
///
/// Progresses linearly: Idle → AwaitingRegistration → AwaitingOnboarding →
/// Done. Either awaiting phase may drop to Failed instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum WorkflowPhase {
    #[default]
    Idle,
    AwaitingRegistration,
    AwaitingOnboarding,
    Done { user_id: UserId },
    Failed { reason: String },
}

impl WorkflowPhase {
    /// Check if a transition from `self` to `target` is valid.
    pub fn can_transition_to(&self, target: &WorkflowPhase) -> bool {
        use WorkflowPhase::*;
        matches!(
            (self, target),
            (Idle, AwaitingRegistration)
                | (AwaitingRegistration, AwaitingOnboarding)
                | (AwaitingRegistration, Failed { .. })
                | (AwaitingOnboarding, Done { .. })
                | (AwaitingOnboarding, Failed { .. })
        )
    }

    /// Whether this phase ends the submission.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done { .. } | Self::Failed { .. })
    }

    /// Whether a submission is currently waiting on the network.
    pub fn is_awaiting(&self) -> bool {
        matches!(self, Self::AwaitingRegistration | Self::AwaitingOnboarding)
    }

    /// Move to `target`, or report why the move is not allowed.
    pub fn advance(&mut self, target: WorkflowPhase) -> Result<(), String> {
        if !self.can_transition_to(&target) {
            return Err(format!("Cannot transition from {self} to {target}"));
        }
        *self = target;
        Ok(())
    }
}

impl std::fmt::Display for WorkflowPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Idle => "idle",
            Self::AwaitingRegistration => "awaiting_registration",
            Self::AwaitingOnboarding => "awaiting_onboarding",
            Self::Done { .. } => "done",
            Self::Failed { .. } => "failed",
        };
        write!(f, "{s}")
    }
}
