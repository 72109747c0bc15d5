//! Navigation handoff after a successful onboarding.

use serde::{Deserialize, Serialize};

/// Screens the onboarding flow can hand off to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Route {
    Home,
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Home => write!(f, "Home"),
        }
    }
}

/// Whatever owns the screen stack.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}
