//! Remote account API — the two endpoints the onboarding workflow calls.
//!
//! The workflow only sees the `AccountApi` trait, so it can be driven by
//! `HttpAccountApi` in production and by recording stubs in tests.

pub mod http;

pub use http::HttpAccountApi;

use async_trait::async_trait;

use crate::error::ApiError;
use crate::onboarding::model::{OnboardingRequest, RegistrationRequest};

pub const REGISTER_PATH: &str = "/api/auth/register";
pub const ONBOARDING_PATH: &str = "/api/users/onboarding";

/// Status the server returns when it created the resource.
pub const CREATED: u16 = 201;

/// A completed HTTP exchange, whatever its status.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    /// Parsed JSON body, or `Null` when the body was empty or not JSON.
    pub body: serde_json::Value,
}

impl ApiResponse {
    pub fn new(status: u16, body: serde_json::Value) -> Self {
        Self { status, body }
    }

    pub fn is_created(&self) -> bool {
        self.status == CREATED
    }
}

/// Backend-agnostic account API.
#[async_trait]
pub trait AccountApi: Send + Sync {
    /// `POST /api/auth/register`
    async fn register(&self, request: &RegistrationRequest) -> Result<ApiResponse, ApiError>;

    /// `POST /api/users/onboarding`
    async fn onboard(&self, request: &OnboardingRequest) -> Result<ApiResponse, ApiError>;
}
