//! reqwest-backed `AccountApi`.

use async_trait::async_trait;
use serde::Serialize;

use super::{AccountApi, ApiResponse, ONBOARDING_PATH, REGISTER_PATH};
use crate::error::ApiError;
use crate::onboarding::model::{OnboardingRequest, RegistrationRequest};

/// Talks to the account server over HTTP.
///
/// No request timeout is set; a call waits until the server answers or the
/// connection drops.
#[derive(Clone)]
pub struct HttpAccountApi {
    base_url: String,
    client: reqwest::Client,
}

impl HttpAccountApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, client }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn post_json<B: Serialize + ?Sized + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<ApiResponse, ApiError> {
        let url = self.url(path);
        tracing::debug!(url = %url, "Sending request");

        let transport = |e: reqwest::Error| {
            tracing::error!(url = %url, error = %e, "HTTP request failed");
            ApiError::Transport {
                endpoint: path.to_string(),
                reason: e.to_string(),
            }
        };

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(transport)?;

        let status = response.status().as_u16();
        let text = response.text().await.map_err(transport)?;
        let body = if text.trim().is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_str(&text).unwrap_or_else(|e| {
                tracing::debug!(url = %url, error = %e, "Response body is not JSON");
                serde_json::Value::Null
            })
        };

        tracing::info!(url = %url, status, "HTTP request completed");
        Ok(ApiResponse { status, body })
    }
}

#[async_trait]
impl AccountApi for HttpAccountApi {
    async fn register(&self, request: &RegistrationRequest) -> Result<ApiResponse, ApiError> {
        self.post_json(REGISTER_PATH, request).await
    }

    async fn onboard(&self, request: &OnboardingRequest) -> Result<ApiResponse, ApiError> {
        self.post_json(ONBOARDING_PATH, request).await
    }
}

#[cfg(test)]
mod tests {
    use secrecy::SecretString;

    use super::*;

    #[test]
    fn strips_trailing_slash() {
        let api = HttpAccountApi::new("http://localhost:8081/");
        assert_eq!(api.base_url(), "http://localhost:8081");
        assert_eq!(
            api.url(REGISTER_PATH),
            "http://localhost:8081/api/auth/register"
        );
    }

    #[tokio::test]
    async fn unreachable_server_is_a_transport_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let api = HttpAccountApi::new(format!("http://127.0.0.1:{port}"));
        let request = RegistrationRequest {
            username: "sam".into(),
            password: SecretString::from("pw"),
        };
        let err = api.register(&request).await.unwrap_err();
        let ApiError::Transport { endpoint, reason } = err;
        assert_eq!(endpoint, REGISTER_PATH);
        assert!(!reason.is_empty());
    }
}
