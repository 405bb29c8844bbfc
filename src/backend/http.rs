//! Native HTTP Backend
//!
//! reqwest client for the nutrition backend.

use async_trait::async_trait;
use reqwest::multipart::Form;
use reqwest::{Client, Response};
use std::time::Duration;

use super::{
    endpoint, normalize_base_url, Backend, ChatReply, ChatRequest, CHAT_PATH, REQUEST_ID_HEADER,
    SUBMIT_DETAILS_PATH,
};
use crate::error::NetworkFailure;
use crate::profile::ProfileSubmission;

/// Connection settings for [`HttpBackend`]
#[derive(Debug, Clone, PartialEq)]
pub struct HttpBackendConfig {
    pub base_url: String,
    /// `None` waits for the backend indefinitely
    pub request_timeout: Option<Duration>,
}

impl Default for HttpBackendConfig {
    fn default() -> Self {
        Self {
            base_url: super::DEFAULT_API_URL.to_string(),
            request_timeout: None,
        }
    }
}

/// reqwest-backed [`Backend`]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(config: HttpBackendConfig) -> Result<Self, NetworkFailure> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| NetworkFailure::Request(e.to_string()))?;

        Ok(Self {
            client,
            base_url: normalize_base_url(&config.base_url),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl From<reqwest::Error> for NetworkFailure {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            NetworkFailure::Timeout
        } else if e.is_connect() {
            NetworkFailure::Unreachable(e.to_string())
        } else if e.is_decode() {
            NetworkFailure::Decode(e.to_string())
        } else {
            NetworkFailure::Request(e.to_string())
        }
    }
}

/// Turn non-2xx answers into [`NetworkFailure::Status`], keeping the body
async fn ensure_success(response: Response) -> Result<Response, NetworkFailure> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(NetworkFailure::Status {
        status: status.as_u16(),
        body,
    })
}

fn new_request_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

#[async_trait(?Send)]
impl Backend for HttpBackend {
    async fn submit_details(&self, profile: &ProfileSubmission) -> Result<(), NetworkFailure> {
        let url = endpoint(&self.base_url, SUBMIT_DETAILS_PATH);
        let request_id = new_request_id();
        let form = profile
            .form_fields()
            .into_iter()
            .fold(Form::new(), |form, (name, value)| form.text(name, value));

        tracing::debug!(%request_id, %url, user_id = %profile.user_id, "Submitting profile");

        let response = self
            .client
            .post(&url)
            .header(REQUEST_ID_HEADER, &request_id)
            .multipart(form)
            .send()
            .await?;
        let response = ensure_success(response).await?;

        tracing::debug!(%request_id, status = response.status().as_u16(), "Profile stored");
        Ok(())
    }

    async fn chat(&self, request: &ChatRequest) -> Result<ChatReply, NetworkFailure> {
        let url = endpoint(&self.base_url, CHAT_PATH);
        let request_id = new_request_id();

        tracing::debug!(%request_id, %url, user_id = %request.user_id, "Sending chat query");

        let response = self
            .client
            .post(&url)
            .header(REQUEST_ID_HEADER, &request_id)
            .json(request)
            .send()
            .await?;
        let response = ensure_success(response).await?;

        let reply: ChatReply = response
            .json()
            .await
            .map_err(|e| NetworkFailure::Decode(e.to_string()))?;

        tracing::debug!(%request_id, chars = reply.response.len(), "Chat reply received");
        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HttpBackendConfig::default();
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.request_timeout, None);
    }

    #[test]
    fn test_base_url_is_normalized() {
        let backend = HttpBackend::new(HttpBackendConfig {
            base_url: "http://localhost:9000/".to_string(),
            request_timeout: Some(Duration::from_secs(5)),
        })
        .unwrap();
        assert_eq!(backend.base_url(), "http://localhost:9000");
    }

    #[test]
    fn test_request_ids_are_unique() {
        assert_ne!(new_request_id(), new_request_id());
    }
}
