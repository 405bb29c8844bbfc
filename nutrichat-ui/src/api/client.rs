//! HTTP API Client
//!
//! Browser implementation of the nutrition backend, on top of `fetch`.

use async_trait::async_trait;
use gloo_net::http::{Request, Response};

use nutrichat::backend::{
    endpoint, normalize_base_url, CHAT_PATH, REQUEST_ID_HEADER, SUBMIT_DETAILS_PATH,
};
use nutrichat::{Backend, ChatReply, ChatRequest, NetworkFailure, ProfileSubmission, DEFAULT_API_URL};

/// Local storage key that overrides the backend URL
pub const API_URL_STORAGE_KEY: &str = "nutrichat_api_url";

/// Get the API base URL from local storage, the build environment or the default
pub fn get_api_base() -> String {
    let stored = web_sys::window()
        .and_then(|window| window.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(API_URL_STORAGE_KEY).ok().flatten());

    let url = stored
        .or_else(|| option_env!("NUTRICHAT_API_URL").map(str::to_string))
        .unwrap_or_else(|| DEFAULT_API_URL.to_string());
    normalize_base_url(&url)
}

fn network_failure(e: gloo_net::Error) -> NetworkFailure {
    match e {
        // fetch rejects with a TypeError when the host cannot be reached
        gloo_net::Error::JsError(js) => NetworkFailure::Unreachable(js.to_string()),
        gloo_net::Error::SerdeError(e) => NetworkFailure::Decode(e.to_string()),
        other => NetworkFailure::Request(other.to_string()),
    }
}

async fn ensure_success(response: Response) -> Result<Response, NetworkFailure> {
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    Err(NetworkFailure::Status { status, body })
}

fn new_request_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Backend reached through the browser's `fetch`
#[derive(Debug, Clone)]
pub struct GlooBackend {
    base_url: String,
}

impl GlooBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: normalize_base_url(&base_url.into()),
        }
    }

    /// Backend at the URL currently configured for this page
    pub fn configured() -> Self {
        Self::new(get_api_base())
    }
}

fn profile_form_data(profile: &ProfileSubmission) -> Result<web_sys::FormData, NetworkFailure> {
    let form = web_sys::FormData::new()
        .map_err(|e| NetworkFailure::Request(format!("{:?}", e)))?;
    for (name, value) in profile.form_fields() {
        form.append_with_str(name, &value)
            .map_err(|e| NetworkFailure::Request(format!("{:?}", e)))?;
    }
    Ok(form)
}

#[async_trait(?Send)]
impl Backend for GlooBackend {
    async fn submit_details(&self, profile: &ProfileSubmission) -> Result<(), NetworkFailure> {
        let url = endpoint(&self.base_url, SUBMIT_DETAILS_PATH);
        let form = profile_form_data(profile)?;

        // The browser sets the multipart boundary itself
        let response = Request::post(&url)
            .header(REQUEST_ID_HEADER, &new_request_id())
            .body(form)
            .map_err(network_failure)?
            .send()
            .await
            .map_err(network_failure)?;
        ensure_success(response).await?;
        Ok(())
    }

    async fn chat(&self, request: &ChatRequest) -> Result<ChatReply, NetworkFailure> {
        let url = endpoint(&self.base_url, CHAT_PATH);

        let response = Request::post(&url)
            .header(REQUEST_ID_HEADER, &new_request_id())
            .json(request)
            .map_err(network_failure)?
            .send()
            .await
            .map_err(network_failure)?;
        let response = ensure_success(response).await?;

        response
            .json::<ChatReply>()
            .await
            .map_err(network_failure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_is_normalized() {
        let backend = GlooBackend::new("http://localhost:8000/");
        assert_eq!(backend.base_url, "http://localhost:8000");
    }

    #[test]
    fn test_error_mapping() {
        let decode = serde_json::from_str::<ChatReply>("{}").unwrap_err();
        assert!(matches!(
            network_failure(gloo_net::Error::SerdeError(decode)),
            NetworkFailure::Decode(_)
        ));
        assert_eq!(
            network_failure(gloo_net::Error::GlooError("boom".to_string())),
            NetworkFailure::Request("boom".to_string())
        );
    }
}
