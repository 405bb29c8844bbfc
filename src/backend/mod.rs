//! Backend API
//!
//! The nutrition backend is an external service with two endpoints:
//!
//! - `POST /submit-details/` - multipart profile fields, any 2xx is success
//! - `POST /chat/` - JSON `{user_id, query}`, answers `{response}`
//!
//! [`Backend`] is the seam the conversation controller talks through. The
//! native client lives in [`http`]; the browser page brings its own.

#[cfg(feature = "native")]
pub mod http;

#[cfg(feature = "native")]
pub use http::{HttpBackend, HttpBackendConfig};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::NetworkFailure;
use crate::profile::ProfileSubmission;

/// Used when no base URL is configured
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

pub const SUBMIT_DETAILS_PATH: &str = "/submit-details/";
pub const CHAT_PATH: &str = "/chat/";

/// Correlates a client request with backend logs
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Body of `POST /chat/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub user_id: String,
    pub query: String,
}

/// Body returned by `POST /chat/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatReply {
    pub response: String,
}

/// Operations the backend offers
///
/// Futures are not `Send`: everything runs on one event loop, and the
/// browser's fetch futures cannot cross threads anyway.
#[async_trait(?Send)]
pub trait Backend {
    /// Store the user's profile
    async fn submit_details(&self, profile: &ProfileSubmission) -> Result<(), NetworkFailure>;

    /// Ask a question on behalf of `request.user_id`
    async fn chat(&self, request: &ChatRequest) -> Result<ChatReply, NetworkFailure>;
}

/// Strip trailing slashes so paths can be appended directly
pub fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

/// Full URL of an endpoint under `base`
pub fn endpoint(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}
