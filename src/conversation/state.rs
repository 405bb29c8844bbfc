//! Conversation state
//!
//! Everything the page shows, plus the transitions around the two backend
//! calls. Each call is split into a `begin_*` step that decides whether a
//! request goes out and a `finish_*` step that applies its outcome, so the
//! same state drives both the async [`Controller`](super::Controller) and
//! the browser page's signals.

use serde::Serialize;

use super::transcript::{ChatMessage, Transcript};
use crate::backend::{ChatReply, ChatRequest};
use crate::error::{ChatError, ChatResult, NetworkFailure};
use crate::profile::{ProfileForm, ProfileSubmission};

pub const PROFILE_SAVED: &str = "Profile saved successfully.";
pub const PROFILE_SAVE_FAILED: &str = "Failed to save profile. Please try again.";
pub const CHAT_FAILED: &str = "Failed to get response. Please try again.";
pub const COPIED: &str = "Content copied to clipboard!";
pub const DISCLAIMER: &str = "Note: AI may generate errors. Verify critical data.";

/// A question whose reply has not arrived yet
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PendingQuery {
    pub query: String,
}

/// Session state, reset when a new session starts
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversationState {
    form: ProfileForm,
    draft: String,
    transcript: Transcript,
    pending: Option<PendingQuery>,
    loading: bool,
    form_open: bool,
    error: Option<String>,
}

impl Default for ConversationState {
    fn default() -> Self {
        Self {
            form: ProfileForm::default(),
            draft: String::new(),
            transcript: Transcript::new(),
            pending: None,
            loading: false,
            form_open: true,
            error: None,
        }
    }
}

impl ConversationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn form(&self) -> &ProfileForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut ProfileForm {
        &mut self.form
    }

    /// Text in the chat input
    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn pending(&self) -> Option<&PendingQuery> {
        self.pending.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_form_open(&self) -> bool {
        self.form_open
    }

    /// The single user-visible error line
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn toggle_form(&mut self) {
        self.form_open = !self.form_open;
    }

    fn guard_idle(&self) -> ChatResult<()> {
        if self.loading {
            tracing::debug!("Rejecting request while another is in flight");
            return Err(ChatError::InFlight);
        }
        Ok(())
    }

    /// Validate the form and mark a profile submission in flight
    ///
    /// On `Err` no request must be sent.
    pub fn begin_submit(&mut self) -> ChatResult<ProfileSubmission> {
        self.guard_idle()?;
        self.error = None;

        let submission = match self.form.validate() {
            Ok(submission) => submission,
            Err(e) => {
                tracing::warn!(error = %e, "Profile form incomplete");
                self.error = Some(form_error_message(&e));
                return Err(e);
            }
        };

        self.loading = true;
        Ok(submission)
    }

    /// Apply the outcome of `POST /submit-details/`
    pub fn finish_submit(&mut self, outcome: Result<(), NetworkFailure>) -> ChatResult<()> {
        self.loading = false;

        match outcome {
            Ok(()) => {
                tracing::info!(user_id = %self.form.user_id, "Profile saved");
                self.transcript.push(ChatMessage::assistant(PROFILE_SAVED));
                self.form_open = false;
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, "Error submitting profile");
                self.error = Some(PROFILE_SAVE_FAILED.to_string());
                Err(e.into())
            }
        }
    }

    /// Mark a chat query in flight
    ///
    /// `Ok(None)` means the text was blank and nothing should be sent.
    pub fn begin_query(&mut self, text: &str) -> ChatResult<Option<ChatRequest>> {
        if text.trim().is_empty() {
            return Ok(None);
        }
        self.guard_idle()?;
        self.error = None;
        self.loading = true;
        self.pending = Some(PendingQuery {
            query: text.to_string(),
        });

        Ok(Some(ChatRequest {
            user_id: self.form.user_id.clone(),
            query: text.to_string(),
        }))
    }

    /// Begin a query with the current draft
    pub fn begin_draft_query(&mut self) -> ChatResult<Option<ChatRequest>> {
        let text = self.draft.clone();
        self.begin_query(&text)
    }

    /// Apply the outcome of `POST /chat/`
    ///
    /// On success the user's query and the reply are appended together; on
    /// failure nothing is appended and the draft is kept.
    pub fn finish_query(&mut self, outcome: Result<ChatReply, NetworkFailure>) -> ChatResult<()> {
        self.loading = false;
        let pending = self.pending.take();

        match outcome {
            Ok(reply) => {
                let Some(pending) = pending else {
                    tracing::warn!("Chat reply arrived with no pending query, dropping it");
                    return Ok(());
                };
                tracing::debug!(chars = reply.response.len(), "Chat response received");
                self.transcript.push(ChatMessage::user(pending.query));
                self.transcript.push(ChatMessage::assistant(reply.response));
                self.draft.clear();
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, "Error chatting");
                self.error = Some(CHAT_FAILED.to_string());
                Err(e.into())
            }
        }
    }
}

fn form_error_message(error: &ChatError) -> String {
    match error {
        ChatError::MissingField(field) => format!("Please fill in the {} field.", field_label(field)),
        ChatError::InvalidField(field) => format!("Please enter a valid {}.", field_label(field)),
        other => other.to_string(),
    }
}

fn field_label(field: &str) -> &str {
    match field {
        "user_id" => "User ID",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::Role;
    use crate::profile::{Gender, Goal};

    fn ready_state() -> ConversationState {
        let mut state = ConversationState::new();
        let form = state.form_mut();
        form.user_id = "u-42".to_string();
        form.age = 28;
        form.weight = 80.0;
        form.height = "182 cm".to_string();
        form.gender = Some(Gender::Male);
        form.goal = Some(Goal::WeightLoss);
        state
    }

    #[test]
    fn test_initial_state() {
        let state = ConversationState::new();
        assert!(state.is_form_open());
        assert!(!state.is_loading());
        assert!(state.transcript().is_empty());
        assert_eq!(state.error(), None);
        assert_eq!(state.pending(), None);
    }

    #[test]
    fn test_toggle_form() {
        let mut state = ConversationState::new();
        state.toggle_form();
        assert!(!state.is_form_open());
        state.toggle_form();
        assert!(state.is_form_open());
    }

    #[test]
    fn test_submit_success() {
        let mut state = ready_state();
        let submission = state.begin_submit().unwrap();
        assert_eq!(submission.user_id, "u-42");
        assert!(state.is_loading());

        state.finish_submit(Ok(())).unwrap();
        assert!(!state.is_loading());
        assert!(!state.is_form_open());
        assert_eq!(state.transcript().len(), 1);
        let msg = &state.transcript().messages()[0];
        assert_eq!(msg.role(), Role::Assistant);
        assert_eq!(msg.content(), PROFILE_SAVED);
    }

    #[test]
    fn test_submit_failure_keeps_form_open() {
        let mut state = ready_state();
        state.begin_submit().unwrap();
        let err = state
            .finish_submit(Err(NetworkFailure::Unreachable("connection refused".into())))
            .unwrap_err();

        assert!(err.is_network());
        assert!(state.is_form_open());
        assert!(!state.is_loading());
        assert_eq!(state.error(), Some(PROFILE_SAVE_FAILED));
        assert!(state.transcript().is_empty());
    }

    #[test]
    fn test_incomplete_form_sends_nothing() {
        let mut state = ConversationState::new();
        assert_eq!(state.begin_submit(), Err(ChatError::MissingField("user_id")));
        assert!(!state.is_loading());
        assert_eq!(state.error(), Some("Please fill in the User ID field."));
    }

    #[test]
    fn test_blank_query_is_noop() {
        let mut state = ready_state();
        let before = state.clone();
        assert_eq!(state.begin_query(""), Ok(None));
        assert_eq!(state.begin_query("   \n\t"), Ok(None));
        assert_eq!(state, before);
    }

    #[test]
    fn test_query_success_appends_pair() {
        let mut state = ready_state();
        state.set_draft("chicken recipe");
        let request = state.begin_draft_query().unwrap().unwrap();
        assert_eq!(request.user_id, "u-42");
        assert_eq!(request.query, "chicken recipe");
        assert_eq!(state.pending().map(|p| p.query.as_str()), Some("chicken recipe"));
        assert!(state.transcript().is_empty());

        state
            .finish_query(Ok(ChatReply {
                response: "### Recipe\n\nIngredients...".to_string(),
            }))
            .unwrap();

        let messages = state.transcript().messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role(), Role::User);
        assert_eq!(messages[0].content(), "chicken recipe");
        assert_eq!(messages[1].role(), Role::Assistant);
        assert_eq!(messages[1].content(), "### Recipe\n\nIngredients...");
        assert_eq!(state.draft(), "");
        assert_eq!(state.pending(), None);
    }

    #[test]
    fn test_query_failure_appends_nothing() {
        let mut state = ready_state();
        state.set_draft("oats?");
        state.begin_draft_query().unwrap();
        state
            .finish_query(Err(NetworkFailure::Status {
                status: 500,
                body: r#"{"detail":"Error processing chat request"}"#.into(),
            }))
            .unwrap_err();

        assert!(state.transcript().is_empty());
        assert_eq!(state.error(), Some(CHAT_FAILED));
        assert_eq!(state.draft(), "oats?");
        assert_eq!(state.pending(), None);
        assert!(!state.is_loading());
    }

    #[test]
    fn test_in_flight_guard() {
        let mut state = ready_state();
        state.begin_query("first").unwrap();
        assert_eq!(state.begin_query("second"), Err(ChatError::InFlight));
        assert_eq!(state.begin_submit(), Err(ChatError::InFlight));
        assert_eq!(state.pending().map(|p| p.query.as_str()), Some("first"));
    }

    #[test]
    fn test_error_clears_on_next_operation() {
        let mut state = ready_state();
        state.begin_query("q").unwrap();
        let _ = state.finish_query(Err(NetworkFailure::Timeout));
        assert!(state.error().is_some());

        state.begin_query("q").unwrap();
        assert_eq!(state.error(), None);
    }
}
