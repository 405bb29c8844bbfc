//! Conversation Controller
//!
//! Drives [`ConversationState`] against a [`Backend`].

use super::state::ConversationState;
use super::transcript::ChatMessage;
use crate::backend::Backend;
use crate::error::ChatResult;

/// Owns the session state and the backend it talks to
pub struct Controller<B> {
    backend: B,
    state: ConversationState,
}

impl<B: Backend> Controller<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            state: ConversationState::new(),
        }
    }

    pub fn state(&self) -> &ConversationState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut ConversationState {
        &mut self.state
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Send the current profile form
    pub async fn submit_profile(&mut self) -> ChatResult<()> {
        let submission = self.state.begin_submit()?;
        let outcome = self.backend.submit_details(&submission).await;
        self.state.finish_submit(outcome)
    }

    /// Ask a question
    ///
    /// Returns the appended assistant reply, or `None` when `text` was blank.
    pub async fn send_query(&mut self, text: &str) -> ChatResult<Option<&ChatMessage>> {
        let Some(request) = self.state.begin_query(text)? else {
            return Ok(None);
        };
        let outcome = self.backend.chat(&request).await;
        self.state.finish_query(outcome)?;
        Ok(self.state.transcript().last())
    }

    /// Ask the question sitting in the draft
    pub async fn send_draft(&mut self) -> ChatResult<Option<&ChatMessage>> {
        let text = self.state.draft().to_string();
        self.send_query(&text).await
    }
}
