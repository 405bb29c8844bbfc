//! Global Application State
//!
//! Reactive wrapper around [`ConversationState`]. Every backend call is a
//! `begin_*` transition, a spawned request, then a `finish_*` transition.

use leptos::*;

use nutrichat::conversation::{ConversationState, COPIED};
use nutrichat::Backend;

use crate::api::{clipboard, GlooBackend};

/// How long a toast stays up, in milliseconds
const NOTICE_MS: u32 = 3000;

/// Global application state provided to all components
#[derive(Clone, Copy)]
pub struct GlobalState {
    /// Form, transcript, pending query, loading flag and error line
    pub conversation: RwSignal<ConversationState>,
    /// Transient confirmation (for toasts)
    pub notice: RwSignal<Option<String>>,
}

/// Provide global state to the component tree
pub fn provide_global_state() {
    provide_context(GlobalState::new());
}

impl GlobalState {
    pub fn new() -> Self {
        Self {
            conversation: create_rw_signal(ConversationState::new()),
            notice: create_rw_signal(None),
        }
    }

    /// Validate the form and send it to the backend
    pub fn submit_profile(&self) {
        let conversation = self.conversation;
        let Some(Ok(submission)) = conversation.try_update(|c| c.begin_submit()) else {
            return;
        };

        spawn_local(async move {
            let outcome = GlooBackend::configured().submit_details(&submission).await;
            if let Err(e) = &outcome {
                web_sys::console::error_1(&format!("Error submitting profile: {}", e).into());
            }
            conversation.update(|c| {
                let _ = c.finish_submit(outcome);
            });
        });
    }

    /// Send the chat input's text
    pub fn send_draft(&self) {
        let conversation = self.conversation;
        let Some(Ok(Some(request))) = conversation.try_update(|c| c.begin_draft_query()) else {
            return;
        };

        spawn_local(async move {
            let outcome = GlooBackend::configured().chat(&request).await;
            if let Err(e) = &outcome {
                web_sys::console::error_1(&format!("Error chatting: {}", e).into());
            }
            conversation.update(|c| {
                let _ = c.finish_query(outcome);
            });
        });
    }

    /// Copy a reply's raw text and confirm with a toast
    pub fn copy(&self, text: String) {
        let state = *self;
        spawn_local(async move {
            match clipboard::write_text(&text).await {
                Ok(()) => state.show_notice(COPIED),
                Err(e) => {
                    web_sys::console::error_1(&format!("Failed to copy: {}", e).into());
                }
            }
        });
    }

    /// Show a confirmation message (auto-clears after timeout)
    pub fn show_notice(&self, message: &str) {
        self.notice.set(Some(message.to_string()));

        let notice_signal = self.notice;
        gloo_timers::callback::Timeout::new(NOTICE_MS, move || {
            notice_signal.set(None);
        })
        .forget();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let runtime = create_runtime();
        let state = GlobalState::new();

        assert!(state.conversation.with(|c| c.is_form_open()));
        assert!(state.conversation.with(|c| c.transcript().is_empty()));
        assert_eq!(state.notice.get(), None);
        runtime.dispose();
    }

    #[test]
    fn test_incomplete_profile_is_not_sent() {
        let runtime = create_runtime();
        let state = GlobalState::new();

        state.submit_profile();
        let (loading, error) = state
            .conversation
            .with(|c| (c.is_loading(), c.error().map(str::to_string)));
        assert!(!loading);
        assert_eq!(error.as_deref(), Some("Please fill in the User ID field."));
        runtime.dispose();
    }

    #[test]
    fn test_blank_draft_is_not_sent() {
        let runtime = create_runtime();
        let state = GlobalState::new();

        state.conversation.update(|c| c.set_draft("   "));
        state.send_draft();
        assert!(!state.conversation.with(|c| c.is_loading()));
        runtime.dispose();
    }
}
