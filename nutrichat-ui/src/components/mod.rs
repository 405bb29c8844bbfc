//! UI Components
//!
//! Leptos components for the profile sidebar and the conversation.

pub mod chat_input;
pub mod loading;
pub mod message_block;
pub mod profile_form;
pub mod toast;
pub mod transcript;

pub use chat_input::{ChatInput, ErrorLine};
pub use profile_form::ProfilePanel;
pub use toast::Toast;
pub use transcript::TranscriptView;
