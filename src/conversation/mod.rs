//! Conversation
//!
//! Transcript, session state and the controller that relays profile
//! submissions and chat queries to the backend.

mod controller;
mod state;
mod transcript;

pub use controller::Controller;
pub use state::{
    ConversationState, PendingQuery, CHAT_FAILED, COPIED, DISCLAIMER, PROFILE_SAVED, PROFILE_SAVE_FAILED,
};
pub use transcript::{ChatMessage, Role, Transcript};
