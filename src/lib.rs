//! # Nutrichat
//!
//! Client for a nutrition assistant backend: a profile-intake form and a
//! chat whose replies are laid out by content template.
//!
//! ## Modules
//!
//! - [`profile`]: Profile form and validated submission
//! - [`conversation`]: Transcript, session state and the controller
//! - [`content`]: Reply classification into display templates
//! - [`backend`]: The backend API seam and its native HTTP client
//! - [`config`]: TOML and environment configuration (native only)
//!
//! The default `native` feature brings the reqwest backend, config files
//! and terminal rendering. Without it the crate builds for `wasm32`, which
//! is how the web page uses it.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use nutrichat::backend::{HttpBackend, HttpBackendConfig};
//! use nutrichat::conversation::Controller;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let backend = HttpBackend::new(HttpBackendConfig::default())?;
//!     let mut controller = Controller::new(backend);
//!
//!     controller.state_mut().form_mut().user_id = "u-42".to_string();
//!     if let Some(reply) = controller.send_query("Give me a meal plan").await? {
//!         println!("{:?}", reply.render());
//!     }
//!     Ok(())
//! }
//! ```

pub mod backend;
#[cfg(feature = "native")]
pub mod config;
pub mod content;
pub mod conversation;
pub mod error;
pub mod profile;
#[cfg(feature = "native")]
pub mod terminal;

pub use backend::{Backend, ChatReply, ChatRequest, DEFAULT_API_URL};
#[cfg(feature = "native")]
pub use backend::{HttpBackend, HttpBackendConfig};

pub use content::{classify, ContentKind, RenderedBlock, Span};

pub use conversation::{ChatMessage, ConversationState, Controller, PendingQuery, Role, Transcript};

pub use error::{ChatError, ChatResult, NetworkFailure};

pub use profile::{Gender, Goal, ProfileForm, ProfileSubmission};

#[cfg(feature = "native")]
pub use config::{Config, ConfigError, LoadedConfig, LogFormat};
