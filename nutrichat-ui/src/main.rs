//! Nutrichat Web Page
//!
//! Nutrition assistant page built with Leptos (WASM).
//!
//! # Features
//!
//! - Profile intake form with show/hide toggle
//! - Chat with template-aware reply layout
//! - Copy buttons for meal plans, recipes and nutritional content
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. Session state lives in the `nutrichat` crate's
//! `ConversationState`; this crate wraps it in signals and talks to the
//! backend over HTTP.

use leptos::*;

mod api;
mod app;
mod components;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    mount_to_body(|| view! { <app::App /> });
}
