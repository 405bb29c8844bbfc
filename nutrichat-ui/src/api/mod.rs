//! Backend Access
//!
//! HTTP client for the nutrition backend and the clipboard bridge.

pub mod client;
pub mod clipboard;

pub use client::GlooBackend;
