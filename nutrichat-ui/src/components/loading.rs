//! Loading Component
//!
//! Spinners shown while a request is in flight.

use leptos::*;

/// Inline loading spinner
#[component]
pub fn InlineLoading() -> impl IntoView {
    view! {
        <span class="inline-block loading-spinner w-4 h-4" />
    }
}

/// Assistant-side placeholder while a reply is pending
#[component]
pub fn TypingIndicator() -> impl IntoView {
    view! {
        <div class="flex justify-start">
            <div class="bg-gray-700 p-3 rounded-lg shadow-md flex space-x-1 animate-pulse">
                {(0..3).map(|_| view! {
                    <span class="w-2 h-2 bg-gray-400 rounded-full" />
                }).collect_view()}
            </div>
        </div>
    }
}
