//! App Root Component
//!
//! Profile sidebar, conversation column and global providers.

use leptos::*;

use nutrichat::conversation::DISCLAIMER;

use crate::components::{ChatInput, ErrorLine, ProfilePanel, Toast, TranscriptView};
use crate::state::provide_global_state;

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    provide_global_state();

    view! {
        <div class="min-h-screen bg-gradient-to-br from-emerald-900 to-gray-900 text-gray-200 flex">
            <ProfilePanel />

            <main class="flex-1 p-4 flex flex-col items-center">
                <div class="w-full max-w-6xl bg-gray-800 bg-opacity-90 rounded-lg shadow-lg p-6 space-y-4">
                    <h2 class="text-lg font-bold text-gray-100">"How can I assist you?"</h2>
                    <TranscriptView />
                    <ChatInput />
                    <ErrorLine />
                </div>
                <p class="text-xs text-gray-500 mt-2">{DISCLAIMER}</p>
            </main>

            // Toast notifications
            <Toast />
        </div>
    }
}
