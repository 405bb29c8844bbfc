//! Chat Input Component
//!
//! Query field with Enter-to-send and the send button.

use leptos::*;

use crate::components::loading::InlineLoading;
use crate::state::global::GlobalState;

#[component]
pub fn ChatInput() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let conversation = state.conversation;
    let loading = create_memo(move |_| conversation.with(|c| c.is_loading()));

    view! {
        <div class="flex items-center space-x-2">
            <input
                type="text"
                placeholder="Enter your query"
                prop:value=move || conversation.with(|c| c.draft().to_string())
                on:input=move |ev| conversation.update(|c| c.set_draft(event_target_value(&ev)))
                on:keydown=move |ev: ev::KeyboardEvent| {
                    if ev.key() == "Enter" {
                        state.send_draft();
                    }
                }
                class="flex-1 p-2 border rounded-md bg-gray-700 text-gray-200 border-gray-600 \
                       focus:ring-2 focus:ring-emerald-500 outline-none"
            />
            <button
                on:click=move |_| state.send_draft()
                disabled=move || loading.get()
                class="px-4 py-2 bg-emerald-600 hover:bg-emerald-700 disabled:opacity-50 \
                       rounded-md transition-colors"
            >
                {move || {
                    if loading.get() {
                        view! { <InlineLoading /> }.into_view()
                    } else {
                        "Send".into_view()
                    }
                }}
            </button>
        </div>
    }
}

/// The single user-visible error line
#[component]
pub fn ErrorLine() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let conversation = state.conversation;

    view! {
        {move || {
            conversation
                .with(|c| c.error().map(str::to_string))
                .map(|error| view! { <p class="text-sm text-red-400">{error}</p> })
        }}
    }
}
