//! Transcript Component
//!
//! The conversation so far, plus the question still waiting for a reply.

use leptos::*;

use nutrichat::Role;

use crate::components::loading::TypingIndicator;
use crate::components::message_block::{bubble_classes, MessageBubble};
use crate::state::global::GlobalState;

/// Scrollable list of messages
#[component]
pub fn TranscriptView() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let conversation = state.conversation;

    view! {
        <div class="space-y-3 max-h-[70vh] overflow-y-auto">
            // Entries are append-only, so the index is a stable key
            <For
                each=move || {
                    conversation.with(|c| {
                        c.transcript().iter().cloned().enumerate().collect::<Vec<_>>()
                    })
                }
                key=|(index, _)| *index
                children=move |(_, message)| view! { <MessageBubble message=message /> }
            />

            {move || {
                conversation
                    .with(|c| c.pending().map(|pending| pending.query.clone()))
                    .map(|query| view! { <PendingQuestion query=query /> })
            }}
        </div>
    }
}

#[component]
fn PendingQuestion(query: String) -> impl IntoView {
    let (row_class, bubble_class) = bubble_classes(Role::User);

    view! {
        <div class=row_class>
            <div class=format!("max-w-prose p-3 rounded-lg shadow-md opacity-70 {}", bubble_class)>
                <p class="text-sm whitespace-pre-wrap">{query}</p>
            </div>
        </div>
        <TypingIndicator />
    }
}
