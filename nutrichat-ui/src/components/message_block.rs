//! Message Block Component
//!
//! Lays out one message according to its display template.

use leptos::*;

use nutrichat::content::MealPlan;
use nutrichat::{ChatMessage, RenderedBlock, Role, Span};

use crate::state::global::GlobalState;

/// Row alignment and bubble colors for a role
pub(crate) fn bubble_classes(role: Role) -> (&'static str, &'static str) {
    match role {
        Role::User => ("flex justify-end", "bg-emerald-700 text-white"),
        Role::Assistant => ("flex justify-start", "bg-gray-700 text-gray-200"),
    }
}

/// One transcript entry
#[component]
pub fn MessageBubble(message: ChatMessage) -> impl IntoView {
    let (row_class, bubble_class) = bubble_classes(message.role());
    let sent_at = message.local_time();

    view! {
        <div class=format!("{} animate-fade-in", row_class)>
            <div class=format!("max-w-prose p-3 rounded-lg shadow-md {}", bubble_class)>
                <MessageBlock block=message.render() raw=message.content().to_string() />
                <p class="text-xs opacity-60 mt-1 text-right">{sent_at}</p>
            </div>
        </div>
    }
}

/// A rendered reply plus its copy button
#[component]
pub fn MessageBlock(block: RenderedBlock, raw: String) -> impl IntoView {
    let copy = block
        .copy_label()
        .map(|label| view! { <CopyButton label=label content=raw /> });

    let body = match block {
        RenderedBlock::MealPlan(plan) => view! {
            <div>
                <h3 class="text-md font-bold mb-2">{MealPlan::TITLE}</h3>
                {plan.summary.map(|summary| view! { <p class="text-sm mb-2">{summary}</p> })}
                <div class="space-y-2">
                    {plan
                        .meals
                        .into_iter()
                        .map(|meal| view! {
                            <div class="bg-gray-600 p-2 rounded-md border border-gray-500 \
                                        hover:bg-gray-500 transition-transform hover:scale-[1.02]">
                                <p class="text-sm">{meal}</p>
                            </div>
                        })
                        .collect_view()}
                </div>
            </div>
        }
        .into_view(),

        RenderedBlock::Recipe(recipe) => view! {
            <div>
                <h3 class="text-md font-bold mb-2">{recipe.title}</h3>
                {recipe
                    .paragraphs
                    .into_iter()
                    .map(|paragraph| view! {
                        <p class="text-sm mb-2 whitespace-pre-wrap">{paragraph}</p>
                    })
                    .collect_view()}
            </div>
        }
        .into_view(),

        RenderedBlock::Nutrition(facts) => view! {
            <div>
                <h3 class="text-md font-bold mb-2">{facts.title}</h3>
                {facts
                    .paragraphs
                    .iter()
                    .map(|spans| view! {
                        <div class="text-sm mb-2 whitespace-pre-line">{styled(spans)}</div>
                    })
                    .collect_view()}
            </div>
        }
        .into_view(),

        RenderedBlock::Plain(text) => view! {
            <p class="text-sm whitespace-pre-wrap">{text}</p>
        }
        .into_view(),
    };

    view! {
        {body}
        {copy}
    }
}

fn styled(spans: &[Span]) -> View {
    spans
        .iter()
        .map(|span| {
            let text = span.text.clone();
            match (span.strong, span.emphasis) {
                (true, true) => view! { <b><i>{text}</i></b> }.into_view(),
                (true, false) => view! { <b>{text}</b> }.into_view(),
                (false, true) => view! { <i>{text}</i> }.into_view(),
                (false, false) => text.into_view(),
            }
        })
        .collect_view()
}

#[component]
fn CopyButton(label: &'static str, content: String) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    view! {
        <button
            on:click=move |_| state.copy(content.clone())
            class="mt-2 text-sm text-emerald-400 hover:underline"
        >
            {label}
        </button>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages_align_right() {
        assert_eq!(bubble_classes(Role::User).0, "flex justify-end");
        assert_eq!(bubble_classes(Role::Assistant).0, "flex justify-start");
    }
}
