//! Profile Form Component
//!
//! Sidebar with the profile intake form and its show/hide toggle.

use leptos::*;

use nutrichat::{Gender, Goal, ProfileForm};

use crate::components::ErrorLine;
use crate::state::global::GlobalState;

const FIELD_CLASS: &str = "w-full p-2 text-sm border rounded-md bg-gray-700 text-gray-200 \
                           border-gray-600 focus:ring-2 focus:ring-emerald-500 outline-none";

/// Profile sidebar
#[component]
pub fn ProfilePanel() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let conversation = state.conversation;
    let form_open = create_memo(move |_| conversation.with(|c| c.is_form_open()));

    view! {
        <aside class="w-80 p-4 bg-gray-800 bg-opacity-90 shadow-lg space-y-4">
            <h1 class="text-xl font-bold text-gray-100">"Nutrichat"</h1>
            <button
                on:click=move |_| conversation.update(|c| c.toggle_form())
                class="w-full py-2 text-sm bg-gray-700 hover:bg-gray-600 rounded-md transition-colors"
            >
                {move || if form_open.get() { "Hide Form" } else { "Show Form" }}
            </button>

            {move || {
                if form_open.get() {
                    view! {
                        <IntakeForm />
                        <ErrorLine />
                    }.into_view()
                } else {
                    view! {}.into_view()
                }
            }}
        </aside>
    }
}

/// The intake form itself
#[component]
fn IntakeForm() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let conversation = state.conversation;
    let loading = create_memo(move |_| conversation.with(|c| c.is_loading()));

    let field = move |read: fn(&ProfileForm) -> String| {
        Signal::derive(move || conversation.with(|c| read(c.form())))
    };
    let edit = move |write: fn(&mut ProfileForm, String)| {
        move |value: String| conversation.update(|c| write(c.form_mut(), value))
    };

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        state.submit_profile();
    };

    view! {
        <form on:submit=on_submit class="space-y-2">
            <TextField
                placeholder="Enter the User ID"
                required=true
                value=field(|f| f.user_id.clone())
                on_input=edit(|f, v| f.user_id = v)
            />
            <TextField
                placeholder="Enter your Age"
                input_type="number"
                value=field(|f| f.age.to_string())
                on_input=edit(|f, v| f.age = v.trim().parse().unwrap_or(0))
            />
            <TextField
                placeholder="Enter your Weight (kg)"
                input_type="number"
                required=true
                value=field(|f| f.weight.to_string())
                on_input=edit(|f, v| f.weight = v.trim().parse().unwrap_or(0.0))
            />
            <TextField
                placeholder="Enter your Height (e.g. 180 cm)"
                required=true
                value=field(|f| f.height.clone())
                on_input=edit(|f, v| f.height = v)
            />

            <select
                required=true
                prop:value=move || conversation.with(|c| c.form().gender.map(|g| g.as_str()).unwrap_or(""))
                on:change=move |ev| {
                    let value = event_target_value(&ev);
                    conversation.update(|c| c.form_mut().gender = value.parse().ok());
                }
                class=FIELD_CLASS
            >
                <option value="">"Gender"</option>
                {Gender::ALL
                    .into_iter()
                    .map(|g| view! { <option value=g.as_str()>{g.label()}</option> })
                    .collect_view()}
            </select>

            <TextField
                placeholder="Dietary Preferences (e.g. vegetarian)"
                value=field(|f| f.preferences.clone())
                on_input=edit(|f, v| f.preferences = v)
            />
            <TextField
                placeholder="Dietary Restrictions"
                value=field(|f| f.restrictions.clone())
                on_input=edit(|f, v| f.restrictions = v)
            />

            <select
                required=true
                prop:value=move || conversation.with(|c| c.form().goal.map(|g| g.as_str()).unwrap_or(""))
                on:change=move |ev| {
                    let value = event_target_value(&ev);
                    conversation.update(|c| c.form_mut().goal = value.parse().ok());
                }
                class=FIELD_CLASS
            >
                <option value="">"Goal"</option>
                {Goal::ALL
                    .into_iter()
                    .map(|g| view! { <option value=g.as_str()>{g.label()}</option> })
                    .collect_view()}
            </select>

            <button
                type="submit"
                disabled=move || loading.get()
                class="w-full py-2 text-sm font-medium bg-emerald-600 hover:bg-emerald-700 \
                       disabled:opacity-50 rounded-md transition-colors"
            >
                {move || if loading.get() { "Saving..." } else { "Save" }}
            </button>
        </form>
    }
}

#[component]
fn TextField(
    #[prop(into)]
    placeholder: String,
    #[prop(default = "text")]
    input_type: &'static str,
    #[prop(optional)]
    required: bool,
    value: Signal<String>,
    on_input: impl Fn(String) + 'static,
) -> impl IntoView {
    view! {
        <input
            type=input_type
            placeholder=placeholder
            required=required
            prop:value=move || value.get()
            on:input=move |ev| on_input(event_target_value(&ev))
            class=FIELD_CLASS
        />
    }
}
