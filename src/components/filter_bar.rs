//! Filter Bar Component
//!
//! Category and completion filters plus the "New Task" button.

use leptos::prelude::*;
use taskboard_core::BoardCommand;

use crate::context::AppContext;
use crate::store::{store_open_form, use_app_store, AppStateStoreFields};

/// Completion filter options: (select value, label)
const COMPLETION_OPTIONS: &[(&str, &str)] = &[("", "All tasks"), ("false", "Pending"), ("true", "Completed")];

#[component]
pub fn FilterBar() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let store = use_app_store();

    let on_category = move |ev: web_sys::Event| {
        let category_id = event_target_value(&ev).parse().ok();
        ctx.send(BoardCommand::SetCategoryFilter(category_id));
    };

    let on_completion = move |ev: web_sys::Event| {
        let completed = event_target_value(&ev).parse().ok();
        ctx.send(BoardCommand::SetCompletionFilter(completed));
    };

    let selected_category = move || {
        store
            .filter()
            .with(|f| f.category_id.map(|id| id.to_string()).unwrap_or_default())
    };
    let selected_completion = move || {
        store
            .filter()
            .with(|f| f.completed.map(|c| c.to_string()).unwrap_or_default())
    };

    view! {
        <div class="filter-bar">
            <select class="filter-select" prop:value=selected_category on:change=on_category>
                <option value="">"All categories"</option>
                <For
                    each=move || store.categories().get()
                    key=|category| category.id
                    children=move |category| {
                        view! { <option value=category.id.to_string()>{category.name}</option> }
                    }
                />
            </select>
            <select class="filter-select" prop:value=selected_completion on:change=on_completion>
                {COMPLETION_OPTIONS
                    .iter()
                    .map(|(value, label)| view! { <option value=*value>{*label}</option> })
                    .collect_view()}
            </select>
            <button class="new-task-btn" on:click=move |_| store_open_form(&store, None)>
                "+ New Task"
            </button>
        </div>
    }
}
