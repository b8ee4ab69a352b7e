//! Category Panel Component
//!
//! Left sidebar listing categories with their task counts, plus the add form.

use leptos::prelude::*;
use taskboard_core::domain::{Category, NewCategory};
use taskboard_core::BoardCommand;

use crate::components::DeleteConfirmButton;
use crate::context::AppContext;
use crate::store::{use_app_store, AppStateStoreFields};

/// Category add form
#[component]
fn CategoryAddForm() -> impl IntoView {
    let ctx = expect_context::<AppContext>();

    let (name, set_name) = signal(String::new());
    let (description, set_description) = signal(String::new());
    let (color, set_color) = signal(ctx.default_category_color.get_value());

    let add_category = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let category = NewCategory::new(name.get_untracked())
            .with_description(description.get_untracked())
            .with_color(color.get_untracked());
        ctx.send(BoardCommand::CreateCategory(category));

        set_name.set(String::new());
        set_description.set(String::new());
        set_color.set(ctx.default_category_color.get_value());
    };

    view! {
        <form class="category-add-form" on:submit=add_category>
            <input
                type="text"
                placeholder="Category name"
                maxlength="100"
                prop:value=move || name.get()
                on:input=move |ev| set_name.set(event_target_value(&ev))
            />
            <input
                type="text"
                placeholder="Description (optional)"
                maxlength="255"
                prop:value=move || description.get()
                on:input=move |ev| set_description.set(event_target_value(&ev))
            />
            <div class="category-add-row">
                <input
                    type="color"
                    prop:value=move || color.get()
                    on:input=move |ev| set_color.set(event_target_value(&ev))
                />
                <button type="submit">"Add"</button>
            </div>
        </form>
    }
}

/// One category row
#[component]
fn CategoryRow(category: Category) -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let store = use_app_store();
    let id = category.id;

    let is_filtered = move || store.filter().with(|f| f.category_id == Some(id));
    let toggle_filter = move |_| {
        let next = if is_filtered() { None } else { Some(id) };
        ctx.send(BoardCommand::SetCategoryFilter(next));
    };

    view! {
        <div
            class=move || if is_filtered() { "category-row selected" } else { "category-row" }
            title=category.description.clone().unwrap_or_default()
            on:click=toggle_filter
        >
            <span class="category-color-dot" style=format!("background-color: {};", category.color_code)></span>
            <span class="category-name">{category.name.clone()}</span>
            <span class="category-count">{category.task_count.unwrap_or(0)}</span>
            <DeleteConfirmButton
                button_class="category-delete-btn"
                on_confirm=move |_| ctx.send(BoardCommand::DeleteCategory(id))
            />
        </div>
    }
}

#[component]
pub fn CategoryPanel() -> impl IntoView {
    let store = use_app_store();

    view! {
        <aside class="category-panel">
            <h2>"Categories"</h2>
            <Show
                when=move || store.categories().with(|c| !c.is_empty())
                fallback=|| view! { <p class="empty-state">"No categories yet"</p> }
            >
                <div class="category-list">
                    <For
                        each=move || store.categories().get()
                        key=|category| (category.id, category.task_count)
                        children=move |category| view! { <CategoryRow category=category /> }
                    />
                </div>
            </Show>
            <CategoryAddForm />
        </aside>
    }
}
