//! Task Form Component
//!
//! Modal form for creating a task or editing an existing one. Opening it for
//! an edit prefills every field from the cached task; cancel resets to the
//! defaults. The form closes once the command bus reports success.

use chrono::NaiveDateTime;
use leptos::prelude::*;
use taskboard_core::domain::{Priority, TaskDraft, TaskStatus};
use taskboard_core::BoardCommand;

use crate::context::AppContext;
use crate::store::{store_close_form, store_find_task, use_app_store, AppStateStoreFields};

/// Value format of `<input type="datetime-local">`
const DATETIME_LOCAL_FORMAT: &str = "%Y-%m-%dT%H:%M";

fn parse_due_date(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, DATETIME_LOCAL_FORMAT).ok()
}

#[component]
pub fn TaskForm() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let store = use_app_store();

    let (title, set_title) = signal(String::new());
    let (description, set_description) = signal(String::new());
    let (priority, set_priority) = signal(Priority::default());
    let (status, set_status) = signal(TaskStatus::default());
    let (category_id, set_category_id) = signal(String::new());
    let (due_date, set_due_date) = signal(String::new());

    let load_draft = move |draft: TaskDraft| {
        set_title.set(draft.title);
        set_description.set(draft.description.unwrap_or_default());
        set_priority.set(draft.priority);
        set_status.set(draft.status);
        set_category_id.set(draft.category_id.map(|id| id.to_string()).unwrap_or_default());
        set_due_date.set(
            draft
                .due_date
                .map(|d| d.format(DATETIME_LOCAL_FORMAT).to_string())
                .unwrap_or_default(),
        );
    };

    // Prefill whenever the form opens
    Effect::new(move |_| {
        if !store.form_open().get() {
            return;
        }
        let draft = store
            .editing()
            .get()
            .and_then(|id| store_find_task(&store, id))
            .map(|task| TaskDraft::from_task(&task))
            .unwrap_or_default();
        load_draft(draft);
    });

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let description = description.get_untracked();
        let draft = TaskDraft {
            title: title.get_untracked(),
            description: (!description.trim().is_empty()).then_some(description),
            priority: priority.get_untracked(),
            status: status.get_untracked(),
            category_id: category_id.get_untracked().parse().ok(),
            due_date: parse_due_date(&due_date.get_untracked()),
        };
        ctx.send(BoardCommand::SubmitTask {
            target: store.editing().get_untracked(),
            draft,
        });
    };

    let on_cancel = move |_| {
        load_draft(TaskDraft::default());
        store_close_form(&store);
    };

    let heading = move || if store.editing().get().is_some() { "Edit Task" } else { "New Task" };

    view! {
        <Show when=move || store.form_open().get()>
            <div class="modal-backdrop">
                <form class="task-form" on:submit=on_submit>
                    <h2>{heading}</h2>
                    <input
                        type="text"
                        placeholder="Task title"
                        maxlength="200"
                        required=true
                        prop:value=move || title.get()
                        on:input=move |ev| set_title.set(event_target_value(&ev))
                    />
                    <textarea
                        placeholder="Description (optional)"
                        maxlength="1000"
                        prop:value=move || description.get()
                        on:input=move |ev| set_description.set(event_target_value(&ev))
                    ></textarea>
                    <div class="task-form-row">
                        <label>
                            "Priority"
                            <select
                                prop:value=move || priority.get().as_str()
                                on:change=move |ev| {
                                    if let Ok(p) = event_target_value(&ev).parse() {
                                        set_priority.set(p);
                                    }
                                }
                            >
                                {Priority::ALL
                                    .iter()
                                    .map(|p| view! { <option value=p.as_str()>{p.as_str()}</option> })
                                    .collect_view()}
                            </select>
                        </label>
                        <label>
                            "Status"
                            <select
                                prop:value=move || status.get().as_str()
                                on:change=move |ev| {
                                    if let Ok(s) = event_target_value(&ev).parse() {
                                        set_status.set(s);
                                    }
                                }
                            >
                                {TaskStatus::ALL
                                    .iter()
                                    .map(|s| view! { <option value=s.as_str()>{s.label()}</option> })
                                    .collect_view()}
                            </select>
                        </label>
                    </div>
                    <div class="task-form-row">
                        <label>
                            "Category"
                            <select
                                prop:value=move || category_id.get()
                                on:change=move |ev| set_category_id.set(event_target_value(&ev))
                            >
                                <option value="">"No category"</option>
                                <For
                                    each=move || store.categories().get()
                                    key=|category| category.id
                                    children=move |category| {
                                        view! { <option value=category.id.to_string()>{category.name}</option> }
                                    }
                                />
                            </select>
                        </label>
                        <label>
                            "Due date"
                            <input
                                type="datetime-local"
                                prop:value=move || due_date.get()
                                on:input=move |ev| set_due_date.set(event_target_value(&ev))
                            />
                        </label>
                    </div>
                    <div class="task-form-actions">
                        <button type="button" class="cancel-btn" on:click=on_cancel>
                            "Cancel"
                        </button>
                        <button type="submit" disabled=move || store.busy().get()>
                            {move || if store.editing().get().is_some() { "Save" } else { "Create" }}
                        </button>
                    </div>
                </form>
            </div>
        </Show>
    }
}
