//! Task Card Component
//!
//! A draggable card with priority, category, due date and actions.

use leptos::prelude::*;
use leptos_dragdrop::{make_on_dragend, make_on_dragstart};
use taskboard_core::domain::Task;
use taskboard_core::BoardCommand;

use crate::components::DeleteConfirmButton;
use crate::context::AppContext;
use crate::store::{store_open_form, use_app_store};

const DUE_DATE_FORMAT: &str = "%b %d, %Y %H:%M";

#[component]
pub fn TaskCard(task: Task) -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let store = use_app_store();
    let dnd = ctx.dnd;
    let id = task.id;

    let is_dragging = move || dnd.dragging_id() == Some(id);
    let card_class = move || {
        let mut class = String::from("task-card");
        if task.completed {
            class.push_str(" completed");
        }
        if is_dragging() {
            class.push_str(" dragging");
        }
        class
    };

    // A click that ends a drag is not an edit
    let on_edit = move |_| {
        if !dnd.drag_just_ended_read.get_untracked() {
            store_open_form(&store, Some(id));
        }
    };

    let category = task.category.clone().map(|category| {
        view! {
            <span class="category-badge" style=format!("background-color: {};", category.color_code)>
                {category.name}
            </span>
        }
    });
    let due = task.due_date.map(|due| {
        view! { <span class="due-date">{format!("Due: {}", due.format(DUE_DATE_FORMAT))}</span> }
    });

    view! {
        <div
            class=card_class
            draggable="true"
            on:dragstart=make_on_dragstart(dnd, id)
            on:dragend=make_on_dragend(dnd)
        >
            <div class="task-card-header">
                <h3 class="task-title">{task.title.clone()}</h3>
                <span class=format!("priority-badge {}", task.priority.css_class())>
                    {task.priority.as_str()}
                </span>
            </div>
            {task.description.clone().map(|d| view! { <p class="task-description">{d}</p> })}
            <div class="task-meta">
                {category}
                {due}
            </div>
            <div class="task-actions">
                <button
                    class="toggle-btn"
                    title=if task.completed { "Mark as pending" } else { "Mark as completed" }
                    on:click=move |_| ctx.send(BoardCommand::ToggleTask(id))
                >
                    {if task.completed { "↺" } else { "✓" }}
                </button>
                <button class="edit-btn" title="Edit" on:click=on_edit>
                    "✎"
                </button>
                <DeleteConfirmButton
                    button_class="delete-btn"
                    prompt="Delete this task?"
                    on_confirm=move |_| ctx.send(BoardCommand::DeleteTask(id))
                />
            </div>
        </div>
    }
}
