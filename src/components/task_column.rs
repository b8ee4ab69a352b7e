//! Task Column Component
//!
//! One board column; the whole column body is a drop zone.

use leptos::prelude::*;
use leptos_dragdrop::{
    make_on_zone_dragenter, make_on_zone_dragleave, make_on_zone_dragover, make_on_zone_drop,
};
use taskboard_core::board::Column;
use taskboard_core::BoardCommand;

use crate::components::TaskCard;
use crate::context::AppContext;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn TaskColumn(column: Column) -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let store = use_app_store();
    let dnd = ctx.dnd;

    let tasks = move || store.columns().with(|columns| columns.column(column).to_vec());
    let count = move || store.columns().with(|columns| columns.column(column).len());
    let placeholder = move || store.columns().with(|columns| columns.placeholder(column));

    let on_drop = make_on_zone_drop(dnd, move |intent| ctx.send(BoardCommand::MoveTask(intent)));

    let zone_class = move || {
        if dnd.is_active_zone(column) {
            "task-list drop-zone active"
        } else {
            "task-list drop-zone"
        }
    };

    view! {
        <section class=format!("board-column {}", column.zone_key())>
            <header class="column-header">
                <h2>{column.title()}</h2>
                <span class="column-count">{count}</span>
            </header>
            <div
                class=zone_class
                data-status=column.zone_key()
                on:dragover=make_on_zone_dragover()
                on:dragenter=make_on_zone_dragenter(dnd, column)
                on:dragleave=make_on_zone_dragleave(dnd, column)
                on:drop=on_drop
            >
                {move || placeholder().map(|text| view! { <p class="empty-state">{text}</p> })}
                <For
                    each=tasks
                    key=|task| (task.id, task.updated_at, task.status, task.completed)
                    children=move |task| view! { <TaskCard task=task /> }
                />
            </div>
        </section>
    }
}
