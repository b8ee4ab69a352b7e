//! Board View Component
//!
//! The three status columns side by side.

use leptos::prelude::*;
use taskboard_core::board::Column;

use crate::components::TaskColumn;

#[component]
pub fn BoardView() -> impl IntoView {
    view! {
        <div class="board">
            {Column::ALL
                .into_iter()
                .map(|column| view! { <TaskColumn column=column /> })
                .collect_view()}
        </div>
    }
}
