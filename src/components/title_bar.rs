//! Title Bar Component
//!
//! App title, signed-in user and logout.

use leptos::prelude::*;
use taskboard_core::BoardCommand;

use crate::context::AppContext;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn TitleBar() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let store = use_app_store();

    let username = move || {
        store
            .session()
            .with(|s| s.as_ref().map(|s| s.username.clone()).unwrap_or_default())
    };

    view! {
        <header class="custom-titlebar">
            <div class="titlebar-drag-region">
                <span class="titlebar-title">"Task Manager"</span>
                <Show when=move || store.busy().get()>
                    <span class="titlebar-busy">"…"</span>
                </Show>
            </div>
            <div class="titlebar-controls">
                <span class="titlebar-user">{username}</span>
                <button class="titlebar-btn logout" on:click=move |_| ctx.send(BoardCommand::Logout)>
                    "Logout"
                </button>
            </div>
        </header>
    }
}
