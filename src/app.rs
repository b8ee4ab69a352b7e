//! Task Board Frontend App
//!
//! Shows the login screen without a session, the board otherwise.

use leptos::prelude::*;
use leptos_dragdrop::create_dnd_signals;
use reactive_stores::Store;
use taskboard_core::session::SessionStore;
use taskboard_core::BoardCommand;

use crate::commands::spawn_command_loop;
use crate::components::{BoardView, CategoryPanel, FilterBar, LoginForm, NotificationToast, TaskForm, TitleBar};
use crate::context::{client_config, AppContext};
use crate::session::LocalStorageSession;
use crate::store::{AppState, AppStateStoreFields};

#[component]
pub fn App() -> impl IntoView {
    let config = client_config();
    let store = Store::new(AppState::new(LocalStorageSession.credential()));
    provide_context(store);

    let bus = spawn_command_loop(store, &config);
    let ctx = AppContext::new(bus, create_dnd_signals(), &config);
    provide_context(ctx);

    // Restored session: load right away. A fresh login loads by itself.
    if store.session().with_untracked(Option::is_some) {
        ctx.send(BoardCommand::Load);
    }

    let signed_in = move || store.session().with(Option::is_some);

    view! {
        <NotificationToast />
        <Show when=signed_in fallback=|| view! { <LoginForm /> }>
            <div class="app-layout">
                <TitleBar />
                <div class="board-layout">
                    <CategoryPanel />
                    <main class="main-content">
                        <FilterBar />
                        <BoardView />
                    </main>
                </div>
                <TaskForm />
            </div>
        </Show>
    }
}
