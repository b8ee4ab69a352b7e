//! Login Form Component
//!
//! Shown whenever there is no session.

use leptos::prelude::*;
use taskboard_core::BoardCommand;

use crate::context::AppContext;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn LoginForm() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let store = use_app_store();

    let (username, set_username) = signal(String::new());
    let (password, set_password) = signal(String::new());

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        ctx.send(BoardCommand::Login {
            username_or_email: username.get_untracked(),
            password: password.get_untracked(),
        });
        set_password.set(String::new());
    };

    view! {
        <div class="login-page">
            <form class="login-form" on:submit=on_submit>
                <h1>"Task Manager"</h1>
                <input
                    type="text"
                    placeholder="Username or email"
                    autocomplete="username"
                    prop:value=move || username.get()
                    on:input=move |ev| set_username.set(event_target_value(&ev))
                />
                <input
                    type="password"
                    placeholder="Password"
                    autocomplete="current-password"
                    prop:value=move || password.get()
                    on:input=move |ev| set_password.set(event_target_value(&ev))
                />
                <button type="submit" disabled=move || store.busy().get()>
                    {move || if store.busy().get() { "Signing in…" } else { "Login" }}
                </button>
            </form>
        </div>
    }
}
