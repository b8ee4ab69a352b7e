//! Notification Toasts
//!
//! Renders the store's notices; each one is removed by the command bus
//! after its timeout, or earlier when clicked.

use leptos::prelude::*;

use crate::store::{store_dismiss_notice, use_app_store, AppStateStoreFields};

#[component]
pub fn NotificationToast() -> impl IntoView {
    let store = use_app_store();

    view! {
        <div class="notification-stack">
            <For
                each=move || store.notices().get()
                key=|notice| notice.id
                children=move |notice| {
                    let id = notice.id;
                    view! {
                        <div
                            class=notice.kind.css_class()
                            role="status"
                            on:click=move |_| store_dismiss_notice(&store, id)
                        >
                            {notice.message}
                        </div>
                    }
                }
            />
        </div>
    }
}
