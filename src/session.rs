//! Browser Session Store
//!
//! Keeps the credential in `localStorage` under `token`, `username` and
//! `email`, so a reload stays signed in.

use taskboard_core::session::{Session, SessionStore};
use tracing::warn;

const TOKEN_KEY: &str = "token";
const USERNAME_KEY: &str = "username";
const EMAIL_KEY: &str = "email";

#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStorageSession;

fn storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

impl SessionStore for LocalStorageSession {
    fn credential(&self) -> Option<Session> {
        let storage = storage()?;
        let token = storage.get_item(TOKEN_KEY).ok()?.filter(|t| !t.is_empty())?;
        Some(Session {
            token,
            username: storage.get_item(USERNAME_KEY).ok().flatten().unwrap_or_default(),
            email: storage.get_item(EMAIL_KEY).ok().flatten(),
        })
    }

    fn store(&self, session: &Session) {
        let Some(storage) = storage() else {
            warn!("localStorage unavailable, session not persisted");
            return;
        };
        let _ = storage.set_item(TOKEN_KEY, &session.token);
        let _ = storage.set_item(USERNAME_KEY, &session.username);
        match &session.email {
            Some(email) => {
                let _ = storage.set_item(EMAIL_KEY, email);
            }
            None => {
                let _ = storage.remove_item(EMAIL_KEY);
            }
        }
    }

    fn clear(&self) {
        if let Some(storage) = storage() {
            for key in [TOKEN_KEY, USERNAME_KEY, EMAIL_KEY] {
                let _ = storage.remove_item(key);
            }
        }
    }
}
