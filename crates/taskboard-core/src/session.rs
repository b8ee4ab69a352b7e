//! Session Store
//!
//! Holds the bearer credential and display identity. The browser app backs
//! this with `localStorage`; tests and native tools use [`MemorySessionStore`].

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// An authenticated session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Opaque bearer token
    pub token: String,
    /// Display name
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
}

impl Session {
    pub fn new(token: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            username: username.into(),
            email: None,
        }
    }

    /// Value for the `Authorization` header
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

/// Credential storage
///
/// Methods take `&self`: implementations own their interior mutability
/// (browser storage, a `RefCell`, ...).
pub trait SessionStore {
    /// Current credential, if any
    fn credential(&self) -> Option<Session>;

    /// Persist a freshly issued credential
    fn store(&self, session: &Session);

    /// Remove credential and display identity. Must be idempotent.
    fn clear(&self);

    fn is_authenticated(&self) -> bool {
        self.credential().is_some()
    }
}

impl<S: SessionStore + ?Sized> SessionStore for Rc<S> {
    fn credential(&self) -> Option<Session> {
        (**self).credential()
    }

    fn store(&self, session: &Session) {
        (**self).store(session)
    }

    fn clear(&self) {
        (**self).clear()
    }
}

/// In-memory session store
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    session: RefCell<Option<Session>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: Session) -> Self {
        Self {
            session: RefCell::new(Some(session)),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn credential(&self) -> Option<Session> {
        self.session.borrow().clone()
    }

    fn store(&self, session: &Session) {
        *self.session.borrow_mut() = Some(session.clone());
    }

    fn clear(&self) {
        self.session.borrow_mut().take();
    }
}
