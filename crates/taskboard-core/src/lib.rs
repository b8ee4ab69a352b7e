//! Task Board Engine
//!
//! Client-side state and synchronization for a personal task board: the
//! session store, the API gateway, task and category caches, column
//! classification and drag-and-drop status transitions.
//!
//! Nothing in here touches the DOM; the browser app drives a
//! [`BoardController`] and renders its [`BoardState`].

pub mod board;
pub mod cache;
pub mod config;
pub mod controller;
pub mod dnd;
pub mod domain;
pub mod error;
pub mod gateway;
pub mod notice;
pub mod session;

#[cfg(test)]
pub(crate) mod testing;

pub use board::{BoardColumns, Column};
pub use config::ClientConfig;
pub use controller::{BoardCommand, BoardController, BoardState, Flow};
pub use dnd::{DragContext, DragMachine, DragState, DropIntent};
pub use error::{ApiError, BoardError, BoardResult};
pub use session::{Session, SessionStore};
