//! Application Context
//!
//! Shared handles provided via Leptos Context API.

use leptos::prelude::*;
use leptos_dragdrop::DndSignals;
use taskboard_core::config::ClientConfig;
use taskboard_core::BoardCommand;

use crate::commands::CommandBus;

/// Build-time API base URL override
const API_URL_OVERRIDE: Option<&str> = option_env!("TASKBOARD_API_URL");

pub fn client_config() -> ClientConfig {
    match API_URL_OVERRIDE {
        Some(url) => ClientConfig::default().with_base_url(url),
        None => ClientConfig::default(),
    }
}

/// App-wide handles provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    bus: StoredValue<CommandBus>,
    /// Drag-and-drop state shared by cards and columns
    pub dnd: DndSignals,
    /// Color preselected in the category form
    pub default_category_color: StoredValue<String>,
}

impl AppContext {
    pub fn new(bus: CommandBus, dnd: DndSignals, config: &ClientConfig) -> Self {
        Self {
            bus: StoredValue::new(bus),
            dnd,
            default_category_color: StoredValue::new(config.default_category_color.clone()),
        }
    }

    /// Queue a board command
    pub fn send(&self, command: BoardCommand) {
        self.bus.with_value(|bus| bus.send(command));
    }
}
