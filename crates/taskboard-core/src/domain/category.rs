//! Category Entity
//!
//! Categories group tasks. A task references at most one category.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::entity::Entity;
use crate::error::BoardError;

pub type CategoryId = u64;

/// Color applied when the user does not pick one
pub const DEFAULT_COLOR: &str = "#007bff";

pub const NAME_MAX_CHARS: usize = 100;
pub const DESCRIPTION_MAX_CHARS: usize = 255;

fn default_color() -> String {
    DEFAULT_COLOR.to_string()
}

/// A category as returned by `GET /categories`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Color (hex, e.g., "#FF5733")
    #[serde(default = "default_color")]
    pub color_code: String,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub updated_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub task_count: Option<u32>,
}

impl Category {
    pub fn new(id: CategoryId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: None,
            color_code: default_color(),
            created_at: None,
            updated_at: None,
            task_count: None,
        }
    }
}

impl Entity for Category {
    type Id = CategoryId;

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// Category summary embedded in a task record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRef {
    pub id: CategoryId,
    pub name: String,
    #[serde(default = "default_color")]
    pub color_code: String,
}

/// Payload for `POST /categories`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCategory {
    pub name: String,
    pub description: Option<String>,
    pub color_code: String,
}

impl NewCategory {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            color_code: default_color(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_color(mut self, color_code: impl Into<String>) -> Self {
        self.color_code = color_code.into();
        self
    }

    /// Check the server's field constraints and return the payload to send
    pub fn validated(&self) -> Result<NewCategory, BoardError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(BoardError::Validation("Category name is required".into()));
        }
        if name.chars().count() > NAME_MAX_CHARS {
            return Err(BoardError::Validation(format!(
                "Category name must be between 1 and {NAME_MAX_CHARS} characters"
            )));
        }
        let description = self
            .description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty());
        if description.is_some_and(|d| d.chars().count() > DESCRIPTION_MAX_CHARS) {
            return Err(BoardError::Validation(format!(
                "Description cannot exceed {DESCRIPTION_MAX_CHARS} characters"
            )));
        }
        let color_code = match self.color_code.trim() {
            "" => default_color(),
            color => color.to_string(),
        };

        Ok(NewCategory {
            name: name.to_string(),
            description: description.map(str::to_string),
            color_code,
        })
    }
}
