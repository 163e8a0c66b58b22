//! Board model for StudyLog.
//!
//! A board is a named category grouping posts.

use serde::{Deserialize, Serialize};

/// Board (category) as served by the application backend.
///
/// The backend spells the id `bId`; older payloads use `bid` or `id`.
/// Entries without an id are kept so callers can skip them explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// Board ID.
    #[serde(rename = "bId", alias = "bid", alias = "id", default)]
    pub id: Option<i64>,
    /// Category label shown to users.
    #[serde(default)]
    pub category: String,
}

impl Board {
    /// Create a board with the given id and label.
    pub fn new(id: i64, category: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            category: category.into(),
        }
    }
}

/// Request body for creating or renaming a board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardCategory {
    /// New category label.
    pub category: String,
}

impl BoardCategory {
    /// Create a request body with a label.
    pub fn new(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
        }
    }
}
