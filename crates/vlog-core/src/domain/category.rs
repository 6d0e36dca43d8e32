use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Category entity - a named grouping of posts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Category {
    /// Create an unsaved category.
    pub fn new(name: String, slug: String, description: Option<String>) -> Self {
        Self {
            id: 0,
            name,
            slug,
            description,
            created_at: Utc::now(),
        }
    }
}
