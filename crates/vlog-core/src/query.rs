//! Post filtering: category, author and free-text search.

use std::cmp::Ordering;

use uuid::Uuid;

use crate::domain::Post;

/// Filters applied to the post collection. All present filters must match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostFilter {
    pub category_id: Option<i64>,
    pub author_id: Option<Uuid>,
    search: Option<String>,
}

impl PostFilter {
    /// No filters: every post.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_category(mut self, category_id: i64) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn with_author(mut self, author_id: Uuid) -> Self {
        self.author_id = Some(author_id);
        self
    }

    /// Set the search text. Blank text clears the text filter.
    pub fn with_search(mut self, text: impl AsRef<str>) -> Self {
        let text = text.as_ref().trim();
        self.search = (!text.is_empty()).then(|| text.to_string());
        self
    }

    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    pub fn is_unfiltered(&self) -> bool {
        self.category_id.is_none() && self.author_id.is_none() && self.search.is_none()
    }

    /// Case-insensitive substring match on title, description or tags.
    fn matches_text(&self, post: &Post) -> bool {
        let Some(needle) = self.search.as_deref() else {
            return true;
        };
        let needle = needle.to_lowercase();

        [&post.title, &post.description, &post.tags]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }

    pub fn matches(&self, post: &Post) -> bool {
        if let Some(category_id) = self.category_id
            && post.category_id != Some(category_id)
        {
            return false;
        }
        if let Some(author_id) = self.author_id
            && post.author_id != author_id
        {
            return false;
        }
        self.matches_text(post)
    }
}

/// Listing order: newest `published_date` first, then highest id.
pub fn newest_first(a: &Post, b: &Post) -> Ordering {
    b.published_date
        .cmp(&a.published_date)
        .then_with(|| b.id.cmp(&a.id))
}

/// Escape LIKE wildcard characters so search text matches literally.
pub fn escape_like(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}
