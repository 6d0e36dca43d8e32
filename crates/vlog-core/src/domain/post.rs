use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::form::PostDraft;
use crate::video;

/// Post entity - a single vlog referencing an externally hosted video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// Surrogate key; `0` until the store assigns one.
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub video_url: String,
    pub description: String,
    pub author_id: Uuid,
    pub category_id: Option<i64>,
    pub tags: String,
    pub thumbnail: Option<String>,
    pub views_count: i64,
    pub published_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_date: DateTime<Utc>,
}

/// Whether a post is already visible or waiting for its publication date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PublicationStatus {
    Published,
    Scheduled,
}

impl Post {
    /// Create an unsaved post owned by `author_id`.
    pub fn new(author_id: Uuid, slug: String, draft: PostDraft) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            title: draft.title,
            slug,
            video_url: draft.video_url,
            description: draft.description,
            author_id,
            category_id: Some(draft.category_id),
            tags: draft.tags,
            thumbnail: draft.thumbnail,
            views_count: 0,
            published_date: draft.published_date,
            created_at: now,
            updated_date: now,
        }
    }

    /// Apply an edit. Author, slug and counters are left untouched.
    pub fn apply(&mut self, draft: PostDraft, now: DateTime<Utc>) {
        self.title = draft.title;
        self.video_url = draft.video_url;
        self.description = draft.description;
        self.category_id = Some(draft.category_id);
        self.tags = draft.tags;
        self.thumbnail = draft.thumbnail;
        self.published_date = draft.published_date;
        self.updated_date = now;
    }

    pub fn is_persisted(&self) -> bool {
        self.id != 0
    }

    /// Tags as a list, trimmed, empties dropped.
    pub fn tags_list(&self) -> Vec<&str> {
        self.tags
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .collect()
    }

    pub fn status(&self, now: DateTime<Utc>) -> PublicationStatus {
        if self.published_date > now {
            PublicationStatus::Scheduled
        } else {
            PublicationStatus::Published
        }
    }

    /// Canonical detail path.
    pub fn absolute_url(&self) -> String {
        format!("/vlog/{}/{}/", self.id, self.slug)
    }

    /// Embeddable player URL for YouTube and Vimeo links.
    pub fn embed_url(&self) -> Option<String> {
        video::embed_url(&self.video_url)
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use chrono::Duration;

    pub fn post(id: i64, title: &str, category_id: Option<i64>, days_ago: i64) -> Post {
        let published = Utc::now() - Duration::days(days_ago);
        Post {
            id,
            title: title.to_string(),
            slug: crate::slug::slugify(title),
            video_url: "https://www.youtube.com/watch?v=rHux0gMZ3Eg".to_string(),
            description: format!("About {title}"),
            author_id: Uuid::nil(),
            category_id,
            tags: String::new(),
            thumbnail: None,
            views_count: 0,
            published_date: published,
            created_at: published,
            updated_date: published,
        }
    }
}
