use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::batch::BatchAction;
use crate::domain::{Category, Post, User};
use crate::error::RepoError;
use crate::form::PostDraft;
use crate::pagination::Window;
use crate::query::PostFilter;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Save an entity (create or update).
    async fn save(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    /// Insert a new account. User ids are assigned client-side, so `save`
    /// alone cannot tell a new account from an update.
    async fn create(&self, user: User) -> Result<User, RepoError>;

    /// Find a user by their email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;
}

/// Category repository.
#[async_trait]
pub trait CategoryRepository: BaseRepository<Category, i64> {
    /// All categories ordered by name.
    async fn list(&self) -> Result<Vec<Category>, RepoError>;

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Category>, RepoError>;

    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, RepoError>;
}

/// Post repository: the query side of the content store.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, i64> {
    /// Matching posts, newest first, restricted to `window`.
    async fn search(&self, filter: &PostFilter, window: Window) -> Result<Vec<Post>, RepoError>;

    /// Number of posts matching `filter`.
    async fn count(&self, filter: &PostFilter) -> Result<u64, RepoError>;

    async fn slug_exists(&self, slug: &str) -> Result<bool, RepoError>;

    /// Overwrite the editable fields of a post in place and return it.
    /// Views, slug, author and creation time are never written.
    async fn update_content(
        &self,
        id: i64,
        draft: &PostDraft,
        now: DateTime<Utc>,
    ) -> Result<Option<Post>, RepoError>;

    /// Atomically add one view and return the updated post.
    async fn increment_views(&self, id: i64) -> Result<Option<Post>, RepoError>;

    /// Newest posts in `category_id`, excluding `exclude_id`.
    async fn find_related(
        &self,
        category_id: i64,
        exclude_id: i64,
        limit: u64,
    ) -> Result<Vec<Post>, RepoError>;

    /// Number of posts per category id. Categories without posts are absent.
    async fn count_by_category(&self) -> Result<HashMap<i64, u64>, RepoError>;

    /// Apply a bulk action to the given posts; returns the affected row count.
    async fn apply_batch(
        &self,
        ids: &[i64],
        action: BatchAction,
        now: DateTime<Utc>,
    ) -> Result<u64, RepoError>;
}
