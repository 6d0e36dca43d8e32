//! In-memory content store - used when no database is configured and in tests.
//!
//! One [`InMemoryStore`] holds users, categories and posts behind a single
//! async `RwLock`, so every mutation (including the view-count increment) is
//! applied inside one write critical section. Data is lost on restart.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use vlog_core::batch::BatchAction;
use vlog_core::domain::{Category, Post, User};
use vlog_core::error::RepoError;
use vlog_core::form::PostDraft;
use vlog_core::pagination::Window;
use vlog_core::ports::{BaseRepository, CategoryRepository, PostRepository, UserRepository};
use vlog_core::query::{PostFilter, newest_first};

#[derive(Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    categories: BTreeMap<i64, Category>,
    posts: BTreeMap<i64, Post>,
    last_category_id: i64,
    last_post_id: i64,
}

impl Tables {
    fn matching_posts(&self, filter: &PostFilter) -> Vec<&Post> {
        let mut posts: Vec<&Post> = self.posts.values().filter(|p| filter.matches(p)).collect();
        posts.sort_by(|a, b| newest_first(a, b));
        posts
    }
}

fn conflict(what: &str) -> RepoError {
    RepoError::Constraint(format!("duplicate key value violates unique constraint on {what}"))
}

/// Content store backed by in-process maps.
#[derive(Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BaseRepository<User, Uuid> for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn save(&self, user: User) -> Result<User, RepoError> {
        let mut tables = self.tables.write().await;
        let clash = tables.users.values().any(|u| {
            u.id != user.id && (u.email == user.email || u.username == user.username)
        });
        if clash {
            return Err(conflict("users"));
        }
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        if tables.users.remove(&id).is_none() {
            return Err(RepoError::NotFound);
        }
        tables.posts.retain(|_, post| post.author_id != id);
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn create(&self, user: User) -> Result<User, RepoError> {
        if self.tables.read().await.users.contains_key(&user.id) {
            return Err(conflict("users.id"));
        }
        self.save(user).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.username == username).cloned())
    }
}

#[async_trait]
impl BaseRepository<Category, i64> for InMemoryStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<Category>, RepoError> {
        Ok(self.tables.read().await.categories.get(&id).cloned())
    }

    async fn save(&self, mut category: Category) -> Result<Category, RepoError> {
        let mut tables = self.tables.write().await;
        let clash = tables.categories.values().any(|c| {
            c.id != category.id && (c.name == category.name || c.slug == category.slug)
        });
        if clash {
            return Err(conflict("categories"));
        }

        if category.id == 0 {
            tables.last_category_id += 1;
            category.id = tables.last_category_id;
        } else if !tables.categories.contains_key(&category.id) {
            return Err(RepoError::NotFound);
        }
        tables.categories.insert(category.id, category.clone());
        Ok(category)
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        if tables.categories.remove(&id).is_none() {
            return Err(RepoError::NotFound);
        }
        for post in tables.posts.values_mut() {
            if post.category_id == Some(id) {
                post.category_id = None;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl CategoryRepository for InMemoryStore {
    async fn list(&self) -> Result<Vec<Category>, RepoError> {
        let tables = self.tables.read().await;
        let mut categories: Vec<Category> = tables.categories.values().cloned().collect();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Category>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.categories.values().find(|c| c.slug == slug).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.categories.values().find(|c| c.name == name).cloned())
    }
}

#[async_trait]
impl BaseRepository<Post, i64> for InMemoryStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, RepoError> {
        Ok(self.tables.read().await.posts.get(&id).cloned())
    }

    async fn save(&self, mut post: Post) -> Result<Post, RepoError> {
        let mut tables = self.tables.write().await;
        if tables
            .posts
            .values()
            .any(|p| p.id != post.id && p.slug == post.slug)
        {
            return Err(conflict("posts.slug"));
        }

        if post.is_persisted() {
            if !tables.posts.contains_key(&post.id) {
                return Err(RepoError::NotFound);
            }
        } else {
            tables.last_post_id += 1;
            post.id = tables.last_post_id;
        }
        tables.posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        match tables.posts.remove(&id) {
            Some(_) => Ok(()),
            None => Err(RepoError::NotFound),
        }
    }
}

#[async_trait]
impl PostRepository for InMemoryStore {
    async fn search(&self, filter: &PostFilter, window: Window) -> Result<Vec<Post>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables
            .matching_posts(filter)
            .into_iter()
            .skip(window.offset as usize)
            .take(window.limit as usize)
            .cloned()
            .collect())
    }

    async fn count(&self, filter: &PostFilter) -> Result<u64, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.posts.values().filter(|p| filter.matches(p)).count() as u64)
    }

    async fn slug_exists(&self, slug: &str) -> Result<bool, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.posts.values().any(|p| p.slug == slug))
    }

    async fn update_content(
        &self,
        id: i64,
        draft: &PostDraft,
        now: DateTime<Utc>,
    ) -> Result<Option<Post>, RepoError> {
        let mut tables = self.tables.write().await;
        Ok(tables.posts.get_mut(&id).map(|post| {
            post.apply(draft.clone(), now);
            post.clone()
        }))
    }

    async fn increment_views(&self, id: i64) -> Result<Option<Post>, RepoError> {
        let mut tables = self.tables.write().await;
        Ok(tables.posts.get_mut(&id).map(|post| {
            post.views_count += 1;
            post.clone()
        }))
    }

    async fn find_related(
        &self,
        category_id: i64,
        exclude_id: i64,
        limit: u64,
    ) -> Result<Vec<Post>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables
            .matching_posts(&PostFilter::all().with_category(category_id))
            .into_iter()
            .filter(|p| p.id != exclude_id)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn count_by_category(&self) -> Result<HashMap<i64, u64>, RepoError> {
        let tables = self.tables.read().await;
        let mut counts = HashMap::new();
        for category_id in tables.posts.values().filter_map(|p| p.category_id) {
            *counts.entry(category_id).or_insert(0) += 1;
        }
        Ok(counts)
    }

    async fn apply_batch(
        &self,
        ids: &[i64],
        action: BatchAction,
        now: DateTime<Utc>,
    ) -> Result<u64, RepoError> {
        let mut tables = self.tables.write().await;
        let mut affected = 0;

        for id in ids {
            match action {
                BatchAction::Delete => {
                    if tables.posts.remove(id).is_some() {
                        affected += 1;
                    }
                }
                BatchAction::ResetViews | BatchAction::Publish => {
                    let Some(post) = tables.posts.get_mut(id) else {
                        continue;
                    };
                    if action == BatchAction::ResetViews {
                        post.views_count = 0;
                    } else {
                        post.published_date = now;
                    }
                    post.updated_date = now;
                    affected += 1;
                }
            }
        }

        Ok(affected)
    }
}
