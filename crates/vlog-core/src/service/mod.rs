//! Vlog use cases: listing, detail, create, edit, delete and categories.
//!
//! Every operation is a single entity read or mutation against the store;
//! authorization runs before any write.

mod admin;

use std::sync::Arc;

use chrono::Utc;

use crate::authz::{self, Mutation};
use crate::config::VlogConfig;
use crate::domain::{Actor, Category, Post};
use crate::error::{DomainError, RepoError};
use crate::form::PostForm;
use crate::pagination::{Page, PageRequest, Paginator};
use crate::ports::{CategoryRepository, PostRepository};
use crate::query::PostFilter;
use crate::slug;

pub use admin::{AdminListQuery, BatchOutcome};

const SLUG_ATTEMPTS: u32 = 100;
const FALLBACK_SLUG: &str = "vlog";

/// Query parameters of the public listing.
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    /// Category slug.
    pub category: Option<String>,
    /// Free-text search.
    pub q: Option<String>,
    /// Raw page parameter.
    pub page: Option<String>,
}

/// Result of the public listing.
#[derive(Debug, Clone)]
pub struct Listing {
    pub page: Page<Post>,
    pub categories: Vec<Category>,
    pub search_query: String,
    pub selected_category: String,
}

/// A post as shown on its detail page.
#[derive(Debug, Clone)]
pub struct PostDetail {
    pub post: Post,
    pub category: Option<Category>,
    pub related: Vec<Post>,
}

/// A category with the number of posts filed under it.
#[derive(Debug, Clone)]
pub struct CategorySummary {
    pub category: Category,
    pub post_count: u64,
}

/// Entry point for every vlog operation.
pub struct VlogService {
    posts: Arc<dyn PostRepository>,
    categories: Arc<dyn CategoryRepository>,
    paginator: Paginator,
    admin_paginator: Paginator,
    config: VlogConfig,
}

impl VlogService {
    pub fn new(
        posts: Arc<dyn PostRepository>,
        categories: Arc<dyn CategoryRepository>,
        config: VlogConfig,
    ) -> Self {
        Self {
            posts,
            categories,
            paginator: Paginator::new(config.pagination),
            admin_paginator: Paginator::new(config.admin_pagination),
            config,
        }
    }

    pub fn config(&self) -> &VlogConfig {
        &self.config
    }

    /// Paginated listing filtered by category slug and search text.
    pub async fn list(&self, query: &ListQuery) -> Result<Listing, DomainError> {
        let request = PageRequest::parse(query.page.as_deref())?;
        let search_query = query.q.as_deref().unwrap_or_default().trim().to_string();
        let selected_category = query
            .category
            .as_deref()
            .unwrap_or_default()
            .trim()
            .to_string();

        let categories = self.categories.list().await?;
        let mut filter = PostFilter::all().with_search(&search_query);

        let page = if selected_category.is_empty() {
            self.fetch_page(&self.paginator, &filter, request).await?
        } else {
            match categories.iter().find(|c| c.slug == selected_category) {
                Some(category) => {
                    filter = filter.with_category(category.id);
                    self.fetch_page(&self.paginator, &filter, request).await?
                }
                None => {
                    tracing::debug!(category = %selected_category, "Unknown category slug");
                    Page {
                        items: Vec::new(),
                        meta: self.paginator.locate(0, request),
                    }
                }
            }
        };

        Ok(Listing {
            page,
            categories,
            search_query,
            selected_category,
        })
    }

    /// Read a post and count the view.
    ///
    /// The slug in the URL is not used for lookup; callers can compare it with
    /// the canonical one to redirect.
    pub async fn detail(&self, id: i64, url_slug: &str) -> Result<PostDetail, DomainError> {
        let post = self
            .posts
            .increment_views(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Vlog", id))?;

        if post.slug != url_slug {
            tracing::debug!(post_id = id, url_slug, slug = %post.slug, "Non-canonical slug");
        }
        tracing::debug!(post_id = id, views = post.views_count, "Vlog viewed");

        let (category, related) = match post.category_id {
            Some(category_id) => (
                self.categories.find_by_id(category_id).await?,
                self.posts
                    .find_related(category_id, post.id, self.config.related_limit)
                    .await?,
            ),
            None => (None, Vec::new()),
        };

        Ok(PostDetail {
            post,
            category,
            related,
        })
    }

    /// Context for the create form: the categories to choose from.
    pub async fn create_form(&self, actor: Option<&Actor>) -> Result<Vec<Category>, DomainError> {
        authz::require_authenticated(actor)?;
        Ok(self.categories.list().await?)
    }

    /// Create a post authored by the requester.
    pub async fn create(&self, actor: Option<&Actor>, form: PostForm) -> Result<Post, DomainError> {
        let actor = authz::require_authenticated(actor)?;
        let draft = form.validate()?;
        self.ensure_category_exists(draft.category_id).await?;

        let slug = self.unique_post_slug(&draft.title).await?;
        let post = self.posts.save(Post::new(actor.user_id, slug, draft)).await?;

        tracing::info!(post_id = post.id, author_id = %actor.user_id, slug = %post.slug, "Vlog created");
        Ok(post)
    }

    /// Context for the edit form. Author only.
    pub async fn edit_form(
        &self,
        actor: &Actor,
        id: i64,
    ) -> Result<(Post, Vec<Category>), DomainError> {
        let post = self.get_post(id).await?;
        authz::ensure_author(actor, &post, Mutation::Edit)?;
        Ok((post, self.categories.list().await?))
    }

    /// Apply an edit. Author only; the slug stays as created.
    pub async fn update(&self, actor: &Actor, id: i64, form: PostForm) -> Result<Post, DomainError> {
        let post = self.get_post(id).await?;
        authz::ensure_author(actor, &post, Mutation::Edit)?;

        let draft = form.validate()?;
        self.ensure_category_exists(draft.category_id).await?;

        // Views may land between the read above and this write.
        let post = self
            .posts
            .update_content(id, &draft, Utc::now())
            .await?
            .ok_or_else(|| DomainError::not_found("Vlog", id))?;

        tracing::info!(post_id = post.id, "Vlog updated");
        Ok(post)
    }

    /// The post about to be deleted, for the confirmation step. Author only.
    pub async fn delete_confirmation(&self, actor: &Actor, id: i64) -> Result<Post, DomainError> {
        let post = self.get_post(id).await?;
        authz::ensure_author(actor, &post, Mutation::Delete)?;
        Ok(post)
    }

    /// Hard-delete a post. Author only.
    pub async fn delete(&self, actor: &Actor, id: i64) -> Result<(), DomainError> {
        let post = self.get_post(id).await?;
        authz::ensure_author(actor, &post, Mutation::Delete)?;

        self.posts.delete(id).await.map_err(|e| match e {
            RepoError::NotFound => DomainError::not_found("Vlog", id),
            other => other.into(),
        })?;

        tracing::info!(post_id = id, "Vlog deleted");
        Ok(())
    }

    /// Every category with its post count, ordered by name.
    pub async fn categories(&self) -> Result<Vec<CategorySummary>, DomainError> {
        let categories = self.categories.list().await?;
        let counts = self.posts.count_by_category().await?;

        Ok(categories
            .into_iter()
            .map(|category| CategorySummary {
                post_count: counts.get(&category.id).copied().unwrap_or(0),
                category,
            })
            .collect())
    }

    async fn get_post(&self, id: i64) -> Result<Post, DomainError> {
        self.posts
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Vlog", id))
    }

    async fn ensure_category_exists(&self, category_id: i64) -> Result<(), DomainError> {
        if self.categories.find_by_id(category_id).await?.is_none() {
            return Err(DomainError::InvalidInput(vec![
                "category: Select a valid choice. That choice is not one of the available choices."
                    .to_string(),
            ]));
        }
        Ok(())
    }

    async fn unique_post_slug(&self, title: &str) -> Result<String, DomainError> {
        let base = match slug::slugify(title) {
            s if s.is_empty() => FALLBACK_SLUG.to_string(),
            s => s,
        };

        for n in 1..=SLUG_ATTEMPTS {
            let candidate = slug::candidate(&base, n);
            if slug::is_reserved(&candidate) {
                continue;
            }
            if !self.posts.slug_exists(&candidate).await? {
                return Ok(candidate);
            }
        }

        Err(DomainError::Duplicate(format!(
            "Could not find a free slug for '{base}'"
        )))
    }

    async fn fetch_page(
        &self,
        paginator: &Paginator,
        filter: &PostFilter,
        request: PageRequest,
    ) -> Result<Page<Post>, DomainError> {
        let total = self.posts.count(filter).await?;
        let meta = paginator.locate(total, request);
        let items = if total == 0 {
            Vec::new()
        } else {
            self.posts.search(filter, meta.window()).await?
        };

        Ok(Page { items, meta })
    }
}
