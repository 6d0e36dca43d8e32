//! Back-office operations. Every call requires a staff actor.

use chrono::Utc;
use uuid::Uuid;

use super::{CategorySummary, VlogService};
use crate::authz;
use crate::batch::{self, BatchAction};
use crate::domain::{Actor, Category, Post};
use crate::error::{DomainError, RepoError};
use crate::form::CategoryForm;
use crate::pagination::{Page, PageRequest};
use crate::query::PostFilter;
use crate::slug;

/// Filters of the back-office post list.
#[derive(Debug, Clone, Default)]
pub struct AdminListQuery {
    pub category_id: Option<i64>,
    pub author_id: Option<Uuid>,
    pub q: Option<String>,
    pub page: Option<String>,
}

/// What a bulk action did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOutcome {
    pub action: BatchAction,
    pub affected: u64,
    pub message: String,
}

impl VlogService {
    pub async fn admin_list(
        &self,
        actor: &Actor,
        query: &AdminListQuery,
    ) -> Result<Page<Post>, DomainError> {
        authz::ensure_staff(actor)?;
        let request = PageRequest::parse(query.page.as_deref())?;

        let mut filter = PostFilter::all().with_search(query.q.as_deref().unwrap_or_default());
        if let Some(category_id) = query.category_id {
            filter = filter.with_category(category_id);
        }
        if let Some(author_id) = query.author_id {
            filter = filter.with_author(author_id);
        }

        self.fetch_page(&self.admin_paginator, &filter, request).await
    }

    /// Apply `action` to every selected post in one store call.
    pub async fn run_batch(
        &self,
        actor: &Actor,
        ids: &[i64],
        action: BatchAction,
    ) -> Result<BatchOutcome, DomainError> {
        authz::ensure_staff(actor)?;
        batch::validate_ids(ids, self.config.max_batch_size)?;

        let affected = self.posts.apply_batch(ids, action, Utc::now()).await?;
        tracing::info!(
            %action,
            requested = ids.len(),
            affected,
            user_id = %actor.user_id,
            "Batch action applied"
        );

        Ok(BatchOutcome {
            action,
            affected,
            message: action.summary(affected),
        })
    }

    pub async fn admin_categories(&self, actor: &Actor) -> Result<Vec<CategorySummary>, DomainError> {
        authz::ensure_staff(actor)?;
        self.categories().await
    }

    /// Create a category; its slug is derived from the name.
    pub async fn create_category(
        &self,
        actor: &Actor,
        form: CategoryForm,
    ) -> Result<Category, DomainError> {
        authz::ensure_staff(actor)?;
        let draft = form.validate()?;

        let slug = slug::slugify(&draft.name);
        if slug.is_empty() {
            return Err(DomainError::InvalidInput(vec![
                "name: Enter a name containing letters or numbers.".to_string(),
            ]));
        }
        if self.categories.find_by_name(&draft.name).await?.is_some() {
            return Err(DomainError::Duplicate(format!(
                "Category with name '{}' already exists",
                draft.name
            )));
        }
        if self.categories.find_by_slug(&slug).await?.is_some() {
            return Err(DomainError::Duplicate(format!(
                "Category with slug '{slug}' already exists"
            )));
        }

        let category = self
            .categories
            .save(Category::new(draft.name, slug, draft.description))
            .await?;
        tracing::info!(category_id = category.id, slug = %category.slug, "Category created");
        Ok(category)
    }

    /// Delete a category. Its posts remain, uncategorised.
    pub async fn delete_category(&self, actor: &Actor, id: i64) -> Result<(), DomainError> {
        authz::ensure_staff(actor)?;
        self.categories.delete(id).await.map_err(|e| match e {
            RepoError::NotFound => DomainError::not_found("Category", id),
            other => other.into(),
        })?;
        tracing::info!(category_id = id, "Category deleted");
        Ok(())
    }
}
