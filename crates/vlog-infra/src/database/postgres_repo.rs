//! PostgreSQL repository implementations.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::{Expr, Func, LikeExpr, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Select,
};

use vlog_core::batch::BatchAction;
use vlog_core::domain::{Category, Post, User};
use vlog_core::error::RepoError;
use vlog_core::form::PostDraft;
use vlog_core::pagination::Window;
use vlog_core::ports::{CategoryRepository, PostRepository, UserRepository};
use vlog_core::query::{PostFilter, escape_like};

use super::entity::category::{self, Entity as CategoryEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::{PostgresBaseRepository, map_db_err};

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL category repository.
pub type PostgresCategoryRepository = PostgresBaseRepository<CategoryEntity>;

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

/// Mask the local part of an email address for logging.
pub(crate) fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => {
            let first = local.chars().next();
            match first {
                Some(c) if local.chars().count() > 1 => format!("{c}***@{domain}"),
                _ => format!("***@{domain}"),
            }
        }
        None => "***".to_string(),
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: User) -> Result<User, RepoError> {
        let active: user::ActiveModel = user.into();
        let model = active.insert(&self.db).await.map_err(map_db_err)?;
        tracing::debug!(user_id = %model.id, "User created");
        Ok(model.into())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(user_email = %mask_email(email), "Finding user by email");

        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }
}

#[async_trait]
impl CategoryRepository for PostgresCategoryRepository {
    async fn list(&self) -> Result<Vec<Category>, RepoError> {
        let result = CategoryEntity::find()
            .order_by_asc(category::Column::Name)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Category>, RepoError> {
        let result = CategoryEntity::find()
            .filter(category::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, RepoError> {
        let result = CategoryEntity::find()
            .filter(category::Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }
}

/// Case-insensitive `LIKE` on one text column.
fn icontains(column: post::Column, pattern: &str) -> SimpleExpr {
    Expr::expr(Func::lower(Expr::col(column)))
        .like(LikeExpr::new(pattern.to_string()).escape('\\'))
}

/// Base query for a filter, newest first.
fn filtered(filter: &PostFilter) -> Select<PostEntity> {
    let mut select = PostEntity::find();

    if let Some(category_id) = filter.category_id {
        select = select.filter(post::Column::CategoryId.eq(category_id));
    }
    if let Some(author_id) = filter.author_id {
        select = select.filter(post::Column::AuthorId.eq(author_id));
    }
    if let Some(text) = filter.search() {
        let pattern = format!("%{}%", escape_like(&text.to_lowercase()));
        select = select.filter(
            Condition::any()
                .add(icontains(post::Column::Title, &pattern))
                .add(icontains(post::Column::Description, &pattern))
                .add(icontains(post::Column::Tags, &pattern)),
        );
    }

    select
        .order_by_desc(post::Column::PublishedDate)
        .order_by_desc(post::Column::Id)
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn search(&self, filter: &PostFilter, window: Window) -> Result<Vec<Post>, RepoError> {
        let result = filtered(filter)
            .offset(window.offset)
            .limit(window.limit)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn count(&self, filter: &PostFilter) -> Result<u64, RepoError> {
        filtered(filter).count(&self.db).await.map_err(map_db_err)
    }

    async fn slug_exists(&self, slug: &str) -> Result<bool, RepoError> {
        let count = PostEntity::find()
            .filter(post::Column::Slug.eq(slug))
            .count(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(count > 0)
    }

    async fn update_content(
        &self,
        id: i64,
        draft: &PostDraft,
        now: DateTime<Utc>,
    ) -> Result<Option<Post>, RepoError> {
        // Only editable columns; a full-row save would clobber concurrent view counts.
        let result = PostEntity::update_many()
            .col_expr(post::Column::Title, Expr::value(draft.title.clone()))
            .col_expr(post::Column::VideoUrl, Expr::value(draft.video_url.clone()))
            .col_expr(post::Column::Description, Expr::value(draft.description.clone()))
            .col_expr(post::Column::CategoryId, Expr::value(Some(draft.category_id)))
            .col_expr(post::Column::Tags, Expr::value(draft.tags.clone()))
            .col_expr(post::Column::Thumbnail, Expr::value(draft.thumbnail.clone()))
            .col_expr(post::Column::PublishedDate, Expr::value(draft.published_date))
            .col_expr(post::Column::UpdatedDate, Expr::value(now))
            .filter(post::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        let post = PostEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(post.map(Into::into))
    }

    async fn increment_views(&self, id: i64) -> Result<Option<Post>, RepoError> {
        // Single UPDATE; concurrent readers never overwrite each other's increment.
        let result = PostEntity::update_many()
            .col_expr(
                post::Column::ViewsCount,
                Expr::col(post::Column::ViewsCount).add(1),
            )
            .filter(post::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        let post = PostEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(post.map(Into::into))
    }

    async fn find_related(
        &self,
        category_id: i64,
        exclude_id: i64,
        limit: u64,
    ) -> Result<Vec<Post>, RepoError> {
        let result = filtered(&PostFilter::all().with_category(category_id))
            .filter(post::Column::Id.ne(exclude_id))
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn count_by_category(&self) -> Result<HashMap<i64, u64>, RepoError> {
        let rows: Vec<(Option<i64>, i64)> = PostEntity::find()
            .select_only()
            .column(post::Column::CategoryId)
            .column_as(Expr::col(post::Column::Id).count(), "post_count")
            .group_by(post::Column::CategoryId)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(rows
            .into_iter()
            .filter_map(|(category_id, count)| category_id.map(|id| (id, count.max(0) as u64)))
            .collect())
    }

    async fn apply_batch(
        &self,
        ids: &[i64],
        action: BatchAction,
        now: DateTime<Utc>,
    ) -> Result<u64, RepoError> {
        let selected = post::Column::Id.is_in(ids.iter().copied());

        let rows_affected = match action {
            BatchAction::ResetViews => {
                PostEntity::update_many()
                    .col_expr(post::Column::ViewsCount, Expr::value(0i64))
                    .col_expr(post::Column::UpdatedDate, Expr::value(now))
                    .filter(selected)
                    .exec(&self.db)
                    .await
                    .map_err(map_db_err)?
                    .rows_affected
            }
            BatchAction::Publish => {
                PostEntity::update_many()
                    .col_expr(post::Column::PublishedDate, Expr::value(now))
                    .col_expr(post::Column::UpdatedDate, Expr::value(now))
                    .filter(selected)
                    .exec(&self.db)
                    .await
                    .map_err(map_db_err)?
                    .rows_affected
            }
            BatchAction::Delete => {
                PostEntity::delete_many()
                    .filter(selected)
                    .exec(&self.db)
                    .await
                    .map_err(map_db_err)?
                    .rows_affected
            }
        };

        Ok(rows_affected)
    }
}
