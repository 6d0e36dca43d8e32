//! Post entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::{NotSet, Set};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    #[sea_orm(unique)]
    pub slug: String,
    pub video_url: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub author_id: Uuid,
    pub category_id: Option<i64>,
    pub tags: String,
    pub thumbnail: Option<String>,
    pub views_count: i64,
    pub published_date: DateTimeWithTimeZone,
    pub created_at: DateTimeWithTimeZone,
    pub updated_date: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::AuthorId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Author,
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    Category,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain Post.
impl From<Model> for vlog_core::domain::Post {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            slug: model.slug,
            video_url: model.video_url,
            description: model.description,
            author_id: model.author_id,
            category_id: model.category_id,
            tags: model.tags,
            thumbnail: model.thumbnail,
            views_count: model.views_count,
            published_date: model.published_date.into(),
            created_at: model.created_at.into(),
            updated_date: model.updated_date.into(),
        }
    }
}

/// Conversion from Domain Post to SeaORM ActiveModel.
///
/// An unsaved post (id 0) leaves the key unset so the database assigns it.
impl From<vlog_core::domain::Post> for ActiveModel {
    fn from(post: vlog_core::domain::Post) -> Self {
        Self {
            id: if post.is_persisted() { Set(post.id) } else { NotSet },
            title: Set(post.title),
            slug: Set(post.slug),
            video_url: Set(post.video_url),
            description: Set(post.description),
            author_id: Set(post.author_id),
            category_id: Set(post.category_id),
            tags: Set(post.tags),
            thumbnail: Set(post.thumbnail),
            views_count: Set(post.views_count),
            published_date: Set(post.published_date.into()),
            created_at: Set(post.created_at.into()),
            updated_date: Set(post.updated_date.into()),
        }
    }
}
