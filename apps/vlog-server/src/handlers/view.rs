//! Domain values to wire DTOs.

use chrono::Utc;

use vlog_core::domain::{Category, Post, PublicationStatus};
use vlog_core::pagination::PageMeta;
use vlog_core::service::CategorySummary;
use vlog_shared::dto::{CategoryResponse, PaginationResponse, PostResponse, PostSummary};

fn tags(post: &Post) -> Vec<String> {
    post.tags_list().into_iter().map(str::to_string).collect()
}

pub fn post_summary(post: &Post) -> PostSummary {
    PostSummary {
        id: post.id,
        title: post.title.clone(),
        slug: post.slug.clone(),
        url: post.absolute_url(),
        video_url: post.video_url.clone(),
        thumbnail: post.thumbnail.clone(),
        category_id: post.category_id,
        tags: tags(post),
        views_count: post.views_count,
        published_date: post.published_date,
    }
}

pub fn post_response(post: &Post) -> PostResponse {
    let status = match post.status(Utc::now()) {
        PublicationStatus::Published => "published",
        PublicationStatus::Scheduled => "scheduled",
    };

    PostResponse {
        id: post.id,
        title: post.title.clone(),
        slug: post.slug.clone(),
        url: post.absolute_url(),
        video_url: post.video_url.clone(),
        embed_url: post.embed_url(),
        description: post.description.clone(),
        author_id: post.author_id,
        category_id: post.category_id,
        tags: tags(post),
        thumbnail: post.thumbnail.clone(),
        views_count: post.views_count,
        status: status.to_string(),
        published_date: post.published_date,
        created_at: post.created_at,
        updated_date: post.updated_date,
    }
}

pub fn category_response(category: &Category) -> CategoryResponse {
    CategoryResponse {
        id: category.id,
        name: category.name.clone(),
        slug: category.slug.clone(),
        description: category.description.clone(),
        post_count: None,
    }
}

pub fn category_summary(summary: &CategorySummary) -> CategoryResponse {
    CategoryResponse {
        post_count: Some(summary.post_count),
        ..category_response(&summary.category)
    }
}

pub fn pagination(meta: &PageMeta) -> PaginationResponse {
    PaginationResponse {
        page: meta.number,
        page_size: meta.page_size,
        total_items: meta.total_items,
        total_pages: meta.total_pages,
        has_previous: meta.has_previous(),
        has_next: meta.has_next(),
        previous_page: meta.previous_page_number(),
        next_page: meta.next_page_number(),
        start_index: meta.start_index(),
        end_index: meta.end_index(),
    }
}
