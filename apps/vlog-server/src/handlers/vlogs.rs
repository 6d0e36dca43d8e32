//! Public vlog pages: listing, detail, and the author's create/edit/delete flow.

use actix_web::{HttpResponse, http::header, web};

use vlog_core::domain::Category;
use vlog_core::form::PostForm;
use vlog_core::service::ListQuery;
use vlog_shared::ApiResponse;
use vlog_shared::dto::{
    DeleteConfirmation, DetailResponse, FormContext, ListParams, ListResponse, PostRequest,
};

use super::view;
use crate::middleware::auth::{Identity, OptionalIdentity};
use crate::middleware::error::AppResult;
use crate::state::AppState;

fn post_form(req: PostRequest) -> PostForm {
    PostForm {
        title: req.title,
        video_url: req.video_url,
        description: req.description,
        category_id: req.category_id,
        tags: req.tags,
        thumbnail: req.thumbnail,
        published_date: req.published_date,
    }
}

fn form_context(action: &str, button_text: &str, categories: &[Category]) -> FormContext {
    FormContext {
        action: action.to_string(),
        button_text: button_text.to_string(),
        categories: categories.iter().map(view::category_response).collect(),
        post: None,
    }
}

/// GET /
pub async fn list(
    state: web::Data<AppState>,
    params: web::Query<ListParams>,
) -> AppResult<HttpResponse> {
    let params = params.into_inner();
    let query = ListQuery {
        category: params.category,
        q: params.q,
        page: params.page,
    };

    let listing = state.vlogs.list(&query).await?;

    Ok(HttpResponse::Ok().json(ListResponse {
        items: listing.page.items.iter().map(view::post_summary).collect(),
        pagination: view::pagination(&listing.page.meta),
        categories: listing.categories.iter().map(view::category_response).collect(),
        search_query: listing.search_query,
        selected_category: listing.selected_category,
    }))
}

/// GET /vlog/{id}/{slug}/
pub async fn detail(
    state: web::Data<AppState>,
    path: web::Path<(i64, String)>,
) -> AppResult<HttpResponse> {
    let (id, slug) = path.into_inner();
    let detail = state.vlogs.detail(id, &slug).await?;

    Ok(HttpResponse::Ok().json(DetailResponse {
        post: view::post_response(&detail.post),
        category: detail.category.as_ref().map(view::category_response),
        related: detail.related.iter().map(view::post_summary).collect(),
    }))
}

/// GET /vlog/new/
pub async fn new_form(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
) -> AppResult<HttpResponse> {
    let categories = state.vlogs.create_form(identity.actor().as_ref()).await?;

    Ok(HttpResponse::Ok().json(form_context("Create New Vlog", "Create Vlog", &categories)))
}

/// POST /vlog/new/
pub async fn create(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    body: web::Json<PostRequest>,
) -> AppResult<HttpResponse> {
    let post = state
        .vlogs
        .create(identity.actor().as_ref(), post_form(body.into_inner()))
        .await?;

    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, post.absolute_url()))
        .json(ApiResponse::ok_with_message(
            view::post_response(&post),
            "Vlog created successfully.",
        )))
}

/// GET /vlog/{id}/edit/
pub async fn edit_form(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let (post, categories) = state
        .vlogs
        .edit_form(&identity.actor(), path.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(FormContext {
        post: Some(view::post_response(&post)),
        ..form_context("Edit Vlog", "Update Vlog", &categories)
    }))
}

/// POST /vlog/{id}/edit/
pub async fn update(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<i64>,
    body: web::Json<PostRequest>,
) -> AppResult<HttpResponse> {
    let post = state
        .vlogs
        .update(&identity.actor(), path.into_inner(), post_form(body.into_inner()))
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        view::post_response(&post),
        "Vlog updated successfully.",
    )))
}

/// GET /vlog/{id}/delete/
pub async fn delete_confirmation(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let post = state
        .vlogs
        .delete_confirmation(&identity.actor(), path.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(DeleteConfirmation {
        message: format!("Are you sure you want to delete \"{}\"?", post.title),
        post: view::post_summary(&post),
    }))
}

/// POST /vlog/{id}/delete/
pub async fn delete(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    state
        .vlogs
        .delete(&identity.actor(), path.into_inner())
        .await?;

    Ok(HttpResponse::NoContent().finish())
}

/// GET /categories/
pub async fn categories(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let summaries = state.vlogs.categories().await?;

    Ok(HttpResponse::Ok().json(
        summaries
            .iter()
            .map(view::category_summary)
            .collect::<Vec<_>>(),
    ))
}
