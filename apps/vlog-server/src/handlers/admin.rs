//! Back-office handlers. Staff only; the service enforces it.

use actix_web::{HttpResponse, web};

use vlog_core::batch::BatchAction;
use vlog_core::form::CategoryForm;
use vlog_core::service::AdminListQuery;
use vlog_shared::ApiResponse;
use vlog_shared::dto::{
    AdminListParams, AdminListResponse, BatchActionRequest, BatchActionResponse, CategoryRequest,
};

use super::view;
use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /admin/vlogs/
pub async fn list(
    state: web::Data<AppState>,
    identity: Identity,
    params: web::Query<AdminListParams>,
) -> AppResult<HttpResponse> {
    let params = params.into_inner();
    let query = AdminListQuery {
        category_id: params.category_id,
        author_id: params.author_id,
        q: params.q,
        page: params.page,
    };

    let page = state.vlogs.admin_list(&identity.actor(), &query).await?;

    Ok(HttpResponse::Ok().json(AdminListResponse {
        items: page.items.iter().map(view::post_response).collect(),
        pagination: view::pagination(&page.meta),
    }))
}

/// POST /admin/vlogs/actions/
pub async fn batch(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<BatchActionRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let action: BatchAction = req.action.parse()?;

    let outcome = state
        .vlogs
        .run_batch(&identity.actor(), &req.ids, action)
        .await?;

    Ok(HttpResponse::Ok().json(BatchActionResponse {
        action: outcome.action.to_string(),
        affected: outcome.affected,
        message: outcome.message,
    }))
}

/// GET /admin/categories/
pub async fn categories(
    state: web::Data<AppState>,
    identity: Identity,
) -> AppResult<HttpResponse> {
    let summaries = state.vlogs.admin_categories(&identity.actor()).await?;

    Ok(HttpResponse::Ok().json(
        summaries
            .iter()
            .map(view::category_summary)
            .collect::<Vec<_>>(),
    ))
}

/// POST /admin/categories/
pub async fn create_category(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<CategoryRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let form = CategoryForm {
        name: req.name,
        description: req.description,
    };

    let category = state.vlogs.create_category(&identity.actor(), form).await?;

    Ok(HttpResponse::Created().json(ApiResponse::ok_with_message(
        view::category_response(&category),
        format!("Category \"{}\" created.", category.name),
    )))
}

/// DELETE /admin/categories/{id}/
pub async fn delete_category(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    state
        .vlogs
        .delete_category(&identity.actor(), path.into_inner())
        .await?;

    Ok(HttpResponse::NoContent().finish())
}
