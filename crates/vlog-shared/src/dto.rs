//! Data Transfer Objects - request/response types for the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Accounts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterUserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// A user's public information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub is_staff: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

// ---------------------------------------------------------------------------
// Vlogs
// ---------------------------------------------------------------------------

/// Query string of the public listing: `?category=<slug>&q=<text>&page=<n|last>`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListParams {
    pub category: Option<String>,
    pub q: Option<String>,
    pub page: Option<String>,
}

/// Body of the create and edit forms.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub video_url: String,
    #[serde(default)]
    pub description: String,
    pub category_id: Option<i64>,
    pub tags: Option<String>,
    pub thumbnail: Option<String>,
    pub published_date: Option<DateTime<Utc>>,
}

/// A post as it appears in listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostSummary {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub url: String,
    pub video_url: String,
    pub thumbnail: Option<String>,
    pub category_id: Option<i64>,
    pub tags: Vec<String>,
    pub views_count: i64,
    pub published_date: DateTime<Utc>,
}

/// Full post representation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub url: String,
    pub video_url: String,
    /// Player URL for recognised providers.
    pub embed_url: Option<String>,
    pub description: String,
    pub author_id: Uuid,
    pub category_id: Option<i64>,
    pub tags: Vec<String>,
    pub thumbnail: Option<String>,
    pub views_count: i64,
    /// `published` or `scheduled`.
    pub status: String,
    pub published_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_date: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryResponse {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_count: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationResponse {
    pub page: u64,
    pub page_size: u64,
    pub total_items: u64,
    pub total_pages: u64,
    pub has_previous: bool,
    pub has_next: bool,
    pub previous_page: Option<u64>,
    pub next_page: Option<u64>,
    /// 1-based index of the first item on the page (0 when empty).
    pub start_index: u64,
    pub end_index: u64,
}

/// Public listing page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse {
    pub items: Vec<PostSummary>,
    pub pagination: PaginationResponse,
    pub categories: Vec<CategoryResponse>,
    pub search_query: String,
    pub selected_category: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailResponse {
    pub post: PostResponse,
    pub category: Option<CategoryResponse>,
    pub related: Vec<PostSummary>,
}

/// What a client needs to render the create or edit form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormContext {
    /// Heading of the form, e.g. `Create New Vlog`.
    pub action: String,
    pub button_text: String,
    pub categories: Vec<CategoryResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post: Option<PostResponse>,
}

/// Delete confirmation step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteConfirmation {
    pub post: PostSummary,
    pub message: String,
}

// ---------------------------------------------------------------------------
// Back office
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdminListParams {
    #[serde(rename = "category")]
    pub category_id: Option<i64>,
    #[serde(rename = "author")]
    pub author_id: Option<Uuid>,
    pub q: Option<String>,
    pub page: Option<String>,
}

/// Admin listing page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminListResponse {
    pub items: Vec<PostResponse>,
    pub pagination: PaginationResponse,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchActionRequest {
    /// `reset_views`, `publish` or `delete`.
    pub action: String,
    pub ids: Vec<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchActionResponse {
    pub action: String,
    pub affected: u64,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRequest {
    pub name: String,
    pub description: Option<String>,
}
