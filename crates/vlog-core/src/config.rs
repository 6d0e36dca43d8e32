//! Settings consumed by the service layer.

use crate::pagination::PaginationConfig;

/// Explicit configuration for [`crate::service::VlogService`].
#[derive(Debug, Clone)]
pub struct VlogConfig {
    /// Public listing pages.
    pub pagination: PaginationConfig,
    /// Back-office listing pages.
    pub admin_pagination: PaginationConfig,
    /// Related posts shown on a detail page.
    pub related_limit: u64,
    /// Upper bound on ids accepted by a single bulk action.
    pub max_batch_size: usize,
}

impl Default for VlogConfig {
    fn default() -> Self {
        Self {
            pagination: PaginationConfig::default(),
            admin_pagination: PaginationConfig::with_page_size(20),
            related_limit: 5,
            max_batch_size: 500,
        }
    }
}
