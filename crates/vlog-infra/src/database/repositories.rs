use std::sync::Arc;

#[cfg(feature = "postgres")]
use sea_orm::DbConn;

use vlog_core::ports::{CategoryRepository, PostRepository, UserRepository};

use super::memory::InMemoryStore;
#[cfg(feature = "postgres")]
use super::postgres_repo::{
    PostgresCategoryRepository, PostgresPostRepository, PostgresUserRepository,
};

/// The three repositories a running service needs, behind their ports.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub categories: Arc<dyn CategoryRepository>,
    pub posts: Arc<dyn PostRepository>,
}

impl Repositories {
    /// All three ports served by one shared [`InMemoryStore`].
    pub fn in_memory() -> Self {
        let store = Arc::new(InMemoryStore::new());
        Self {
            users: store.clone(),
            categories: store.clone(),
            posts: store,
        }
    }

    #[cfg(feature = "postgres")]
    pub fn postgres(db: DbConn) -> Self {
        Self {
            users: Arc::new(PostgresUserRepository::new(db.clone())),
            categories: Arc::new(PostgresCategoryRepository::new(db.clone())),
            posts: Arc::new(PostgresPostRepository::new(db)),
        }
    }
}
