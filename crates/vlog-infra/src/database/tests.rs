use std::collections::BTreeMap;

use chrono::{Duration, Utc};
use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Value};
use uuid::Uuid;

use crate::database::entity::{post, user};
use crate::database::postgres_repo::{PostgresPostRepository, PostgresUserRepository};
use vlog_core::domain::{Post, User};
use vlog_core::error::RepoError;
use vlog_core::form::PostDraft;
use vlog_core::pagination::Window;
use vlog_core::ports::{BaseRepository, PostRepository, UserRepository};
use vlog_core::query::PostFilter;

fn post_model(id: i64, title: &str, views_count: i64) -> post::Model {
    let published = Utc::now() - Duration::days(1);
    post::Model {
        id,
        title: title.to_owned(),
        slug: title.to_lowercase().replace(' ', "-"),
        video_url: "https://www.youtube.com/watch?v=rHux0gMZ3Eg".to_owned(),
        description: "Content".to_owned(),
        author_id: Uuid::new_v4(),
        category_id: Some(1),
        tags: "python,beginner".to_owned(),
        thumbnail: None,
        views_count,
        published_date: published.into(),
        created_at: published.into(),
        updated_date: published.into(),
    }
}

#[tokio::test]
async fn test_find_post_by_id() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![post_model(7, "Python Loops", 3)]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let result: Option<Post> = repo.find_by_id(7).await.unwrap();

    let post = result.unwrap();
    assert_eq!(post.id, 7);
    assert_eq!(post.title, "Python Loops");
    assert_eq!(post.views_count, 3);
    assert_eq!(post.tags_list(), vec!["python", "beginner"]);
}

#[tokio::test]
async fn test_increment_views_updates_in_place() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .append_query_results([vec![post_model(7, "Python Loops", 4)]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let post = repo.increment_views(7).await.unwrap().unwrap();
    assert_eq!(post.views_count, 4);

    let log = repo.db.into_transaction_log();
    assert_eq!(log.len(), 2);
    let update = format!("{:?}", log[0]);
    assert!(update.contains("UPDATE"));
    assert!(update.contains("views_count"));
}

#[tokio::test]
async fn test_update_content_leaves_views_untouched() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .append_query_results([vec![post_model(7, "Python Loops Revisited", 9)]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let draft = PostDraft {
        title: "Python Loops Revisited".to_owned(),
        video_url: "https://www.youtube.com/watch?v=rHux0gMZ3Eg".to_owned(),
        description: "Content".to_owned(),
        category_id: 1,
        tags: "python".to_owned(),
        thumbnail: None,
        published_date: Utc::now(),
    };
    let post = repo
        .update_content(7, &draft, Utc::now())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(post.views_count, 9);

    let log = repo.db.into_transaction_log();
    let update = format!("{:?}", log[0]);
    assert!(update.contains("UPDATE"));
    assert!(update.contains("title"));
    assert!(!update.contains("views_count"));
    assert!(!update.contains("author_id"));
    assert!(!update.contains("created_at"));
}

#[tokio::test]
async fn test_increment_views_missing_post() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    assert!(repo.increment_views(404).await.unwrap().is_none());

    // No follow-up read when nothing was updated.
    assert_eq!(repo.db.into_transaction_log().len(), 1);
}

#[tokio::test]
async fn test_search_uses_escaped_like() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![
            post_model(2, "Python Functions", 0),
            post_model(1, "Python Loops", 0),
        ]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let filter = PostFilter::all().with_search("Python");
    let posts = repo
        .search(&filter, Window { offset: 0, limit: 10 })
        .await
        .unwrap();

    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0].id, 2);

    let log = repo.db.into_transaction_log();
    let query = format!("{:?}", log[0]);
    assert!(query.contains("LIKE"));
    assert!(query.contains("%python%"));
}

#[tokio::test]
async fn test_count_reads_num_items() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![BTreeMap::from([(
            "num_items",
            Into::<Value>::into(25i64),
        )])]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    assert_eq!(repo.count(&PostFilter::all()).await.unwrap(), 25);
}

#[tokio::test]
async fn test_delete_missing_post_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let err = BaseRepository::<Post, i64>::delete(&repo, 404).await.unwrap_err();
    assert!(matches!(err, RepoError::NotFound));
}

#[tokio::test]
async fn test_create_user_inserts() {
    let now = Utc::now();
    let id = Uuid::new_v4();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![user::Model {
            id,
            username: "creator".to_owned(),
            email: "creator@example.com".to_owned(),
            password_hash: "hash".to_owned(),
            is_staff: false,
            created_at: now.into(),
            updated_at: now.into(),
        }]])
        .into_connection();

    let repo = PostgresUserRepository::new(db);
    let mut user = User::new(
        "creator".to_owned(),
        "creator@example.com".to_owned(),
        "hash".to_owned(),
    );
    user.id = id;

    let saved = repo.create(user).await.unwrap();
    assert_eq!(saved.id, id);

    let log = repo.db.into_transaction_log();
    assert!(format!("{:?}", log[0]).contains("INSERT"));
}
