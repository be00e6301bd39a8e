use blog_core::domain::{Comment, Tag};
use blog_core::ports::{BaseRepository, CommentRepository, TagRepository};
use blog_core::query::PostQuery;
use chrono::NaiveDate;
use sea_orm::{DatabaseBackend, MockDatabase, QueryTrait};

use crate::database::entity::{comment, tag};
use crate::database::postgres_repo::{
    PostgresCommentRepository, PostgresTagRepository, select_comments, select_posts,
};

#[tokio::test]
async fn test_find_comment_by_id() {
    let comment_id = uuid::Uuid::new_v4();
    let post_id = uuid::Uuid::new_v4();
    let now = chrono::Utc::now();
    let today = now.date_naive();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![comment::Model {
            id: comment_id,
            post_id,
            name: "A".to_owned(),
            email: "a@x.com".to_owned(),
            body: "hi".to_owned(),
            created: today,
            updated: today,
            created_at: now.into(),
            active: true,
        }]])
        .into_connection();

    let repo = PostgresCommentRepository::new(db);

    let result: Option<Comment> = repo.find_by_id(comment_id).await.unwrap();

    let comment = result.unwrap();
    assert_eq!(comment.post_id, post_id);
    assert!(comment.active);
}

#[tokio::test]
async fn test_find_active_comments_filters_and_orders() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![Vec::<comment::Model>::new()])
        .into_connection();
    let repo = PostgresCommentRepository::new(db);

    let comments = repo.find_by_post(uuid::Uuid::new_v4(), true).await.unwrap();
    assert!(comments.is_empty());
}

#[tokio::test]
async fn test_get_or_create_returns_existing_tag() {
    let tag_id = uuid::Uuid::new_v4();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![tag::Model {
            id: tag_id,
            name: "Rust".to_owned(),
            slug: "rust".to_owned(),
        }]])
        .into_connection();
    let repo = PostgresTagRepository::new(db);

    let tag: Tag = repo.get_or_create("Rust").await.unwrap();
    assert_eq!(tag.id, tag_id);
    assert_eq!(tag.slug, "rust");
}

#[test]
fn test_comment_query_orders_by_day_then_timestamp() {
    let sql = select_comments(uuid::Uuid::new_v4(), true)
        .build(DatabaseBackend::Postgres)
        .to_string();

    assert!(sql.contains(r#""active" = TRUE"#), "{sql}");
    assert!(
        sql.contains(r#"ORDER BY "comments"."created" ASC, "comments"."created_at" ASC"#),
        "{sql}"
    );
}

#[test]
fn test_published_query_sql() {
    let sql = select_posts(&PostQuery::published())
        .build(DatabaseBackend::Postgres)
        .to_string();

    assert!(sql.contains(r#""status" = 'PB'"#), "{sql}");
    assert!(sql.contains(r#""publish" DESC"#), "{sql}");
}

#[test]
fn test_date_slug_query_sql() {
    let day = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
    let sql = select_posts(&PostQuery::published().published_on(day).with_slug("hello"))
        .build(DatabaseBackend::Postgres)
        .to_string();

    assert!(sql.contains(r#""publish_day" = '2024-03-07'"#), "{sql}");
    assert!(sql.contains(r#""slug" = 'hello'"#), "{sql}");
}

#[test]
fn test_tag_query_uses_link_table() {
    let tag_id = uuid::Uuid::new_v4();
    let sql = select_posts(&PostQuery::published().tagged(tag_id))
        .build(DatabaseBackend::Postgres)
        .to_string();

    assert!(sql.contains(r#""post_tags""#), "{sql}");
    assert!(sql.contains(&tag_id.to_string()), "{sql}");
}
