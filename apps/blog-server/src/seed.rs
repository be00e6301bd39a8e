//! Demo content, seeded once per store.

use std::sync::Arc;

use chrono::{Duration, Utc};

use blog_core::domain::{PostStatus, User};
use blog_core::error::DomainError;
use blog_core::forms::NewPost;
use blog_core::ports::{BaseRepository, UserRepository};
use blog_core::BlogService;

const DEMO_USERNAME: &str = "demo";

/// Create a demo author with a handful of tagged posts, one of them a draft.
/// Does nothing when the demo author already exists.
pub async fn seed_demo(users: Arc<dyn UserRepository>, blog: &BlogService) -> Result<(), DomainError> {
    if users.find_by_username(DEMO_USERNAME).await?.is_some() {
        tracing::info!(author = DEMO_USERNAME, "Demo content already present");
        return Ok(());
    }

    let author = users
        .save(User::new(DEMO_USERNAME.to_string(), "demo@localhost".to_string()))
        .await?;

    let now = Utc::now();
    let posts = [
        ("Hello, Blog", PostStatus::Published, 3, vec!["meta"]),
        ("Pagination Without Surprises", PostStatus::Published, 2, vec!["rust", "web"]),
        ("Moderating Comments", PostStatus::Published, 1, vec!["web"]),
        ("Work in Progress", PostStatus::Draft, 0, vec!["rust"]),
    ];

    for (title, status, days_ago, tags) in posts {
        let new_post = NewPost {
            title: title.to_string(),
            body: format!("{title}: demo content."),
            status: Some(status),
            publish: Some(now - Duration::days(days_ago)),
            tags: tags.into_iter().map(str::to_string).collect(),
        };
        blog.create_post(author.id, &new_post).await?;
    }

    tracing::info!(author = %author.username, "Demo content seeded");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use blog_core::BlogSettings;
    use blog_infra::{InMemoryBlogStore, InMemoryMailSender};

    #[actix_web::test]
    async fn test_seeding_twice_keeps_one_copy() {
        let store = Arc::new(InMemoryBlogStore::new());
        let blog = BlogService::new(
            store.clone(),
            store.clone(),
            store.clone(),
            Arc::new(InMemoryMailSender::new()),
            BlogSettings::default(),
        );

        seed_demo(store.clone(), &blog).await.unwrap();
        let (_, first) = blog.list_published(None).await.unwrap();
        assert_eq!(first.len(), 3);

        seed_demo(store.clone(), &blog).await.unwrap();
        let (_, second) = blog.list_published(None).await.unwrap();
        assert_eq!(second.len(), 3);
    }
}
