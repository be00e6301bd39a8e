use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Tag, slugify};

/// Publication status of a post. Only published posts are visible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    #[default]
    Draft,
    Published,
}

/// Post entity - a blog article.
///
/// `slug` is unique only together with the calendar day of `publish`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub slug: String,
    pub body: String,
    pub status: PostStatus,
    pub publish: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub tags: Vec<Tag>,
}

impl Post {
    /// Create a new draft post, published "now" once its status flips.
    pub fn new(author_id: Uuid, title: String, body: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            author_id,
            slug: slugify(&title),
            title,
            body,
            status: PostStatus::Draft,
            publish: now,
            created_at: now,
            updated_at: now,
            tags: Vec::new(),
        }
    }

    /// Calendar day of `publish` (UTC); half of the date-based lookup key.
    pub fn publish_day(&self) -> NaiveDate {
        self.publish.date_naive()
    }

    pub fn set_status(&mut self, status: PostStatus) {
        self.status = status;
        self.touch();
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn has_tag(&self, tag_id: Uuid) -> bool {
        self.tags.iter().any(|t| t.id == tag_id)
    }

    /// Canonical detail path, `/api/posts/{year}/{month}/{day}/{slug}`.
    pub fn absolute_path(&self) -> String {
        format!(
            "/api/posts/{}/{}/{}/{}",
            self.publish.year(),
            self.publish.month(),
            self.publish.day(),
            self.slug
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_new_post_is_draft_with_slug() {
        let post = Post::new(
            Uuid::new_v4(),
            "Who's Afraid of the Borrow Checker?".to_string(),
            "Nobody.".to_string(),
        );
        assert_eq!(post.status, PostStatus::Draft);
        assert_eq!(post.slug, "whos-afraid-of-the-borrow-checker");
    }

    #[test]
    fn test_absolute_path_is_not_zero_padded() {
        let mut post = Post::new(Uuid::new_v4(), "Hello".to_string(), "x".to_string());
        post.publish = Utc.with_ymd_and_hms(2024, 3, 7, 10, 0, 0).unwrap();
        assert_eq!(post.absolute_path(), "/api/posts/2024/3/7/hello");
        assert_eq!(
            post.publish_day(),
            NaiveDate::from_ymd_opt(2024, 3, 7).unwrap()
        );
    }
}
