//! Explicit post selection predicate.
//!
//! Every read path states the visibility it needs (for instance
//! [`PostQuery::published`]) instead of relying on a hidden default filter.
//! Storage backends translate the same predicate into their own query
//! language; [`PostQuery::matches`] is the reference semantics.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::{Post, PostStatus};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostQuery {
    pub id: Option<Uuid>,
    pub status: Option<PostStatus>,
    pub publish_day: Option<NaiveDate>,
    pub slug: Option<String>,
    pub tag_id: Option<Uuid>,
}

impl PostQuery {
    /// Every post regardless of status.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn published() -> Self {
        Self::all().with_status(PostStatus::Published)
    }

    pub fn with_status(mut self, status: PostStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = Some(id);
        self
    }

    pub fn published_on(mut self, day: NaiveDate) -> Self {
        self.publish_day = Some(day);
        self
    }

    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    pub fn tagged(mut self, tag_id: Uuid) -> Self {
        self.tag_id = Some(tag_id);
        self
    }

    pub fn matches(&self, post: &Post) -> bool {
        self.id.is_none_or(|id| post.id == id)
            && self.status.is_none_or(|status| post.status == status)
            && self.publish_day.is_none_or(|day| post.publish_day() == day)
            && self.slug.as_deref().is_none_or(|slug| post.slug == slug)
            && self.tag_id.is_none_or(|tag_id| post.has_tag(tag_id))
    }
}
