//! Data Transfer Objects - request/response types for the API.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Comment submission. Missing fields deserialize as empty and are reported
/// by validation rather than by the JSON extractor.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CommentRequest {
    pub name: String,
    pub email: String,
    pub body: String,
}

/// "Recommend this post" submission.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SharePostRequest {
    pub name: String,
    pub email: String,
    pub to: String,
    pub comments: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagResponse {
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub slug: String,
    pub body: String,
    pub status: String,
    pub publish: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub tags: Vec<TagResponse>,
    /// Canonical detail path.
    pub url: String,
}

/// Page metadata for list views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    pub number: usize,
    pub num_pages: usize,
    pub count: usize,
    pub has_next: bool,
    pub has_previous: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page_number: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_page_number: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostListResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<TagResponse>,
    pub posts: Vec<PostResponse>,
    pub page: PageMeta,
}

/// A visible comment. The commenter's e-mail is not exposed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentResponse {
    pub id: Uuid,
    pub post_id: Uuid,
    pub name: String,
    pub body: String,
    pub created: NaiveDate,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostDetailResponse {
    pub post: PostResponse,
    pub comments: Vec<CommentResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareResponse {
    pub post: PostResponse,
    pub sent: bool,
    /// Blank form to fill in; only present before submission.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form: Option<SharePostRequest>,
}
