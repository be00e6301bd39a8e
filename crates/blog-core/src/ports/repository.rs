use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Comment, Post, Tag, User};
use crate::error::RepoError;
use crate::query::PostQuery;

/// Generic repository trait defining standard CRUD operations.
///
/// Every write is atomic per record.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Save an entity (create or update).
    async fn save(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// User repository.
///
/// Deleting a user also deletes every post they authored (and, through
/// [`PostRepository`], those posts' comments).
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;
}

/// Post repository.
///
/// `save` rejects a second post with the same slug on the same publish day
/// with [`RepoError::Constraint`]. Deleting a post deletes its comments and
/// tag links.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// Posts matching `query`, newest `publish` first.
    async fn find(&self, query: &PostQuery) -> Result<Vec<Post>, RepoError>;

    /// First post matching `query`, if any.
    async fn find_one(&self, query: &PostQuery) -> Result<Option<Post>, RepoError> {
        Ok(self.find(query).await?.into_iter().next())
    }
}

/// Comment repository.
#[async_trait]
pub trait CommentRepository: BaseRepository<Comment, Uuid> {
    /// Comments of a post, oldest first. With `active_only`, moderated-out
    /// comments are skipped.
    async fn find_by_post(&self, post_id: Uuid, active_only: bool) -> Result<Vec<Comment>, RepoError>;
}

/// Tag repository.
#[async_trait]
pub trait TagRepository: BaseRepository<Tag, Uuid> {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Tag>, RepoError>;

    /// Return the tag with this name, creating it if needed.
    async fn get_or_create(&self, name: &str) -> Result<Tag, RepoError>;
}
