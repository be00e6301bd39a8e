//! A single in-process store implementing every repository port.
//!
//! Note: Data is lost on process restart.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use blog_core::domain::{Comment, Post, Tag, User, slugify};
use blog_core::error::RepoError;
use blog_core::ports::{
    BaseRepository, CommentRepository, PostRepository, TagRepository, UserRepository,
};
use blog_core::query::PostQuery;

#[derive(Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    posts: HashMap<Uuid, Post>,
    // Insertion order breaks ties between equal creation timestamps.
    comments: Vec<Comment>,
    tags: HashMap<Uuid, Tag>,
}

impl Tables {
    /// Remove a post and everything hanging off it.
    fn delete_post_cascade(&mut self, post_id: Uuid) -> bool {
        let removed = self.posts.remove(&post_id).is_some();
        if removed {
            self.comments.retain(|c| c.post_id != post_id);
        }
        removed
    }
}

/// In-memory store guarded by an async RwLock.
#[derive(Default)]
pub struct InMemoryBlogStore {
    tables: RwLock<Tables>,
}

impl InMemoryBlogStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BaseRepository<User, Uuid> for InMemoryBlogStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn save(&self, entity: User) -> Result<User, RepoError> {
        let mut tables = self.tables.write().await;
        if tables
            .users
            .values()
            .any(|u| u.id != entity.id && u.username == entity.username)
        {
            return Err(RepoError::Constraint(format!(
                "username '{}' is taken",
                entity.username
            )));
        }
        tables.users.insert(entity.id, entity.clone());
        Ok(entity)
    }

    /// Deletes the user's posts (and their comments) as well.
    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        if tables.users.remove(&id).is_none() {
            return Err(RepoError::NotFound);
        }

        let authored: Vec<Uuid> = tables
            .posts
            .values()
            .filter(|p| p.author_id == id)
            .map(|p| p.id)
            .collect();
        for post_id in &authored {
            tables.delete_post_cascade(*post_id);
        }

        tracing::debug!(user_id = %id, posts = authored.len(), "User deleted with cascade");
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryBlogStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for InMemoryBlogStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        Ok(self.tables.read().await.posts.get(&id).cloned())
    }

    async fn save(&self, entity: Post) -> Result<Post, RepoError> {
        let mut tables = self.tables.write().await;

        if !tables.users.contains_key(&entity.author_id) {
            return Err(RepoError::Constraint(format!(
                "author {} does not exist",
                entity.author_id
            )));
        }
        if let Some(missing) = entity.tags.iter().find(|t| !tables.tags.contains_key(&t.id)) {
            return Err(RepoError::Constraint(format!(
                "tag '{}' does not exist",
                missing.slug
            )));
        }

        let day = entity.publish_day();
        if tables
            .posts
            .values()
            .any(|p| p.id != entity.id && p.slug == entity.slug && p.publish_day() == day)
        {
            return Err(RepoError::Constraint(format!(
                "a post with slug '{}' already exists on {}",
                entity.slug, day
            )));
        }

        tables.posts.insert(entity.id, entity.clone());
        Ok(entity)
    }

    /// Deletes the post's comments as well.
    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        if tables.delete_post_cascade(id) {
            Ok(())
        } else {
            Err(RepoError::NotFound)
        }
    }
}

#[async_trait]
impl PostRepository for InMemoryBlogStore {
    async fn find(&self, query: &PostQuery) -> Result<Vec<Post>, RepoError> {
        let tables = self.tables.read().await;
        let mut posts: Vec<Post> = tables
            .posts
            .values()
            .filter(|p| query.matches(p))
            .cloned()
            .collect();
        posts.sort_by(|a, b| b.publish.cmp(&a.publish).then(a.id.cmp(&b.id)));
        Ok(posts)
    }
}

#[async_trait]
impl BaseRepository<Comment, Uuid> for InMemoryBlogStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Comment>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.comments.iter().find(|c| c.id == id).cloned())
    }

    async fn save(&self, entity: Comment) -> Result<Comment, RepoError> {
        let mut tables = self.tables.write().await;
        if !tables.posts.contains_key(&entity.post_id) {
            return Err(RepoError::Constraint(format!(
                "post {} does not exist",
                entity.post_id
            )));
        }

        match tables.comments.iter_mut().find(|c| c.id == entity.id) {
            Some(existing) => *existing = entity.clone(),
            None => tables.comments.push(entity.clone()),
        }
        Ok(entity)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        let before = tables.comments.len();
        tables.comments.retain(|c| c.id != id);
        if tables.comments.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl CommentRepository for InMemoryBlogStore {
    async fn find_by_post(&self, post_id: Uuid, active_only: bool) -> Result<Vec<Comment>, RepoError> {
        let tables = self.tables.read().await;
        let mut comments: Vec<Comment> = tables
            .comments
            .iter()
            .filter(|c| c.post_id == post_id && (c.active || !active_only))
            .cloned()
            .collect();
        // Stable sort keeps insertion order for equal timestamps.
        comments.sort_by_key(|c| (c.created, c.created_at));
        Ok(comments)
    }
}

#[async_trait]
impl BaseRepository<Tag, Uuid> for InMemoryBlogStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Tag>, RepoError> {
        Ok(self.tables.read().await.tags.get(&id).cloned())
    }

    async fn save(&self, entity: Tag) -> Result<Tag, RepoError> {
        let mut tables = self.tables.write().await;
        if tables
            .tags
            .values()
            .any(|t| t.id != entity.id && (t.name == entity.name || t.slug == entity.slug))
        {
            return Err(RepoError::Constraint(format!(
                "tag '{}' already exists",
                entity.slug
            )));
        }
        tables.tags.insert(entity.id, entity.clone());
        Ok(entity)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        if tables.tags.remove(&id).is_none() {
            return Err(RepoError::NotFound);
        }
        for post in tables.posts.values_mut() {
            post.tags.retain(|t| t.id != id);
        }
        Ok(())
    }
}

#[async_trait]
impl TagRepository for InMemoryBlogStore {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Tag>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.tags.values().find(|t| t.slug == slug).cloned())
    }

    async fn get_or_create(&self, name: &str) -> Result<Tag, RepoError> {
        let mut tables = self.tables.write().await;
        let slug = slugify(name);
        if let Some(existing) = tables.tags.values().find(|t| t.slug == slug) {
            return Ok(existing.clone());
        }

        let tag = Tag::new(name);
        tables.tags.insert(tag.id, tag.clone());
        Ok(tag)
    }
}
