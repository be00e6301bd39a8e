//! Publication, comment and sharing operations over the repository ports.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::{Comment, Post, PostStatus, Tag};
use crate::error::DomainError;
use crate::forms::{CommentForm, NewPost, SharePostForm, mask_email};
use crate::pagination::{DEFAULT_PAGE_SIZE, Page, Paginator};
use crate::ports::{BaseRepository, CommentRepository, MailError, MailMessage, MailSender, PostRepository, TagRepository};
use crate::query::PostQuery;

/// Tunables for [`BlogService`].
#[derive(Debug, Clone)]
pub struct BlogSettings {
    /// Scheme and host prepended to post paths in outgoing mail.
    pub site_url: String,
    pub mail_from: String,
    /// Upper bound on a single mail-send call.
    pub mail_timeout: Duration,
    pub posts_per_page: usize,
}

impl Default for BlogSettings {
    fn default() -> Self {
        Self {
            site_url: "http://127.0.0.1:8080".to_string(),
            mail_from: "blog@localhost".to_string(),
            mail_timeout: Duration::from_secs(10),
            posts_per_page: DEFAULT_PAGE_SIZE,
        }
    }
}

/// A page of published posts, optionally narrowed to one tag.
#[derive(Debug, Clone)]
pub struct PostListing {
    pub tag: Option<Tag>,
    pub page: Page<Post>,
}

/// A published post with its visible (active) comments.
#[derive(Debug, Clone)]
pub struct PostDetail {
    pub post: Post,
    pub comments: Vec<Comment>,
}

/// Result of the share operation. `sent` is only true after a send call
/// returned without error.
#[derive(Debug, Clone)]
pub struct ShareOutcome {
    pub post: Post,
    pub sent: bool,
}

#[derive(Clone)]
pub struct BlogService {
    posts: Arc<dyn PostRepository>,
    comments: Arc<dyn CommentRepository>,
    tags: Arc<dyn TagRepository>,
    mailer: Arc<dyn MailSender>,
    settings: BlogSettings,
}

impl BlogService {
    pub fn new(
        posts: Arc<dyn PostRepository>,
        comments: Arc<dyn CommentRepository>,
        tags: Arc<dyn TagRepository>,
        mailer: Arc<dyn MailSender>,
        settings: BlogSettings,
    ) -> Self {
        Self {
            posts,
            comments,
            tags,
            mailer,
            settings,
        }
    }

    /// Absolute URL of a post's detail page.
    pub fn absolute_url(&self, post: &Post) -> String {
        format!(
            "{}{}",
            self.settings.site_url.trim_end_matches('/'),
            post.absolute_path()
        )
    }

    /// All published posts, newest first. With a tag slug, only posts carrying
    /// that tag; an unknown slug is NotFound.
    pub async fn list_published(&self, tag_slug: Option<&str>) -> Result<(Option<Tag>, Vec<Post>), DomainError> {
        let mut query = PostQuery::published();

        let tag = match tag_slug {
            Some(slug) => {
                let tag = self
                    .tags
                    .find_by_slug(slug)
                    .await?
                    .ok_or_else(|| DomainError::not_found("tag", slug))?;
                query = query.tagged(tag.id);
                Some(tag)
            }
            None => None,
        };

        let posts = self.posts.find(&query).await?;
        tracing::debug!(tag = ?tag_slug, count = posts.len(), "Listed published posts");

        Ok((tag, posts))
    }

    /// One page of [`Self::list_published`].
    pub async fn list_page(
        &self,
        tag_slug: Option<&str>,
        requested_page: Option<&str>,
    ) -> Result<PostListing, DomainError> {
        let (tag, posts) = self.list_published(tag_slug).await?;
        let page = Paginator::new(self.settings.posts_per_page).paginate(posts, requested_page)?;
        Ok(PostListing { tag, page })
    }

    /// The published post whose publish day and slug match exactly.
    pub async fn get_published_by_date(
        &self,
        year: i32,
        month: u32,
        day: u32,
        slug: &str,
    ) -> Result<Post, DomainError> {
        let key = || format!("{year}/{month}/{day}/{slug}");
        let date = NaiveDate::from_ymd_opt(year, month, day)
            .ok_or_else(|| DomainError::not_found("post", key()))?;

        let query = PostQuery::published().published_on(date).with_slug(slug);
        self.posts
            .find_one(&query)
            .await?
            .ok_or_else(|| DomainError::not_found("post", key()))
    }

    /// A published post by ID.
    pub async fn get_published(&self, post_id: Uuid) -> Result<Post, DomainError> {
        self.posts
            .find_one(&PostQuery::published().with_id(post_id))
            .await?
            .ok_or_else(|| DomainError::not_found("post", post_id))
    }

    pub async fn post_detail(
        &self,
        year: i32,
        month: u32,
        day: u32,
        slug: &str,
    ) -> Result<PostDetail, DomainError> {
        let post = self.get_published_by_date(year, month, day, slug).await?;
        let comments = self.comments.find_by_post(post.id, true).await?;
        Ok(PostDetail { post, comments })
    }

    /// Validate and attach a new (active) comment to a published post.
    pub async fn submit_comment(&self, post_id: Uuid, form: &CommentForm) -> Result<Comment, DomainError> {
        let post = self.get_published(post_id).await?;
        let cleaned = form.clean().map_err(DomainError::Validation)?;

        let comment = Comment::new(post.id, cleaned.name, cleaned.email, cleaned.body);
        let saved = self.comments.save(comment).await?;

        tracing::info!(
            post_id = %post.id,
            comment_id = %saved.id,
            author_email = %mask_email(&saved.email),
            "Comment added"
        );

        Ok(saved)
    }

    /// The empty share form: resolves the post, sends nothing.
    pub async fn share_form(&self, post_id: Uuid) -> Result<ShareOutcome, DomainError> {
        let post = self.get_published(post_id).await?;
        Ok(ShareOutcome { post, sent: false })
    }

    /// Validate the share form and mail a recommendation to `form.to`.
    pub async fn share_post(&self, post_id: Uuid, form: &SharePostForm) -> Result<ShareOutcome, DomainError> {
        let post = self.get_published(post_id).await?;
        let cleaned = form.clean().map_err(DomainError::Validation)?;

        let post_url = self.absolute_url(&post);
        let message = MailMessage {
            subject: format!("{} recommends you read {}", cleaned.name, post.title),
            body: format!(
                "Read {} at {}\n\n{}'s comments: {}",
                post.title,
                post_url,
                cleaned.name,
                cleaned.comments.as_deref().unwrap_or_default()
            ),
            from: self.settings.mail_from.clone(),
            to: vec![cleaned.to.clone()],
        };

        let timeout = self.settings.mail_timeout;
        let result = match tokio::time::timeout(timeout, self.mailer.send(&message)).await {
            Ok(result) => result,
            Err(_) => Err(MailError::Timeout(timeout)),
        };

        if let Err(e) = result {
            tracing::warn!(
                post_id = %post.id,
                recipient = %mask_email(&cleaned.to),
                error = %e,
                "Share mail not delivered"
            );
            return Err(DomainError::Delivery(e.to_string()));
        }

        tracing::info!(
            post_id = %post.id,
            recipient = %mask_email(&cleaned.to),
            "Share mail sent"
        );

        Ok(ShareOutcome { post, sent: true })
    }

    /// Author a post. Tags are created on first use.
    pub async fn create_post(&self, author_id: Uuid, new_post: &NewPost) -> Result<Post, DomainError> {
        let cleaned = new_post.clean().map_err(DomainError::Validation)?;

        let mut post = Post::new(author_id, cleaned.title, cleaned.body);
        if let Some(status) = cleaned.status {
            post.status = status;
        }
        if let Some(publish) = cleaned.publish {
            post.publish = publish;
        }

        // Reject a day/slug clash before any tag gets created.
        let clash = PostQuery::all()
            .published_on(post.publish_day())
            .with_slug(&post.slug);
        if self.posts.find_one(&clash).await?.is_some() {
            return Err(DomainError::Duplicate(format!(
                "a post with slug {} already exists on {}",
                post.slug,
                post.publish_day()
            )));
        }

        for name in &cleaned.tags {
            let tag = self.tags.get_or_create(name).await?;
            if !post.has_tag(tag.id) {
                post.tags.push(tag);
            }
        }

        let saved = self.posts.save(post).await?;
        tracing::info!(post_id = %saved.id, slug = %saved.slug, status = ?saved.status, "Post created");
        Ok(saved)
    }

    /// Move a post between draft and published.
    pub async fn set_status(&self, post_id: Uuid, status: PostStatus) -> Result<Post, DomainError> {
        let mut post = self
            .posts
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| DomainError::not_found("post", post_id))?;
        post.set_status(status);
        Ok(self.posts.save(post).await?)
    }

    /// Show or hide a comment without deleting it.
    pub async fn moderate_comment(&self, comment_id: Uuid, active: bool) -> Result<Comment, DomainError> {
        let mut comment = self
            .comments
            .find_by_id(comment_id)
            .await?
            .ok_or_else(|| DomainError::not_found("comment", comment_id))?;
        comment.set_active(active);
        Ok(self.comments.save(comment).await?)
    }
}
