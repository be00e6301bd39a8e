//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::sea_query::Query;
use sea_orm::{
    ColumnTrait, DbConn, EntityTrait, QueryFilter, QueryOrder, Select, Set, TransactionTrait,
};
use uuid::Uuid;

use blog_core::domain::{Comment, Post, Tag, User, slugify};
use blog_core::error::RepoError;
use blog_core::forms::mask_email;
use blog_core::ports::{
    BaseRepository, CommentRepository, PostRepository, TagRepository, UserRepository,
};
use blog_core::query::PostQuery;

use super::entity::comment::{self, Entity as CommentEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::entity::post_tag::{self, Entity as PostTagEntity};
use super::entity::tag::{self, Entity as TagEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::{PostgresBaseRepository, query_error, upsert, write_error};

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL comment repository.
pub type PostgresCommentRepository = PostgresBaseRepository<CommentEntity>;

/// PostgreSQL tag repository.
pub type PostgresTagRepository = PostgresBaseRepository<TagEntity>;

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(username, "Finding user by username");

        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(query_error)?;

        if let Some(found) = &result {
            tracing::debug!(user_email = %mask_email(&found.email), "User found");
        }

        Ok(result.map(Into::into))
    }
}

/// Comments of one post, by day then creation time.
pub(crate) fn select_comments(post_id: Uuid, active_only: bool) -> Select<CommentEntity> {
    let mut select = CommentEntity::find().filter(comment::Column::PostId.eq(post_id));
    if active_only {
        select = select.filter(comment::Column::Active.eq(true));
    }

    select
        .order_by_asc(comment::Column::Created)
        .order_by_asc(comment::Column::CreatedAt)
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn find_by_post(&self, post_id: Uuid, active_only: bool) -> Result<Vec<Comment>, RepoError> {
        let result = select_comments(post_id, active_only)
            .all(&self.db)
            .await
            .map_err(query_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl TagRepository for PostgresTagRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Tag>, RepoError> {
        let result = TagEntity::find()
            .filter(tag::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(query_error)?;

        Ok(result.map(Into::into))
    }

    async fn get_or_create(&self, name: &str) -> Result<Tag, RepoError> {
        let slug = slugify(name);
        if let Some(existing) = self.find_by_slug(&slug).await? {
            return Ok(existing);
        }

        match self.save(Tag::new(name)).await {
            Ok(tag) => Ok(tag),
            // Lost a race with a concurrent insert of the same tag.
            Err(RepoError::Constraint(_)) => self.find_by_slug(&slug).await?.ok_or(RepoError::NotFound),
            Err(e) => Err(e),
        }
    }
}

/// PostgreSQL post repository. Posts span two tables (`posts`, `post_tags`),
/// so this one does not go through the generic base.
pub struct PostgresPostRepository {
    db: DbConn,
}

impl PostgresPostRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

/// Translate a [`PostQuery`] into a SeaORM select, newest first.
pub(crate) fn select_posts(query: &PostQuery) -> Select<PostEntity> {
    let mut select = PostEntity::find();

    if let Some(id) = query.id {
        select = select.filter(post::Column::Id.eq(id));
    }
    if let Some(status) = query.status {
        select = select.filter(post::Column::Status.eq(post::Status::from(status)));
    }
    if let Some(day) = query.publish_day {
        select = select.filter(post::Column::PublishDay.eq(day));
    }
    if let Some(slug) = &query.slug {
        select = select.filter(post::Column::Slug.eq(slug.as_str()));
    }
    if let Some(tag_id) = query.tag_id {
        select = select.filter(
            post::Column::Id.in_subquery(
                Query::select()
                    .column(post_tag::Column::PostId)
                    .from(PostTagEntity)
                    .and_where(post_tag::Column::TagId.eq(tag_id))
                    .to_owned(),
            ),
        );
    }

    select
        .order_by_desc(post::Column::Publish)
        .order_by_asc(post::Column::Id)
}

#[async_trait]
impl BaseRepository<Post, Uuid> for PostgresPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        self.find_one(&PostQuery::all().with_id(id)).await
    }

    async fn save(&self, entity: Post) -> Result<Post, RepoError> {
        let txn = self.db.begin().await.map_err(query_error)?;

        let active_model = post::ActiveModel::from(&entity);
        upsert(active_model, &txn).await?;

        PostTagEntity::delete_many()
            .filter(post_tag::Column::PostId.eq(entity.id))
            .exec(&txn)
            .await
            .map_err(query_error)?;

        if !entity.tags.is_empty() {
            let links = entity.tags.iter().map(|t| post_tag::ActiveModel {
                post_id: Set(entity.id),
                tag_id: Set(t.id),
            });
            PostTagEntity::insert_many(links)
                .exec_without_returning(&txn)
                .await
                .map_err(write_error)?;
        }

        txn.commit().await.map_err(query_error)?;
        tracing::debug!(post_id = %entity.id, slug = %entity.slug, "Post saved");

        Ok(entity)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let result = PostEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(query_error)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find(&self, query: &PostQuery) -> Result<Vec<Post>, RepoError> {
        tracing::debug!(?query, "Querying posts");

        let rows = select_posts(query)
            .find_with_related(TagEntity)
            .all(&self.db)
            .await
            .map_err(query_error)?;

        Ok(rows
            .into_iter()
            .map(|(model, tags)| post::into_domain(model, tags))
            .collect())
    }
}
