//! Post entity for SeaORM.
//!
//! `publish_day` duplicates the UTC date of `publish` so the per-day slug
//! uniqueness can be a plain unique index.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use blog_core::domain::PostStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(2))")]
pub enum Status {
    #[sea_orm(string_value = "DF")]
    Draft,
    #[sea_orm(string_value = "PB")]
    Published,
}

impl From<PostStatus> for Status {
    fn from(status: PostStatus) -> Self {
        match status {
            PostStatus::Draft => Status::Draft,
            PostStatus::Published => Status::Published,
        }
    }
}

impl From<Status> for PostStatus {
    fn from(status: Status) -> Self {
        match status {
            Status::Draft => PostStatus::Draft,
            Status::Published => PostStatus::Published,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub slug: String,
    #[sea_orm(column_type = "Text")]
    pub body: String,
    pub status: Status,
    pub publish: DateTimeWithTimeZone,
    pub publish_day: Date,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::AuthorId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Author,
    #[sea_orm(has_many = "super::comment::Entity")]
    Comment,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl Related<super::comment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comment.def()
    }
}

impl Related<super::tag::Entity> for Entity {
    fn to() -> RelationDef {
        super::post_tag::Relation::Tag.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::post_tag::Relation::Post.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from a SeaORM row plus its tag rows to a Domain Post.
pub fn into_domain(model: Model, tags: Vec<super::tag::Model>) -> blog_core::domain::Post {
    blog_core::domain::Post {
        id: model.id,
        author_id: model.author_id,
        title: model.title,
        slug: model.slug,
        body: model.body,
        status: model.status.into(),
        publish: model.publish.into(),
        created_at: model.created_at.into(),
        updated_at: model.updated_at.into(),
        tags: tags.into_iter().map(Into::into).collect(),
    }
}

/// Conversion from Domain Post to SeaORM ActiveModel. Tags are stored
/// separately in `post_tags`.
impl From<&blog_core::domain::Post> for ActiveModel {
    fn from(post: &blog_core::domain::Post) -> Self {
        Self {
            id: Set(post.id),
            author_id: Set(post.author_id),
            title: Set(post.title.clone()),
            slug: Set(post.slug.clone()),
            body: Set(post.body.clone()),
            status: Set(post.status.into()),
            publish: Set(post.publish.into()),
            publish_day: Set(post.publish_day()),
            created_at: Set(post.created_at.into()),
            updated_at: Set(post.updated_at.into()),
        }
    }
}
