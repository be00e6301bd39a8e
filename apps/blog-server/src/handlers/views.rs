//! Domain -> DTO conversions for responses.

use blog_core::domain::{Comment, Post, PostStatus, Tag};
use blog_core::pagination::Page;
use blog_shared::dto::{CommentResponse, PageMeta, PostResponse, TagResponse};

pub fn tag_response(tag: &Tag) -> TagResponse {
    TagResponse {
        name: tag.name.clone(),
        slug: tag.slug.clone(),
    }
}

pub fn post_response(post: &Post) -> PostResponse {
    let status = match post.status {
        PostStatus::Draft => "draft",
        PostStatus::Published => "published",
    };

    PostResponse {
        id: post.id,
        author_id: post.author_id,
        title: post.title.clone(),
        slug: post.slug.clone(),
        body: post.body.clone(),
        status: status.to_string(),
        publish: post.publish,
        created_at: post.created_at,
        updated_at: post.updated_at,
        tags: post.tags.iter().map(tag_response).collect(),
        url: post.absolute_path(),
    }
}

pub fn comment_response(comment: &Comment) -> CommentResponse {
    CommentResponse {
        id: comment.id,
        post_id: comment.post_id,
        name: comment.name.clone(),
        body: comment.body.clone(),
        created: comment.created,
        active: comment.active,
    }
}

pub fn page_meta<T>(page: &Page<T>) -> PageMeta {
    PageMeta {
        number: page.number,
        num_pages: page.num_pages,
        count: page.count,
        has_next: page.has_next(),
        has_previous: page.has_previous(),
        next_page_number: page.next_page_number(),
        previous_page_number: page.previous_page_number(),
    }
}
