//! Post list, detail, comment and share handlers.

use actix_web::{HttpResponse, web};
use serde::Deserialize;
use uuid::Uuid;

use blog_core::forms::{CommentForm, SharePostForm};
use blog_shared::dto::{
    CommentRequest, PostDetailResponse, PostListResponse, SharePostRequest, ShareResponse,
};

use super::views::{comment_response, page_meta, post_response, tag_response};
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// `?page=` is kept as raw text: anything that is not an integer means page 1.
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

async fn list(state: &AppState, tag_slug: Option<&str>, page: Option<&str>) -> AppResult<HttpResponse> {
    let listing = state.blog.list_page(tag_slug, page).await?;

    Ok(HttpResponse::Ok().json(PostListResponse {
        tag: listing.tag.as_ref().map(tag_response),
        posts: listing.page.items.iter().map(post_response).collect(),
        page: page_meta(&listing.page),
    }))
}

/// GET /api/posts
pub async fn post_list(state: web::Data<AppState>, query: web::Query<PageQuery>) -> AppResult<HttpResponse> {
    list(&state, None, query.page.as_deref()).await
}

/// GET /api/posts/tag/{tag_slug}
pub async fn post_list_by_tag(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    list(&state, Some(path.as_str()), query.page.as_deref()).await
}

/// GET /api/posts/{year}/{month}/{day}/{slug}
pub async fn post_detail(
    state: web::Data<AppState>,
    path: web::Path<(i32, u32, u32, String)>,
) -> AppResult<HttpResponse> {
    let (year, month, day, slug) = path.into_inner();
    let detail = state.blog.post_detail(year, month, day, &slug).await?;

    Ok(HttpResponse::Ok().json(PostDetailResponse {
        post: post_response(&detail.post),
        comments: detail.comments.iter().map(comment_response).collect(),
    }))
}

/// POST /api/posts/{post_id}/comment
pub async fn post_comment(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<CommentRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let form = CommentForm {
        name: req.name,
        email: req.email,
        body: req.body,
    };

    let comment = state.blog.submit_comment(path.into_inner(), &form).await?;

    Ok(HttpResponse::Created().json(comment_response(&comment)))
}

/// GET /api/posts/{post_id}/share
pub async fn share_form(state: web::Data<AppState>, path: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let outcome = state.blog.share_form(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ShareResponse {
        post: post_response(&outcome.post),
        sent: outcome.sent,
        form: Some(SharePostRequest::default()),
    }))
}

/// POST /api/posts/{post_id}/share
pub async fn post_share(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<SharePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let form = SharePostForm {
        name: req.name,
        email: req.email,
        to: req.to,
        comments: req.comments,
    };

    let outcome = state.blog.share_post(path.into_inner(), &form).await?;

    Ok(HttpResponse::Ok().json(ShareResponse {
        post: post_response(&outcome.post),
        sent: outcome.sent,
        form: None,
    }))
}
