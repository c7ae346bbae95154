//! Post handlers. Every route requires a bearer token; success bodies carry a
//! `message` in the request's locale.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use blog_core::domain::{PostDraft, PostWithTags};
use blog_core::messages::MessageKey;
use blog_shared::dto::{
    MessageEnvelope, PostEnvelope, PostListEnvelope, PostListQuery, PostPayload, PostResponse,
};

use super::tags::tag_response;
use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::middleware::locale::RequestLocale;
use crate::state::AppState;

fn draft(payload: PostPayload) -> PostDraft {
    PostDraft {
        title: payload.title,
        content: payload.content,
        tags: payload.tags,
    }
}

fn post_response(aggregate: PostWithTags) -> PostResponse {
    let post = aggregate.post;
    PostResponse {
        id: post.id,
        user_id: post.user_id,
        title: post.title,
        content: post.content,
        created_at: post.created_at,
        updated_at: post.updated_at,
        tags: aggregate.tags.into_iter().map(tag_response).collect(),
    }
}

fn envelope(key: MessageKey, locale: RequestLocale, post: PostWithTags) -> PostEnvelope {
    PostEnvelope {
        message: key.translate(locale.0).to_string(),
        post: post_response(post),
    }
}

/// GET /api/posts?tag={name}
pub async fn index(
    _identity: Identity,
    locale: RequestLocale,
    state: web::Data<AppState>,
    query: web::Query<PostListQuery>,
) -> AppResult<HttpResponse> {
    let posts = state.posts.list(query.tag.as_deref()).await?;

    Ok(HttpResponse::Ok().json(PostListEnvelope {
        message: MessageKey::PostListed.translate(locale.0).to_string(),
        posts: posts.into_iter().map(post_response).collect(),
    }))
}

/// GET /api/posts/{id}
pub async fn show(
    _identity: Identity,
    locale: RequestLocale,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post = state.posts.get(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(envelope(MessageKey::PostShowed, locale, post)))
}

/// POST /api/posts
pub async fn store(
    identity: Identity,
    locale: RequestLocale,
    state: web::Data<AppState>,
    body: web::Json<PostPayload>,
) -> AppResult<HttpResponse> {
    let post = state
        .posts
        .create(identity.user_id, draft(body.into_inner()))
        .await?;

    tracing::info!(
        post_id = %post.post.id,
        user_id = %identity.user_id,
        tags = ?post.tag_names(),
        "Post created"
    );
    Ok(HttpResponse::Created().json(envelope(MessageKey::PostCreated, locale, post)))
}

/// PUT|PATCH /api/posts/{id} - owner only. `tags` replaces the post's tag
/// set when present and leaves it alone when absent.
pub async fn update(
    identity: Identity,
    locale: RequestLocale,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<PostPayload>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let post = state
        .posts
        .update(identity.user_id, id, draft(body.into_inner()))
        .await?;

    tracing::info!(post_id = %id, user_id = %identity.user_id, tags = ?post.tag_names(), "Post updated");
    Ok(HttpResponse::Ok().json(envelope(MessageKey::PostUpdated, locale, post)))
}

/// DELETE /api/posts/{id} - owner only. Tags stay behind.
pub async fn destroy(
    identity: Identity,
    locale: RequestLocale,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    state.posts.delete(identity.user_id, id).await?;

    tracing::info!(post_id = %id, user_id = %identity.user_id, "Post deleted");
    Ok(HttpResponse::Ok().json(MessageEnvelope {
        message: MessageKey::PostDeleted.translate(locale.0).to_string(),
    }))
}
