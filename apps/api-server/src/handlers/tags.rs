//! Tag handlers.

use actix_web::{HttpResponse, web};

use blog_core::domain::Tag;
use blog_shared::dto::TagResponse;

use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

pub(super) fn tag_response(tag: Tag) -> TagResponse {
    TagResponse {
        id: tag.id,
        name: tag.name,
    }
}

/// GET /api/tags - every tag, including ones no post uses any more.
pub async fn index(_identity: Identity, state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let tags = state.posts.list_tags().await?;

    Ok(HttpResponse::Ok().json(tags.into_iter().map(tag_response).collect::<Vec<_>>()))
}
