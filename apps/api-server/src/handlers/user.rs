use actix_web::HttpResponse;

use blog_shared::dto::UserResponse;

use crate::middleware::auth::Identity;

/// GET /api/user - the caller as seen through their token.
pub async fn me(identity: Identity) -> HttpResponse {
    HttpResponse::Ok().json(UserResponse {
        id: identity.user_id,
        email: identity.email,
    })
}
