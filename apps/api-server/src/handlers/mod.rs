//! HTTP handlers and route configuration.

mod health;
mod posts;
mod tags;
mod user;

#[cfg(test)]
mod tests;

use std::collections::BTreeMap;

use actix_web::{HttpResponse, error::InternalError, web};

use blog_shared::ErrorResponse;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .app_data(json_config())
            .app_data(path_config())
            // Public routes
            .route("/health", web::get().to(health::health_check))
            // Bearer-authenticated routes
            .route("/user", web::get().to(user::me))
            .route("/tags", web::get().to(tags::index))
            .service(
                web::scope("/posts")
                    .route("", web::get().to(posts::index))
                    .route("", web::post().to(posts::store))
                    .route("/{id}", web::get().to(posts::show))
                    .route("/{id}", web::put().to(posts::update))
                    .route("/{id}", web::patch().to(posts::update))
                    .route("/{id}", web::delete().to(posts::destroy)),
            ),
    );
}

/// Unreadable bodies are a validation failure on the `body` field.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        tracing::debug!(error = %err, "Rejected request body");

        let mut errors = BTreeMap::new();
        errors.insert(
            "body".to_string(),
            vec!["The request body must be a valid JSON object.".to_string()],
        );
        let response = HttpResponse::UnprocessableEntity().json(ErrorResponse::unprocessable(errors));
        InternalError::from_response(err, response).into()
    })
}

/// A path id that is not a UUID cannot name an existing post.
fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, _req| {
        let response = HttpResponse::NotFound().json(ErrorResponse::not_found("post not found"));
        InternalError::from_response(err, response).into()
    })
}
