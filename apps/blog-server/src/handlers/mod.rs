//! HTTP handlers and route configuration.

mod health;
mod posts;
mod views;

#[cfg(test)]
mod tests;

use actix_web::web;

use crate::middleware::error::AppError;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    .service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            // Blog routes
            .service(
                web::scope("/posts")
                    .route("", web::get().to(posts::post_list))
                    .route("/tag/{tag_slug}", web::get().to(posts::post_list_by_tag))
                    .route(
                        "/{year}/{month}/{day}/{slug}",
                        web::get().to(posts::post_detail),
                    )
                    .route("/{post_id}/comment", web::post().to(posts::post_comment))
                    .route("/{post_id}/share", web::get().to(posts::share_form))
                    .route("/{post_id}/share", web::post().to(posts::post_share)),
            ),
    );
}
