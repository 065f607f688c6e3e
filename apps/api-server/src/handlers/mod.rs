//! HTTP handlers and route configuration.

mod blogs;
mod health;

use actix_web::web;

use crate::middleware::error::{json_error_handler, unknown_endpoint};

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .service(
            web::scope("/api")
                .route("/health", web::get().to(health::health_check))
                .service(
                    web::scope("/blogs")
                        .route("", web::get().to(blogs::list))
                        .route("", web::post().to(blogs::create))
                        // Registered ahead of `/{id}` so it is not taken for an id
                        .route("/stats", web::get().to(blogs::stats))
                        .route("/{id}", web::get().to(blogs::get))
                        .route("/{id}", web::put().to(blogs::replace))
                        .route("/{id}", web::delete().to(blogs::delete)),
                ),
        )
        .default_service(web::route().to(unknown_endpoint));
}
