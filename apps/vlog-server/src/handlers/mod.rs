//! HTTP handlers and route configuration.

mod admin;
mod auth;
mod health;
mod vlogs;
mod view;

#[cfg(test)]
mod tests;

use actix_web::web;

use crate::middleware::error::AppError;

/// Malformed JSON bodies and query strings get the same problem-details body
/// as every other client error.
fn extractor_config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    .app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    );
}

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    extractor_config(cfg);

    cfg.route("/", web::get().to(vlogs::list))
        .route("/health", web::get().to(health::health_check))
        .service(
            web::resource("/vlog/new/")
                .route(web::get().to(vlogs::new_form))
                .route(web::post().to(vlogs::create)),
        )
        // Registered before the detail pattern, which would otherwise take
        // `edit` and `delete` as slugs.
        .service(
            web::resource("/vlog/{id}/edit/")
                .route(web::get().to(vlogs::edit_form))
                .route(web::post().to(vlogs::update)),
        )
        .service(
            web::resource("/vlog/{id}/delete/")
                .route(web::get().to(vlogs::delete_confirmation))
                .route(web::post().to(vlogs::delete)),
        )
        .route("/vlog/{id}/{slug}/", web::get().to(vlogs::detail))
        .route("/categories/", web::get().to(vlogs::categories))
        .service(
            web::scope("/auth")
                .route("/register", web::post().to(auth::register))
                .route("/login", web::post().to(auth::login))
                .route("/me", web::get().to(auth::me)),
        )
        .service(
            web::scope("/admin")
                .route("/vlogs/", web::get().to(admin::list))
                .route("/vlogs/actions/", web::post().to(admin::batch))
                .service(
                    web::resource("/categories/")
                        .route(web::get().to(admin::categories))
                        .route(web::post().to(admin::create_category)),
                )
                .route(
                    "/categories/{id}/",
                    web::delete().to(admin::delete_category),
                ),
        );
}
