//! HTTP handlers and route configuration.

mod auth;
mod contact;
mod pages;
mod posts;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg
        // Public pages
        .route("/", web::get().to(posts::list))
        .route("/about", web::get().to(pages::about))
        .route("/health", web::get().to(pages::health))
        // Posts and comments
        .route("/post/{id}", web::get().to(posts::detail))
        .route("/post/{id}", web::post().to(posts::add_comment))
        .route("/new-post", web::get().to(posts::compose_gate))
        .route("/new-post", web::post().to(posts::create))
        .route("/edit-post/{id}", web::get().to(posts::edit_gate))
        .route("/edit-post/{id}", web::post().to(posts::update))
        .route("/delete/{id}", web::get().to(posts::delete))
        // Accounts
        .route("/register", web::post().to(auth::register))
        .route("/login", web::post().to(auth::login))
        .route("/logout", web::get().to(auth::logout))
        .route("/me", web::get().to(auth::me))
        // Contact relay
        .route("/contact", web::post().to(contact::submit));
}
