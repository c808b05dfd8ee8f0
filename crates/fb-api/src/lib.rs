//! # fb-api
//!
//! The web routing and orchestration layer for flatboard: cookie/session
//! extraction, request parsing, service calls, and redirect-or-render
//! responses.

pub mod context;
pub mod handlers;
pub mod middleware;
pub mod render;
pub mod state;

use actix_web::web;

/// Configures all page and API routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg
        // Pages
        .route("/", web::get().to(handlers::pages::index))
        .route("/login", web::get().to(handlers::pages::login))
        .route("/register", web::get().to(handlers::pages::register))
        .route("/register-done", web::get().to(handlers::pages::register_done))
        .route("/logout", web::get().to(handlers::auth::logout))
        .route("/news", web::get().to(handlers::pages::news))
        .route("/boards", web::get().to(handlers::pages::boards))
        .route("/boards/view", web::get().to(handlers::pages::topic))
        .route("/post/view", web::get().to(handlers::pages::view_post))
        .route("/post", web::get().to(handlers::pages::new_post))
        .route("/post/edit", web::get().to(handlers::pages::edit_reply))
        .route("/post/reply", web::get().to(handlers::pages::post_reply))
        .route("/users", web::get().to(handlers::pages::profile))
        .route("/users/edit", web::get().to(handlers::pages::edit_profile))
        .route("/directory", web::get().to(handlers::pages::directory))
        .route("/badges", web::get().to(handlers::pages::badges))
        .route("/admin", web::get().to(handlers::pages::admin))
        .route("/admin/editnews", web::get().to(handlers::pages::admin_edit_news))
        .route("/admin/editbadge", web::get().to(handlers::pages::admin_edit_badge))
        .route("/admin/managebadges", web::get().to(handlers::pages::admin_manage_badges))
        // Authentication API
        .route("/api/login", web::post().to(handlers::auth::login))
        .route("/api/signup", web::post().to(handlers::auth::signup))
        .route("/api/editprofile", web::post().to(handlers::auth::edit_profile))
        // Posting and moderation API
        .route("/api/post", web::post().to(handlers::posts::create_post))
        .route("/api/reply", web::post().to(handlers::posts::reply))
        .route("/api/editreply", web::post().to(handlers::posts::edit_reply))
        .route("/api/deletepost", web::get().to(handlers::posts::delete_reply))
        .route("/api/sticky", web::get().to(handlers::posts::sticky))
        .route("/api/unsticky", web::get().to(handlers::posts::unsticky))
        .route("/api/locktopic", web::get().to(handlers::posts::lock_topic))
        .route("/api/unlocktopic", web::get().to(handlers::posts::unlock_topic))
        .route("/api/lockpost", web::get().to(handlers::posts::lock_post))
        .route("/api/unlockpost", web::get().to(handlers::posts::unlock_post))
        // Administration API
        .route("/api/manageuser", web::post().to(handlers::admin::manage_user))
        .route("/api/deleteuser", web::get().to(handlers::admin::delete_user))
        .route("/api/createboard", web::post().to(handlers::admin::create_board))
        .route("/api/deleteboard", web::get().to(handlers::admin::delete_board))
        .route("/api/createtopic", web::post().to(handlers::admin::create_topic))
        .route("/api/deletetopic", web::get().to(handlers::admin::delete_topic))
        .route("/api/createnews", web::post().to(handlers::admin::create_news))
        .route("/api/editnews", web::post().to(handlers::admin::edit_news))
        .route("/api/deletenews", web::get().to(handlers::admin::delete_news))
        .route("/api/createbadge", web::post().to(handlers::admin::create_badge))
        .route("/api/editbadge", web::post().to(handlers::admin::edit_badge))
        .route("/api/deletebadge", web::get().to(handlers::admin::delete_badge))
        .route("/api/managebadges", web::post().to(handlers::admin::manage_badges))
        // Everything else is a 404 page
        .default_service(web::to(handlers::pages::not_found));
}
