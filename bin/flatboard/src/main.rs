//! # flatboard binary
//!
//! Assembles the plugins, loads the flat-file collections, and serves the
//! forum over HTTP.

use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use anyhow::Context;
use fb_api::middleware::standard_middleware;
use fb_api::render::EscapeRenderer;
use fb_api::state::AppState;
use fb_auth_simple::{ArgonPasswordHasher, RecaptchaVerifier};
use fb_configs::Settings;
use fb_services::{ForumService, ProfileDefaults};
use fb_store_json::JsonForumStore;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let settings = Settings::load().context("loading configuration")?;

    let store = Arc::new(JsonForumStore::new(&settings.data_dir));
    store.init().await.context("preparing data directory")?;

    let hasher = Arc::new(ArgonPasswordHasher);
    let captcha = Arc::new(RecaptchaVerifier::new(
        settings.recaptcha_secret.clone(),
        settings.captcha_enabled,
    ));
    let defaults = ProfileDefaults {
        description: settings.user_description_default.clone(),
        profile_picture: settings.user_profile_picture_default.clone(),
    };

    let service = ForumService::open(store, hasher, captcha, defaults)
        .await
        .context("loading collections (run the seed binary for a fresh data directory)")?;

    let bind_addr = settings.bind_addr.clone();
    let state = web::Data::new(AppState {
        service: Arc::new(service),
        settings,
        renderer: Arc::new(EscapeRenderer),
    });

    log::info!("flatboard starting on http://{bind_addr}");

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(standard_middleware())
            .service(actix_files::Files::new("/static", "./static"))
            .configure(fb_api::configure_routes)
    })
    .bind(&bind_addr)
    .with_context(|| format!("binding {bind_addr}"))?
    .run()
    .await?;

    Ok(())
}
