//! # seed binary
//!
//! Prepares a fresh data directory: an empty forum tree and one verified
//! administrator account. Refuses to touch a directory that already holds
//! collections.

use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context};
use chrono::Utc;
use fb_core::models::{Contacts, ForumTree, User};
use fb_core::traits::{ForumStore, PasswordHasher};
use fb_auth_simple::ArgonPasswordHasher;
use fb_store_json::JsonForumStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let args: Vec<String> = std::env::args().collect();
    let [_, data_dir, username, password] = args.as_slice() else {
        bail!("usage: seed <data-dir> <admin-username> <admin-password>");
    };

    let dir = Path::new(data_dir);
    if dir.join("users.json").exists() || dir.join("forum.json").exists() {
        bail!("{data_dir} already holds collections; refusing to overwrite");
    }

    let store = Arc::new(JsonForumStore::new(data_dir));
    store.init().await.context("creating data directories")?;

    let hash = ArgonPasswordHasher
        .hash(password)
        .context("hashing the admin password")?;

    let admin = User {
        username: username.clone(),
        hash,
        email: String::new(),
        description: "Forum administrator.".to_string(),
        verified: true,
        moderator: false,
        admin: true,
        posts: Vec::new(),
        replies: Vec::new(),
        contacts: Contacts::default(),
        badges: Vec::new(),
        about: String::new(),
        creation_date: Utc::now(),
        profile_picture: String::new(),
    };

    store.save_users(&[admin]).await.context("writing users.json")?;
    store
        .save_forum(&ForumTree::empty())
        .await
        .context("writing forum.json")?;

    log::info!("seeded {data_dir} with administrator {username}");
    Ok(())
}
