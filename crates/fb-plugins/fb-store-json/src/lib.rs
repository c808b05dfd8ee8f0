//! # fb-store-json Implementation
//!
//! Flat-file implementation of the `ForumStore` port: `users.json`,
//! `forum.json` and one `posts/<id>.json` file per post, with deleted posts
//! moved aside to `posts/deleted/`. Every save serializes the whole
//! structure and replaces the target file through a temp-file rename, so a
//! failed write never leaves a truncated collection behind.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use fb_core::error::{AppError, Result};
use fb_core::models::{ForumTree, Post, User};
use fb_core::traits::ForumStore;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::fs;

pub struct JsonForumStore {
    data_dir: PathBuf,
}

impl JsonForumStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Creates the data directory tree. Call once at startup.
    pub async fn init(&self) -> Result<()> {
        fs::create_dir_all(self.data_dir.join("posts").join("deleted"))
            .await
            .map_err(|e| AppError::Persistence(format!("creating data directories: {e}")))
    }

    fn users_path(&self) -> PathBuf {
        self.data_dir.join("users.json")
    }

    fn forum_path(&self) -> PathBuf {
        self.data_dir.join("forum.json")
    }

    fn post_path(&self, id: u64) -> PathBuf {
        self.data_dir.join("posts").join(format!("{id}.json"))
    }

    fn deleted_post_path(&self, id: u64) -> PathBuf {
        self.data_dir
            .join("posts")
            .join("deleted")
            .join(format!("{id}.json"))
    }

    async fn read_json<T: DeserializeOwned>(&self, path: &Path) -> Result<T> {
        let bytes = fs::read(path)
            .await
            .map_err(|e| AppError::Persistence(format!("reading {}: {e}", path.display())))?;
        serde_json::from_slice(&bytes)
            .map_err(|e| AppError::Persistence(format!("parsing {}: {e}", path.display())))
    }

    /// Whole-file replace: serialize to `<path>.tmp`, then rename over the
    /// target so readers only ever observe a complete document.
    async fn write_json<T: Serialize>(&self, path: &Path, value: &T) -> Result<()> {
        let json = serde_json::to_vec(value)
            .map_err(|e| AppError::Persistence(format!("serializing {}: {e}", path.display())))?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, &json)
            .await
            .map_err(|e| AppError::Persistence(format!("writing {}: {e}", tmp.display())))?;
        fs::rename(&tmp, path)
            .await
            .map_err(|e| AppError::Persistence(format!("replacing {}: {e}", path.display())))
    }
}

#[async_trait]
impl ForumStore for JsonForumStore {
    async fn load_users(&self) -> Result<Vec<User>> {
        self.read_json(&self.users_path()).await
    }

    async fn save_users(&self, users: &[User]) -> Result<()> {
        self.write_json(&self.users_path(), &users).await
    }

    async fn load_forum(&self) -> Result<ForumTree> {
        self.read_json(&self.forum_path()).await
    }

    async fn save_forum(&self, forum: &ForumTree) -> Result<()> {
        self.write_json(&self.forum_path(), forum).await
    }

    async fn load_post(&self, id: u64) -> Result<Option<Post>> {
        let path = self.post_path(id);
        match fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map(Some)
                .map_err(|e| AppError::Persistence(format!("parsing {}: {e}", path.display()))),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Persistence(format!(
                "reading {}: {e}",
                path.display()
            ))),
        }
    }

    async fn save_post(&self, post: &Post) -> Result<()> {
        self.write_json(&self.post_path(post.id), post).await
    }

    async fn retire_post(&self, id: u64) -> Result<()> {
        let from = self.post_path(id);
        let to = self.deleted_post_path(id);
        match fs::rename(&from, &to).await {
            Ok(()) => {
                log::info!("retired post {id} to deleted area");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(AppError::NotFound("post", id.to_string()))
            }
            Err(e) => Err(AppError::Persistence(format!(
                "retiring post {id}: {e}"
            ))),
        }
    }
}
