//! # Core Traits (Ports)
//!
//! Any plugin must implement these traits to be used by the binary.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{ForumTree, Post, User};

/// Persistence contract for the three flat-file collections.
///
/// Loading is a full-file parse; saving serializes the entire structure and
/// replaces the target file. Callers must treat a save failure as the
/// mutation having failed — there is no partial write to fall back on.
#[async_trait]
pub trait ForumStore: Send + Sync {
    async fn load_users(&self) -> Result<Vec<User>>;
    async fn save_users(&self, users: &[User]) -> Result<()>;

    async fn load_forum(&self) -> Result<ForumTree>;
    async fn save_forum(&self, forum: &ForumTree) -> Result<()>;

    /// Returns `None` if no post file with this id exists in the active area.
    async fn load_post(&self, id: u64) -> Result<Option<Post>>;
    async fn save_post(&self, post: &Post) -> Result<()>;

    /// Moves `posts/<id>.json` into the deleted-items area rather than
    /// erasing it.
    async fn retire_post(&self, id: u64) -> Result<()>;
}

/// One-way password hashing primitive.
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, plaintext: &str) -> Result<String>;
    fn verify(&self, plaintext: &str, digest: &str) -> bool;
}

/// Third-party captcha verification. Implementations perform network I/O and
/// must be called without any collection lock held.
#[async_trait]
pub trait CaptchaVerifier: Send + Sync {
    /// `Ok(true)` on a passing verdict, `Ok(false)` on a failing one,
    /// `Err(Upstream)` when the verifier cannot be reached.
    async fn verify(&self, response_token: &str) -> Result<bool>;
}

/// Presentation collaborator: raw post text in, sanitized HTML out.
pub trait PostRenderer: Send + Sync {
    fn render(&self, raw: &str) -> String;
}
