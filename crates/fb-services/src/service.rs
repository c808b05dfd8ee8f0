//! # ForumService
//!
//! Owns the in-memory Users and ForumTree collections (loaded once at
//! startup) plus the session registry, and coordinates every read and write
//! against them.
//!
//! Locking discipline: one `RwLock` per shared collection, and one mutex per
//! post id for post-file mutations. A mutation clones the locked collection,
//! applies the change to the clone, persists it, and only then commits the
//! clone back — so concurrent readers never observe a partially-applied
//! change, and a failed save leaves memory and disk agreeing on the old
//! state. Operations that touch both collections take the forum lock before
//! the users lock.

use std::sync::Arc;

use dashmap::DashMap;
use fb_core::error::Result;
use fb_core::models::{ForumTree, User};
use fb_core::traits::{CaptchaVerifier, ForumStore, PasswordHasher};
use tokio::sync::{Mutex, RwLock};

use crate::identity::Identity;
use crate::mutation::ProfileDefaults;
use crate::session::SessionRegistry;

pub struct ForumService {
    pub(crate) store: Arc<dyn ForumStore>,
    pub(crate) hasher: Arc<dyn PasswordHasher>,
    pub(crate) captcha: Arc<dyn CaptchaVerifier>,
    pub(crate) defaults: ProfileDefaults,
    pub(crate) sessions: SessionRegistry,
    pub(crate) users: RwLock<Vec<User>>,
    pub(crate) forum: RwLock<ForumTree>,
    post_locks: DashMap<u64, Arc<Mutex<()>>>,
}

impl ForumService {
    /// Loads both collections from the store and wraps them in a service.
    pub async fn open(
        store: Arc<dyn ForumStore>,
        hasher: Arc<dyn PasswordHasher>,
        captcha: Arc<dyn CaptchaVerifier>,
        defaults: ProfileDefaults,
    ) -> Result<Self> {
        let users = store.load_users().await?;
        let forum = store.load_forum().await?;
        log::info!(
            "loaded {} users, {} boards, {} news items, {} badges",
            users.len(),
            forum.boards.len(),
            forum.news.len(),
            forum.badges.len()
        );
        Ok(Self {
            store,
            hasher,
            captcha,
            defaults,
            sessions: SessionRegistry::new(),
            users: RwLock::new(users),
            forum: RwLock::new(forum),
            post_locks: DashMap::new(),
        })
    }

    /// Maps a request's session token to the caller's identity. A token that
    /// resolves to a username with no backing user record yields Anonymous —
    /// failing open to "logged out", never to elevated privilege.
    pub async fn identify(&self, token: Option<&str>) -> Identity {
        let Some(token) = token else {
            return Identity::Anonymous;
        };
        let Some(username) = self.sessions.resolve(token).await else {
            return Identity::Anonymous;
        };
        let users = self.users.read().await;
        match users.iter().find(|u| u.username == username) {
            Some(user) => Identity::User {
                role: user.role(),
                username,
            },
            None => Identity::Anonymous,
        }
    }

    pub fn sessions(&self) -> &SessionRegistry {
        &self.sessions
    }

    /// The per-post mutation lock for `id`, created on first use.
    pub(crate) fn post_lock(&self, id: u64) -> Arc<Mutex<()>> {
        self.post_locks
            .entry(id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Runs `apply` against a clone of the users collection, persists the
    /// clone, and commits it on success. Holding the write lock across the
    /// save serializes writers; the save is one file write, so hold time
    /// stays bounded.
    pub(crate) async fn mutate_users<T>(
        &self,
        apply: impl FnOnce(&mut Vec<User>) -> Result<T>,
    ) -> Result<T> {
        let mut guard = self.users.write().await;
        let mut copy = guard.clone();
        let out = apply(&mut copy)?;
        self.store.save_users(&copy).await?;
        *guard = copy;
        Ok(out)
    }

    /// As `mutate_users`, for the forum tree.
    pub(crate) async fn mutate_forum<T>(
        &self,
        apply: impl FnOnce(&mut ForumTree) -> Result<T>,
    ) -> Result<T> {
        let mut guard = self.forum.write().await;
        let mut copy = guard.clone();
        let out = apply(&mut copy)?;
        self.store.save_forum(&copy).await?;
        *guard = copy;
        Ok(out)
    }
}
