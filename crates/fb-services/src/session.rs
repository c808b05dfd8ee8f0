//! # Session Registry
//!
//! Process-lifetime list of active (token, username) pairs. Tokens are
//! opaque 64-char alphanumeric strings (well over 256 bits of entropy) with
//! no server-side expiry; the cookie max-age is only a client hint.

use rand::distributions::Alphanumeric;
use rand::{thread_rng, Rng};
use tokio::sync::RwLock;

const TOKEN_LEN: usize = 64;

struct SessionEntry {
    token: String,
    username: String,
}

#[derive(Default)]
pub struct SessionRegistry {
    entries: RwLock<Vec<SessionEntry>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a fresh token for `username`, evicting any existing entry for
    /// that user first — at most one active session per user.
    pub async fn issue(&self, username: &str) -> String {
        let token = generate_token();
        let mut entries = self.entries.write().await;
        entries.retain(|e| e.username != username);
        entries.push(SessionEntry {
            token: token.clone(),
            username: username.to_string(),
        });
        token
    }

    /// Removes the matching entry if present; no-op otherwise.
    pub async fn revoke(&self, token: &str) {
        self.entries.write().await.retain(|e| e.token != token);
    }

    /// Linear lookup; the registry stays small enough that this is fine.
    pub async fn resolve(&self, token: &str) -> Option<String> {
        self.entries
            .read()
            .await
            .iter()
            .find(|e| e.token == token)
            .map(|e| e.username.clone())
    }
}

fn generate_token() -> String {
    thread_rng()
        .sample_iter(&Alphanumeric)
        .take(TOKEN_LEN)
        .map(char::from)
        .collect()
}
