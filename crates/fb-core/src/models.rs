//! # Domain Models
//!
//! These structs mirror the persisted JSON shapes one-to-one: `users.json`
//! holds a `Vec<User>`, `forum.json` a `ForumTree`, and `posts/<id>.json` a
//! single `Post`. Field renames keep the on-disk format stable.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered account. The username is the unique, immutable key; every
/// other structure refers to users by name only (weak reference).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    /// Opaque password digest; only the PasswordHasher port interprets it.
    pub hash: String,
    pub email: String,
    /// Short status line shown under the username (max 100 chars).
    pub description: String,
    pub verified: bool,
    pub moderator: bool,
    pub admin: bool,
    /// Ids of posts this user originated, newest first.
    pub posts: Vec<u64>,
    /// (post id, reply id) pairs for replies made, newest first.
    pub replies: Vec<(u64, u64)>,
    pub contacts: Contacts,
    /// Names of badges held; definitions live in `ForumTree::badges`.
    pub badges: Vec<String>,
    /// Long-form profile text (max 1000 chars).
    pub about: String,
    #[serde(rename = "creationDate")]
    pub creation_date: DateTime<Utc>,
    /// Empty string or a URL ending in an allowed image extension.
    pub profile_picture: String,
}

/// Contact handles shown on a profile, each limited to 100 chars.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Contacts {
    pub discord: String,
    pub email: String,
    pub reddit: String,
    pub twitter: String,
    pub youtube: String,
}

/// Strictly ordered privilege levels derived from the role flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Role {
    Member,
    Moderator,
    Administrator,
}

impl Role {
    /// Display label used on posts and profiles.
    pub fn label(self) -> &'static str {
        match self {
            Role::Member => "User",
            Role::Moderator => "Moderator",
            Role::Administrator => "Admin",
        }
    }
}

impl User {
    /// Admin dominates moderator dominates plain member.
    pub fn role(&self) -> Role {
        if self.admin {
            Role::Administrator
        } else if self.moderator {
            Role::Moderator
        } else {
            Role::Member
        }
    }
}

/// The single rooted forum structure persisted as `forum.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForumTree {
    pub boards: Vec<Board>,
    /// News items, newest first.
    pub news: Vec<NewsItem>,
    pub badges: Vec<Badge>,
    /// Next post id to assign; separate counter from news ids.
    pub post_index: u64,
    /// Next news id to assign.
    pub news_index: u64,
}

impl ForumTree {
    /// First post id handed out by a fresh forum; profile pages show
    /// `post_index - FIRST_POST_ID` as the global post count.
    pub const FIRST_POST_ID: u64 = 1_000_000;

    pub fn empty() -> Self {
        Self {
            boards: Vec::new(),
            news: Vec::new(),
            badges: Vec::new(),
            post_index: Self::FIRST_POST_ID,
            news_index: 0,
        }
    }
}

/// Top-level forum category containing topics. Names are unique.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    pub name: String,
    pub description: String,
    pub topics: Vec<Topic>,
}

/// A named thread container within a board. A post id appears in at most one
/// of `posts` / `stickied_posts` at a time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Topic {
    pub name: String,
    pub description: String,
    /// Regular post ids, newest first.
    pub posts: Vec<u64>,
    /// Stickied post ids, shown above the regular list on page one.
    pub stickied_posts: Vec<u64>,
    pub locked: bool,
}

/// A front-page news item authored by an administrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,
    pub author: String,
    pub body: String,
    pub date: DateTime<Utc>,
    pub id: u64,
}

/// A decorative profile marker; administrators define and assign these.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Badge {
    pub name: String,
    pub image: String,
    pub description: String,
}

/// A discussion unit persisted as its own file. Reply 0 is the originating
/// message; deleting it deletes the whole post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    /// Post title.
    pub name: String,
    pub id: u64,
    pub replies: Vec<Reply>,
    /// Next reply id to assign; never decremented, so reply ids are unique
    /// and increasing even across deletions.
    #[serde(rename = "replyIndex")]
    pub reply_index: u64,
    pub locked: bool,
    pub date: DateTime<Utc>,
}

impl Post {
    /// The originating message, if the post still has one.
    pub fn origin(&self) -> Option<&Reply> {
        self.replies.first().filter(|r| r.id == 0)
    }

    pub fn reply(&self, id: u64) -> Option<&Reply> {
        self.replies.iter().find(|r| r.id == id)
    }
}

/// A single message inside a post. The author is a weak reference by
/// username; resolution falls back to a placeholder if the account is gone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reply {
    pub author: String,
    pub body: String,
    pub date: DateTime<Utc>,
    pub id: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_is_derived_with_admin_dominant() {
        let mut user = test_user("dana");
        assert_eq!(user.role(), Role::Member);
        user.moderator = true;
        assert_eq!(user.role(), Role::Moderator);
        user.admin = true;
        assert_eq!(user.role(), Role::Administrator);
        assert!(Role::Administrator > Role::Moderator);
        assert!(Role::Moderator > Role::Member);
    }

    #[test]
    fn persisted_field_names_are_stable() {
        let post = Post {
            name: "Hello".into(),
            id: 1_000_000,
            replies: vec![],
            reply_index: 1,
            locked: false,
            date: Utc::now(),
        };
        let json = serde_json::to_value(&post).unwrap();
        assert!(json.get("replyIndex").is_some());

        let user = test_user("dana");
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("creationDate").is_some());
    }

    pub(crate) fn test_user(name: &str) -> User {
        User {
            username: name.to_string(),
            hash: String::new(),
            email: format!("{name}@example.com"),
            description: String::new(),
            verified: false,
            moderator: false,
            admin: false,
            posts: vec![],
            replies: vec![],
            contacts: Contacts::default(),
            badges: vec![],
            about: String::new(),
            creation_date: Utc::now(),
            profile_picture: String::new(),
        }
    }
}
