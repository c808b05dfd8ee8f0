//! # Mutation Service
//!
//! Every write follows the same protocol: resolve identity, authorize,
//! validate, locate the target, apply the change to a clone, persist, then
//! commit. A failed persist surfaces as `Persistence` and the in-memory
//! state keeps the old value — a mutation is never treated as committed
//! unless its collection reached disk.

use chrono::Utc;
use fb_core::error::{AppError, Result};
use fb_core::models::{Badge, Board, Contacts, NewsItem, Post, Reply, Topic, User};
use fb_core::validate;

use crate::identity::Identity;
use crate::service::ForumService;

/// Profile values stamped onto newly registered accounts; sourced from
/// configuration by the binary.
#[derive(Debug, Clone, Default)]
pub struct ProfileDefaults {
    pub description: String,
    pub profile_picture: String,
}

#[derive(Debug, Clone)]
pub struct Registration {
    pub username: String,
    pub password: String,
    pub password_repeat: String,
    pub email: String,
    pub captcha_token: String,
}

#[derive(Debug, Clone)]
pub struct Login {
    pub username: String,
    pub password: String,
    pub captcha_token: String,
}

#[derive(Debug, Clone)]
pub struct ProfileEdit {
    pub status: String,
    pub about: String,
    pub profile_picture: String,
    pub contacts: Contacts,
}

#[derive(Debug, Clone, Copy)]
pub struct RoleFlags {
    pub verified: bool,
    pub moderator: bool,
    pub admin: bool,
}

/// Outcome of a reply deletion, so callers know where to send the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyDeletion {
    /// Reply 0 was deleted: the whole post is delisted and retired.
    PostDeleted,
    /// A later reply was removed; the post survives.
    ReplyRemoved,
}

impl ForumService {
    // ── Authentication ──────────────────────────────────────────────────

    /// Registration: captcha, matching passwords, username and email rules,
    /// unique username. New accounts start unverified and cannot log in
    /// until an administrator flips the flag.
    pub async fn register(&self, reg: Registration) -> Result<()> {
        // Captcha verification is network I/O; it runs before any lock.
        if !self.captcha.verify(&reg.captcha_token).await? {
            return Err(AppError::Validation("Failed the captcha.".into()));
        }
        if reg.password != reg.password_repeat {
            return Err(AppError::Validation("Passwords are not the same.".into()));
        }
        validate::username(&reg.username)?;
        validate::email(&reg.email)?;

        let hash = self.hasher.hash(&reg.password)?;
        let defaults = self.defaults.clone();
        self.mutate_users(move |users| {
            if users.iter().any(|u| u.username == reg.username) {
                return Err(AppError::Validation(
                    "A user with this name already exists.".into(),
                ));
            }
            users.push(User {
                username: reg.username,
                hash,
                email: reg.email,
                description: defaults.description,
                verified: false,
                moderator: false,
                admin: false,
                posts: Vec::new(),
                replies: Vec::new(),
                contacts: Contacts::default(),
                badges: Vec::new(),
                about: String::new(),
                creation_date: Utc::now(),
                profile_picture: defaults.profile_picture,
            });
            Ok(())
        })
        .await?;
        log::info!("registered new account");
        Ok(())
    }

    /// Login: captcha, account exists and is verified, password verifies.
    /// Issuing the token evicts any previous session for the user.
    pub async fn login(&self, login: Login) -> Result<String> {
        if !self.captcha.verify(&login.captcha_token).await? {
            return Err(AppError::Validation("Failed the captcha.".into()));
        }

        let (hash, verified) = {
            let users = self.users.read().await;
            let user = users
                .iter()
                .find(|u| u.username == login.username)
                .ok_or_else(|| AppError::Validation("Invalid username given.".into()))?;
            (user.hash.clone(), user.verified)
        };
        if !verified {
            return Err(AppError::Validation(
                "This account is not yet verified.".into(),
            ));
        }
        if !self.hasher.verify(&login.password, &hash) {
            return Err(AppError::Validation("Invalid password given.".into()));
        }

        Ok(self.sessions.issue(&login.username).await)
    }

    pub async fn logout(&self, token: &str) {
        self.sessions.revoke(token).await;
    }

    // ── Posting ─────────────────────────────────────────────────────────

    /// Creates a post in a topic: assigns the next global post id, writes
    /// the post file, lists the id at the front of the topic, and records it
    /// on the author's profile.
    pub async fn create_post(
        &self,
        identity: &Identity,
        board: &str,
        topic: &str,
        title: &str,
        body: &str,
    ) -> Result<u64> {
        let author = identity.require_member()?.to_string();
        if title.trim().is_empty() || body.trim().is_empty() {
            return Err(AppError::Validation(
                "A post needs a title and a body.".into(),
            ));
        }

        let id = {
            let mut guard = self.forum.write().await;
            let mut forum = guard.clone();
            let board = forum
                .boards
                .iter_mut()
                .find(|b| b.name == board)
                .ok_or_else(|| AppError::NotFound("board", board.to_string()))?;
            let topic = board
                .topics
                .iter_mut()
                .find(|t| t.name == topic)
                .ok_or_else(|| AppError::NotFound("topic", topic.to_string()))?;
            if topic.locked {
                return Err(AppError::Validation("This topic is locked.".into()));
            }

            let id = forum.post_index;
            let now = Utc::now();
            let post = Post {
                name: title.to_string(),
                id,
                replies: vec![Reply {
                    author: author.clone(),
                    body: body.to_string(),
                    date: now,
                    id: 0,
                }],
                reply_index: 1,
                locked: false,
                date: now,
            };
            // The post file lands first; the listing only goes in once the
            // post is retrievable.
            self.store.save_post(&post).await?;
            topic.posts.insert(0, id);
            forum.post_index += 1;
            self.store.save_forum(&forum).await?;
            *guard = forum;
            id
        };

        self.mutate_users(|users| {
            if let Some(user) = users.iter_mut().find(|u| u.username == author) {
                user.posts.insert(0, id);
            }
            Ok(())
        })
        .await?;

        log::info!("created post {id}");
        Ok(id)
    }

    /// Appends a reply; the reply id is the post's current `reply_index`,
    /// which then increments and never goes back.
    pub async fn add_reply(&self, identity: &Identity, post_id: u64, body: &str) -> Result<u64> {
        let author = identity.require_member()?.to_string();
        if body.trim().is_empty() {
            return Err(AppError::Validation("A reply needs a body.".into()));
        }

        let lock = self.post_lock(post_id);
        let _guard = lock.lock().await;

        let mut post = self
            .store
            .load_post(post_id)
            .await?
            .ok_or_else(|| AppError::NotFound("post", post_id.to_string()))?;
        if post.locked {
            return Err(AppError::Validation("This post is locked.".into()));
        }

        let reply_id = post.reply_index;
        post.replies.push(Reply {
            author: author.clone(),
            body: body.to_string(),
            date: Utc::now(),
            id: reply_id,
        });
        post.reply_index += 1;
        self.store.save_post(&post).await?;

        self.mutate_users(|users| {
            if let Some(user) = users.iter_mut().find(|u| u.username == author) {
                user.replies.insert(0, (post_id, reply_id));
            }
            Ok(())
        })
        .await?;

        Ok(reply_id)
    }

    /// Rewrites the body of the caller's own reply.
    pub async fn edit_reply(
        &self,
        identity: &Identity,
        post_id: u64,
        reply_id: u64,
        body: &str,
    ) -> Result<()> {
        let caller = identity.require_member()?.to_string();

        let lock = self.post_lock(post_id);
        let _guard = lock.lock().await;

        let mut post = self
            .store
            .load_post(post_id)
            .await?
            .ok_or_else(|| AppError::NotFound("post", post_id.to_string()))?;
        if post.locked {
            return Err(AppError::Validation("This post is locked.".into()));
        }
        let reply = post
            .replies
            .iter_mut()
            .find(|r| r.id == reply_id)
            .ok_or_else(|| AppError::NotFound("reply", reply_id.to_string()))?;
        if reply.author != caller {
            log::warn!("unauthorized edit attempt on post {post_id} reply {reply_id}");
            return Err(AppError::Unauthorized("not the reply author".into()));
        }

        reply.body = body.to_string();
        self.store.save_post(&post).await
    }

    /// Deletes a reply. Reply 0 means "delete the whole post": delist it
    /// from its topic, move the file to the deleted area, and drop it from
    /// the author's authored list. Later replies are removed in place and
    /// surviving ids never change.
    pub async fn delete_reply(
        &self,
        identity: &Identity,
        post_id: u64,
        reply_id: u64,
    ) -> Result<ReplyDeletion> {
        let caller = identity.require_member()?.to_string();

        let lock = self.post_lock(post_id);
        let _guard = lock.lock().await;

        let mut post = self
            .store
            .load_post(post_id)
            .await?
            .ok_or_else(|| AppError::NotFound("post", post_id.to_string()))?;
        let reply = post
            .reply(reply_id)
            .ok_or_else(|| AppError::NotFound("reply", reply_id.to_string()))?
            .clone();

        let is_author = caller == reply.author;
        if !is_author && !identity.is_moderator() {
            return Err(AppError::Unauthorized(
                "author or moderator role required".into(),
            ));
        }

        if reply_id == 0 {
            // Cascade. Each step reports failure; a partially-applied
            // cascade is surfaced to the caller rather than swallowed.
            self.mutate_forum(|forum| {
                for board in &mut forum.boards {
                    for topic in &mut board.topics {
                        if let Some(pos) = topic.posts.iter().position(|&p| p == post_id) {
                            topic.posts.remove(pos);
                            return Ok(());
                        }
                        if let Some(pos) =
                            topic.stickied_posts.iter().position(|&p| p == post_id)
                        {
                            topic.stickied_posts.remove(pos);
                            return Ok(());
                        }
                    }
                }
                Err(AppError::NotFound("post listing", post_id.to_string()))
            })
            .await?;

            self.store.retire_post(post_id).await?;

            self.mutate_users(|users| {
                if let Some(user) = users.iter_mut().find(|u| u.username == reply.author) {
                    user.posts.retain(|&p| p != post_id);
                }
                Ok(())
            })
            .await?;

            log::info!("deleted post {post_id}");
            Ok(ReplyDeletion::PostDeleted)
        } else {
            post.replies.retain(|r| r.id != reply_id);
            self.store.save_post(&post).await?;
            Ok(ReplyDeletion::ReplyRemoved)
        }
    }

    // ── Moderation ──────────────────────────────────────────────────────

    /// Moves a post id between a topic's regular and stickied lists,
    /// inserting at the front of the destination.
    pub async fn set_sticky(
        &self,
        identity: &Identity,
        board: &str,
        topic: &str,
        post_id: u64,
        stickied: bool,
    ) -> Result<()> {
        identity.require_moderator()?;
        self.mutate_forum(|forum| {
            let board = forum
                .boards
                .iter_mut()
                .find(|b| b.name == board)
                .ok_or_else(|| AppError::NotFound("board", board.to_string()))?;
            let topic = board
                .topics
                .iter_mut()
                .find(|t| t.name == topic)
                .ok_or_else(|| AppError::NotFound("topic", topic.to_string()))?;

            let (from, to) = if stickied {
                (&mut topic.posts, &mut topic.stickied_posts)
            } else {
                (&mut topic.stickied_posts, &mut topic.posts)
            };
            let pos = from
                .iter()
                .position(|&p| p == post_id)
                .ok_or_else(|| AppError::NotFound("post in topic", post_id.to_string()))?;
            let id = from.remove(pos);
            to.insert(0, id);
            Ok(())
        })
        .await
    }

    pub async fn set_topic_locked(
        &self,
        identity: &Identity,
        board: &str,
        topic: &str,
        locked: bool,
    ) -> Result<()> {
        identity.require_moderator()?;
        self.mutate_forum(|forum| {
            let board = forum
                .boards
                .iter_mut()
                .find(|b| b.name == board)
                .ok_or_else(|| AppError::NotFound("board", board.to_string()))?;
            let topic = board
                .topics
                .iter_mut()
                .find(|t| t.name == topic)
                .ok_or_else(|| AppError::NotFound("topic", topic.to_string()))?;
            topic.locked = locked;
            Ok(())
        })
        .await
    }

    pub async fn set_post_locked(
        &self,
        identity: &Identity,
        post_id: u64,
        locked: bool,
    ) -> Result<()> {
        identity.require_moderator()?;

        let lock = self.post_lock(post_id);
        let _guard = lock.lock().await;

        let mut post = self
            .store
            .load_post(post_id)
            .await?
            .ok_or_else(|| AppError::NotFound("post", post_id.to_string()))?;
        post.locked = locked;
        self.store.save_post(&post).await
    }

    // ── Profile ─────────────────────────────────────────────────────────

    pub async fn edit_profile(&self, identity: &Identity, edit: ProfileEdit) -> Result<()> {
        let caller = identity.require_member()?.to_string();

        validate::profile_picture(&edit.profile_picture)?;
        validate::max_len(&edit.status, validate::STATUS_MAX, "Status")?;
        validate::max_len(&edit.about, validate::ABOUT_MAX, "About")?;
        for handle in [
            &edit.contacts.discord,
            &edit.contacts.email,
            &edit.contacts.reddit,
            &edit.contacts.twitter,
            &edit.contacts.youtube,
        ] {
            validate::max_len(handle, validate::CONTACT_MAX, "Contact info")?;
        }

        self.mutate_users(move |users| {
            let user = users
                .iter_mut()
                .find(|u| u.username == caller)
                .ok_or_else(|| AppError::NotFound("user", caller.clone()))?;
            user.description = edit.status;
            user.about = edit.about;
            user.profile_picture = edit.profile_picture;
            user.contacts = edit.contacts;
            Ok(())
        })
        .await
    }

    // ── Administration: users ───────────────────────────────────────────

    pub async fn manage_user(
        &self,
        identity: &Identity,
        username: &str,
        flags: RoleFlags,
    ) -> Result<()> {
        identity.require_admin()?;
        self.mutate_users(|users| {
            let user = users
                .iter_mut()
                .find(|u| u.username == username)
                .ok_or_else(|| AppError::NotFound("user", username.to_string()))?;
            user.verified = flags.verified;
            user.moderator = flags.moderator;
            user.admin = flags.admin;
            Ok(())
        })
        .await
    }

    /// Removes the account only; authored content stays behind as weak
    /// references that resolve to the deleted-user placeholder.
    pub async fn delete_user(&self, identity: &Identity, username: &str) -> Result<()> {
        identity.require_admin()?;
        self.mutate_users(|users| {
            let pos = users
                .iter()
                .position(|u| u.username == username)
                .ok_or_else(|| AppError::NotFound("user", username.to_string()))?;
            users.remove(pos);
            Ok(())
        })
        .await
    }

    /// Replaces a user's badge set from a comma-delimited list. Every name
    /// must exist as a badge definition or nothing changes.
    pub async fn assign_badges(
        &self,
        identity: &Identity,
        username: &str,
        badge_list: &str,
    ) -> Result<()> {
        identity.require_admin()?;

        let requested: Vec<String> = if badge_list.is_empty() {
            Vec::new()
        } else {
            badge_list.split(',').map(str::to_string).collect()
        };

        {
            let forum = self.forum.read().await;
            for name in &requested {
                if !forum.badges.iter().any(|b| &b.name == name) {
                    return Err(AppError::Validation(format!(
                        "No badge with name \"{name}\" exists."
                    )));
                }
            }
        }

        self.mutate_users(move |users| {
            let user = users
                .iter_mut()
                .find(|u| u.username == username)
                .ok_or_else(|| AppError::NotFound("user", username.to_string()))?;
            user.badges = requested;
            Ok(())
        })
        .await
    }

    // ── Administration: boards and topics ───────────────────────────────

    pub async fn create_board(
        &self,
        identity: &Identity,
        name: &str,
        description: &str,
    ) -> Result<()> {
        identity.require_admin()?;
        if name.trim().is_empty() {
            return Err(AppError::Validation("A board needs a name.".into()));
        }
        self.mutate_forum(|forum| {
            if forum.boards.iter().any(|b| b.name == name) {
                return Err(AppError::Validation(
                    "A board with this name already exists.".into(),
                ));
            }
            forum.boards.push(Board {
                name: name.to_string(),
                description: description.to_string(),
                topics: Vec::new(),
            });
            Ok(())
        })
        .await?;
        log::info!("added a new board {name}");
        Ok(())
    }

    pub async fn delete_board(&self, identity: &Identity, name: &str) -> Result<()> {
        identity.require_admin()?;
        self.mutate_forum(|forum| {
            let pos = forum
                .boards
                .iter()
                .position(|b| b.name == name)
                .ok_or_else(|| AppError::NotFound("board", name.to_string()))?;
            forum.boards.remove(pos);
            Ok(())
        })
        .await
    }

    pub async fn create_topic(
        &self,
        identity: &Identity,
        board: &str,
        name: &str,
        description: &str,
    ) -> Result<()> {
        identity.require_admin()?;
        if name.trim().is_empty() {
            return Err(AppError::Validation("A topic needs a name.".into()));
        }
        self.mutate_forum(|forum| {
            let board = forum
                .boards
                .iter_mut()
                .find(|b| b.name == board)
                .ok_or_else(|| AppError::NotFound("board", board.to_string()))?;
            if board.topics.iter().any(|t| t.name == name) {
                return Err(AppError::Validation(
                    "A topic with this name already exists.".into(),
                ));
            }
            board.topics.push(Topic {
                name: name.to_string(),
                description: description.to_string(),
                posts: Vec::new(),
                stickied_posts: Vec::new(),
                locked: false,
            });
            Ok(())
        })
        .await?;
        log::info!("added a new topic {name} to board {board}");
        Ok(())
    }

    pub async fn delete_topic(&self, identity: &Identity, board: &str, topic: &str) -> Result<()> {
        identity.require_admin()?;
        self.mutate_forum(|forum| {
            let board = forum
                .boards
                .iter_mut()
                .find(|b| b.name == board)
                .ok_or_else(|| AppError::NotFound("board", board.to_string()))?;
            let pos = board
                .topics
                .iter()
                .position(|t| t.name == topic)
                .ok_or_else(|| AppError::NotFound("topic", topic.to_string()))?;
            board.topics.remove(pos);
            Ok(())
        })
        .await
    }

    // ── Administration: news ────────────────────────────────────────────

    pub async fn create_news(&self, identity: &Identity, title: &str, body: &str) -> Result<u64> {
        let author = identity.require_admin()?.to_string();
        self.mutate_forum(move |forum| {
            let id = forum.news_index;
            forum.news.insert(
                0,
                NewsItem {
                    title: title.to_string(),
                    author,
                    body: body.to_string(),
                    date: Utc::now(),
                    id,
                },
            );
            forum.news_index += 1;
            Ok(id)
        })
        .await
    }

    pub async fn edit_news(
        &self,
        identity: &Identity,
        id: u64,
        title: &str,
        body: &str,
    ) -> Result<()> {
        identity.require_admin()?;
        self.mutate_forum(|forum| {
            let item = forum
                .news
                .iter_mut()
                .find(|n| n.id == id)
                .ok_or_else(|| AppError::NotFound("news post", id.to_string()))?;
            item.title = title.to_string();
            item.body = body.to_string();
            Ok(())
        })
        .await
    }

    pub async fn delete_news(&self, identity: &Identity, id: u64) -> Result<()> {
        identity.require_admin()?;
        self.mutate_forum(|forum| {
            let pos = forum
                .news
                .iter()
                .position(|n| n.id == id)
                .ok_or_else(|| AppError::NotFound("news post", id.to_string()))?;
            forum.news.remove(pos);
            Ok(())
        })
        .await
    }

    // ── Administration: badges ──────────────────────────────────────────

    pub async fn create_badge(
        &self,
        identity: &Identity,
        name: &str,
        image: &str,
        description: &str,
    ) -> Result<()> {
        identity.require_admin()?;
        if name.trim().is_empty() {
            return Err(AppError::Validation("A badge needs a name.".into()));
        }
        self.mutate_forum(|forum| {
            if forum.badges.iter().any(|b| b.name == name) {
                return Err(AppError::Validation(
                    "A badge with this name already exists.".into(),
                ));
            }
            forum.badges.push(Badge {
                name: name.to_string(),
                image: image.to_string(),
                description: description.to_string(),
            });
            Ok(())
        })
        .await
    }

    pub async fn edit_badge(
        &self,
        identity: &Identity,
        name: &str,
        new_name: &str,
        image: &str,
        description: &str,
    ) -> Result<()> {
        identity.require_admin()?;
        self.mutate_forum(|forum| {
            if forum
                .badges
                .iter()
                .any(|b| b.name == new_name && b.name != name)
            {
                return Err(AppError::Validation(
                    "Two badges cannot have the same name.".into(),
                ));
            }
            let badge = forum
                .badges
                .iter_mut()
                .find(|b| b.name == name)
                .ok_or_else(|| AppError::NotFound("badge", name.to_string()))?;
            badge.name = new_name.to_string();
            badge.image = image.to_string();
            badge.description = description.to_string();
            Ok(())
        })
        .await
    }

    pub async fn delete_badge(&self, identity: &Identity, name: &str) -> Result<()> {
        identity.require_admin()?;
        self.mutate_forum(|forum| {
            let pos = forum
                .badges
                .iter()
                .position(|b| b.name == name)
                .ok_or_else(|| AppError::NotFound("badge", name.to_string()))?;
            forum.badges.remove(pos);
            Ok(())
        })
        .await
    }
}
