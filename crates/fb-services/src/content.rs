//! # Content Service
//!
//! Read/query operations over boards, topics, posts, users, badges and news.
//! Reads run against the last-committed in-memory snapshot (shared read
//! locks only); post bodies are loaded from their files on demand.

use std::ops::Range;

use chrono::{DateTime, Utc};
use fb_core::error::{AppError, Result};
use fb_core::models::{Badge, Board, NewsItem, Role, User};

use crate::service::ForumService;

pub const NEWS_PER_PAGE: usize = 10;
pub const PREVIEW_CHARS: usize = 60;

pub const DELETED_USER_NAME: &str = "Deleted User";
pub const DELETED_USER_DESCRIPTION: &str = "This account was deleted.";

/// Page `page` (1-based) of a `len`-item list: `[(page-1)*per, page*per)`
/// clipped to `len`. A window with zero items is out of range, not an
/// empty-but-valid page.
pub fn paginate(len: usize, page: usize, per_page: usize) -> Result<Range<usize>> {
    if page == 0 {
        return Err(AppError::PageOutOfRange);
    }
    let start = (page - 1) * per_page;
    if start >= len {
        return Err(AppError::PageOutOfRange);
    }
    Ok(start..(start + per_page).min(len))
}

/// Author details attached to a rendered reply. Missing accounts resolve to
/// the deleted-user placeholder rather than an error.
#[derive(Debug, Clone)]
pub struct AuthorCard {
    pub username: String,
    pub description: String,
    pub role: Role,
    pub profile_picture: String,
}

impl AuthorCard {
    fn deleted() -> Self {
        Self {
            username: DELETED_USER_NAME.to_string(),
            description: DELETED_USER_DESCRIPTION.to_string(),
            role: Role::Member,
            profile_picture: String::new(),
        }
    }

    fn resolve(users: &[User], name: &str) -> Self {
        match users.iter().find(|u| u.username == name) {
            Some(user) => Self {
                username: user.username.clone(),
                description: user.description.clone(),
                role: user.role(),
                profile_picture: user.profile_picture.clone(),
            },
            None => Self::deleted(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ResolvedReply {
    pub id: u64,
    pub author: AuthorCard,
    pub body: String,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct PostView {
    pub id: u64,
    pub name: String,
    pub locked: bool,
    pub date: DateTime<Utc>,
    pub page: usize,
    pub has_prev: bool,
    pub has_next: bool,
    pub replies: Vec<ResolvedReply>,
}

/// One row in a topic's post listing.
#[derive(Debug, Clone)]
pub struct PostSummary {
    pub id: u64,
    pub name: String,
    pub author: String,
    pub preview: String,
    pub reply_count: usize,
    pub locked: bool,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct TopicView {
    pub board: String,
    pub topic: String,
    pub description: String,
    pub locked: bool,
    pub page: usize,
    pub has_next: bool,
    pub posts: Vec<PostSummary>,
    /// Populated on page one only.
    pub stickied: Vec<PostSummary>,
}

#[derive(Debug, Clone)]
pub struct NewsPage {
    pub items: Vec<NewsItem>,
    pub page: usize,
    pub has_next: bool,
}

#[derive(Debug, Clone)]
pub struct ProfilePost {
    pub id: u64,
    pub title: String,
    pub preview: String,
}

#[derive(Debug, Clone)]
pub struct ProfileReply {
    pub id: u64,
    pub title: String,
    pub author: String,
}

#[derive(Debug, Clone)]
pub struct ProfileView {
    pub user: User,
    pub posts: Vec<ProfilePost>,
    pub replies: Vec<ProfileReply>,
    pub badges: Vec<Badge>,
    pub global_post_count: u64,
}

#[derive(Debug, Clone)]
pub struct AdminView {
    pub users: Vec<User>,
    pub boards: Vec<Board>,
    pub news: Vec<NewsItem>,
    pub badges: Vec<Badge>,
}

fn preview_of(body: &str) -> String {
    let head: String = body.chars().take(PREVIEW_CHARS).collect();
    format!("{head}...")
}

impl ForumService {
    /// News items for the front page (newest three).
    pub async fn front_news(&self) -> Vec<NewsItem> {
        let forum = self.forum.read().await;
        forum.news.iter().take(3).cloned().collect()
    }

    /// A page of news, clipped to the collection; an empty archive renders
    /// empty rather than erroring.
    pub async fn news_page(&self, page: usize) -> NewsPage {
        let page = page.max(1);
        let forum = self.forum.read().await;
        let start = ((page - 1) * NEWS_PER_PAGE).min(forum.news.len());
        let end = (start + NEWS_PER_PAGE).min(forum.news.len());
        NewsPage {
            items: forum.news[start..end].to_vec(),
            page,
            has_next: end < forum.news.len(),
        }
    }

    pub async fn boards(&self) -> Vec<Board> {
        self.forum.read().await.boards.clone()
    }

    pub async fn topic_view(
        &self,
        board: &str,
        topic: &str,
        page: usize,
        per_page: usize,
    ) -> Result<TopicView> {
        let page = page.max(1);
        let (description, locked, post_ids, stickied_ids, total) = {
            let forum = self.forum.read().await;
            let board = forum
                .boards
                .iter()
                .find(|b| b.name == board)
                .ok_or_else(|| AppError::NotFound("board", board.to_string()))?;
            let topic = board
                .topics
                .iter()
                .find(|t| t.name == topic)
                .ok_or_else(|| AppError::NotFound("topic", topic.to_string()))?;

            let ids = if topic.posts.is_empty() && page == 1 {
                Vec::new()
            } else {
                let range = paginate(topic.posts.len(), page, per_page)?;
                topic.posts[range].to_vec()
            };
            let stickied = if page == 1 {
                topic.stickied_posts.clone()
            } else {
                Vec::new()
            };
            (
                topic.description.clone(),
                topic.locked,
                ids,
                stickied,
                topic.posts.len(),
            )
        };

        Ok(TopicView {
            board: board.to_string(),
            topic: topic.to_string(),
            description,
            locked,
            page,
            has_next: page * per_page < total,
            posts: self.load_summaries(&post_ids).await,
            stickied: self.load_summaries(&stickied_ids).await,
        })
    }

    /// Loads listing rows for a set of post ids, skipping ids whose file has
    /// gone missing from the active area.
    async fn load_summaries(&self, ids: &[u64]) -> Vec<PostSummary> {
        let mut out = Vec::with_capacity(ids.len());
        for &id in ids {
            match self.store.load_post(id).await {
                Ok(Some(post)) => {
                    let origin = post.origin();
                    out.push(PostSummary {
                        id: post.id,
                        name: post.name.clone(),
                        author: origin.map(|r| r.author.clone()).unwrap_or_default(),
                        preview: origin.map(|r| preview_of(&r.body)).unwrap_or_default(),
                        reply_count: post.replies.len(),
                        locked: post.locked,
                        date: post.date,
                    });
                }
                Ok(None) => log::warn!("post {id} is listed but has no file; skipping"),
                Err(e) => log::warn!("failed to load post {id}: {e}"),
            }
        }
        out
    }

    pub async fn post_view(&self, id: u64, page: usize, per_page: usize) -> Result<PostView> {
        let page = page.max(1);
        let post = self
            .store
            .load_post(id)
            .await?
            .ok_or_else(|| AppError::NotFound("post", id.to_string()))?;

        let range = paginate(post.replies.len(), page, per_page)?;
        let has_next = range.end < post.replies.len();
        let users = self.users.read().await;
        let replies = post.replies[range]
            .iter()
            .map(|reply| ResolvedReply {
                id: reply.id,
                author: AuthorCard::resolve(users.as_slice(), &reply.author),
                body: reply.body.clone(),
                date: reply.date,
            })
            .collect();

        Ok(PostView {
            id: post.id,
            name: post.name,
            locked: post.locked,
            date: post.date,
            page,
            has_prev: page > 1,
            has_next,
            replies,
        })
    }

    /// Title and id for the reply screen.
    pub async fn post_meta(&self, id: u64) -> Result<(u64, String)> {
        let post = self
            .store
            .load_post(id)
            .await?
            .ok_or_else(|| AppError::NotFound("post", id.to_string()))?;
        Ok((post.id, post.name))
    }

    /// Raw body of one reply, for the edit screen.
    pub async fn reply_body(&self, post_id: u64, reply_id: u64) -> Result<String> {
        let post = self
            .store
            .load_post(post_id)
            .await?
            .ok_or_else(|| AppError::NotFound("post", post_id.to_string()))?;
        post.reply(reply_id)
            .map(|r| r.body.clone())
            .ok_or_else(|| AppError::NotFound("reply", reply_id.to_string()))
    }

    pub async fn profile(&self, username: &str) -> Result<ProfileView> {
        let user = {
            let users = self.users.read().await;
            users
                .iter()
                .find(|u| u.username == username)
                .cloned()
                .ok_or_else(|| AppError::NotFound("user", username.to_string()))?
        };
        let global_post_count = {
            let forum = self.forum.read().await;
            forum.post_index - fb_core::models::ForumTree::FIRST_POST_ID
        };

        let mut posts = Vec::new();
        for &id in user.posts.iter().take(20) {
            match self.store.load_post(id).await {
                Ok(Some(post)) => posts.push(ProfilePost {
                    id: post.id,
                    title: post.name.clone(),
                    preview: post.origin().map(|r| preview_of(&r.body)).unwrap_or_default(),
                }),
                Ok(None) => log::warn!("authored post {id} has no file; skipping"),
                Err(e) => log::warn!("failed to load authored post {id}: {e}"),
            }
        }

        // Replied posts, deduplicated by post id, most recent first.
        let mut replies: Vec<ProfileReply> = Vec::new();
        for &(post_id, _reply_id) in user.replies.iter().take(20) {
            if replies.iter().any(|r| r.id == post_id) {
                continue;
            }
            match self.store.load_post(post_id).await {
                Ok(Some(post)) => replies.push(ProfileReply {
                    id: post.id,
                    title: post.name.clone(),
                    author: post.origin().map(|r| r.author.clone()).unwrap_or_default(),
                }),
                // A reply to a since-deleted post is simply not shown.
                Ok(None) => {}
                Err(e) => log::warn!("failed to load replied post {post_id}: {e}"),
            }
        }

        let badges = {
            let forum = self.forum.read().await;
            user.badges
                .iter()
                .filter_map(|name| forum.badges.iter().find(|b| &b.name == name).cloned())
                .collect()
        };

        Ok(ProfileView {
            user,
            posts,
            replies,
            badges,
            global_post_count,
        })
    }

    pub async fn directory(&self) -> Vec<User> {
        self.users.read().await.clone()
    }

    pub async fn all_badges(&self) -> Vec<Badge> {
        self.forum.read().await.badges.clone()
    }

    pub async fn badge(&self, name: &str) -> Result<Badge> {
        self.forum
            .read()
            .await
            .badges
            .iter()
            .find(|b| b.name == name)
            .cloned()
            .ok_or_else(|| AppError::NotFound("badge", name.to_string()))
    }

    pub async fn news_item(&self, id: u64) -> Result<NewsItem> {
        self.forum
            .read()
            .await
            .news
            .iter()
            .find(|n| n.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound("news post", id.to_string()))
    }

    pub async fn user(&self, username: &str) -> Result<User> {
        self.users
            .read()
            .await
            .iter()
            .find(|u| u.username == username)
            .cloned()
            .ok_or_else(|| AppError::NotFound("user", username.to_string()))
    }

    pub async fn admin_view(&self) -> AdminView {
        let (boards, news, badges) = {
            let forum = self.forum.read().await;
            (forum.boards.clone(), forum.news.clone(), forum.badges.clone())
        };
        AdminView {
            users: self.users.read().await.clone(),
            boards,
            news,
            badges,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_window_is_clipped() {
        assert_eq!(paginate(25, 1, 10).unwrap(), 0..10);
        assert_eq!(paginate(25, 2, 10).unwrap(), 10..20);
        assert_eq!(paginate(25, 3, 10).unwrap(), 20..25);
    }

    #[test]
    fn page_past_the_end_is_rejected() {
        assert!(matches!(
            paginate(25, 4, 10),
            Err(AppError::PageOutOfRange)
        ));
        assert!(matches!(paginate(0, 1, 10), Err(AppError::PageOutOfRange)));
        assert!(matches!(paginate(10, 0, 10), Err(AppError::PageOutOfRange)));
    }

    #[test]
    fn exact_multiple_has_no_phantom_page() {
        assert_eq!(paginate(20, 2, 10).unwrap(), 10..20);
        assert!(paginate(20, 3, 10).is_err());
    }

    #[test]
    fn preview_is_char_safe() {
        let body = "é".repeat(100);
        let p = preview_of(&body);
        assert!(p.ends_with("..."));
        assert_eq!(p.chars().count(), PREVIEW_CHARS + 3);
    }
}
