//! flatboard/crates/fb-ui/src/lib.rs
//!
//! Askama template definitions. Handlers build these structs from service
//! views and render them to HTML strings; no template reaches into the
//! service layer itself. Body text arrives pre-rendered (`*_html` fields)
//! and is inserted with the `safe` filter.

use askama::Template;
use fb_core::models::Badge;

/// Navigation state shared by every page.
pub struct Nav {
    pub tab_title: String,
    pub site_title: String,
    pub user: Option<CurrentUser>,
    pub error: Option<String>,
}

pub struct CurrentUser {
    pub username: String,
    pub is_moderator: bool,
    pub is_admin: bool,
}

/// A news item ready for display.
pub struct NewsCard {
    pub id: u64,
    pub title: String,
    pub author: String,
    pub date: String,
    pub body_html: String,
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub nav: Nav,
    pub welcome_header: String,
    pub welcome_body_html: String,
    pub news: Vec<NewsCard>,
}

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub nav: Nav,
    pub captcha_sitekey: String,
}

#[derive(Template)]
#[template(path = "signup.html")]
pub struct SignupTemplate {
    pub nav: Nav,
    pub captcha_sitekey: String,
}

#[derive(Template)]
#[template(path = "post_signup.html")]
pub struct PostSignupTemplate {
    pub nav: Nav,
    pub support_email: String,
}

#[derive(Template)]
#[template(path = "news.html")]
pub struct NewsPageTemplate {
    pub nav: Nav,
    pub news: Vec<NewsCard>,
    pub page: usize,
    pub has_next: bool,
}

/// One topic row in the boards listing.
pub struct TopicRow {
    pub name: String,
    pub description: String,
    pub post_count: usize,
    pub locked: bool,
}

pub struct BoardCard {
    pub name: String,
    pub description: String,
    pub topics: Vec<TopicRow>,
}

#[derive(Template)]
#[template(path = "boards.html")]
pub struct BoardsTemplate {
    pub nav: Nav,
    pub boards: Vec<BoardCard>,
}

/// One post row inside a topic listing.
pub struct PostRow {
    pub id: u64,
    pub name: String,
    pub author: String,
    pub preview: String,
    pub reply_count: usize,
    pub locked: bool,
    pub date: String,
}

#[derive(Template)]
#[template(path = "topic.html")]
pub struct TopicTemplate {
    pub nav: Nav,
    pub board: String,
    pub topic: String,
    pub description: String,
    pub locked: bool,
    pub page: usize,
    pub has_next: bool,
    pub stickied: Vec<PostRow>,
    pub posts: Vec<PostRow>,
}

/// A fully resolved reply ready for display.
pub struct ReplyCard {
    pub id: u64,
    pub username: String,
    pub user_description: String,
    pub role_label: String,
    pub role_colour: String,
    pub profile_picture: String,
    pub body_html: String,
    pub date: String,
    /// The viewer may edit/delete this reply (author, or moderator+).
    pub can_edit: bool,
    pub can_delete: bool,
}

#[derive(Template)]
#[template(path = "view_post.html")]
pub struct ViewPostTemplate {
    pub nav: Nav,
    pub id: u64,
    pub name: String,
    pub locked: bool,
    pub page: usize,
    pub has_prev: bool,
    pub has_next: bool,
    pub replies: Vec<ReplyCard>,
}

#[derive(Template)]
#[template(path = "new_post.html")]
pub struct NewPostTemplate {
    pub nav: Nav,
    pub board: String,
    pub topic: String,
}

#[derive(Template)]
#[template(path = "post_reply.html")]
pub struct PostReplyTemplate {
    pub nav: Nav,
    pub post_id: u64,
    pub post_name: String,
}

#[derive(Template)]
#[template(path = "edit_reply.html")]
pub struct EditReplyTemplate {
    pub nav: Nav,
    pub post_id: u64,
    pub reply_id: u64,
    pub body: String,
}

pub struct ProfilePostRow {
    pub id: u64,
    pub title: String,
    pub preview: String,
}

pub struct ProfileReplyRow {
    pub id: u64,
    pub title: String,
    pub author: String,
}

#[derive(Template)]
#[template(path = "profile.html")]
pub struct ProfileTemplate {
    pub nav: Nav,
    pub username: String,
    pub description: String,
    pub about_html: String,
    pub role_label: String,
    pub role_colour: String,
    pub profile_picture: String,
    pub creation_date: String,
    pub post_count: usize,
    pub reply_count: usize,
    pub global_post_count: u64,
    pub badges: Vec<Badge>,
    pub posts: Vec<ProfilePostRow>,
    pub replies: Vec<ProfileReplyRow>,
    pub contact_discord: String,
    pub contact_email: String,
    pub contact_reddit: String,
    pub contact_twitter: String,
    pub contact_youtube: String,
}

#[derive(Template)]
#[template(path = "edit_profile.html")]
pub struct EditProfileTemplate {
    pub nav: Nav,
    pub description: String,
    pub about: String,
    pub profile_picture: String,
    pub contact_discord: String,
    pub contact_email: String,
    pub contact_reddit: String,
    pub contact_twitter: String,
    pub contact_youtube: String,
}

pub struct DirectoryRow {
    pub username: String,
    pub description: String,
    pub role_label: String,
    pub role_colour: String,
}

#[derive(Template)]
#[template(path = "directory.html")]
pub struct DirectoryTemplate {
    pub nav: Nav,
    pub users: Vec<DirectoryRow>,
}

#[derive(Template)]
#[template(path = "all_badges.html")]
pub struct AllBadgesTemplate {
    pub nav: Nav,
    pub badges: Vec<Badge>,
}

#[derive(Template)]
#[template(path = "badge.html")]
pub struct BadgeTemplate {
    pub nav: Nav,
    pub badge: Badge,
}

pub struct AdminUserRow {
    pub username: String,
    pub verified: bool,
    pub moderator: bool,
    pub admin: bool,
}

pub struct AdminTopicRow {
    pub board: String,
    pub topic: String,
}

pub struct AdminNewsRow {
    pub id: u64,
    pub title: String,
}

#[derive(Template)]
#[template(path = "admin.html")]
pub struct AdminTemplate {
    pub nav: Nav,
    pub users: Vec<AdminUserRow>,
    pub boards: Vec<BoardCard>,
    pub topics: Vec<AdminTopicRow>,
    pub news: Vec<AdminNewsRow>,
    pub badges: Vec<Badge>,
}

#[derive(Template)]
#[template(path = "edit_news.html")]
pub struct EditNewsTemplate {
    pub nav: Nav,
    pub post_id: u64,
    pub post_title: String,
    pub post_body: String,
}

#[derive(Template)]
#[template(path = "edit_badge.html")]
pub struct EditBadgeTemplate {
    pub nav: Nav,
    pub badge: Badge,
}

#[derive(Template)]
#[template(path = "manage_badges.html")]
pub struct ManageBadgesTemplate {
    pub nav: Nav,
    pub username: String,
    /// Comma-joined list of the badges currently held.
    pub badge_list: String,
}

#[derive(Template)]
#[template(path = "not_found.html")]
pub struct NotFoundTemplate {
    pub nav: Nav,
    pub message: String,
}
