//! Page handlers: every GET screen the forum renders.

use actix_web::{web, HttpRequest, HttpResponse};
use askama::Template;
use fb_core::error::AppError;
use fb_ui::{
    AdminNewsRow, AdminTemplate, AdminTopicRow, AdminUserRow, AllBadgesTemplate, BadgeTemplate,
    BoardCard, BoardsTemplate, DirectoryRow, DirectoryTemplate, EditBadgeTemplate,
    EditNewsTemplate, EditProfileTemplate, EditReplyTemplate, IndexTemplate, LoginTemplate,
    ManageBadgesTemplate, NewPostTemplate, NewsCard, NewsPageTemplate, NotFoundTemplate,
    PostReplyTemplate, PostRow, ProfilePostRow, ProfileReplyRow, ProfileTemplate, ReplyCard,
    SignupTemplate, TopicRow, TopicTemplate, ViewPostTemplate,
};
use rand::seq::SliceRandom;
use serde::Deserialize;

use crate::context::{self, fail, html, redirect, redirect_err, parse_page};
use crate::render::{format_date, role_colour};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
    pub err: Option<String>,
}

pub async fn index(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<PageQuery>,
) -> HttpResponse {
    let identity = context::identify(&state, &req).await;
    let nav = context::nav_for(&state, &identity, "", query.err.clone());
    let news = state
        .service
        .front_news()
        .await
        .into_iter()
        .map(|n| NewsCard {
            id: n.id,
            title: n.title,
            author: n.author,
            date: format_date(&n.date),
            body_html: state.renderer.render(&n.body),
        })
        .collect();
    html(
        IndexTemplate {
            nav,
            welcome_header: state.settings.welcome_header.clone(),
            welcome_body_html: state.renderer.render(&state.settings.welcome_body),
            news,
        }
        .render(),
    )
}

pub async fn login(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<PageQuery>,
) -> HttpResponse {
    let identity = context::identify(&state, &req).await;
    let nav = context::nav_for(&state, &identity, "Login", query.err.clone());
    html(
        LoginTemplate {
            nav,
            captcha_sitekey: state.settings.recaptcha_site_key.clone(),
        }
        .render(),
    )
}

pub async fn register(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<PageQuery>,
) -> HttpResponse {
    let identity = context::identify(&state, &req).await;
    let nav = context::nav_for(&state, &identity, "Sign Up", query.err.clone());
    html(
        SignupTemplate {
            nav,
            captcha_sitekey: state.settings.recaptcha_site_key.clone(),
        }
        .render(),
    )
}

pub async fn register_done(state: web::Data<AppState>, req: HttpRequest) -> HttpResponse {
    let identity = context::identify(&state, &req).await;
    let nav = context::nav_for(&state, &identity, "Done!", None);
    html(
        fb_ui::PostSignupTemplate {
            nav,
            support_email: state.settings.support_email.clone(),
        }
        .render(),
    )
}

pub async fn news(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<PageQuery>,
) -> HttpResponse {
    let identity = context::identify(&state, &req).await;
    let page = parse_page(query.page.as_deref());
    let news = state.service.news_page(page).await;
    let nav = context::nav_for(
        &state,
        &identity,
        &format!("News [{}]", news.page),
        query.err.clone(),
    );
    html(
        NewsPageTemplate {
            nav,
            news: news
                .items
                .into_iter()
                .map(|n| NewsCard {
                    id: n.id,
                    title: n.title,
                    author: n.author,
                    date: format_date(&n.date),
                    body_html: state.renderer.render(&n.body),
                })
                .collect(),
            page: news.page,
            has_next: news.has_next,
        }
        .render(),
    )
}

pub async fn boards(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<PageQuery>,
) -> HttpResponse {
    let identity = context::identify(&state, &req).await;
    let nav = context::nav_for(&state, &identity, "Boards", query.err.clone());
    let boards = state
        .service
        .boards()
        .await
        .into_iter()
        .map(board_card)
        .collect();
    html(BoardsTemplate { nav, boards }.render())
}

fn board_card(board: fb_core::models::Board) -> BoardCard {
    BoardCard {
        name: board.name,
        description: board.description,
        topics: board
            .topics
            .into_iter()
            .map(|t| TopicRow {
                name: t.name,
                description: t.description,
                post_count: t.posts.len() + t.stickied_posts.len(),
                locked: t.locked,
            })
            .collect(),
    }
}

#[derive(Deserialize)]
pub struct TopicQuery {
    pub board: Option<String>,
    pub topic: Option<String>,
    pub page: Option<String>,
    pub err: Option<String>,
}

pub async fn topic(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<TopicQuery>,
) -> HttpResponse {
    let identity = context::identify(&state, &req).await;
    let (Some(board), Some(topic)) = (query.board.as_deref(), query.topic.as_deref()) else {
        return redirect_err("/boards", "Invalid board or topic name.");
    };
    let page = parse_page(query.page.as_deref());

    let view = match state
        .service
        .topic_view(board, topic, page, state.settings.board_posts_per_page)
        .await
    {
        Ok(view) => view,
        Err(e) => return fail("/boards", &e),
    };

    let nav = context::nav_for(
        &state,
        &identity,
        &format!("{} [{}]", view.topic, view.page),
        query.err.clone(),
    );
    html(
        TopicTemplate {
            nav,
            board: view.board,
            topic: view.topic,
            description: view.description,
            locked: view.locked,
            page: view.page,
            has_next: view.has_next,
            stickied: view.stickied.into_iter().map(post_row).collect(),
            posts: view.posts.into_iter().map(post_row).collect(),
        }
        .render(),
    )
}

fn post_row(summary: fb_services::content::PostSummary) -> PostRow {
    PostRow {
        id: summary.id,
        name: summary.name,
        author: summary.author,
        preview: summary.preview,
        reply_count: summary.reply_count,
        locked: summary.locked,
        date: format_date(&summary.date),
    }
}

#[derive(Deserialize)]
pub struct ViewPostQuery {
    pub id: Option<String>,
    pub page: Option<String>,
    pub err: Option<String>,
}

pub async fn view_post(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<ViewPostQuery>,
) -> HttpResponse {
    let identity = context::identify(&state, &req).await;
    let Some(id) = query.id.as_deref().and_then(|s| s.parse::<u64>().ok()) else {
        return redirect_err("/", "No post ID provided.");
    };
    let page = parse_page(query.page.as_deref());

    let view = match state
        .service
        .post_view(id, page, state.settings.board_posts_per_page)
        .await
    {
        Ok(view) => view,
        Err(AppError::PageOutOfRange) if page > 1 => {
            // Bounce back to the previous page rather than the front page.
            return redirect_err(
                &format!("/post/view?id={id}&page={}", page - 1),
                "That page does not exist.",
            );
        }
        Err(e) => return fail("/", &e),
    };

    let viewer = identity.username().map(str::to_string);
    let nav = context::nav_for(&state, &identity, &view.name, query.err.clone());
    let replies = view
        .replies
        .into_iter()
        .map(|r| {
            let is_author = viewer.as_deref() == Some(r.author.username.as_str());
            ReplyCard {
                id: r.id,
                username: r.author.username,
                user_description: r.author.description,
                role_label: r.author.role.label().to_string(),
                role_colour: role_colour(r.author.role, &state.settings),
                profile_picture: r.author.profile_picture,
                body_html: state.renderer.render(&r.body),
                date: format_date(&r.date),
                can_edit: is_author,
                can_delete: is_author || identity.is_moderator(),
            }
        })
        .collect();

    html(
        ViewPostTemplate {
            nav,
            id: view.id,
            name: view.name,
            locked: view.locked,
            page: view.page,
            has_prev: view.has_prev,
            has_next: view.has_next,
            replies,
        }
        .render(),
    )
}

#[derive(Deserialize)]
pub struct NewPostQuery {
    pub board: Option<String>,
    pub topic: Option<String>,
    pub err: Option<String>,
}

pub async fn new_post(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<NewPostQuery>,
) -> HttpResponse {
    let identity = context::identify(&state, &req).await;
    if !identity.is_logged_in() {
        return redirect("/");
    }
    let (Some(board), Some(topic)) = (query.board.clone(), query.topic.clone()) else {
        return redirect("/");
    };
    let nav = context::nav_for(&state, &identity, "Post", query.err.clone());
    html(NewPostTemplate { nav, board, topic }.render())
}

#[derive(Deserialize)]
pub struct EditReplyQuery {
    pub post: Option<String>,
    pub id: Option<String>,
}

pub async fn edit_reply(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<EditReplyQuery>,
) -> HttpResponse {
    let identity = context::identify(&state, &req).await;
    if !identity.is_logged_in() {
        return redirect("/");
    }
    let (Some(post_id), Some(reply_id)) = (
        query.post.as_deref().and_then(|s| s.parse::<u64>().ok()),
        query.id.as_deref().and_then(|s| s.parse::<u64>().ok()),
    ) else {
        return redirect_err("/", "Invalid post or reply ID given.");
    };

    let body = match state.service.reply_body(post_id, reply_id).await {
        Ok(body) => body,
        Err(e) => return fail("/", &e),
    };
    let nav = context::nav_for(&state, &identity, "Edit", None);
    html(
        EditReplyTemplate {
            nav,
            post_id,
            reply_id,
            body,
        }
        .render(),
    )
}

#[derive(Deserialize)]
pub struct PostIdQuery {
    pub id: Option<String>,
}

pub async fn post_reply(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<PostIdQuery>,
) -> HttpResponse {
    let identity = context::identify(&state, &req).await;
    if !identity.is_logged_in() {
        return redirect("/");
    }
    let Some(id) = query.id.as_deref().and_then(|s| s.parse::<u64>().ok()) else {
        return redirect_err("/", "Invalid post ID given.");
    };
    let (post_id, post_name) = match state.service.post_meta(id).await {
        Ok(meta) => meta,
        Err(e) => return fail("/", &e),
    };
    let nav = context::nav_for(&state, &identity, "Reply", None);
    html(
        PostReplyTemplate {
            nav,
            post_id,
            post_name,
        }
        .render(),
    )
}

#[derive(Deserialize)]
pub struct ProfileQuery {
    pub id: Option<String>,
    pub err: Option<String>,
}

pub async fn profile(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<ProfileQuery>,
) -> HttpResponse {
    let identity = context::identify(&state, &req).await;
    let Some(username) = query.id.as_deref() else {
        return redirect_err("/", "No user ID provided.");
    };
    let view = match state.service.profile(username).await {
        Ok(view) => view,
        Err(e) => return fail("/", &e),
    };

    let nav = context::nav_for(&state, &identity, &view.user.username, query.err.clone());
    let about = if view.user.about.is_empty() {
        state.settings.user_about_default.clone()
    } else {
        view.user.about.clone()
    };
    let role = view.user.role();
    html(
        ProfileTemplate {
            nav,
            username: view.user.username.clone(),
            description: view.user.description.clone(),
            about_html: state.renderer.render(&about),
            role_label: role.label().to_string(),
            role_colour: role_colour(role, &state.settings),
            profile_picture: view.user.profile_picture.clone(),
            creation_date: format_date(&view.user.creation_date),
            post_count: view.user.posts.len(),
            reply_count: view.user.replies.len(),
            global_post_count: view.global_post_count,
            badges: view.badges,
            posts: view
                .posts
                .into_iter()
                .map(|p| ProfilePostRow {
                    id: p.id,
                    title: p.title,
                    preview: p.preview,
                })
                .collect(),
            replies: view
                .replies
                .into_iter()
                .map(|r| ProfileReplyRow {
                    id: r.id,
                    title: r.title,
                    author: r.author,
                })
                .collect(),
            contact_discord: view.user.contacts.discord.clone(),
            contact_email: view.user.contacts.email.clone(),
            contact_reddit: view.user.contacts.reddit.clone(),
            contact_twitter: view.user.contacts.twitter.clone(),
            contact_youtube: view.user.contacts.youtube.clone(),
        }
        .render(),
    )
}

pub async fn edit_profile(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<PageQuery>,
) -> HttpResponse {
    let identity = context::identify(&state, &req).await;
    let Some(username) = identity.username().map(str::to_string) else {
        return redirect("/");
    };
    let user = match state.service.user(&username).await {
        Ok(user) => user,
        Err(e) => return fail("/", &e),
    };
    let nav = context::nav_for(&state, &identity, "Edit Profile", query.err.clone());
    html(
        EditProfileTemplate {
            nav,
            description: user.description,
            about: user.about,
            profile_picture: user.profile_picture,
            contact_discord: user.contacts.discord,
            contact_email: user.contacts.email,
            contact_reddit: user.contacts.reddit,
            contact_twitter: user.contacts.twitter,
            contact_youtube: user.contacts.youtube,
        }
        .render(),
    )
}

pub async fn directory(state: web::Data<AppState>, req: HttpRequest) -> HttpResponse {
    let identity = context::identify(&state, &req).await;
    let nav = context::nav_for(&state, &identity, "Users", None);
    let users = state
        .service
        .directory()
        .await
        .into_iter()
        .map(|u| {
            let role = u.role();
            DirectoryRow {
                username: u.username,
                description: u.description,
                role_label: role.label().to_string(),
                role_colour: role_colour(role, &state.settings),
            }
        })
        .collect();
    html(DirectoryTemplate { nav, users }.render())
}

#[derive(Deserialize)]
pub struct BadgeQuery {
    pub name: Option<String>,
}

pub async fn badges(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<BadgeQuery>,
) -> HttpResponse {
    let identity = context::identify(&state, &req).await;
    match query.name.as_deref() {
        None => {
            let nav = context::nav_for(&state, &identity, "Badges", None);
            let badges = state.service.all_badges().await;
            html(AllBadgesTemplate { nav, badges }.render())
        }
        Some(name) => match state.service.badge(name).await {
            Ok(badge) => {
                let nav = context::nav_for(&state, &identity, &badge.name, None);
                html(BadgeTemplate { nav, badge }.render())
            }
            Err(e) => fail("/", &e),
        },
    }
}

pub async fn admin(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<PageQuery>,
) -> HttpResponse {
    let identity = context::identify(&state, &req).await;
    if !identity.is_admin() {
        return redirect("/");
    }
    let view = state.service.admin_view().await;
    let nav = context::nav_for(&state, &identity, "Admin", query.err.clone());

    let topics = view
        .boards
        .iter()
        .flat_map(|b| {
            b.topics.iter().map(|t| AdminTopicRow {
                board: b.name.clone(),
                topic: t.name.clone(),
            })
        })
        .collect();

    html(
        AdminTemplate {
            nav,
            users: view
                .users
                .into_iter()
                .map(|u| AdminUserRow {
                    username: u.username,
                    verified: u.verified,
                    moderator: u.moderator,
                    admin: u.admin,
                })
                .collect(),
            boards: view.boards.into_iter().map(board_card).collect(),
            topics,
            news: view
                .news
                .into_iter()
                .map(|n| AdminNewsRow {
                    id: n.id,
                    title: n.title,
                })
                .collect(),
            badges: view.badges,
        }
        .render(),
    )
}

#[derive(Deserialize)]
pub struct NewsIdQuery {
    pub post: Option<String>,
}

pub async fn admin_edit_news(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<NewsIdQuery>,
) -> HttpResponse {
    let identity = context::identify(&state, &req).await;
    if !identity.is_admin() {
        return redirect("/");
    }
    let Some(id) = query.post.as_deref().and_then(|s| s.parse::<u64>().ok()) else {
        return redirect_err("/admin", "Invalid edit query parameters.");
    };
    let item = match state.service.news_item(id).await {
        Ok(item) => item,
        Err(e) => return fail("/admin", &e),
    };
    let nav = context::nav_for(&state, &identity, "Edit Post", None);
    html(
        EditNewsTemplate {
            nav,
            post_id: item.id,
            post_title: item.title,
            post_body: item.body,
        }
        .render(),
    )
}

#[derive(Deserialize)]
pub struct BadgeNameQuery {
    pub name: Option<String>,
    pub err: Option<String>,
}

pub async fn admin_edit_badge(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<BadgeNameQuery>,
) -> HttpResponse {
    let identity = context::identify(&state, &req).await;
    if !identity.is_admin() {
        return redirect("/");
    }
    let Some(name) = query.name.as_deref() else {
        return redirect_err("/admin", "Invalid edit query parameters.");
    };
    let badge = match state.service.badge(name).await {
        Ok(badge) => badge,
        Err(e) => return fail("/admin", &e),
    };
    let nav = context::nav_for(&state, &identity, "Edit Badge", query.err.clone());
    html(EditBadgeTemplate { nav, badge }.render())
}

#[derive(Deserialize)]
pub struct ManageBadgesQuery {
    pub user: Option<String>,
    pub err: Option<String>,
}

pub async fn admin_manage_badges(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<ManageBadgesQuery>,
) -> HttpResponse {
    let identity = context::identify(&state, &req).await;
    if !identity.is_admin() {
        return redirect("/");
    }
    let Some(username) = query.user.as_deref() else {
        return redirect_err("/admin", "Invalid edit query parameters.");
    };
    let user = match state.service.user(username).await {
        Ok(user) => user,
        Err(e) => return fail("/admin", &e),
    };
    let nav = context::nav_for(&state, &identity, "Manage Badges", query.err.clone());
    html(
        ManageBadgesTemplate {
            nav,
            username: user.username.clone(),
            badge_list: user.badges.join(","),
        }
        .render(),
    )
}

pub async fn not_found(state: web::Data<AppState>, req: HttpRequest) -> HttpResponse {
    let identity = context::identify(&state, &req).await;
    let nav = context::nav_for(&state, &identity, "404", None);
    let message = state
        .settings
        .error_messages
        .choose(&mut rand::thread_rng())
        .cloned()
        .unwrap_or_else(|| "There's nothing here.".to_string());
    html(NotFoundTemplate { nav, message }.render())
}
