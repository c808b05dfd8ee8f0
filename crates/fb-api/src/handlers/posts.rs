//! Posting and moderation handlers.

use actix_web::{web, HttpRequest, HttpResponse};
use fb_core::error::AppError;
use fb_services::ReplyDeletion;
use serde::Deserialize;

use crate::context::{self, fail, percent_encode, redirect, redirect_err};
use crate::state::AppState;

fn topic_url(board: &str, topic: &str) -> String {
    format!(
        "/boards/view?board={}&topic={}",
        percent_encode(board),
        percent_encode(topic)
    )
}

#[derive(Deserialize)]
pub struct BoardTopicQuery {
    pub board: Option<String>,
    pub topic: Option<String>,
}

#[derive(Deserialize)]
pub struct CreatePostForm {
    #[serde(default)]
    pub posttitle: String,
    #[serde(default)]
    pub postbody: String,
}

pub async fn create_post(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<BoardTopicQuery>,
    form: web::Form<CreatePostForm>,
) -> HttpResponse {
    let identity = context::identify(&state, &req).await;
    let (Some(board), Some(topic)) = (query.board.as_deref(), query.topic.as_deref()) else {
        return redirect("/");
    };

    match state
        .service
        .create_post(&identity, board, topic, &form.posttitle, &form.postbody)
        .await
    {
        Ok(_id) => redirect(&topic_url(board, topic)),
        Err(AppError::Validation(msg)) if msg == "This topic is locked." => {
            redirect_err("/boards", &msg)
        }
        Err(e) => fail(
            &format!(
                "/post?board={}&topic={}",
                percent_encode(board),
                percent_encode(topic)
            ),
            &e,
        ),
    }
}

#[derive(Deserialize)]
pub struct PostIdQuery {
    pub id: Option<String>,
}

#[derive(Deserialize)]
pub struct ReplyForm {
    #[serde(default)]
    pub replybody: String,
}

pub async fn reply(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<PostIdQuery>,
    form: web::Form<ReplyForm>,
) -> HttpResponse {
    let identity = context::identify(&state, &req).await;
    let Some(id) = query.id.as_deref().and_then(|s| s.parse::<u64>().ok()) else {
        return redirect("/");
    };

    match state.service.add_reply(&identity, id, &form.replybody).await {
        Ok(_reply_id) => redirect(&format!("/post/view?id={id}")),
        Err(e) => fail(&format!("/post/view?id={id}"), &e),
    }
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
    form: web::Form<ReplyForm>,
) -> HttpResponse {
    let identity = context::identify(&state, &req).await;
    let (Some(post_id), Some(reply_id)) = (
        query.post.as_deref().and_then(|s| s.parse::<u64>().ok()),
        query.id.as_deref().and_then(|s| s.parse::<u64>().ok()),
    ) else {
        return redirect_err("/", "Invalid post or reply ID.");
    };

    match state
        .service
        .edit_reply(&identity, post_id, reply_id, &form.replybody)
        .await
    {
        Ok(()) => redirect(&format!("/post/view?id={post_id}")),
        Err(e) => fail(&format!("/post/view?id={post_id}"), &e),
    }
}

#[derive(Deserialize)]
pub struct DeleteReplyQuery {
    pub id: Option<String>,
    pub reply: Option<String>,
}

pub async fn delete_reply(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<DeleteReplyQuery>,
) -> HttpResponse {
    let identity = context::identify(&state, &req).await;
    let (Some(post_id), Some(reply_id)) = (
        query.id.as_deref().and_then(|s| s.parse::<u64>().ok()),
        query.reply.as_deref().and_then(|s| s.parse::<u64>().ok()),
    ) else {
        return redirect("/");
    };

    match state.service.delete_reply(&identity, post_id, reply_id).await {
        Ok(ReplyDeletion::PostDeleted) => redirect("/boards"),
        Ok(ReplyDeletion::ReplyRemoved) => redirect(&format!("/post/view?id={post_id}")),
        Err(e) => fail("/boards", &e),
    }
}

#[derive(Deserialize)]
pub struct StickyQuery {
    pub board: Option<String>,
    pub topic: Option<String>,
    pub id: Option<String>,
}

async fn sticky_swap(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<StickyQuery>,
    stickied: bool,
) -> HttpResponse {
    let identity = context::identify(&state, &req).await;
    let (Some(board), Some(topic), Some(id)) = (
        query.board.as_deref(),
        query.topic.as_deref(),
        query.id.as_deref().and_then(|s| s.parse::<u64>().ok()),
    ) else {
        return redirect_err("/boards", "Missing sticky parameters.");
    };

    match state
        .service
        .set_sticky(&identity, board, topic, id, stickied)
        .await
    {
        Ok(()) => redirect(&topic_url(board, topic)),
        Err(e) => fail("/boards", &e),
    }
}

pub async fn sticky(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<StickyQuery>,
) -> HttpResponse {
    sticky_swap(state, req, query, true).await
}

pub async fn unsticky(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<StickyQuery>,
) -> HttpResponse {
    sticky_swap(state, req, query, false).await
}

#[derive(Deserialize)]
pub struct TopicLockQuery {
    pub board: Option<String>,
    pub topic: Option<String>,
}

async fn topic_lock_manage(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<TopicLockQuery>,
    locked: bool,
) -> HttpResponse {
    let identity = context::identify(&state, &req).await;
    let (Some(board), Some(topic)) = (query.board.as_deref(), query.topic.as_deref()) else {
        return redirect_err("/", "A board or topic was not provided.");
    };

    match state
        .service
        .set_topic_locked(&identity, board, topic, locked)
        .await
    {
        Ok(()) => redirect("/boards"),
        Err(e) => fail("/", &e),
    }
}

pub async fn lock_topic(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<TopicLockQuery>,
) -> HttpResponse {
    topic_lock_manage(state, req, query, true).await
}

pub async fn unlock_topic(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<TopicLockQuery>,
) -> HttpResponse {
    topic_lock_manage(state, req, query, false).await
}

async fn post_lock_manage(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<PostIdQuery>,
    locked: bool,
) -> HttpResponse {
    let identity = context::identify(&state, &req).await;
    let Some(id) = query.id.as_deref().and_then(|s| s.parse::<u64>().ok()) else {
        return redirect_err("/boards", "No ID provided.");
    };

    match state.service.set_post_locked(&identity, id, locked).await {
        Ok(()) => redirect("/boards"),
        Err(e) => fail("/boards", &e),
    }
}

pub async fn lock_post(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<PostIdQuery>,
) -> HttpResponse {
    post_lock_manage(state, req, query, true).await
}

pub async fn unlock_post(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<PostIdQuery>,
) -> HttpResponse {
    post_lock_manage(state, req, query, false).await
}
