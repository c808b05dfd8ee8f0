//! Administration handlers: user management, boards, topics, news, badges.

use actix_web::{web, HttpRequest, HttpResponse};
use fb_core::error::AppError;
use fb_services::RoleFlags;
use serde::Deserialize;

use crate::context::{self, fail, percent_encode, redirect, redirect_err};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct UserQuery {
    pub user: Option<String>,
}

/// Checkbox fields arrive as "on" when ticked and are absent otherwise.
#[derive(Deserialize)]
pub struct ManageUserForm {
    pub verified: Option<String>,
    pub moderator: Option<String>,
    pub admin: Option<String>,
}

pub async fn manage_user(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<UserQuery>,
    form: web::Form<ManageUserForm>,
) -> HttpResponse {
    let identity = context::identify(&state, &req).await;
    let Some(username) = query.user.as_deref() else {
        return redirect_err("/admin", "Invalid user detected.");
    };
    let flags = RoleFlags {
        verified: form.verified.as_deref() == Some("on"),
        moderator: form.moderator.as_deref() == Some("on"),
        admin: form.admin.as_deref() == Some("on"),
    };

    match state.service.manage_user(&identity, username, flags).await {
        Ok(()) => redirect("/admin"),
        Err(e) => fail("/admin", &e),
    }
}

#[derive(Deserialize)]
pub struct DeleteUserQuery {
    pub id: Option<String>,
}

pub async fn delete_user(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<DeleteUserQuery>,
) -> HttpResponse {
    let identity = context::identify(&state, &req).await;
    let Some(username) = query.id.as_deref() else {
        return redirect_err("/admin", "Invalid user detected.");
    };

    match state.service.delete_user(&identity, username).await {
        Ok(()) => redirect("/admin"),
        Err(e) => fail("/admin", &e),
    }
}

#[derive(Deserialize)]
pub struct CreateBoardForm {
    #[serde(default)]
    pub board_name: String,
    #[serde(default)]
    pub board_desc: String,
}

pub async fn create_board(
    state: web::Data<AppState>,
    req: HttpRequest,
    form: web::Form<CreateBoardForm>,
) -> HttpResponse {
    let identity = context::identify(&state, &req).await;
    match state
        .service
        .create_board(&identity, &form.board_name, &form.board_desc)
        .await
    {
        Ok(()) => redirect("/admin"),
        Err(e) => fail("/admin", &e),
    }
}

#[derive(Deserialize)]
pub struct BoardQuery {
    pub board: Option<String>,
}

pub async fn delete_board(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<BoardQuery>,
) -> HttpResponse {
    let identity = context::identify(&state, &req).await;
    let Some(board) = query.board.as_deref() else {
        return redirect_err("/admin", "Could not delete board, invalid board name.");
    };

    match state.service.delete_board(&identity, board).await {
        Ok(()) => redirect("/admin"),
        Err(e) => fail("/admin", &e),
    }
}

#[derive(Deserialize)]
pub struct CreateTopicForm {
    #[serde(default)]
    pub topicname: String,
    #[serde(default)]
    pub topicdesc: String,
}

pub async fn create_topic(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<BoardQuery>,
    form: web::Form<CreateTopicForm>,
) -> HttpResponse {
    let identity = context::identify(&state, &req).await;
    let Some(board) = query.board.as_deref() else {
        return redirect_err("/admin", "Invalid board name when trying to add topic.");
    };

    match state
        .service
        .create_topic(&identity, board, &form.topicname, &form.topicdesc)
        .await
    {
        Ok(()) => redirect("/admin"),
        Err(e) => fail("/admin", &e),
    }
}

#[derive(Deserialize)]
pub struct DeleteTopicQuery {
    pub board: Option<String>,
    pub topic: Option<String>,
}

pub async fn delete_topic(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<DeleteTopicQuery>,
) -> HttpResponse {
    let identity = context::identify(&state, &req).await;
    let (Some(board), Some(topic)) = (query.board.as_deref(), query.topic.as_deref()) else {
        return redirect_err("/admin", "Could not find the selected topic to delete it.");
    };

    match state.service.delete_topic(&identity, board, topic).await {
        Ok(()) => redirect("/admin"),
        Err(e) => fail("/admin", &e),
    }
}

#[derive(Deserialize)]
pub struct NewsForm {
    #[serde(default)]
    pub newstitle: String,
    #[serde(default)]
    pub newsbody: String,
}

pub async fn create_news(
    state: web::Data<AppState>,
    req: HttpRequest,
    form: web::Form<NewsForm>,
) -> HttpResponse {
    let identity = context::identify(&state, &req).await;
    match state
        .service
        .create_news(&identity, &form.newstitle, &form.newsbody)
        .await
    {
        Ok(_id) => redirect("/admin"),
        Err(e) => fail("/admin", &e),
    }
}

#[derive(Deserialize)]
pub struct NewsIdQuery {
    pub post: Option<String>,
}

pub async fn edit_news(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<NewsIdQuery>,
    form: web::Form<NewsForm>,
) -> HttpResponse {
    let identity = context::identify(&state, &req).await;
    let Some(id) = query.post.as_deref().and_then(|s| s.parse::<u64>().ok()) else {
        return redirect_err("/admin", "Could not find post to edit.");
    };

    match state
        .service
        .edit_news(&identity, id, &form.newstitle, &form.newsbody)
        .await
    {
        Ok(()) => redirect("/admin"),
        Err(e) => fail("/admin", &e),
    }
}

pub async fn delete_news(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<NewsIdQuery>,
) -> HttpResponse {
    let identity = context::identify(&state, &req).await;
    let Some(id) = query.post.as_deref().and_then(|s| s.parse::<u64>().ok()) else {
        return redirect_err("/admin", "Failed to delete news.");
    };

    match state.service.delete_news(&identity, id).await {
        Ok(()) => redirect("/admin"),
        Err(e) => fail("/admin", &e),
    }
}

#[derive(Deserialize)]
pub struct BadgeForm {
    #[serde(default)]
    pub badgename: String,
    #[serde(default)]
    pub badgeimage: String,
    #[serde(default)]
    pub badgedesc: String,
}

pub async fn create_badge(
    state: web::Data<AppState>,
    req: HttpRequest,
    form: web::Form<BadgeForm>,
) -> HttpResponse {
    let identity = context::identify(&state, &req).await;
    match state
        .service
        .create_badge(&identity, &form.badgename, &form.badgeimage, &form.badgedesc)
        .await
    {
        Ok(()) => redirect("/admin"),
        Err(e) => fail("/admin", &e),
    }
}

#[derive(Deserialize)]
pub struct BadgeNameQuery {
    pub name: Option<String>,
}

pub async fn edit_badge(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<BadgeNameQuery>,
    form: web::Form<BadgeForm>,
) -> HttpResponse {
    let identity = context::identify(&state, &req).await;
    let Some(name) = query.name.as_deref() else {
        return redirect_err("/admin", "No name provided to edit.");
    };

    match state
        .service
        .edit_badge(
            &identity,
            name,
            &form.badgename,
            &form.badgeimage,
            &form.badgedesc,
        )
        .await
    {
        Ok(()) => redirect("/admin"),
        // A name clash goes back to the edit screen so the admin can retry.
        Err(AppError::Validation(msg)) => redirect_err(
            &format!("/admin/editbadge?name={}", percent_encode(name)),
            &msg,
        ),
        Err(e) => fail("/admin", &e),
    }
}

pub async fn delete_badge(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<BadgeNameQuery>,
) -> HttpResponse {
    let identity = context::identify(&state, &req).await;
    let Some(name) = query.name.as_deref() else {
        return redirect_err("/admin", "No name provided to delete.");
    };

    match state.service.delete_badge(&identity, name).await {
        Ok(()) => redirect("/admin"),
        Err(e) => fail("/admin", &e),
    }
}

#[derive(Deserialize)]
pub struct ManageBadgesForm {
    #[serde(default)]
    pub badgelist: String,
}

pub async fn manage_badges(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<UserQuery>,
    form: web::Form<ManageBadgesForm>,
) -> HttpResponse {
    let identity = context::identify(&state, &req).await;
    let Some(username) = query.user.as_deref() else {
        return redirect_err("/admin", "No name provided to manage badges for.");
    };

    match state
        .service
        .assign_badges(&identity, username, &form.badgelist)
        .await
    {
        Ok(()) => redirect("/directory"),
        // Unknown badge names go back to the manage screen.
        Err(AppError::Validation(msg)) => redirect_err(
            &format!("/admin/managebadges?user={}", percent_encode(username)),
            &msg,
        ),
        Err(e) => fail("/admin", &e),
    }
}
