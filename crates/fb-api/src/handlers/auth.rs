//! Authentication and profile handlers: login, signup, logout, profile edit.

use actix_web::cookie::time::Duration;
use actix_web::cookie::Cookie;
use actix_web::{web, HttpRequest, HttpResponse};
use fb_core::models::Contacts;
use fb_services::{Login, ProfileEdit, Registration};
use serde::Deserialize;

use crate::context::{
    self, fail, percent_encode, redirect, session_token, SESSION_COOKIE,
    SESSION_COOKIE_MAX_AGE_SECS,
};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    #[serde(rename = "g-recaptcha-response", default)]
    pub captcha: String,
}

pub async fn login(state: web::Data<AppState>, form: web::Form<LoginForm>) -> HttpResponse {
    let form = form.into_inner();
    let result = state
        .service
        .login(Login {
            username: form.username,
            password: form.password,
            captcha_token: form.captcha,
        })
        .await;

    match result {
        Ok(token) => {
            let cookie = Cookie::build(SESSION_COOKIE, token)
                .path("/")
                .http_only(true)
                .max_age(Duration::seconds(SESSION_COOKIE_MAX_AGE_SECS))
                .finish();
            HttpResponse::SeeOther()
                .insert_header(("Location", "/"))
                .cookie(cookie)
                .finish()
        }
        Err(e) => fail("/login", &e),
    }
}

#[derive(Deserialize)]
pub struct SignupForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub password_repeat: String,
    #[serde(rename = "g-recaptcha-response", default)]
    pub captcha: String,
}

pub async fn signup(state: web::Data<AppState>, form: web::Form<SignupForm>) -> HttpResponse {
    let form = form.into_inner();
    let result = state
        .service
        .register(Registration {
            username: form.username,
            password: form.password,
            password_repeat: form.password_repeat,
            email: form.email,
            captcha_token: form.captcha,
        })
        .await;

    match result {
        Ok(()) => redirect("/register-done"),
        Err(e) => fail("/register", &e),
    }
}

pub async fn logout(state: web::Data<AppState>, req: HttpRequest) -> HttpResponse {
    if let Some(token) = session_token(&req) {
        state.service.logout(&token).await;
    }
    let mut response = redirect("/");
    let mut removal = Cookie::new(SESSION_COOKIE, "");
    removal.set_path("/");
    let _ = response.add_removal_cookie(&removal);
    response
}

#[derive(Deserialize)]
pub struct ProfileForm {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub profile_picture: String,
    #[serde(default)]
    pub discord: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub reddit: String,
    #[serde(default)]
    pub twitter: String,
    #[serde(default)]
    pub youtube: String,
}

pub async fn edit_profile(
    state: web::Data<AppState>,
    req: HttpRequest,
    form: web::Form<ProfileForm>,
) -> HttpResponse {
    let identity = context::identify(&state, &req).await;
    let Some(username) = identity.username().map(str::to_string) else {
        return redirect("/");
    };
    let form = form.into_inner();

    // The form's "status" is the short profile line; its "description" is
    // the long about text.
    let result = state
        .service
        .edit_profile(
            &identity,
            ProfileEdit {
                status: form.status,
                about: form.description,
                profile_picture: form.profile_picture,
                contacts: Contacts {
                    discord: form.discord,
                    email: form.email,
                    reddit: form.reddit,
                    twitter: form.twitter,
                    youtube: form.youtube,
                },
            },
        )
        .await;

    match result {
        Ok(()) => redirect(&format!("/users?id={}", percent_encode(&username))),
        Err(e) => fail("/users/edit", &e),
    }
}
