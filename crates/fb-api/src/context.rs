//! Request context helpers: session cookie handling, navigation state, and
//! the redirect-with-error convention shared by every handler.

use actix_web::{HttpRequest, HttpResponse};
use fb_core::error::AppError;
use fb_services::Identity;
use fb_ui::{CurrentUser, Nav};

use crate::state::AppState;

/// Name of the opaque session cookie.
pub const SESSION_COOKIE: &str = "userSession";

/// Client-side expiry hint; the registry itself never expires tokens.
pub const SESSION_COOKIE_MAX_AGE_SECS: i64 = 90_000;

pub fn session_token(req: &HttpRequest) -> Option<String> {
    req.cookie(SESSION_COOKIE).map(|c| c.value().to_string())
}

/// Resolves the caller's identity from the request's session cookie.
pub async fn identify(state: &AppState, req: &HttpRequest) -> Identity {
    state.service.identify(session_token(req).as_deref()).await
}

/// Navigation chrome for a page render.
pub fn nav_for(state: &AppState, identity: &Identity, page: &str, error: Option<String>) -> Nav {
    let tab_title = if page.is_empty() {
        state.settings.name.clone()
    } else {
        format!("{} - {page}", state.settings.name)
    };
    Nav {
        tab_title,
        site_title: state.settings.title.clone(),
        user: match identity {
            Identity::Anonymous => None,
            Identity::User { username, .. } => Some(CurrentUser {
                username: username.clone(),
                is_moderator: identity.is_moderator(),
                is_admin: identity.is_admin(),
            }),
        },
        error,
    }
}

/// Renders an askama template result into an HTML response.
pub fn html(rendered: askama::Result<String>) -> HttpResponse {
    match rendered {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(e) => {
            log::error!("template rendering failed: {e}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header(("Location", location))
        .finish()
}

/// Redirect to `base` carrying a human-readable error message in the `err`
/// query parameter.
pub fn redirect_err(base: &str, message: &str) -> HttpResponse {
    let sep = if base.contains('?') { '&' } else { '?' };
    redirect(&format!("{base}{sep}err={}", percent_encode(message)))
}

/// Recovers a service error at the request boundary. Authorization failures
/// bounce to the front page without a message; everything else goes back to
/// `base` with the user-facing message attached.
pub fn fail(base: &str, err: &AppError) -> HttpResponse {
    match err {
        AppError::Unauthorized(_) => redirect("/"),
        other => {
            if matches!(other, AppError::Persistence(_) | AppError::Upstream(_)) {
                log::error!("request failed: {other}");
            }
            redirect_err(base, &other.user_message())
        }
    }
}

/// Percent-encodes a query parameter value.
pub fn percent_encode(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

/// Page numbers arrive as free-form query text; anything unparsable or
/// below one means page one.
pub fn parse_page(raw: Option<&str>) -> usize {
    raw.and_then(|s| s.parse::<usize>().ok())
        .filter(|&p| p >= 1)
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_encoding_covers_reserved_chars() {
        assert_eq!(percent_encode("plain"), "plain");
        assert_eq!(percent_encode("a b&c"), "a%20b%26c");
        assert_eq!(percent_encode("100%"), "100%25");
    }

    #[test]
    fn page_parsing_defaults_to_one() {
        assert_eq!(parse_page(None), 1);
        assert_eq!(parse_page(Some("3")), 3);
        assert_eq!(parse_page(Some("0")), 1);
        assert_eq!(parse_page(Some("-2")), 1);
        assert_eq!(parse_page(Some("garbage")), 1);
    }
}
