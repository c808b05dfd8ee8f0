//! flatboard/crates/fb-configs/src/lib.rs
//!
//! Static configuration: a `flatboard.toml` file in the working directory,
//! overridable through `FLATBOARD_*` environment variables. `.env` files are
//! honoured for local development.

use secrecy::SecretString;
use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("configuration error: {0}")]
    Load(#[from] config::ConfigError),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Short site name used in tab titles.
    pub name: String,
    /// Banner title rendered at the top of every page.
    pub title: String,
    pub welcome_header: String,
    pub welcome_body: String,
    pub support_email: String,

    pub bind_addr: String,
    /// Directory holding users.json, forum.json and the posts/ tree.
    pub data_dir: String,

    pub board_posts_per_page: usize,

    pub board_user_role_colour: String,
    pub board_moderator_role_colour: String,
    pub board_admin_role_colour: String,

    pub user_description_default: String,
    pub user_about_default: String,
    pub user_profile_picture_default: String,

    /// Pool of messages the 404 page picks from at random.
    pub error_messages: Vec<String>,

    pub recaptcha_site_key: String,
    pub recaptcha_secret: SecretString,
    /// When false, captcha verification is skipped (local development).
    pub captcha_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            name: "flatboard".into(),
            title: "flatboard".into(),
            welcome_header: "Welcome!".into(),
            welcome_body: "A small forum running on flat files.".into(),
            support_email: String::new(),
            bind_addr: "127.0.0.1:8080".into(),
            data_dir: "./data".into(),
            board_posts_per_page: 10,
            board_user_role_colour: "#9e9e9e".into(),
            board_moderator_role_colour: "#2e7d32".into(),
            board_admin_role_colour: "#c62828".into(),
            user_description_default: "A new user.".into(),
            user_about_default: "This user has not written anything yet.".into(),
            user_profile_picture_default: String::new(),
            error_messages: vec!["There's nothing here.".into()],
            recaptcha_site_key: String::new(),
            recaptcha_secret: SecretString::from(String::new()),
            captcha_enabled: false,
        }
    }
}

impl Settings {
    /// Loads `flatboard.toml` (optional) and `FLATBOARD_*` env overrides.
    pub fn load() -> Result<Self, SettingsError> {
        if dotenvy::dotenv().is_ok() {
            log::debug!("loaded environment from .env");
        }
        let settings = config::Config::builder()
            .add_source(config::File::with_name("flatboard").required(false))
            .add_source(config::Environment::with_prefix("FLATBOARD"))
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_usable() {
        let s = Settings::default();
        assert!(!s.bind_addr.is_empty());
        assert!(s.board_posts_per_page > 0);
        assert!(!s.error_messages.is_empty());
        assert!(!s.captcha_enabled);
    }
}
