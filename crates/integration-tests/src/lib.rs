//! Shared fixtures for the service-level integration tests.
//!
//! Each test builds a real `ForumService` over a throwaway data directory
//! with the JSON store and argon2 hasher, captcha verification disabled.

use std::sync::Arc;

use fb_auth_simple::{ArgonPasswordHasher, RecaptchaVerifier};
use fb_core::models::{ForumTree, Role};
use fb_core::traits::ForumStore;
use fb_services::{
    ForumService, Identity, Login, ProfileDefaults, Registration, RoleFlags,
};
use fb_store_json::JsonForumStore;
use secrecy::SecretString;

pub const DEFAULT_STATUS: &str = "A new user.";

/// A service over a fresh, empty data directory.
pub async fn fresh_service() -> Arc<ForumService> {
    let dir = std::env::temp_dir().join(format!("fb-it-{}", uuid::Uuid::new_v4()));
    let store = Arc::new(JsonForumStore::new(&dir));
    store.init().await.unwrap();
    store.save_users(&[]).await.unwrap();
    store.save_forum(&ForumTree::empty()).await.unwrap();

    let service = ForumService::open(
        store,
        Arc::new(ArgonPasswordHasher),
        Arc::new(RecaptchaVerifier::new(SecretString::from(String::new()), false)),
        ProfileDefaults {
            description: DEFAULT_STATUS.to_string(),
            profile_picture: String::new(),
        },
    )
    .await
    .unwrap();
    Arc::new(service)
}

/// A pre-resolved administrator identity for driving admin operations.
pub fn admin() -> Identity {
    Identity::User {
        username: "root".to_string(),
        role: Role::Administrator,
    }
}

pub fn moderator() -> Identity {
    Identity::User {
        username: "mod".to_string(),
        role: Role::Moderator,
    }
}

pub fn registration(name: &str, password: &str) -> Registration {
    Registration {
        username: name.to_string(),
        password: password.to_string(),
        password_repeat: password.to_string(),
        email: format!("{name}@example.com"),
        captcha_token: String::new(),
    }
}

pub fn login_form(name: &str, password: &str) -> Login {
    Login {
        username: name.to_string(),
        password: password.to_string(),
        captcha_token: String::new(),
    }
}

/// Registers an account and flips its verified flag.
pub async fn register_and_verify(service: &ForumService, name: &str, password: &str) {
    service.register(registration(name, password)).await.unwrap();
    service
        .manage_user(
            &admin(),
            name,
            RoleFlags {
                verified: true,
                moderator: false,
                admin: false,
            },
        )
        .await
        .unwrap();
}

/// Logs in and resolves the resulting token to an identity.
pub async fn login_as(service: &ForumService, name: &str, password: &str) -> (String, Identity) {
    let token = service.login(login_form(name, password)).await.unwrap();
    let identity = service.identify(Some(&token)).await;
    assert!(identity.is_logged_in());
    (token, identity)
}

/// Creates a board and a topic for posting tests.
pub async fn setup_board(service: &ForumService, board: &str, topic: &str) {
    service
        .create_board(&admin(), board, "test board")
        .await
        .unwrap();
    service
        .create_topic(&admin(), board, topic, "test topic")
        .await
        .unwrap();
}
