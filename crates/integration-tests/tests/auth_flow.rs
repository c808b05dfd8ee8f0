//! Registration, verification gating, and session semantics.

use fb_core::error::AppError;
use integration_tests::{
    admin, fresh_service, login_form, register_and_verify, registration, DEFAULT_STATUS,
};
use fb_services::{Identity, RoleFlags};

#[tokio::test]
async fn login_requires_a_verified_account() {
    let service = fresh_service().await;
    service
        .register(registration("alice", "hunter2"))
        .await
        .unwrap();

    // Unverified: login is rejected even with the right password.
    let err = service
        .login(login_form("alice", "hunter2"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    // Verified: the same credentials now work.
    service
        .manage_user(
            &admin(),
            "alice",
            RoleFlags {
                verified: true,
                moderator: false,
                admin: false,
            },
        )
        .await
        .unwrap();
    let token = service.login(login_form("alice", "hunter2")).await.unwrap();
    assert!(!token.is_empty());
}

#[tokio::test]
async fn wrong_password_is_rejected() {
    let service = fresh_service().await;
    register_and_verify(&service, "alice", "hunter2").await;

    let err = service
        .login(login_form("alice", "wrong"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let err = service
        .login(login_form("nobody", "hunter2"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn a_new_login_evicts_the_previous_token() {
    let service = fresh_service().await;
    register_and_verify(&service, "alice", "hunter2").await;

    let first = service.login(login_form("alice", "hunter2")).await.unwrap();
    assert!(service.identify(Some(&first)).await.is_logged_in());

    let second = service.login(login_form("alice", "hunter2")).await.unwrap();
    assert_ne!(first, second);
    assert_eq!(service.identify(Some(&first)).await, Identity::Anonymous);
    assert!(service.identify(Some(&second)).await.is_logged_in());
}

#[tokio::test]
async fn logout_revokes_the_token() {
    let service = fresh_service().await;
    register_and_verify(&service, "alice", "hunter2").await;

    let token = service.login(login_form("alice", "hunter2")).await.unwrap();
    service.logout(&token).await;
    assert_eq!(service.identify(Some(&token)).await, Identity::Anonymous);
}

#[tokio::test]
async fn a_token_for_a_deleted_user_resolves_to_anonymous() {
    let service = fresh_service().await;
    register_and_verify(&service, "alice", "hunter2").await;

    let token = service.login(login_form("alice", "hunter2")).await.unwrap();
    service.delete_user(&admin(), "alice").await.unwrap();

    // Fails open to logged-out, never to elevated privilege.
    assert_eq!(service.identify(Some(&token)).await, Identity::Anonymous);
}

#[tokio::test]
async fn duplicate_usernames_are_rejected() {
    let service = fresh_service().await;
    service
        .register(registration("alice", "hunter2"))
        .await
        .unwrap();

    let err = service
        .register(registration("alice", "other"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn registration_validates_inputs() {
    let service = fresh_service().await;

    let mut reg = registration("bad name", "pw");
    assert!(service.register(reg).await.is_err());

    reg = registration("alice", "pw");
    reg.password_repeat = "different".to_string();
    assert!(service.register(reg).await.is_err());

    reg = registration("alice", "pw");
    reg.email = "not-an-email".to_string();
    assert!(service.register(reg).await.is_err());
}

#[tokio::test]
async fn new_accounts_get_profile_defaults() {
    let service = fresh_service().await;
    service
        .register(registration("alice", "hunter2"))
        .await
        .unwrap();

    let user = service.user("alice").await.unwrap();
    assert!(!user.verified);
    assert!(!user.moderator);
    assert!(!user.admin);
    assert_eq!(user.description, DEFAULT_STATUS);
    assert!(user.posts.is_empty());
    assert!(user.badges.is_empty());
}
