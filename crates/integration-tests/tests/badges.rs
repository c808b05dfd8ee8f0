//! Badge definitions and all-or-nothing assignment.

use fb_core::error::AppError;
use integration_tests::{admin, fresh_service, register_and_verify};

#[tokio::test]
async fn badge_assignment_is_atomic() {
    let service = fresh_service().await;
    register_and_verify(&service, "alice", "hunter2").await;
    let admin = admin();

    service
        .create_badge(&admin, "Founder", "/img/founder.png", "Was here first")
        .await
        .unwrap();
    service
        .create_badge(&admin, "Helper", "/img/helper.png", "Helps out")
        .await
        .unwrap();

    service
        .assign_badges(&admin, "alice", "Founder")
        .await
        .unwrap();
    assert_eq!(service.user("alice").await.unwrap().badges, vec!["Founder"]);

    // One unknown name rejects the whole list; the stored set is unchanged.
    let err = service
        .assign_badges(&admin, "alice", "Helper,Ghost")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    assert_eq!(service.user("alice").await.unwrap().badges, vec!["Founder"]);

    // A valid multi-name list replaces the set.
    service
        .assign_badges(&admin, "alice", "Founder,Helper")
        .await
        .unwrap();
    assert_eq!(
        service.user("alice").await.unwrap().badges,
        vec!["Founder", "Helper"]
    );

    // The empty list clears it.
    service.assign_badges(&admin, "alice", "").await.unwrap();
    assert!(service.user("alice").await.unwrap().badges.is_empty());
}

#[tokio::test]
async fn badge_names_are_unique() {
    let service = fresh_service().await;
    let admin = admin();

    service
        .create_badge(&admin, "Founder", "/img/a.png", "first")
        .await
        .unwrap();
    let err = service
        .create_badge(&admin, "Founder", "/img/b.png", "second")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn badge_edits_check_name_clashes() {
    let service = fresh_service().await;
    let admin = admin();

    service
        .create_badge(&admin, "Founder", "/img/a.png", "first")
        .await
        .unwrap();
    service
        .create_badge(&admin, "Helper", "/img/b.png", "second")
        .await
        .unwrap();

    // Renaming onto an existing name is rejected.
    let err = service
        .edit_badge(&admin, "Helper", "Founder", "/img/b.png", "second")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    // Keeping its own name while changing other fields is fine.
    service
        .edit_badge(&admin, "Helper", "Helper", "/img/new.png", "updated")
        .await
        .unwrap();
    let badge = service.badge("Helper").await.unwrap();
    assert_eq!(badge.image, "/img/new.png");
    assert_eq!(badge.description, "updated");
}

#[tokio::test]
async fn deleted_badges_drop_out_of_profiles() {
    let service = fresh_service().await;
    register_and_verify(&service, "alice", "hunter2").await;
    let admin = admin();

    service
        .create_badge(&admin, "Founder", "/img/a.png", "first")
        .await
        .unwrap();
    service
        .assign_badges(&admin, "alice", "Founder")
        .await
        .unwrap();
    service.delete_badge(&admin, "Founder").await.unwrap();

    // The stale name on the user resolves to no definition.
    let profile = service.profile("alice").await.unwrap();
    assert!(profile.badges.is_empty());
}

#[tokio::test]
async fn badge_operations_require_admin() {
    let service = fresh_service().await;
    let err = service
        .create_badge(
            &integration_tests::moderator(),
            "Founder",
            "/img/a.png",
            "first",
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Unauthorized(_)));
}
