//! Board, topic, news, and user administration.

use fb_core::error::AppError;
use integration_tests::{admin, fresh_service, moderator, register_and_verify};
use fb_services::RoleFlags;

#[tokio::test]
async fn board_and_topic_names_are_unique() {
    let service = fresh_service().await;
    let admin = admin();

    service.create_board(&admin, "general", "").await.unwrap();
    let err = service
        .create_board(&admin, "general", "again")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    service
        .create_topic(&admin, "general", "chat", "")
        .await
        .unwrap();
    let err = service
        .create_topic(&admin, "general", "chat", "again")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    // The same topic name in another board is fine.
    service.create_board(&admin, "offtopic", "").await.unwrap();
    service
        .create_topic(&admin, "offtopic", "chat", "")
        .await
        .unwrap();
}

#[tokio::test]
async fn board_and_topic_deletion() {
    let service = fresh_service().await;
    let admin = admin();

    service.create_board(&admin, "general", "").await.unwrap();
    service
        .create_topic(&admin, "general", "chat", "")
        .await
        .unwrap();

    service.delete_topic(&admin, "general", "chat").await.unwrap();
    assert!(matches!(
        service.delete_topic(&admin, "general", "chat").await,
        Err(AppError::NotFound("topic", _))
    ));

    service.delete_board(&admin, "general").await.unwrap();
    assert!(service.boards().await.is_empty());
    assert!(matches!(
        service.delete_board(&admin, "general").await,
        Err(AppError::NotFound("board", _))
    ));
}

#[tokio::test]
async fn news_lifecycle() {
    let service = fresh_service().await;
    let admin = admin();

    let first = service.create_news(&admin, "Launch", "we are live").await.unwrap();
    let second = service.create_news(&admin, "Update", "still live").await.unwrap();
    assert!(second > first);

    // Newest first on the front page.
    let front = service.front_news().await;
    assert_eq!(front[0].id, second);
    assert_eq!(front[0].author, "root");

    service
        .edit_news(&admin, first, "Launch!", "edited body")
        .await
        .unwrap();
    assert_eq!(service.news_item(first).await.unwrap().body, "edited body");

    service.delete_news(&admin, first).await.unwrap();
    assert!(matches!(
        service.news_item(first).await,
        Err(AppError::NotFound(_, _))
    ));

    // Ids are never reused after deletion.
    let third = service.create_news(&admin, "Third", "body").await.unwrap();
    assert!(third > second);
}

#[tokio::test]
async fn role_flags_update_and_derive() {
    let service = fresh_service().await;
    register_and_verify(&service, "alice", "hunter2").await;

    service
        .manage_user(
            &admin(),
            "alice",
            RoleFlags {
                verified: true,
                moderator: true,
                admin: false,
            },
        )
        .await
        .unwrap();
    let user = service.user("alice").await.unwrap();
    assert!(user.moderator);
    assert_eq!(user.role(), fb_core::models::Role::Moderator);

    // Admin dominates moderator.
    service
        .manage_user(
            &admin(),
            "alice",
            RoleFlags {
                verified: true,
                moderator: true,
                admin: true,
            },
        )
        .await
        .unwrap();
    let user = service.user("alice").await.unwrap();
    assert_eq!(user.role(), fb_core::models::Role::Administrator);
}

#[tokio::test]
async fn admin_operations_reject_lower_roles() {
    let service = fresh_service().await;

    assert!(matches!(
        service.create_board(&moderator(), "general", "").await,
        Err(AppError::Unauthorized(_))
    ));
    assert!(matches!(
        service.delete_user(&moderator(), "anyone").await,
        Err(AppError::Unauthorized(_))
    ));
    assert!(matches!(
        service.create_news(&moderator(), "t", "b").await,
        Err(AppError::Unauthorized(_))
    ));
}

#[tokio::test]
async fn deleting_a_user_does_not_cascade_to_content() {
    let service = fresh_service().await;
    register_and_verify(&service, "alice", "hunter2").await;
    let admin = admin();

    service.create_board(&admin, "general", "").await.unwrap();
    service
        .create_topic(&admin, "general", "chat", "")
        .await
        .unwrap();
    let (_token, identity) =
        integration_tests::login_as(&service, "alice", "hunter2").await;
    let post_id = service
        .create_post(&identity, "general", "chat", "Hello", "body")
        .await
        .unwrap();

    service.delete_user(&admin, "alice").await.unwrap();

    // The post is still listed and readable.
    let view = service.topic_view("general", "chat", 1, 10).await.unwrap();
    assert_eq!(view.posts.len(), 1);
    assert_eq!(view.posts[0].id, post_id);
}
