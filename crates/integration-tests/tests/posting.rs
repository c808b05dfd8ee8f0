//! Posting and replying end to end.

use fb_core::error::AppError;
use integration_tests::{fresh_service, login_as, register_and_verify, setup_board};

#[tokio::test]
async fn full_posting_scenario() {
    let service = fresh_service().await;
    register_and_verify(&service, "alice", "hunter2").await;
    setup_board(&service, "general", "chat").await;

    let (token, identity) = login_as(&service, "alice", "hunter2").await;
    assert!(service.identify(Some(&token)).await.is_logged_in());

    // First post gets the first global id.
    let post_id = service
        .create_post(&identity, "general", "chat", "Hello", "first post body")
        .await
        .unwrap();
    assert_eq!(post_id, fb_core::models::ForumTree::FIRST_POST_ID);

    // The post is listed in its topic and attributed to the author.
    let view = service.topic_view("general", "chat", 1, 10).await.unwrap();
    assert_eq!(view.posts.len(), 1);
    assert_eq!(view.posts[0].id, post_id);
    assert_eq!(view.posts[0].author, "alice");

    let profile = service.profile("alice").await.unwrap();
    assert_eq!(profile.user.posts, vec![post_id]);

    // A reply takes the post's current reply index, which then moves by one.
    let before = service.post_view(post_id, 1, 50).await.unwrap();
    assert_eq!(before.replies.len(), 1);

    let reply_id = service
        .add_reply(&identity, post_id, "a reply")
        .await
        .unwrap();
    assert_eq!(reply_id, 1);

    let after = service.post_view(post_id, 1, 50).await.unwrap();
    assert_eq!(after.replies.len(), 2);
    assert_eq!(after.replies[1].id, reply_id);

    let profile = service.profile("alice").await.unwrap();
    assert_eq!(profile.user.replies, vec![(post_id, reply_id)]);

    // Global ids keep increasing across posts.
    let second = service
        .create_post(&identity, "general", "chat", "Again", "second post body")
        .await
        .unwrap();
    assert_eq!(second, post_id + 1);
}

#[tokio::test]
async fn posting_requires_login_and_an_unlocked_topic() {
    let service = fresh_service().await;
    register_and_verify(&service, "alice", "hunter2").await;
    setup_board(&service, "general", "chat").await;
    let (_token, identity) = login_as(&service, "alice", "hunter2").await;

    let err = service
        .create_post(&fb_services::Identity::Anonymous, "general", "chat", "t", "b")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Unauthorized(_)));

    service
        .set_topic_locked(&integration_tests::moderator(), "general", "chat", true)
        .await
        .unwrap();
    let err = service
        .create_post(&identity, "general", "chat", "t", "b")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn posting_to_a_missing_board_or_topic_fails() {
    let service = fresh_service().await;
    register_and_verify(&service, "alice", "hunter2").await;
    setup_board(&service, "general", "chat").await;
    let (_token, identity) = login_as(&service, "alice", "hunter2").await;

    assert!(matches!(
        service
            .create_post(&identity, "nope", "chat", "t", "b")
            .await,
        Err(AppError::NotFound("board", _))
    ));
    assert!(matches!(
        service
            .create_post(&identity, "general", "nope", "t", "b")
            .await,
        Err(AppError::NotFound("topic", _))
    ));
}

#[tokio::test]
async fn replies_to_locked_posts_are_rejected() {
    let service = fresh_service().await;
    register_and_verify(&service, "alice", "hunter2").await;
    setup_board(&service, "general", "chat").await;
    let (_token, identity) = login_as(&service, "alice", "hunter2").await;

    let post_id = service
        .create_post(&identity, "general", "chat", "Hello", "body")
        .await
        .unwrap();
    service
        .set_post_locked(&integration_tests::moderator(), post_id, true)
        .await
        .unwrap();

    let err = service
        .add_reply(&identity, post_id, "too late")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn only_the_author_may_edit_a_reply() {
    let service = fresh_service().await;
    register_and_verify(&service, "alice", "hunter2").await;
    register_and_verify(&service, "bob", "hunter2").await;
    setup_board(&service, "general", "chat").await;

    let (_ta, alice) = login_as(&service, "alice", "hunter2").await;
    let (_tb, bob) = login_as(&service, "bob", "hunter2").await;

    let post_id = service
        .create_post(&alice, "general", "chat", "Hello", "original")
        .await
        .unwrap();

    let err = service
        .edit_reply(&bob, post_id, 0, "defaced")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Unauthorized(_)));

    service
        .edit_reply(&alice, post_id, 0, "revised")
        .await
        .unwrap();
    assert_eq!(service.reply_body(post_id, 0).await.unwrap(), "revised");
}

#[tokio::test]
async fn author_resolution_falls_back_to_the_placeholder() {
    let service = fresh_service().await;
    register_and_verify(&service, "alice", "hunter2").await;
    setup_board(&service, "general", "chat").await;
    let (_token, identity) = login_as(&service, "alice", "hunter2").await;

    let post_id = service
        .create_post(&identity, "general", "chat", "Hello", "body")
        .await
        .unwrap();

    service
        .delete_user(&integration_tests::admin(), "alice")
        .await
        .unwrap();

    let view = service.post_view(post_id, 1, 50).await.unwrap();
    assert_eq!(
        view.replies[0].author.username,
        fb_services::content::DELETED_USER_NAME
    );
}
