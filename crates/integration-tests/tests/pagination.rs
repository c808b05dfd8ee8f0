//! Pagination windows and out-of-range handling.

use fb_core::error::AppError;
use integration_tests::{fresh_service, login_as, register_and_verify, setup_board};

#[tokio::test]
async fn reply_pages_are_windowed_and_clipped() {
    let service = fresh_service().await;
    register_and_verify(&service, "alice", "hunter2").await;
    setup_board(&service, "general", "chat").await;
    let (_token, identity) = login_as(&service, "alice", "hunter2").await;

    let post_id = service
        .create_post(&identity, "general", "chat", "Hello", "origin")
        .await
        .unwrap();
    // 11 more replies, 12 total including the origin.
    for i in 0..11 {
        service
            .add_reply(&identity, post_id, &format!("reply {i}"))
            .await
            .unwrap();
    }

    let page1 = service.post_view(post_id, 1, 5).await.unwrap();
    let ids: Vec<u64> = page1.replies.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![0, 1, 2, 3, 4]);
    assert!(page1.has_next);
    assert!(!page1.has_prev);

    let page3 = service.post_view(post_id, 3, 5).await.unwrap();
    let ids: Vec<u64> = page3.replies.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![10, 11]);
    assert!(!page3.has_next);

    // Past the last page is an error, not an empty page.
    assert!(matches!(
        service.post_view(post_id, 4, 5).await,
        Err(AppError::PageOutOfRange)
    ));
}

#[tokio::test]
async fn topic_pages_follow_the_same_window() {
    let service = fresh_service().await;
    register_and_verify(&service, "alice", "hunter2").await;
    setup_board(&service, "general", "chat").await;
    let (_token, identity) = login_as(&service, "alice", "hunter2").await;

    for i in 0..7 {
        service
            .create_post(&identity, "general", "chat", &format!("post {i}"), "body")
            .await
            .unwrap();
    }

    let page1 = service.topic_view("general", "chat", 1, 5).await.unwrap();
    assert_eq!(page1.posts.len(), 5);
    assert!(page1.has_next);

    let page2 = service.topic_view("general", "chat", 2, 5).await.unwrap();
    assert_eq!(page2.posts.len(), 2);
    assert!(!page2.has_next);

    assert!(matches!(
        service.topic_view("general", "chat", 3, 5).await,
        Err(AppError::PageOutOfRange)
    ));
}

#[tokio::test]
async fn an_empty_topic_still_renders_its_first_page() {
    let service = fresh_service().await;
    setup_board(&service, "general", "chat").await;

    let view = service.topic_view("general", "chat", 1, 10).await.unwrap();
    assert!(view.posts.is_empty());
    assert!(!view.has_next);
}

#[tokio::test]
async fn stickied_posts_appear_on_the_first_page_only() {
    let service = fresh_service().await;
    register_and_verify(&service, "alice", "hunter2").await;
    setup_board(&service, "general", "chat").await;
    let (_token, identity) = login_as(&service, "alice", "hunter2").await;

    for i in 0..6 {
        service
            .create_post(&identity, "general", "chat", &format!("post {i}"), "body")
            .await
            .unwrap();
    }
    let pinned = service
        .create_post(&identity, "general", "chat", "pinned", "body")
        .await
        .unwrap();
    service
        .set_sticky(&integration_tests::moderator(), "general", "chat", pinned, true)
        .await
        .unwrap();

    let page1 = service.topic_view("general", "chat", 1, 5).await.unwrap();
    assert_eq!(page1.stickied.len(), 1);

    let page2 = service.topic_view("general", "chat", 2, 5).await.unwrap();
    assert!(page2.stickied.is_empty());
}

#[tokio::test]
async fn news_pages_clip_without_erroring() {
    let service = fresh_service().await;
    let admin = integration_tests::admin();
    for i in 0..12 {
        service
            .create_news(&admin, &format!("news {i}"), "body")
            .await
            .unwrap();
    }

    let page1 = service.news_page(1).await;
    assert_eq!(page1.items.len(), 10);
    assert!(page1.has_next);

    // Newest first: the latest item leads the first page.
    assert_eq!(page1.items[0].title, "news 11");

    let page2 = service.news_page(2).await;
    assert_eq!(page2.items.len(), 2);
    assert!(!page2.has_next);

    let page3 = service.news_page(3).await;
    assert!(page3.items.is_empty());
}
