//! API Integration Tests
//!
//! Each test runs its own in-process server over the in-memory store; no
//! external services are needed.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use forum_core::{Snowflake, User};
use integration_tests::{assert_error, assert_json, assert_status, fixtures::*, TestServer};
use reqwest::StatusCode;

async fn publish(server: &TestServer, author: &User) -> ArticleResponse {
    let response = server
        .post_as("/api/v1/articles", author.id, &CreateArticleRequest::unique())
        .await
        .unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

async fn comment(server: &TestServer, author: &User, article_id: &str) -> CommentResponse {
    let response = server
        .post_as(
            "/api/v1/comments",
            author.id,
            &CreateCommentRequest::on(article_id, "nice post"),
        )
        .await
        .unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

async fn points(server: &TestServer, user: &User) -> i64 {
    let response = server
        .get(&format!("/api/v1/users/{}/activities", user.id))
        .await
        .unwrap();
    let activity: ActivityResponse = assert_json(response, StatusCode::OK).await.unwrap();
    activity.points
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Principal Tests
// ============================================================================

#[tokio::test]
async fn test_missing_principal() {
    let server = TestServer::start().await.unwrap();
    let response = server
        .post("/api/v1/articles", &CreateArticleRequest::unique())
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(code, "MISSING_PRINCIPAL");
}

#[tokio::test]
async fn test_unknown_principal_cannot_publish() {
    let server = TestServer::start().await.unwrap();
    let response = server
        .post_as(
            "/api/v1/articles",
            Snowflake::new(42),
            &CreateArticleRequest::unique(),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

// ============================================================================
// Article Tests
// ============================================================================

#[tokio::test]
async fn test_create_article_awards_point() {
    let server = TestServer::start().await.unwrap();
    let alice = server.user("alice").await;

    let request = CreateArticleRequest::unique().with_tags(&[" rust ", "rust", "async"]);
    let response = server
        .post_as("/api/v1/articles", alice.id, &request)
        .await
        .unwrap();
    let article: ArticleResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert_eq!(article.title, request.title);
    assert_eq!(article.author_id, alice.id.to_string());
    assert!(article.alive);
    assert_eq!(article.tags, vec!["rust", "async"]);
    assert_eq!(points(&server, &alice).await, 1);
}

#[tokio::test]
async fn test_create_article_validation() {
    let server = TestServer::start().await.unwrap();
    let alice = server.user("alice").await;

    let mut request = CreateArticleRequest::unique();
    request.title = String::new();
    let response = server
        .post_as("/api/v1/articles", alice.id, &request)
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(points(&server, &alice).await, 0);
}

#[tokio::test]
async fn test_read_counts_views() {
    let server = TestServer::start().await.unwrap();
    let alice = server.user("alice").await;
    let article = publish(&server, &alice).await;
    let path = format!("/api/v1/articles/{}", article.id);

    let first: ArticleResponse = assert_json(server.get(&path).await.unwrap(), StatusCode::OK)
        .await
        .unwrap();
    let second: ArticleResponse = assert_json(server.get(&path).await.unwrap(), StatusCode::OK)
        .await
        .unwrap();

    assert_eq!(first.views, Some(1));
    assert_eq!(second.views, Some(2));
}

#[tokio::test]
async fn test_read_unknown_article() {
    let server = TestServer::start().await.unwrap();
    let response = server.get("/api/v1/articles/999").await.unwrap();
    let code = assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(code, "UNKNOWN_ARTICLE");

    let response = server.get("/api/v1/articles/not-an-id").await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_list_articles_with_search() {
    let server = TestServer::start().await.unwrap();
    let alice = server.user("alice").await;
    let mut request = CreateArticleRequest::unique();
    request.title = "Ownership in Rust".to_string();
    server
        .post_as("/api/v1/articles", alice.id, &request)
        .await
        .unwrap();
    publish(&server, &alice).await;

    let response = server
        .get("/api/v1/articles?search=ownership&page=1&page_size=5")
        .await
        .unwrap();
    let page: PageResponse<ArticleResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.page_size, 5);
    assert_eq!(page.items[0].title, "Ownership in Rust");

    let response = server.get("/api/v1/articles").await.unwrap();
    let page: PageResponse<ArticleResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.total, 2);
    assert_eq!(page.page, 1);
}

#[tokio::test]
async fn test_self_delete() {
    let server = TestServer::start().await.unwrap();
    let alice = server.user("alice").await;
    let bob = server.user("bob").await;
    let article = publish(&server, &alice).await;
    let delete_path = format!("/api/v1/articles/{}/delete", article.id);

    // Someone else's article looks missing
    let response = server.get_as(&delete_path, bob.id).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = server.get_as(&delete_path, alice.id).await.unwrap();
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["deleted"], true);

    // Gone for everyone, author included, and not deletable twice
    let response = server
        .get_as(&format!("/api/v1/articles/{}", article.id), alice.id)
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
    let response = server.get_as(&delete_path, alice.id).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    // Self-delete is free
    assert_eq!(points(&server, &alice).await, 1);
}

// ============================================================================
// Comment Tests
// ============================================================================

#[tokio::test]
async fn test_comment_awards_point_and_notifies_author() {
    let server = TestServer::start().await.unwrap();
    let alice = server.user("alice").await;
    let bob = server.user("bob").await;
    let article = publish(&server, &alice).await;

    let created = comment(&server, &bob, &article.id).await;
    assert_eq!(created.author_id, bob.id.to_string());
    assert_eq!(created.root, "0");
    assert_eq!(created.parent, "0");
    assert_eq!(points(&server, &bob).await, 1);

    let response = server
        .get_as("/api/v1/notifications", alice.id)
        .await
        .unwrap();
    let feed: PageResponse<NotificationResponse> =
        assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(feed.total, 1);
    assert_eq!(feed.items[0].verb, "commented");
    assert_eq!(feed.items[0].actor_id, bob.id.to_string());
    assert_eq!(feed.items[0].description, format!("comment:{}", created.id));

    let published = server.queue.published();
    assert_eq!(published.len(), 1);
    let payload: serde_json::Value = serde_json::from_str(&published[0].1).unwrap();
    assert_eq!(payload["email"], "alice@example.com");
}

#[tokio::test]
async fn test_comment_on_deleted_article() {
    let server = TestServer::start().await.unwrap();
    let alice = server.user("alice").await;
    let article = publish(&server, &alice).await;
    server
        .get_as(&format!("/api/v1/articles/{}/delete", article.id), alice.id)
        .await
        .unwrap();

    let response = server
        .post_as(
            "/api/v1/comments",
            alice.id,
            &CreateCommentRequest::on(&article.id, "late"),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(points(&server, &alice).await, 1);
    assert!(server.queue.published().is_empty());
}

#[tokio::test]
async fn test_reply_thread() {
    let server = TestServer::start().await.unwrap();
    let alice = server.user("alice").await;
    let bob = server.user("bob").await;
    let article = publish(&server, &alice).await;
    let root = comment(&server, &bob, &article.id).await;

    let request = ReplyRequest {
        article_id: article.id.clone(),
        be_mid: bob.id.to_string(),
        root: root.id.clone(),
        parent: root.id.clone(),
        content: "agreed".to_string(),
    };
    let response = server
        .post_as("/api/v1/comments/reply", alice.id, &request)
        .await
        .unwrap();
    let reply: CommentResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(reply.content, "@bob agreed");
    assert_eq!(reply.root, root.id);
    assert_eq!(reply.be_mid, bob.id.to_string());

    // Replies award nothing
    assert_eq!(points(&server, &alice).await, 1);

    let response = server
        .get(&format!("/api/v1/articles/{}/root_comments", article.id))
        .await
        .unwrap();
    let roots: PageResponse<CommentResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(roots.total, 1);
    assert_eq!(roots.items[0].id, root.id);

    let response = server
        .get(&format!("/api/v1/comments/{}/anchor_more_comments", bob.id))
        .await
        .unwrap();
    let anchored: PageResponse<CommentResponse> =
        assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(anchored.total, 1);
    assert_eq!(anchored.items[0].id, reply.id);

    let response = server
        .get("/api/v1/comments/0/anchor_more_comments")
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "VALIDATION_ERROR");

    let response = server.get_as("/api/v1/notifications", bob.id).await.unwrap();
    let feed: PageResponse<NotificationResponse> =
        assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(feed.items[0].verb, "replied");
}

#[tokio::test]
async fn test_reply_rejections() {
    let server = TestServer::start().await.unwrap();
    let alice = server.user("alice").await;
    let bob = server.user("bob").await;
    let article = publish(&server, &alice).await;
    let root = comment(&server, &bob, &article.id).await;

    let reply = |be_mid: String, root: &str, parent: &str| ReplyRequest {
        article_id: article.id.clone(),
        be_mid,
        root: root.to_string(),
        parent: parent.to_string(),
        content: "hi".to_string(),
    };

    // Unknown mentioned user
    let response = server
        .post_as(
            "/api/v1/comments/reply",
            alice.id,
            &reply("424242".to_string(), "0", "0"),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    // Parent without root
    let response = server
        .post_as(
            "/api/v1/comments/reply",
            alice.id,
            &reply(bob.id.to_string(), "0", &root.id),
        )
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "INVALID_THREAD");

    // Missing parent comment
    let response = server
        .post_as(
            "/api/v1/comments/reply",
            alice.id,
            &reply(bob.id.to_string(), &root.id, "777"),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    assert_eq!(
        server.queue.published().len(),
        1,
        "only the root comment notified"
    );
}

// ============================================================================
// Moderation Tests
// ============================================================================

#[tokio::test]
async fn test_moderation_requires_staff() {
    let server = TestServer::start().await.unwrap();
    let alice = server.user("alice").await;
    let article = publish(&server, &alice).await;

    let request = ModerationDeleteRequest {
        article_ids: vec![article.id.clone()],
    };
    let response = server
        .post_as("/api/v1/admin/articles/moderation-delete", alice.id, &request)
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(code, "NOT_STAFF");
}

#[tokio::test]
async fn test_moderation_delete_reports_each_article() {
    let server = TestServer::start().await.unwrap();
    let moderator = server.staff("mod").await;
    let alice = server.user("alice").await;
    let article = publish(&server, &alice).await;

    let request = ModerationDeleteRequest {
        article_ids: vec![article.id.clone(), article.id.clone(), "31337".to_string()],
    };
    let response = server
        .post_as(
            "/api/v1/admin/articles/moderation-delete",
            moderator.id,
            &request,
        )
        .await
        .unwrap();
    let report: ModerationReport = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(report.results.len(), 2);
    assert!(report.results[0].deleted);
    assert_eq!(report.results[0].author_points, Some(-1));
    assert!(!report.results[1].deleted);
    assert!(report.results[1].reason.is_some());
    assert_eq!(points(&server, &alice).await, -1);

    // Audit read still sees the record
    let response = server
        .get_as(
            &format!("/api/v1/admin/articles/{}", article.id),
            moderator.id,
        )
        .await
        .unwrap();
    let audited: ArticleResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!audited.alive);
}

// ============================================================================
// Activity Tests
// ============================================================================

#[tokio::test]
async fn test_activities() {
    let server = TestServer::start().await.unwrap();
    let alice = server.user("alice").await;
    let article = publish(&server, &alice).await;
    comment(&server, &alice, &article.id).await;

    let response = server
        .get(&format!("/api/v1/users/{}/activities", alice.id))
        .await
        .unwrap();
    let activity: ActivityResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(activity.username, "alice");
    assert_eq!(activity.points, 2);
    assert_eq!(activity.articles.len(), 1);
    assert_eq!(activity.comments.len(), 1);

    let response = server.get("/api/v1/users/5/activities").await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_registered_user_can_publish() {
    let server = TestServer::start().await.unwrap();
    let mut request = RegisterUserRequest::unique();
    request.profile = Some("new here".to_string());

    let response = server.post("/api/v1/users", &request).await.unwrap();
    let user: UserResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(user.username, request.username);
    assert_eq!(user.profile.as_deref(), Some("new here"));
    assert_eq!(user.points, 0);
    assert!(!user.is_staff);

    let user_id: Snowflake = user.id.parse().unwrap();
    let response = server
        .post_as("/api/v1/articles", user_id, &CreateArticleRequest::unique())
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    let response = server.get(&format!("/api/v1/users/{user_id}")).await.unwrap();
    let fetched: UserResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(fetched.points, 1);

    // usernames are unique
    let response = server.post("/api/v1/users", &request).await.unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_register_rejects_bad_email() {
    let server = TestServer::start().await.unwrap();
    let mut request = RegisterUserRequest::unique();
    request.email = "not-an-email".to_string();

    let response = server.post("/api/v1/users", &request).await.unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_profile_edit_is_owner_only() {
    let server = TestServer::start().await.unwrap();
    let alice = server.user("alice").await;
    let mallory = server.user("mallory").await;
    let path = format!("/api/v1/users/{}", alice.id);

    let edit = UpdateProfileRequest {
        profile: Some("about alice".to_string()),
    };
    let response = server.patch_as(&path, mallory.id, &edit).await.unwrap();
    let code = assert_error(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(code, "FORBIDDEN");

    let response = server.patch_as(&path, alice.id, &edit).await.unwrap();
    let updated: UserResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated.profile.as_deref(), Some("about alice"));

    let response = server.get(&path).await.unwrap();
    let fetched: UserResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(fetched.profile.as_deref(), Some("about alice"));
}
