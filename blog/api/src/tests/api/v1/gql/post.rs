use serial_test::serial;

use crate::api::auth::AuthData;
use crate::api::request_context::RequestContext;
use crate::database::{Post, User};
use crate::tests::api::v1::gql::{error_code, run_query};
use crate::tests::global::mock_global_state;

async fn create_user(global: &std::sync::Arc<crate::global::GlobalState>, email: &str) -> User {
    User::create(
        &global.db,
        "Writer",
        email,
        &User::hash_password("Hunter22!"),
    )
    .await
    .expect("failed to create user")
}

#[serial]
#[tokio::test]
#[ignore = "requires a dev postgres database"]
async fn test_serial_create_post() {
    let (global, _handler) = mock_global_state(Default::default()).await;

    let user = create_user(&global, "writer@example.com").await;

    let request_context = RequestContext::default();
    request_context
        .set_auth(AuthData { user: user.clone() })
        .await;

    let response = run_query(
        &global,
        &request_context,
        r#"mutation { post { create(input: { title: "Hello", content: "World", hashtags: ["rust", "blog", "rust"] }) { id title hashtags writerId } } }"#,
    )
    .await;

    assert!(response["errors"].is_null(), "{:?}", response["errors"]);

    let post = &response["data"]["post"]["create"];
    assert_eq!(post["title"], "Hello");
    // Duplicates dropped, first occurrence order kept.
    assert_eq!(
        post["hashtags"],
        serde_json::json!(["rust", "blog"])
    );
    assert_eq!(post["writerId"], ulid::Ulid::from(user.id).to_string());
}

#[serial]
#[tokio::test]
#[ignore = "requires a dev postgres database"]
async fn test_serial_create_post_requires_login() {
    let (global, _handler) = mock_global_state(Default::default()).await;

    let response = run_query(
        &global,
        &RequestContext::default(),
        r#"mutation { post { create(input: { title: "Hello", content: "World" }) { id } } }"#,
    )
    .await;

    assert_eq!(error_code(&response), Some("ERR_NOT_LOGGED_IN"));
}

#[serial]
#[tokio::test]
#[ignore = "requires a dev postgres database"]
async fn test_serial_update_post() {
    let (global, _handler) = mock_global_state(Default::default()).await;

    let user = create_user(&global, "writer@example.com").await;
    let post = Post::create(&global.db, user.id, "Before", "Body", vec![])
        .await
        .expect("failed to create post");

    let request_context = RequestContext::default();
    request_context
        .set_auth(AuthData { user: user.clone() })
        .await;

    let id = ulid::Ulid::from(post.id);

    let response = run_query(
        &global,
        &request_context,
        &format!(
            r#"mutation {{ post {{ update(input: {{ id: "{id}", title: "After" }}) {{ title content }} }} }}"#
        ),
    )
    .await;

    assert!(response["errors"].is_null(), "{:?}", response["errors"]);
    assert_eq!(response["data"]["post"]["update"]["title"], "After");
    // Absent fields are unchanged.
    assert_eq!(response["data"]["post"]["update"]["content"], "Body");
}

#[serial]
#[tokio::test]
#[ignore = "requires a dev postgres database"]
async fn test_serial_update_post_not_writer() {
    let (global, _handler) = mock_global_state(Default::default()).await;

    let writer = create_user(&global, "writer@example.com").await;
    let other = create_user(&global, "other@example.com").await;

    let post = Post::create(&global.db, writer.id, "Before", "Body", vec![])
        .await
        .expect("failed to create post");

    let request_context = RequestContext::default();
    request_context.set_auth(AuthData { user: other }).await;

    let id = ulid::Ulid::from(post.id);

    let response = run_query(
        &global,
        &request_context,
        &format!(
            r#"mutation {{ post {{ update(input: {{ id: "{id}", title: "After" }}) {{ title }} }} }}"#
        ),
    )
    .await;

    assert_eq!(error_code(&response), Some("ERR_NOT_WRITER"));

    // The post is unchanged.
    let unchanged = Post::find_by_id(&global.db, post.id)
        .await
        .expect("post should still exist");
    assert_eq!(unchanged.title, "Before");
}

#[serial]
#[tokio::test]
#[ignore = "requires a dev postgres database"]
async fn test_serial_delete_post() {
    let (global, _handler) = mock_global_state(Default::default()).await;

    let user = create_user(&global, "writer@example.com").await;
    let post = Post::create(&global.db, user.id, "Title", "Body", vec![])
        .await
        .expect("failed to create post");

    let request_context = RequestContext::default();
    request_context.set_auth(AuthData { user }).await;

    let id = ulid::Ulid::from(post.id);

    let response = run_query(
        &global,
        &request_context,
        &format!(r#"mutation {{ post {{ delete(input: {{ id: "{id}" }}) }} }}"#),
    )
    .await;

    assert!(response["errors"].is_null(), "{:?}", response["errors"]);
    assert_eq!(response["data"]["post"]["delete"], true);

    // The row is gone, a second delete reports not found.
    let response = run_query(
        &global,
        &request_context,
        &format!(r#"mutation {{ post {{ delete(input: {{ id: "{id}" }}) }} }}"#),
    )
    .await;

    assert_eq!(error_code(&response), Some("ERR_NO_DATA"));
}

#[serial]
#[tokio::test]
#[ignore = "requires a dev postgres database"]
async fn test_serial_delete_post_not_writer() {
    let (global, _handler) = mock_global_state(Default::default()).await;

    let writer = create_user(&global, "writer@example.com").await;
    let other = create_user(&global, "other@example.com").await;

    let post = Post::create(&global.db, writer.id, "Title", "Body", vec![])
        .await
        .expect("failed to create post");

    let request_context = RequestContext::default();
    request_context.set_auth(AuthData { user: other }).await;

    let id = ulid::Ulid::from(post.id);

    let response = run_query(
        &global,
        &request_context,
        &format!(r#"mutation {{ post {{ delete(input: {{ id: "{id}" }}) }} }}"#),
    )
    .await;

    assert_eq!(error_code(&response), Some("ERR_NOT_WRITER"));

    assert!(Post::find_by_id(&global.db, post.id).await.is_ok());
}

#[serial]
#[tokio::test]
#[ignore = "requires a dev postgres database"]
async fn test_serial_post_list_pagination() {
    let (global, _handler) = mock_global_state(Default::default()).await;

    let user = create_user(&global, "writer@example.com").await;

    for i in 0..5 {
        Post::create(&global.db, user.id, &format!("Post {i}"), "Body", vec![])
            .await
            .expect("failed to create post");
    }

    let response = run_query(
        &global,
        &RequestContext::default(),
        r#"query { post { list(pageNumber: 1, limit: 2) { title } } }"#,
    )
    .await;

    assert!(response["errors"].is_null(), "{:?}", response["errors"]);
    let titles = response["data"]["post"]["list"]
        .as_array()
        .expect("expected a list");
    assert_eq!(titles.len(), 2);
    // Newest first.
    assert_eq!(titles[0]["title"], "Post 4");
    assert_eq!(titles[1]["title"], "Post 3");

    // A page past the end is empty, not an error.
    let response = run_query(
        &global,
        &RequestContext::default(),
        r#"query { post { list(pageNumber: 4, limit: 2) { title } } }"#,
    )
    .await;

    assert!(response["errors"].is_null(), "{:?}", response["errors"]);
    assert_eq!(
        response["data"]["post"]["list"]
            .as_array()
            .expect("expected a list")
            .len(),
        0
    );

    // Page 0 is rejected.
    let response = run_query(
        &global,
        &RequestContext::default(),
        r#"query { post { list(pageNumber: 0, limit: 2) { title } } }"#,
    )
    .await;

    assert_eq!(error_code(&response), Some("ERR_INVALID_PAGE"));
}

#[serial]
#[tokio::test]
#[ignore = "requires a dev postgres database"]
async fn test_serial_post_writer_and_post_list() {
    let (global, _handler) = mock_global_state(Default::default()).await;

    let user = create_user(&global, "writer@example.com").await;
    let post = Post::create(&global.db, user.id, "Title", "Body", vec![])
        .await
        .expect("failed to create post");

    let id = ulid::Ulid::from(post.id);

    let response = run_query(
        &global,
        &RequestContext::default(),
        &format!(r#"query {{ post {{ byId(id: "{id}") {{ writer {{ name postList {{ title }} }} }} }} }}"#),
    )
    .await;

    assert!(response["errors"].is_null(), "{:?}", response["errors"]);
    let writer = &response["data"]["post"]["byId"]["writer"];
    assert_eq!(writer["name"], "Writer");
    assert_eq!(writer["postList"][0]["title"], "Title");
}
