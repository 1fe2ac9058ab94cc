use serial_test::serial;

use crate::api::auth::AuthData;
use crate::api::request_context::RequestContext;
use crate::database::User;
use crate::tests::api::v1::gql::{error_code, run_query};
use crate::tests::global::mock_global_state;

#[serial]
#[tokio::test]
#[ignore = "requires a dev postgres database"]
async fn test_serial_create_user() {
    let (global, _handler) = mock_global_state(Default::default()).await;

    let response = run_query(
        &global,
        &RequestContext::default(),
        r#"mutation { user { create(name: "Alex", email: "alex@example.com", password: "Hunter22!") { id name } } }"#,
    )
    .await;

    assert!(response["errors"].is_null(), "{:?}", response["errors"]);
    assert_eq!(response["data"]["user"]["create"]["name"], "Alex");

    let user = User::find_by_option(
        &global.db,
        crate::database::UserSelector {
            email: Some("alex@example.com".to_string()),
            ..Default::default()
        },
    )
    .await
    .expect("user should exist");

    assert!(user.verify_password("Hunter22!"));
    assert!(user.deleted_at.is_none());
}

#[serial]
#[tokio::test]
#[ignore = "requires a dev postgres database"]
async fn test_serial_create_user_duplicate_email() {
    let (global, _handler) = mock_global_state(Default::default()).await;

    User::create(
        &global.db,
        "Alex",
        "alex@example.com",
        &User::hash_password("Hunter22!"),
    )
    .await
    .expect("failed to create user");

    let response = run_query(
        &global,
        &RequestContext::default(),
        r#"mutation { user { create(name: "Other", email: "alex@example.com", password: "Hunter22!") { id } } }"#,
    )
    .await;

    assert_eq!(error_code(&response), Some("ERR_DUPLICATION_EMAIL"));
}

#[serial]
#[tokio::test]
#[ignore = "requires a dev postgres database"]
async fn test_serial_create_user_weak_password() {
    let (global, _handler) = mock_global_state(Default::default()).await;

    let response = run_query(
        &global,
        &RequestContext::default(),
        r#"mutation { user { create(name: "Alex", email: "alex@example.com", password: "weak") { id } } }"#,
    )
    .await;

    assert_eq!(error_code(&response), Some("INVALID_INPUT"));
}

#[serial]
#[tokio::test]
#[ignore = "requires a dev postgres database"]
async fn test_serial_user_by_id() {
    let (global, _handler) = mock_global_state(Default::default()).await;

    let user = User::create(
        &global.db,
        "Alex",
        "alex@example.com",
        &User::hash_password("Hunter22!"),
    )
    .await
    .expect("failed to create user");

    let id = ulid::Ulid::from(user.id);

    let response = run_query(
        &global,
        &RequestContext::default(),
        &format!(r#"query {{ user {{ byId(id: "{id}") {{ id name }} }} }}"#),
    )
    .await;

    assert!(response["errors"].is_null(), "{:?}", response["errors"]);
    assert_eq!(response["data"]["user"]["byId"]["name"], "Alex");
    assert_eq!(response["data"]["user"]["byId"]["id"], id.to_string());
}

#[serial]
#[tokio::test]
#[ignore = "requires a dev postgres database"]
async fn test_serial_email_is_guarded() {
    let (global, _handler) = mock_global_state(Default::default()).await;

    let alex = User::create(
        &global.db,
        "Alex",
        "alex@example.com",
        &User::hash_password("Hunter22!"),
    )
    .await
    .expect("failed to create user");

    let sam = User::create(
        &global.db,
        "Sam",
        "sam@example.com",
        &User::hash_password("Hunter22!"),
    )
    .await
    .expect("failed to create user");

    let id = ulid::Ulid::from(alex.id);
    let query = format!(r#"query {{ user {{ byId(id: "{id}") {{ email }} }} }}"#);

    // Anonymous requests cannot read the email.
    let response = run_query(&global, &RequestContext::default(), &query).await;
    assert_eq!(error_code(&response), Some("UNAUTHORIZED"));

    // Neither can other users.
    let request_context = RequestContext::default();
    request_context.set_auth(AuthData { user: sam }).await;
    let response = run_query(&global, &request_context, &query).await;
    assert_eq!(error_code(&response), Some("UNAUTHORIZED"));

    // The owner can.
    let request_context = RequestContext::default();
    request_context.set_auth(AuthData { user: alex }).await;
    let response = run_query(&global, &request_context, &query).await;
    assert!(response["errors"].is_null(), "{:?}", response["errors"]);
    assert_eq!(
        response["data"]["user"]["byId"]["email"],
        "alex@example.com"
    );
}

#[serial]
#[tokio::test]
#[ignore = "requires a dev postgres database"]
async fn test_serial_with_current_context() {
    let (global, _handler) = mock_global_state(Default::default()).await;

    let user = User::create(
        &global.db,
        "Alex",
        "alex@example.com",
        &User::hash_password("Hunter22!"),
    )
    .await
    .expect("failed to create user");

    let request_context = RequestContext::default();
    request_context.set_auth(AuthData { user }).await;

    let response = run_query(
        &global,
        &request_context,
        r#"query { user { withCurrentContext { name email } } }"#,
    )
    .await;

    assert!(response["errors"].is_null(), "{:?}", response["errors"]);
    assert_eq!(
        response["data"]["user"]["withCurrentContext"]["email"],
        "alex@example.com"
    );

    // Without auth the same query fails.
    let response = run_query(
        &global,
        &RequestContext::default(),
        r#"query { user { withCurrentContext { name } } }"#,
    )
    .await;

    assert!(!response["errors"].is_null());
}
