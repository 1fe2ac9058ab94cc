use chrono::Utc;
use serial_test::serial;

use crate::api::jwt::AuthJwtPayload;
use crate::api::request_context::RequestContext;
use crate::database::User;
use crate::tests::api::v1::gql::{error_code, run_query};
use crate::tests::global::mock_global_state;

#[serial]
#[tokio::test]
#[ignore = "requires a dev postgres database"]
async fn test_serial_login() {
    let (global, _handler) = mock_global_state(Default::default()).await;

    let user = User::create(
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
        r#"mutation { auth { login(email: "alex@example.com", password: "Hunter22!") { token userId } } }"#,
    )
    .await;

    assert!(response["errors"].is_null(), "{:?}", response["errors"]);

    let token = response["data"]["auth"]["login"]["token"]
        .as_str()
        .expect("missing token");

    let payload =
        AuthJwtPayload::verify(&global.config.jwt, token).expect("token failed to verify");

    assert_eq!(payload.user_id, user.id);
    assert_eq!(payload.email, "alex@example.com");
}

#[serial]
#[tokio::test]
#[ignore = "requires a dev postgres database"]
async fn test_serial_login_wrong_password() {
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
        r#"mutation { auth { login(email: "alex@example.com", password: "wrong") { token } } }"#,
    )
    .await;

    assert_eq!(error_code(&response), Some("INVALID_INPUT"));
}

#[serial]
#[tokio::test]
#[ignore = "requires a dev postgres database"]
async fn test_serial_login_unknown_email() {
    let (global, _handler) = mock_global_state(Default::default()).await;

    let response = run_query(
        &global,
        &RequestContext::default(),
        r#"mutation { auth { login(email: "nobody@example.com", password: "Hunter22!") { token } } }"#,
    )
    .await;

    assert_eq!(error_code(&response), Some("NO_USER"));
}

#[serial]
#[tokio::test]
#[ignore = "requires a dev postgres database"]
async fn test_serial_login_deleted_user() {
    let (global, _handler) = mock_global_state(Default::default()).await;

    let user = User::create(
        &global.db,
        "Alex",
        "alex@example.com",
        &User::hash_password("Hunter22!"),
    )
    .await
    .expect("failed to create user");

    sqlx::query("UPDATE users SET deleted_at = $1 WHERE id = $2")
        .bind(Utc::now())
        .bind(user.id)
        .execute(global.db.as_ref())
        .await
        .expect("failed to soft-delete user");

    let response = run_query(
        &global,
        &RequestContext::default(),
        r#"mutation { auth { login(email: "alex@example.com", password: "Hunter22!") { token } } }"#,
    )
    .await;

    assert_eq!(error_code(&response), Some("ERR_DELETED_USER"));
}
