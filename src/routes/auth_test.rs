use super::*;
use crate::state::test_helpers;

// =========================================================================
// env_bool
// =========================================================================

/// # Safety
/// Tests must run with `--test-threads=1` to avoid env races.
#[test]
fn env_bool_parses_common_spellings() {
    unsafe { std::env::set_var("AUTH_TEST_FLAG", "on") };
    assert_eq!(env_bool("AUTH_TEST_FLAG"), Some(true));

    unsafe { std::env::set_var("AUTH_TEST_FLAG", "FALSE") };
    assert_eq!(env_bool("AUTH_TEST_FLAG"), Some(false));

    unsafe { std::env::set_var("AUTH_TEST_FLAG", "maybe") };
    assert_eq!(env_bool("AUTH_TEST_FLAG"), None);

    unsafe { std::env::remove_var("AUTH_TEST_FLAG") };
    assert_eq!(env_bool("AUTH_TEST_FLAG"), None);
}

// =========================================================================
// login validation
// =========================================================================

#[tokio::test]
async fn login_rejects_blank_username() {
    let state = test_helpers::test_app_state();
    let body = LoginBody { username: "   ".into(), password: "secret".into() };

    let err = login(axum::extract::State(state), CookieJar::new(), Json(body))
        .await
        .err()
        .expect("blank username must be rejected");
    assert_eq!(err.0, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(err.1["error"], "demo login requires a username and password");
}

#[tokio::test]
async fn login_rejects_blank_password() {
    let state = test_helpers::test_app_state();
    let body = LoginBody { username: "demo".into(), password: "".into() };

    let err = login(axum::extract::State(state), CookieJar::new(), Json(body))
        .await
        .err()
        .expect("blank password must be rejected");
    assert_eq!(err.0, StatusCode::UNPROCESSABLE_ENTITY);
}

// =========================================================================
// Live DB
// =========================================================================

#[cfg(feature = "live-db-tests")]
#[tokio::test]
async fn login_sets_session_cookie() {
    let state = crate::state::test_helpers::live_app_state().await;
    let body = LoginBody { username: "demo".into(), password: "secret".into() };

    let (jar, Json(me)) = login(axum::extract::State(state.clone()), CookieJar::new(), Json(body))
        .await
        .unwrap();
    assert_eq!(me.username, "demo");

    let cookie = jar.get(COOKIE_NAME).expect("session cookie set");
    let username = crate::services::session::validate_demo_session(&state.pool, cookie.value())
        .await
        .unwrap();
    assert_eq!(username.as_deref(), Some("demo"));
}
