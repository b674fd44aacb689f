//! Registration, login, logout and health probes over HTTP.

use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use calculations::server::build_app;
use rstest::rstest;
use serde_json::{Value, json};

mod support;

use support::{app_dependencies, registration, send, sign_up};

#[actix_web::test]
async fn registration_returns_the_public_account() {
    let app = test::init_service(build_app(app_dependencies())).await;

    let res = send!(
        app,
        TestRequest::post()
            .uri("/api/v1/register")
            .set_json(registration("ada"))
    );
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["username"], "ada");
    assert_eq!(body["email"], "ada@example.com");
    assert_eq!(body["firstName"], "Ada");
    assert!(body["id"].is_string());
    assert!(body.get("password").is_none());
    assert!(body.get("passwordDigest").is_none());
}

#[rstest]
#[case::no_uppercase("alllowercase1!", "Password must contain at least one uppercase letter")]
#[case::no_lowercase("ALLUPPERCASE1!", "Password must contain at least one lowercase letter")]
#[case::no_digit("NoDigitsHere!", "Password must contain at least one digit")]
#[case::no_special("NoSpecial123", "Password must contain at least one special character")]
#[case::too_short("Sh1!", "Password must be at least 8 characters long")]
#[actix_web::test]
async fn weak_passwords_are_rejected(#[case] password: &str, #[case] message: &str) {
    let app = test::init_service(build_app(app_dependencies())).await;
    let mut body = registration("ada");
    body["password"] = json!(password);
    body["confirmPassword"] = json!(password);

    let res = send!(
        app,
        TestRequest::post().uri("/api/v1/register").set_json(body)
    );
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["details"]["code"], "validation_failed");
    let messages: Vec<&str> = body["details"]["violations"]
        .as_array()
        .expect("violations")
        .iter()
        .filter_map(|violation| violation["message"].as_str())
        .collect();
    assert!(messages.contains(&message), "{messages:?}");
}

#[actix_web::test]
async fn mismatched_confirmation_is_rejected() {
    let app = test::init_service(build_app(app_dependencies())).await;
    let mut body = registration("ada");
    body["confirmPassword"] = json!("Different1!");

    let res = send!(
        app,
        TestRequest::post().uri("/api/v1/register").set_json(body)
    );
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["details"]["violations"][0]["field"], "confirmPassword");
    assert_eq!(body["details"]["violations"][0]["message"], "Passwords do not match");
}

#[rstest]
#[case::same_username(json!({ "email": "other@example.com" }), "username")]
#[case::same_email(json!({ "username": "grace" }), "email")]
#[actix_web::test]
async fn duplicate_accounts_conflict(#[case] overrides: Value, #[case] field: &str) {
    let app = test::init_service(build_app(app_dependencies())).await;
    let res = send!(
        app,
        TestRequest::post()
            .uri("/api/v1/register")
            .set_json(registration("ada"))
    );
    assert_eq!(res.status(), StatusCode::CREATED);

    let mut body = registration("ada");
    for (key, value) in overrides.as_object().expect("object") {
        body[key] = value.clone();
    }
    let res = send!(
        app,
        TestRequest::post().uri("/api/v1/register").set_json(body)
    );
    assert_eq!(res.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["details"]["code"], "duplicate_account");
    assert_eq!(body["details"]["field"], field);
}

#[rstest]
#[case::wrong_password("ada", "Wrong-password1")]
#[case::unknown_user("nobody", "Analytical1!")]
#[actix_web::test]
async fn bad_credentials_are_unauthorised(#[case] username: &str, #[case] password: &str) {
    let app = test::init_service(build_app(app_dependencies())).await;
    let res = send!(
        app,
        TestRequest::post()
            .uri("/api/v1/register")
            .set_json(registration("ada"))
    );
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = send!(
        app,
        TestRequest::post()
            .uri("/api/v1/login")
            .set_json(json!({ "username": username, "password": password }))
    );
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert!(res.response().cookies().all(|cookie| cookie.name() != "session"));
}

#[actix_web::test]
async fn logout_clears_the_session_cookie() {
    let app = test::init_service(build_app(app_dependencies())).await;
    let cookie = sign_up!(app, "ada");

    let res = send!(
        app,
        TestRequest::get()
            .uri("/api/v1/calculations")
            .cookie(cookie.clone())
    );
    assert_eq!(res.status(), StatusCode::OK);

    let res = send!(
        app,
        TestRequest::post().uri("/api/v1/logout").cookie(cookie)
    );
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    let cleared = res
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("removal cookie");
    assert_eq!(cleared.value(), "");
}

#[actix_web::test]
async fn readiness_follows_health_state() {
    let deps = app_dependencies();
    let health = deps.health_state.clone();
    let app = test::init_service(build_app(deps)).await;

    let res = send!(app, TestRequest::get().uri("/health/ready"));
    assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    let res = send!(app, TestRequest::get().uri("/health/live"));
    assert_eq!(res.status(), StatusCode::OK);

    health.mark_ready();
    let res = send!(app, TestRequest::get().uri("/health/ready"));
    assert_eq!(res.status(), StatusCode::OK);
}
