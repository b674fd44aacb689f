//! Tests for account API handlers.

use super::*;
use crate::domain::ports::{
    MockAccountRegistration, MockCalculationCommand, MockCalculationQuery, MockLoginService,
};
use crate::domain::{PasswordDigest, UserId};
use crate::inbound::http::test_utils::{session_cookie, test_session_middleware};
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test};
use rstest::rstest;
use serde_json::Value;
use std::sync::Arc;

const USER_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

fn state(registration: MockAccountRegistration, login_service: MockLoginService) -> HttpState {
    HttpState::new(
        Arc::new(login_service),
        Arc::new(registration),
        Arc::new(MockCalculationCommand::new()),
        Arc::new(MockCalculationQuery::new()),
    )
}

fn test_app(
    state: HttpState,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .wrap(test_session_middleware())
        .service(
            web::scope("/api/v1")
                .service(register)
                .service(login)
                .service(logout),
        )
}

fn account() -> Account {
    Account {
        id: UserId::new(USER_ID).expect("fixture id"),
        username: "ada".into(),
        email: "ada@example.com".into(),
        first_name: "Ada".into(),
        last_name: "Lovelace".into(),
        password_digest: PasswordDigest::derive("Analytical1!"),
        created_at: Utc::now(),
    }
}

fn register_body() -> Value {
    json!({
        "username": "ada",
        "email": "ada@example.com",
        "firstName": "Ada",
        "lastName": "Lovelace",
        "password": "Analytical1!",
        "confirmPassword": "Analytical1!"
    })
}

fn no_login() -> MockLoginService {
    let mut login_service = MockLoginService::new();
    login_service.expect_authenticate().never();
    login_service
}

#[actix_web::test]
async fn register_returns_created_account_without_digest() {
    let mut registration = MockAccountRegistration::new();
    registration
        .expect_register()
        .withf(|form| {
            form.username == "ada"
                && form.first_name == "Ada"
                && form.confirm_password.as_deref().map(String::as_str) == Some("Analytical1!")
        })
        .times(1)
        .returning(|_| Ok(account()));
    let app = actix_test::init_service(test_app(state(registration, no_login()))).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/register")
            .set_json(register_body())
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["id"], USER_ID);
    assert_eq!(body["firstName"], "Ada");
    assert_eq!(body["lastName"], "Lovelace");
    assert!(body.get("passwordDigest").is_none());
    assert!(body.get("password").is_none());
}

#[actix_web::test]
async fn register_passes_domain_errors_through() {
    let mut registration = MockAccountRegistration::new();
    registration.expect_register().returning(|_| {
        Err(Error::conflict("an account with this username already exists")
            .with_details(json!({ "code": "duplicate_account", "field": "username" })))
    });
    let app = actix_test::init_service(test_app(state(registration, no_login()))).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/register")
            .set_json(register_body())
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::CONFLICT);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["code"], "conflict");
    assert_eq!(body["details"]["field"], "username");
}

#[rstest]
#[case::blank_username("   ", "password", "username must not be empty", "username", "empty_username")]
#[case::blank_password("ada", "", "password must not be empty", "password", "empty_password")]
#[case::short_username(
    "jd",
    "SecurePass123",
    "username must be at least 3 characters long",
    "username",
    "too_short"
)]
#[case::short_password(
    "johndoe",
    "short",
    "password must be at least 8 characters long",
    "password",
    "too_short"
)]
#[actix_web::test]
async fn login_rejects_malformed_fields(
    #[case] username: &str,
    #[case] password: &str,
    #[case] message: &str,
    #[case] field: &str,
    #[case] code: &str,
) {
    let app =
        actix_test::init_service(test_app(state(MockAccountRegistration::new(), no_login()))).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(&LoginRequest {
                username: username.into(),
                password: password.into(),
            })
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["message"], message);
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["details"]["field"], field);
    assert_eq!(body["details"]["code"], code);
}

#[actix_web::test]
async fn login_rejects_wrong_credentials_with_unauthorised_status() {
    let mut login_service = MockLoginService::new();
    login_service
        .expect_authenticate()
        .returning(|_| Err(Error::unauthorized("invalid credentials")));
    let app =
        actix_test::init_service(test_app(state(MockAccountRegistration::new(), login_service))).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(&LoginRequest {
                username: "ada".into(),
                password: "wrong".into(),
            })
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["message"], "invalid credentials");
    assert_eq!(body["code"], "unauthorized");
}

#[actix_web::test]
async fn login_sets_session_cookie_and_logout_clears_it() {
    let mut login_service = MockLoginService::new();
    login_service
        .expect_authenticate()
        .withf(|creds| creds.username() == "ada" && creds.password() == "Analytical1!")
        .returning(|_| Ok(UserId::new(USER_ID).expect("fixture id")));
    let app =
        actix_test::init_service(test_app(state(MockAccountRegistration::new(), login_service))).await;

    let login_res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(&LoginRequest {
                username: " ada ".into(),
                password: "Analytical1!".into(),
            })
            .to_request(),
    )
    .await;
    assert_eq!(login_res.status(), StatusCode::OK);
    let cookie = session_cookie(&login_res);
    assert!(!cookie.value().is_empty());

    let logout_res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/logout")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(logout_res.status(), StatusCode::NO_CONTENT);
    assert_eq!(session_cookie(&logout_res).value(), "");
}

#[actix_web::test]
async fn logout_without_session_still_succeeds() {
    let app =
        actix_test::init_service(test_app(state(MockAccountRegistration::new(), no_login()))).await;
    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/logout")
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
}
