//! Shared helpers for HTTP integration tests.
//!
//! Apps are assembled with the production [`build_app`] over in-memory
//! repositories, so requests pass through the same session, trace and JSON
//! configuration as a deployed server.

#![allow(dead_code, unused_macros)]

use actix_web::cookie::{Key, SameSite};
use actix_web::web;
use calculations::inbound::http::health::HealthState;
use calculations::server::{AppDependencies, in_memory_http_state};
use serde_json::{Value, json};

/// Dependencies for a fresh app with its own stores and signing key.
pub fn app_dependencies() -> AppDependencies {
    AppDependencies {
        health_state: web::Data::new(HealthState::new()),
        http_state: web::Data::new(in_memory_http_state()),
        key: Key::generate(),
        cookie_secure: false,
        same_site: SameSite::Lax,
    }
}

pub const PASSWORD: &str = "Analytical1!";

/// Registration body for `username` satisfying every credential rule.
pub fn registration(username: &str) -> Value {
    json!({
        "username": username,
        "email": format!("{username}@example.com"),
        "firstName": "Ada",
        "lastName": "Lovelace",
        "password": PASSWORD,
        "confirmPassword": PASSWORD
    })
}

/// Send a request built from a `TestRequest` and return the response.
macro_rules! send {
    ($app:expr, $req:expr) => {
        actix_web::test::call_service(&$app, $req.to_request()).await
    };
}

/// Register `username` and log in, yielding the session cookie.
macro_rules! sign_up {
    ($app:expr, $username:expr) => {{
        let res = send!(
            $app,
            actix_web::test::TestRequest::post()
                .uri("/api/v1/register")
                .set_json(support::registration($username))
        );
        assert_eq!(res.status(), actix_web::http::StatusCode::CREATED);
        let res = send!(
            $app,
            actix_web::test::TestRequest::post()
                .uri("/api/v1/login")
                .set_json(serde_json::json!({
                    "username": $username,
                    "password": support::PASSWORD
                }))
        );
        assert_eq!(res.status(), actix_web::http::StatusCode::OK);
        res.response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .map(|cookie| cookie.into_owned())
            .expect("session cookie")
    }};
}

pub(crate) use {send, sign_up};
