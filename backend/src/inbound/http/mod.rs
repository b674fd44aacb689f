//! HTTP inbound adapter exposing REST endpoints.

use actix_web::web;
use serde_json::json;
use tracing::debug;

use crate::domain::Error;

pub mod calculations;
pub mod error;
pub mod health;
pub mod schemas;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

pub use error::ApiResult;

/// JSON extractor settings rendering body errors as the domain envelope.
///
/// Unknown fields, missing fields and type mismatches all become
/// `400 invalid_request` with `details.code = "invalid_body"`.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        debug!(error = %err, "rejected request body");
        Error::invalid_request(err.to_string())
            .with_details(json!({ "code": "invalid_body" }))
            .into()
    })
}

/// Register the `/api/v1` routes on a scope or app.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(users::register)
        .service(users::login)
        .service(users::logout)
        .service(calculations::list_calculations)
        .service(calculations::create_calculation)
        .service(calculations::get_calculation)
        .service(calculations::update_calculation)
        .service(calculations::delete_calculation);
}
