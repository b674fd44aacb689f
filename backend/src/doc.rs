//! OpenAPI documentation for the REST API.
//!
//! [`ApiDoc`] registers every handler under `inbound::http` together with the
//! schema wrappers from [`crate::inbound::http::schemas`]. Swagger UI serves it
//! in debug builds and `cargo run --bin openapi-dump` prints it.

use crate::inbound::http::calculations::{CreateCalculationPayload, UpdateCalculationPayload};
use crate::inbound::http::schemas::{
    CalculationSchema, ErrorCodeSchema, ErrorSchema, OperationKindSchema,
};
use crate::inbound::http::users::{AccountResponse, LoginRequest, RegisterRequest};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Adds the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Calculations API",
        description = "Per-user arithmetic calculations behind session authentication."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::register,
        crate::inbound::http::users::login,
        crate::inbound::http::users::logout,
        crate::inbound::http::calculations::list_calculations,
        crate::inbound::http::calculations::create_calculation,
        crate::inbound::http::calculations::get_calculation,
        crate::inbound::http::calculations::update_calculation,
        crate::inbound::http::calculations::delete_calculation,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        CalculationSchema,
        OperationKindSchema,
        CreateCalculationPayload,
        UpdateCalculationPayload,
        RegisterRequest,
        LoginRequest,
        AccountResponse
    )),
    tags(
        (name = "accounts", description = "Registration and sessions"),
        (name = "calculations", description = "Owner-scoped calculation records"),
        (name = "health", description = "Liveness and readiness probes")
    )
)]
pub struct ApiDoc;
