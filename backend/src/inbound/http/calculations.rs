//! Calculation API handlers.
//!
//! ```text
//! GET    /api/v1/calculations
//! POST   /api/v1/calculations {"operationKind":"addition","inputs":[2,3]}
//! GET    /api/v1/calculations/{id}
//! PUT    /api/v1/calculations/{id} {"inputs":[5,6]}
//! PATCH  /api/v1/calculations/{id} {"operationKind":"division"}
//! DELETE /api/v1/calculations/{id}
//! ```
//!
//! Every handler reads the owner from the session; a missing session is `401`.

use actix_web::{HttpResponse, delete, get, post, route, web};
use serde::{Deserialize, Serialize};

use crate::domain::ports::CreateCalculationRequest;
use crate::domain::{Calculation, CalculationChanges, CalculationId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{CalculationSchema, ErrorSchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_calculation_id};

const ID_FIELD: FieldName = FieldName::new("id");

/// Body for `POST /api/v1/calculations`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateCalculationPayload {
    /// One of `addition`, `subtraction`, `multiplication`, `division`.
    #[schema(example = "addition")]
    pub operation_kind: String,
    /// Exactly two finite numbers.
    #[schema(example = json!([2.0, 3.0]))]
    pub inputs: Vec<f64>,
}

impl From<CreateCalculationPayload> for CreateCalculationRequest {
    fn from(value: CreateCalculationPayload) -> Self {
        Self {
            operation_kind: value.operation_kind,
            inputs: value.inputs,
        }
    }
}

/// Body for `PUT`/`PATCH /api/v1/calculations/{id}`.
///
/// Absent fields keep their stored value. `result` is not accepted.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateCalculationPayload {
    #[serde(default)]
    pub operation_kind: Option<String>,
    #[serde(default)]
    pub inputs: Option<Vec<f64>>,
}

impl From<UpdateCalculationPayload> for CalculationChanges {
    fn from(value: UpdateCalculationPayload) -> Self {
        Self {
            operation_kind: value.operation_kind,
            inputs: value.inputs,
        }
    }
}

/// List the caller's calculations in creation order.
#[utoipa::path(
    get,
    path = "/api/v1/calculations",
    responses(
        (status = 200, description = "Calculations owned by the caller", body = [CalculationSchema]),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["calculations"],
    operation_id = "listCalculations"
)]
#[get("/calculations")]
pub async fn list_calculations(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<Calculation>>> {
    let owner = session.require_user_id()?;
    let calculations = state.calculations_query.list(&owner).await?;
    Ok(web::Json(calculations))
}

/// Compute and store a calculation.
#[utoipa::path(
    post,
    path = "/api/v1/calculations",
    request_body = CreateCalculationPayload,
    responses(
        (status = 201, description = "Calculation created", body = CalculationSchema),
        (status = 400, description = "Invalid input, unknown operation or division by zero", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["calculations"],
    operation_id = "createCalculation"
)]
#[post("/calculations")]
pub async fn create_calculation(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateCalculationPayload>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let created = state
        .calculations
        .create(&owner, payload.into_inner().into())
        .await?;
    Ok(HttpResponse::Created().json(created))
}

/// Fetch one of the caller's calculations.
#[utoipa::path(
    get,
    path = "/api/v1/calculations/{id}",
    params(("id" = String, Path, description = "Calculation identifier")),
    responses(
        (status = 200, description = "Calculation", body = CalculationSchema),
        (status = 400, description = "Malformed identifier", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["calculations"],
    operation_id = "getCalculation"
)]
#[get("/calculations/{id}")]
pub async fn get_calculation(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<Calculation>> {
    let owner = session.require_user_id()?;
    let id = parse_calculation_id(&path, ID_FIELD)?;
    let calculation = state.calculations_query.get(&owner, &id).await?;
    Ok(web::Json(calculation))
}

/// Apply a partial change and recompute the result.
///
/// `PUT` and `PATCH` behave identically.
#[utoipa::path(
    method(put, patch),
    path = "/api/v1/calculations/{id}",
    params(("id" = String, Path, description = "Calculation identifier")),
    request_body = UpdateCalculationPayload,
    responses(
        (status = 200, description = "Updated calculation", body = CalculationSchema),
        (status = 400, description = "Invalid input, invalid operation or division by zero", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 409, description = "Concurrent update won the race", body = ErrorSchema)
    ),
    tags = ["calculations"],
    operation_id = "updateCalculation"
)]
#[route("/calculations/{id}", method = "PUT", method = "PATCH")]
pub async fn update_calculation(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<UpdateCalculationPayload>,
) -> ApiResult<web::Json<Calculation>> {
    let owner = session.require_user_id()?;
    let id: CalculationId = parse_calculation_id(&path, ID_FIELD)?;
    let updated = state
        .calculations
        .update(&owner, &id, payload.into_inner().into())
        .await?;
    Ok(web::Json(updated))
}

/// Delete one of the caller's calculations.
#[utoipa::path(
    delete,
    path = "/api/v1/calculations/{id}",
    params(("id" = String, Path, description = "Calculation identifier")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 400, description = "Malformed identifier", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["calculations"],
    operation_id = "deleteCalculation"
)]
#[delete("/calculations/{id}")]
pub async fn delete_calculation(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let id = parse_calculation_id(&path, ID_FIELD)?;
    state.calculations.delete(&owner, &id).await?;
    Ok(HttpResponse::NoContent().finish())
}
