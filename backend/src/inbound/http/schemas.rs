//! OpenAPI schema definitions for domain types.
//!
//! Domain types stay framework agnostic and do not derive `ToSchema`. The
//! wrappers here mirror their shape for documentation only.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Authentication failed or is missing.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// Authenticated but not permitted to perform this action.
    #[schema(rename = "forbidden")]
    Forbidden,
    /// The requested resource does not exist for this user.
    #[schema(rename = "not_found")]
    NotFound,
    /// The write lost a race with a concurrent change, or the resource exists.
    #[schema(rename = "conflict")]
    Conflict,
    /// A backing store is unreachable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "cannot divide by zero")]
    message: String,
    /// Correlation identifier, echoed in the `trace-id` header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary details; `details.code` carries the specific failure.
    #[schema(example = json!({ "code": "division_by_zero" }))]
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::OperationKind`].
#[derive(ToSchema)]
#[schema(as = crate::domain::OperationKind)]
pub enum OperationKindSchema {
    #[schema(rename = "addition")]
    Addition,
    #[schema(rename = "subtraction")]
    Subtraction,
    #[schema(rename = "multiplication")]
    Multiplication,
    #[schema(rename = "division")]
    Division,
}

/// OpenAPI schema for [`crate::domain::Calculation`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Calculation)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct CalculationSchema {
    #[schema(value_type = String, format = Uuid)]
    id: String,
    /// Owner of the record; always the authenticated user.
    #[schema(value_type = String, format = Uuid)]
    owner_id: String,
    operation_kind: OperationKindSchema,
    /// Exactly two finite operands.
    #[schema(min_items = 2, max_items = 2, example = json!([3.0, 4.0]))]
    inputs: Vec<f64>,
    /// Derived from `operationKind` and `inputs`.
    #[schema(example = 7.0)]
    result: f64,
    /// Incremented on every successful update.
    #[schema(example = 1)]
    revision: u32,
    #[schema(value_type = String, format = DateTime)]
    created_at: String,
    #[schema(value_type = String, format = DateTime)]
    updated_at: String,
}
