//! Shared validation helpers for inbound HTTP adapters.

use serde_json::json;

use crate::domain::{CalculationId, Error};

/// Validation error codes for malformed request parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    InvalidUuid,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidUuid => "invalid_uuid",
        }
    }
}

/// Newtype wrapper for request field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &'static str {
        self.0
    }
}

pub(crate) fn invalid_uuid_error(field: FieldName, value: &str) -> Error {
    let field = field.as_str();
    Error::invalid_request(format!("{field} must be a valid UUID")).with_details(json!({
        "field": field,
        "value": value,
        "code": ErrorCode::InvalidUuid.as_str(),
    }))
}

/// Parse a calculation id taken from the request path.
pub(crate) fn parse_calculation_id(value: &str, field: FieldName) -> Result<CalculationId, Error> {
    value
        .parse()
        .map_err(|_| invalid_uuid_error(field, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const ID: FieldName = FieldName::new("id");

    #[rstest]
    fn accepts_canonical_uuid() {
        let id = parse_calculation_id("3fa85f64-5717-4562-b3fc-2c963f66afa6", ID).expect("uuid");
        assert_eq!(id.to_string(), "3fa85f64-5717-4562-b3fc-2c963f66afa6");
    }

    #[rstest]
    #[case("42")]
    #[case("not-a-uuid")]
    #[case("")]
    fn rejects_malformed_ids_with_details(#[case] raw: &str) {
        let err = parse_calculation_id(raw, ID).expect_err("malformed");
        assert_eq!(err.message(), "id must be a valid UUID");
        assert_eq!(err.detail_code(), Some("invalid_uuid"));
        let details = err.details().expect("details");
        assert_eq!(details["field"], "id");
        assert_eq!(details["value"], raw);
    }
}
