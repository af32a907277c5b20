//! HTTP adapter mapping for domain errors.
//!
//! The domain error stays transport agnostic; this module turns it into the
//! registry's status codes and the JSON error body.

use actix_web::{HttpRequest, HttpResponse, ResponseError, error::JsonPayloadError, http::StatusCode};
use tracing::{error, warn};

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Status used for absent required fields.
pub const MISSING_FIELD_STATUS: u16 = 950;
/// Status used for type, length, and range violations.
pub const VALIDATION_FAILURE_STATUS: u16 = 600;

fn non_standard(code: u16) -> StatusCode {
    StatusCode::from_u16(code).unwrap_or(StatusCode::BAD_REQUEST)
}

pub(crate) fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::MissingField => non_standard(MISSING_FIELD_STATUS),
        ErrorCode::InvalidRequest => non_standard(VALIDATION_FAILURE_STATUS),
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        if self.code() == ErrorCode::InternalError {
            error!(message = self.message(), trace_id = self.trace_id(), "request failed");
        }
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        builder.json(self)
    }
}

/// Reject bodies that are not valid JSON as validation failures.
pub(crate) fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    warn!(error = %err, "rejected request body");
    Error::invalid_request(format!("request body must be valid JSON: {err}")).into()
}
