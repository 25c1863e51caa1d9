//! Maps domain `AppError` to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use docuflow_core::error::{AppError, ErrorKind};
use docuflow_core::types::response::ApiResponse;

/// Wrapper so `AppError` can be returned straight from handlers.
///
/// Failures use the same envelope as successes: `success = false`, a
/// machine-readable `error` code, and the server-supplied `message` the
/// client surfaces to the user. A 401 additionally tells the client to
/// clear its token stores.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let (status, error_code) = match err.kind {
            ErrorKind::Validation => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            ErrorKind::Authentication | ErrorKind::Session => {
                (StatusCode::UNAUTHORIZED, "UNAUTHENTICATED")
            }
            ErrorKind::Authorization => (StatusCode::FORBIDDEN, "FORBIDDEN"),
            ErrorKind::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ErrorKind::Conflict => (StatusCode::CONFLICT, "CONFLICT"),
            ErrorKind::ServiceUnavailable => {
                (StatusCode::SERVICE_UNAVAILABLE, "SERVICE_UNAVAILABLE")
            }
            ErrorKind::Database
            | ErrorKind::Internal
            | ErrorKind::Configuration
            | ErrorKind::Serialization => {
                tracing::error!(error = %err.message, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        };

        let body: ApiResponse<()> = ApiResponse::err(error_code, err.message);
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_maps_to_400() {
        let response = ApiError(AppError::validation("missing title")).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_authentication_maps_to_401() {
        let response = ApiError(AppError::authentication("bad token")).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_authorization_maps_to_403() {
        let response = ApiError(AppError::authorization("admins only")).into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}
