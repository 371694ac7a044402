use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use pulse_types::ErrorResponse;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    InternalError(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, details) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "Not Found", Some(msg)),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "Bad Request", Some(msg)),
            ApiError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error",
                    Some("An unexpected error occurred".to_string()),
                )
            }
        };

        let error_response = ErrorResponse {
            error: message.to_string(),
            details,
        };

        (status, Json(error_response)).into_response()
    }
}

/// Walk the error chain looking for a SQLite constraint violation (UNIQUE
/// or FOREIGN KEY); these map to 400 rather than 500.
fn constraint_violation(err: &anyhow::Error) -> bool {
    err.chain()
        .filter_map(|cause| cause.downcast_ref::<rusqlite::Error>())
        .any(|e| {
            matches!(
                e,
                rusqlite::Error::SqliteFailure(failure, _)
                    if failure.code == rusqlite::ErrorCode::ConstraintViolation
            )
        })
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        if constraint_violation(&err) {
            ApiError::BadRequest("Integrity constraint violated".to_string())
        } else {
            ApiError::InternalError(err.to_string())
        }
    }
}

impl From<rusqlite::Error> for ApiError {
    fn from(err: rusqlite::Error) -> Self {
        ApiError::InternalError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unique_violation() -> anyhow::Error {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE t (name TEXT UNIQUE);
             INSERT INTO t (name) VALUES ('a');",
        )
        .unwrap();
        let err = conn
            .execute("INSERT INTO t (name) VALUES ('a')", [])
            .unwrap_err();
        anyhow::Error::new(err).context("Failed to insert")
    }

    #[test]
    fn constraint_violations_map_to_bad_request() {
        let api_err = ApiError::from(unique_violation());
        assert!(matches!(api_err, ApiError::BadRequest(_)));
    }

    #[test]
    fn other_errors_map_to_internal() {
        let err = anyhow::anyhow!("disk on fire").context("Failed to fetch");
        assert!(matches!(ApiError::from(err), ApiError::InternalError(_)));
    }
}
