use axum::{Json, http::StatusCode};
use db::error::DomainError;
use serde::Serialize;

use crate::response::ApiResponse;

/// Maps a domain error onto the HTTP taxonomy: validation 400, conflict 409,
/// not-found 404, authorization 403. Storage failures are logged and
/// collapsed into a generic 500 so infrastructure detail never reaches
/// clients.
pub fn error_response<T>(err: DomainError) -> (StatusCode, Json<ApiResponse<T>>)
where
    T: Serialize + Default,
{
    let status = match &err {
        DomainError::Validation(_) => StatusCode::BAD_REQUEST,
        DomainError::Conflict(_) => StatusCode::CONFLICT,
        DomainError::NotFound(_) => StatusCode::NOT_FOUND,
        DomainError::Authorization(_) => StatusCode::FORBIDDEN,
        DomainError::Db(db_err) => {
            tracing::error!(error = %db_err, "database failure");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("A database error occurred")),
            );
        }
    };
    (status, Json(ApiResponse::error(err.to_string())))
}
