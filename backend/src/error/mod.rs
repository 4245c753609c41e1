use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::services::passport::PassportLookupError;

#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    Conflict(String),
    /// The task exists but its timer has already been stopped.
    AlreadyStopped(String),
    BadRequest(String),
    Validation(Vec<String>),
    /// The passport lookup service was unreachable or answered with a non-200 status.
    Upstream(String),
    /// The passport lookup service answered with a body that is not a user record.
    Decode(String),
    InternalServerError(anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) | AppError::AlreadyStopped(_) => StatusCode::CONFLICT,
            AppError::BadRequest(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Upstream(_) | AppError::Decode(_) => StatusCode::BAD_GATEWAY,
            AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            AppError::NotFound(msg)
            | AppError::Conflict(msg)
            | AppError::AlreadyStopped(msg)
            | AppError::BadRequest(msg) => msg,
            AppError::Validation(errors) => format!("Validation failed: {}", errors.join("; ")),
            AppError::Upstream(msg) => {
                tracing::error!(error = %msg, "passport lookup failed");
                format!("Failed to get user info from passport service: {}", msg)
            }
            AppError::Decode(msg) => {
                tracing::error!(error = %msg, "passport lookup returned an unreadable body");
                format!("Failed parsing user info from passport service: {}", msg)
            }
            AppError::InternalServerError(err) => {
                tracing::error!("Internal server error: {:?}", err);
                "Internal server error".to_string()
            }
        };

        (status, message).into_response()
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalServerError(err)
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => AppError::NotFound("Resource not found".to_string()),
            _ => AppError::InternalServerError(err.into()),
        }
    }
}

impl From<PassportLookupError> for AppError {
    fn from(err: PassportLookupError) -> Self {
        match err {
            PassportLookupError::Decode(_) => AppError::Decode(err.to_string()),
            PassportLookupError::Transport(_) | PassportLookupError::Status(_) => {
                AppError::Upstream(err.to_string())
            }
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| {
                    let code = e.code.as_ref();
                    format!("{}: {}", field, code)
                })
            })
            .collect();
        AppError::Validation(messages)
    }
}

/// Returns true when the error is a PostgreSQL unique constraint violation.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

/// Returns true when the error is a PostgreSQL foreign key violation.
pub fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_foreign_key_violation())
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn response_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        String::from_utf8(bytes.to_vec()).expect("utf8 body")
    }

    #[tokio::test]
    async fn app_error_into_response_maps_status_and_body() {
        let response = AppError::BadRequest("bad".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(response_text(response).await, "bad");

        let response = AppError::NotFound("missing".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response_text(response).await, "missing");

        let response = AppError::Conflict("conflict".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert_eq!(response_text(response).await, "conflict");

        let response = AppError::AlreadyStopped("stopped".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert_eq!(response_text(response).await, "stopped");
    }

    #[tokio::test]
    async fn app_error_validation_joins_messages() {
        let response = AppError::Validation(vec![
            "passport_number: passport_format".to_string(),
            "other: invalid".to_string(),
        ])
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response_text(response).await,
            "Validation failed: passport_number: passport_format; other: invalid"
        );
    }

    #[tokio::test]
    async fn app_error_upstream_and_decode_are_bad_gateway() {
        let response = AppError::Upstream("status 503".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let response = AppError::Decode("expected object".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn app_error_internal_maps_to_generic_message() {
        let response = AppError::InternalServerError(anyhow::anyhow!("boom")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response_text(response).await, "Internal server error");
    }

    #[test]
    fn row_not_found_maps_to_not_found() {
        let err: AppError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, AppError::NotFound(_)));
        let err: AppError = sqlx::Error::PoolTimedOut.into();
        assert!(matches!(err, AppError::InternalServerError(_)));
    }

    #[test]
    fn passport_status_error_maps_to_upstream() {
        let err: AppError = PassportLookupError::Status(503).into();
        assert!(matches!(err, AppError::Upstream(_)));
    }
}
