use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ItemError {
    #[error("Item not found: {0}")]
    NotFound(i64),

    /// The stored version moved on since the item was read
    #[error("Edit conflict on item {0}")]
    EditConflict(i64),

    #[error("Validation failed: {0:?}")]
    Validation(BTreeMap<String, String>),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ItemResult<T> = Result<T, ItemError>;

impl From<sea_orm::DbErr> for ItemError {
    fn from(err: sea_orm::DbErr) -> Self {
        ItemError::Database(err.to_string())
    }
}

/// Convert ItemError to AppError for standardized error responses
impl From<ItemError> for AppError {
    fn from(err: ItemError) -> Self {
        match err {
            ItemError::NotFound(_) => AppError::not_found(),
            ItemError::EditConflict(id) => AppError::EditConflict(format!("item {}", id)),
            ItemError::Validation(errors) => AppError::FailedValidation(errors),
            ItemError::Database(msg) | ItemError::Internal(msg) => {
                AppError::InternalServerError(msg)
            }
        }
    }
}

impl IntoResponse for ItemError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_item_errors_map_to_http_status() {
        let cases = [
            (ItemError::NotFound(3), StatusCode::NOT_FOUND),
            (ItemError::EditConflict(3), StatusCode::CONFLICT),
            (
                ItemError::Validation(BTreeMap::from([(
                    "name".to_string(),
                    "must be provided".to_string(),
                )])),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                ItemError::Database("relation \"items\" does not exist".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                ItemError::Internal("boom".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(AppError::from(err).status(), status);
        }
    }
}
