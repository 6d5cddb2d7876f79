use axum::response::{IntoResponse, Response};
use axum_helpers::{AppError, FieldError};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Validation failed: {}", describe(.0))]
    Validation(Vec<FieldError>),

    #[error("Product with ID {0} already exists")]
    Conflict(Uuid),

    #[error("Product with ID {0} not found")]
    NotFound(Uuid),

    #[error("Internal error: {0}")]
    Internal(String),
}

fn describe(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

pub type ProductResult<T> = Result<T, ProductError>;

/// Convert ProductError to AppError for standardized error responses
impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::Validation(fields) => AppError::InvalidFields(fields),
            ProductError::Conflict(id) => {
                AppError::Conflict(format!("Product with ID {} already exists", id))
            }
            ProductError::NotFound(id) => {
                AppError::NotFound(format!("Product with ID {} not found", id))
            }
            ProductError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for ProductError {
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
    fn test_display_lists_violations() {
        let err = ProductError::Validation(vec![
            FieldError::new("name", "Product name is required."),
            FieldError::new("price", "Price must be greater than zero."),
        ]);
        assert_eq!(
            err.to_string(),
            "Validation failed: name: Product name is required.; price: Price must be greater than zero."
        );
    }

    #[test]
    fn test_status_mapping() {
        let id = Uuid::new_v4();
        let cases = [
            (ProductError::Validation(vec![]), StatusCode::BAD_REQUEST),
            (ProductError::Conflict(id), StatusCode::CONFLICT),
            (ProductError::NotFound(id), StatusCode::NOT_FOUND),
            (
                ProductError::Internal("lock poisoned".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }
}
