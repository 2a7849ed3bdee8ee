use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;
use validator::ValidationErrors;

use crate::patch::PatchError;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Category not found: {0}")]
    CategoryNotFound(Uuid),

    #[error("Product not found: {0}")]
    ProductNotFound(Uuid),

    /// One or more field-level rules violated; carries the complete list of
    /// violations, not just the first.
    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationErrors),

    /// A patch operation could not be applied to the editable view.
    #[error("Invalid patch document: {0}")]
    Patch(#[from] PatchError),

    /// Commit rejected by the underlying store (constraint violation,
    /// connectivity loss). Distinct from validation failure.
    #[error("Store error: {0}")]
    Store(#[from] DbErr),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Convert CatalogError to AppError for standardized error responses
impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::CategoryNotFound(id) => {
                AppError::NotFound(format!("Category {} not found", id))
            }
            CatalogError::ProductNotFound(id) => {
                AppError::NotFound(format!("Product {} not found", id))
            }
            CatalogError::Validation(errors) => AppError::ValidationError(errors),
            CatalogError::Patch(e) => AppError::UnprocessableEntity(e.to_string()),
            CatalogError::Store(e) => AppError::Database(e),
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        // Convert to AppError for the standardized error response format
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
