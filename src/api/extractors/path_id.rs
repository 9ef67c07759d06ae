//! Validated ID path-parameter extractor.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

use crate::errors::AppError;

/// Path extractor that accepts only positive numeric identifiers.
///
/// The raw parameter is taken as text so that non-numeric input produces
/// the pipeline's 400 message instead of the framework's default rejection.
pub struct ValidatedId(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for ValidatedId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::bad_request("The 'id' parameter is required"))?;

        let raw = raw.trim();
        if raw.is_empty() {
            return Err(AppError::bad_request("The 'id' parameter is required"));
        }

        let id: i64 = raw
            .parse()
            .map_err(|_| AppError::bad_request("The 'id' parameter must be a valid number"))?;

        if id <= 0 {
            return Err(AppError::bad_request(
                "The 'id' parameter must be a positive number",
            ));
        }

        Ok(ValidatedId(id))
    }
}
