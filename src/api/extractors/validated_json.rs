//! Validated JSON extractor - Combines decoding with rule-table validation.
//!
//! Each step either terminates the request with a 400 envelope or hands
//! the fully validated value to the handler; never both.

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
};
use serde::de::DeserializeOwned;
use serde_json::error::Category;

use crate::errors::AppError;
use crate::validation::{engine, Validate};

/// JSON extractor that runs the request through the validation pipeline.
///
/// # Example
///
/// ```rust,ignore
/// use storefront_api::api::extractors::ValidatedJson;
/// use storefront_api::domain::CreateUserRequest;
///
/// async fn create_user(ValidatedJson(payload): ValidatedJson<CreateUserRequest>) {
///     // payload is already validated under the type's rule groups
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate + 'static,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !has_json_content_type(&req) {
            return Err(AppError::Malformed(
                "Content-Type must be application/json".to_string(),
            ));
        }

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|_| AppError::Malformed("Unable to read request body".to_string()))?;

        let text = std::str::from_utf8(&bytes)
            .map_err(|_| AppError::Malformed("Request body must be valid UTF-8".to_string()))?;

        if text.trim().is_empty() {
            return Err(AppError::Malformed(
                "Request body must not be empty".to_string(),
            ));
        }

        // Decoding into Option<T> lets a literal `null` body reach the
        // engine's null-object check instead of failing as a syntax error.
        let decoded: Option<T> =
            serde_json::from_str(text).map_err(|e| AppError::Malformed(decode_message(&e)))?;

        let Some(value) = decoded else {
            return Err(AppError::Validation(engine::validate_nullable::<T>(
                None,
                T::GROUPS,
            )));
        };

        let errors = engine::validate(&value, T::GROUPS);
        if !errors.is_empty() {
            return Err(AppError::Validation(errors));
        }

        Ok(ValidatedJson(value))
    }
}

/// Whether the request declares a JSON content type.
///
/// Accepts `application/json` and `+json` suffixed media types, with or
/// without parameters such as `; charset=utf-8`.
fn has_json_content_type(req: &Request) -> bool {
    let Some(content_type) = req.headers().get(CONTENT_TYPE) else {
        return false;
    };
    let Ok(content_type) = content_type.to_str() else {
        return false;
    };

    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim();

    essence.eq_ignore_ascii_case("application/json")
        || essence.to_ascii_lowercase().ends_with("+json")
}

/// Map a decode failure to a user-facing message, distinguishing truncated
/// input from syntactically broken input where serde can tell them apart.
fn decode_message(err: &serde_json::Error) -> String {
    match err.classify() {
        Category::Eof => "Incomplete JSON in request body".to_string(),
        Category::Syntax => "Malformed JSON in request body".to_string(),
        Category::Data | Category::Io => "Invalid JSON payload".to_string(),
    }
}
