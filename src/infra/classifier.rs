//! Storage fault classification.
//!
//! Maps free-text storage faults to an HTTP status and response envelope by
//! case-insensitive substring matching in fixed priority order: uniqueness
//! conflict, referential-integrity violation, missing required field, then
//! unclassified. Field extraction from the fault text is best effort and
//! tuned to PostgreSQL phrasing; a non-matching text falls back to the
//! generic message for its category. Pure function of (fault text, mode).

use axum::http::StatusCode;
use once_cell::sync::Lazy;
use regex::Regex;

use super::storage::StorageError;
use crate::config::RuntimeMode;
use crate::types::{ApiResponse, ErrorDetail};

/// Matches the `(column)=(value)` pair PostgreSQL puts in unique-violation detail.
static UNIQUE_PAIR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\(([^)=]+)\)=\(").expect("valid unique pair pattern"));

/// Matches the quoted column name in not-null violation messages.
static COLUMN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"column "([^"]+)""#).expect("valid column pattern"));

/// Classifies storage faults into client-facing error envelopes.
pub struct StorageClassifier {
    mode: RuntimeMode,
}

impl StorageClassifier {
    pub fn new(mode: RuntimeMode) -> Self {
        Self { mode }
    }

    /// Classify a fault. The first matching category wins.
    pub fn classify(&self, fault: &StorageError) -> (StatusCode, ApiResponse<()>) {
        let detail = fault.detail();
        let lowered = detail.to_lowercase();

        if lowered.contains("duplicate key") || lowered.contains("unique constraint") {
            let message = UNIQUE_PAIR_RE
                .captures(detail)
                .and_then(|caps| caps.get(1))
                .map(|field| format!("A record with that {} already exists", field.as_str()))
                .unwrap_or_else(|| "A record with those values already exists".to_string());
            return (StatusCode::CONFLICT, ApiResponse::error(message));
        }

        if lowered.contains("foreign key constraint") {
            return (
                StatusCode::BAD_REQUEST,
                ApiResponse::error("The operation violates a data-integrity constraint"),
            );
        }

        if lowered.contains("not-null constraint")
            || lowered.contains("not null constraint")
            || lowered.contains("null value in column")
        {
            let message = COLUMN_RE
                .captures(detail)
                .and_then(|caps| caps.get(1))
                .map(|column| format!("The field '{}' is required", column.as_str()))
                .unwrap_or_else(|| "Required fields are missing".to_string());
            return (StatusCode::BAD_REQUEST, ApiResponse::error(message));
        }

        let body = if self.mode.is_development() {
            ApiResponse::error_with_details(
                "An internal error occurred",
                vec![ErrorDetail::general(detail)],
            )
        } else {
            ApiResponse::error("An internal error occurred")
        };
        (StatusCode::INTERNAL_SERVER_ERROR, body)
    }
}
