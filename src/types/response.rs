//! Uniform response envelope returned by every endpoint.
//!
//! Success and failure share one wrapper so clients parse a single shape.
//! The constructors are the only way instances are built: success responses
//! never carry errors, failure responses never carry data.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::config::META_VALIDATION_ERROR;

/// Category of a single structured failure unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum ErrorCategory {
    Field,
    Validation,
    General,
}

/// One structured failure unit: a field rejection, a validation note,
/// or a general message. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDetail {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub rejected_value: Option<Value>,
    pub category: ErrorCategory,
}

impl ErrorDetail {
    /// Field-level rejection with a machine-readable code and the offending value.
    pub fn field(
        field: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
        rejected_value: Option<Value>,
    ) -> Self {
        Self {
            field: Some(field.into()),
            code: Some(code.into()),
            message: message.into(),
            rejected_value,
            category: ErrorCategory::Field,
        }
    }

    /// Validation note tied to a field but without a constraint code.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: Some(field.into()),
            code: None,
            message: message.into(),
            rejected_value: None,
            category: ErrorCategory::Validation,
        }
    }

    /// General failure not tied to any field.
    pub fn general(message: impl Into<String>) -> Self {
        Self {
            field: None,
            code: None,
            message: message.into(),
            rejected_value: None,
            category: ErrorCategory::General,
        }
    }
}

/// Descriptive response metadata. Never drives control flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMetadata {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_elements: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_time_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub timestamp: i64,
}

impl ResponseMetadata {
    /// Metadata carrying only its type tag.
    pub fn basic(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            total_elements: None,
            execution_time_ms: None,
            version: Some(crate::config::API_VERSION.to_string()),
            timestamp: Utc::now().timestamp_millis(),
        }
    }

    /// Metadata for list responses with an element count.
    pub fn with_total(kind: impl Into<String>, total_elements: u64) -> Self {
        Self {
            total_elements: Some(total_elements),
            ..Self::basic(kind)
        }
    }

    /// List metadata including how long the query took.
    pub fn with_execution_time(
        kind: impl Into<String>,
        total_elements: u64,
        execution_time_ms: u64,
    ) -> Self {
        Self {
            execution_time_ms: Some(execution_time_ms),
            ..Self::with_total(kind, total_elements)
        }
    }
}

/// Standard API response wrapper, built exactly once per request.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<ErrorDetail>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ResponseMetadata>,
    /// Epoch milliseconds at construction time.
    pub timestamp: i64,
}

impl<T: Serialize> ApiResponse<T> {
    /// Successful response carrying data.
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            errors: None,
            metadata: None,
            timestamp: Utc::now().timestamp_millis(),
        }
    }

    /// Successful response carrying data and metadata.
    pub fn success_with_metadata(
        data: T,
        message: impl Into<String>,
        metadata: ResponseMetadata,
    ) -> Self {
        Self {
            metadata: Some(metadata),
            ..Self::success(data, message)
        }
    }
}

impl ApiResponse<()> {
    /// Successful response with a message only.
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
            errors: None,
            metadata: None,
            timestamp: Utc::now().timestamp_millis(),
        }
    }

    /// Failure response with a message only.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
            errors: None,
            metadata: None,
            timestamp: Utc::now().timestamp_millis(),
        }
    }

    /// Failure response carrying structured error details.
    pub fn error_with_details(message: impl Into<String>, errors: Vec<ErrorDetail>) -> Self {
        Self {
            errors: Some(errors),
            ..Self::error(message)
        }
    }

    /// Validation failure: full error list plus VALIDATION_ERROR metadata.
    pub fn validation_error(message: impl Into<String>, errors: Vec<ErrorDetail>) -> Self {
        Self {
            errors: Some(errors),
            metadata: Some(ResponseMetadata::basic(META_VALIDATION_ERROR)),
            ..Self::error(message)
        }
    }
}
