//! Shared response types.

mod response;

pub use response::{ApiResponse, ErrorCategory, ErrorDetail, ResponseMetadata};
