//! Custom extractors running the request-validation pipeline.

mod path_id;
mod validated_json;

pub use path_id::ValidatedId;
pub use validated_json::ValidatedJson;
