//! Custom extractors.

mod request_context;
mod validated_json;

pub use validated_json::ValidatedJson;
