pub mod extract;
pub mod severity;

pub use extract::{ExtractedFields, extract_fields};
pub use severity::Severity;
