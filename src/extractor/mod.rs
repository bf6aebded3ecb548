pub mod discovery;
pub mod fields;

pub use discovery::CandidateDiscovery;
pub use fields::{ExtractedFields, FieldExtractor};
