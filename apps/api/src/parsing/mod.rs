// Resume parsing pipeline.
// Implements: pattern catalog, contact extraction, section segmentation,
// keyword indexing, and the orchestrator that ties them to the corrector.

pub mod contact;
pub mod handlers;
pub mod keywords;
pub mod parser;
pub mod patterns;
pub mod segmenter;

pub use parser::{parse_local, ResumeParser};
