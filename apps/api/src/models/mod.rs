pub mod resume;

pub use resume::{
    ContactRecord, ContentBlock, ParseOutcome, ParsedDocument, SectionKind, Sections,
};
