//! Section segmenter: walks resume lines and cuts them into per-section blocks.
//!
//! Algorithm:
//! 1. Split into trimmed, non-empty lines.
//! 2. The current section starts as `Summary` (text before any heading is an intro).
//! 3. A line matching a heading rule (tested in `HEADING_ORDER`) closes the
//!    buffered block under the previous section and opens a new block, with the
//!    heading line as its first line.
//! 4. Any other line is appended to the buffer. The last buffer is flushed at the end.

use tracing::debug;

use crate::models::{ContentBlock, SectionKind, Sections};
use crate::parsing::keywords::extract_keywords;
use crate::parsing::patterns::HEADING_RULES;

/// Section assumed for content that precedes the first heading.
const INITIAL_SECTION: SectionKind = SectionKind::Summary;

/// Returns the section whose heading rules match `line`, first rule in order wins.
pub fn detect_heading(line: &str) -> Option<SectionKind> {
    HEADING_RULES
        .iter()
        .find(|rule| rule.matches(line))
        .map(|rule| rule.section)
}

/// Splits `text` into blocks in emission order.
pub fn split_blocks(text: &str) -> Vec<ContentBlock> {
    let mut blocks = Vec::new();
    let mut current = INITIAL_SECTION;
    let mut buffer: Vec<&str> = Vec::new();

    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        match detect_heading(line) {
            Some(next) => {
                if !buffer.is_empty() {
                    blocks.push(make_block(&buffer, current));
                }
                debug!(section = %next, heading = line, "section heading detected");
                current = next;
                buffer.clear();
                buffer.push(line);
            }
            None => buffer.push(line),
        }
    }

    if !buffer.is_empty() {
        blocks.push(make_block(&buffer, current));
    }

    blocks
}

/// Groups the blocks of `text` by section. Every section is present, possibly empty.
pub fn segment_sections(text: &str) -> Sections {
    let mut sections = Sections::default();
    for block in split_blocks(text) {
        sections.push(block);
    }
    sections
}

fn make_block(lines: &[&str], section: SectionKind) -> ContentBlock {
    let content = lines.join("\n");
    let keywords = extract_keywords(&content);
    ContentBlock::new(content, section, keywords)
}
