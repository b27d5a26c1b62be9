use std::collections::BTreeSet;

use crate::parsing::patterns::{COMMON_KEYWORDS, TECH_KEYWORDS};

/// Returns every vocabulary entry contained in `text`, compared case-insensitively.
///
/// Matching is plain substring containment, not tokenized: "javascript" also
/// yields "java", and single-letter entries such as "r" match most prose.
pub fn extract_keywords(text: &str) -> BTreeSet<String> {
    let lowered = text.to_lowercase();

    TECH_KEYWORDS
        .iter()
        .chain(COMMON_KEYWORDS)
        .filter(|kw| lowered.contains(*kw))
        .map(|kw| kw.to_string())
        .collect()
}
