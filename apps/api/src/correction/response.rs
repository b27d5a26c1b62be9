//! Turning a free-form model reply into a rebuilt `ParsedDocument`.

use std::collections::{BTreeSet, HashMap};

use serde::Deserialize;

use crate::correction::CorrectionError;
use crate::models::{ContentBlock, ParsedDocument, SectionKind, Sections};

/// Characters of the reply quoted in `NoJsonObject` errors.
const SNIPPET_CHARS: usize = 200;

#[derive(Debug, Deserialize)]
struct CorrectionPayload {
    sections: HashMap<String, Vec<CorrectedBlock>>,
}

#[derive(Debug, Deserialize)]
struct CorrectedBlock {
    #[serde(default)]
    content: String,
    #[serde(default)]
    keywords: Vec<String>,
}

/// Returns the first balanced `{...}` span in `text`.
/// Braces inside JSON string literals (including escaped quotes) are skipped.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + 1]);
                }
            }
            _ => {}
        }
    }

    None
}

/// Rebuilds `original` from a model reply.
///
/// Only sections and the document-wide keyword set change. A section the reply
/// does not mention comes back empty; nothing is merged from `original`.
pub fn rebuild_document(
    reply: &str,
    original: &ParsedDocument,
) -> Result<ParsedDocument, CorrectionError> {
    let reply = reply.trim();
    if reply.is_empty() {
        return Err(CorrectionError::EmptyResponse);
    }

    let json = extract_json_object(reply).ok_or_else(|| {
        CorrectionError::NoJsonObject(reply.chars().take(SNIPPET_CHARS).collect())
    })?;
    let mut payload: CorrectionPayload = serde_json::from_str(json)?;

    let mut sections = Sections::default();
    for kind in SectionKind::ALL {
        let Some(blocks) = payload.sections.remove(kind.as_str()) else {
            continue;
        };
        for block in blocks {
            let keywords: BTreeSet<String> = block.keywords.into_iter().collect();
            sections.push(ContentBlock::new(block.content, kind, keywords));
        }
    }

    let all_keywords = sections
        .iter()
        .flat_map(|(_, blocks)| blocks.iter().flat_map(|b| b.keywords.iter().cloned()))
        .collect();

    Ok(ParsedDocument {
        raw_text: original.raw_text.clone(),
        contact: original.contact.clone(),
        sections,
        all_keywords,
        source_path: original.source_path.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ContactRecord;

    fn original() -> ParsedDocument {
        let mut sections = Sections::default();
        sections.push(ContentBlock::new(
            "EDUCATION\nBSc".to_string(),
            SectionKind::Education,
            BTreeSet::new(),
        ));
        ParsedDocument {
            raw_text: "Jane Doe\nEDUCATION\nBSc".to_string(),
            contact: ContactRecord {
                name: Some("Jane Doe".to_string()),
                ..Default::default()
            },
            sections,
            all_keywords: BTreeSet::from(["r".to_string()]),
            source_path: Some("cv.txt".into()),
        }
    }

    #[test]
    fn test_extract_json_object_plain() {
        assert_eq!(extract_json_object(r#"{"a": 1}"#), Some(r#"{"a": 1}"#));
    }

    #[test]
    fn test_extract_json_object_with_surrounding_prose() {
        let text = "Here you go:\n```json\n{\"a\": {\"b\": 2}}\n```\nAnything else?";
        assert_eq!(extract_json_object(text), Some("{\"a\": {\"b\": 2}}"));
    }

    #[test]
    fn test_extract_json_object_ignores_braces_in_strings() {
        let text = r#"{"content": "uses {braces} and \"quotes}\""} trailing }"#;
        assert_eq!(
            extract_json_object(text),
            Some(r#"{"content": "uses {braces} and \"quotes}\""}"#)
        );
    }

    #[test]
    fn test_extract_json_object_first_of_two() {
        assert_eq!(extract_json_object("{} {\"x\": 1}"), Some("{}"));
    }

    #[test]
    fn test_extract_json_object_unbalanced_or_missing() {
        assert_eq!(extract_json_object("no json here"), None);
        assert_eq!(extract_json_object("{\"a\": 1"), None);
    }

    #[test]
    fn test_rebuild_replaces_sections_and_keeps_contact() {
        let reply = r#"{"sections": {
            "summary": [{"content": "Jane Doe", "keywords": []}],
            "education": [{"content": "EDUCATION\nBSc", "keywords": ["research", "data"]}],
            "hobbies": [{"content": "Chess", "keywords": ["chess"]}]
        }}"#;
        let original = original();
        let rebuilt = rebuild_document(reply, &original).unwrap();

        assert_eq!(rebuilt.contact, original.contact);
        assert_eq!(rebuilt.raw_text, original.raw_text);
        assert_eq!(rebuilt.source_path, original.source_path);
        assert_eq!(rebuilt.sections.get(SectionKind::Summary).len(), 1);
        assert_eq!(rebuilt.sections.get(SectionKind::Education)[0].section, SectionKind::Education);
        assert_eq!(
            rebuilt.all_keywords,
            BTreeSet::from(["data".to_string(), "research".to_string()])
        );
    }

    #[test]
    fn test_rebuild_empties_sections_missing_from_reply() {
        let rebuilt = rebuild_document(r#"{"sections": {"skills": []}}"#, &original()).unwrap();
        assert_eq!(rebuilt.sections, Sections::default());
        assert!(rebuilt.all_keywords.is_empty());
    }

    #[test]
    fn test_rebuild_defaults_missing_block_fields() {
        let rebuilt =
            rebuild_document(r#"{"sections": {"projects": [{}]}}"#, &original()).unwrap();
        let block = &rebuilt.sections.get(SectionKind::Projects)[0];
        assert_eq!(block.content, "");
        assert!(block.keywords.is_empty());
        assert!((block.confidence - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_rebuild_errors() {
        let original = original();
        assert!(matches!(
            rebuild_document("   ", &original),
            Err(CorrectionError::EmptyResponse)
        ));
        assert!(matches!(
            rebuild_document("Sorry, I cannot help with that.", &original),
            Err(CorrectionError::NoJsonObject(_))
        ));
        assert!(matches!(
            rebuild_document(r#"{"sections": "nope"}"#, &original),
            Err(CorrectionError::InvalidJson(_))
        ));
        assert!(matches!(
            rebuild_document(r#"{"result": {}}"#, &original),
            Err(CorrectionError::InvalidJson(_))
        ));
    }
}
