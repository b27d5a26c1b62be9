use crate::models::ContactRecord;
use crate::parsing::patterns::{EMAIL_RE, LINKEDIN_RE, PHONE_RE, PROFILE_URL_SCHEME};

/// Lines considered for the name heuristic.
const NAME_SCAN_LINES: usize = 10;
/// Exclusive bounds on the trimmed name length, in characters.
const NAME_MIN_LEN: usize = 2;
const NAME_MAX_LEN: usize = 50;
const NAME_STOPLIST: &[&str] = &["resume", "cv", "email", "phone", "linkedin"];
const LOCATION_LABELS: &[&str] = &["location:", "address:"];

/// Extracts contact fields from raw resume text. Missing fields stay `None`.
pub fn extract_contact(text: &str) -> ContactRecord {
    ContactRecord {
        name: extract_name(text),
        email: EMAIL_RE.find(text).map(|m| m.as_str().to_string()),
        phone: extract_phone(text),
        location: extract_location(text),
        linkedin: LINKEDIN_RE
            .find(text)
            .map(|m| format!("{PROFILE_URL_SCHEME}{}", m.as_str())),
    }
}

/// First phone match with its capture groups concatenated.
fn extract_phone(text: &str) -> Option<String> {
    let caps = PHONE_RE.captures(text)?;
    let joined: String = caps
        .iter()
        .skip(1)
        .map(|group| group.map_or("", |m| m.as_str()))
        .collect();
    Some(joined.trim().to_string())
}

/// First of the leading non-empty lines that looks like a person's name.
fn extract_name(text: &str) -> Option<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .take(NAME_SCAN_LINES)
        .find(|line| {
            let len = line.chars().count();
            let lowered = line.to_lowercase();
            len > NAME_MIN_LEN
                && len < NAME_MAX_LEN
                && !NAME_STOPLIST.iter().any(|stop| lowered.contains(stop))
        })
        .map(str::to_string)
}

fn extract_location(text: &str) -> Option<String> {
    text.lines().map(str::trim).find_map(|line| {
        LOCATION_LABELS.iter().find_map(|label| {
            let head = line.get(..label.len())?;
            if !head.eq_ignore_ascii_case(label) {
                return None;
            }
            let value = line[label.len()..].trim();
            (!value.is_empty()).then(|| value.to_string())
        })
    })
}
