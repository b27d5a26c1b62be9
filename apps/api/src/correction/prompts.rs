// Section correction prompt template.
// Placeholders: {raw_text}, {section_summary}.

pub const SECTION_CORRECTION_PROMPT: &str = r#"You are an expert resume parser. Given the following raw resume text and the current section splits, verify if the sections are correct. If not, return a corrected JSON structure with the following format:
{
  "sections": {
    "summary": [{"content": "...", "keywords": ["...", ...]}],
    "experience": [{"content": "...", "keywords": ["...", ...]}],
    ...
  }
}

Valid section names: contact, summary, experience, education, skills, projects, certifications.

IMPORTANT: Only output valid JSON. Do not include any explanation, markdown, or text before or after the JSON. Your response must start with '{' and end with '}'.

Raw Resume Text (truncated):
{raw_text}

Current Section Summary:
{section_summary}

If the sections are correct, return the same structure. Only output valid JSON. Do not include any explanation."#;
