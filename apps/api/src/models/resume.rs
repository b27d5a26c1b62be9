use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::errors::ParseError;

/// Resume section categories. The set is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Contact,
    Summary,
    Experience,
    Education,
    Skills,
    Projects,
    Certifications,
}

impl SectionKind {
    /// Every section kind, in enumeration order.
    pub const ALL: [SectionKind; 7] = [
        SectionKind::Contact,
        SectionKind::Summary,
        SectionKind::Experience,
        SectionKind::Education,
        SectionKind::Skills,
        SectionKind::Projects,
        SectionKind::Certifications,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKind::Contact => "contact",
            SectionKind::Summary => "summary",
            SectionKind::Experience => "experience",
            SectionKind::Education => "education",
            SectionKind::Skills => "skills",
            SectionKind::Projects => "projects",
            SectionKind::Certifications => "certifications",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        SectionKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == name)
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A contiguous run of resume lines assigned to one section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentBlock {
    /// Lines joined with `\n`, in input order.
    pub content: String,
    pub section: SectionKind,
    pub keywords: BTreeSet<String>,
    /// Always 1.0 for now.
    pub confidence: f32,
}

impl ContentBlock {
    pub fn new(content: String, section: SectionKind, keywords: BTreeSet<String>) -> Self {
        Self {
            content,
            section,
            keywords,
            confidence: 1.0,
        }
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.content.lines()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactRecord {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub linkedin: Option<String>,
}

/// Blocks per section. One field per `SectionKind`, so no section can go missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sections {
    pub contact: Vec<ContentBlock>,
    pub summary: Vec<ContentBlock>,
    pub experience: Vec<ContentBlock>,
    pub education: Vec<ContentBlock>,
    pub skills: Vec<ContentBlock>,
    pub projects: Vec<ContentBlock>,
    pub certifications: Vec<ContentBlock>,
}

impl Sections {
    pub fn get(&self, kind: SectionKind) -> &[ContentBlock] {
        match kind {
            SectionKind::Contact => &self.contact,
            SectionKind::Summary => &self.summary,
            SectionKind::Experience => &self.experience,
            SectionKind::Education => &self.education,
            SectionKind::Skills => &self.skills,
            SectionKind::Projects => &self.projects,
            SectionKind::Certifications => &self.certifications,
        }
    }

    pub fn get_mut(&mut self, kind: SectionKind) -> &mut Vec<ContentBlock> {
        match kind {
            SectionKind::Contact => &mut self.contact,
            SectionKind::Summary => &mut self.summary,
            SectionKind::Experience => &mut self.experience,
            SectionKind::Education => &mut self.education,
            SectionKind::Skills => &mut self.skills,
            SectionKind::Projects => &mut self.projects,
            SectionKind::Certifications => &mut self.certifications,
        }
    }

    /// Appends a block under its own `section`.
    pub fn push(&mut self, block: ContentBlock) {
        self.get_mut(block.section).push(block);
    }

    /// Iterates every section in enumeration order, empty ones included.
    pub fn iter(&self) -> impl Iterator<Item = (SectionKind, &[ContentBlock])> {
        SectionKind::ALL.into_iter().map(move |kind| (kind, self.get(kind)))
    }

    pub fn block_count(&self) -> usize {
        self.iter().map(|(_, blocks)| blocks.len()).sum()
    }
}

/// The structured form of one resume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedDocument {
    pub raw_text: String,
    pub contact: ContactRecord,
    pub sections: Sections,
    /// Local parse scans the whole raw text; a corrected document uses the union of block keywords.
    pub all_keywords: BTreeSet<String>,
    pub source_path: Option<PathBuf>,
}

/// Return value of every public parse entry point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseOutcome {
    pub ok: bool,
    pub document: Option<ParsedDocument>,
    pub errors: Vec<String>,
    pub notes: Vec<String>,
}

impl ParseOutcome {
    pub fn success(document: ParsedDocument, notes: Vec<String>) -> Self {
        Self {
            ok: true,
            document: Some(document),
            errors: Vec::new(),
            notes,
        }
    }

    pub fn failure(error: ParseError) -> Self {
        Self {
            ok: false,
            document: None,
            errors: vec![error.to_string()],
            notes: Vec::new(),
        }
    }
}
