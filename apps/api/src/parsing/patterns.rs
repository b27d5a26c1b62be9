//! Pattern catalog: heading rules, keyword vocabularies, and contact patterns.
//!
//! Read-only process-wide data. Regexes compile once on first use.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::SectionKind;

/// Order in which heading rules are tested. The first section with a matching
/// pattern wins, so a line like "Summary of Experience" lands in `Summary`.
/// `Contact` has no heading rules; it is never opened by a heading.
pub const HEADING_ORDER: [SectionKind; 6] = [
    SectionKind::Summary,
    SectionKind::Experience,
    SectionKind::Education,
    SectionKind::Skills,
    SectionKind::Projects,
    SectionKind::Certifications,
];

fn heading_sources(kind: SectionKind) -> &'static [&'static str] {
    match kind {
        SectionKind::Contact => &[],
        SectionKind::Summary => &[
            "summary",
            "profile",
            "objective",
            "about",
            "professional summary",
            "career summary",
        ],
        SectionKind::Experience => &[
            "experience",
            "work history",
            "employment",
            "professional experience",
            "work experience",
        ],
        SectionKind::Education => &[
            "education",
            "academic",
            "degree",
            "university",
            "college",
            "school",
        ],
        SectionKind::Skills => &[
            "skills",
            "competencies",
            "technologies",
            "tools",
            "programming languages",
        ],
        SectionKind::Projects => &[
            "projects",
            "portfolio",
            "achievements",
            "key projects",
            "notable projects",
        ],
        SectionKind::Certifications => &[
            "certifications",
            "certificates",
            "licenses",
            "accreditations",
            "training",
        ],
    }
}

/// The compiled heading patterns for one section.
pub struct HeadingRule {
    pub section: SectionKind,
    pub patterns: Vec<Regex>,
}

impl HeadingRule {
    /// Case-insensitive search anywhere in the line.
    pub fn matches(&self, line: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(line))
    }
}

/// Heading rules in `HEADING_ORDER`.
pub static HEADING_RULES: Lazy<Vec<HeadingRule>> = Lazy::new(|| {
    HEADING_ORDER
        .into_iter()
        .map(|section| HeadingRule {
            section,
            patterns: heading_sources(section)
                .iter()
                .map(|src| {
                    Regex::new(&format!("(?i){src}")).expect("heading pattern must compile")
                })
                .collect(),
        })
        .collect()
});

/// Technical vocabulary, lowercase. Matched by substring containment.
pub const TECH_KEYWORDS: &[&str] = &[
    // Programming languages
    "python", "java", "javascript", "typescript", "c++", "c#", "php",
    "ruby", "go", "rust", "swift", "kotlin", "scala", "r", "matlab",
    // Frameworks and libraries
    "react", "vue", "angular", "node.js", "express", "django", "flask",
    "spring", "laravel", "asp.net", "jquery", "bootstrap", "tailwind",
    // Databases
    "sql", "mysql", "postgresql", "mongodb", "redis", "oracle",
    "sqlite", "mariadb", "cassandra", "dynamodb",
    // Cloud and DevOps
    "aws", "azure", "gcp", "docker", "kubernetes", "jenkins",
    "git", "github", "gitlab", "ci/cd", "terraform", "ansible",
    // Tools and platforms
    "jira", "confluence", "slack", "figma", "adobe", "photoshop",
    "excel", "powerpoint", "word", "tableau", "power bi",
];

/// General resume vocabulary, lowercase.
pub const COMMON_KEYWORDS: &[&str] = &[
    "leadership", "management", "project", "team", "development",
    "analysis", "design", "implementation", "testing", "deployment",
    "agile", "scrum", "kanban", "waterfall", "methodology",
    "research", "data", "analytics", "machine learning", "ai",
    "frontend", "backend", "fullstack", "api", "rest", "graphql",
    "microservices", "architecture", "database", "optimization",
];

pub static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}\b")
        .expect("email pattern must compile")
});

/// Optional country code, optional parentheses around the area code, and
/// space/dot/hyphen separators. Four capture groups: prefix, area, exchange, line.
pub static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\+?1?[-.\s]?)?\(?([0-9]{3})\)?[-.\s]?([0-9]{3})[-.\s]?([0-9]{4})")
        .expect("phone pattern must compile")
});

pub static LINKEDIN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"linkedin\.com/in/[a-zA-Z0-9-]+").expect("linkedin pattern must compile")
});

/// Scheme prepended to a matched profile path.
pub const PROFILE_URL_SCHEME: &str = "https://";
