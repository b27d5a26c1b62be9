//! parse-resume: command-line front end for the resume parser.

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use resume_parser::config::Config;
use resume_parser::models::{ContentBlock, ParseOutcome, ParsedDocument};

const KEYWORD_PREVIEW: usize = 8;
const SECTION_KEYWORD_PREVIEW: usize = 5;

const SAMPLE_SOFTWARE_ENGINEER: &str = "\
Alice Johnson
Email: alice.johnson@tech.com
Phone: (555) 123-4567
LinkedIn: linkedin.com/in/alicejohnson

SUMMARY
Full-stack software engineer with 4 years experience in Python, JavaScript, and cloud technologies.

EXPERIENCE
Senior Developer - TechCorp (2021-2023)
- Led development of microservices using Python and Docker
- Implemented CI/CD pipelines with Jenkins and AWS
- Used React, Node.js, and PostgreSQL for full-stack development

SKILLS
Programming: Python, JavaScript, TypeScript, Java, SQL
Tools: Git, Docker, AWS, Jenkins, Jira

EDUCATION
Bachelor of Science in Computer Science
University of Technology - 2019
";

const SAMPLE_DATA_SCIENTIST: &str = "\
Bob Smith
Email: bob.smith@data.com
Phone: +1 555-987-6543
LinkedIn: linkedin.com/in/bobsmith

SUMMARY
Data scientist with expertise in machine learning, statistical analysis, and data visualization.

EXPERIENCE
Senior Data Scientist - DataCorp (2020-2023)
- Developed machine learning models using Python and scikit-learn
- Built data pipelines with Apache Spark and SQL

SKILLS
Programming: Python, R, SQL, MATLAB
Tools: Jupyter, Git, Docker, AWS

EDUCATION
Master of Science in Statistics
Data University - 2018
";

#[derive(Parser)]
#[command(name = "parse-resume")]
#[command(version)]
#[command(about = "Parse a resume into contact details, sections and keywords", long_about = None)]
struct Cli {
    /// Resume file (.pdf, .docx or .txt)
    #[arg(value_name = "FILE", conflicts_with = "text")]
    input: Option<PathBuf>,

    /// Parse this text instead of a file
    #[arg(long)]
    text: Option<String>,

    /// Print the full outcome as JSON
    #[arg(long)]
    json: bool,

    /// Skip remote section correction even if configured
    #[arg(long)]
    no_correction: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let mut config = Config::from_env()?;
    if cli.no_correction {
        config.enable_llm_correction = false;
    }

    // Logs go to stderr so `--json` output stays clean.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("resume_parser=warn,parse_resume={}", &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let parser = resume_parser::build_parser(&config)?;

    let outcomes: Vec<(String, ParseOutcome)> = match (&cli.input, &cli.text) {
        (Some(path), _) => vec![(path.display().to_string(), parser.parse_file(path).await)],
        (None, Some(text)) => vec![("text".to_string(), parser.parse_text(text).await)],
        (None, None) => {
            let mut outcomes = Vec::new();
            for (label, text) in [
                ("Software Engineer sample", SAMPLE_SOFTWARE_ENGINEER),
                ("Data Scientist sample", SAMPLE_DATA_SCIENTIST),
            ] {
                outcomes.push((label.to_string(), parser.parse_text(text).await));
            }
            outcomes
        }
    };

    for (label, outcome) in &outcomes {
        if cli.json {
            println!("{}", serde_json::to_string_pretty(outcome)?);
        } else {
            print_summary(label, outcome);
        }
    }

    if outcomes.iter().all(|(_, outcome)| outcome.ok) {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

fn print_summary(label: &str, outcome: &ParseOutcome) {
    println!("== {label}");

    let Some(document) = outcome.document.as_ref().filter(|_| outcome.ok) else {
        println!("Failed to parse resume");
        for error in &outcome.errors {
            println!("  - {error}");
        }
        return;
    };

    print_document(document);
    for note in &outcome.notes {
        println!("note: {note}");
    }
    println!();
}

fn line_count(blocks: &[ContentBlock]) -> usize {
    blocks.iter().map(|b| b.lines().count()).sum()
}

fn print_document(document: &ParsedDocument) {
    let contact = &document.contact;
    println!(
        "Contact: {} | {} | {}",
        contact.name.as_deref().unwrap_or("-"),
        contact.email.as_deref().unwrap_or("-"),
        contact.phone.as_deref().unwrap_or("-"),
    );

    println!("Sections:");
    for (kind, blocks) in document.sections.iter().filter(|(_, b)| !b.is_empty()) {
        println!("  {kind}: {} blocks, {} lines", blocks.len(), line_count(blocks));
    }

    let preview: Vec<&str> = document
        .all_keywords
        .iter()
        .take(KEYWORD_PREVIEW)
        .map(String::as_str)
        .collect();
    println!("Keywords ({}): {}", document.all_keywords.len(), preview.join(", "));

    println!("Keywords by section:");
    for (kind, blocks) in document.sections.iter() {
        let keywords: BTreeSet<&str> = blocks
            .iter()
            .flat_map(|b| b.keywords.iter().map(String::as_str))
            .collect();
        if keywords.is_empty() {
            continue;
        }
        let preview: Vec<&str> = keywords.into_iter().take(SECTION_KEYWORD_PREVIEW).collect();
        println!("  {kind}: {}", preview.join(", "));
    }
}
