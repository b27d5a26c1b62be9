//! Parse orchestrator: contact extraction, segmentation, and keyword indexing,
//! followed by the optional correction pass.
//!
//! Both entry points return a `ParseOutcome` under every input; nothing here
//! returns `Err` or panics out to the caller.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::task::JoinError;
use tracing::{error, info, warn};

use crate::correction::{CorrectionError, SectionCorrector};
use crate::errors::ParseError;
use crate::extract::{DocumentExtractor, DocumentFormat, FileExtractor};
use crate::models::{ParseOutcome, ParsedDocument};
use crate::parsing::contact::extract_contact;
use crate::parsing::keywords::extract_keywords;
use crate::parsing::segmenter::segment_sections;

pub const NOTE_PARSED: &str = "Resume parsed successfully";
pub const NOTE_CORRECTED: &str = "Sections verified/corrected by remote model";
pub const NOTE_CORRECTION_FAILED: &str = "Remote correction failed, using initial parse.";

/// Runs the deterministic local stage. Total: every input yields a document.
pub fn parse_local(text: &str, source_path: Option<PathBuf>) -> ParsedDocument {
    ParsedDocument {
        raw_text: text.to_string(),
        contact: extract_contact(text),
        sections: segment_sections(text),
        all_keywords: extract_keywords(text),
        source_path,
    }
}

pub struct ResumeParser {
    extractor: Arc<dyn DocumentExtractor>,
    corrector: Option<Arc<dyn SectionCorrector>>,
}

impl Default for ResumeParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ResumeParser {
    /// Local-only parser reading files from disk.
    pub fn new() -> Self {
        Self {
            extractor: Arc::new(FileExtractor),
            corrector: None,
        }
    }

    pub fn with_corrector(mut self, corrector: Arc<dyn SectionCorrector>) -> Self {
        self.corrector = Some(corrector);
        self
    }

    pub fn with_extractor(mut self, extractor: Arc<dyn DocumentExtractor>) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn correction_enabled(&self) -> bool {
        self.corrector.is_some()
    }

    /// Parses resume text.
    pub async fn parse_text(&self, text: &str) -> ParseOutcome {
        if text.trim().is_empty() {
            return ParseOutcome::failure(ParseError::EmptyInput);
        }
        self.parse_document(text, None).await
    }

    /// Extracts text from a `.pdf`, `.docx` or `.txt` file and parses it.
    pub async fn parse_file(&self, path: impl AsRef<Path>) -> ParseOutcome {
        self.parse_file_as(path.as_ref(), None).await
    }

    /// Like `parse_file`, but records `display_path` as the document source.
    /// Used when `path` is a temporary copy of an upload.
    pub async fn parse_file_as(&self, path: &Path, display_path: Option<PathBuf>) -> ParseOutcome {
        let text = match self.read_file(path).await {
            Ok(text) => text,
            Err(e) => {
                warn!(path = %path.display(), "file rejected: {e}");
                return ParseOutcome::failure(e);
            }
        };
        let source = display_path.unwrap_or_else(|| path.to_path_buf());
        self.parse_document(&text, Some(source)).await
    }

    async fn read_file(&self, path: &Path) -> Result<String, ParseError> {
        if !path.exists() {
            return Err(ParseError::FileNotFound(path.display().to_string()));
        }

        let format = DocumentFormat::from_path(path).ok_or_else(|| {
            let ext = path
                .extension()
                .map(|e| format!(".{}", e.to_string_lossy().to_lowercase()))
                .unwrap_or_else(|| "(none)".to_string());
            ParseError::UnsupportedFormat(ext)
        })?;

        let extractor = Arc::clone(&self.extractor);
        let owned_path = path.to_path_buf();
        let text = tokio::task::spawn_blocking(move || extractor.extract(&owned_path, format))
            .await
            .map_err(|e| {
                let message = join_error_message(e);
                error!("internal fault during extraction: {message}");
                ParseError::Internal(message)
            })??;

        if text.trim().is_empty() {
            return Err(ParseError::EmptyContent);
        }
        Ok(text)
    }

    async fn parse_document(&self, text: &str, source_path: Option<PathBuf>) -> ParseOutcome {
        let document = match catch_fault(|| parse_local(text, source_path)) {
            Ok(document) => document,
            Err(e) => return ParseOutcome::failure(e),
        };

        info!(
            blocks = document.sections.block_count(),
            keywords = document.all_keywords.len(),
            has_name = document.contact.name.is_some(),
            "local parse complete"
        );

        let Some(corrector) = &self.corrector else {
            return ParseOutcome::success(document, vec![NOTE_PARSED.to_string()]);
        };

        match run_correction(Arc::clone(corrector), document.clone()).await {
            Ok(corrected) => {
                info!(blocks = corrected.sections.block_count(), "sections corrected");
                ParseOutcome::success(corrected, vec![NOTE_CORRECTED.to_string()])
            }
            Err(e) => {
                warn!("section correction failed, keeping local parse: {e}");
                let reason = ParseError::from(e).to_string();
                ParseOutcome::success(document, vec![NOTE_CORRECTION_FAILED.to_string(), reason])
            }
        }
    }
}

/// Runs the corrector on its own task so a panic inside it surfaces as a
/// `CorrectionError` instead of unwinding through the caller.
async fn run_correction(
    corrector: Arc<dyn SectionCorrector>,
    document: ParsedDocument,
) -> Result<ParsedDocument, CorrectionError> {
    tokio::spawn(async move { corrector.correct(&document).await })
        .await
        .unwrap_or_else(|e| Err(CorrectionError::Aborted(join_error_message(e))))
}

fn join_error_message(err: JoinError) -> String {
    match err.try_into_panic() {
        Ok(payload) => panic_message(payload.as_ref()),
        Err(err) => err.to_string(),
    }
}

/// Runs `f`, converting a panic into `ParseError::Internal`.
fn catch_fault<T>(f: impl FnOnce() -> T) -> Result<T, ParseError> {
    panic::catch_unwind(AssertUnwindSafe(f)).map_err(|payload| {
        let message = panic_message(payload.as_ref());
        error!("internal fault during parse: {message}");
        ParseError::Internal(message)
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unexpected internal fault".to_string()
    }
}
