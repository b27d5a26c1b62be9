//! Document text extraction: turns a PDF, DOCX or TXT file into plain text.
//!
//! The parser only sees `DocumentExtractor`; `FileExtractor` is the default
//! implementation backed by `pdf-extract`, `zip` + `quick-xml`, and `std::fs`.

use std::path::Path;

use thiserror::Error;

pub mod docx;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF error: {0}")]
    Pdf(String),

    #[error("DOCX error: {0}")]
    Docx(String),

    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),
}

/// File formats with a known extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
    Txt,
}

impl DocumentFormat {
    /// Resolves a lowercase extension without the leading dot.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "pdf" => Some(DocumentFormat::Pdf),
            "docx" => Some(DocumentFormat::Docx),
            "txt" => Some(DocumentFormat::Txt),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        Self::from_extension(&ext)
    }
}

/// Produces the full plain text of a document.
pub trait DocumentExtractor: Send + Sync {
    fn extract(&self, path: &Path, format: DocumentFormat) -> Result<String, ExtractError>;
}

/// Reads documents from the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileExtractor;

impl DocumentExtractor for FileExtractor {
    fn extract(&self, path: &Path, format: DocumentFormat) -> Result<String, ExtractError> {
        match format {
            DocumentFormat::Pdf => {
                pdf_extract::extract_text(path).map_err(|e| ExtractError::Pdf(format!("{e:?}")))
            }
            DocumentFormat::Docx => docx::extract_text(path),
            DocumentFormat::Txt => {
                let bytes = std::fs::read(path)?;
                Ok(String::from_utf8_lossy(&bytes).into_owned())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_format_from_path_is_case_insensitive() {
        assert_eq!(
            DocumentFormat::from_path(Path::new("cv.PDF")),
            Some(DocumentFormat::Pdf)
        );
        assert_eq!(
            DocumentFormat::from_path(Path::new("/tmp/resume.Docx")),
            Some(DocumentFormat::Docx)
        );
        assert_eq!(
            DocumentFormat::from_path(Path::new("notes.txt")),
            Some(DocumentFormat::Txt)
        );
    }

    #[test]
    fn test_unknown_or_missing_extension() {
        assert_eq!(DocumentFormat::from_path(Path::new("resume.rtf")), None);
        assert_eq!(DocumentFormat::from_path(Path::new("resume")), None);
    }

    #[test]
    fn test_txt_extraction_is_lossy_utf8() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        file.write_all(b"Jane Doe\n\xffSKILLS\n").unwrap();

        let text = FileExtractor
            .extract(file.path(), DocumentFormat::Txt)
            .unwrap();
        assert!(text.starts_with("Jane Doe\n"));
        assert!(text.contains("SKILLS"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = FileExtractor
            .extract(Path::new("/definitely/not/here.txt"), DocumentFormat::Txt)
            .unwrap_err();
        assert!(matches!(err, ExtractError::Io(_)));
    }
}
