//! Document text extraction: turns uploaded PDF, DOCX and legacy DOC bytes into plain text.
//!
//! The résumé pipeline only sees the `DocumentParser` trait. `DocumentExtractor` is the
//! production implementation; tests swap in their own.

pub mod docx;
pub mod legacy_doc;
pub mod pdf;

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

use crate::models::resume::FileInput;
use crate::resume::validation::{file_extension, has_supported_extension, FileRules};

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Không nhận dạng được định dạng file '{0}'")]
    UnrecognizedFormat(String),

    #[error("PDF extraction failed: {0}")]
    Pdf(String),

    #[error("DOCX extraction failed: {0}")]
    Docx(String),

    #[error("DOC extraction failed: {0}")]
    Doc(String),

    #[error("Extraction task aborted: {0}")]
    Aborted(String),
}

/// The text-extraction collaborator.
///
/// `extract_text` takes the upload by value: the buffer is released as soon as
/// extraction finishes, whatever the outcome.
#[async_trait]
pub trait DocumentParser: FileRules + Send + Sync {
    async fn extract_text(&self, file: FileInput) -> Result<String, ParseError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
    Doc,
}

const PDF_MAGIC: &[u8] = b"%PDF-";
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";
const OLE_MAGIC: &[u8] = &[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

impl DocumentFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::Docx),
            "doc" => Some(Self::Doc),
            _ => None,
        }
    }

    /// Identifies a format from its leading magic bytes.
    pub fn sniff(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(PDF_MAGIC) {
            Some(Self::Pdf)
        } else if bytes.starts_with(ZIP_MAGIC) {
            Some(Self::Docx)
        } else if bytes.starts_with(OLE_MAGIC) {
            Some(Self::Doc)
        } else {
            None
        }
    }

    /// Content wins over the name: a `.doc` that is really a DOCX is parsed as DOCX.
    pub fn detect(filename: &str, bytes: &[u8]) -> Option<Self> {
        Self::sniff(bytes).or_else(|| file_extension(filename).and_then(|e| Self::from_extension(&e)))
    }

    fn extract(self, bytes: &[u8]) -> Result<String, ParseError> {
        match self {
            Self::Pdf => pdf::extract_pdf_text(bytes),
            Self::Docx => docx::extract_docx_text(bytes),
            Self::Doc => legacy_doc::extract_doc_text(bytes),
        }
    }
}

/// Production parser backed by `pdf-extract`, `zip` + `quick-xml`, and a byte scan for DOC.
#[derive(Debug, Clone)]
pub struct DocumentExtractor {
    max_bytes: usize,
}

impl DocumentExtractor {
    pub fn new(max_bytes: usize) -> Self {
        Self { max_bytes }
    }
}

impl FileRules for DocumentExtractor {
    fn is_supported_extension(&self, filename: &str) -> bool {
        has_supported_extension(filename)
    }

    fn max_allowed_bytes(&self) -> usize {
        self.max_bytes
    }
}

#[async_trait]
impl DocumentParser for DocumentExtractor {
    async fn extract_text(&self, file: FileInput) -> Result<String, ParseError> {
        let format = DocumentFormat::detect(file.filename(), &file.bytes)
            .ok_or_else(|| ParseError::UnrecognizedFormat(file.filename().to_string()))?;
        debug!(?format, bytes = file.bytes.len(), "Extracting document text");

        // pdf-extract can panic on malformed input; a panic surfaces as a JoinError here.
        let bytes = file.bytes;
        tokio::task::spawn_blocking(move || format.extract(&bytes))
            .await
            .map_err(|e| ParseError::Aborted(e.to_string()))?
    }
}
