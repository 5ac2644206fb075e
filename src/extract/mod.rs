pub mod docx;
pub mod pdf;
pub mod plain;

use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use serde::Serialize;

const PDF_MAGIC: &[u8] = b"%PDF-";
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

/// Supported document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentFormat {
    Pdf,
    WordDoc,
    PlainText,
}

impl DocumentFormat {
    /// Resolve the format of a file on disk.
    ///
    /// A `.pdf` or `.docx` suffix wins (case-sensitive). Any other name is
    /// sniffed by its leading bytes and falls back to plain text.
    pub fn detect(path: &Path) -> Result<Self, ExtractError> {
        if let Some(format) = Self::from_extension(path) {
            return Ok(format);
        }
        let mut head = [0u8; 8];
        let read = File::open(path)
            .and_then(|mut f| f.read(&mut head))
            .map_err(|e| ExtractError::io(path, e))?;
        Ok(Self::sniff(&head[..read]))
    }

    /// Format implied by the file name alone, if any.
    pub fn from_extension(path: &Path) -> Option<Self> {
        let name = path.to_string_lossy();
        if name.ends_with(".pdf") {
            Some(DocumentFormat::Pdf)
        } else if name.ends_with(".docx") {
            Some(DocumentFormat::WordDoc)
        } else {
            None
        }
    }

    /// Format implied by the first bytes of a file.
    pub fn sniff(head: &[u8]) -> Self {
        if head.starts_with(PDF_MAGIC) {
            DocumentFormat::Pdf
        } else if head.starts_with(ZIP_MAGIC) {
            DocumentFormat::WordDoc
        } else {
            DocumentFormat::PlainText
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentFormat::Pdf => write!(f, "pdf"),
            DocumentFormat::WordDoc => write!(f, "docx"),
            DocumentFormat::PlainText => write!(f, "text"),
        }
    }
}

impl FromStr for DocumentFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pdf" => Ok(DocumentFormat::Pdf),
            "docx" | "word" => Ok(DocumentFormat::WordDoc),
            "text" | "txt" | "plain" => Ok(DocumentFormat::PlainText),
            other => Err(format!(
                "unknown document format '{}' (expected pdf, docx or text)",
                other
            )),
        }
    }
}

#[derive(Debug)]
pub enum ExtractError {
    Io { path: String, source: std::io::Error },
    Pdf(String),
    WordDoc(String),
}

impl ExtractError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        ExtractError::Io {
            path: path.display().to_string(),
            source,
        }
    }
}

impl fmt::Display for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractError::Io { path, source } => write!(f, "Cannot read {}: {}", path, source),
            ExtractError::Pdf(msg) => write!(f, "Malformed PDF: {}", msg),
            ExtractError::WordDoc(msg) => write!(f, "Malformed Word document: {}", msg),
        }
    }
}

impl std::error::Error for ExtractError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExtractError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Extract the whole text of a document, detecting its format.
pub fn extract_text(path: &Path) -> Result<String, ExtractError> {
    extract_detected(path).map(|(_, text)| text)
}

/// Detect the format, extract, and report the format that was actually used.
///
/// A format guessed from content alone is only a hint: if the parser rejects
/// the file it is read as plain text instead.
pub fn extract_detected(path: &Path) -> Result<(DocumentFormat, String), ExtractError> {
    if let Some(format) = DocumentFormat::from_extension(path) {
        return extract_text_as(path, format).map(|text| (format, text));
    }
    let format = DocumentFormat::detect(path)?;
    match extract_text_as(path, format) {
        Ok(text) => Ok((format, text)),
        Err(e @ (ExtractError::Pdf(_) | ExtractError::WordDoc(_))) => {
            tracing::debug!(%format, error = %e, "sniffed format rejected, reading as text");
            let text = extract_text_as(path, DocumentFormat::PlainText)?;
            Ok((DocumentFormat::PlainText, text))
        }
        Err(e) => Err(e),
    }
}

/// Extract the whole text of a document in a known format.
pub fn extract_text_as(path: &Path, format: DocumentFormat) -> Result<String, ExtractError> {
    tracing::debug!(path = %path.display(), %format, "extracting text");
    let text = match format {
        DocumentFormat::Pdf => pdf::extract(path)?,
        DocumentFormat::WordDoc => docx::extract(path)?,
        DocumentFormat::PlainText => plain::extract(path)?,
    };
    tracing::debug!(chars = text.chars().count(), "extraction finished");
    Ok(text)
}
