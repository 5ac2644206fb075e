use std::fs;
use std::path::Path;

use super::ExtractError;

/// Extract page text in order and concatenate without a separator.
pub fn extract(path: &Path) -> Result<String, ExtractError> {
    let bytes = fs::read(path).map_err(|e| ExtractError::io(path, e))?;
    extract_from_bytes(&bytes)
}

pub fn extract_from_bytes(bytes: &[u8]) -> Result<String, ExtractError> {
    let pages = pdf_extract::extract_text_from_mem_by_pages(bytes)
        .map_err(|e| ExtractError::Pdf(e.to_string()))?;
    tracing::debug!(pages = pages.len(), "pdf pages extracted");
    Ok(pages.concat())
}
