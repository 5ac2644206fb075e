use std::fs;
use std::path::Path;

use docx_rs::{DocumentChild, ParagraphChild, RunChild};

use super::ExtractError;

/// Extract body paragraphs from a `.docx` package, joined by newlines.
pub fn extract(path: &Path) -> Result<String, ExtractError> {
    let bytes = fs::read(path).map_err(|e| ExtractError::io(path, e))?;
    extract_from_bytes(&bytes)
}

/// Only paragraphs that sit directly in the document body are read; tables
/// and other block content are skipped. Empty paragraphs are kept so blank
/// lines survive the join.
pub fn extract_from_bytes(bytes: &[u8]) -> Result<String, ExtractError> {
    let docx = docx_rs::read_docx(bytes).map_err(|e| ExtractError::WordDoc(format!("{:?}", e)))?;

    let paragraphs: Vec<String> = docx
        .document
        .children
        .iter()
        .filter_map(|child| match child {
            DocumentChild::Paragraph(para) => Some(paragraph_text(&para.children)),
            _ => None,
        })
        .collect();

    tracing::debug!(paragraphs = paragraphs.len(), "docx paragraphs extracted");
    Ok(paragraphs.join("\n"))
}

/// Run text of a paragraph, including runs nested in hyperlinks.
fn paragraph_text(children: &[ParagraphChild]) -> String {
    let mut text = String::new();
    for child in children {
        match child {
            ParagraphChild::Run(run) => {
                for rc in &run.children {
                    match rc {
                        RunChild::Text(t) => text.push_str(&t.text),
                        RunChild::Tab(_) => text.push('\t'),
                        RunChild::Break(_) => text.push('\n'),
                        _ => {}
                    }
                }
            }
            ParagraphChild::Hyperlink(link) => text.push_str(&paragraph_text(&link.children)),
            _ => {}
        }
    }
    text
}
