use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};

use crate::extract::{self, DocumentFormat};
use crate::feedback::generate_feedback;
use crate::output;
use crate::scoring::{Rubric, ScoreCard, ScoreResult, ScoringContext};

/// The four caller inputs plus an optional explicit document format.
#[derive(Debug, Clone)]
pub struct EvaluationRequest {
    pub path: PathBuf,
    pub delegate: String,
    pub country: String,
    pub committee: String,
    /// Skip detection and read the file as this format
    pub format: Option<DocumentFormat>,
}

impl EvaluationRequest {
    pub fn new(
        path: impl Into<PathBuf>,
        delegate: impl Into<String>,
        country: impl Into<String>,
        committee: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            delegate: delegate.into(),
            country: country.into(),
            committee: committee.into(),
            format: None,
        }
    }

    pub fn with_format(mut self, format: Option<DocumentFormat>) -> Self {
        self.format = format;
        self
    }
}

#[derive(Debug, Clone)]
pub struct Evaluation {
    pub request: EvaluationRequest,
    pub format: DocumentFormat,
    /// Characters of extracted text
    pub characters: usize,
    pub result: ScoreResult,
    pub feedback: Vec<String>,
}

impl Evaluation {
    pub fn scores(&self) -> &ScoreCard {
        &self.result.card
    }
}

/// Extract, score and derive feedback for one paper.
///
/// Extraction failures abort the evaluation; there are no partial results.
pub fn evaluate_paper(request: &EvaluationRequest, rubric: &Rubric) -> Result<Evaluation> {
    let start = Instant::now();
    let path = &request.path;

    let (format, text) = match request.format {
        Some(format) => extract::extract_text_as(path, format).map(|text| (format, text)),
        None => extract::extract_detected(path),
    }
    .with_context(|| format!("Failed to extract text from {}", path.display()))?;
    tracing::info!(path = %path.display(), %format, "paper extracted");

    let ctx = ScoringContext::new(request.country.clone());
    let result = rubric.score(&text, &ctx);
    let feedback = generate_feedback(&result.card);

    tracing::info!(
        overall = result.card.overall(),
        feedback = feedback.len(),
        elapsed = %humantime::format_duration(start.elapsed()),
        "evaluation finished"
    );

    Ok(Evaluation {
        request: request.clone(),
        format,
        characters: text.chars().count(),
        result,
        feedback,
    })
}

/// Print the text report for an evaluation to stdout.
pub fn print_report(evaluation: &Evaluation, use_colors: bool) {
    println!("{}", output::format_report(evaluation, use_colors));
}
