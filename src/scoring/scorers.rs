use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use super::category::Category;
use crate::grammar::{self, Corrector, PunctuationSplitter, RuleCorrector, SentenceSplitter};

static DIGIT_RUN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").expect("valid regex"));

pub const UNDERSTANDING_KEYWORDS: &[&str] = &["issue", "problem", "background", "crisis", "topic"];
pub const POLICY_KEYWORDS: &[&str] = &["delegate", "government", "position", "foreign policy"];
pub const ANALYSIS_KEYWORDS: &[&str] = &["solution", "recommend", "propose", "analysis", "impact"];
pub const FORMATTING_SECTIONS: &[&str] =
    &["introduction", "body", "conclusion", "heading", "subheading"];

/// Per-paper inputs besides the text itself.
#[derive(Debug, Clone, Default)]
pub struct ScoringContext {
    pub country: String,
}

impl ScoringContext {
    pub fn new(country: impl Into<String>) -> Self {
        Self {
            country: country.into(),
        }
    }
}

/// Result of one scorer on one paper.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryScore {
    pub category: Category,
    pub score: u32,
    /// Signal count before capping (keyword hits, digit runs, flagged sentences)
    pub raw: u32,
    pub detail: String,
}

/// A rubric dimension. Implementations must be total over all text and never
/// exceed the category cap.
pub trait Scorer: Send + Sync {
    fn category(&self) -> Category;
    fn evaluate(&self, text: &str, ctx: &ScoringContext) -> CategoryScore;
}

/// Sums substring occurrences of a keyword list in the lowercased text.
///
/// Matching is plain substring counting: "issue" also counts inside
/// "issues".
#[derive(Debug, Clone)]
pub struct KeywordScorer {
    category: Category,
    keywords: Vec<String>,
    include_country: bool,
}

impl KeywordScorer {
    pub fn new<S: Into<String>>(
        category: Category,
        keywords: impl IntoIterator<Item = S>,
        include_country: bool,
    ) -> Self {
        Self {
            category,
            keywords: keywords.into_iter().map(Into::into).collect(),
            include_country,
        }
    }

    pub fn understanding() -> Self {
        Self::new(Category::Understanding, UNDERSTANDING_KEYWORDS.iter().copied(), false)
    }

    /// The lowercased country name is prepended at scoring time.
    pub fn policy_alignment() -> Self {
        Self::new(Category::PolicyAlignment, POLICY_KEYWORDS.iter().copied(), true)
    }

    pub fn analysis() -> Self {
        Self::new(Category::Analysis, ANALYSIS_KEYWORDS.iter().copied(), false)
    }
}

impl Scorer for KeywordScorer {
    fn category(&self) -> Category {
        self.category
    }

    fn evaluate(&self, text: &str, ctx: &ScoringContext) -> CategoryScore {
        let lower = text.to_lowercase();
        let country = self.include_country.then(|| ctx.country.to_lowercase());
        let keywords = country.iter().chain(self.keywords.iter());

        let mut raw = 0u32;
        let mut hits = Vec::new();
        for keyword in keywords {
            let count = count_occurrences(&lower, keyword);
            raw = raw.saturating_add(count);
            if count > 0 {
                hits.push(format!("{}={}", keyword, count));
            }
        }

        CategoryScore {
            category: self.category,
            score: raw.min(self.category.cap()),
            raw,
            detail: describe_hits(&hits, "no keywords found"),
        }
    }
}

/// One point per two numeric values (digit runs).
#[derive(Debug, Clone, Default)]
pub struct EvidenceScorer;

impl Scorer for EvidenceScorer {
    fn category(&self) -> Category {
        Category::Evidence
    }

    fn evaluate(&self, text: &str, _ctx: &ScoringContext) -> CategoryScore {
        let raw = DIGIT_RUN_RE.find_iter(text).count() as u32;
        CategoryScore {
            category: Category::Evidence,
            score: (raw / 2).min(Category::Evidence.cap()),
            raw,
            detail: format!("{} numeric values", raw),
        }
    }
}

/// One point per structural keyword present at least once.
#[derive(Debug, Clone)]
pub struct FormattingScorer {
    sections: Vec<String>,
}

impl Default for FormattingScorer {
    fn default() -> Self {
        Self::new(FORMATTING_SECTIONS.iter().copied())
    }
}

impl FormattingScorer {
    pub fn new<S: Into<String>>(sections: impl IntoIterator<Item = S>) -> Self {
        Self {
            sections: sections.into_iter().map(Into::into).collect(),
        }
    }
}

impl Scorer for FormattingScorer {
    fn category(&self) -> Category {
        Category::Formatting
    }

    fn evaluate(&self, text: &str, _ctx: &ScoringContext) -> CategoryScore {
        let lower = text.to_lowercase();
        let present: Vec<String> = self
            .sections
            .iter()
            .filter(|s| lower.contains(s.as_str()))
            .cloned()
            .collect();
        let raw = present.len() as u32;
        CategoryScore {
            category: Category::Formatting,
            score: raw.min(Category::Formatting.cap()),
            raw,
            detail: describe_hits(&present, "no section keywords found"),
        }
    }
}

/// Starts at 5 and loses a point per three sentences the corrector changes.
pub struct GrammarScorer {
    splitter: Box<dyn SentenceSplitter>,
    corrector: Box<dyn Corrector>,
}

impl Default for GrammarScorer {
    fn default() -> Self {
        Self::new(PunctuationSplitter, RuleCorrector::new())
    }
}

impl GrammarScorer {
    pub fn new(
        splitter: impl SentenceSplitter + 'static,
        corrector: impl Corrector + 'static,
    ) -> Self {
        Self {
            splitter: Box::new(splitter),
            corrector: Box::new(corrector),
        }
    }
}

impl Scorer for GrammarScorer {
    fn category(&self) -> Category {
        Category::Grammar
    }

    fn evaluate(&self, text: &str, _ctx: &ScoringContext) -> CategoryScore {
        let sentences = self.splitter.split(text).len();
        let errors = grammar::count_errors(text, self.splitter.as_ref(), self.corrector.as_ref());
        let cap = Category::Grammar.cap();
        CategoryScore {
            category: Category::Grammar,
            score: cap.saturating_sub((errors / 3).min(cap)),
            raw: errors,
            detail: format!("{} of {} sentences flagged", errors, sentences),
        }
    }
}

fn count_occurrences(haystack: &str, needle: &str) -> u32 {
    haystack.matches(needle).count() as u32
}

fn describe_hits(hits: &[String], empty: &str) -> String {
    if hits.is_empty() {
        empty.to_string()
    } else {
        hits.join(", ")
    }
}

pub fn score_understanding(text: &str) -> u32 {
    KeywordScorer::understanding()
        .evaluate(text, &ScoringContext::default())
        .score
}

pub fn score_policy_alignment(text: &str, country: &str) -> u32 {
    KeywordScorer::policy_alignment()
        .evaluate(text, &ScoringContext::new(country))
        .score
}

pub fn score_analysis(text: &str) -> u32 {
    KeywordScorer::analysis()
        .evaluate(text, &ScoringContext::default())
        .score
}

pub fn score_evidence(text: &str) -> u32 {
    EvidenceScorer.evaluate(text, &ScoringContext::default()).score
}

pub fn score_formatting(text: &str) -> u32 {
    FormattingScorer::default()
        .evaluate(text, &ScoringContext::default())
        .score
}

pub fn score_grammar(text: &str) -> u32 {
    GrammarScorer::default()
        .evaluate(text, &ScoringContext::default())
        .score
}
