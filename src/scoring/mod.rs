pub mod category;
pub mod config;
pub mod engine;
pub mod scorers;
pub mod validation;

pub use category::{Category, MAX_OVERALL};
pub use config::*;
pub use engine::{Rubric, ScoreCard, ScoreResult};
pub use scorers::{
    score_analysis, score_evidence, score_formatting, score_grammar, score_policy_alignment,
    score_understanding, CategoryScore, EvidenceScorer, FormattingScorer, GrammarScorer,
    KeywordScorer, Scorer, ScoringContext,
};
pub use validation::validate_rubric;
