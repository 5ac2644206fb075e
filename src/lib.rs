pub mod config;
pub mod evaluate;
pub mod extract;
pub mod feedback;
pub mod grammar;
pub mod logging;
pub mod output;
pub mod prompt;
pub mod scoring;

pub use evaluate::{evaluate_paper, print_report, Evaluation, EvaluationRequest};
pub use extract::{extract_text, DocumentFormat, ExtractError};
pub use feedback::generate_feedback;
