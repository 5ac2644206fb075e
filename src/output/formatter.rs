use std::io::IsTerminal;

use chrono::Utc;
use owo_colors::OwoColorize;
use serde::Serialize;

use crate::evaluate::Evaluation;
use crate::extract::DocumentFormat;
use crate::scoring::{Category, CategoryScore, ScoreCard, ScoreResult, MAX_OVERALL};

const TITLE: &str = "==== MUN POSITION PAPER EVALUATION (OFFLINE) ====";
const SCORES_HEADING: &str = "----- SCORES -----";
const FEEDBACK_HEADING: &str = "----- FEEDBACK -----";

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Render the full text report: metadata, scores, overall, feedback.
pub fn format_report(evaluation: &Evaluation, use_colors: bool) -> String {
    let request = &evaluation.request;
    let card = evaluation.scores();
    let mut lines = Vec::new();

    lines.push(String::new());
    lines.push(heading(TITLE, use_colors));
    lines.push(format!("Delegate: {}", request.delegate));
    lines.push(format!("Country: {}", request.country));
    lines.push(format!("Committee: {}", request.committee));
    lines.push(String::new());

    lines.push(heading(SCORES_HEADING, use_colors));
    lines.extend(format_scores(card, use_colors));
    lines.push(String::new());

    let overall = format!("Overall Score: {} / {}", card.overall(), MAX_OVERALL);
    lines.push(if use_colors {
        overall.bold().to_string()
    } else {
        overall
    });
    lines.push(String::new());

    lines.push(heading(FEEDBACK_HEADING, use_colors));
    for item in &evaluation.feedback {
        lines.push(format!("- {}", item));
    }

    lines.join("\n")
}

/// One "Label: value" line per category, then the overall total.
pub fn format_scores(card: &ScoreCard, use_colors: bool) -> Vec<String> {
    let mut lines: Vec<String> = card
        .iter()
        .map(|(category, score)| {
            let value = score.to_string();
            if use_colors {
                format!("{}: {}", category.label(), colorize(category, score, &value))
            } else {
                format!("{}: {}", category.label(), value)
            }
        })
        .collect();
    lines.push(format!("Overall: {}", card.overall()));
    lines
}

/// Per-category detail lines for verbose mode.
pub fn format_breakdown(result: &ScoreResult) -> String {
    result
        .breakdown
        .iter()
        .map(|entry| {
            format!(
                "  {:<17} {:>2}/{:<2} ({})",
                entry.category.label(),
                entry.score,
                entry.category.cap(),
                entry.detail
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Serialize)]
struct JsonReport<'a> {
    delegate: &'a str,
    country: &'a str,
    committee: &'a str,
    path: String,
    format: DocumentFormat,
    characters: usize,
    scores: &'a ScoreCard,
    max_overall: u32,
    breakdown: &'a [CategoryScore],
    feedback: &'a [String],
    evaluated_at: String,
}

/// Render an evaluation as pretty-printed JSON.
pub fn format_json(evaluation: &Evaluation) -> serde_json::Result<String> {
    let request = &evaluation.request;
    let report = JsonReport {
        delegate: &request.delegate,
        country: &request.country,
        committee: &request.committee,
        path: request.path.display().to_string(),
        format: evaluation.format,
        characters: evaluation.characters,
        scores: evaluation.scores(),
        max_overall: MAX_OVERALL,
        breakdown: &evaluation.result.breakdown,
        feedback: &evaluation.feedback,
        evaluated_at: Utc::now().to_rfc3339(),
    };
    serde_json::to_string_pretty(&report)
}

fn heading(text: &str, use_colors: bool) -> String {
    if use_colors {
        text.bold().cyan().to_string()
    } else {
        text.to_string()
    }
}

fn colorize(category: Category, score: u32, value: &str) -> String {
    if score < category.threshold() {
        value.red().to_string()
    } else {
        value.green().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluate::EvaluationRequest;
    use crate::feedback::generate_feedback;

    fn sample_evaluation(card: ScoreCard) -> Evaluation {
        Evaluation {
            request: EvaluationRequest::new("paper.txt", "Ana Silva", "Brazil", "UNHRC"),
            format: DocumentFormat::PlainText,
            characters: 1200,
            result: ScoreResult {
                card,
                breakdown: vec![CategoryScore {
                    category: Category::Evidence,
                    score: card.get(Category::Evidence),
                    raw: 8,
                    detail: "8 numeric values".to_string(),
                }],
            },
            feedback: generate_feedback(&card),
        }
    }

    #[test]
    fn test_report_structure() {
        let evaluation = sample_evaluation(ScoreCard::new(3, 6, 7, 4, 2, 5));
        let report = format_report(&evaluation, false);
        let lines: Vec<&str> = report.lines().collect();

        assert_eq!(lines[0], "");
        assert_eq!(lines[1], TITLE);
        assert_eq!(lines[2], "Delegate: Ana Silva");
        assert_eq!(lines[3], "Country: Brazil");
        assert_eq!(lines[4], "Committee: UNHRC");
        assert_eq!(lines[5], "");
        assert_eq!(lines[6], SCORES_HEADING);
        assert_eq!(lines[7], "Understanding: 3");
        assert_eq!(lines[8], "Policy_alignment: 6");
        assert_eq!(lines[9], "Analysis: 7");
        assert_eq!(lines[10], "Evidence: 4");
        assert_eq!(lines[11], "Formatting: 2");
        assert_eq!(lines[12], "Grammar: 5");
        assert_eq!(lines[13], "Overall: 27");
        assert_eq!(lines[14], "");
        assert_eq!(lines[15], "Overall Score: 27 / 50");
        assert_eq!(lines[16], "");
        assert_eq!(lines[17], FEEDBACK_HEADING);
        assert_eq!(lines[18], "- Improve understanding of the topic. Add more background details.");
        assert_eq!(lines[19], "- Add statistics, dates, treaties, and real facts.");
        assert_eq!(lines[20], "- Improve formatting with headings and structure.");
        assert_eq!(lines.len(), 21);
    }

    #[test]
    fn test_report_excellent() {
        let evaluation = sample_evaluation(ScoreCard::new(10, 10, 10, 10, 5, 5));
        let report = format_report(&evaluation, false);
        assert!(report.contains("Overall Score: 50 / 50"));
        assert!(report.ends_with("- Excellent position paper. Well-structured and detailed!"));
    }

    #[test]
    fn test_report_with_colors_keeps_text() {
        let evaluation = sample_evaluation(ScoreCard::new(3, 6, 7, 4, 2, 5));
        let report = format_report(&evaluation, true);
        assert!(report.contains("Delegate: Ana Silva"));
        assert!(report.contains("Overall Score: 27 / 50"));
        assert!(report.contains('\u{1b}'));
    }

    #[test]
    fn test_format_breakdown() {
        let evaluation = sample_evaluation(ScoreCard::new(3, 6, 7, 4, 2, 5));
        let breakdown = format_breakdown(&evaluation.result);
        assert!(breakdown.contains("Evidence"));
        assert!(breakdown.contains(" 4/10"));
        assert!(breakdown.contains("(8 numeric values)"));
    }

    #[test]
    fn test_format_json() {
        let evaluation = sample_evaluation(ScoreCard::new(3, 6, 7, 4, 2, 5));
        let json = format_json(&evaluation).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["delegate"], "Ana Silva");
        assert_eq!(value["format"], "plain_text");
        assert_eq!(value["scores"]["overall"], 27);
        assert_eq!(value["scores"]["policy_alignment"], 6);
        assert_eq!(value["max_overall"], 50);
        assert_eq!(value["breakdown"][0]["category"], "evidence");
        assert_eq!(value["feedback"].as_array().unwrap().len(), 3);
        assert!(value["evaluated_at"].as_str().is_some());
    }
}
