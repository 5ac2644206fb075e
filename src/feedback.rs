use crate::scoring::{Category, ScoreCard};

pub const EXCELLENT: &str = "Excellent position paper. Well-structured and detailed!";

/// One advisory per category scoring below its threshold, in rubric order.
/// A paper with no weak category gets a single congratulatory line.
pub fn generate_feedback(card: &ScoreCard) -> Vec<String> {
    let feedback: Vec<String> = Category::ALL
        .iter()
        .filter(|c| card.get(**c) < c.threshold())
        .map(|c| c.advice().to_string())
        .collect();

    if feedback.is_empty() {
        vec![EXCELLENT.to_string()]
    } else {
        feedback
    }
}
