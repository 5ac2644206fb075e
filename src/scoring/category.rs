use serde::Serialize;

/// One rubric dimension.
///
/// Caps and feedback thresholds are fixed; the overall maximum of 50 relies
/// on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Understanding,
    PolicyAlignment,
    Analysis,
    Evidence,
    Formatting,
    Grammar,
}

/// Highest possible overall score.
pub const MAX_OVERALL: u32 = 50;

impl Category {
    /// All categories in report and feedback order.
    pub const ALL: [Category; 6] = [
        Category::Understanding,
        Category::PolicyAlignment,
        Category::Analysis,
        Category::Evidence,
        Category::Formatting,
        Category::Grammar,
    ];

    /// Snake-case key, as used in config and JSON output.
    pub fn key(self) -> &'static str {
        match self {
            Category::Understanding => "understanding",
            Category::PolicyAlignment => "policy_alignment",
            Category::Analysis => "analysis",
            Category::Evidence => "evidence",
            Category::Formatting => "formatting",
            Category::Grammar => "grammar",
        }
    }

    /// Report label: the key with only its first letter upper-cased.
    pub fn label(self) -> String {
        let key = self.key();
        let mut chars = key.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    pub fn cap(self) -> u32 {
        match self {
            Category::Formatting | Category::Grammar => 5,
            _ => 10,
        }
    }

    /// Scores strictly below this trigger the category's advisory.
    pub fn threshold(self) -> u32 {
        match self {
            Category::Formatting | Category::Grammar => 3,
            _ => 5,
        }
    }

    pub fn advice(self) -> &'static str {
        match self {
            Category::Understanding => {
                "Improve understanding of the topic. Add more background details."
            }
            Category::PolicyAlignment => "Add clearer links to your country's foreign policy.",
            Category::Analysis => "Provide stronger solutions and analysis.",
            Category::Evidence => "Add statistics, dates, treaties, and real facts.",
            Category::Formatting => "Improve formatting with headings and structure.",
            Category::Grammar => "Work on grammar and clarity of writing.",
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_caps_sum_to_max_overall() {
        let total: u32 = Category::ALL.iter().map(|c| c.cap()).sum();
        assert_eq!(total, MAX_OVERALL);
    }

    #[test]
    fn test_labels() {
        assert_eq!(Category::Understanding.label(), "Understanding");
        assert_eq!(Category::PolicyAlignment.label(), "Policy_alignment");
        assert_eq!(Category::Grammar.label(), "Grammar");
    }

    #[test]
    fn test_thresholds() {
        assert_eq!(Category::Evidence.threshold(), 5);
        assert_eq!(Category::Formatting.threshold(), 3);
        assert_eq!(Category::Grammar.threshold(), 3);
    }

    #[test]
    fn test_index_matches_order() {
        for (i, category) in Category::ALL.iter().enumerate() {
            assert_eq!(category.index(), i);
        }
    }
}
