use anyhow::Result;
use serde::ser::{Serialize, SerializeMap, Serializer};

use super::category::Category;
use super::config::{GrammarConfig, RubricConfig};
use super::scorers::{
    CategoryScore, EvidenceScorer, FormattingScorer, GrammarScorer, KeywordScorer, Scorer,
    ScoringContext, ANALYSIS_KEYWORDS, FORMATTING_SECTIONS, POLICY_KEYWORDS,
    UNDERSTANDING_KEYWORDS,
};
use crate::grammar::{CorrectorChain, DictionaryCorrector, PunctuationSplitter, RuleCorrector};

/// Final score per category. Each value is clamped to its category cap on
/// construction and never changes afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreCard {
    scores: [u32; 6],
}

impl ScoreCard {
    pub fn new(
        understanding: u32,
        policy_alignment: u32,
        analysis: u32,
        evidence: u32,
        formatting: u32,
        grammar: u32,
    ) -> Self {
        let values = [
            understanding,
            policy_alignment,
            analysis,
            evidence,
            formatting,
            grammar,
        ];
        Self::from_fn(|c| values[c.index()])
    }

    pub fn from_fn(mut f: impl FnMut(Category) -> u32) -> Self {
        let mut scores = [0; 6];
        for category in Category::ALL {
            scores[category.index()] = f(category).min(category.cap());
        }
        Self { scores }
    }

    pub fn get(&self, category: Category) -> u32 {
        self.scores[category.index()]
    }

    /// Sum of the six category scores.
    pub fn overall(&self) -> u32 {
        self.scores.iter().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, u32)> + '_ {
        Category::ALL.into_iter().map(|c| (c, self.get(c)))
    }
}

impl Serialize for ScoreCard {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Category::ALL.len() + 1))?;
        for (category, score) in self.iter() {
            map.serialize_entry(category.key(), &score)?;
        }
        map.serialize_entry("overall", &self.overall())?;
        map.end()
    }
}

#[derive(Debug, Clone)]
pub struct ScoreResult {
    pub card: ScoreCard,
    pub breakdown: Vec<CategoryScore>,
}

/// The set of scorers applied to every paper.
pub struct Rubric {
    scorers: Vec<Box<dyn Scorer>>,
}

impl Default for Rubric {
    fn default() -> Self {
        Self::new(vec![
            Box::new(KeywordScorer::understanding()),
            Box::new(KeywordScorer::policy_alignment()),
            Box::new(KeywordScorer::analysis()),
            Box::new(EvidenceScorer),
            Box::new(FormattingScorer::default()),
            Box::new(GrammarScorer::default()),
        ])
    }
}

impl Rubric {
    /// Categories without a scorer score zero. If two scorers share a
    /// category the later one wins.
    pub fn new(scorers: Vec<Box<dyn Scorer>>) -> Self {
        Self { scorers }
    }

    /// Build the rubric from configuration, falling back to the built-in
    /// keyword lists. Loads the spelling dictionary when one is configured.
    pub fn from_config(rubric: &RubricConfig, grammar: &GrammarConfig) -> Result<Self> {
        let keywords = |configured: &Option<Vec<String>>, default: &[&str]| -> Vec<String> {
            configured
                .clone()
                .unwrap_or_else(|| default.iter().map(|s| s.to_string()).collect())
        };

        let mut rules = RuleCorrector::new();
        if let Some(ref extra) = grammar.misspellings {
            rules = rules.with_misspellings(extra.iter().map(|(k, v)| (k, v.clone())));
        }
        let mut corrector = CorrectorChain::new().with(rules);
        if let Some(ref path) = grammar.dictionary {
            corrector = corrector.with(DictionaryCorrector::load(path)?);
        }

        Ok(Self::new(vec![
            Box::new(KeywordScorer::new(
                Category::Understanding,
                keywords(&rubric.understanding, UNDERSTANDING_KEYWORDS),
                false,
            )),
            Box::new(KeywordScorer::new(
                Category::PolicyAlignment,
                keywords(&rubric.policy_alignment, POLICY_KEYWORDS),
                true,
            )),
            Box::new(KeywordScorer::new(
                Category::Analysis,
                keywords(&rubric.analysis, ANALYSIS_KEYWORDS),
                false,
            )),
            Box::new(EvidenceScorer),
            Box::new(FormattingScorer::new(keywords(
                &rubric.formatting,
                FORMATTING_SECTIONS,
            ))),
            Box::new(GrammarScorer::new(PunctuationSplitter, corrector)),
        ]))
    }

    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.scorers.iter().map(|s| s.category())
    }

    /// Run every scorer once over the text.
    pub fn score(&self, text: &str, ctx: &ScoringContext) -> ScoreResult {
        let mut breakdown: Vec<CategoryScore> = Vec::with_capacity(self.scorers.len());
        for scorer in &self.scorers {
            let result = scorer.evaluate(text, ctx);
            tracing::debug!(
                category = result.category.key(),
                score = result.score,
                raw = result.raw,
                detail = %result.detail,
                "category scored"
            );
            breakdown.retain(|r| r.category != result.category);
            breakdown.push(result);
        }
        breakdown.sort_by_key(|r| r.category.index());

        let card = ScoreCard::from_fn(|category| {
            breakdown
                .iter()
                .find(|r| r.category == category)
                .map_or(0, |r| r.score)
        });

        ScoreResult { card, breakdown }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::io::Write;

    const SAMPLE: &str = "Introduction\n\n\
        The topic of this committee is the water crisis. The background of the issue \
        is a long drought. The problem affects 12 states and 3 million people since 2019.\n\n\
        Body\n\n\
        The delegate of Kenya states that the government position is clear. Kenya's \
        foreign policy supports regional cooperation.\n\n\
        Kenya proposes a solution: we recommend a shared analysis of the impact on 40 \
        farms and 7 rivers.\n\n\
        Conclusion\n\n\
        Kenya hopes to work with all delegates.";

    #[test]
    fn test_score_card_overall_is_sum() {
        let card = ScoreCard::new(3, 4, 5, 6, 2, 5);
        assert_eq!(card.overall(), 25);
    }

    #[test]
    fn test_score_card_clamps_to_caps() {
        let card = ScoreCard::new(99, 11, 10, 12, 9, 6);
        assert_eq!(card.get(Category::Understanding), 10);
        assert_eq!(card.get(Category::Formatting), 5);
        assert_eq!(card.get(Category::Grammar), 5);
        assert_eq!(card.overall(), 50);
    }

    #[test]
    fn test_score_card_serializes_with_overall() {
        let card = ScoreCard::new(1, 2, 3, 4, 5, 5);
        let json = serde_json::to_value(card).unwrap();
        assert_eq!(json["policy_alignment"], 2);
        assert_eq!(json["grammar"], 5);
        assert_eq!(json["overall"], 20);
    }

    #[test]
    fn test_default_rubric_sample() {
        let result = Rubric::default().score(SAMPLE, &ScoringContext::new("Kenya"));
        let card = result.card;
        // topic, crisis, background, issue, problem
        assert_eq!(card.get(Category::Understanding), 5);
        // kenya x4, delegate x2, government, position, foreign policy
        assert_eq!(card.get(Category::PolicyAlignment), 9);
        // proposes, solution, recommend, analysis, impact
        assert_eq!(card.get(Category::Analysis), 5);
        // 12, 3, 2019, 40, 7
        assert_eq!(card.get(Category::Evidence), 2);
        // introduction, body, conclusion
        assert_eq!(card.get(Category::Formatting), 3);
        assert_eq!(card.get(Category::Grammar), 5);
        assert_eq!(card.overall(), 29);
        assert_eq!(result.breakdown.len(), 6);
    }

    #[test]
    fn test_empty_text_scores() {
        let result = Rubric::default().score("", &ScoringContext::new("Kenya"));
        assert_eq!(result.card, ScoreCard::new(0, 0, 0, 0, 0, 5));
    }

    #[test]
    fn test_missing_category_scores_zero() {
        let rubric = Rubric::new(vec![Box::new(EvidenceScorer)]);
        let result = rubric.score("1 2 3 4", &ScoringContext::default());
        assert_eq!(result.card.get(Category::Evidence), 2);
        assert_eq!(result.card.get(Category::Grammar), 0);
        assert_eq!(result.breakdown.len(), 1);
    }

    #[test]
    fn test_later_scorer_wins() {
        let rubric = Rubric::new(vec![
            Box::new(KeywordScorer::understanding()),
            Box::new(KeywordScorer::new(Category::Understanding, ["water"], false)),
        ]);
        let result = rubric.score("water issue", &ScoringContext::default());
        assert_eq!(result.card.get(Category::Understanding), 1);
        assert_eq!(result.breakdown[0].detail, "water=1");
    }

    #[test]
    fn test_from_config_overrides_keywords() {
        let rubric_config = RubricConfig {
            understanding: Some(vec!["drought".to_string()]),
            policy_alignment: None,
            analysis: None,
            formatting: Some(vec!["summary".to_string()]),
        };
        let rubric = Rubric::from_config(&rubric_config, &GrammarConfig::default()).unwrap();
        let result = rubric.score("Summary: drought and issue", &ScoringContext::default());
        assert_eq!(result.card.get(Category::Understanding), 1);
        assert_eq!(result.card.get(Category::Formatting), 1);
        assert_eq!(rubric.categories().count(), 6);
    }

    #[test]
    fn test_from_config_extra_misspellings() {
        let mut misspellings = BTreeMap::new();
        misspellings.insert("embargoe".to_string(), "embargo".to_string());
        let grammar = GrammarConfig {
            dictionary: None,
            misspellings: Some(misspellings),
        };
        let rubric = Rubric::from_config(&RubricConfig::default(), &grammar).unwrap();
        let text = "An embargoe. An embargoe. An embargoe.";
        let result = rubric.score(text, &ScoringContext::default());
        assert_eq!(result.card.get(Category::Grammar), 4);
    }

    #[test]
    fn test_from_config_loads_dictionary() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "treaty 10").unwrap();
        let grammar = GrammarConfig {
            dictionary: Some(file.path().to_path_buf()),
            misspellings: None,
        };
        let rubric = Rubric::from_config(&RubricConfig::default(), &grammar).unwrap();
        let text = "Treayt. Treayt. Treayt.";
        let result = rubric.score(text, &ScoringContext::default());
        assert_eq!(result.card.get(Category::Grammar), 4);
    }

    #[test]
    fn test_from_config_missing_dictionary_fails() {
        let grammar = GrammarConfig {
            dictionary: Some("/nonexistent/words.txt".into()),
            misspellings: None,
        };
        assert!(Rubric::from_config(&RubricConfig::default(), &grammar).is_err());
    }
}
