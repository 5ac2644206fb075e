use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Keyword overrides for the rubric.
///
/// Every list is optional; a missing list keeps the built-in keywords.
/// Caps and thresholds are not configurable.
///
/// Example YAML:
/// ```yaml
/// rubric:
///   understanding: [issue, problem, background, crisis, topic]
///   policy_alignment: [delegate, government, position, foreign policy]
///   analysis: [solution, recommend, propose, analysis, impact]
///   formatting: [introduction, body, conclusion, heading, subheading]
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RubricConfig {
    /// Keywords counted for topic understanding
    #[serde(default)]
    pub understanding: Option<Vec<String>>,

    /// Keywords counted for policy alignment. The country name is always
    /// added at scoring time.
    #[serde(default)]
    pub policy_alignment: Option<Vec<String>>,

    /// Keywords counted for analysis
    #[serde(default)]
    pub analysis: Option<Vec<String>>,

    /// Section keywords; one point each when present
    #[serde(default)]
    pub formatting: Option<Vec<String>>,
}

impl RubricConfig {
    /// Configured keyword lists with their config keys, for validation.
    pub fn keyword_lists(&self) -> [(&'static str, Option<&Vec<String>>); 4] {
        [
            ("understanding", self.understanding.as_ref()),
            ("policy_alignment", self.policy_alignment.as_ref()),
            ("analysis", self.analysis.as_ref()),
            ("formatting", self.formatting.as_ref()),
        ]
    }
}

/// Grammar checking options.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct GrammarConfig {
    /// Word list enabling dictionary spelling correction
    /// (`word` or `word count` per line)
    #[serde(default)]
    pub dictionary: Option<PathBuf>,

    /// Extra misspelling -> correction pairs for the rule checker
    #[serde(default)]
    pub misspellings: Option<BTreeMap<String, String>>,
}
