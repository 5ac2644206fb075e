use std::collections::HashMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::Corrector;

static WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z]+(?:'[A-Za-z]+)?").expect("valid regex"));
static SPACE_BEFORE_PUNCT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]+([,;:!?]|\.(?:\s|$))").expect("valid regex"));
static COMMA_NO_SPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Za-z]),([A-Za-z])").expect("valid regex"));

/// Words that are legitimately doubled in English.
const DOUBLING_ALLOWED: &[&str] = &["had", "that"];

const MISSPELLINGS: &[(&str, &str)] = &[
    ("accross", "across"),
    ("acheive", "achieve"),
    ("adress", "address"),
    ("alot", "a lot"),
    ("arguement", "argument"),
    ("begining", "beginning"),
    ("beleive", "believe"),
    ("comittee", "committee"),
    ("commitee", "committee"),
    ("concensus", "consensus"),
    ("definately", "definitely"),
    ("enviroment", "environment"),
    ("existance", "existence"),
    ("foriegn", "foreign"),
    ("goverment", "government"),
    ("independant", "independent"),
    ("millenium", "millennium"),
    ("neccessary", "necessary"),
    ("occured", "occurred"),
    ("occurence", "occurrence"),
    ("parliment", "parliament"),
    ("publically", "publicly"),
    ("recieve", "receive"),
    ("recomend", "recommend"),
    ("refered", "referred"),
    ("relevent", "relevant"),
    ("responsability", "responsibility"),
    ("seperate", "separate"),
    ("soverignty", "sovereignty"),
    ("sucess", "success"),
    ("teh", "the"),
    ("thier", "their"),
    ("tommorow", "tomorrow"),
    ("truely", "truly"),
    ("untill", "until"),
    ("wich", "which"),
];

/// Mechanical proofreader built from fixed rewrite rules.
///
/// Rules run in order: misspelling table, lowercase pronoun `i`, doubled
/// words, whitespace before punctuation, missing space after a comma,
/// sentence-initial capital.
#[derive(Debug, Clone)]
pub struct RuleCorrector {
    misspellings: HashMap<String, String>,
}

impl Default for RuleCorrector {
    fn default() -> Self {
        Self {
            misspellings: MISSPELLINGS
                .iter()
                .map(|(wrong, right)| (wrong.to_string(), right.to_string()))
                .collect(),
        }
    }
}

impl RuleCorrector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or override misspelling entries. Keys are matched case-insensitively.
    pub fn with_misspellings<I, K, V>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        for (wrong, right) in extra {
            self.misspellings
                .insert(wrong.as_ref().to_lowercase(), right.into());
        }
        self
    }

    fn fix_words(&self, sentence: &str) -> String {
        WORD_RE
            .replace_all(sentence, |caps: &Captures| {
                let m = caps.get(0).map_or("", |m| m.as_str());
                let end = caps.get(0).map_or(0, |m| m.end());
                if m == "i" && !starts_abbreviation(&sentence[end..]) {
                    return "I".to_string();
                }
                match self.misspellings.get(&m.to_lowercase()) {
                    Some(right) => match_case(m, right),
                    None => m.to_string(),
                }
            })
            .into_owned()
    }
}

impl Corrector for RuleCorrector {
    fn correct(&self, sentence: &str) -> String {
        let fixed = self.fix_words(sentence);
        let fixed = remove_doubled_words(&fixed);
        let fixed = SPACE_BEFORE_PUNCT_RE.replace_all(&fixed, "$1");
        let fixed = COMMA_NO_SPACE_RE.replace_all(&fixed, "$1, $2");
        capitalize_first(&fixed)
    }
}

/// "i.e." must not be read as the pronoun.
fn starts_abbreviation(rest: &str) -> bool {
    let mut chars = rest.chars();
    chars.next() == Some('.') && chars.next().is_some_and(|c| c.is_alphabetic())
}

pub(super) fn match_case(original: &str, replacement: &str) -> String {
    let mut chars = original.chars();
    let first_upper = chars.next().is_some_and(char::is_uppercase);
    if first_upper && original.len() > 1 && original.chars().all(char::is_uppercase) {
        replacement.to_uppercase()
    } else if first_upper {
        capitalize_first(replacement)
    } else {
        replacement.to_string()
    }
}

fn remove_doubled_words(sentence: &str) -> String {
    let mut out = String::with_capacity(sentence.len());
    let mut last_end = 0;
    let mut previous: Option<&str> = None;

    for m in WORD_RE.find_iter(sentence) {
        let gap = &sentence[last_end..m.start()];
        let doubled = previous.is_some_and(|prev| {
            let word = m.as_str().to_lowercase();
            !gap.is_empty()
                && gap.chars().all(char::is_whitespace)
                && prev.to_lowercase() == word
                && !DOUBLING_ALLOWED.contains(&word.as_str())
        });
        if !doubled {
            out.push_str(gap);
            out.push_str(m.as_str());
        }
        previous = Some(m.as_str());
        last_end = m.end();
    }
    out.push_str(&sentence[last_end..]);
    out
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if first.is_lowercase() => first.to_uppercase().chain(chars).collect(),
        _ => s.to_string(),
    }
}
