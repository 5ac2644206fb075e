use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use anyhow::{Context, Result};
use regex::{Captures, Regex};

use super::rules::match_case;
use super::Corrector;

static PLAIN_WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Za-z]+\b").expect("valid regex"));

const ALPHABET: &str = "abcdefghijklmnopqrstuvwxyz";

/// Second-order edits are skipped for longer words to bound the search.
const MAX_EDIT2_LEN: usize = 12;

/// Frequency-dictionary spelling corrector.
///
/// Unknown words are replaced by the most frequent known word one edit away,
/// then two edits away. Ties go to the alphabetically first candidate.
/// Acronyms, single letters and words with no known neighbour are left alone.
#[derive(Debug, Clone, Default)]
pub struct DictionaryCorrector {
    counts: HashMap<String, u64>,
}

impl DictionaryCorrector {
    /// Load a word list. Each line is `word` or `word count`; `#` starts a comment.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read dictionary at {}", path.display()))?;
        let corrector = Self::parse(&content)
            .with_context(|| format!("Invalid dictionary {}", path.display()))?;
        tracing::debug!(words = corrector.len(), path = %path.display(), "dictionary loaded");
        Ok(corrector)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let mut counts = HashMap::new();
        for (i, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut parts = line.split_whitespace();
            let word = parts.next().unwrap_or_default().to_lowercase();
            let count = match parts.next() {
                Some(n) => n
                    .parse::<u64>()
                    .with_context(|| format!("line {}: invalid count '{}'", i + 1, n))?,
                None => 1,
            };
            *counts.entry(word).or_insert(0) += count;
        }
        Ok(Self { counts })
    }

    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = (S, u64)>,
        S: AsRef<str>,
    {
        let mut counts = HashMap::new();
        for (word, count) in words {
            *counts.entry(word.as_ref().to_lowercase()).or_insert(0) += count;
        }
        Self { counts }
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn is_known(&self, word: &str) -> bool {
        self.counts.contains_key(&word.to_lowercase())
    }

    fn correct_word(&self, word: &str) -> String {
        let skip = word.chars().count() < 2 || word.chars().skip(1).any(char::is_uppercase);
        if skip || self.is_known(word) {
            return word.to_string();
        }
        let lower = word.to_lowercase();
        let mut best = None;
        for_each_edit(&lower, |candidate| self.consider(candidate, &mut best));
        if best.is_none() && lower.len() <= MAX_EDIT2_LEN {
            for_each_edit(&lower, |once| {
                for_each_edit(once, |twice| self.consider(twice, &mut best))
            });
        }
        match best {
            Some((known, _)) => match_case(word, known),
            None => word.to_string(),
        }
    }

    /// Keep `candidate` if it is known and beats `best` (higher count, then
    /// alphabetically first).
    fn consider<'s>(&'s self, candidate: &str, best: &mut Option<(&'s str, u64)>) {
        if let Some((known, &count)) = self.counts.get_key_value(candidate) {
            let better = match *best {
                None => true,
                Some((b, c)) => count > c || (count == c && known.as_str() < b),
            };
            if better {
                *best = Some((known.as_str(), count));
            }
        }
    }
}

impl Corrector for DictionaryCorrector {
    fn correct(&self, sentence: &str) -> String {
        PLAIN_WORD_RE
            .replace_all(sentence, |caps: &Captures| {
                self.correct_word(caps.get(0).map_or("", |m| m.as_str()))
            })
            .into_owned()
    }
}

/// Visit every string one delete, transpose, replace or insert away.
///
/// Candidates are built in a single reused buffer.
fn for_each_edit(word: &str, mut visit: impl FnMut(&str)) {
    let chars: Vec<char> = word.chars().collect();
    let n = chars.len();
    let mut buf = String::with_capacity(word.len() + 4);

    for i in 0..n {
        buf.clear();
        buf.extend(chars[..i].iter().chain(&chars[i + 1..]));
        visit(&buf);
    }
    for i in 0..n.saturating_sub(1) {
        buf.clear();
        buf.extend(&chars[..i]);
        buf.push(chars[i + 1]);
        buf.push(chars[i]);
        buf.extend(&chars[i + 2..]);
        visit(&buf);
    }
    for i in 0..n {
        for c in ALPHABET.chars().filter(|&c| c != chars[i]) {
            buf.clear();
            buf.extend(&chars[..i]);
            buf.push(c);
            buf.extend(&chars[i + 1..]);
            visit(&buf);
        }
    }
    for i in 0..=n {
        for c in ALPHABET.chars() {
            buf.clear();
            buf.extend(&chars[..i]);
            buf.push(c);
            buf.extend(&chars[i..]);
            visit(&buf);
        }
    }
}
