//! Sentence segmentation and correction capabilities used by grammar scoring.
//!
//! Both are traits so a different splitter or proofreader can be plugged in
//! without touching the scorer.

pub mod dictionary;
pub mod rules;
pub mod splitter;

pub use dictionary::DictionaryCorrector;
pub use rules::RuleCorrector;
pub use splitter::PunctuationSplitter;

/// Splits text into sentences.
pub trait SentenceSplitter: Send + Sync {
    fn split<'a>(&self, text: &'a str) -> Vec<&'a str>;
}

/// Returns the corrected form of a sentence. A result different from the
/// input counts as one error.
pub trait Corrector: Send + Sync {
    fn correct(&self, sentence: &str) -> String;
}

/// Applies several correctors in sequence.
#[derive(Default)]
pub struct CorrectorChain {
    correctors: Vec<Box<dyn Corrector>>,
}

impl CorrectorChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, corrector: impl Corrector + 'static) -> Self {
        self.correctors.push(Box::new(corrector));
        self
    }

    pub fn len(&self) -> usize {
        self.correctors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.correctors.is_empty()
    }
}

impl Corrector for CorrectorChain {
    fn correct(&self, sentence: &str) -> String {
        self.correctors
            .iter()
            .fold(sentence.to_string(), |acc, c| c.correct(&acc))
    }
}

/// Number of sentences whose corrected form differs from the original.
pub fn count_errors(text: &str, splitter: &dyn SentenceSplitter, corrector: &dyn Corrector) -> u32 {
    splitter
        .split(text)
        .into_iter()
        .filter(|sentence| corrector.correct(sentence) != *sentence)
        .count() as u32
}
