use super::SentenceSplitter;

const ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "st", "jr", "sr", "vs", "etc", "approx",
];

/// Abbreviations only when a number follows ("No. 5", "Art. 51").
const NUMBERED_ABBREVIATIONS: &[&str] = &["no", "art", "para"];

const CLOSERS: &[char] = &['"', '\'', ')', ']', '\u{201d}', '\u{2019}'];

/// Splits on terminal punctuation followed by whitespace, and on blank lines.
#[derive(Debug, Default, Clone)]
pub struct PunctuationSplitter;

impl SentenceSplitter for PunctuationSplitter {
    fn split<'a>(&self, text: &'a str) -> Vec<&'a str> {
        let chars: Vec<(usize, char)> = text.char_indices().collect();
        let mut sentences = Vec::new();
        let mut start = 0;
        let mut i = 0;

        while i < chars.len() {
            let (pos, c) = chars[i];

            if c == '\n' {
                let mut j = i + 1;
                while j < chars.len() && chars[j].1 != '\n' && chars[j].1.is_whitespace() {
                    j += 1;
                }
                if j < chars.len() && chars[j].1 == '\n' {
                    push_trimmed(&mut sentences, &text[start..pos]);
                    start = chars[j].0 + 1;
                    i = j + 1;
                    continue;
                }
            }

            if is_terminal(c) {
                let mut j = i + 1;
                while j < chars.len() && is_terminal(chars[j].1) {
                    j += 1;
                }
                while j < chars.len() && CLOSERS.contains(&chars[j].1) {
                    j += 1;
                }
                let at_boundary = j == chars.len() || chars[j].1.is_whitespace();
                let abbreviation = c == '.' && j == i + 1 && ends_with_abbreviation(&text[start..pos], &text[pos + 1..]);
                if at_boundary && !abbreviation {
                    let end = chars.get(j).map_or(text.len(), |(p, _)| *p);
                    push_trimmed(&mut sentences, &text[start..end]);
                    start = end;
                }
                i = j;
                continue;
            }

            i += 1;
        }

        push_trimmed(&mut sentences, &text[start..]);
        sentences
    }
}

fn is_terminal(c: char) -> bool {
    matches!(c, '.' | '!' | '?')
}

fn push_trimmed<'a>(sentences: &mut Vec<&'a str>, candidate: &'a str) {
    let trimmed = candidate.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed);
    }
}

fn ends_with_abbreviation(preceding: &str, following: &str) -> bool {
    let word = preceding
        .rsplit(char::is_whitespace)
        .next()
        .unwrap_or("")
        .trim_start_matches(['(', '"', '\'', '[']);
    if word.is_empty() {
        return false;
    }
    // Initials ("J.") and dotted forms ("U.N", "e.g")
    let mut chars = word.chars();
    if let (Some(first), None) = (chars.next(), chars.next()) {
        if first.is_uppercase() {
            return true;
        }
    }
    if word.contains('.') {
        return true;
    }
    let lower = word.to_lowercase();
    if NUMBERED_ABBREVIATIONS.contains(&lower.as_str()) {
        return following.trim_start().starts_with(|c: char| c.is_ascii_digit());
    }
    ABBREVIATIONS.contains(&lower.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(text: &str) -> Vec<&str> {
        PunctuationSplitter.split(text)
    }

    #[test]
    fn test_simple_sentences() {
        assert_eq!(
            split("The crisis grew. Delegates met! Was it enough?"),
            vec!["The crisis grew.", "Delegates met!", "Was it enough?"]
        );
    }

    #[test]
    fn test_empty_and_whitespace() {
        assert!(split("").is_empty());
        assert!(split("   \n\t ").is_empty());
    }

    #[test]
    fn test_trailing_fragment_kept() {
        assert_eq!(split("One. Two without stop"), vec!["One.", "Two without stop"]);
    }

    #[test]
    fn test_decimal_numbers_do_not_split() {
        assert_eq!(
            split("Growth was 2.5 percent. It fell."),
            vec!["Growth was 2.5 percent.", "It fell."]
        );
    }

    #[test]
    fn test_numbered_abbreviations() {
        assert_eq!(
            split("See No. 5 and Art. 51 of the Charter. It applies."),
            vec!["See No. 5 and Art. 51 of the Charter.", "It applies."]
        );
    }

    #[test]
    fn test_plain_words_ending_sentences() {
        assert_eq!(split("The answer is no. We agree."), vec!["The answer is no.", "We agree."]);
        assert_eq!(split("We value art. Culture matters."), vec!["We value art.", "Culture matters."]);
    }

    #[test]
    fn test_abbreviations() {
        assert_eq!(
            split("Dr. Smith spoke to the U.N. delegation. Then e.g. trade."),
            vec!["Dr. Smith spoke to the U.N. delegation.", "Then e.g. trade."]
        );
    }

    #[test]
    fn test_closing_quote_stays_with_sentence() {
        assert_eq!(
            split("He said \"enough.\" Next point."),
            vec!["He said \"enough.\"", "Next point."]
        );
    }

    #[test]
    fn test_blank_line_ends_sentence() {
        assert_eq!(
            split("Introduction\n\nThe topic is water."),
            vec!["Introduction", "The topic is water."]
        );
    }

    #[test]
    fn test_single_newline_does_not_split() {
        assert_eq!(split("A line\ncontinues here."), vec!["A line\ncontinues here."]);
    }

    #[test]
    fn test_repeated_punctuation() {
        assert_eq!(split("Really?! Yes..."), vec!["Really?!", "Yes..."]);
    }
}
