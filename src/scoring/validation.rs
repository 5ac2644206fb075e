use super::config::{GrammarConfig, RubricConfig};

/// Validate rubric and grammar configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_rubric(rubric: &RubricConfig, grammar: &GrammarConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    for (key, list) in rubric.keyword_lists() {
        let Some(list) = list else { continue };
        if list.is_empty() {
            errors.push(format!("rubric.{}: must list at least one keyword", key));
        }
        for (i, keyword) in list.iter().enumerate() {
            if keyword.trim().is_empty() {
                errors.push(format!("rubric.{}[{}]: keyword must not be blank", key, i));
            } else if keyword.chars().any(char::is_uppercase) {
                // Text is lowercased before matching, so this could never match
                errors.push(format!(
                    "rubric.{}[{}]: '{}' must be lowercase",
                    key, i, keyword
                ));
            }
        }
    }

    if let Some(ref path) = grammar.dictionary {
        if !path.is_file() {
            errors.push(format!(
                "grammar.dictionary: file not found at {}",
                path.display()
            ));
        }
    }

    if let Some(ref misspellings) = grammar.misspellings {
        for (wrong, right) in misspellings {
            if wrong.trim().is_empty() || right.trim().is_empty() {
                errors.push(format!(
                    "grammar.misspellings: '{}' -> '{}' has an empty side",
                    wrong, right
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
