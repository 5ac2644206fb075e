use serde::{Deserialize, Serialize};

use crate::scoring::{GrammarConfig, RubricConfig};

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub rubric: Option<RubricConfig>,
    #[serde(default)]
    pub grammar: Option<GrammarConfig>,
}

impl Config {
    pub fn rubric(&self) -> RubricConfig {
        self.rubric.clone().unwrap_or_default()
    }

    pub fn grammar(&self) -> GrammarConfig {
        self.grammar.clone().unwrap_or_default()
    }
}
