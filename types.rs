use std::fmt;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// One row of the frequency report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedEntry {
    pub word: String,
    pub count: u64,
}

impl RankedEntry {
    pub fn new(word: impl Into<String>, count: u64) -> Self {
        Self { word: word.into(), count }
    }
}

impl fmt::Display for RankedEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}", self.word, self.count)
    }
}

/// How report lines are printed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// `word<TAB>count`
    #[default]
    Counted,
    /// word only
    Bare,
}

/// Which characters make up a word
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BoundaryRule {
    /// Letters of any script, combining marks, digits, underscore, inner apostrophes
    #[default]
    Unicode,
    /// `[A-Za-z0-9_]`
    Ascii,
    /// Split on space and `!'".,;`
    Punctuation,
}

/// Case folding and ordering of words
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CollationRule {
    /// ICU collation for the configured or environment locale
    #[default]
    Locale,
    /// Full Unicode lowercase, codepoint order
    Unicode,
    /// ASCII-only lowercase, codepoint order
    Ascii,
}
