use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::Result;
use crate::types::BoundaryRule;

// Compile regexes once
static PUNCT_SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r#"[ !'".,;]+"#).unwrap());
static ASCII_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Za-z0-9_]+").unwrap());
// apostrophes only inside a word, so quotes around it are dropped
static UNICODE_WORD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\p{L}\p{M}\d_]+(?:['’][\p{L}\p{M}\d_]+)*").unwrap()
});

/// A word-boundary rule: either a pattern matching words or one matching separators.
#[derive(Debug, Clone)]
pub enum Boundary {
    Words(Regex),
    Separators(Regex),
}

impl Boundary {
    pub fn from_rule(rule: BoundaryRule) -> Self {
        match rule {
            BoundaryRule::Unicode => Boundary::Words((*UNICODE_WORD).clone()),
            BoundaryRule::Ascii => Boundary::Words((*ASCII_WORD).clone()),
            BoundaryRule::Punctuation => Boundary::Separators((*PUNCT_SEPARATOR).clone()),
        }
    }

    /// Custom separator pattern, e.g. `[^\p{L}]+`.
    pub fn separator(pattern: &str) -> Result<Self> {
        Ok(Boundary::Separators(Regex::new(pattern)?))
    }
}

#[derive(Debug, Clone)]
pub struct Tokenizer {
    boundary: Boundary,
    min_length: usize,
}

impl Tokenizer {
    pub fn new(boundary: Boundary) -> Self {
        Self { boundary, min_length: 1 }
    }

    /// Drop tokens shorter than `min_length` characters.
    pub fn with_min_length(mut self, min_length: usize) -> Self {
        self.min_length = min_length;
        self
    }

    /// Tokens of `line`, left to right, never empty.
    pub fn tokens<'a>(&'a self, line: &'a str) -> Box<dyn Iterator<Item = &'a str> + 'a> {
        let min_length = self.min_length;
        let long_enough =
            move |w: &&str| !w.is_empty() && (min_length <= 1 || w.chars().count() >= min_length);
        match &self.boundary {
            Boundary::Words(re) => {
                Box::new(re.find_iter(line).map(|m| m.as_str()).filter(long_enough))
            }
            Boundary::Separators(re) => Box::new(re.split(line).filter(long_enough)),
        }
    }

    pub fn tokenize<'a>(&'a self, line: &'a str) -> Vec<&'a str> {
        self.tokens(line).collect()
    }
}
