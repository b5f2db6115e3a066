use std::cmp::Ordering;
use std::fmt;
use icu_collator::{Collator, CollatorOptions, Strength};
use icu_locid::Locale;
use icu_normalizer::ComposingNormalizer;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::types::CollationRule;

// Checked in the order POSIX gives them precedence for collation
const LOCALE_VARS: [&str; 3] = ["LC_ALL", "LC_COLLATE", "LANG"];

/// Case folding plus ordering used for table keys and tie-breaks.
pub enum Collation {
    Ascii,
    Unicode,
    Locale(LocaleCollator),
}

pub struct LocaleCollator {
    tag: String,
    turkic: bool,
    collator: Collator,
}

impl LocaleCollator {
    pub fn new(tag: &str) -> Result<Self> {
        let normalized = normalize_tag(tag).ok_or_else(|| Error::Locale {
            tag: tag.to_string(),
            reason: "not a language locale".to_string(),
        })?;
        let locale: Locale = normalized.parse().map_err(|e| Error::Locale {
            tag: tag.to_string(),
            reason: format!("{e}"),
        })?;
        let turkic = matches!(locale.id.language.as_str(), "tr" | "az");

        // Case differences are tertiary, and keys are already folded
        let mut options = CollatorOptions::new();
        options.strength = Some(Strength::Secondary);
        let collator = Collator::try_new(&locale.into(), options).map_err(|e| Error::Locale {
            tag: tag.to_string(),
            reason: format!("{e}"),
        })?;

        Ok(Self { tag: normalized, turkic, collator })
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }
}

impl fmt::Debug for LocaleCollator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocaleCollator")
            .field("tag", &self.tag)
            .field("turkic", &self.turkic)
            .finish_non_exhaustive()
    }
}

impl Collation {
    /// Build the collation for a configured rule. For `Locale` without an explicit
    /// tag the environment locale is used, falling back to `Unicode` when none is usable.
    pub fn from_rule(rule: CollationRule, locale: Option<&str>) -> Result<Self> {
        Collation::from_rule_with_env(rule, locale, |key| std::env::var(key).ok())
    }

    /// Like `from_rule`, reading locale variables through `lookup`.
    pub fn from_rule_with_env<F>(rule: CollationRule, locale: Option<&str>, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        match rule {
            CollationRule::Ascii => Ok(Collation::Ascii),
            CollationRule::Unicode => Ok(Collation::Unicode),
            CollationRule::Locale => match locale {
                Some(tag) => Collation::for_locale(tag),
                None => Ok(Collation::from_environment(lookup)),
            },
        }
    }

    pub fn for_locale(tag: &str) -> Result<Self> {
        LocaleCollator::new(tag).map(Collation::Locale)
    }

    fn from_environment<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let Some(raw) = locale_from_env(lookup) else {
            debug!("no environment locale, using unicode collation");
            return Collation::Unicode;
        };
        match LocaleCollator::new(&raw) {
            Ok(collator) => {
                debug!(locale = collator.tag(), "using environment locale");
                Collation::Locale(collator)
            }
            Err(e) => {
                warn!("{e}; falling back to unicode collation");
                Collation::Unicode
            }
        }
    }

    /// NFC form of `word` in canonical case. Lookups and insertions both go through this.
    pub fn fold(&self, word: &str) -> String {
        let composed = ComposingNormalizer::new_nfc().normalize(word);
        match self {
            Collation::Ascii => composed.to_ascii_lowercase(),
            Collation::Unicode => composed.to_lowercase(),
            Collation::Locale(c) if c.turkic => turkic_lowercase(&composed),
            Collation::Locale(_) => composed.to_lowercase(),
        }
    }

    /// Word identity over folded words: `Equal` means the same table entry.
    pub fn key_order(&self, a: &str, b: &str) -> Ordering {
        match self {
            Collation::Ascii | Collation::Unicode => a.cmp(b),
            Collation::Locale(c) => c.collator.compare(a, b),
        }
    }

    /// Total order over folded words; codepoints decide between collator-equal strings.
    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        self.key_order(a, b).then_with(|| a.cmp(b))
    }
}

impl fmt::Debug for Collation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Collation::Ascii => f.write_str("Ascii"),
            Collation::Unicode => f.write_str("Unicode"),
            Collation::Locale(c) => f.debug_tuple("Locale").field(c).finish(),
        }
    }
}

impl fmt::Display for Collation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Collation::Ascii => f.write_str("ascii"),
            Collation::Unicode => f.write_str("unicode"),
            Collation::Locale(c) => write!(f, "locale:{}", c.tag),
        }
    }
}

fn turkic_lowercase(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    for c in word.chars() {
        match c {
            'I' => out.push('ı'),
            'İ' => out.push('i'),
            _ => out.extend(c.to_lowercase()),
        }
    }
    out
}

/// `de_DE.UTF-8@euro` -> `de-DE`. `C`, `POSIX` and empty values carry no language.
pub fn normalize_tag(raw: &str) -> Option<String> {
    let base = raw.split(['.', '@']).next().unwrap_or_default().trim();
    if base.is_empty() || base == "C" || base == "POSIX" {
        return None;
    }
    Some(base.replace('_', "-"))
}

/// First non-empty locale variable, normalized.
pub fn locale_from_env<F>(lookup: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = LOCALE_VARS
        .iter()
        .filter_map(|key| lookup(key))
        .find(|value| !value.is_empty())?;
    normalize_tag(&raw)
}
