use std::path::{Path, PathBuf};
use encoding_rs::Encoding;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::collation::Collation;
use crate::error::{Error, Result};
use crate::source::encoding_for_label;
use crate::tokenizer::{Boundary, Tokenizer};
use crate::types::{BoundaryRule, CollationRule, OutputMode};

/// Settings for one counting run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default = "default_top")]
    pub top: usize,

    #[serde(default)]
    pub output: OutputMode,

    #[serde(default)]
    pub boundary: BoundaryRule,

    /// Separator regex; replaces `boundary` when set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub separator: Option<String>,

    #[serde(default)]
    pub collation: CollationRule,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,

    #[serde(default = "default_min_length")]
    pub min_length: usize,

    #[serde(default = "default_encoding")]
    pub encoding: String,

    #[serde(default)]
    pub lossy: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            top: default_top(),
            output: OutputMode::default(),
            boundary: BoundaryRule::default(),
            separator: None,
            collation: CollationRule::default(),
            locale: None,
            min_length: default_min_length(),
            encoding: default_encoding(),
            lossy: false,
        }
    }
}

fn default_top() -> usize {
    10
}

fn default_min_length() -> usize {
    1
}

fn default_encoding() -> String {
    "utf-8".to_string()
}

impl Config {
    /// Load from `path` if given, else from the user config file if one exists,
    /// else defaults. Never creates a file.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::from_file(path);
        }
        match Self::config_path() {
            Some(path) if path.is_file() => Self::from_file(&path),
            _ => Ok(Config::default()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading config");
        let content = std::fs::read_to_string(path).map_err(|source| Error::Open {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Get config file path
    pub fn config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("org", "wordfreq", "wordfreq")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    pub fn tokenizer(&self) -> Result<Tokenizer> {
        let boundary = match &self.separator {
            Some(pattern) => Boundary::separator(pattern)?,
            None => Boundary::from_rule(self.boundary),
        };
        Ok(Tokenizer::new(boundary).with_min_length(self.min_length))
    }

    pub fn collation(&self) -> Result<Collation> {
        Collation::from_rule(self.collation, self.locale.as_deref())
    }

    pub fn encoding(&self) -> Result<&'static Encoding> {
        encoding_for_label(&self.encoding)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.top, 10);
        assert_eq!(config.output, OutputMode::Counted);
        assert_eq!(config.boundary, BoundaryRule::Unicode);
        assert_eq!(config.collation, CollationRule::Locale);
        assert_eq!(config.encoding, "utf-8");
        assert!(!config.lossy);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
            top = 3
            output = "bare"
            collation = "ascii"
            separator = "[,;]+"
            "#,
        )
        .unwrap();
        assert_eq!(config.top, 3);
        assert_eq!(config.output, OutputMode::Bare);
        assert_eq!(config.collation, CollationRule::Ascii);
        assert_eq!(config.separator.as_deref(), Some("[,;]+"));
        assert_eq!(config.min_length, 1);
        assert_eq!(config.boundary, BoundaryRule::Unicode);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config { locale: Some("de-DE".to_string()), ..Config::default() };
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(toml::from_str::<Config>("topp = 3").is_err());
        assert!(toml::from_str::<Config>("boundary = \"words\"").is_err());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "top = 25\nlossy = true").unwrap();
        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.top, 25);
        assert!(config.lossy);

        writeln!(file, "top = \"many\"").unwrap();
        assert!(matches!(Config::from_file(file.path()), Err(Error::Config { .. })));
    }

    #[test]
    fn test_missing_explicit_file() {
        let missing = Path::new("/no/such/wordfreq.toml");
        assert!(matches!(Config::load(Some(missing)), Err(Error::Open { .. })));
    }

    #[test]
    fn test_builds_components() {
        let config = Config {
            boundary: BoundaryRule::Ascii,
            collation: CollationRule::Unicode,
            min_length: 2,
            encoding: "latin1".to_string(),
            ..Config::default()
        };
        assert_eq!(config.tokenizer().unwrap().tokenize("a bb café"), vec!["bb", "caf"]);
        assert!(matches!(config.collation().unwrap(), Collation::Unicode));
        assert_eq!(config.encoding().unwrap().name(), "windows-1252");

        let bad = Config { separator: Some("(".to_string()), ..Config::default() };
        assert!(matches!(bad.tokenizer(), Err(Error::Pattern(_))));
    }
}
