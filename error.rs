use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("cannot open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("read error at line {line}: {source}")]
    Read {
        line: usize,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid {encoding} byte sequence at line {line}")]
    Decode { line: usize, encoding: &'static str },

    #[error("unknown encoding label: {0}")]
    UnknownEncoding(String),

    #[error("encoding {0} is not ASCII-compatible and cannot be read line by line")]
    UnsupportedEncoding(&'static str),

    #[error("invalid locale {tag}: {reason}")]
    Locale { tag: String, reason: String },

    #[error("invalid separator pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("config error in {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
