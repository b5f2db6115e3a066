//! Word frequency counting: tokenize lines, count case-folded words, rank the top K.

pub mod collation;
pub mod config;
pub mod error;
pub mod report;
pub mod source;
pub mod table;
pub mod tokenizer;
pub mod types;
pub mod wc;

pub use collation::Collation;
pub use config::Config;
pub use error::{Error, Result};
pub use report::write_report;
pub use source::LineSource;
pub use table::FrequencyTable;
pub use tokenizer::{Boundary, Tokenizer};
pub use types::{BoundaryRule, CollationRule, OutputMode, RankedEntry};
pub use wc::{count_file, WordCounter};
