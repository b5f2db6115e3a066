use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::Result;
use crate::source::LineSource;
use crate::table::FrequencyTable;
use crate::tokenizer::Tokenizer;

const PROGRESS_INTERVAL: usize = 100_000; // log progress every 100k lines

/// Counting loop: every line is tokenized and folded into the table before the next one.
#[derive(Debug)]
pub struct WordCounter {
    tokenizer: Tokenizer,
    table: FrequencyTable,
    lines: usize,
    tokens: u64,
}

impl WordCounter {
    pub fn new(tokenizer: Tokenizer, table: FrequencyTable) -> Self {
        Self { tokenizer, table, lines: 0, tokens: 0 }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let tokenizer = config.tokenizer()?;
        let collation = config.collation()?;
        info!(%collation, "collation selected");
        Ok(Self::new(tokenizer, FrequencyTable::new(collation)))
    }

    pub fn process_line(&mut self, line: &str) {
        self.lines += 1;
        for token in self.tokenizer.tokens(line) {
            self.table.increment(token);
            self.tokens += 1;
        }
    }

    /// Consume every line, stopping at the first error.
    pub fn process_lines<I>(&mut self, lines: I) -> Result<()>
    where
        I: IntoIterator<Item = Result<String>>,
    {
        for line in lines {
            self.process_line(&line?);
            if self.lines % PROGRESS_INTERVAL == 0 {
                debug!(lines = self.lines, distinct = self.table.len(), "… progress …");
            }
        }
        Ok(())
    }

    pub fn table(&self) -> &FrequencyTable {
        &self.table
    }

    pub fn into_table(self) -> FrequencyTable {
        self.table
    }

    /// Non-empty lines processed.
    pub fn lines(&self) -> usize {
        self.lines
    }

    pub fn tokens(&self) -> u64 {
        self.tokens
    }
}

/// Count the words of the file at `path`. The file is closed before this returns.
pub fn count_file(path: &Path, config: &Config) -> Result<WordCounter> {
    let encoding = config.encoding()?;
    let mut counter = WordCounter::from_config(config)?;

    let start = Instant::now();
    let mut source = LineSource::open(path, encoding, config.lossy)?;
    counter.process_lines(source.by_ref())?;

    info!(
        path = %path.display(),
        physical_lines = source.lines_read(),
        lines = counter.lines(),
        tokens = counter.tokens(),
        distinct = counter.table().len(),
        "counted in {:.2?}",
        start.elapsed()
    );
    Ok(counter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collation::Collation;
    use crate::tokenizer::Boundary;
    use crate::types::BoundaryRule;

    fn ascii_counter() -> WordCounter {
        WordCounter::new(
            Tokenizer::new(Boundary::from_rule(BoundaryRule::Ascii)),
            FrequencyTable::new(Collation::Unicode),
        )
    }

    #[test]
    fn test_cat_sat() {
        let mut counter = ascii_counter();
        counter
            .process_lines(["The cat sat.", "The dog sat."].map(|l| Ok(l.to_string())))
            .unwrap();

        let table = counter.table();
        assert_eq!(
            table.iter().collect::<Vec<_>>(),
            vec![("cat", 1), ("dog", 1), ("sat", 2), ("the", 2)]
        );
        let top: Vec<_> = table.top_k(2).into_iter().map(|e| (e.word, e.count)).collect();
        assert_eq!(top, vec![("sat".to_string(), 2), ("the".to_string(), 2)]);
        assert_eq!(counter.lines(), 2);
        assert_eq!(counter.tokens(), 6);
    }

    #[test]
    fn test_error_stops_processing() {
        let mut counter = ascii_counter();
        let lines = vec![
            Ok("one".to_string()),
            Err(crate::error::Error::Decode { line: 2, encoding: "UTF-8" }),
            Ok("two".to_string()),
        ];
        assert!(counter.process_lines(lines).is_err());
        assert_eq!(counter.table().count("one"), 1);
        assert_eq!(counter.table().count("two"), 0);
    }

    #[test]
    fn test_no_lines() {
        let mut counter = ascii_counter();
        counter.process_lines(Vec::new()).unwrap();
        assert!(counter.into_table().is_empty());
    }
}
