use std::io::{BufWriter, Write};

use crate::types::{OutputMode, RankedEntry};

/// Write one entry per line: `word<TAB>count`, or just the word in bare mode.
pub fn write_report<W: Write>(out: W, entries: &[RankedEntry], mode: OutputMode) -> std::io::Result<()> {
    let mut out = BufWriter::new(out);
    for entry in entries {
        match mode {
            OutputMode::Counted => writeln!(out, "{entry}")?,
            OutputMode::Bare => writeln!(out, "{}", entry.word)?,
        }
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(entries: &[RankedEntry], mode: OutputMode) -> String {
        let mut buf = Vec::new();
        write_report(&mut buf, entries, mode).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_counted_and_bare() {
        let entries = vec![RankedEntry::new("the", 2), RankedEntry::new("größe", 1)];
        assert_eq!(render(&entries, OutputMode::Counted), "the\t2\ngröße\t1\n");
        assert_eq!(render(&entries, OutputMode::Bare), "the\ngröße\n");
    }

    #[test]
    fn test_empty_report() {
        assert_eq!(render(&[], OutputMode::Counted), "");
    }
}
