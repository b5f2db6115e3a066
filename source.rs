use std::borrow::Cow;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use encoding_rs::{Encoding, UTF_8};
use tracing::warn;

use crate::error::{Error, Result};

/// Resolve a WHATWG encoding label such as `utf-8`, `latin1` or `shift_jis`.
pub fn encoding_for_label(label: &str) -> Result<&'static Encoding> {
    let encoding = Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| Error::UnknownEncoding(label.to_string()))?;
    // lines are split on the 0x0A byte before decoding
    if !encoding.is_ascii_compatible() {
        return Err(Error::UnsupportedEncoding(encoding.name()));
    }
    Ok(encoding)
}

/// Yields the trimmed, non-empty lines of a byte stream, each decoded exactly once.
///
/// Stops after the first error.
pub struct LineSource<R> {
    reader: R,
    encoding: &'static Encoding,
    lossy: bool,
    buf: Vec<u8>,
    line: usize,
    substituted: bool,
    done: bool,
}

impl LineSource<BufReader<File>> {
    /// Open `path` for reading. The file is closed when the source is dropped.
    pub fn open(path: &Path, encoding: &'static Encoding, lossy: bool) -> Result<Self> {
        let file = File::open(path).map_err(|source| Error::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(BufReader::new(file), encoding, lossy))
    }
}

impl<R: BufRead> LineSource<R> {
    pub fn new(reader: R, encoding: &'static Encoding, lossy: bool) -> Self {
        Self {
            reader,
            encoding,
            lossy,
            buf: Vec::new(),
            line: 0,
            substituted: false,
            done: false,
        }
    }

    /// Number of physical lines read so far, blank ones included.
    pub fn lines_read(&self) -> usize {
        self.line
    }

    fn decode(&mut self) -> Result<String> {
        let mut bytes = self.buf.as_slice();
        while let [rest @ .., b'\n' | b'\r'] = bytes {
            bytes = rest;
        }
        if self.line == 1 {
            if let Some((bom_encoding, bom_len)) = Encoding::for_bom(bytes) {
                if bom_encoding == UTF_8 && self.encoding == UTF_8 {
                    bytes = &bytes[bom_len..];
                }
            }
        }

        let text: Cow<'_, str> = if self.lossy {
            let (text, had_errors) = self.encoding.decode_without_bom_handling(bytes);
            if had_errors && !self.substituted {
                self.substituted = true;
                warn!(line = self.line, encoding = self.encoding.name(), "replaced malformed bytes");
            }
            text
        } else {
            self.encoding
                .decode_without_bom_handling_and_without_replacement(bytes)
                .ok_or(Error::Decode { line: self.line, encoding: self.encoding.name() })?
        };
        Ok(text.trim().to_string())
    }
}

impl<R: BufRead> Iterator for LineSource<R> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            self.buf.clear();
            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => self.done = true,
                Ok(_) => {
                    self.line += 1;
                    match self.decode() {
                        Ok(text) if text.is_empty() => continue,
                        Ok(text) => return Some(Ok(text)),
                        Err(e) => {
                            self.done = true;
                            return Some(Err(e));
                        }
                    }
                }
                Err(source) => {
                    self.done = true;
                    return Some(Err(Error::Read { line: self.line + 1, source }));
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn lines(bytes: &[u8], encoding: &'static Encoding, lossy: bool) -> Vec<Result<String>> {
        LineSource::new(Cursor::new(bytes.to_vec()), encoding, lossy).collect()
    }

    fn ok_lines(bytes: &[u8]) -> Vec<String> {
        lines(bytes, UTF_8, false).into_iter().map(|l| l.unwrap()).collect()
    }

    #[test]
    fn test_trims_and_skips_blank_lines() {
        assert_eq!(
            ok_lines(b"  first line \r\n\n   \nsecond\n\tthird"),
            vec!["first line", "second", "third"]
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(ok_lines(b"").is_empty());
        assert!(ok_lines(b"\n\n").is_empty());
    }

    #[test]
    fn test_multibyte_text_is_preserved() {
        assert_eq!(ok_lines("Größe über 日本語\n".as_bytes()), vec!["Größe über 日本語"]);
    }

    #[test]
    fn test_utf8_bom_skipped() {
        assert_eq!(ok_lines(b"\xEF\xBB\xBFhello\nworld"), vec!["hello", "world"]);
    }

    #[test]
    fn test_strict_decode_fails_with_line() {
        let result = lines(b"ok\n\nbad \xFF byte\nnever read\n", UTF_8, false);
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].as_ref().unwrap(), "ok");
        assert!(matches!(result[1], Err(Error::Decode { line: 3, encoding: "UTF-8" })));
    }

    #[test]
    fn test_lossy_decode_substitutes() {
        let result: Vec<String> = lines(b"bad \xFF byte\nnext\n", UTF_8, true)
            .into_iter()
            .map(|l| l.unwrap())
            .collect();
        assert_eq!(result, vec!["bad \u{FFFD} byte", "next"]);
    }

    #[test]
    fn test_legacy_encoding() {
        let latin1 = encoding_for_label("latin1").unwrap();
        assert_eq!(latin1.name(), "windows-1252");
        let result: Vec<String> = lines(b"caf\xE9 cr\xE8me\n", latin1, false)
            .into_iter()
            .map(|l| l.unwrap())
            .collect();
        assert_eq!(result, vec!["café crème"]);
    }

    #[test]
    fn test_encoding_labels() {
        assert_eq!(encoding_for_label(" UTF-8 ").unwrap(), UTF_8);
        assert!(matches!(encoding_for_label("klingon"), Err(Error::UnknownEncoding(_))));
        assert!(matches!(
            encoding_for_label("utf-16le"),
            Err(Error::UnsupportedEncoding("UTF-16LE"))
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = LineSource::open(Path::new("/definitely/not/here.txt"), UTF_8, false)
            .err()
            .unwrap();
        assert!(matches!(err, Error::Open { .. }));
    }

    #[test]
    fn test_lines_read_counts_blank_lines() {
        let mut source = LineSource::new(Cursor::new(b"a\n\n\nb\n".to_vec()), UTF_8, false);
        assert_eq!(source.by_ref().count(), 2);
        assert_eq!(source.lines_read(), 4);
    }
}
