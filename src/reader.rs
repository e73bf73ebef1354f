//! Streaming reader for the tab-delimited GeoNames dumps.
//!
//! Lines are read as raw bytes into a reused buffer and split on tabs without
//! allocating per field. Structural problems (short rows, bad integers, bad UTF-8)
//! are reported with the 1-based line number and column they occurred in.

use crate::config::{BZ2_SUFFIX, READ_BUFFER_SIZE};
use anyhow::{bail, Context, Result};
use bzip2::read::MultiBzDecoder;
use indicatif::ProgressBar;
use std::fmt::Display;
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub struct TsvReader<R> {
    inner: R,
    line: Vec<u8>,
    bounds: Vec<(usize, usize)>,
    line_number: u64,
}

/// One non-comment line, borrowed from the reader's buffer.
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    line: &'a [u8],
    bounds: &'a [(usize, usize)],
    line_number: u64,
}

impl<R: BufRead> TsvReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            line: Vec::with_capacity(4096),
            bounds: Vec::with_capacity(32),
            line_number: 0,
        }
    }

    /// Returns the next non-comment record, or `None` at end of input.
    ///
    /// Fails if the record has fewer than `min_fields` columns.
    pub fn next_record(&mut self, min_fields: usize) -> Result<Option<Record<'_>>> {
        loop {
            self.line.clear();
            let read = self
                .inner
                .read_until(b'\n', &mut self.line)
                .with_context(|| format!("Failed to read line {}", self.line_number + 1))?;
            if read == 0 {
                return Ok(None);
            }
            self.line_number += 1;

            let end = trimmed_len(&self.line);
            if self.line.first() == Some(&b'#') {
                continue;
            }

            self.bounds.clear();
            let mut start = 0;
            for tab in memchr::memchr_iter(b'\t', &self.line[..end]) {
                self.bounds.push((start, tab));
                start = tab + 1;
            }
            self.bounds.push((start, end));

            if self.bounds.len() < min_fields {
                bail!(
                    "Line {}: expected at least {} fields, found {}",
                    self.line_number,
                    min_fields,
                    self.bounds.len()
                );
            }

            return Ok(Some(Record {
                line: &self.line[..end],
                bounds: &self.bounds,
                line_number: self.line_number,
            }));
        }
    }

    /// Number of lines consumed so far, comments included.
    pub fn lines_read(&self) -> u64 {
        self.line_number
    }
}

/// Length of `line` without trailing ASCII whitespace.
fn trimmed_len(line: &[u8]) -> usize {
    line.iter()
        .rposition(|b| !b.is_ascii_whitespace())
        .map_or(0, |i| i + 1)
}

impl<'a> Record<'a> {
    pub fn len(&self) -> usize {
        self.bounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bounds.is_empty()
    }

    pub fn line_number(&self) -> u64 {
        self.line_number
    }

    pub fn bytes(&self, column: usize) -> Result<&'a [u8]> {
        match self.bounds.get(column) {
            Some(&(start, end)) => Ok(&self.line[start..end]),
            None => bail!(
                "Line {}: missing column {} (record has {} fields)",
                self.line_number,
                column,
                self.bounds.len()
            ),
        }
    }

    pub fn text(&self, column: usize) -> Result<&'a str> {
        let bytes = self.bytes(column)?;
        std::str::from_utf8(bytes).with_context(|| {
            format!(
                "Line {}, column {}: invalid UTF-8",
                self.line_number, column
            )
        })
    }

    pub fn parse<T>(&self, column: usize) -> Result<T>
    where
        T: FromStr,
        T::Err: Display,
    {
        let bytes = self.bytes(column)?;
        let text = std::str::from_utf8(bytes).ok();
        match text.map(str::parse::<T>) {
            Some(Ok(value)) => Ok(value),
            Some(Err(e)) => bail!(
                "Line {}, column {}: cannot parse {:?}: {}",
                self.line_number,
                column,
                String::from_utf8_lossy(bytes),
                e
            ),
            None => bail!(
                "Line {}, column {}: invalid UTF-8 in numeric field",
                self.line_number,
                column
            ),
        }
    }
}

/// Finds `name` in `data_dir`, falling back to a bzip2-compressed copy.
pub fn locate_dataset(data_dir: &Path, name: &str) -> Result<PathBuf> {
    let plain = data_dir.join(name);
    if plain.is_file() {
        return Ok(plain);
    }
    let compressed = data_dir.join(format!("{name}{BZ2_SUFFIX}"));
    if compressed.is_file() {
        return Ok(compressed);
    }
    bail!(
        "Dataset not found: {} (also tried {})",
        plain.display(),
        compressed.display()
    )
}

/// Opens a dataset for streaming, reporting raw file bytes read to `pb`.
///
/// Files ending in `.bz2` are decompressed on the fly; progress still tracks
/// the compressed bytes so the bar length is the file size in both cases.
pub fn open_dataset(path: &Path, pb: &ProgressBar) -> Result<TsvReader<Box<dyn BufRead>>> {
    let file =
        File::open(path).with_context(|| format!("Failed to open dataset: {}", path.display()))?;
    let length = fs::metadata(path).map(|m| m.len()).unwrap_or(0);
    pb.set_length(length);

    let source = pb.wrap_read(file);
    let is_compressed = path
        .file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.ends_with(BZ2_SUFFIX));

    let inner: Box<dyn BufRead> = if is_compressed {
        Box::new(BufReader::with_capacity(
            READ_BUFFER_SIZE,
            MultiBzDecoder::new(source),
        ))
    } else {
        Box::new(BufReader::with_capacity(READ_BUFFER_SIZE, source))
    };

    Ok(TsvReader::new(inner))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn reader(data: &str) -> TsvReader<&[u8]> {
        TsvReader::new(data.as_bytes())
    }

    #[test]
    fn splits_fields_on_tabs() {
        let mut r = reader("1\tfoo\tbar\n");
        let record = r.next_record(3).unwrap().unwrap();
        assert_eq!(record.len(), 3);
        assert_eq!(record.text(0).unwrap(), "1");
        assert_eq!(record.text(1).unwrap(), "foo");
        assert_eq!(record.text(2).unwrap(), "bar");
        assert!(r.next_record(3).unwrap().is_none());
    }

    #[test]
    fn skips_comment_lines() {
        let mut r = reader("# header\n1\ta\n#another\n2\tb\n");
        assert_eq!(r.next_record(2).unwrap().unwrap().text(1).unwrap(), "a");
        let second = r.next_record(2).unwrap().unwrap();
        assert_eq!(second.text(1).unwrap(), "b");
        assert_eq!(second.line_number(), 4);
        assert!(r.next_record(2).unwrap().is_none());
        assert_eq!(r.lines_read(), 4);
    }

    #[test]
    fn strips_trailing_whitespace_and_empty_columns() {
        let mut r = reader("a\tb\t\t\r\n");
        let record = r.next_record(2).unwrap().unwrap();
        assert_eq!(record.len(), 2);
        assert_eq!(record.text(1).unwrap(), "b");
    }

    #[test]
    fn keeps_interior_empty_columns() {
        let mut r = reader("a\t\tc\n");
        let record = r.next_record(3).unwrap().unwrap();
        assert_eq!(record.bytes(1).unwrap(), b"");
        assert_eq!(record.text(2).unwrap(), "c");
    }

    #[test]
    fn handles_missing_final_newline() {
        let mut r = reader("x\ty");
        let record = r.next_record(2).unwrap().unwrap();
        assert_eq!(record.text(1).unwrap(), "y");
    }

    #[test]
    fn short_record_reports_line_number() {
        let mut r = reader("a\tb\tc\na\tb\n");
        assert!(r.next_record(3).unwrap().is_some());
        let err = r.next_record(3).unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("Line 2"), "{msg}");
        assert!(msg.contains("expected at least 3 fields, found 2"), "{msg}");
    }

    #[test]
    fn blank_line_is_a_short_record() {
        let mut r = reader("\n");
        assert!(r.next_record(2).is_err());
    }

    #[test]
    fn parses_integers() {
        let mut r = reader("42\t-7\n");
        let record = r.next_record(2).unwrap().unwrap();
        assert_eq!(record.parse::<u64>(0).unwrap(), 42);
        assert_eq!(record.parse::<i64>(1).unwrap(), -7);
    }

    #[test]
    fn non_numeric_field_is_an_error() {
        let mut r = reader("abc\n");
        let record = r.next_record(1).unwrap().unwrap();
        let msg = format!("{:#}", record.parse::<u64>(0).unwrap_err());
        assert!(msg.contains("Line 1, column 0"), "{msg}");
    }

    #[test]
    fn invalid_utf8_text_is_an_error() {
        let data: &[u8] = b"ok\t\xff\xfe\n";
        let mut r = TsvReader::new(data);
        let record = r.next_record(2).unwrap().unwrap();
        assert!(record.text(0).is_ok());
        assert!(record.text(1).is_err());
    }

    #[test]
    fn missing_column_is_an_error() {
        let mut r = reader("a\n");
        let record = r.next_record(1).unwrap().unwrap();
        assert!(record.bytes(5).is_err());
    }

    #[test]
    fn locate_prefers_plain_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("data.txt"), "x\n").unwrap();
        std::fs::write(dir.path().join("data.txt.bz2"), "x\n").unwrap();
        let found = locate_dataset(dir.path(), "data.txt").unwrap();
        assert_eq!(found, dir.path().join("data.txt"));
    }

    #[test]
    fn locate_falls_back_to_bz2() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("data.txt.bz2"), "x\n").unwrap();
        let found = locate_dataset(dir.path(), "data.txt").unwrap();
        assert_eq!(found, dir.path().join("data.txt.bz2"));
    }

    #[test]
    fn locate_missing_dataset_fails() {
        let dir = TempDir::new().unwrap();
        assert!(locate_dataset(dir.path(), "data.txt").is_err());
    }

    #[test]
    fn open_dataset_decompresses_bz2() {
        use bzip2::write::BzEncoder;
        use bzip2::Compression;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.txt.bz2");
        let mut encoder = BzEncoder::new(File::create(&path).unwrap(), Compression::fast());
        encoder.write_all(b"# comment\n7\tseven\n").unwrap();
        encoder.finish().unwrap();

        let pb = ProgressBar::hidden();
        let mut r = open_dataset(&path, &pb).unwrap();
        let record = r.next_record(2).unwrap().unwrap();
        assert_eq!(record.parse::<u64>(0).unwrap(), 7);
        assert_eq!(record.text(1).unwrap(), "seven");
    }
}
