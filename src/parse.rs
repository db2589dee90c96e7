//! Parses the line-oriented MSA text format: header lines (`#`), the
//! terminator/comment marker (`/`), and `<id><whitespace><data>` rows.
//!
//! Mirrors the original tool's two-phase reading: header/blank/comment
//! lines are skipped until the first data row, after which only a `/`
//! prefix ends the data section — a line's content past that point is
//! always parsed as `<id><data>`, matching `MSACompressor::compress`.

use std::io::BufRead;

use crate::error::{Error, Result};
use crate::sequence::Sequence;

fn parse_data_line(line: &str) -> Result<Sequence> {
    let mut tokens = line.split_whitespace();
    let id = tokens.next().ok_or_else(|| Error::format("data line has no id"))?;
    let data = tokens.next().ok_or_else(|| Error::format(format!("data line '{}' has no sequence data", id)))?;
    Ok(Sequence::new(id, data.as_bytes().to_vec()))
}

/// Streams header lines followed by data rows out of a buffered MSA text
/// source, one row at a time so the caller (the partitioner's row-band
/// buffer) never has to hold the whole file in memory.
pub struct MsaReader<R> {
    lines: std::io::Lines<R>,
    pending: Option<Sequence>,
    done: bool,
}

impl<R: BufRead> MsaReader<R> {
    pub fn new(read: R) -> Self {
        Self { lines: read.lines(), pending: None, done: false }
    }

    fn next_raw_line(&mut self) -> Result<Option<String>> {
        match self.lines.next() {
            None => Ok(None),
            Some(line) => Ok(Some(line?)),
        }
    }

    /// Consume and return leading header lines, skipping blank lines and
    /// `/`-prefixed comment lines encountered before the first data row.
    /// Leaves the first data row (if any) buffered for `next_row`.
    pub fn read_headers(&mut self) -> Result<Vec<String>> {
        let mut headers = Vec::new();

        loop {
            let Some(line) = self.next_raw_line()? else {
                self.done = true;
                break;
            };

            if line.is_empty() || line.starts_with('/') {
                continue;
            }

            if let Some(header) = line.strip_prefix('#') {
                headers.push(format!("#{}", header));
                continue;
            }

            self.pending = Some(parse_data_line(&line)?);
            break;
        }

        Ok(headers)
    }

    /// The next data row, or `None` once a `/` terminator line or EOF is reached.
    pub fn next_row(&mut self) -> Result<Option<Sequence>> {
        if let Some(sequence) = self.pending.take() {
            return Ok(Some(sequence));
        }

        if self.done {
            return Ok(None);
        }

        match self.next_raw_line()? {
            None => {
                self.done = true;
                Ok(None)
            }
            Some(line) if line.starts_with('/') => {
                self.done = true;
                Ok(None)
            }
            Some(line) => parse_data_line(&line).map(Some),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn reads_headers_then_rows_then_stops_at_terminator() {
        let text = "#hdr1\n\nA ..X\nB X..\n/\nC ignored\n";
        let mut reader = MsaReader::new(Cursor::new(text));

        let headers = reader.read_headers().unwrap();
        assert_eq!(headers, vec!["#hdr1".to_string()]);

        let row_a = reader.next_row().unwrap().unwrap();
        assert_eq!(row_a.id, "A");
        assert_eq!(row_a.data, b"..X");

        let row_b = reader.next_row().unwrap().unwrap();
        assert_eq!(row_b.id, "B");

        assert!(reader.next_row().unwrap().is_none());
    }

    #[test]
    fn no_header_no_terminator_reads_to_eof() {
        let text = "A AAAA\nB BBBB\n";
        let mut reader = MsaReader::new(Cursor::new(text));
        assert!(reader.read_headers().unwrap().is_empty());

        assert_eq!(reader.next_row().unwrap().unwrap().id, "A");
        assert_eq!(reader.next_row().unwrap().unwrap().id, "B");
        assert!(reader.next_row().unwrap().is_none());
    }

    #[test]
    fn leading_blank_and_comment_lines_are_skipped() {
        let text = "\n/ comment\n#h\nID DATA\n";
        let mut reader = MsaReader::new(Cursor::new(text));
        assert_eq!(reader.read_headers().unwrap(), vec!["#h".to_string()]);
        assert_eq!(reader.next_row().unwrap().unwrap().id, "ID");
    }

    #[test]
    fn data_row_missing_second_token_is_a_format_error() {
        let text = "ONLY_ID\n";
        let mut reader = MsaReader::new(Cursor::new(text));
        assert!(reader.read_headers().is_err());
    }
}
