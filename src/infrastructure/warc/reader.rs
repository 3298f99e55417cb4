use std::io::{BufRead, Read};

use crate::application::ports::{ArchiveError, RecordReader};
use crate::domain::entities::{RecordHeaders, WarcRecord, CONTENT_LENGTH};
use crate::infrastructure::warc::format::{
    is_continuation, split_header, trim_line_ending, VERSION_PREFIX,
};

/// Sequential WARC record reader over any buffered byte stream.
///
/// Blank lines between records are skipped, so both the canonical
/// `CRLF CRLF` trailer and sloppier separators are accepted. A record's
/// content block is read in full using its `Content-Length`.
pub struct WarcReader<R> {
    inner: R,
    line: Vec<u8>,
    records_read: u64,
}

impl<R: BufRead> WarcReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            line: Vec::with_capacity(256),
            records_read: 0,
        }
    }

    pub fn records_read(&self) -> u64 {
        self.records_read
    }

    /// Read one line into the scratch buffer; false at end of stream
    fn read_line(&mut self) -> Result<bool, ArchiveError> {
        self.line.clear();
        let n = self.inner.read_until(b'\n', &mut self.line)?;
        Ok(n > 0)
    }

    fn read_version(&mut self) -> Result<Option<String>, ArchiveError> {
        loop {
            if !self.read_line()? {
                return Ok(None);
            }
            let line = trim_line_ending(&self.line);
            if line.is_empty() {
                continue;
            }
            if !line.starts_with(VERSION_PREFIX) {
                return Err(ArchiveError::InvalidFormat(format!(
                    "expected WARC version line at record {}, found {:?}",
                    self.records_read + 1,
                    String::from_utf8_lossy(&line[..line.len().min(32)])
                )));
            }
            return Ok(Some(String::from_utf8_lossy(line).into_owned()));
        }
    }

    fn read_headers(&mut self) -> Result<RecordHeaders, ArchiveError> {
        let mut headers = RecordHeaders::new();
        loop {
            if !self.read_line()? {
                return Err(ArchiveError::MalformedHeader(
                    "archive ended inside a header block".to_string(),
                ));
            }
            let raw = trim_line_ending(&self.line);
            if raw.is_empty() {
                return Ok(headers);
            }

            let text = String::from_utf8_lossy(raw);
            if is_continuation(raw) {
                if !headers.extend_last(text.trim()) {
                    return Err(ArchiveError::MalformedHeader(format!(
                        "continuation line without a field: {}",
                        text.trim()
                    )));
                }
                continue;
            }

            match split_header(&text) {
                Some((name, value)) => headers.append(name, value),
                None => {
                    return Err(ArchiveError::MalformedHeader(format!(
                        "missing ':' in header line: {}",
                        text
                    )))
                }
            }
        }
    }

    fn read_content(&mut self, length: u64) -> Result<Vec<u8>, ArchiveError> {
        let mut content = Vec::with_capacity(length.min(16 * 1024 * 1024) as usize);
        (&mut self.inner).take(length).read_to_end(&mut content)?;
        if (content.len() as u64) < length {
            return Err(ArchiveError::Truncated { expected: length });
        }
        Ok(content)
    }
}

fn content_length(headers: &RecordHeaders) -> Result<u64, ArchiveError> {
    let value = headers
        .get(CONTENT_LENGTH)
        .ok_or_else(|| ArchiveError::MalformedHeader("missing Content-Length".to_string()))?;
    value
        .parse()
        .map_err(|_| ArchiveError::MalformedHeader(format!("invalid Content-Length: {}", value)))
}

impl<R: BufRead + Send> RecordReader for WarcReader<R> {
    fn next_record(&mut self) -> Result<Option<WarcRecord>, ArchiveError> {
        let version = match self.read_version()? {
            Some(version) => version,
            None => return Ok(None),
        };
        let headers = self.read_headers()?;
        let length = content_length(&headers)?;
        let content = self.read_content(length)?;

        self.records_read += 1;
        Ok(Some(WarcRecord::new(version, headers, content)))
    }
}
