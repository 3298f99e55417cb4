use std::io::Write;

use crate::application::ports::{ArchiveError, RecordWriter};
use crate::domain::entities::{WarcRecord, CONTENT_LENGTH};
use crate::infrastructure::warc::format::{CRLF, RECORD_TRAILER};

/// Uncompressed WARC writer.
///
/// Headers are written in their original order. `Content-Length` always
/// reflects the actual payload size, replacing any stale value or being
/// appended when the record has none.
pub struct WarcWriter<W: Write> {
    inner: W,
    records_written: u64,
    finished: bool,
}

impl<W: Write> WarcWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            records_written: 0,
            finished: false,
        }
    }

    pub fn records_written(&self) -> u64 {
        self.records_written
    }

    pub fn into_inner(self) -> W {
        self.inner
    }

    fn write_field(&mut self, name: &str, value: &str) -> std::io::Result<()> {
        self.inner.write_all(name.as_bytes())?;
        self.inner.write_all(b": ")?;
        self.inner.write_all(value.as_bytes())?;
        self.inner.write_all(CRLF)
    }
}

impl<W: Write + Send> RecordWriter for WarcWriter<W> {
    fn write_record(&mut self, record: &WarcRecord) -> Result<(), ArchiveError> {
        if self.finished {
            return Err(ArchiveError::InvalidFormat(
                "write after the archive was finished".to_string(),
            ));
        }

        let length = record.content().len().to_string();
        self.inner.write_all(record.version().as_bytes())?;
        self.inner.write_all(CRLF)?;

        let mut wrote_length = false;
        for (name, value) in record.headers().iter() {
            if name.eq_ignore_ascii_case(CONTENT_LENGTH) {
                if !wrote_length {
                    self.write_field(name, &length)?;
                    wrote_length = true;
                }
                continue;
            }
            self.write_field(name, value)?;
        }
        if !wrote_length {
            self.write_field(CONTENT_LENGTH, &length)?;
        }

        self.inner.write_all(CRLF)?;
        self.inner.write_all(record.content())?;
        self.inner.write_all(RECORD_TRAILER)?;
        self.records_written += 1;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), ArchiveError> {
        self.inner.flush()?;
        self.finished = true;
        Ok(())
    }
}
