use flate2::read::MultiGzDecoder;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::application::ports::{ArchiveError, ArchiveStore, RecordReader, RecordWriter};
use crate::infrastructure::discovery::discover_archives;
use crate::infrastructure::warc::format::{GZIP_MAGIC, VERSION_PREFIX};
use crate::infrastructure::warc::{WarcReader, WarcWriter};

const DEFAULT_BUFFER_SIZE: usize = 256 * 1024;

/// Archive store backed by the local filesystem.
///
/// Inputs may be gzip-compressed (one member per record or a single member)
/// or plain WARC; the format is detected from the leading bytes, not the
/// file name. Outputs are always written uncompressed.
#[derive(Debug, Clone)]
pub struct FileArchiveStore {
    buffer_size: usize,
}

impl Default for FileArchiveStore {
    fn default() -> Self {
        Self::new()
    }
}

impl FileArchiveStore {
    pub fn new() -> Self {
        Self::with_buffer_size(DEFAULT_BUFFER_SIZE)
    }

    pub fn with_buffer_size(buffer_size: usize) -> Self {
        Self {
            buffer_size: buffer_size.max(8 * 1024),
        }
    }
}

enum Encoding {
    Gzip,
    Plain,
}

fn sniff(head: &[u8]) -> Option<Encoding> {
    if head.starts_with(&GZIP_MAGIC) {
        Some(Encoding::Gzip)
    } else if head.is_empty() || head.starts_with(VERSION_PREFIX) {
        Some(Encoding::Plain)
    } else {
        None
    }
}

impl ArchiveStore for FileArchiveStore {
    fn list_archives(&self, root: &Path) -> Result<Vec<PathBuf>, ArchiveError> {
        Ok(discover_archives(root)?)
    }

    fn ensure_directory(&self, path: &Path) -> Result<(), ArchiveError> {
        fs::create_dir_all(path)?;
        Ok(())
    }

    fn open_reader(&self, path: &Path) -> Result<Box<dyn RecordReader>, ArchiveError> {
        let file = File::open(path)?;
        let mut buffered = BufReader::with_capacity(self.buffer_size, file);
        let encoding = sniff(buffered.fill_buf()?);

        match encoding {
            Some(Encoding::Gzip) => {
                debug!(path = %path.display(), "Opening gzip archive");
                let decoder = MultiGzDecoder::new(buffered);
                Ok(Box::new(WarcReader::new(BufReader::with_capacity(
                    self.buffer_size,
                    decoder,
                ))))
            }
            Some(Encoding::Plain) => {
                debug!(path = %path.display(), "Opening uncompressed archive");
                Ok(Box::new(WarcReader::new(buffered)))
            }
            None => Err(ArchiveError::InvalidFormat(format!(
                "{} is neither gzip nor WARC",
                path.display()
            ))),
        }
    }

    fn create_writer(&self, path: &Path) -> Result<Box<dyn RecordWriter>, ArchiveError> {
        let file = File::create(path)?;
        debug!(path = %path.display(), "Created output archive");
        Ok(Box::new(WarcWriter::new(BufWriter::with_capacity(
            self.buffer_size,
            file,
        ))))
    }
}
