//! WARC container reading and writing

pub mod format;
mod reader;
mod store;
mod writer;

pub use reader::WarcReader;
pub use store::FileArchiveStore;
pub use writer::WarcWriter;
