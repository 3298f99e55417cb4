pub mod classification;
pub mod discovery;
pub mod warc;
