mod warc_record;

pub use warc_record::*;
