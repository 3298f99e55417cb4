use bytes::Bytes;

/// Header name carrying the record's MIME type
pub const CONTENT_TYPE: &str = "Content-Type";
/// Header name carrying the payload type detected by the crawler
pub const IDENTIFIED_PAYLOAD_TYPE: &str = "WARC-Identified-Payload-Type";
pub const CONTENT_LENGTH: &str = "Content-Length";
pub const RECORD_ID: &str = "WARC-Record-ID";
pub const RECORD_TYPE: &str = "WARC-Type";
pub const TARGET_URI: &str = "WARC-Target-URI";

/// Content type of an HTTP response record
pub const HTTP_RESPONSE_CONTENT_TYPE: &str = "application/http; msgtype=response";
/// Identified payload type of an HTML document
pub const HTML_PAYLOAD_TYPE: &str = "text/html";

/// Ordered header fields of a record
///
/// Names keep their original spelling for serialization but are matched
/// case-insensitively on lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordHeaders {
    fields: Vec<(String, String)>,
}

impl RecordHeaders {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of the first field with the given name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| field.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Append a field, keeping any existing field of the same name
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.push((name.into(), value.into()));
    }

    /// Replace the value of an existing field or append a new one
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self
            .fields
            .iter_mut()
            .find(|(field, _)| field.eq_ignore_ascii_case(name))
        {
            Some((_, existing)) => *existing = value,
            None => self.fields.push((name.to_string(), value)),
        }
    }

    /// Extend the value of the most recent field (folded header lines)
    pub fn extend_last(&mut self, continuation: &str) -> bool {
        match self.fields.last_mut() {
            Some((_, value)) => {
                value.push(' ');
                value.push_str(continuation);
                true
            }
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for RecordHeaders {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut headers = RecordHeaders::new();
        for (name, value) in iter {
            headers.append(name, value);
        }
        headers
    }
}

/// One record of a web archive
///
/// Records are immutable once read. The payload is reference counted, so
/// cloning a record does not copy the document body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WarcRecord {
    version: String,
    headers: RecordHeaders,
    content: Bytes,
}

impl WarcRecord {
    pub fn new(version: impl Into<String>, headers: RecordHeaders, content: impl Into<Bytes>) -> Self {
        Self {
            version: version.into(),
            headers,
            content: content.into(),
        }
    }

    /// Version line, e.g. `WARC/1.0`
    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn headers(&self) -> &RecordHeaders {
        &self.headers
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }

    pub fn content(&self) -> &Bytes {
        &self.content
    }

    pub fn record_id(&self) -> Option<&str> {
        self.header(RECORD_ID)
    }

    pub fn record_type(&self) -> Option<&str> {
        self.header(RECORD_TYPE)
    }

    pub fn target_uri(&self) -> Option<&str> {
        self.header(TARGET_URI)
    }

    /// Whether the record is an HTTP response carrying an HTML document.
    ///
    /// Header values must match exactly.
    pub fn is_html_response(&self) -> bool {
        self.header(CONTENT_TYPE) == Some(HTTP_RESPONSE_CONTENT_TYPE)
            && self.header(IDENTIFIED_PAYLOAD_TYPE) == Some(HTML_PAYLOAD_TYPE)
    }
}
