//! Line-level pieces of the WARC container format

/// Every version line begins with this prefix
pub const VERSION_PREFIX: &[u8] = b"WARC/";
pub const CRLF: &[u8] = b"\r\n";
/// Terminates every record after its content block
pub const RECORD_TRAILER: &[u8] = b"\r\n\r\n";
/// First two bytes of every gzip member
pub const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Strip a trailing `\n` or `\r\n`
pub fn trim_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// Folded continuation lines start with linear whitespace
pub fn is_continuation(line: &[u8]) -> bool {
    matches!(line.first(), Some(b' ') | Some(b'\t'))
}

/// Split `Name: value` into its trimmed parts
pub fn split_header(line: &str) -> Option<(&str, &str)> {
    let (name, value) = line.split_once(':')?;
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    Some((name, value.trim()))
}
