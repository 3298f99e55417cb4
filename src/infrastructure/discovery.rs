use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Extension of the input archives picked up by a census
pub const ARCHIVE_EXTENSION: &str = "gz";

/// Every regular file under `root` whose extension is `.gz`, recursively,
/// sorted by path.
///
/// Symlinks are not followed. An unreadable root or subdirectory is an error.
pub fn discover_archives(root: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut archives = Vec::new();
    for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        if entry.path().extension() == Some(OsStr::new(ARCHIVE_EXTENSION)) {
            archives.push(entry.into_path());
        } else {
            debug!(path = %entry.path().display(), "Ignoring non-archive file");
        }
    }
    archives.sort();
    Ok(archives)
}
