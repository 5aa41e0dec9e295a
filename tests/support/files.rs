use std::path::PathBuf;

use tempfile::NamedTempFile;

/// Write `contents` to a temp file with the given suffix.
pub fn temp_file(suffix: &str, contents: &str) -> NamedTempFile {
    let file = tempfile::Builder::new()
        .prefix("bulkpay-test-")
        .suffix(suffix)
        .tempfile()
        .expect("create temp file");
    std::fs::write(file.path(), contents).expect("write temp file");
    file
}

pub fn path_of(file: &NamedTempFile) -> PathBuf {
    file.path().to_path_buf()
}
