//! File I/O primitives with consistent error handling.

use crate::error::{Error, Result};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;

/// Read file contents as UTF-8 with standardized error handling.
///
/// Content that is not valid UTF-8 is reported as an I/O error.
pub fn read_file(path: &Path, operation: &str) -> Result<String> {
    fs::read_to_string(path)
        .map_err(|e| Error::internal_io(e.to_string(), Some(operation.to_string())))
}

/// Overwrite a file with `content`.
pub fn write_file(path: &Path, content: &str, operation: &str) -> Result<()> {
    fs::write(path, content)
        .map_err(|e| Error::internal_io(e.to_string(), Some(operation.to_string())))
}

/// Lowercase hex SHA-256 of `content`.
pub fn content_digest(content: &str) -> String {
    format!("{:x}", Sha256::digest(content.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn read_file_succeeds_for_existing_file() {
        let mut temp = NamedTempFile::new().unwrap();
        writeln!(temp, "bg-dark-blue").unwrap();

        let content = read_file(temp.path(), "test read").unwrap();
        assert_eq!(content, "bg-dark-blue\n");
    }

    #[test]
    fn read_file_returns_error_for_missing_file() {
        let err = read_file(Path::new("/nonexistent/path.tsx"), "test read").unwrap_err();
        assert_eq!(err.code.as_str(), "internal.io_error");
        assert_eq!(err.details["context"], "test read");
    }

    #[test]
    fn read_file_rejects_invalid_utf8() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(&[0x66, 0xff, 0xfe, 0x6f]).unwrap();

        let err = read_file(temp.path(), "test read").unwrap_err();
        assert_eq!(err.code.as_str(), "internal.io_error");
    }

    #[test]
    fn write_file_overwrites_content() {
        let temp = NamedTempFile::new().unwrap();
        fs::write(temp.path(), "old content that is longer").unwrap();

        write_file(temp.path(), "new", "test write").unwrap();
        assert_eq!(fs::read_to_string(temp.path()).unwrap(), "new");
    }

    #[test]
    fn write_file_returns_error_for_invalid_path() {
        let err = write_file(Path::new("/nonexistent/dir/file.tsx"), "x", "test write").unwrap_err();
        assert_eq!(err.code.as_str(), "internal.io_error");
    }

    #[test]
    fn content_digest_is_sha256_hex() {
        assert_eq!(
            content_digest(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(content_digest("a").len(), 64);
    }
}
