//! File-backed storage medium.
//!
//! Each key maps to `<data_dir>/<key>.json`. Writes land in a temporary sibling
//! first and are renamed over the target, so a crash or a full disk mid-write
//! leaves the previous collection intact.

use super::StorageMedium;
use crate::errors::Result;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Stores blobs as JSON files in one directory.
#[derive(Debug, Clone)]
pub struct FileMedium {
    data_dir: PathBuf,
}

impl FileMedium {
    /// Uses `data_dir`, creating it on first write.
    #[must_use]
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
        }
    }

    /// File that backs `key`.
    #[must_use]
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!("{key}.json"))
    }
}

impl StorageMedium for FileMedium {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.path_for(key);
        debug!("Reading {:?}", path);
        match fs::read(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&mut self, key: &str, contents: &[u8]) -> Result<()> {
        fs::create_dir_all(&self.data_dir)?;
        let path = self.path_for(key);
        let staging = self.data_dir.join(format!("{key}.json.tmp"));
        debug!("Writing {} bytes to {:?}", contents.len(), path);

        if let Err(e) = fs::write(&staging, contents).and_then(|()| fs::rename(&staging, &path)) {
            let _ = fs::remove_file(&staging);
            return Err(e.into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::errors::Error;

    #[test]
    fn test_missing_file_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let medium = FileMedium::new(dir.path());
        assert!(medium.read("invoices").unwrap().is_none());
    }

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let mut medium = FileMedium::new(dir.path().join("nested"));

        medium.write("invoices", b"[]").unwrap();
        assert_eq!(medium.read("invoices").unwrap().as_deref(), Some(b"[]".as_slice()));

        medium.write("invoices", b"[1]").unwrap();
        assert_eq!(medium.read("invoices").unwrap().as_deref(), Some(b"[1]".as_slice()));
        assert!(!dir.path().join("nested/invoices.json.tmp").exists());
    }

    #[test]
    fn test_failed_write_keeps_previous_contents() {
        let dir = tempfile::tempdir().unwrap();
        let mut medium = FileMedium::new(dir.path());
        medium.write("invoices", b"original").unwrap();

        // A directory squatting on the staging path makes the write fail.
        fs::create_dir(dir.path().join("invoices.json.tmp")).unwrap();
        let result = medium.write("invoices", b"replacement");

        assert!(matches!(result, Err(Error::Io(_))));
        assert_eq!(
            medium.read("invoices").unwrap().as_deref(),
            Some(b"original".as_slice())
        );
    }

    #[test]
    fn test_non_utf8_contents_are_returned_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let raw = b"[{\"customerName\":\"Caf\xe9\"}]";
        fs::write(dir.path().join("invoices.json"), raw).unwrap();

        let medium = FileMedium::new(dir.path());
        assert_eq!(medium.read("invoices").unwrap().as_deref(), Some(raw.as_slice()));
    }
}
