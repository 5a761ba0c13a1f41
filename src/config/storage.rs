//! Store construction from settings.
//!
//! Opens the file-backed invoice store in the configured data directory. The
//! store itself never fails to open; see [`InvoiceStore::open`].

use super::Settings;
use crate::storage::{FileMedium, InvoiceStore, LoadReport};
use tracing::{info, warn};

/// Opens the saved collection described by `settings`.
#[must_use]
pub fn open_store(settings: &Settings) -> InvoiceStore<FileMedium> {
    let medium = FileMedium::new(&settings.data_dir);
    info!(
        "Opening invoice store at {:?}",
        medium.path_for(&settings.storage_key)
    );
    let store = InvoiceStore::open(medium, settings.storage_key.as_str());

    if let LoadReport::Recovered { reason, backup_key } = store.load_report() {
        warn!(
            "Saved invoices could not be loaded ({reason}); backup: {}",
            backup_key.as_deref().unwrap_or("none")
        );
    }
    store
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::sample_invoice;

    fn settings_in(dir: &std::path::Path) -> Settings {
        Settings {
            data_dir: dir.to_path_buf(),
            storage_key: "bills".to_string(),
            ..Settings::default()
        }
    }

    #[test]
    fn test_open_store_uses_configured_key_and_dir() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings_in(dir.path());

        let mut store = open_store(&settings);
        assert_eq!(store.key(), "bills");
        assert_eq!(store.load_report(), &LoadReport::Fresh);

        store.save(sample_invoice()).unwrap();
        assert!(dir.path().join("bills.json").exists());

        let reopened = open_store(&settings);
        assert_eq!(reopened.len(), 1);
    }

    fn backups_in(dir: &std::path::Path) -> Vec<std::path::PathBuf> {
        std::fs::read_dir(dir)
            .unwrap()
            .filter_map(Result::ok)
            .filter(|entry| {
                entry
                    .file_name()
                    .to_string_lossy()
                    .starts_with("bills.corrupt-")
            })
            .map(|entry| entry.path())
            .collect()
    }

    #[test]
    fn test_corrupt_file_is_backed_up() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("bills.json"), "garbage").unwrap();

        let store = open_store(&settings_in(dir.path()));
        assert!(store.is_empty());

        let backups = backups_in(dir.path());
        assert_eq!(backups.len(), 1);
        assert_eq!(std::fs::read(&backups[0]).unwrap(), b"garbage");
    }

    #[test]
    fn test_non_utf8_file_survives_the_next_save() {
        let dir = tempfile::tempdir().unwrap();
        let raw = b"[{\"id\":\"a\",\"customerName\":\"Caf\xe9\"}]";
        std::fs::write(dir.path().join("bills.json"), raw).unwrap();

        let mut store = open_store(&settings_in(dir.path()));
        assert!(matches!(
            store.load_report(),
            LoadReport::Recovered {
                backup_key: Some(_),
                ..
            }
        ));
        store.save(sample_invoice()).unwrap();

        let backups = backups_in(dir.path());
        assert_eq!(backups.len(), 1);
        assert_eq!(std::fs::read(&backups[0]).unwrap(), raw);
    }
}
