use super::StorageMedium;
use crate::errors::Result;
use std::collections::HashMap;

/// Keeps blobs in a map; nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryMedium {
    entries: HashMap<String, Vec<u8>>,
}

impl MemoryMedium {
    /// Creates an empty medium.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds `key` with `contents`.
    #[must_use]
    pub fn with_entry(mut self, key: &str, contents: impl AsRef<[u8]>) -> Self {
        self.entries
            .insert(key.to_string(), contents.as_ref().to_vec());
        self
    }

    /// Borrows the contents under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&[u8]> {
        self.entries.get(key).map(Vec::as_slice)
    }
}

impl StorageMedium for MemoryMedium {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, contents: &[u8]) -> Result<()> {
        self.entries.insert(key.to_string(), contents.to_vec());
        Ok(())
    }
}
