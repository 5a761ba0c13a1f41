//! On-disk layout of the saved collection.
//!
//! Current documents look like `{"version": 1, "invoices": [...]}`. Collections
//! written before versioning are a bare JSON array and are still accepted.
//! Records are decoded one at a time so a failure can name the record.

use crate::entities::Invoice;
use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

/// Version written by this build.
pub const CURRENT_VERSION: u32 = 1;

#[derive(Serialize)]
struct DocumentRef<'a> {
    version: u32,
    invoices: &'a [Invoice],
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Document {
    Versioned { version: u32, invoices: Vec<Value> },
    Legacy(Vec<Value>),
}

/// Serializes `invoices` as a current-version document.
pub fn encode(invoices: &[Invoice]) -> Result<String> {
    let document = DocumentRef {
        version: CURRENT_VERSION,
        invoices,
    };
    Ok(serde_json::to_string_pretty(&document)?)
}

/// Parses a stored document of any known layout.
pub fn decode(contents: &str) -> Result<Vec<Invoice>> {
    let document: Document = serde_json::from_str(contents)?;
    let records = match document {
        Document::Versioned { version, invoices } => {
            if version > CURRENT_VERSION {
                warn!(
                    "Collection was written by a newer version ({version} > {CURRENT_VERSION}); \
                     unknown fields will be dropped on next save"
                );
            }
            invoices
        }
        Document::Legacy(invoices) => invoices,
    };

    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            let id = record
                .get("id")
                .and_then(Value::as_str)
                .unwrap_or("?")
                .to_string();
            serde_json::from_value(record).map_err(|source| Error::InvalidRecord {
                index: index + 1,
                id,
                source,
            })
        })
        .collect()
}
