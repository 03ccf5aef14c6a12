//! Protocol record catalog loaded once at startup.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use protocol_core::{filter_records, CardId, ProtocolRecord};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid record file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Read-only set of protocol records indexed by card identity.
#[derive(Debug, Default)]
pub struct Catalog {
    records: Vec<ProtocolRecord>,
    by_id: HashMap<CardId, usize>,
}

impl Catalog {
    /// Index records. When two records share an identity the first wins
    /// lookups; both remain listed.
    pub fn new(records: Vec<ProtocolRecord>) -> Self {
        let mut by_id = HashMap::with_capacity(records.len());
        for (idx, record) in records.iter().enumerate() {
            by_id.entry(record.id()).or_insert(idx);
        }
        Self { records, by_id }
    }

    /// Parse a JSON array of records.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let records: Vec<ProtocolRecord> = serde_json::from_str(json)?;
        Ok(Self::new(records))
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &CardId) -> Option<&ProtocolRecord> {
        self.by_id.get(id).map(|&idx| &self.records[idx])
    }

    pub fn search(&self, query: &str) -> Vec<&ProtocolRecord> {
        filter_records(&self.records, query)
    }
}
