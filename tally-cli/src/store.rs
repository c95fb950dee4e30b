use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

use tally_finance::{CategoryUpdate, MemoryStore, TransactionStore};

/// Collects updates during a run and writes the final state per transaction
/// as a JSON array.
pub struct JsonFileStore {
    path: PathBuf,
    inner: MemoryStore,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            inner: MemoryStore::new(),
        }
    }

    /// Write the collected updates; returns how many were written
    pub fn save(&self) -> Result<usize> {
        let updates = self.inner.latest_updates();
        let json = serde_json::to_string_pretty(&updates).context("serialize updates")?;
        fs::write(&self.path, json).with_context(|| format!("write {}", self.path.display()))?;
        Ok(updates.len())
    }
}

impl TransactionStore for JsonFileStore {
    async fn apply(&self, update: &CategoryUpdate) -> Result<()> {
        self.inner.apply(update).await
    }
}
