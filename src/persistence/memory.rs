//! In-memory preferences

use std::collections::BTreeMap;

use super::Preferences;
use crate::error::Result;

/// Preferences kept in memory.
///
/// Staged and persisted values are tracked separately so callers can observe
/// what a `flush` actually committed.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferences {
    tag: String,
    staged: BTreeMap<String, i32>,
    persisted: BTreeMap<String, i32>,
    flushes: u32,
}

impl MemoryPreferences {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    /// Value committed by the last flush, ignoring staged writes
    pub fn persisted(&self, key: &str) -> Option<i32> {
        self.persisted.get(key).copied()
    }

    /// Number of successful flushes
    pub fn flush_count(&self) -> u32 {
        self.flushes
    }

    /// Drop staged writes, keeping what was flushed
    pub fn discard_staged(&mut self) {
        self.staged.clear();
    }
}

impl Preferences for MemoryPreferences {
    fn tag(&self) -> &str {
        &self.tag
    }

    fn get_integer(&self, key: &str, default: i32) -> i32 {
        self.staged
            .get(key)
            .or_else(|| self.persisted.get(key))
            .copied()
            .unwrap_or(default)
    }

    fn put_integer(&mut self, key: &str, value: i32) {
        self.staged.insert(key.to_string(), value);
    }

    fn flush(&mut self) -> Result<()> {
        self.persisted.append(&mut self.staged);
        self.flushes += 1;
        Ok(())
    }
}
