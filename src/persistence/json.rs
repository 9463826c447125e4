//! JSON file preferences
//!
//! Each tag maps to `<dir>/<tag>.json` holding a flat object of integers.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::Preferences;
use crate::error::Result;

/// Directory under the user's config dir holding preference files
const APP_DIR: &str = "matrix-drill";

#[derive(Debug, Clone)]
pub struct JsonPreferences {
    tag: String,
    path: PathBuf,
    values: BTreeMap<String, i32>,
}

impl JsonPreferences {
    /// Open preferences for `tag` inside `dir`.
    ///
    /// A missing or unreadable file yields empty preferences, so defaults apply.
    pub fn open(dir: impl AsRef<Path>, tag: &str) -> Self {
        let path = dir.as_ref().join(format!("{}.json", file_stem(tag)));

        let values = match fs::read_to_string(&path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(values) => {
                    log::info!("Loaded preferences from {}", path.display());
                    values
                }
                Err(e) => {
                    log::warn!("Ignoring corrupt preferences {}: {}", path.display(), e);
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                log::warn!("Could not read preferences {}: {}", path.display(), e);
                BTreeMap::new()
            }
        };

        Self {
            tag: tag.to_string(),
            path,
            values,
        }
    }

    /// Open preferences for `tag` in the platform config directory
    pub fn open_default(tag: &str) -> Option<Self> {
        let dir = dirs::config_dir()?.join(APP_DIR);
        Some(Self::open(dir, tag))
    }

    /// Backing file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Preferences for JsonPreferences {
    fn tag(&self) -> &str {
        &self.tag
    }

    fn get_integer(&self, key: &str, default: i32) -> i32 {
        self.values.get(key).copied().unwrap_or(default)
    }

    fn put_integer(&mut self, key: &str, value: i32) {
        self.values.insert(key.to_string(), value);
    }

    fn flush(&mut self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.values)?;
        fs::write(&self.path, json)?;
        log::info!("Preferences saved to {}", self.path.display());
        Ok(())
    }
}

/// Tags are free text; keep file names portable
fn file_stem(tag: &str) -> String {
    tag.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
        .collect()
}
