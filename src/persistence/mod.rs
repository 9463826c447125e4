//! Key-value preferences used to persist settings
//!
//! A `Preferences` handle is bound to a tag (the namespace chosen by the
//! caller). Values written with `put_integer` are staged until `flush`.
//!
//! Adapters:
//! - `MemoryPreferences`: in-process store, used by tests and headless runs
//! - `JsonPreferences`: one JSON file per tag in the user's config directory

pub mod json;
pub mod memory;

pub use json::JsonPreferences;
pub use memory::MemoryPreferences;

use crate::error::Result;

/// Integer preferences bound to a tag
pub trait Preferences {
    /// The tag this handle reads and writes under
    fn tag(&self) -> &str;

    /// Read `key`, falling back to `default` when absent
    fn get_integer(&self, key: &str, default: i32) -> i32;

    /// Stage a value; it survives the process only after `flush`
    fn put_integer(&mut self, key: &str, value: i32);

    /// Make staged values durable
    fn flush(&mut self) -> Result<()>;
}
