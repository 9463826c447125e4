//! Matrix Drill - a matrix multiplication trainer
//!
//! The player fills in `C = A * B` one entry at a time, column by column,
//! picking each value from a handful of answer alternatives.
//!
//! Core modules:
//! - `game`: Round logic, scoring and the UI-facing iterator
//! - `table`: Matrices and the table abstraction the game drives
//! - `settings`: Validated value and dimension ranges
//! - `persistence`: Key/value preference stores
//! - `error`: Shared error type

pub mod error;
pub mod game;
pub mod persistence;
pub mod settings;
pub mod table;

pub use error::{Error, Result};
pub use game::{Choice, GameEvent, GameIterator, GameLogic, GamePhase, NewGame, Side};
pub use persistence::{JsonPreferences, MemoryPreferences, Preferences};
pub use settings::{Settings, Violation};
pub use table::{Cell, Grid, Matrix, MultiplicationTable, Worksheet};

/// Game configuration constants
pub mod consts {
    /// Redraws allowed per wrong alternative before a zero or duplicate
    /// error is accepted
    pub const MAX_ERROR_RETRIES: usize = 10;

    /// Preference store tag for settings
    pub const SETTINGS_TAG: &str = "Matrix Multiplication";
}
