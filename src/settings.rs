//! Game settings
//!
//! Persisted through a tagged `Preferences` store. Setters validate and only
//! touch memory; `save_settings_forever` writes everything at once, and only
//! when `data_invariant` finds nothing wrong.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::persistence::Preferences;

/// Storage keys
pub mod keys {
    pub const MIN_VALUE: &str = "minValue";
    pub const MAX_VALUE: &str = "maxValue";
    pub const MIN_ROWS_LEFT: &str = "minRowsLeft";
    pub const MAX_ROWS_LEFT: &str = "maxRowsLeft";
    pub const MIN_COLUMNS_LEFT: &str = "minColumnsLeft";
    pub const MAX_COLUMNS_LEFT: &str = "maxColumnsLeft";
    pub const MIN_COLUMNS_RIGHT: &str = "minColumnsRight";
    pub const MAX_COLUMNS_RIGHT: &str = "maxColumnsRight";
    pub const ANSWER_ALTERNATIVES: &str = "answerAlternatives";
    pub const ANSWER_MAX_ERROR: &str = "answerMaxError";
}

/// A rule broken by the current settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Violation {
    /// `min_value > max_value`
    ValueRange,
    /// Rows of A out of order or negative
    RowsLeft,
    /// Columns of A (rows of B) out of order or negative
    ColumnsLeft,
    /// Columns of B out of order or negative
    ColumnsRight,
    /// Fewer than one answer alternative
    AnswerAlternatives,
    /// Alternative error below one
    AnswerMaxError,
}

impl Violation {
    /// Stable numeric tag, used by settings forms to mark fields
    pub fn code(&self) -> u8 {
        match self {
            Violation::ValueRange => 0,
            Violation::RowsLeft => 1,
            Violation::ColumnsLeft => 2,
            Violation::ColumnsRight => 3,
            Violation::AnswerAlternatives => 4,
            Violation::AnswerMaxError => 5,
        }
    }

    /// Label of the offending field
    pub fn as_str(&self) -> &'static str {
        match self {
            Violation::ValueRange => "Value",
            Violation::RowsLeft => "Rows left",
            Violation::ColumnsLeft => "Columns left",
            Violation::ColumnsRight => "Columns right",
            Violation::AnswerAlternatives => "Answer alternatives",
            Violation::AnswerMaxError => "Alternative error",
        }
    }
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Smallest possible entry value
    min_value: i32,
    /// Largest possible entry value
    max_value: i32,

    // === Dimensions (inclusive ranges) ===
    /// Rows of the left matrix A
    min_rows_left: i32,
    max_rows_left: i32,
    /// Columns of A, which are also the rows of the right matrix B
    min_columns_left: i32,
    max_columns_left: i32,
    /// Columns of B
    min_columns_right: i32,
    max_columns_right: i32,

    // === Answers ===
    /// Number of values to choose from
    answer_alternatives: i32,
    /// Largest distance between a wrong alternative and the correct answer
    answer_max_error: i32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            min_value: -10,
            max_value: 10,

            min_rows_left: 1,
            max_rows_left: 3,
            min_columns_left: 1,
            max_columns_left: 3,
            min_columns_right: 1,
            max_columns_right: 3,

            answer_alternatives: 3,
            answer_max_error: 10,
        }
    }
}

impl Settings {
    /// Load settings from `prefs`, using defaults for missing keys
    pub fn load(prefs: &impl Preferences) -> Self {
        let mut settings = Self::default();
        settings.reload(prefs);
        log::info!("Loaded settings '{}'", prefs.tag());
        settings
    }

    /// Re-read every field from `prefs`, discarding unsaved edits
    pub fn reload(&mut self, prefs: &impl Preferences) {
        let d = Self::default();
        self.min_value = prefs.get_integer(keys::MIN_VALUE, d.min_value);
        self.max_value = prefs.get_integer(keys::MAX_VALUE, d.max_value);
        self.min_rows_left = prefs.get_integer(keys::MIN_ROWS_LEFT, d.min_rows_left);
        self.max_rows_left = prefs.get_integer(keys::MAX_ROWS_LEFT, d.max_rows_left);
        self.min_columns_left = prefs.get_integer(keys::MIN_COLUMNS_LEFT, d.min_columns_left);
        self.max_columns_left = prefs.get_integer(keys::MAX_COLUMNS_LEFT, d.max_columns_left);
        self.min_columns_right = prefs.get_integer(keys::MIN_COLUMNS_RIGHT, d.min_columns_right);
        self.max_columns_right = prefs.get_integer(keys::MAX_COLUMNS_RIGHT, d.max_columns_right);
        self.answer_alternatives =
            prefs.get_integer(keys::ANSWER_ALTERNATIVES, d.answer_alternatives);
        self.answer_max_error = prefs.get_integer(keys::ANSWER_MAX_ERROR, d.answer_max_error);
    }

    /// Write all fields and flush, but only if `data_invariant` is empty.
    ///
    /// Returns whether the settings were saved.
    pub fn save_settings_forever(&self, prefs: &mut impl Preferences) -> Result<bool> {
        let violations = self.data_invariant();
        if !violations.is_empty() {
            let fields: Vec<&str> = violations.iter().map(Violation::as_str).collect();
            log::warn!("Refusing to save settings, invalid: {}", fields.join(", "));
            return Ok(false);
        }

        prefs.put_integer(keys::MIN_VALUE, self.min_value);
        prefs.put_integer(keys::MAX_VALUE, self.max_value);
        prefs.put_integer(keys::MIN_ROWS_LEFT, self.min_rows_left);
        prefs.put_integer(keys::MAX_ROWS_LEFT, self.max_rows_left);
        prefs.put_integer(keys::MIN_COLUMNS_LEFT, self.min_columns_left);
        prefs.put_integer(keys::MAX_COLUMNS_LEFT, self.max_columns_left);
        prefs.put_integer(keys::MIN_COLUMNS_RIGHT, self.min_columns_right);
        prefs.put_integer(keys::MAX_COLUMNS_RIGHT, self.max_columns_right);
        prefs.put_integer(keys::ANSWER_ALTERNATIVES, self.answer_alternatives);
        prefs.put_integer(keys::ANSWER_MAX_ERROR, self.answer_max_error);
        prefs.flush()?;

        log::info!("Settings '{}' saved", prefs.tag());
        Ok(true)
    }

    /// Every rule the current values break, in field order
    pub fn data_invariant(&self) -> Vec<Violation> {
        let mut violations = Vec::new();

        if self.min_value > self.max_value {
            violations.push(Violation::ValueRange);
        }
        if !range_ok(self.min_rows_left, self.max_rows_left) {
            violations.push(Violation::RowsLeft);
        }
        if !range_ok(self.min_columns_left, self.max_columns_left) {
            violations.push(Violation::ColumnsLeft);
        }
        if !range_ok(self.min_columns_right, self.max_columns_right) {
            violations.push(Violation::ColumnsRight);
        }
        if self.answer_alternatives < 1 {
            violations.push(Violation::AnswerAlternatives);
        }
        if self.answer_max_error < 1 {
            violations.push(Violation::AnswerMaxError);
        }

        violations
    }

    pub fn min_value(&self) -> i32 {
        self.min_value
    }

    pub fn max_value(&self) -> i32 {
        self.max_value
    }

    pub fn min_rows_left(&self) -> i32 {
        self.min_rows_left
    }

    pub fn max_rows_left(&self) -> i32 {
        self.max_rows_left
    }

    pub fn min_columns_left(&self) -> i32 {
        self.min_columns_left
    }

    pub fn max_columns_left(&self) -> i32 {
        self.max_columns_left
    }

    pub fn min_columns_right(&self) -> i32 {
        self.min_columns_right
    }

    pub fn max_columns_right(&self) -> i32 {
        self.max_columns_right
    }

    pub fn answer_alternatives(&self) -> i32 {
        self.answer_alternatives
    }

    pub fn answer_max_error(&self) -> i32 {
        self.answer_max_error
    }

    pub fn set_min_value(&mut self, value: i32) -> Result<()> {
        if value > self.max_value {
            return Err(Error::invalid(format!(
                "minValue {} exceeds maxValue {}",
                value, self.max_value
            )));
        }
        self.min_value = value;
        Ok(())
    }

    pub fn set_max_value(&mut self, value: i32) -> Result<()> {
        if value < self.min_value {
            return Err(Error::invalid(format!(
                "maxValue {} is below minValue {}",
                value, self.min_value
            )));
        }
        self.max_value = value;
        Ok(())
    }

    pub fn set_min_rows_left(&mut self, value: i32) -> Result<()> {
        self.min_rows_left = check_min(keys::MIN_ROWS_LEFT, value, self.max_rows_left)?;
        Ok(())
    }

    pub fn set_max_rows_left(&mut self, value: i32) -> Result<()> {
        self.max_rows_left = check_max(keys::MAX_ROWS_LEFT, value, self.min_rows_left)?;
        Ok(())
    }

    pub fn set_min_columns_left(&mut self, value: i32) -> Result<()> {
        self.min_columns_left = check_min(keys::MIN_COLUMNS_LEFT, value, self.max_columns_left)?;
        Ok(())
    }

    pub fn set_max_columns_left(&mut self, value: i32) -> Result<()> {
        self.max_columns_left = check_max(keys::MAX_COLUMNS_LEFT, value, self.min_columns_left)?;
        Ok(())
    }

    pub fn set_min_columns_right(&mut self, value: i32) -> Result<()> {
        self.min_columns_right =
            check_min(keys::MIN_COLUMNS_RIGHT, value, self.max_columns_right)?;
        Ok(())
    }

    pub fn set_max_columns_right(&mut self, value: i32) -> Result<()> {
        self.max_columns_right =
            check_max(keys::MAX_COLUMNS_RIGHT, value, self.min_columns_right)?;
        Ok(())
    }

    /// Values below one are accepted here but rejected by `data_invariant`
    pub fn set_answer_alternatives(&mut self, value: i32) -> Result<()> {
        self.answer_alternatives = check_non_negative(keys::ANSWER_ALTERNATIVES, value)?;
        Ok(())
    }

    pub fn set_answer_max_error(&mut self, value: i32) -> Result<()> {
        self.answer_max_error = check_non_negative(keys::ANSWER_MAX_ERROR, value)?;
        Ok(())
    }
}

fn range_ok(min: i32, max: i32) -> bool {
    min >= 0 && max >= 0 && min <= max
}

fn check_min(key: &str, value: i32, max: i32) -> Result<i32> {
    if value < 0 || value > max {
        return Err(Error::invalid(format!(
            "{} must be in 0..={}, got {}",
            key, max, value
        )));
    }
    Ok(value)
}

fn check_max(key: &str, value: i32, min: i32) -> Result<i32> {
    if value < 0 || value < min {
        return Err(Error::invalid(format!(
            "{} must be at least {}, got {}",
            key,
            min.max(0),
            value
        )));
    }
    Ok(value)
}

fn check_non_negative(key: &str, value: i32) -> Result<i32> {
    if value < 0 {
        return Err(Error::invalid(format!("{} must not be negative, got {}", key, value)));
    }
    Ok(value)
}
