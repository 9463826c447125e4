//! Matrix entries

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single matrix entry.
///
/// Entries are integers, except at the UI edge: a product cell that has not
/// been answered is `Empty`, and an entry the player is typing into may hold
/// text that is not a number yet (e.g. a lone `-`).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Value(i64),
    Editing(String),
}

impl Cell {
    /// Interpret text typed or displayed by the UI
    pub fn parse(text: &str) -> Self {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Cell::Empty;
        }
        match trimmed.parse::<i64>() {
            Ok(value) => Cell::Value(value),
            Err(_) => Cell::Editing(text.to_string()),
        }
    }

    pub fn value(&self) -> Option<i64> {
        match self {
            Cell::Value(v) => Some(*v),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell::Value(value)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Value(v) => write!(f, "{}", v),
            Cell::Editing(text) => f.write_str(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(Cell::parse(""), Cell::Empty);
        assert_eq!(Cell::parse("  "), Cell::Empty);
        assert_eq!(Cell::parse("42"), Cell::Value(42));
        assert_eq!(Cell::parse("-7"), Cell::Value(-7));
        assert_eq!(Cell::parse("-"), Cell::Editing("-".to_string()));
    }

    #[test]
    fn test_display_matches_parse() {
        for text in ["", "0", "-15", "-"] {
            assert_eq!(Cell::parse(text).to_string(), text);
        }
    }

    #[test]
    fn test_value() {
        assert_eq!(Cell::Value(3).value(), Some(3));
        assert_eq!(Cell::Empty.value(), None);
        assert_eq!(Cell::Editing("-".into()).value(), None);
    }
}
