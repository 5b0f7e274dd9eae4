//=========================================================================
// Event Arguments
//=========================================================================
//
// String key/value bag passed to every subscriber of a fired event.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

//=== EventArgs ===========================================================

/// Key/value payload carried by a fired event.
///
/// Keys and values are plain strings so that producers and consumers only
/// have to agree on names, never on types.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventArgs {
    values: HashMap<String, String>,
}

impl EventArgs {
    /// Creates an empty argument bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_value(key, value);
        self
    }

    /// Inserts or replaces a value.
    pub fn set_value(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Returns the value for `key`, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Returns the value for `key`, or `default` when it is missing.
    pub fn get_value<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

//=========================================================================
// Tests
//=========================================================================
