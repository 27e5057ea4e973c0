//! # Settings Map
//!
//! User settings are a flat JSON object: string keys, arbitrary values.
//! The controller reads single keys with a caller-supplied fallback, so
//! unknown keys are carried through untouched.
//!
//! ## Default Entries
//! | key             | default | meaning                          |
//! |-----------------|---------|----------------------------------|
//! | `study_time`    | 25      | minutes per study phase          |
//! | `short_break`   | 5       | minutes per short break          |
//! | `long_break`    | 15      | minutes per long break           |
//! | `cycles`        | 4       | study phases before a long break |
//! | `sound_enabled` | true    | play alarm sound                 |
//! | `volume`        | 50      | alarm volume (0-100)             |

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Minutes per study phase.
pub const DEFAULT_STUDY_MINUTES: u64 = 25;

/// Minutes per short break.
pub const DEFAULT_SHORT_BREAK_MINUTES: u64 = 5;

/// Minutes per long break.
pub const DEFAULT_LONG_BREAK_MINUTES: u64 = 15;

/// Study phases before a long break.
pub const DEFAULT_CYCLES: u64 = 4;

/// Key/value settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Settings(Map<String, Value>);

impl Settings {
    /// Creates an empty settings map.
    pub fn new() -> Self {
        Settings(Map::new())
    }

    /// The settings a fresh install starts with.
    pub fn defaults() -> Self {
        let mut map = Map::new();
        map.insert("study_time".into(), json!(DEFAULT_STUDY_MINUTES));
        map.insert("short_break".into(), json!(DEFAULT_SHORT_BREAK_MINUTES));
        map.insert("long_break".into(), json!(DEFAULT_LONG_BREAK_MINUTES));
        map.insert("cycles".into(), json!(DEFAULT_CYCLES));
        map.insert("sound_enabled".into(), json!(true));
        map.insert("volume".into(), json!(50));
        Settings(map)
    }

    /// Returns the stored value for `key`, if any.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns the stored value for `key`, or `default` when absent.
    pub fn get_or(&self, key: &str, default: Value) -> Value {
        self.0.get(key).cloned().unwrap_or(default)
    }

    /// Typed read. `None` when the key is missing or the value does not fit `T`.
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.0
            .get(key)
            .and_then(|value| serde_json::from_value(value.clone()).ok())
    }

    /// Inserts or overwrites a single entry.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    /// Overwrites entries with those from `other`. Keys only in `self` stay.
    pub fn merge(&mut self, other: Settings) {
        for (key, value) in other.0 {
            self.0.insert(key, value);
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when there are no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Borrows the underlying JSON object.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for Settings {
    fn from(map: Map<String, Value>) -> Self {
        Settings(map)
    }
}

impl FromIterator<(String, Value)> for Settings {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Settings(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::defaults();
        assert_eq!(settings.get_as::<u64>("study_time"), Some(25));
        assert_eq!(settings.get_as::<u64>("cycles"), Some(DEFAULT_CYCLES));
        assert_eq!(settings.get_as::<bool>("sound_enabled"), Some(true));
    }

    #[test]
    fn test_get_or_falls_back() {
        let settings = Settings::defaults();
        assert_eq!(settings.get_or("missing", json!(-1)), json!(-1));
        assert_eq!(settings.get_or("volume", json!(0)), json!(50));
    }

    #[test]
    fn test_get_as_wrong_type_is_none() {
        let settings = Settings::defaults();
        assert_eq!(settings.get_as::<String>("volume"), None);
    }

    #[test]
    fn test_merge_overwrites_and_keeps() {
        let mut settings = Settings::defaults();
        let update: Settings = [
            ("volume".to_string(), json!(5)),
            ("theme".to_string(), json!("dark")),
        ]
        .into_iter()
        .collect();

        settings.merge(update);

        assert_eq!(settings.get_or("volume", json!(0)), json!(5));
        assert_eq!(settings.get_or("theme", Value::Null), json!("dark"));
        assert_eq!(settings.get_as::<u64>("study_time"), Some(25));
        assert_eq!(settings.len(), 7);
    }

    #[test]
    fn test_serializes_as_plain_object() {
        let mut settings = Settings::new();
        settings.insert("volume", json!(5));
        assert_eq!(serde_json::to_string(&settings).unwrap(), r#"{"volume":5}"#);
    }
}
