//! The session key-value store.

use chrono::NaiveDate;
use std::collections::HashMap;

/// A value held in the session store.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionValue {
    Number(f64),
    Integer(i64),
    Flag(bool),
    Date(NaiveDate),
    Text(String),
    Cities(Vec<String>),
}

impl From<f64> for SessionValue {
    fn from(v: f64) -> Self {
        SessionValue::Number(v)
    }
}

impl From<i64> for SessionValue {
    fn from(v: i64) -> Self {
        SessionValue::Integer(v)
    }
}

impl From<bool> for SessionValue {
    fn from(v: bool) -> Self {
        SessionValue::Flag(v)
    }
}

impl From<NaiveDate> for SessionValue {
    fn from(v: NaiveDate) -> Self {
        SessionValue::Date(v)
    }
}

impl From<String> for SessionValue {
    fn from(v: String) -> Self {
        SessionValue::Text(v)
    }
}

impl From<&str> for SessionValue {
    fn from(v: &str) -> Self {
        SessionValue::Text(v.to_string())
    }
}

impl From<Vec<String>> for SessionValue {
    fn from(v: Vec<String>) -> Self {
        SessionValue::Cities(v)
    }
}

/// Mutable per-session state, exclusively owned by one session.
///
/// All operations are synchronous and visible on the next
/// re-evaluation. There is no locking: a session is single-threaded
/// from the store's point of view, and concurrent sessions each get an
/// isolated instance.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    values: HashMap<String, SessionValue>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&SessionValue> {
        self.values.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<SessionValue>) {
        self.values.insert(key.into(), value.into());
    }

    /// Returns true if the key was present.
    pub fn delete(&mut self, key: &str) -> bool {
        self.values.remove(key).is_some()
    }

    /// Bulk delete for a reset action's enumerated key set.
    pub fn delete_many(&mut self, keys: &[&str]) {
        for key in keys {
            self.values.remove(*key);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    // Typed accessors. A key holding a value of a different kind reads
    // as absent rather than panicking.

    pub fn number(&self, key: &str) -> Option<f64> {
        match self.values.get(key) {
            Some(SessionValue::Number(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn integer(&self, key: &str) -> Option<i64> {
        match self.values.get(key) {
            Some(SessionValue::Integer(v)) => Some(*v),
            _ => None,
        }
    }

    /// Boolean flag; an absent key reads as false.
    pub fn flag(&self, key: &str) -> bool {
        matches!(self.values.get(key), Some(SessionValue::Flag(true)))
    }

    pub fn date(&self, key: &str) -> Option<NaiveDate> {
        match self.values.get(key) {
            Some(SessionValue::Date(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        match self.values.get(key) {
            Some(SessionValue::Text(v)) => Some(v.as_str()),
            _ => None,
        }
    }

    pub fn cities(&self, key: &str) -> Option<&[String]> {
        match self.values.get(key) {
            Some(SessionValue::Cities(v)) => Some(v.as_slice()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys;

    #[test]
    fn set_get_delete_roundtrip() {
        let mut store = SessionStore::new();
        store.set(keys::PREDICT_CO, 4.2);
        assert_eq!(store.number(keys::PREDICT_CO), Some(4.2));

        assert!(store.delete(keys::PREDICT_CO));
        assert!(!store.delete(keys::PREDICT_CO));
        assert_eq!(store.number(keys::PREDICT_CO), None);
    }

    #[test]
    fn absent_flag_reads_false() {
        let store = SessionStore::new();
        assert!(!store.flag(keys::HISTORY_FILTERS_APPLIED));
    }

    #[test]
    fn typed_mismatch_reads_absent() {
        let mut store = SessionStore::new();
        store.set("k", "text");
        assert_eq!(store.number("k"), None);
        assert_eq!(store.text("k"), Some("text"));
    }

    #[test]
    fn delete_many_only_touches_named_keys() {
        let mut store = SessionStore::new();
        store.set(keys::HISTORY_FILTERS_APPLIED, true);
        store.set(keys::HISTORY_METRIC, "Ozone");
        store.set(keys::PREDICT_RESULT, 97i64);
        store.set(keys::CITY_SELECTED, "Delhi");

        store.delete_many(keys::HISTORY_OWNED);

        assert!(!store.flag(keys::HISTORY_FILTERS_APPLIED));
        assert_eq!(store.text(keys::HISTORY_METRIC), None);
        assert_eq!(store.integer(keys::PREDICT_RESULT), Some(97));
        assert_eq!(store.text(keys::CITY_SELECTED), Some("Delhi"));
    }

    #[test]
    fn city_list_roundtrip() {
        let mut store = SessionStore::new();
        store.set(
            keys::HISTORY_CITIES,
            vec!["Delhi".to_string(), "Hyderabad".to_string()],
        );
        let cities = store.cities(keys::HISTORY_CITIES).unwrap();
        assert_eq!(cities, ["Delhi", "Hyderabad"]);
    }
}
