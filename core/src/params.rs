//! Ordered multi-valued parameters for query strings and form bodies.
//!
//! # Design
//! `Params` is a `Vec` of entries rather than a map. Keys stay unique because
//! every mutation looks the key up before inserting, and the vector keeps the
//! order keys were first inserted in. `encode` walks that order directly, so
//! the output is insertion-ordered, not sorted by key.

use std::fmt;

/// One key together with all of its values, in the order they were added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub key: String,
    pub values: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    params: Vec<Param>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// First value stored for `key`, or `""` when the key is absent or has no
    /// values.
    pub fn get(&self, key: &str) -> &str {
        self.params
            .iter()
            .find(|param| param.key == key)
            .and_then(|param| param.values.first())
            .map(String::as_str)
            .unwrap_or("")
    }

    /// All values stored for `key`, empty when the key is absent.
    pub fn values(&self, key: &str) -> &[String] {
        self.index_of(key)
            .map(|i| self.params[i].values.as_slice())
            .unwrap_or(&[])
    }

    pub fn has(&self, key: &str) -> bool {
        self.index_of(key).is_some()
    }

    /// Position of `key` in insertion order.
    pub fn index_of(&self, key: &str) -> Option<usize> {
        self.params.iter().position(|param| param.key == key)
    }

    /// Replace every value of `key` with `value`, appending the key if new.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        let key = key.into();
        let value = value.into();
        match self.index_of(&key) {
            Some(i) => self.params[i].values = vec![value],
            None => self.params.push(Param {
                key,
                values: vec![value],
            }),
        }
        self
    }

    /// Append `value` to the values of `key`, appending the key if new.
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        let key = key.into();
        let value = value.into();
        match self.index_of(&key) {
            Some(i) => self.params[i].values.push(value),
            None => self.params.push(Param {
                key,
                values: vec![value],
            }),
        }
        self
    }

    /// Remove `key` and all of its values. No-op when absent.
    pub fn del(&mut self, key: &str) -> &mut Self {
        if let Some(i) = self.index_of(key) {
            self.params.remove(i);
        }
        self
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Param> {
        self.params.iter()
    }

    /// Encode as `application/x-www-form-urlencoded`.
    ///
    /// Entries come out in key insertion order and each value of a key
    /// becomes its own `key=value` pair. Empty params encode to `""`.
    pub fn encode(&self) -> String {
        let mut out = String::new();
        for param in &self.params {
            let key: String = form_urlencoded::byte_serialize(param.key.as_bytes()).collect();
            for value in &param.values {
                if !out.is_empty() {
                    out.push('&');
                }
                out.push_str(&key);
                out.push('=');
                out.extend(form_urlencoded::byte_serialize(value.as_bytes()));
            }
        }
        out
    }
}

impl fmt::Display for Params {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl<'a> IntoIterator for &'a Params {
    type Item = &'a Param;
    type IntoIter = std::slice::Iter<'a, Param>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Collects with `add` semantics: repeated keys accumulate values.
impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Params::new();
        for (key, value) in iter {
            params.add(key, value);
        }
        params
    }
}
