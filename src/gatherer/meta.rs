//! Gatherer metadata
//!
//! End users configure a gatherer through a free-text field. The text is read
//! as INI-style `KEY=VALUE` lines:
//!
//! ```text
//! # where to find the tags
//! URL=https://example.test/{binary}/tags
//! ORDER=semver
//! ```
//!
//! Blank lines and lines starting with `#` or `;` are ignored. Keys are
//! case-insensitive and stored upper-cased. Each concrete gatherer turns a
//! [`GathererMeta`] into its own typed options with `TryFrom<&GathererMeta>`.

use std::fmt::Display;
use std::str::FromStr;

use indexmap::IndexMap;

use crate::gatherer::error::MetaError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GathererMeta {
    entries: IndexMap<String, String>,
}

impl GathererMeta {
    pub fn parse(text: &str) -> Result<Self, MetaError> {
        let mut entries = IndexMap::new();

        for (index, raw) in text.lines().enumerate() {
            let line_no = index + 1;
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                return Err(MetaError::Malformed {
                    line: line_no,
                    content: line.to_string(),
                });
            };

            let key = key.trim().to_ascii_uppercase();
            if key.is_empty() {
                return Err(MetaError::EmptyKey { line: line_no });
            }
            if entries.contains_key(&key) {
                return Err(MetaError::DuplicateKey { line: line_no, key });
            }
            entries.insert(key, value.trim().to_string());
        }

        Ok(Self { entries })
    }

    /// Builds metadata from key/value pairs; later pairs overwrite earlier ones
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: Into<String>,
    {
        let entries = pairs
            .into_iter()
            .map(|(k, v)| (k.as_ref().trim().to_ascii_uppercase(), v.into()))
            .collect();
        Self { entries }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .get(&key.to_ascii_uppercase())
            .map(String::as_str)
    }

    pub fn require(&self, key: &str) -> Result<&str, MetaError> {
        self.get(key)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| MetaError::MissingKey(key.to_ascii_uppercase()))
    }

    /// Parses an optional value, reporting the key and offending value on failure
    pub fn get_parsed<T>(&self, key: &str) -> Result<Option<T>, MetaError>
    where
        T: FromStr,
        T::Err: Display,
    {
        self.get(key)
            .map(|value| {
                value.parse::<T>().map_err(|e| MetaError::InvalidValue {
                    key: key.to_ascii_uppercase(),
                    value: value.to_string(),
                    reason: e.to_string(),
                })
            })
            .transpose()
    }

    /// Fails on the first key not in `allowed`
    pub fn reject_unknown(&self, allowed: &[&str]) -> Result<(), MetaError> {
        match self
            .keys()
            .find(|key| !allowed.iter().any(|a| a.eq_ignore_ascii_case(key)))
        {
            Some(key) => Err(MetaError::UnknownKey(key.to_string())),
            None => Ok(()),
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromStr for GathererMeta {
    type Err = MetaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
