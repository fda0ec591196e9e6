use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

use super::ConfigError;

/// A flat configuration section: string keys to string values.
///
/// Keys are unique and case-sensitive. Iteration follows insertion order;
/// inserting an existing key replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlatSource {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl FlatSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces `key`, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let key = key.into();
        let value = value.into();
        match self.index.get(&key) {
            Some(&pos) => Some(std::mem::replace(&mut self.entries[pos].1, value)),
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.index
            .get(key)
            .map(|&pos| self.entries[pos].1.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FlatSource {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut source = FlatSource::new();
        source.extend(iter);
        source
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for FlatSource {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

/// Hands out flat sections by name.
pub trait SectionProvider: Send + Sync + fmt::Debug {
    /// Returns the named section, or `None` when it does not exist.
    fn section(&self, id: &str) -> Option<Cow<'_, FlatSource>>;
}

impl SectionProvider for BTreeMap<String, FlatSource> {
    fn section(&self, id: &str) -> Option<Cow<'_, FlatSource>> {
        self.get(id).map(Cow::Borrowed)
    }
}

impl SectionProvider for HashMap<String, FlatSource> {
    fn section(&self, id: &str) -> Option<Cow<'_, FlatSource>> {
        self.get(id).map(Cow::Borrowed)
    }
}

/// A single value read by a [`SectionSource`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionEntry {
    pub section: String,
    pub key: String,
    pub value: String,
}

impl SectionEntry {
    pub fn new(
        section: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            section: section.into(),
            key: key.into(),
            value: value.into(),
        }
    }
}

/// A loader feeding entries into [`Config`](super::Config).
pub trait SectionSource: Send + Sync + fmt::Debug {
    fn entries(&self) -> Result<Vec<SectionEntry>, ConfigError>;
}

/// Applies `entries` in order; later entries override earlier ones.
pub fn merge_entries(sections: &mut BTreeMap<String, FlatSource>, entries: Vec<SectionEntry>) {
    for entry in entries {
        sections
            .entry(entry.section)
            .or_default()
            .insert(entry.key, entry.value);
    }
}
