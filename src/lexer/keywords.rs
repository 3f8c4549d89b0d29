// src/lexer/keywords.rs
// Input side of the keyword table generator: an ordered list of unique
// keywords, each with an opaque value the emitted table points at.

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use crate::lexer::tables::error::{Result, TableError};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyRecord {
    pub key: String,
    pub value: String,
}

impl KeyRecord {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Ordered, duplicate-free keyword list. Order is only used as the
/// tie-break when keys of equal length share a bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordSet {
    records: Vec<KeyRecord>,
}

impl KeywordSet {
    pub fn new(records: Vec<KeyRecord>) -> Result<Self> {
        {
            // borrows `records`; must be gone before the move below
            let mut seen = HashSet::with_capacity(records.len());
            for (i, r) in records.iter().enumerate() {
                if r.key.is_empty() {
                    return Err(TableError::EmptyKeyword(i));
                }
                if !seen.insert(r.key.as_str()) {
                    return Err(TableError::DuplicateKeyword(r.key.clone()));
                }
            }
        }
        Ok(Self { records })
    }

    /// Keywords whose values index into the generated keyword array,
    /// i.e. `&{data_name}[i]` for the i-th word.
    pub fn from_keywords<S: AsRef<str>>(words: &[S], data_name: &str) -> Result<Self> {
        let records = words
            .iter()
            .enumerate()
            .map(|(i, w)| KeyRecord::new(w.as_ref(), format!("&{data_name}[{i}]")))
            .collect();
        Self::new(records)
    }

    #[inline]
    pub fn records(&self) -> &[KeyRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, KeyRecord> {
        self.records.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'a> IntoIterator for &'a KeywordSet {
    type Item = &'a KeyRecord;
    type IntoIter = std::slice::Iter<'a, KeyRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Reads a keyword list file: one word per line, blank lines and `#`
/// comments skipped, surrounding whitespace trimmed.
pub fn parse_keyword_list(src: &str) -> Vec<String> {
    src.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}
