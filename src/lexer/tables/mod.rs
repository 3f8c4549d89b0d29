// src/lexer/tables/mod.rs
pub mod build;
pub mod emit;
pub mod error;
pub mod hash;
pub mod io;
pub mod search;
pub mod tokens;
pub mod verify;

use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

pub use build::{assign_slots, build_keyword_table};
pub use emit::{HeaderConfig, render_header, write_header};
pub use error::{Result, TableError};
pub use hash::hash_id;
pub use io::{load_table_json_bytes, save_table_json};
pub use search::{SearchRange, SizeCandidate, search_best_size};
pub use tokens::{DEFAULT_KEYWORDS, token_enum_name};

use crate::lexer::keywords::KeyRecord;

/// Slot index meaning "end of chain". Slot 0 is the sentinel, so no chain
/// ever links to it.
pub const NO_NEXT: usize = 0;

/// One row of the flat keyword table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub key: Option<String>,
    pub value: Option<String>,
    pub key_len: usize,
    pub next: usize,
    pub is_primary: bool,
}

impl Slot {
    /// Slot 0: no key, `next` carries the table size.
    pub fn sentinel(table_size: NonZeroUsize) -> Self {
        Self {
            key: None,
            value: None,
            key_len: 0,
            next: table_size.get(),
            is_primary: true,
        }
    }

    pub(crate) fn entry(rec: &KeyRecord, is_primary: bool) -> Self {
        Self {
            key: Some(rec.key.clone()),
            value: Some(rec.value.clone()),
            key_len: rec.key.len(),
            next: NO_NEXT,
            is_primary,
        }
    }

    #[inline]
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }
}

/// Dense slot array `0..=max_index`. Indices that never received a key are
/// `None`; consumers render them as empty records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotTable {
    table_size: NonZeroUsize,
    slots: Vec<Option<Slot>>,
}

impl SlotTable {
    /// Wraps a slot vector after checking its structure (sentinel, links in
    /// range, acyclic chains).
    pub fn from_parts(table_size: NonZeroUsize, slots: Vec<Option<Slot>>) -> Result<Self> {
        let t = Self { table_size, slots };
        verify::check_structure(&t)?;
        Ok(t)
    }

    pub(crate) fn from_parts_unchecked(table_size: NonZeroUsize, slots: Vec<Option<Slot>>) -> Self {
        Self { table_size, slots }
    }

    #[inline]
    pub fn table_size(&self) -> NonZeroUsize {
        self.table_size
    }

    /// Highest index in the array; at least the table size.
    #[inline]
    pub fn max_index(&self) -> usize {
        self.slots.len() - 1
    }

    #[inline]
    pub fn get(&self, idx: usize) -> Option<&Slot> {
        self.slots.get(idx).and_then(Option::as_ref)
    }

    #[inline]
    pub fn slots(&self) -> &[Option<Slot>] {
        &self.slots
    }

    /// Occupied slots (sentinel included) in index order.
    pub fn occupied(&self) -> impl Iterator<Item = (usize, &Slot)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|s| (i, s)))
    }

    /// Slots reachable from `start` by following `next`, `start` included.
    /// Stops at the end of chain, at an empty index, or after visiting as
    /// many slots as the table holds.
    pub fn chain(&self, start: usize) -> Chain<'_> {
        Chain {
            table: self,
            cur: start,
            budget: self.slots.len(),
        }
    }

    /// Length of the chain hanging off every primary slot, by slot index.
    pub fn chain_depths(&self) -> Vec<(usize, usize)> {
        self.occupied()
            .filter(|(i, s)| *i != 0 && s.is_primary)
            .map(|(i, _)| (i, self.chain(i).count()))
            .collect()
    }

    pub fn max_chain_depth(&self) -> usize {
        self.chain_depths()
            .into_iter()
            .map(|(_, d)| d)
            .max()
            .unwrap_or(0)
    }
}

pub struct Chain<'t> {
    table: &'t SlotTable,
    cur: usize,
    budget: usize,
}

impl<'t> Iterator for Chain<'t> {
    type Item = (usize, &'t Slot);

    fn next(&mut self) -> Option<Self::Item> {
        if self.cur == NO_NEXT || self.budget == 0 {
            return None;
        }
        self.budget -= 1;
        let idx = self.cur;
        let slot = self.table.get(idx)?;
        self.cur = slot.next;
        Some((idx, slot))
    }
}

/// Result of a full generation run: the chosen size and the laid-out table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordTable {
    pub candidate: SizeCandidate,
    pub slots: SlotTable,
}
