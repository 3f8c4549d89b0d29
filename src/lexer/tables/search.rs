// src/lexer/tables/search.rs
use std::{num::NonZeroUsize, ops::Range};

use hashbrown::HashMap;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::{
    error::{Result, TableError},
    hash::hash_id,
};
use crate::lexer::keywords::KeywordSet;

/// Candidate table sizes, `min` inclusive, `max` exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRange {
    pub min: usize,
    pub max: usize,
}

impl SearchRange {
    pub const fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    pub fn validate(&self) -> Result<()> {
        if self.min < 1 || self.max <= self.min {
            return Err(TableError::InvalidRange {
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

impl Default for SearchRange {
    fn default() -> Self {
        Self::new(5, 128)
    }
}

impl From<Range<usize>> for SearchRange {
    fn from(r: Range<usize>) -> Self {
        Self::new(r.start, r.end)
    }
}

/// Score of one candidate size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeCandidate {
    /// Keys in the fullest bucket.
    pub max_depth: usize,
    /// Distinct bucket ids hit.
    pub used_slots: usize,
    pub size: NonZeroUsize,
}

pub fn score_size(set: &KeywordSet, size: NonZeroUsize) -> SizeCandidate {
    let mut depth: HashMap<usize, usize> = HashMap::with_capacity(set.len());
    for r in set {
        *depth.entry(hash_id(&r.key, size)).or_insert(0) += 1;
    }
    SizeCandidate {
        max_depth: depth.values().copied().max().unwrap_or(0),
        used_slots: depth.len(),
        size,
    }
}

/// Scores every size in the range, returned in ascending size order.
pub fn score_candidates(set: &KeywordSet, range: SearchRange) -> Result<Vec<SizeCandidate>> {
    range.validate()?;
    // collect() keeps enumeration order regardless of which worker finished first.
    let scored: Vec<SizeCandidate> = (range.min..range.max)
        .into_par_iter()
        .filter_map(NonZeroUsize::new)
        .map(|size| score_size(set, size))
        .collect();
    for c in &scored {
        log::debug!(
            "[search] size {}: max depth {}, used {}",
            c.size,
            c.max_depth,
            c.used_slots
        );
    }
    Ok(scored)
}

/// Picks the size with the smallest worst-case bucket depth.
///
/// Ranking looks at `max_depth` alone and the sort is stable, so among equal
/// depths the smallest size wins; `used_slots` is reported but never breaks
/// ties.
pub fn search_best_size(set: &KeywordSet, range: SearchRange) -> Result<SizeCandidate> {
    let mut scored = score_candidates(set, range)?;
    scored.sort_by_key(|c| c.max_depth);
    let best = scored.first().copied().ok_or(TableError::InvalidRange {
        min: range.min,
        max: range.max,
    })?;
    log::info!(
        "Max deep {}; Used {} of {}",
        best.max_depth,
        best.used_slots,
        best.size
    );
    Ok(best)
}
