// src/lexer/tables/build.rs
use std::{collections::VecDeque, num::NonZeroUsize, time::Instant};

use super::{
    KeywordTable, Slot, SlotTable,
    error::Result,
    hash::hash_id,
    search::{SearchRange, search_best_size},
};
use crate::lexer::keywords::{KeyRecord, KeywordSet};

/// Hands out slots for chained entries: first the bucket indices that got no
/// primary key (ascending), then fresh indices past the end of the table.
#[derive(Debug)]
struct SlotAllocator {
    unused: VecDeque<usize>,
    last: usize,
}

impl SlotAllocator {
    fn new(unused: Vec<usize>, table_size: NonZeroUsize) -> Self {
        Self {
            unused: unused.into(),
            last: table_size.get(),
        }
    }

    fn next_free(&mut self) -> usize {
        if let Some(idx) = self.unused.pop_front() {
            return idx;
        }
        self.last += 1;
        self.last
    }
}

/// Groups keys by bucket id; each bucket sorted by key length, ties kept in
/// input order. Index 0 stays empty.
fn fill_buckets(set: &KeywordSet, table_size: NonZeroUsize) -> Vec<Vec<&KeyRecord>> {
    let mut buckets: Vec<Vec<&KeyRecord>> = vec![Vec::new(); table_size.get() + 1];
    for rec in set {
        buckets[hash_id(&rec.key, table_size)].push(rec);
    }
    for b in &mut buckets {
        b.sort_by_key(|r| r.key.chars().count());
    }
    buckets
}

/// Lays the keys out for a fixed table size.
///
/// The shortest key of bucket `k` lands in slot `k`. The rest of the bucket
/// is chained through `next` into slots handed out by [`SlotAllocator`],
/// buckets visited in index order.
pub fn assign_slots(set: &KeywordSet, table_size: NonZeroUsize) -> SlotTable {
    let size = table_size.get();
    let buckets = fill_buckets(set, table_size);

    let mut slots: Vec<Option<Slot>> = vec![None; size + 1];
    slots[0] = Some(Slot::sentinel(table_size));

    let mut unused = Vec::new();
    for k in 1..=size {
        match buckets[k].first() {
            Some(head) => slots[k] = Some(Slot::entry(head, true)),
            None => unused.push(k),
        }
    }

    let mut alloc = SlotAllocator::new(unused, table_size);
    for k in 1..=size {
        let mut last = k;
        for rec in buckets[k].iter().skip(1) {
            let idx = alloc.next_free();
            if idx >= slots.len() {
                slots.resize(idx + 1, None);
            }
            if let Some(prev) = slots[last].as_mut() {
                prev.next = idx;
            }
            slots[idx] = Some(Slot::entry(rec, false));
            last = idx;
        }
    }

    log::debug!(
        "[build] size {size}: {} keys, max index {}",
        set.len(),
        slots.len() - 1
    );

    SlotTable::from_parts_unchecked(table_size, slots)
}

/// Full generation run: pick the size, then lay out the table.
pub fn build_keyword_table(set: &KeywordSet, range: SearchRange) -> Result<KeywordTable> {
    let t0 = Instant::now();
    let candidate = search_best_size(set, range)?;
    let slots = assign_slots(set, candidate.size);
    log::debug!(
        "[build] {} keywords -> {} slots in {:?}",
        set.len(),
        slots.max_index() + 1,
        t0.elapsed()
    );
    Ok(KeywordTable { candidate, slots })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tables::NO_NEXT;

    fn size(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    fn if_in_do() -> KeywordSet {
        KeywordSet::from_keywords(&["if", "in", "do"], "kws").unwrap()
    }

    fn key_at(t: &SlotTable, idx: usize) -> Option<&str> {
        t.get(idx).and_then(Slot::key)
    }

    #[test]
    fn allocator_reuses_then_extends() {
        let mut a = SlotAllocator::new(vec![2, 4], size(5));
        assert_eq!(a.next_free(), 2);
        assert_eq!(a.next_free(), 4);
        assert_eq!(a.next_free(), 6);
        assert_eq!(a.next_free(), 7);
    }

    #[test]
    fn collisions_fill_lowest_unused_slots() {
        // all three hash to bucket 3 at size 5
        let t = assign_slots(&if_in_do(), size(5));
        assert_eq!(t.max_index(), 5);
        assert_eq!(key_at(&t, 3), Some("if"));
        assert_eq!(key_at(&t, 1), Some("in"));
        assert_eq!(key_at(&t, 2), Some("do"));
        assert!(t.get(4).is_none());
        assert!(t.get(5).is_none());

        let s3 = t.get(3).unwrap();
        assert!(s3.is_primary);
        assert_eq!(s3.next, 1);
        assert_eq!(t.get(1).unwrap().next, 2);
        assert!(!t.get(1).unwrap().is_primary);
        assert_eq!(t.get(2).unwrap().next, NO_NEXT);
    }

    #[test]
    fn size_one_chains_everything_from_slot_one() {
        let t = assign_slots(&if_in_do(), size(1));
        assert_eq!(t.max_index(), 3);
        let chain: Vec<(usize, &str)> = t
            .chain(1)
            .map(|(i, s)| (i, s.key().unwrap_or_default()))
            .collect();
        assert_eq!(chain, vec![(1, "if"), (2, "in"), (3, "do")]);
    }

    #[test]
    fn shorter_keys_take_the_primary_slot() {
        // size 1: one bucket, ordered by length then input order
        let set = KeywordSet::from_keywords(&["while", "do", "for", "if"], "kws").unwrap();
        let t = assign_slots(&set, size(1));
        let keys: Vec<&str> = t.chain(1).filter_map(|(_, s)| s.key()).collect();
        assert_eq!(keys, vec!["do", "if", "for", "while"]);
    }

    #[test]
    fn empty_set_is_sentinel_only() {
        let t = assign_slots(&KeywordSet::default(), size(5));
        assert_eq!(t.max_index(), 5);
        assert_eq!(t.occupied().count(), 1);
        assert_eq!(t.get(0), Some(&Slot::sentinel(size(5))));
    }

    #[test]
    fn sentinel_carries_table_size() {
        let t = assign_slots(&if_in_do(), size(7));
        let s = t.get(0).unwrap();
        assert_eq!((s.key(), s.value.as_deref()), (None, None));
        assert_eq!((s.key_len, s.next, s.is_primary), (0, 7, true));
    }

    #[test]
    fn build_picks_size_then_assigns() {
        let t = build_keyword_table(&if_in_do(), SearchRange::new(5, 11)).unwrap();
        assert_eq!(t.candidate.size.get(), 7);
        // 'do' alone in bucket 1, 'if' heads bucket 3 and chains to 2
        assert_eq!(key_at(&t.slots, 1), Some("do"));
        assert_eq!(key_at(&t.slots, 3), Some("if"));
        assert_eq!(key_at(&t.slots, 2), Some("in"));
        assert_eq!(t.slots.get(3).unwrap().next, 2);
        assert_eq!(t.slots.max_chain_depth(), t.candidate.max_depth);
    }

    #[test]
    fn build_rejects_bad_range() {
        assert!(build_keyword_table(&if_in_do(), SearchRange::new(0, 1)).is_err());
    }
}
