// src/lexer/cpu.rs
// Keyword probe over a generated table, done the way the C lexer walks the
// emitted array. Used as the correctness oracle for generated tables.

use crate::lexer::tables::{Slot, SlotTable, hash::hash_id};

/// Finds the slot holding `word`: start at its bucket, compare length then
/// bytes, follow `next` until the chain ends.
pub fn lookup<'t>(table: &'t SlotTable, word: &str) -> Option<&'t Slot> {
    let start = hash_id(word, table.table_size());
    table
        .chain(start)
        .map(|(_, slot)| slot)
        .find(|slot| slot.key_len == word.len() && slot.key() == Some(word))
}

/// Number of slots visited before `word` is found or the chain runs out.
pub fn probe_len(table: &SlotTable, word: &str) -> usize {
    let start = hash_id(word, table.table_size());
    let mut n = 0;
    for (_, slot) in table.chain(start) {
        n += 1;
        if slot.key() == Some(word) {
            break;
        }
    }
    n
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroUsize;

    use super::*;
    use crate::lexer::{keywords::KeywordSet, tables::assign_slots};

    fn table(words: &[&str], size: usize) -> SlotTable {
        let set = KeywordSet::from_keywords(words, "kws").unwrap();
        assign_slots(&set, NonZeroUsize::new(size).unwrap())
    }

    #[test]
    fn finds_every_chained_key() {
        let t = table(&["if", "in", "do"], 5);
        assert_eq!(lookup(&t, "if").and_then(|s| s.value.as_deref()), Some("&kws[0]"));
        assert_eq!(lookup(&t, "in").and_then(|s| s.value.as_deref()), Some("&kws[1]"));
        assert_eq!(lookup(&t, "do").and_then(|s| s.value.as_deref()), Some("&kws[2]"));
        assert_eq!(probe_len(&t, "do"), 3);
    }

    #[test]
    fn misses_non_keywords() {
        let t = table(&["if", "in", "do"], 5);
        for w in ["", "i", "id", "If", "iff", "done"] {
            assert!(lookup(&t, w).is_none(), "{w:?}");
        }
    }

    #[test]
    fn empty_table_finds_nothing() {
        let t = table(&[], 3);
        assert!(lookup(&t, "null").is_none());
        assert_eq!(probe_len(&t, "null"), 0);
    }
}
