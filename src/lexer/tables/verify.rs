// src/lexer/tables/verify.rs
// Invariant checks shared by the JSON loader, the fuzz binary and the tests.

use super::{
    KeywordTable, NO_NEXT, Slot, SlotTable,
    error::{Result, TableError},
    hash::hash_id,
};
use crate::lexer::{cpu::lookup, keywords::KeywordSet};

fn corrupt(msg: impl Into<String>) -> TableError {
    TableError::Corrupt(msg.into())
}

fn check_entry(idx: usize, s: &Slot, t: &SlotTable) -> Result<()> {
    let size = t.table_size().get();
    let key = s
        .key()
        .ok_or_else(|| corrupt(format!("slot {idx}: entry without key")))?;
    if key.is_empty() || s.value.is_none() {
        return Err(corrupt(format!("slot {idx}: empty key or value")));
    }
    if s.key_len != key.len() {
        return Err(corrupt(format!(
            "slot {idx}: key_len {} != {}",
            s.key_len,
            key.len()
        )));
    }
    if s.is_primary && idx > size {
        return Err(corrupt(format!("slot {idx}: primary entry past table size {size}")));
    }
    if s.next != NO_NEXT {
        if s.next == idx || s.next > t.max_index() {
            return Err(corrupt(format!("slot {idx}: bad next {}", s.next)));
        }
        match t.get(s.next) {
            Some(n) if !n.is_primary => {}
            Some(_) => return Err(corrupt(format!("slot {idx}: links to primary {}", s.next))),
            None => return Err(corrupt(format!("slot {idx}: links to empty {}", s.next))),
        }
    }
    Ok(())
}

/// Checks everything that can be checked without the keyword set: the
/// sentinel, per-slot fields, link targets, and that every chained entry is
/// reached exactly once from a primary slot whose bucket it hashes to.
pub fn check_structure(t: &SlotTable) -> Result<()> {
    let size = t.table_size();
    if t.slots().len() < size.get() + 1 {
        return Err(corrupt(format!(
            "{} slots for table size {size}",
            t.slots().len()
        )));
    }
    if t.get(0) != Some(&Slot::sentinel(size)) {
        return Err(corrupt("slot 0 is not the sentinel"));
    }

    for (idx, s) in t.occupied().skip(1) {
        check_entry(idx, s, t)?;
    }

    let mut seen = vec![false; t.slots().len()];
    for (head, s) in t.occupied().skip(1) {
        if !s.is_primary {
            continue;
        }
        for (idx, entry) in t.chain(head) {
            if std::mem::replace(&mut seen[idx], true) {
                return Err(corrupt(format!("slot {idx} reached twice (chain from {head})")));
            }
            let key = entry.key().unwrap_or_default();
            if hash_id(key, size) != head {
                return Err(corrupt(format!("{key:?} at slot {idx} not in bucket {head}")));
            }
        }
    }
    if let Some((idx, _)) = t.occupied().skip(1).find(|(i, _)| !seen[*i]) {
        return Err(corrupt(format!("slot {idx} unreachable from any bucket")));
    }
    Ok(())
}

/// Full check of a generated table against the keywords it was built from:
/// structure, every keyword found with its own value, nothing extra, and the
/// longest chain equal to the depth the size search reported.
pub fn verify_table(set: &KeywordSet, table: &KeywordTable) -> Result<()> {
    let slots = &table.slots;
    if slots.table_size() != table.candidate.size {
        return Err(corrupt(format!(
            "table size {} != chosen size {}",
            slots.table_size(),
            table.candidate.size
        )));
    }
    check_structure(slots)?;

    let entries = slots.occupied().count() - 1;
    if entries != set.len() {
        return Err(corrupt(format!("{entries} entries for {} keywords", set.len())));
    }
    for rec in set {
        match lookup(slots, &rec.key) {
            Some(s) if s.value.as_deref() == Some(rec.value.as_str()) => {}
            Some(s) => {
                return Err(corrupt(format!(
                    "{:?} maps to {:?}, expected {:?}",
                    rec.key, s.value, rec.value
                )));
            }
            None => return Err(corrupt(format!("{:?} not found", rec.key))),
        }
    }

    let depth = slots.max_chain_depth();
    if depth != table.candidate.max_depth {
        return Err(corrupt(format!(
            "longest chain {depth} != searched depth {}",
            table.candidate.max_depth
        )));
    }
    Ok(())
}
