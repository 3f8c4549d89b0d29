// src/lexer/tables/io.rs
use std::{
    io::{BufWriter, Write},
    num::NonZeroUsize,
    path::Path,
};

use serde::{Deserialize, Serialize};

use super::{
    KeywordTable, Slot, SlotTable,
    error::{Result, TableError},
    search::SizeCandidate,
};

// -------------------- JSON (de)serialization --------------------

#[derive(Serialize, Deserialize)]
struct TableDisk {
    table_size: usize,
    max_depth: usize,
    used_slots: usize,
    slots: Vec<Option<Slot>>,
}

impl From<&KeywordTable> for TableDisk {
    fn from(t: &KeywordTable) -> Self {
        Self {
            table_size: t.slots.table_size().get(),
            max_depth: t.candidate.max_depth,
            used_slots: t.candidate.used_slots,
            slots: t.slots.slots().to_vec(),
        }
    }
}

impl TableDisk {
    fn into_table(self) -> Result<KeywordTable> {
        let size = NonZeroUsize::new(self.table_size).ok_or(TableError::ZeroTableSize)?;
        let slots = SlotTable::from_parts(size, self.slots)?;
        let depth = slots.max_chain_depth();
        if depth != self.max_depth {
            return Err(TableError::Corrupt(format!(
                "recorded max depth {} but longest chain is {depth}",
                self.max_depth
            )));
        }
        Ok(KeywordTable {
            candidate: SizeCandidate {
                max_depth: self.max_depth,
                used_slots: self.used_slots,
                size,
            },
            slots,
        })
    }
}

pub fn save_table_json(path: &Path, t: &KeywordTable) -> Result<()> {
    let f = std::fs::File::create(path)?;
    let mut w = BufWriter::new(f);
    serde_json::to_writer_pretty(&mut w, &TableDisk::from(t))?;
    w.flush()?;
    Ok(())
}

/// Parses a table written by [`save_table_json`] and re-checks its structure.
pub fn load_table_json_bytes(data: &[u8]) -> Result<KeywordTable> {
    serde_json::from_slice::<TableDisk>(data)?.into_table()
}
