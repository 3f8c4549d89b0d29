// src/lexer/tables/emit.rs
// Renders a generated keyword table as a C header with two static arrays:
// the keyword records in input order, then the hashed slot array.

use std::{
    fmt::Write as _,
    fs,
    io::{BufWriter, Write},
    path::Path,
};

use serde::{Deserialize, Serialize};

use super::{
    SlotTable,
    error::Result,
    tokens::{DEFAULT_DATA_NAME, DEFAULT_TOKEN_PREFIX, token_enum_name},
};
use crate::lexer::keywords::KeywordSet;

/// Names used in the generated header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderConfig {
    /// Shown in the "do not edit" banner.
    pub generator: String,
    pub copyright: Option<String>,
    pub guard: String,
    pub keyword_type: String,
    /// Keyword array; slot values point into it.
    pub data_name: String,
    pub entry_type: String,
    pub entries_name: String,
    /// Macro wrapping keyword literals in the keyword array.
    pub string_macro: String,
    pub token_prefix: String,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            generator: "kwhash".into(),
            copyright: Some("Nginx, Inc.".into()),
            guard: "_NJS_LEXER_TABLES_H_INCLUDED_".into(),
            keyword_type: "njs_keyword_t".into(),
            data_name: DEFAULT_DATA_NAME.into(),
            entry_type: "njs_lexer_keyword_entry_t".into(),
            entries_name: "njs_lexer_keyword_entries".into(),
            string_macro: "njs_str".into(),
            token_prefix: DEFAULT_TOKEN_PREFIX.into(),
        }
    }
}

/// `static const <decl>[<n>] = { rows };`
struct StaticArray {
    decl: String,
    rows: Vec<String>,
}

impl StaticArray {
    fn new(ty: &str, name: &str) -> Self {
        Self {
            decl: format!("{ty} {name}"),
            rows: Vec::new(),
        }
    }

    fn push(&mut self, row: String) {
        self.rows.push(row);
    }

    fn render(&self, out: &mut String) {
        let _ = write!(out, "static const {}[{}] =\n{{\n", self.decl, self.rows.len());
        for row in &self.rows {
            let _ = writeln!(out, "    {row},");
        }
        out.push_str("};");
    }
}

/// C string literal for `s`. Non-printable and non-ASCII bytes become octal
/// escapes so a following digit can't extend them.
pub fn c_string_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for &b in s.as_bytes() {
        match b {
            b'"' => out.push_str("\\\""),
            b'\\' => out.push_str("\\\\"),
            b'\n' => out.push_str("\\n"),
            b'\t' => out.push_str("\\t"),
            b'\r' => out.push_str("\\r"),
            0x20..=0x7e => out.push(b as char),
            _ => {
                let _ = write!(out, "\\{b:03o}");
            }
        }
    }
    out.push('"');
    out
}

fn keyword_array(set: &KeywordSet, cfg: &HeaderConfig) -> StaticArray {
    let mut arr = StaticArray::new(&cfg.keyword_type, &cfg.data_name);
    for rec in set {
        arr.push(format!(
            "{{ .entry = {{ {}({}) }}, .type = {} }}",
            cfg.string_macro,
            c_string_literal(&rec.key),
            token_enum_name(&cfg.token_prefix, &rec.key)
        ));
    }
    arr
}

/// One `{ key, value, len, next }` row per index. The sentinel row is
/// `{ NULL, NULL, 0, size }`: the table size sits in `next`, not in the
/// length column where older njs headers kept it.
fn entries_array(table: &SlotTable, cfg: &HeaderConfig) -> StaticArray {
    let mut arr = StaticArray::new(&cfg.entry_type, &cfg.entries_name);
    for slot in table.slots() {
        let row = match slot {
            None => "{ NULL, NULL, 0, 0 }".to_string(),
            Some(s) => format!(
                "{{ {}, {}, {}, {} }}",
                s.key().map_or_else(|| "NULL".to_string(), c_string_literal),
                s.value.as_deref().unwrap_or("NULL"),
                s.key_len,
                s.next
            ),
        };
        arr.push(row);
    }
    arr
}

/// Full header text: banner, include guard, keyword array, slot array.
pub fn render_header(set: &KeywordSet, table: &SlotTable, cfg: &HeaderConfig) -> String {
    let mut out = String::new();

    out.push_str("\n/*\n");
    if let Some(c) = &cfg.copyright {
        let _ = write!(out, " * Copyright (C) {c}\n *\n");
    }
    let _ = write!(out, " * Do not edit, generated by: {}.\n */\n\n\n", cfg.generator);
    let _ = write!(out, "#ifndef {g}\n#define {g}\n\n\n", g = cfg.guard);

    keyword_array(set, cfg).render(&mut out);
    out.push_str("\n\n\n");
    entries_array(table, cfg).render(&mut out);

    let _ = write!(out, "\n\n\n#endif /* {} */\n", cfg.guard);
    out
}

/// Writes `text` to `path`, creating parent directories.
pub fn write_header(path: &Path, text: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let f = fs::File::create(path)?;
    let mut w = BufWriter::new(f);
    w.write_all(text.as_bytes())?;
    w.flush()?;
    log::info!("wrote {} bytes to {}", text.len(), path.display());
    Ok(())
}
