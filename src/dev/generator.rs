// src/dev/generator.rs
// Random keyword sets for the fuzz binary and the randomized tests.

use hashbrown::HashSet;
use rand::Rng;

use crate::lexer::keywords::{KeyRecord, KeywordSet};

fn random_alpha<R: Rng>(rng: &mut R) -> char {
    // mostly lowercase, some uppercase to exercise the case folding
    let b = if rng.random_bool(0.9) {
        rng.random_range(b'a'..=b'z')
    } else {
        rng.random_range(b'A'..=b'Z')
    };
    b as char
}

fn random_word<R: Rng>(rng: &mut R, max_len: usize) -> String {
    let len = rng.random_range(1..=max_len.max(1));
    let mut s = String::with_capacity(len);
    for i in 0..len {
        if i > 0 && rng.random_bool(0.05) {
            s.push('_');
        } else {
            s.push(random_alpha(rng));
        }
    }
    s
}

/// `n` distinct words of 1..=`max_len` bytes, values `&{data_name}[i]`.
/// Gives up on uniqueness after a bounded number of draws, so tiny
/// `max_len` can return fewer than `n` words.
pub fn gen_keyword_set<R: Rng>(rng: &mut R, n: usize, max_len: usize, data_name: &str) -> KeywordSet {
    let mut seen = HashSet::with_capacity(n);
    let mut records = Vec::with_capacity(n);
    let mut draws = 0usize;
    while records.len() < n && draws < n.saturating_mul(64).max(64) {
        draws += 1;
        let w = random_word(rng, max_len);
        if seen.insert(w.clone()) {
            let i = records.len();
            records.push(KeyRecord::new(w, format!("&{data_name}[{i}]")));
        }
    }
    // Words are unique and non-empty by construction.
    KeywordSet::new(records).unwrap_or_default()
}
