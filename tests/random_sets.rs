//! Randomized keyword sets: every built table must satisfy the structural
//! invariants, find every keyword and match the depth the search reported.
//!
//! Seed and iteration count can be overridden with RANDOM_SETS_SEED and
//! RANDOM_SETS_ITERS.

use kwhash::{
    dev::generator::gen_keyword_set,
    lexer::tables::{SearchRange, build_keyword_table, search::score_candidates, verify::verify_table},
};
use rand::{Rng, SeedableRng, rngs::StdRng};

fn env_u64(name: &str, default: u64) -> u64 {
    std::env::var(name)
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(default)
}

#[test]
fn random_sets_verify() {
    let seed = env_u64("RANDOM_SETS_SEED", 42);
    let iters = env_u64("RANDOM_SETS_ITERS", 200);
    let mut rng = StdRng::seed_from_u64(seed);

    for i in 0..iters {
        let n = rng.random_range(0..=64);
        let set = gen_keyword_set(&mut rng, n, 10, "kws");
        let min = rng.random_range(1..=12);
        let range = SearchRange::new(min, min + rng.random_range(1..=64));

        let t = build_keyword_table(&set, range)
            .unwrap_or_else(|e| panic!("iter {i} (seed {seed}): build failed: {e}"));
        if let Err(e) = verify_table(&set, &t) {
            panic!("iter {i} (seed {seed}), {} keys, {range:?}: {e}", set.len());
        }
    }
}

#[test]
fn chosen_size_is_first_with_min_depth() {
    let seed = env_u64("RANDOM_SETS_SEED", 42);
    let mut rng = StdRng::seed_from_u64(seed ^ 0x9E37_79B9_7F4A_7C15);

    for _ in 0..50 {
        let set = gen_keyword_set(&mut rng, 30, 8, "kws");
        let range = SearchRange::new(5, 60);
        let scored = score_candidates(&set, range).unwrap();
        let t = build_keyword_table(&set, range).unwrap();

        let min_depth = scored.iter().map(|c| c.max_depth).min().unwrap();
        let first = scored.iter().find(|c| c.max_depth == min_depth).unwrap();
        assert_eq!(t.candidate, *first);
        assert!(scored
            .iter()
            .filter(|c| c.size < t.candidate.size)
            .all(|c| c.max_depth > min_depth));
    }
}

#[test]
fn same_input_same_table() {
    let mut a = StdRng::seed_from_u64(11);
    let mut b = StdRng::seed_from_u64(11);
    for _ in 0..20 {
        let sa = gen_keyword_set(&mut a, 40, 9, "kws");
        let sb = gen_keyword_set(&mut b, 40, 9, "kws");
        let range = SearchRange::new(3, 90);
        assert_eq!(
            build_keyword_table(&sa, range).unwrap(),
            build_keyword_table(&sb, range).unwrap()
        );
    }
}
