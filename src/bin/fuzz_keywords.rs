// src/bin/fuzz_keywords.rs
// Build tables for random keyword sets and check every invariant.
//   FUZZ_SEED=<u64>     rng seed (default 42)
//   FUZZ_ITERS=<n>      number of sets (default 500)
//   FUZZ_MAX_KEYS=<n>   keywords per set, upper bound (default 96)
//   FUZZ_SAVE=1         write failing sets to FUZZ_DIR (default "fuzz-cases")

use std::{fs, path::PathBuf, time::Instant};

use kwhash::{
    dev::generator::gen_keyword_set,
    lexer::{
        keywords::KeywordSet,
        tables::{SearchRange, build_keyword_table, verify::verify_table},
    },
};
use rand::{Rng, SeedableRng, rngs::StdRng};

fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

fn save_case(dir: &str, seed: u64, iter: usize, set: &KeywordSet, range: SearchRange) -> PathBuf {
    let _ = fs::create_dir_all(dir);
    let path = PathBuf::from(dir).join(format!("kw_seed{seed}_iter{iter}.json"));
    let meta = serde_json::json!({
        "seed": seed,
        "iter": iter,
        "range": range,
        "keywords": set.records(),
    });
    if let Ok(s) = serde_json::to_string_pretty(&meta) {
        let _ = fs::write(&path, s);
    }
    path
}

fn main() {
    let seed: u64 = env_or("FUZZ_SEED", 42);
    let iters: usize = env_or("FUZZ_ITERS", 500);
    let max_keys: usize = env_or("FUZZ_MAX_KEYS", 96);
    let save_cases = std::env::var("FUZZ_SAVE").ok().as_deref() == Some("1");
    let out_dir = std::env::var("FUZZ_DIR").unwrap_or_else(|_| "fuzz-cases".to_string());

    eprintln!("[fuzz] iters={iters} max_keys={max_keys} seed={seed}");
    let mut rng = StdRng::seed_from_u64(seed);
    let t0 = Instant::now();
    let mut deepest = 0usize;

    for i in 0..iters {
        let n = rng.random_range(0..=max_keys);
        let set = gen_keyword_set(&mut rng, n, 12, "kws");
        let min = rng.random_range(1..=16);
        let range = SearchRange::new(min, min + rng.random_range(1..=128));

        let res = build_keyword_table(&set, range).and_then(|t| {
            verify_table(&set, &t)?;
            Ok(t)
        });
        match res {
            Ok(t) => deepest = deepest.max(t.candidate.max_depth),
            Err(e) => {
                eprintln!("[fuzz] iter {i}: {} keys, range {range:?}: {e}", set.len());
                if save_cases {
                    let p = save_case(&out_dir, seed, i, &set, range);
                    eprintln!("[save] wrote {}", p.display());
                }
                std::process::exit(1);
            }
        }
    }

    eprintln!(
        "[fuzz] {iters} tables ok in {} ms, deepest chain {deepest}",
        t0.elapsed().as_millis()
    );
}
