// src/lexer/tables/hash.rs
use std::num::NonZeroUsize;

/// Bucket id of `key` in a table of `table_size` buckets, in `1..=table_size`
/// (0 is the sentinel slot and never a bucket).
///
/// `(code(first) * code(last) + len) % table_size + 1`, computed on the
/// lowercased key: codes are Unicode scalar values and `len` counts chars.
/// For ASCII keys this equals the byte arithmetic the C lexer does.
#[inline]
pub fn hash_id(key: &str, table_size: NonZeroUsize) -> usize {
    let lower = key.to_lowercase();
    let mut chars = lower.chars();
    let first = chars.next().map_or(0, |c| c as usize);
    let last = chars.next_back().map_or(first, |c| c as usize);
    (first * last + lower.chars().count()) % table_size.get() + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn matches_hand_computed_ids() {
        // 'i' * 'f' + 2 = 10712
        assert_eq!(hash_id("if", size(5)), 10712 % 5 + 1);
        assert_eq!(hash_id("if", size(11)), 10);
        // 'i' * 'n' + 2 = 11552
        assert_eq!(hash_id("in", size(11)), 3);
        // 'd' * 'o' + 2 = 11102
        assert_eq!(hash_id("do", size(11)), 4);
    }

    #[test]
    fn case_insensitive() {
        for n in 1..64 {
            assert_eq!(hash_id("Typeof", size(n)), hash_id("typeof", size(n)));
        }
    }

    #[test]
    fn always_in_bucket_range() {
        for n in 1..200 {
            for kw in ["a", "instanceof", "Z", "__proto__"] {
                let id = hash_id(kw, size(n));
                assert!((1..=n).contains(&id), "{kw} -> {id} for size {n}");
            }
        }
    }

    #[test]
    fn non_ascii_keys_hash_by_char() {
        // 'é' = 233: 233 * 233 + 1 = 54290
        assert_eq!(hash_id("é", size(1000)), 291);
        // lowercased to "éa": 233 * 97 + 2 = 22603
        assert_eq!(hash_id("Éa", size(1000)), 604);
        // 'ñ' = 241, 'ú' = 250, five chars: 60255
        assert_eq!(hash_id("ñandú", size(1000)), 256);
        assert_eq!(hash_id("É", size(1000)), hash_id("é", size(1000)));
    }

    #[test]
    fn size_one_is_bucket_one() {
        assert_eq!(hash_id("continue", size(1)), 1);
    }
}
