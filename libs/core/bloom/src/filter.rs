// [libs/core/bloom/src/filter.rs]
/*!
 * Counting Bloom filter: a fixed-size vector of atomic unsigned counters.
 *
 * `add` increments each of `hash_count` hashed positions; `remove`
 * decrements them with a saturating floor at zero; `contains` returns
 * true iff every hashed position is nonzero. `contains` never takes a
 * lock — it is safe to call concurrently with `add`/`remove` performed by
 * the shard owner (spec §4.2, §5).
 */

use siphasher::sip::SipHasher13;
use std::hash::Hasher;
use std::sync::atomic::{AtomicU32, Ordering};
use tracing::trace;

/// Default cell count: 10,000 counters.
pub const DEFAULT_SIZE: usize = 10_000;
/// Default hash function count: 3.
pub const DEFAULT_HASH_COUNT: usize = 3;

/// A counting Bloom filter over byte-string keys (here, LTTLV key
/// prefixes). No false negatives: once a key prefix has been `add`ed, it
/// is never reported absent until a matching number of `remove`s have run.
pub struct CountingBloomFilter {
    counters: Vec<AtomicU32>,
    hash_count: usize,
}

impl CountingBloomFilter {
    /// Builds a filter with `size` counters and `hash_count` hash
    /// functions. `size` and `hash_count` are fixed for the lifetime of
    /// the filter.
    pub fn new(size: usize, hash_count: usize) -> Self {
        let size = size.max(1);
        let hash_count = hash_count.max(1);
        let mut counters = Vec::with_capacity(size);
        counters.resize_with(size, || AtomicU32::new(0));
        Self { counters, hash_count }
    }

    /// Records that `key` is present. Increments each hashed counter by
    /// one.
    pub fn add(&self, key: &[u8]) {
        for position in self.positions(key) {
            self.counters[position].fetch_add(1, Ordering::SeqCst);
        }
        trace!(key_len = key.len(), "bloom add");
    }

    /// Records that one occurrence of `key` is gone. Decrements each
    /// hashed counter, saturating at zero — `remove` never underflows.
    pub fn remove(&self, key: &[u8]) {
        for position in self.positions(key) {
            self.counters[position]
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |current| {
                    Some(current.saturating_sub(1))
                })
                .ok();
        }
    }

    /// `true` iff every hashed counter for `key` is nonzero. May return a
    /// false positive; never a false negative for a key that was `add`ed
    /// and not yet fully `remove`d.
    pub fn contains(&self, key: &[u8]) -> bool {
        self.positions(key).all(|position| self.counters[position].load(Ordering::SeqCst) > 0)
    }

    fn positions(&self, key: &[u8]) -> impl Iterator<Item = usize> + '_ {
        let base = base_hash(key);
        (0..self.hash_count).map(move |i| (combined_hash(base, i as u64) % self.counters.len() as u64) as usize)
    }
}

impl Default for CountingBloomFilter {
    fn default() -> Self {
        Self::new(DEFAULT_SIZE, DEFAULT_HASH_COUNT)
    }
}

fn base_hash(key: &[u8]) -> u64 {
    let mut hasher = SipHasher13::new_with_keys(0, 0);
    hasher.write(key);
    hasher.finish()
}

fn combined_hash(base: u64, salt: u64) -> u64 {
    let mut hasher = SipHasher13::new_with_keys(0, 0);
    hasher.write_u64(base);
    hasher.write_u64(salt);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_is_false_before_any_add() {
        let filter = CountingBloomFilter::default();
        assert!(!filter.contains(b"absent"));
    }

    #[test]
    fn added_keys_are_never_false_negatives() {
        let filter = CountingBloomFilter::new(256, 3);
        let keys: Vec<String> = (0..100).map(|i| format!("key-{i}")).collect();
        for key in &keys {
            filter.add(key.as_bytes());
        }
        for key in &keys {
            assert!(filter.contains(key.as_bytes()), "false negative for {key}");
        }
    }

    #[test]
    fn remove_drops_a_single_occurrence_without_underflow() {
        let filter = CountingBloomFilter::new(256, 3);
        filter.add(b"k");
        filter.remove(b"k");
        filter.remove(b"k"); // extra remove must not panic or underflow
        assert!(!filter.contains(b"k"));
    }

    #[test]
    fn duplicate_adds_require_matching_removes() {
        let filter = CountingBloomFilter::new(256, 3);
        filter.add(b"k");
        filter.add(b"k");
        filter.remove(b"k");
        assert!(filter.contains(b"k"), "one remaining add should still be visible");
        filter.remove(b"k");
        assert!(!filter.contains(b"k"));
    }
}
