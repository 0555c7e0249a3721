// [libs/core/bloom/src/lib.rs]
//! Counting Bloom filter used by each shard to reject absent keys
//! without a disk read.

mod filter;

pub use filter::{CountingBloomFilter, DEFAULT_HASH_COUNT, DEFAULT_SIZE};
