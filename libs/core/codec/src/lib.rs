// [libs/core/codec/src/lib.rs]
//! LTTLV (Length-Tag-Type-Length-Value) record codec and deterministic
//! shard routing.
//!
//! A record is one newline-terminated, uppercase-hex ASCII line:
//! `LLL || keyHex || T || VVVVVVVV || valueHex`, where `LLL` is the
//! 3-hex-digit length of `keyHex`, `T` is a single type-tag digit, and
//! `VVVVVVVV` is the 8-hex-digit byte length of the value.

mod errors;
mod record;
mod shard;

pub use errors::CodecError;
pub use record::{decode, encode_get, encode_set, extract_key_prefix};
pub use shard::{shard_of, ShardId, SHARD_COUNT};
