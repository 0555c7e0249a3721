// [libs/core/codec/src/record.rs]
use crate::errors::CodecError;
use crate::shard::{shard_of, ShardId};
use cube_core_model::{validate_key, Value};

fn type_tag(value: &Value) -> char {
    match value {
        Value::Str(_) => '0',
        Value::Int(_) => '1',
        Value::Bool(_) => '3',
        Value::Nil => '4',
    }
}

/// Encodes a `SET key value` into its one-line LTTLV record (newline
/// included) and the shard that owns it.
///
/// Fails with [`CodecError::InvalidKey`] if the key is empty or exceeds
/// the 512-byte limit.
pub fn encode_set(key: &[u8], value: &Value) -> Result<(String, ShardId), CodecError> {
    validate_key(key)?;

    let key_hex = hex::encode_upper(key);
    let length_prefix = format!("{:03X}", key_hex.len());

    let value_bytes = value.canonical_string();
    let value_hex = hex::encode_upper(&value_bytes);
    let value_length = format!("{:08X}", value_bytes.len());

    let mut record = String::with_capacity(3 + key_hex.len() + 1 + 8 + value_hex.len() + 1);
    record.push_str(&length_prefix);
    record.push_str(&key_hex);
    record.push(type_tag(value));
    record.push_str(&value_length);
    record.push_str(&value_hex);
    record.push('\n');

    Ok((record, shard_of(&key_hex)))
}

/// Encodes a `GET key` into its key-prefix fragment (`LLL || keyHex`, no
/// type/length/value) and the shard it routes to.
pub fn encode_get(key: &[u8]) -> Result<(String, ShardId), CodecError> {
    validate_key(key)?;
    let key_hex = hex::encode_upper(key);
    let length_prefix = format!("{:03X}", key_hex.len());
    let mut prefix = String::with_capacity(3 + key_hex.len());
    prefix.push_str(&length_prefix);
    prefix.push_str(&key_hex);
    Ok((prefix, shard_of(&key_hex)))
}

/// Extracts the `LLL || keyHex` prefix from either a full SET record or a
/// GET fragment. Both share the same leading byte layout.
pub fn extract_key_prefix(record: &str) -> Result<&str, CodecError> {
    let length_prefix = record
        .get(0..3)
        .ok_or_else(|| CodecError::MalformedRecord("record shorter than the LLL length prefix".into()))?;
    let key_hex_len = usize::from_str_radix(length_prefix, 16)
        .map_err(|_| CodecError::MalformedRecord(format!("LLL is not valid hex: {length_prefix:?}")))?;

    record
        .get(0..3 + key_hex_len)
        .ok_or_else(|| CodecError::MalformedRecord("record truncated before end of key hex".into()))
}

/// Decodes a trimmed LTTLV record line into its value's canonical string
/// bytes. The type tag is consumed to advance the cursor but is not
/// otherwise interpreted — canonical strings are already self-describing
/// (`TRUE`/`FALSE`/`NIL`/decimal/raw bytes).
pub fn decode(record: &str) -> Result<Vec<u8>, CodecError> {
    let key_prefix = extract_key_prefix(record)?;
    let mut cursor = key_prefix.len();

    let type_tag = record
        .get(cursor..cursor + 1)
        .ok_or_else(|| CodecError::MalformedRecord("record truncated before type tag".into()))?;
    if !matches!(type_tag, "0" | "1" | "2" | "3" | "4") {
        return Err(CodecError::MalformedRecord(format!("unknown type tag: {type_tag:?}")));
    }
    cursor += 1;

    let value_length_hex = record
        .get(cursor..cursor + 8)
        .ok_or_else(|| CodecError::MalformedRecord("record truncated before value length".into()))?;
    let value_byte_len = u32::from_str_radix(value_length_hex, 16)
        .map_err(|_| CodecError::MalformedRecord(format!("value length is not valid hex: {value_length_hex:?}")))?
        as usize;
    cursor += 8;

    let value_hex = record
        .get(cursor..cursor + value_byte_len * 2)
        .ok_or_else(|| CodecError::MalformedRecord("record truncated before end of value hex".into()))?;
    if value_hex.len() != value_byte_len * 2 {
        return Err(CodecError::MalformedRecord("value hex length does not match declared byte length".into()));
    }

    hex::decode(value_hex).map_err(|e| CodecError::MalformedRecord(format!("value is not valid hex: {e}")))
}
