// [libs/core/model/src/value.rs]

/// The tagged variant every key maps to: string, integer, boolean, or nil.
///
/// Strings carry raw bytes rather than `String` because the wire format
/// (spec §3) explicitly allows embedded NUL and newline bytes inside a
/// string value — only the *boundary* representation (hex inside an LTTLV
/// record, or the HTTP reply body) is guaranteed printable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Raw string bytes, may include arbitrary bytes including NUL/newline.
    Str(Vec<u8>),
    /// Decimal integer, arbitrary sign.
    Int(i64),
    /// Boolean, normalized to `TRUE`/`FALSE` at every storage boundary.
    Bool(bool),
    /// The absence of a value.
    Nil,
}

impl Value {
    /// Canonical on-the-wire string form used for storage comparison and
    /// HTTP replies: `TRUE`, `FALSE`, `NIL`, a decimal integer, or raw
    /// string bytes.
    pub fn canonical_string(&self) -> Vec<u8> {
        match self {
            Value::Str(bytes) => bytes.clone(),
            Value::Int(value) => value.to_string().into_bytes(),
            Value::Bool(true) => b"TRUE".to_vec(),
            Value::Bool(false) => b"FALSE".to_vec(),
            Value::Nil => b"NIL".to_vec(),
        }
    }

    /// Parses a canonical string back into a typed `Value`.
    ///
    /// This is deliberately asymmetric: a string value that happens to read
    /// as `TRUE`/`FALSE`/`NIL`/an integer is reconstructed with the wrong
    /// type tag. Callers that must preserve the original tagged variant
    /// (the transaction write buffer, see `cube-txn`) keep the `Value`
    /// itself around instead of round-tripping it through this function.
    pub fn parse_canonical(bytes: &[u8]) -> Value {
        if bytes == b"NIL" {
            return Value::Nil;
        }
        if bytes.eq_ignore_ascii_case(b"TRUE") {
            return Value::Bool(true);
        }
        if bytes.eq_ignore_ascii_case(b"FALSE") {
            return Value::Bool(false);
        }
        if is_decimal_integer(bytes) {
            if let Ok(text) = std::str::from_utf8(bytes) {
                if let Ok(parsed) = text.parse::<i64>() {
                    return Value::Int(parsed);
                }
            }
        }
        Value::Str(bytes.to_vec())
    }
}

fn is_decimal_integer(bytes: &[u8]) -> bool {
    let digits = bytes.strip_prefix(b"-").unwrap_or(bytes);
    !digits.is_empty() && digits.iter().all(u8::is_ascii_digit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_round_trips_integers() {
        let value = Value::Int(-42);
        assert_eq!(value.canonical_string(), b"-42");
        assert_eq!(Value::parse_canonical(b"-42"), Value::Int(-42));
    }

    #[test]
    fn canonical_booleans_are_uppercase() {
        assert_eq!(Value::Bool(true).canonical_string(), b"TRUE");
        assert_eq!(Value::Bool(false).canonical_string(), b"FALSE");
        assert_eq!(Value::parse_canonical(b"true"), Value::Bool(true));
        assert_eq!(Value::parse_canonical(b"FALSE"), Value::Bool(false));
    }

    #[test]
    fn canonical_nil_round_trips() {
        assert_eq!(Value::Nil.canonical_string(), b"NIL");
        assert_eq!(Value::parse_canonical(b"NIL"), Value::Nil);
    }

    #[test]
    fn ambiguous_strings_lose_their_tag_on_reparse() {
        let looks_like_an_int = Value::Str(b"42".to_vec());
        let canonical = looks_like_an_int.canonical_string();
        assert_eq!(Value::parse_canonical(&canonical), Value::Int(42));
    }

    #[test]
    fn plain_strings_survive_round_trip() {
        let value = Value::Str(b"Alice".to_vec());
        assert_eq!(Value::parse_canonical(&value.canonical_string()), value);
    }
}
