// [apps/cube-server/src/command/parser.rs]
use super::errors::ParseError;
use super::Command;
use cube_core_model::{validate_key, Value};

struct Cursor<'a> {
    rest: &'a str,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str) -> Self {
        Self { rest: input }
    }

    fn skip_ws(&mut self) {
        self.rest = self.rest.trim_start_matches(is_command_ws);
    }

    /// Consumes at least one whitespace char. Errors if none is present
    /// (e.g. `"SETkey"` with no separator).
    fn expect_ws(&mut self) -> Result<(), ParseError> {
        let before = self.rest.len();
        self.skip_ws();
        if self.rest.len() == before {
            return Err(ParseError::SyntaxError("expected whitespace".into()));
        }
        Ok(())
    }

    fn take_word(&mut self) -> &'a str {
        let end = self.rest.find(is_command_ws).unwrap_or(self.rest.len());
        let (word, rest) = self.rest.split_at(end);
        self.rest = rest;
        word
    }

    fn end(&mut self) -> Result<(), ParseError> {
        self.skip_ws();
        if self.rest.is_empty() {
            Ok(())
        } else {
            Err(ParseError::ExtraInput)
        }
    }

    fn peek(&self) -> Option<char> {
        self.rest.chars().next()
    }

    fn parse_quoted_string(&mut self) -> Result<Vec<u8>, ParseError> {
        let mut chars = self.rest.char_indices();
        let (_, opening) = chars.next().ok_or(ParseError::UnclosedString)?;
        debug_assert_eq!(opening, '"');

        let mut out = String::new();
        loop {
            let (idx, c) = chars.next().ok_or(ParseError::UnclosedString)?;
            match c {
                '"' => {
                    let consumed = idx + c.len_utf8();
                    self.rest = &self.rest[consumed..];
                    return Ok(out.into_bytes());
                }
                '\\' => {
                    let (_, escaped) = chars.next().ok_or(ParseError::UnclosedString)?;
                    match escaped {
                        '"' => out.push('"'),
                        '\\' => out.push('\\'),
                        'n' => out.push('\n'),
                        't' => out.push('\t'),
                        other => return Err(ParseError::SyntaxError(format!("invalid escape \\{other}"))),
                    }
                }
                other => out.push(other),
            }
        }
    }

    fn parse_key(&mut self) -> Result<Vec<u8>, ParseError> {
        let key = if self.peek() == Some('"') {
            self.parse_quoted_string()?
        } else {
            let word = self.take_unquoted_identifier()?;
            word.as_bytes().to_vec()
        };
        validate_key(&key).map_err(|_| ParseError::InvalidKey)?;
        Ok(key)
    }

    /// `[A-Za-z_][A-Za-z0-9_]*`, stopping at the first char that doesn't
    /// fit the pattern (typically whitespace).
    fn take_unquoted_identifier(&mut self) -> Result<&'a str, ParseError> {
        let mut chars = self.rest.char_indices();
        match chars.next() {
            Some((_, c)) if c.is_ascii_alphabetic() || c == '_' => {}
            Some(_) => return Err(ParseError::InvalidKey),
            None => return Err(ParseError::SyntaxError("expected a key".into())),
        }
        let end = chars
            .find(|&(_, c)| !(c.is_ascii_alphanumeric() || c == '_'))
            .map(|(idx, _)| idx)
            .unwrap_or(self.rest.len());
        let (word, rest) = self.rest.split_at(end);
        self.rest = rest;
        Ok(word)
    }

    fn parse_value(&mut self) -> Result<Value, ParseError> {
        if self.peek() == Some('"') {
            return Ok(Value::Str(self.parse_quoted_string()?));
        }
        let word = self.take_word();
        match word {
            "" => Err(ParseError::SyntaxError("expected a value".into())),
            "TRUE" | "true" => Ok(Value::Bool(true)),
            "FALSE" | "false" => Ok(Value::Bool(false)),
            "NIL" | "nil" => Ok(Value::Nil),
            literal if is_decimal_integer(literal) => {
                literal.parse::<i64>().map(Value::Int).map_err(|_| ParseError::InvalidValue)
            }
            _ => Err(ParseError::InvalidValue),
        }
    }
}

fn is_command_ws(c: char) -> bool {
    c == ' ' || c == '\t' || c == '\r' || c == '\n'
}

fn is_decimal_integer(s: &str) -> bool {
    let digits = s.strip_prefix('-').unwrap_or(s);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Parses one command line per the grammar:
/// `GET key | SET key value | BEGIN | COMMIT | ROLLBACK`.
pub fn parse(input: &str) -> Result<Command, ParseError> {
    let mut cursor = Cursor::new(input.trim_matches(is_command_ws));
    let keyword = cursor.take_word();

    match keyword {
        "GET" => {
            cursor.expect_ws()?;
            let key = cursor.parse_key()?;
            cursor.end()?;
            Ok(Command::Get(key))
        }
        "SET" => {
            cursor.expect_ws()?;
            let key = cursor.parse_key()?;
            cursor.expect_ws()?;
            let value = cursor.parse_value()?;
            cursor.end()?;
            if matches!(value, Value::Nil) {
                return Err(ParseError::CannotSetNil);
            }
            Ok(Command::Set(key, value))
        }
        "BEGIN" => {
            cursor.end()?;
            Ok(Command::Begin)
        }
        "COMMIT" => {
            cursor.end()?;
            Ok(Command::Commit)
        }
        "ROLLBACK" => {
            cursor.end()?;
            Ok(Command::Rollback)
        }
        "" => Err(ParseError::SyntaxError("empty command".into())),
        _ => Err(ParseError::UnknownCommand),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_get_with_unquoted_key() {
        assert_eq!(parse("GET name").unwrap(), Command::Get(b"name".to_vec()));
    }

    #[test]
    fn parses_set_with_quoted_key_and_string_value() {
        let command = parse(r#"SET "my key" "Alice""#).unwrap();
        assert_eq!(command, Command::Set(b"my key".to_vec(), Value::Str(b"Alice".to_vec())));
    }

    #[test]
    fn parses_set_with_negative_integer() {
        assert_eq!(parse("SET x -42").unwrap(), Command::Set(b"x".to_vec(), Value::Int(-42)));
    }

    #[test]
    fn parses_boolean_literals_case_insensitively() {
        assert_eq!(parse("SET flag true").unwrap(), Command::Set(b"flag".to_vec(), Value::Bool(true)));
        assert_eq!(parse("SET flag FALSE").unwrap(), Command::Set(b"flag".to_vec(), Value::Bool(false)));
    }

    #[test]
    fn rejects_explicit_set_to_nil() {
        assert_eq!(parse("SET k nil"), Err(ParseError::CannotSetNil));
        assert_eq!(parse("SET k NIL"), Err(ParseError::CannotSetNil));
    }

    #[test]
    fn rejects_unclosed_string() {
        assert_eq!(parse(r#"SET k "unterminated"#), Err(ParseError::UnclosedString));
    }

    #[test]
    fn rejects_unknown_command() {
        assert_eq!(parse("DELETE k"), Err(ParseError::UnknownCommand));
    }

    #[test]
    fn rejects_trailing_input() {
        assert_eq!(parse("BEGIN extra"), Err(ParseError::ExtraInput));
    }

    #[test]
    fn rejects_invalid_value() {
        assert_eq!(parse("SET k 12abc"), Err(ParseError::InvalidValue));
    }

    #[test]
    fn quoted_string_supports_escapes() {
        let command = parse(r#"SET k "line\nbreak\ttab\"quote\"""#).unwrap();
        assert_eq!(command, Command::Set(b"k".to_vec(), Value::Str(b"line\nbreak\ttab\"quote\"".to_vec())));
    }

    #[test]
    fn whitespace_around_the_whole_command_is_ignored() {
        assert_eq!(parse("  GET k  \n").unwrap(), Command::Get(b"k".to_vec()));
    }
}
