// [apps/cube-server/src/command/errors.rs]
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown command")]
    UnknownCommand,

    #[error("syntax error: {0}")]
    SyntaxError(String),

    #[error("invalid key")]
    InvalidKey,

    #[error("invalid value")]
    InvalidValue,

    #[error("unclosed string literal")]
    UnclosedString,

    #[error("unexpected trailing input")]
    ExtraInput,

    #[error("cannot SET a key to nil")]
    CannotSetNil,
}
