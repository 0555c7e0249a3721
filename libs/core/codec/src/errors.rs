// [libs/core/codec/src/errors.rs]
use cube_core_model::ModelError;
use thiserror::Error;

/// Errors raised while encoding or decoding an LTTLV record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// The key failed the shared model's length/emptiness validation.
    #[error(transparent)]
    InvalidKey(#[from] ModelError),

    /// A line did not parse as a well-formed LTTLV record: a hex field
    /// wasn't valid hex, a length prefix didn't match the data that
    /// followed, or the line was truncated.
    #[error("malformed LTTLV record: {0}")]
    MalformedRecord(String),
}
