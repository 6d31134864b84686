use thiserror::Error;

/// A malformed or unsupported token stream. Any of these invalidates the
/// whole batch, not just the file that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StreamError {
    #[error("unrecognized token code {code} at offset {offset}")]
    UnknownToken { code: u16, offset: usize },

    #[error("token stream is truncated at offset {offset}")]
    Truncated { offset: usize },

    #[error("malformed number tag {tag} at offset {offset}")]
    BadNumberTag { tag: u16, offset: usize },

    #[error("string payload at offset {offset} is not valid utf-16")]
    InvalidText { offset: usize },
}
