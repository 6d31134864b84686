use thiserror::Error;

/// Missing batch inputs, reported before any processing starts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("no source files were supplied")]
    NoSourceFiles,

    #[error("a dictionary destination file must be specified")]
    MissingDictionaryFile,
}
