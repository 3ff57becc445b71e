use std::{io, path::PathBuf};

use thiserror::Error;

/// A problem with a single line. Reported and skipped, never propagated past the record.
#[derive(Debug, Error, PartialEq)]
pub enum RecordError {
    #[error("expected {expected} fields, found {found}")]
    Malformed { expected: usize, found: usize },

    #[error("field `{field}` has invalid value {value:?}: {reason}")]
    InvalidField {
        field: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("input closed before a value was entered")]
    Closed,

    #[error("console error: {0}")]
    Io(#[from] io::Error),
}

/// Errors that end one batch operation.
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("cannot open {path}: {source}")]
    Open { path: PathBuf, source: io::Error },

    #[error("cannot read {path}: {source}")]
    Read { path: String, source: io::Error },

    #[error("cannot write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },

    #[error("console output failed: {0}")]
    Console(#[from] io::Error),

    #[error(transparent)]
    Prompt(#[from] PromptError),
}
