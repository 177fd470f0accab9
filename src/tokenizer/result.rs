// src/tokenizer/result.rs

use thiserror::Error;

/// Malformed escaped input, detected while splitting or unescaping a word.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("Illegal escape sequence: {0}")]
    IllegalEscapeSequence(String),

    #[error("There should be @ at the end, however this is what was passed: {0:?}")]
    MissingEndMarker(Vec<String>),
}

/// Rejected preprocessing configuration. Only raised while building a `PrepConfig`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Expected {expected} params, got {got}")]
    ParamCount { expected: usize, got: usize },

    #[error("Param code must be a digit, got {0:?}")]
    NotADigit(char),

    #[error("Invalid value {value} for prep param {param}, possible values are: {possible:?}")]
    InvalidValue {
        param: &'static str,
        value: u8,
        possible: &'static [u8],
    },

    #[error(
        "Combination SPLIT={split} and CAPS={caps} is not supported: \
         basic splitting needs to be done to lowercase the subword."
    )]
    UnsupportedCombination { caps: u8, split: u8 },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed merge at line {line}: {content:?}")]
    MergeFile { line: usize, content: String },

    #[error("BPE splitting requested but no BPE data was supplied")]
    MissingBpeData,
}

pub type Result<T> = std::result::Result<T, Error>;
