// src/tokenizer/pre_tokenizer.rs

// Char-level splitting of escaped words into the symbols merges start from.

use crate::tokenizer::escape::{ESCAPABLE_CHARS, ESCAPE_CHAR};
use crate::tokenizer::result::FormatError;

/// Splits an escaped word into its initial symbols.
pub trait PreTokenizer {
    fn pre_tokenize(&self, word: &str) -> Result<Vec<String>, FormatError>;
}

/// One symbol per character, except escape sequences which stay whole.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct CharLevel;

impl CharLevel {
    pub fn new() -> Self {
        CharLevel
    }
}

impl PreTokenizer for CharLevel {
    fn pre_tokenize(&self, word: &str) -> Result<Vec<String>, FormatError> {
        to_char_list(word)
    }
}

/// Splits `word` into characters, keeping `@@` as a single symbol.
///
/// A trailing lone `@` (the end-of-word marker) is a symbol of its own. Any
/// other `@` pairing means the word was never escaped and is rejected.
pub fn to_char_list(word: &str) -> Result<Vec<String>, FormatError> {
    let mut res = Vec::with_capacity(word.len());
    let mut chars = word.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch != ESCAPE_CHAR {
            res.push(ch.to_string());
            continue;
        }
        match chars.peek().copied() {
            None => res.push(ch.to_string()),
            Some(next) if ESCAPABLE_CHARS.contains(&next) => {
                chars.next();
                res.push([ch, next].iter().collect());
            }
            Some(next) => {
                return Err(FormatError::IllegalEscapeSequence(
                    [ch, next].iter().collect(),
                ));
            }
        }
    }
    Ok(res)
}
