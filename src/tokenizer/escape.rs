// src/tokenizer/escape.rs

//! Reversible escaping that keeps the end-of-word marker unambiguous.
//!
//! Every literal `@` in a word is doubled, so a single `@` can only ever be the
//! marker appended by [`escape`].

use crate::tokenizer::result::FormatError;

pub const ESCAPE_CHAR: char = '@';

/// Characters that may follow `ESCAPE_CHAR` inside an escaped word.
pub const ESCAPABLE_CHARS: &[char] = &[ESCAPE_CHAR];

const DOUBLED_ESCAPE: &str = "@@";
const SINGLE_ESCAPE: &str = "@";

/// Escapes `word` and appends the end-of-word marker.
///
/// With `merged` set the marker is glued to the word (`"if@"`), which is the
/// form merges are applied to. Otherwise it is separated by a space (`"if @"`).
pub fn escape(word: &str, merged: bool) -> String {
    let escaped = word.replace(SINGLE_ESCAPE, DOUBLED_ESCAPE);
    if merged {
        format!("{escaped}{ESCAPE_CHAR}")
    } else {
        format!("{escaped} {ESCAPE_CHAR}")
    }
}

/// Strips the end-of-word marker from the last part and undoubles escapes in all parts.
pub fn unescape<S: AsRef<str>>(parts: &[S]) -> Result<Vec<String>, FormatError> {
    let ends_with_marker = parts
        .last()
        .is_some_and(|last| last.as_ref().ends_with(ESCAPE_CHAR));
    if !ends_with_marker {
        return Err(FormatError::MissingEndMarker(
            parts.iter().map(|p| p.as_ref().to_string()).collect(),
        ));
    }

    let last = parts.len() - 1;
    Ok(parts
        .iter()
        .enumerate()
        .map(|(idx, part)| {
            let part: &str = part.as_ref();
            let part = if idx == last {
                &part[..part.len() - ESCAPE_CHAR.len_utf8()]
            } else {
                part
            };
            part.replace(DOUBLED_ESCAPE, SINGLE_ESCAPE)
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_appends_marker() {
        assert_eq!(escape("if", true), "if@");
        assert_eq!(escape("if", false), "if @");
    }

    #[test]
    fn escape_doubles_escape_char() {
        assert_eq!(escape("a@b", true), "a@@b@");
        assert_eq!(escape("@", false), "@@ @");
    }

    #[test]
    fn unescape_plain_word() {
        assert_eq!(unescape(&[escape("getName", true)]).unwrap(), vec!["getName"]);
    }

    #[test]
    fn unescape_restores_escape_chars_in_every_part() {
        let parts = ["a@@", "b", "@@c@"];
        assert_eq!(unescape(&parts).unwrap(), vec!["a@", "b", "@c"]);
    }

    #[test]
    fn unescape_without_marker_fails() {
        let err = unescape(&["get", "Name"]).unwrap_err();
        assert_eq!(
            err,
            FormatError::MissingEndMarker(vec!["get".to_string(), "Name".to_string()])
        );
    }

    #[test]
    fn unescape_empty_input_fails() {
        let parts: [&str; 0] = [];
        assert!(unescape(&parts).is_err());
        assert!(unescape(&[""]).is_err());
    }

    #[test]
    fn empty_word_round_trips() {
        assert_eq!(unescape(&[escape("", true)]).unwrap(), vec![""]);
    }
}
