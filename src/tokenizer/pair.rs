// src/tokenizer/pair.rs

/// Two adjacent symbols that a merge rule concatenates, left then right.
pub type Pair = (String, String);

/// Borrowed view of a `Pair`, for comparisons without cloning.
pub fn as_str_pair(pair: &Pair) -> (&str, &str) {
    (pair.0.as_str(), pair.1.as_str())
}
