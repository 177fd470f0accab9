// src/tokenizer/word.rs

use crate::tokenizer::pair::{as_str_pair, Pair};

/// The current decomposition of one word while merges are replayed on it.
#[derive(Debug, Default, PartialEq, Eq, Clone)]
pub struct Word {
    symbols: Vec<String>,
}

impl Word {
    pub fn from_symbols(symbols: Vec<String>) -> Self {
        Self { symbols }
    }

    /// Builds a word from a space-joined symbol sequence.
    pub fn from_joined(joined: &str) -> Self {
        Self {
            symbols: joined.split(' ').map(str::to_string).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn get_symbols(&self) -> &[String] {
        &self.symbols
    }

    pub fn into_symbols(self) -> Vec<String> {
        self.symbols
    }

    pub fn joined(&self) -> String {
        self.symbols.join(" ")
    }

    /// Applies one merge rule in a single left-to-right pass.
    ///
    /// Matches are leftmost-first and never overlap: once `(a, b)` is merged
    /// the scan resumes after `b`, and the merged symbol is not looked at again
    /// in this pass. Returns the number of merges performed.
    pub fn merge(&mut self, pair: &Pair) -> usize {
        let (a, b) = as_str_pair(pair);
        if self.symbols.len() < 2 {
            return 0;
        }

        let mut merged = 0;
        let mut new_symbols = Vec::with_capacity(self.symbols.len());
        let mut old_symbols = std::mem::take(&mut self.symbols).into_iter().peekable();

        while let Some(current) = old_symbols.next() {
            let is_match = current == a && old_symbols.peek().is_some_and(|next| next == b);
            if is_match {
                let next = old_symbols.next().unwrap_or_default();
                new_symbols.push(current + &next);
                merged += 1;
            } else {
                new_symbols.push(current);
            }
        }

        self.symbols = new_symbols;
        merged
    }
}
