// src/prep/repr.rs

use crate::tokenizer::cache::{get_bpe_subwords, BpeData, SubwordCache};
use crate::tokenizer::{Error, Model, Result};

/// Content categories of the corpus model that a config may keep visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ReprType {
    SplitContainer,
    Word,
    Number,
    StringLiteral,
    OneLineComment,
    MultilineComment,
    NonEng,
    NewLine,
    Tab,
}

/// How a word or number is cut into subwords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Splitter {
    /// Kept whole, as a single unit.
    Identity,
    /// One unit per character.
    Chars,
    /// Merge rules from the supplied BPE data.
    Bpe,
}

impl Splitter {
    pub fn split<M: Model, C: SubwordCache>(
        &self,
        s: &str,
        bpe_data: Option<&BpeData<M, C>>,
    ) -> Result<Vec<String>> {
        match self {
            Splitter::Identity => Ok(vec![s.to_string()]),
            Splitter::Chars => Ok(s.chars().map(String::from).collect()),
            Splitter::Bpe => get_bpe_subwords(s, bpe_data.ok_or(Error::MissingBpeData)?),
        }
    }
}

/// What the representation layer needs from a preprocessing config.
#[derive(Debug)]
pub struct ReprConfig<'a, M = crate::tokenizer::BPE, C = crate::tokenizer::MergesCache> {
    pub types_to_be_repr: Vec<ReprType>,
    pub bpe_data: Option<&'a BpeData<M, C>>,
    pub should_lowercase: bool,
    pub number_splitter: Splitter,
    /// `None` means words are not split at all.
    pub word_splitter: Option<Splitter>,
    pub is_ronin: bool,
}

impl<M: Model, C: SubwordCache> ReprConfig<'_, M, C> {
    pub fn is_repr(&self, repr_type: ReprType) -> bool {
        self.types_to_be_repr.contains(&repr_type)
    }

    pub fn split_number(&self, number: &str) -> Result<Vec<String>> {
        self.number_splitter.split(number, self.bpe_data)
    }

    /// `Ok(None)` when the config does not split words.
    pub fn split_word(&self, word: &str) -> Result<Option<Vec<String>>> {
        self.word_splitter
            .map(|splitter| splitter.split(word, self.bpe_data))
            .transpose()
    }
}
