//! BPE subword splitting for source-code preprocessing, and the 5-digit
//! preprocessing configuration that decides when it applies.

pub mod prep;
pub mod tokenizer;

pub use prep::{PrepConfig, PrepParam, ReprConfig, ReprType, Splitter};
pub use tokenizer::{
    get_bpe_subwords, BpeData, Error, MergeList, Result, SubwordCache, BPE,
};
