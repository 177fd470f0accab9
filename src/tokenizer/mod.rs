// src/tokenizer/mod.rs

pub mod bpe;
pub mod cache;
pub mod escape;
pub mod merge;
pub mod pair;
pub mod parallelism;
pub mod pre_tokenizer;
pub(crate) mod progress;
pub mod result;
pub mod word;

pub use bpe::{encode, encode_word, BpeEncoder, BpeEncoderBuilder, BPE};
pub use cache::{get_bpe_subwords, BpeData, MergesCache, SharedSubwordCache, SubwordCache};
pub use escape::{escape, unescape, ESCAPE_CHAR};
pub use merge::{Merge, MergeList};
pub use pair::Pair;
pub use pre_tokenizer::{to_char_list, CharLevel, PreTokenizer};
pub use result::{Error, FormatError, Result, ValidationError};
pub use word::Word;

/// Anything that can split an escaped word (`"getName@"`) into escaped subwords.
///
/// Implemented by [`MergeList`] and [`BPE`]; the cache lookup in
/// [`get_bpe_subwords`] only falls back to it on a miss.
pub trait Model: Send + Sync {
    fn encode_word(&self, word: &str) -> Result<Vec<String>>;
}
