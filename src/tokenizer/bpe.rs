// src/tokenizer/bpe.rs

use std::sync::Arc;

use rustc_hash::FxHashMap as HashMap;

use crate::tokenizer::merge::MergeList;
use crate::tokenizer::parallelism::MaybeParallelRefIterator;
use crate::tokenizer::pre_tokenizer::to_char_list;
use crate::tokenizer::progress::merge_progress;
use crate::tokenizer::word::Word;
use crate::tokenizer::{Model, Result};

/// Symbol count above which encoding a single word logs a warning and
/// shows progress.
pub const DEFAULT_LONG_SEQUENCE_THRESHOLD: usize = 5000;

struct Config {
    long_sequence_threshold: usize,
    show_progress: bool,
}

pub struct BpeEncoderBuilder {
    config: Config,
}

impl Default for BpeEncoderBuilder {
    fn default() -> Self {
        Self {
            config: Config {
                long_sequence_threshold: DEFAULT_LONG_SEQUENCE_THRESHOLD,
                show_progress: true,
            },
        }
    }
}

impl BpeEncoderBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn long_sequence_threshold(mut self, threshold: usize) -> Self {
        self.config.long_sequence_threshold = threshold;
        self
    }

    #[must_use]
    pub fn show_progress(mut self, show: bool) -> Self {
        self.config.show_progress = show;
        self
    }

    pub fn build(self) -> BpeEncoder {
        BpeEncoder {
            long_sequence_threshold: self.config.long_sequence_threshold,
            show_progress: self.config.show_progress,
        }
    }
}

/// Replays merge rules on words. Holds only diagnostics settings; the merge
/// list is always supplied by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BpeEncoder {
    pub long_sequence_threshold: usize,
    pub show_progress: bool,
}

impl Default for BpeEncoder {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl BpeEncoder {
    pub fn builder() -> BpeEncoderBuilder {
        BpeEncoderBuilder::new()
    }

    /// Encodes a batch of space-joined symbol sequences.
    ///
    /// Weights are carried through untouched. Words are independent and may
    /// be processed in parallel; sequences that end up identical after merging
    /// have their weights summed.
    pub fn encode(&self, words: &HashMap<String, u64>, merges: &MergeList) -> HashMap<String, u64> {
        let encoded: Vec<(String, u64)> = words
            .maybe_par_iter()
            .map(|(joined, &freq)| {
                let word = self.apply_merges(Word::from_joined(joined), merges);
                (word.joined(), freq)
            })
            .collect();

        let mut res = HashMap::default();
        for (joined, freq) in encoded {
            *res.entry(joined).or_insert(0) += freq;
        }
        res
    }

    /// Encodes a single escaped word (ending with the merged marker, e.g. `"if@"`).
    pub fn encode_word(&self, word: &str, merges: &MergeList) -> Result<Vec<String>> {
        let symbols = to_char_list(word)?;
        let word = self.apply_merges(Word::from_symbols(symbols), merges);
        Ok(word.into_symbols())
    }

    /// Whether a word of `n_symbols` gets the long-sequence warning and progress.
    pub(crate) fn is_long_sequence(&self, n_symbols: usize) -> bool {
        n_symbols > self.long_sequence_threshold
    }

    // Rules are applied strictly in list order, one pass each.
    fn apply_merges(&self, mut word: Word, merges: &MergeList) -> Word {
        let progress = if self.is_long_sequence(word.len()) {
            log::warn!(
                "Encountered a string of length {}. It will take a while to bpe-encode it.",
                word.len()
            );
            merge_progress(merges.len(), word.len(), self.show_progress)
        } else {
            None
        };

        for merge in merges {
            if word.len() < 2 {
                break;
            }
            word.merge(&merge.pair);
            if let Some(p) = &progress {
                p.inc(1);
            }
        }

        if let Some(p) = progress {
            p.finish();
        }
        word
    }
}

/// [`BpeEncoder::encode`] with default settings.
pub fn encode(words: &HashMap<String, u64>, merges: &MergeList) -> HashMap<String, u64> {
    BpeEncoder::default().encode(words, merges)
}

/// [`BpeEncoder::encode_word`] with default settings.
pub fn encode_word(word: &str, merges: &MergeList) -> Result<Vec<String>> {
    BpeEncoder::default().encode_word(word, merges)
}

/// A merge list bundled with the encoder settings used to replay it.
#[derive(Debug, Clone, Default)]
pub struct BPE {
    pub merges: MergeList,
    encoder: BpeEncoder,
}

impl BPE {
    pub fn new(merges: MergeList) -> Self {
        Self {
            merges,
            encoder: BpeEncoder::default(),
        }
    }

    pub fn with_encoder(merges: MergeList, encoder: BpeEncoder) -> Self {
        Self { merges, encoder }
    }

    pub fn encoder(&self) -> &BpeEncoder {
        &self.encoder
    }

    pub fn encode(&self, words: &HashMap<String, u64>) -> HashMap<String, u64> {
        self.encoder.encode(words, &self.merges)
    }
}

impl Model for BPE {
    fn encode_word(&self, word: &str) -> Result<Vec<String>> {
        self.encoder.encode_word(word, &self.merges)
    }
}

impl Model for MergeList {
    fn encode_word(&self, word: &str) -> Result<Vec<String>> {
        encode_word(word, self)
    }
}

impl<T: Model + ?Sized> Model for &T {
    fn encode_word(&self, word: &str) -> Result<Vec<String>> {
        (**self).encode_word(word)
    }
}

impl<T: Model + ?Sized> Model for Arc<T> {
    fn encode_word(&self, word: &str) -> Result<Vec<String>> {
        (**self).encode_word(word)
    }
}
