// src/tokenizer/cache.rs

//! Lookup of precomputed subword splits.
//!
//! The cache is keyed by the escaped, merged-marker form of a word (`"if@"`)
//! and stores the still-escaped subwords. Lookups never write: whoever owns
//! the [`BpeData`] decides when to populate it, and how to share it.

use std::collections::HashMap;
use std::hash::BuildHasher;
use std::sync::{Arc, PoisonError, RwLock};

use rustc_hash::FxHashMap;

use crate::tokenizer::bpe::BPE;
use crate::tokenizer::escape::{escape, unescape};
use crate::tokenizer::{Model, Result};

/// The default in-process cache.
pub type MergesCache = FxHashMap<String, Vec<String>>;

/// Key-value store of escaped word → escaped subwords.
pub trait SubwordCache {
    fn get(&self, escaped_word: &str) -> Option<Vec<String>>;

    fn insert(&mut self, escaped_word: String, subwords: Vec<String>);

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<S: BuildHasher> SubwordCache for HashMap<String, Vec<String>, S> {
    fn get(&self, escaped_word: &str) -> Option<Vec<String>> {
        HashMap::get(self, escaped_word).cloned()
    }

    fn insert(&mut self, escaped_word: String, subwords: Vec<String>) {
        HashMap::insert(self, escaped_word, subwords);
    }

    fn len(&self) -> usize {
        HashMap::len(self)
    }
}

/// Cloneable handle to one cache shared between threads.
///
/// Clones see each other's inserts. Readers take a shared lock, so
/// concurrent lookups do not block each other.
#[derive(Debug, Clone, Default)]
pub struct SharedSubwordCache {
    inner: Arc<RwLock<MergesCache>>,
}

impl SharedSubwordCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl From<MergesCache> for SharedSubwordCache {
    fn from(map: MergesCache) -> Self {
        Self {
            inner: Arc::new(RwLock::new(map)),
        }
    }
}

impl SubwordCache for SharedSubwordCache {
    fn get(&self, escaped_word: &str) -> Option<Vec<String>> {
        // A poisoned lock still holds a consistent map: inserts are single calls.
        let map = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        map.get(escaped_word).cloned()
    }

    fn insert(&mut self, escaped_word: String, subwords: Vec<String>) {
        let mut map = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        map.insert(escaped_word, subwords);
    }

    fn len(&self) -> usize {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).len()
    }
}

/// Everything BPE splitting needs: a merge source and a cache in front of it.
#[derive(Debug, Clone, Default)]
pub struct BpeData<M = BPE, C = MergesCache> {
    pub merges: M,
    pub merges_cache: C,
}

impl<M: Model, C: SubwordCache> BpeData<M, C> {
    pub fn new(merges: M, merges_cache: C) -> Self {
        Self {
            merges,
            merges_cache,
        }
    }

    /// Computes and stores the split of every word not cached yet.
    /// Returns how many entries were added.
    pub fn warm<I, S>(&mut self, words: I) -> Result<usize>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut added = 0;
        for word in words {
            let escaped = escape(word.as_ref(), true);
            if self.merges_cache.get(&escaped).is_some() {
                continue;
            }
            let subwords = self.merges.encode_word(&escaped)?;
            self.merges_cache.insert(escaped, subwords);
            added += 1;
        }
        log::debug!(
            "Warmed subword cache with {} words ({} total)",
            added,
            self.merges_cache.len()
        );
        Ok(added)
    }
}

/// Splits a raw word into subwords, preferring the cached split.
pub fn get_bpe_subwords<M: Model, C: SubwordCache>(
    word: &str,
    bpe_data: &BpeData<M, C>,
) -> Result<Vec<String>> {
    let escaped = escape(word, true);
    let subwords = match bpe_data.merges_cache.get(&escaped) {
        Some(cached) => {
            log::trace!("Subword cache hit for {:?}", escaped);
            cached
        }
        None => bpe_data.merges.encode_word(&escaped)?,
    };
    Ok(unescape(&subwords)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::merge::MergeList;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts calls and splits every word into characters.
    #[derive(Default)]
    struct CountingModel {
        calls: AtomicUsize,
    }

    impl Model for CountingModel {
        fn encode_word(&self, word: &str) -> Result<Vec<String>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            crate::tokenizer::bpe::encode_word(word, &MergeList::new())
        }
    }

    fn bpe() -> BPE {
        BPE::new([("g", "e"), ("ge", "t"), ("N", "a")].into_iter().collect())
    }

    #[test]
    fn computes_split_on_miss() {
        let data = BpeData::new(bpe(), MergesCache::default());
        assert_eq!(
            get_bpe_subwords("getName", &data).unwrap(),
            vec!["get", "Na", "m", "e", ""]
        );
    }

    #[test]
    fn cached_split_skips_merge_computation() {
        let mut cache = MergesCache::default();
        cache.insert(
            "getName@".to_string(),
            vec!["get".to_string(), "Name@".to_string()],
        );
        let data = BpeData::new(CountingModel::default(), cache);

        assert_eq!(get_bpe_subwords("getName", &data).unwrap(), vec!["get", "Name"]);
        assert_eq!(data.merges.calls.load(Ordering::SeqCst), 0);

        get_bpe_subwords("setName", &data).unwrap();
        assert_eq!(data.merges.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn lookup_does_not_populate_cache() {
        let data = BpeData::new(bpe(), MergesCache::default());
        get_bpe_subwords("get", &data).unwrap();
        assert!(data.merges_cache.is_empty());
    }

    #[test]
    fn escape_chars_survive_split() {
        let merges: MergeList = [("@@", "x")].into_iter().collect();
        let data = BpeData::new(merges, MergesCache::default());
        assert_eq!(get_bpe_subwords("a@x", &data).unwrap(), vec!["a", "@x", ""]);
    }

    #[test]
    fn warm_inserts_missing_words_once() {
        let mut data = BpeData::new(CountingModel::default(), MergesCache::default());
        assert_eq!(data.warm(["if", "else", "if"]).unwrap(), 2);
        assert_eq!(data.merges_cache.len(), 2);
        assert_eq!(data.merges.calls.load(Ordering::SeqCst), 2);

        get_bpe_subwords("else", &data).unwrap();
        assert_eq!(data.merges.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn shared_cache_clones_see_inserts() {
        let mut writer = SharedSubwordCache::new();
        let reader = writer.clone();
        writer.insert("if@".to_string(), vec!["if@".to_string()]);
        assert_eq!(reader.get("if@"), Some(vec!["if@".to_string()]));
        assert_eq!(reader.len(), 1);
    }

    #[test]
    fn shared_cache_works_across_threads() {
        let mut cache = SharedSubwordCache::new();
        cache.insert("x@".to_string(), vec!["x@".to_string()]);
        let data = Arc::new(BpeData::new(bpe(), cache));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let data = Arc::clone(&data);
                std::thread::spawn(move || get_bpe_subwords("x", &*data).unwrap())
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), vec!["x"]);
        }
    }
}
