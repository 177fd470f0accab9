// src/tokenizer/merge.rs

//! Ordered merge rules and the readers for the merge files produced at
//! training time.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use rustc_hash::FxHashMap as HashMap;
use serde::{Deserialize, Serialize};

use crate::tokenizer::pair::Pair;
use crate::tokenizer::result::{Error, Result};

/// A single merge rule. `priority` is its position in the owning list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Merge {
    pub pair: Pair,
    pub freq: u64,
    pub priority: usize,
}

/// Merge rules in the order they were learned; earlier rules win.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeList {
    merges: Vec<Merge>,
    priorities: HashMap<Pair, usize>,
}

impl MergeList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a rule with the next priority. A repeated pair is kept as its
    /// own rule; lookups by pair report its first priority.
    pub fn push(&mut self, pair: Pair, freq: u64) {
        let priority = self.merges.len();
        if self.priorities.contains_key(&pair) {
            log::debug!("Merge {:?} repeated at priority {}", pair, priority);
        } else {
            self.priorities.insert(pair.clone(), priority);
        }
        self.merges.push(Merge {
            pair,
            freq,
            priority,
        });
    }

    pub fn len(&self) -> usize {
        self.merges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.merges.is_empty()
    }

    pub fn get(&self, priority: usize) -> Option<&Merge> {
        self.merges.get(priority)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Merge> {
        self.merges.iter()
    }

    pub fn contains(&self, pair: &Pair) -> bool {
        self.priorities.contains_key(pair)
    }

    pub fn get_priority(&self, pair: &Pair) -> Option<usize> {
        self.priorities.get(pair).copied()
    }

    /// Keeps only the first `n` rules.
    pub fn truncate(&mut self, n: usize) {
        self.merges.truncate(n);
        self.priorities.retain(|_, priority| *priority < n);
    }

    pub fn pairs(&self) -> Vec<Pair> {
        self.merges.iter().map(|m| m.pair.clone()).collect()
    }

    /// Reads the text format: one `left right [freq]` rule per line.
    pub fn from_txt_file<P: AsRef<Path>>(path: P, max_merges: Option<usize>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let merges = Self::from_txt_reader(BufReader::new(file), max_merges)?;
        log::debug!(
            "Loaded {} merges from {}",
            merges.len(),
            path.as_ref().display()
        );
        Ok(merges)
    }

    pub fn from_txt_reader<R: BufRead>(reader: R, max_merges: Option<usize>) -> Result<Self> {
        let mut merges = MergeList::new();
        for (idx, line) in reader.lines().enumerate() {
            if max_merges.is_some_and(|max| merges.len() >= max) {
                break;
            }
            let line = line?;
            let trimmed = line.trim_end_matches(['\r', '\n']);
            if trimmed.trim().is_empty() {
                continue;
            }
            let malformed = || Error::MergeFile {
                line: idx + 1,
                content: trimmed.to_string(),
            };
            let mut parts = trimmed.split(' ');
            let (Some(left), Some(right)) = (parts.next(), parts.next()) else {
                return Err(malformed());
            };
            if left.is_empty() || right.is_empty() {
                return Err(malformed());
            }
            let freq = match parts.next() {
                Some(freq) => freq.parse::<u64>().map_err(|_| malformed())?,
                None => 0,
            };
            if parts.next().is_some() {
                return Err(malformed());
            }
            merges.push((left.to_string(), right.to_string()), freq);
        }
        Ok(merges)
    }

    /// Reads the JSON format: `{"merges": [["left", "right"], ...]}`.
    pub fn from_json_file<P: AsRef<Path>>(path: P, max_merges: Option<usize>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let merges = Self::from_json_reader(BufReader::new(file), max_merges)?;
        log::debug!(
            "Loaded {} merges from {}",
            merges.len(),
            path.as_ref().display()
        );
        Ok(merges)
    }

    pub fn from_json_reader<R: Read>(reader: R, max_merges: Option<usize>) -> Result<Self> {
        let file: MergesFile = serde_json::from_reader(reader)?;
        let mut merges: MergeList = file.merges.into_iter().collect();
        if let Some(max) = max_merges {
            merges.truncate(max);
        }
        Ok(merges)
    }

    pub fn to_json_string(&self) -> Result<String> {
        let file = MergesFile {
            merges: self.pairs(),
        };
        Ok(serde_json::to_string_pretty(&file)?)
    }
}

#[derive(Serialize, Deserialize)]
struct MergesFile {
    merges: Vec<Pair>,
}

impl FromIterator<Pair> for MergeList {
    fn from_iter<T: IntoIterator<Item = Pair>>(iter: T) -> Self {
        let mut merges = MergeList::new();
        for pair in iter {
            merges.push(pair, 0);
        }
        merges
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for MergeList {
    fn from_iter<T: IntoIterator<Item = (&'a str, &'a str)>>(iter: T) -> Self {
        iter.into_iter()
            .map(|(l, r)| (l.to_string(), r.to_string()))
            .collect()
    }
}

impl<'a> IntoIterator for &'a MergeList {
    type Item = &'a Merge;
    type IntoIter = std::slice::Iter<'a, Merge>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn priorities_follow_insertion_order() {
        let merges: MergeList = [("a", "b"), ("ab", "c")].into_iter().collect();
        assert_eq!(merges.len(), 2);
        assert_eq!(merges.get_priority(&("ab".into(), "c".into())), Some(1));
        assert!(merges.contains(&("a".into(), "b".into())));
        assert!(!merges.contains(&("b".into(), "c".into())));
        assert_eq!(merges.get(0).unwrap().pair, ("a".to_string(), "b".to_string()));
    }

    #[test]
    fn repeated_pairs_are_kept_with_first_priority() {
        let merges: MergeList = [("a", "b"), ("c", "d"), ("a", "b")].into_iter().collect();
        assert_eq!(merges.len(), 3);
        assert_eq!(merges.get(2).unwrap().pair, ("a".to_string(), "b".to_string()));
        assert_eq!(merges.get(2).unwrap().priority, 2);
        assert_eq!(merges.get_priority(&("a".into(), "b".into())), Some(0));
    }

    #[test]
    fn truncate_drops_lookups_past_the_cut() {
        let mut merges: MergeList = [("a", "b"), ("c", "d"), ("a", "b"), ("e", "f")]
            .into_iter()
            .collect();
        merges.truncate(2);
        assert_eq!(merges.len(), 2);
        assert_eq!(merges.get_priority(&("a".into(), "b".into())), Some(0));
        assert!(!merges.contains(&("e".into(), "f".into())));
    }

    #[test]
    fn reads_text_merges_with_and_without_freq() {
        let text = "i f 1200\nr e\n\nre turn 45\n";
        let merges = MergeList::from_txt_reader(Cursor::new(text), None).unwrap();
        assert_eq!(merges.len(), 3);
        assert_eq!(merges.get(0).unwrap().freq, 1200);
        assert_eq!(merges.get(1).unwrap().freq, 0);
        assert_eq!(merges.get(2).unwrap().pair, ("re".to_string(), "turn".to_string()));
    }

    #[test]
    fn text_reader_respects_max_merges() {
        let text = "i f 3\nr e 2\nt u 1\n";
        let merges = MergeList::from_txt_reader(Cursor::new(text), Some(2)).unwrap();
        assert_eq!(merges.len(), 2);
    }

    #[test]
    fn malformed_text_line_is_reported() {
        let text = "i f 3\njunk\n";
        match MergeList::from_txt_reader(Cursor::new(text), None) {
            Err(Error::MergeFile { line, content }) => {
                assert_eq!(line, 2);
                assert_eq!(content, "junk");
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(MergeList::from_txt_reader(Cursor::new("a b many\n"), None).is_err());
    }

    #[test]
    fn reads_json_merges() {
        let json = r#"{"merges": [["i", "f"], ["r", "e"], ["re", "t"]]}"#;
        let merges = MergeList::from_json_reader(Cursor::new(json), Some(2)).unwrap();
        assert_eq!(
            merges.pairs(),
            vec![("i".to_string(), "f".to_string()), ("r".to_string(), "e".to_string())]
        );
    }

    #[test]
    fn json_output_reads_back() {
        let merges: MergeList = [("a", "b"), ("ab", "@")].into_iter().collect();
        let json = merges.to_json_string().unwrap();
        let back = MergeList::from_json_reader(Cursor::new(json), None).unwrap();
        assert_eq!(back.pairs(), merges.pairs());
    }
}
