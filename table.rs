//! Word frequency table and ranking queries.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BinaryHeap};
use std::sync::Arc;
use itertools::Itertools;

use crate::collation::Collation;
use crate::types::RankedEntry;

/// Folded word -> occurrence count. Every stored count is at least 1.
///
/// Keys are identified by the collation's key order, so words a locale collator
/// treats as equal share one entry under the first spelling seen.
#[derive(Debug)]
pub struct FrequencyTable {
    counts: BTreeMap<Key, u64>,
    collation: Arc<Collation>,
}

impl FrequencyTable {
    pub fn new(collation: Collation) -> Self {
        Self { counts: BTreeMap::new(), collation: Arc::new(collation) }
    }

    fn key(&self, word: &str) -> Key {
        Key { word: self.collation.fold(word), collation: Arc::clone(&self.collation) }
    }

    /// Count one occurrence of `word` under its folded form.
    pub fn increment(&mut self, word: &str) {
        let key = self.key(word);
        if key.word.is_empty() {
            return;
        }
        *self.counts.entry(key).or_insert(0) += 1;
    }

    pub fn count(&self, word: &str) -> u64 {
        self.counts.get(&self.key(word)).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.counts.iter().map(|(key, &count)| (key.word.as_str(), count))
    }

    /// The `k` most frequent words, count descending, ties in collation order.
    ///
    /// Keeps a heap of at most `k` candidates whose top is the worst-ranked one,
    /// so a scan over `n` words costs O(n log k). The table is left untouched.
    pub fn top_k(&self, k: usize) -> Vec<RankedEntry> {
        let k = k.min(self.len());
        if k == 0 {
            return Vec::new();
        }
        let mut heap: BinaryHeap<Candidate<'_>> = BinaryHeap::with_capacity(k + 1);
        for (word, count) in self.iter() {
            let candidate = Candidate { word, count, collation: self.collation.as_ref() };
            if heap.len() < k {
                heap.push(candidate);
            } else if heap.peek().is_some_and(|worst| candidate < *worst) {
                heap.pop();
                heap.push(candidate);
            }
        }
        heap.into_sorted_vec()
            .into_iter()
            .map(|c| RankedEntry::new(c.word, c.count))
            .collect()
    }

    /// Every word in ranking order.
    pub fn ranked(&self) -> Vec<RankedEntry> {
        self.iter()
            .sorted_by(|a, b| rank(&self.collation, *a, *b))
            .map(|(word, count)| RankedEntry::new(word, count))
            .collect()
    }
}

// Map key ordered by the collation that built it
#[derive(Debug)]
struct Key {
    word: String,
    collation: Arc<Collation>,
}

impl Ord for Key {
    fn cmp(&self, other: &Self) -> Ordering {
        self.collation.key_order(&self.word, &other.word)
    }
}

impl PartialOrd for Key {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Key {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Key {}

/// `Less` means `a` ranks ahead of `b`.
fn rank(collation: &Collation, a: (&str, u64), b: (&str, u64)) -> Ordering {
    b.1.cmp(&a.1).then_with(|| collation.compare(a.0, b.0))
}

// Ordered by rank, so the max-heap top is the weakest candidate
struct Candidate<'a> {
    word: &'a str,
    count: u64,
    collation: &'a Collation,
}

impl Ord for Candidate<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        rank(self.collation, (self.word, self.count), (other.word, other.count))
    }
}

impl PartialOrd for Candidate<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Candidate<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate<'_> {}
