//! Multi-pattern keyword scanner.
//!
//! Wraps an Aho-Corasick automaton built over all registered keywords.
//! Matching is leftmost-longest, so hits come back ordered, non-overlapping,
//! and a keyword that is a prefix of another never truncates the longer
//! match.

use aho_corasick::{AhoCorasick, AhoCorasickBuilder, MatchKind};
use serde::{Deserialize, Serialize};

use crate::error::{LampasError, Result};

/// Comparison policy applied when matching keywords against text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Normalization {
    /// Byte-exact comparison.
    Exact,
    /// ASCII case-insensitive comparison.
    #[default]
    CaseInsensitive,
}

/// A single keyword occurrence found by a scan.
///
/// Offsets are byte positions relative to the scanned window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanHit {
    /// Byte offset where the hit starts.
    pub start: usize,
    /// Byte offset one past the end of the hit.
    pub end: usize,
}

impl ScanHit {
    /// Byte length of the hit.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if the hit is empty.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// One bounded batch of scan results.
#[derive(Clone, Debug)]
pub struct ScanBatch {
    /// Hits in ascending offset order, pairwise non-overlapping.
    pub hits: Vec<ScanHit>,
    /// Byte offset the scan progressed to. Scanning may resume from here;
    /// no hit in a later batch starts before it.
    pub cursor: usize,
}

/// A multi-pattern scanning index over a fixed keyword set.
#[derive(Clone, Debug)]
pub struct KeywordScanner {
    automaton: AhoCorasick,
}

impl KeywordScanner {
    /// Build a scanner over the given keywords.
    ///
    /// # Errors
    ///
    /// Returns an index error when the automaton cannot be constructed
    /// (for example, when the combined patterns exceed its size limits).
    pub fn build<I, P>(keywords: I, normalization: Normalization) -> Result<Self>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<[u8]>,
    {
        let automaton = AhoCorasickBuilder::new()
            .match_kind(MatchKind::LeftmostLongest)
            .ascii_case_insensitive(normalization == Normalization::CaseInsensitive)
            .build(keywords)
            .map_err(|e| LampasError::index(format!("failed to build keyword scanner: {e}")))?;
        Ok(KeywordScanner { automaton })
    }

    /// Scan `text` for up to `limit` keyword occurrences.
    ///
    /// Returns the hits plus a continuation cursor: the end of the last hit
    /// when the batch filled up, otherwise `text.len()`. Repeatedly scanning
    /// from the cursor visits every occurrence exactly once.
    pub fn scan(&self, text: &str, limit: usize) -> ScanBatch {
        let mut hits = Vec::new();
        for m in self.automaton.find_iter(text) {
            hits.push(ScanHit {
                start: m.start(),
                end: m.end(),
            });
            if hits.len() == limit {
                break;
            }
        }
        let cursor = if hits.len() == limit {
            hits.last().map_or(text.len(), |hit| hit.end)
        } else {
            text.len()
        };
        ScanBatch { hits, cursor }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_scan() {
        let scanner = KeywordScanner::build(["cat"], Normalization::Exact).unwrap();
        let batch = scanner.scan("the cat sat", 16);

        assert_eq!(batch.hits, vec![ScanHit { start: 4, end: 7 }]);
        assert_eq!(batch.cursor, 11);
    }

    #[test]
    fn test_leftmost_longest_wins() {
        let scanner = KeywordScanner::build(["cat", "category"], Normalization::Exact).unwrap();
        let batch = scanner.scan("category", 16);

        assert_eq!(batch.hits, vec![ScanHit { start: 0, end: 8 }]);
    }

    #[test]
    fn test_hits_are_ordered_and_disjoint() {
        let scanner = KeywordScanner::build(["ab", "bc"], Normalization::Exact).unwrap();
        let batch = scanner.scan("abcabc", 16);

        // Leftmost match wins at each position; overlapped "bc" is skipped
        assert_eq!(
            batch.hits,
            vec![ScanHit { start: 0, end: 2 }, ScanHit { start: 3, end: 5 }]
        );
        for pair in batch.hits.windows(2) {
            assert!(pair[0].end <= pair[1].start);
        }
    }

    #[test]
    fn test_case_insensitive() {
        let scanner = KeywordScanner::build(["cat"], Normalization::CaseInsensitive).unwrap();
        let batch = scanner.scan("the CAT sat", 16);

        assert_eq!(batch.hits, vec![ScanHit { start: 4, end: 7 }]);
    }

    #[test]
    fn test_batch_limit_and_cursor() {
        let scanner = KeywordScanner::build(["a"], Normalization::Exact).unwrap();
        let batch = scanner.scan("aaaa", 2);

        assert_eq!(batch.hits.len(), 2);
        assert_eq!(batch.cursor, 2);

        // Resuming from the cursor finds the rest
        let rest = scanner.scan(&"aaaa"[batch.cursor..], 2);
        assert_eq!(rest.hits.len(), 2);
        assert_eq!(rest.cursor, 2);
    }

    #[test]
    fn test_no_hits() {
        let scanner = KeywordScanner::build(["dog"], Normalization::Exact).unwrap();
        let batch = scanner.scan("the cat sat", 16);

        assert!(batch.hits.is_empty());
        assert_eq!(batch.cursor, 11);
    }
}
