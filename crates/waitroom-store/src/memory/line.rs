//! Score-ordered line with a deterministic tie-break.

use std::collections::{HashMap, VecDeque};

/// Ordering key: score first, then insertion sequence, then the member text.
type Entry = (i64, u64, String);

/// An ordered set equivalent to a Redis sorted set.
///
/// Entries are kept sorted in a `VecDeque`, so `rank` is a binary search.
/// Arrivals land at the back and promotions leave from the front, which are
/// the cheap ends of the deque. Members with equal scores are ordered by the
/// sequence number assigned when they were (re-)inserted.
#[derive(Debug, Default)]
pub struct OrderedLine {
    /// member → (score, sequence).
    index: HashMap<String, (i64, u64)>,
    /// Sorted ascending.
    order: VecDeque<Entry>,
    /// Next insertion sequence number.
    next_seq: u64,
}

impl OrderedLine {
    /// Insert or re-score `member`. Returns `true` if it was not present.
    pub fn insert(&mut self, member: &str, score: i64) -> bool {
        let fresh = !self.remove(member);

        let seq = self.next_seq;
        self.next_seq += 1;
        let entry = (score, seq, member.to_string());
        let at = self.order.partition_point(|probe| probe < &entry);
        self.order.insert(at, entry);
        self.index.insert(member.to_string(), (score, seq));
        fresh
    }

    /// Remove `member`. Returns `true` if it was present.
    pub fn remove(&mut self, member: &str) -> bool {
        let Some(position) = self.position(member) else {
            return false;
        };
        self.order.remove(position);
        self.index.remove(member);
        true
    }

    /// Zero-based position of `member`.
    pub fn rank(&self, member: &str) -> Option<u64> {
        self.position(member).map(|p| p as u64)
    }

    /// Members at positions `start..=stop`.
    pub fn range(&self, start: u64, stop: u64) -> Vec<String> {
        let len = self.order.len();
        let start = usize::try_from(start).unwrap_or(usize::MAX).min(len);
        let end = usize::try_from(stop)
            .unwrap_or(usize::MAX)
            .saturating_add(1)
            .min(len);
        if end <= start {
            return Vec::new();
        }
        self.order
            .range(start..end)
            .map(|(_, _, member)| member.clone())
            .collect()
    }

    /// Number of members.
    pub fn len(&self) -> u64 {
        self.index.len() as u64
    }

    /// Whether the line holds no members.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    fn position(&self, member: &str) -> Option<usize> {
        let (score, seq) = *self.index.get(member)?;
        self.order
            .binary_search_by(|(s, q, m)| (*s, *q, m.as_str()).cmp(&(score, seq, member)))
            .ok()
    }
}
