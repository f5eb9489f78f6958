//! Workload configuration types

use serde::Serialize;
use std::fmt;

/// Direction of every operation in a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Read,
    Write,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Read => write!(f, "read"),
            Direction::Write => write!(f, "write"),
        }
    }
}

/// Access pattern used to pick each operation's offset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessPattern {
    /// Offsets advance by one block per iteration
    #[default]
    Sequential,
    /// Each offset is an independent uniform draw over the block slots
    Random,
}

impl fmt::Display for AccessPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessPattern::Sequential => write!(f, "sequential"),
            AccessPattern::Random => write!(f, "random"),
        }
    }
}

/// Half-open byte interval `[start, end)` of the target file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ByteRange {
    pub start: u64,
    pub end: u64,
}

impl ByteRange {
    pub fn new(start: u64, end: u64) -> Self {
        Self { start, end }
    }

    /// Number of bytes covered; zero for an inverted range
    #[inline]
    pub fn len(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `[start, end)` is the "whole file" sentinel `0-0`
    #[inline]
    pub fn is_unset(&self) -> bool {
        self.start == 0 && self.end == 0
    }
}

impl fmt::Display for ByteRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_len() {
        assert_eq!(ByteRange::new(4096, 40960).len(), 36864);
        assert_eq!(ByteRange::new(10, 5).len(), 0);
        assert!(ByteRange::new(7, 7).is_empty());
    }

    #[test]
    fn test_range_unset_sentinel() {
        assert!(ByteRange::new(0, 0).is_unset());
        assert!(!ByteRange::new(0, 1).is_unset());
        assert!(!ByteRange::new(5, 5).is_unset());
    }

    #[test]
    fn test_display() {
        assert_eq!(Direction::Write.to_string(), "write");
        assert_eq!(AccessPattern::Random.to_string(), "random");
        assert_eq!(ByteRange::new(0, 40960).to_string(), "0-40960");
    }

    #[test]
    fn test_serialized_forms() {
        assert_eq!(serde_json::to_value(Direction::Read).unwrap(), "read");
        assert_eq!(serde_json::to_value(AccessPattern::Sequential).unwrap(), "sequential");
        let range = serde_json::to_value(ByteRange::new(4096, 8192)).unwrap();
        assert_eq!(range["start"], 4096);
        assert_eq!(range["end"], 8192);
    }

    #[test]
    fn test_default_pattern_is_sequential() {
        assert_eq!(AccessPattern::default(), AccessPattern::Sequential);
    }
}
