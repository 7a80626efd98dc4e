//! Codespace ranges and byte-string segmentation.
//!
//! A CMap's codespace tells the decoder how many bytes make up one code.
//! Matching is per byte: a candidate `b` of length `n` belongs to a range
//! when `low[k] <= b[k] <= high[k]` for every `k < n`.

/// Largest code length a codespace range may declare.
pub const MAX_CODE_LENGTH: usize = 4;

/// Big-endian integer value of a code's bytes.
///
/// Codes longer than four bytes keep only their four low-order bytes.
pub fn code_value(bytes: &[u8]) -> u32 {
    bytes.iter().fold(0, |acc, &b| (acc << 8) | u32::from(b))
}

/// A single `begincodespacerange` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CodespaceRange {
    low: Vec<u8>,
    high: Vec<u8>,
}

impl CodespaceRange {
    /// Create a range from its low and high byte strings.
    ///
    /// Returns `None` when the lengths differ, are zero, exceed
    /// [`MAX_CODE_LENGTH`], or when a low byte is greater than its high byte.
    pub fn new(low: &[u8], high: &[u8]) -> Option<Self> {
        if low.len() != high.len() || low.is_empty() || low.len() > MAX_CODE_LENGTH {
            return None;
        }
        if low.iter().zip(high).any(|(lo, hi)| lo > hi) {
            return None;
        }
        Some(Self {
            low: low.to_vec(),
            high: high.to_vec(),
        })
    }

    /// Full range of codes of the given byte length (`00..` to `FF..`).
    pub fn full(length: usize) -> Self {
        let length = length.clamp(1, MAX_CODE_LENGTH);
        Self {
            low: vec![0x00; length],
            high: vec![0xFF; length],
        }
    }

    /// Number of bytes per code in this range.
    pub fn len(&self) -> usize {
        self.low.len()
    }

    /// Always false; ranges have at least one byte.
    pub fn is_empty(&self) -> bool {
        self.low.is_empty()
    }

    /// Low bound bytes.
    pub fn low(&self) -> &[u8] {
        &self.low
    }

    /// High bound bytes.
    pub fn high(&self) -> &[u8] {
        &self.high
    }

    /// Whether `bytes` (of exactly this range's length) falls in the range.
    pub fn contains(&self, bytes: &[u8]) -> bool {
        bytes.len() == self.low.len()
            && bytes
                .iter()
                .zip(self.low.iter().zip(&self.high))
                .all(|(b, (lo, hi))| lo <= b && b <= hi)
    }

    /// Whether two ranges of the same length share at least one code.
    pub fn overlaps(&self, other: &CodespaceRange) -> bool {
        self.len() == other.len()
            && self
                .low
                .iter()
                .zip(&self.high)
                .zip(other.low.iter().zip(&other.high))
                .all(|((lo_a, hi_a), (lo_b, hi_b))| lo_a <= hi_b && lo_b <= hi_a)
    }
}

/// Ordered set of codespace ranges.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CodespaceTable {
    ranges: Vec<CodespaceRange>,
}

impl CodespaceTable {
    /// An empty table. Segmentation falls back to 1-byte codes.
    pub fn new() -> Self {
        Self::default()
    }

    /// A table with a single full range of `length`-byte codes.
    pub fn fixed(length: usize) -> Self {
        Self {
            ranges: vec![CodespaceRange::full(length)],
        }
    }

    /// Append a range. Returns false when it overlaps an existing range of
    /// the same length; the range is still kept, and earlier ranges win
    /// during matching.
    pub fn insert(&mut self, range: CodespaceRange) -> bool {
        let disjoint = !self.ranges.iter().any(|r| r.overlaps(&range));
        self.ranges.push(range);
        disjoint
    }

    /// Append all ranges of `other` that are not already present.
    pub fn extend_from(&mut self, other: &CodespaceTable) {
        for range in &other.ranges {
            if !self.ranges.contains(range) {
                self.ranges.push(range.clone());
            }
        }
    }

    /// The ranges in insertion order.
    pub fn ranges(&self) -> &[CodespaceRange] {
        &self.ranges
    }

    /// Returns true when no range has been declared.
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Longest declared code length, or 1 for an empty table.
    pub fn max_code_length(&self) -> usize {
        self.ranges
            .iter()
            .map(CodespaceRange::len)
            .max()
            .unwrap_or(1)
    }

    /// Number of bytes the code at the start of `bytes` occupies.
    ///
    /// Longer declared lengths are tried first. When no range matches (or
    /// the table is empty) the code is a single byte, so a trailing
    /// incomplete code is never read out of bounds. Returns 0 only for
    /// empty input.
    pub fn code_length(&self, bytes: &[u8]) -> usize {
        if bytes.is_empty() {
            return 0;
        }
        let mut lengths: Vec<usize> = self.ranges.iter().map(CodespaceRange::len).collect();
        lengths.sort_unstable_by(|a, b| b.cmp(a));
        lengths.dedup();
        lengths
            .into_iter()
            .find(|&len| {
                len <= bytes.len() && self.ranges.iter().any(|r| r.contains(&bytes[..len]))
            })
            .unwrap_or(1)
    }

    /// Split `bytes` into codes.
    pub fn segment<'a>(&'a self, bytes: &'a [u8]) -> Segments<'a> {
        Segments {
            table: self,
            rest: bytes,
        }
    }
}

/// Iterator over the codes of a byte string. See [`CodespaceTable::segment`].
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    table: &'a CodespaceTable,
    rest: &'a [u8],
}

impl<'a> Iterator for Segments<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        let len = self.table.code_length(self.rest);
        if len == 0 {
            return None;
        }
        let (code, rest) = self.rest.split_at(len);
        self.rest = rest;
        Some(code)
    }
}
