//! In-memory word scanning
//!
//! These functions never touch the filesystem. The map worker resolves
//! fragment boundaries and then hands the resolved window here.

use crate::mapreduce::separators::SeparatorSet;
use crate::mapreduce::types::{FragmentStat, LengthHistogram};

/// Iterator over maximal runs of word bytes
pub struct Words<'a> {
    bytes: &'a [u8],
    separators: &'a SeparatorSet,
    position: usize,
}

impl<'a> Iterator for Words<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        let bytes = self.bytes;
        while self.position < bytes.len() && self.separators.is_separator(bytes[self.position]) {
            self.position += 1;
        }
        if self.position == bytes.len() {
            return None;
        }
        let start = self.position;
        while self.position < bytes.len() && self.separators.is_word_byte(bytes[self.position]) {
            self.position += 1;
        }
        Some(&bytes[start..self.position])
    }
}

/// Pure: Split `bytes` into words
pub fn words<'a>(bytes: &'a [u8], separators: &'a SeparatorSet) -> Words<'a> {
    Words {
        bytes,
        separators,
        position: 0,
    }
}

/// Pure: Collect fragment statistics for an already-resolved byte window
pub fn tokenize(bytes: &[u8], separators: &SeparatorSet) -> FragmentStat {
    let mut stat = FragmentStat::empty();
    for word in words(bytes, separators) {
        stat.record_word(word);
    }
    stat
}

/// Pure: Histogram of a whole document scanned in one pass
///
/// Reference result for checking that fragment-wise scanning loses or
/// duplicates nothing.
pub fn histogram_of(bytes: &[u8], separators: &SeparatorSet) -> LengthHistogram {
    let mut histogram = LengthHistogram::new();
    for word in words(bytes, separators) {
        histogram.record(word.len());
    }
    histogram
}
