//! Byte classification for word tokenization
//!
//! Input is treated as single-byte text. A byte is either a separator or
//! part of a word; the NUL byte is always a separator.

/// Separator characters used when no custom set is configured
pub const DEFAULT_SEPARATORS: &str = ";:/?~\\.,><`[]{}()!@#$%^&-_+'=*\"| \t\r\n";

/// Immutable 256-entry lookup table of separator bytes
#[derive(Clone, PartialEq, Eq)]
pub struct SeparatorSet {
    table: [bool; 256],
}

impl SeparatorSet {
    /// Build a table from the given separator bytes, plus NUL
    pub fn from_bytes(separators: &[u8]) -> Self {
        let mut table = [false; 256];
        for &byte in separators {
            table[byte as usize] = true;
        }
        table[0] = true;
        Self { table }
    }

    #[inline]
    pub fn is_separator(&self, byte: u8) -> bool {
        self.table[byte as usize]
    }

    #[inline]
    pub fn is_word_byte(&self, byte: u8) -> bool {
        !self.is_separator(byte)
    }

    /// Position of the first separator in `bytes`, if any
    pub fn find_separator(&self, bytes: &[u8]) -> Option<usize> {
        bytes.iter().position(|&b| self.is_separator(b))
    }
}

impl Default for SeparatorSet {
    fn default() -> Self {
        Self::from_bytes(DEFAULT_SEPARATORS.as_bytes())
    }
}

impl std::fmt::Debug for SeparatorSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let bytes: Vec<u8> = (0..=255u8).filter(|&b| self.is_separator(b)).collect();
        f.debug_struct("SeparatorSet")
            .field("separators", &String::from_utf8_lossy(&bytes))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_set() {
        let set = SeparatorSet::default();
        for &b in b" \t\r\n.,;:!?-_'\"" {
            assert!(set.is_separator(b), "{:?} should separate", b as char);
        }
        assert!(set.is_separator(0));
        for &b in b"azAZ09" {
            assert!(set.is_word_byte(b));
        }
        // bytes above ASCII are word bytes
        assert!(set.is_word_byte(0xE9));
    }

    #[test]
    fn test_custom_set_always_includes_nul() {
        let set = SeparatorSet::from_bytes(b" ");
        assert!(set.is_separator(b' '));
        assert!(set.is_separator(0));
        assert!(set.is_word_byte(b','));
    }

    #[test]
    fn test_find_separator() {
        let set = SeparatorSet::from_bytes(b" ");
        assert_eq!(set.find_separator(b"abc def"), Some(3));
        assert_eq!(set.find_separator(b"abcdef"), None);
    }
}
