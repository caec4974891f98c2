//! Fixed-window text chunking.
//!
//! Splits extracted text into contiguous, non-overlapping windows sized in
//! characters, the unit of embedding and storage.

use silo_core::TextFragment;
use silo_config::ChunkingConfig;

/// Configuration for chunking.
#[derive(Debug, Clone)]
pub struct ChunkConfig {
    /// Window size in characters.
    pub fragment_size: usize,
    /// Windows at or below this length are dropped.
    pub min_fragment_len: usize,
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            fragment_size: 1000,
            min_fragment_len: 100,
        }
    }
}

impl From<&ChunkingConfig> for ChunkConfig {
    fn from(config: &ChunkingConfig) -> Self {
        Self {
            fragment_size: config.fragment_size,
            min_fragment_len: config.min_fragment_len,
        }
    }
}

/// Splits text into bounded fragments.
#[derive(Debug, Clone, Default)]
pub struct Chunker {
    config: ChunkConfig,
}

impl Chunker {
    pub fn new(config: ChunkConfig) -> Self {
        Self { config }
    }

    /// Split `text` into fragments of exactly `fragment_size` characters (the
    /// last window may be shorter). Windows at or below `min_fragment_len`
    /// are dropped. The fragment index is the position in the emitted
    /// sequence, so a dropped trailing window leaves no gap.
    pub fn chunk(&self, text: &str) -> Vec<TextFragment> {
        if text.is_empty() {
            return Vec::new();
        }

        let chars: Vec<char> = text.chars().collect();
        let mut fragments = Vec::new();

        for window in chars.chunks(self.config.fragment_size) {
            if window.len() <= self.config.min_fragment_len {
                continue;
            }
            fragments.push(TextFragment::new(
                fragments.len(),
                window.iter().collect::<String>(),
            ));
        }

        fragments
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunker(size: usize, min: usize) -> Chunker {
        Chunker::new(ChunkConfig {
            fragment_size: size,
            min_fragment_len: min,
        })
    }

    #[test]
    fn test_empty_input() {
        assert!(Chunker::default().chunk("").is_empty());
    }

    #[test]
    fn test_short_input_dropped() {
        // 100 characters is at the threshold, not past it
        let text = "a".repeat(100);
        assert!(Chunker::default().chunk(&text).is_empty());

        let text = "a".repeat(101);
        assert_eq!(Chunker::default().chunk(&text).len(), 1);
    }

    #[test]
    fn test_window_sizes() {
        let text = "x".repeat(2500);
        let fragments = Chunker::default().chunk(&text);

        let lengths: Vec<usize> = fragments.iter().map(|f| f.len()).collect();
        assert_eq!(lengths, [1000, 1000, 500]);

        let indices: Vec<usize> = fragments.iter().map(|f| f.index).collect();
        assert_eq!(indices, [0, 1, 2]);
    }

    #[test]
    fn test_short_trailing_window_dropped() {
        // 2050 chars: windows of 1000, 1000 and 50; the 50-char tail goes
        let text = "x".repeat(2050);
        let fragments = Chunker::default().chunk(&text);
        assert_eq!(fragments.len(), 2);
    }

    #[test]
    fn test_concatenation_is_a_prefix() {
        let text: String = ('a'..='z').cycle().take(3217).collect();
        let fragments = Chunker::default().chunk(&text);

        let rebuilt: String = fragments.iter().map(|f| f.content.as_str()).collect();
        assert!(text.starts_with(&rebuilt));

        for fragment in &fragments {
            assert!(fragment.len() <= 1000);
            assert!(fragment.len() > 100);
        }
    }

    #[test]
    fn test_multibyte_characters_counted_as_chars() {
        // 12 characters, far more than 12 bytes
        let text = "ññññññ日本語日本語";
        let fragments = chunker(5, 1).chunk(text);

        assert_eq!(fragments.len(), 3);
        assert_eq!(fragments[0].content, "ñññññ");
        assert_eq!(fragments[1].content, "ñ日本語日");
        assert_eq!(fragments[2].content, "本語");
    }

    #[test]
    fn test_small_windows() {
        let text = "abcdefghij";
        let fragments = chunker(3, 0).chunk(text);

        let contents: Vec<&str> = fragments.iter().map(|f| f.content.as_str()).collect();
        assert_eq!(contents, ["abc", "def", "ghi", "j"]);
        assert_eq!(fragments[3].index, 3);
    }
}
