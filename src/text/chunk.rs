//! Fixed-size text chunking for the speech synthesizer.
//!
//! Speech engines impose input-size limits, so long documents are fed as a
//! sequence of bounded chunks.  Chunks are counted in *characters*, not
//! bytes, so multi-byte UTF-8 text is never split inside a code point.

// ---------------------------------------------------------------------------
// Chunks
// ---------------------------------------------------------------------------

/// Iterator over consecutive, non-overlapping chunks of a trimmed string.
///
/// Produced by [`chunks`]; yields `ceil(chars / size)` items, every one of
/// length `size` except possibly the last.
#[derive(Debug, Clone)]
pub struct Chunks {
    chars: Vec<char>,
    size: usize,
    pos: usize,
}

impl Iterator for Chunks {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.pos >= self.chars.len() {
            return None;
        }
        let end = (self.pos + self.size).min(self.chars.len());
        let chunk: String = self.chars[self.pos..end].iter().collect();
        self.pos = end;
        Some(chunk)
    }
}

/// Split `text` into consecutive chunks of at most `size` characters.
///
/// The input is trimmed once up front; concatenating all chunks reproduces
/// `text.trim()` exactly.
///
/// # Panics
///
/// Panics when `size == 0`.
///
/// # Example
///
/// ```rust
/// use pdfvoice::text::chunks;
///
/// let parts: Vec<String> = chunks("abcdefghij", 6).collect();
/// assert_eq!(parts, vec!["abcdef", "ghij"]);
/// ```
pub fn chunks(text: &str, size: usize) -> Chunks {
    assert!(size >= 1, "chunk size must be >= 1");
    Chunks {
        chars: text.trim().chars().collect(),
        size,
        pos: 0,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn example_from_docs() {
        let parts: Vec<String> = chunks("abcdefghij", 6).collect();
        assert_eq!(parts, vec!["abcdef", "ghij"]);
    }

    #[test]
    fn concat_reproduces_trimmed_input() {
        let text = "  hello world, this is a longer sentence.  ";
        for size in 1..=10 {
            let joined: String = chunks(text, size).collect();
            assert_eq!(joined, text.trim(), "size = {size}");
        }
    }

    #[test]
    fn all_chunks_except_last_are_full() {
        let text = "abcdefghijklmnop"; // 16 chars
        let parts: Vec<String> = chunks(text, 5).collect();
        assert_eq!(parts.len(), 4); // ceil(16 / 5)
        for part in &parts[..parts.len() - 1] {
            assert_eq!(part.chars().count(), 5);
        }
        assert_eq!(parts.last().map(String::len), Some(1));
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert_eq!(chunks("", 4).count(), 0);
        assert_eq!(chunks("   \n  ", 4).count(), 0);
    }

    #[test]
    fn exact_multiple_has_no_short_tail() {
        let parts: Vec<String> = chunks("abcdef", 3).collect();
        assert_eq!(parts, vec!["abc", "def"]);
    }

    #[test]
    fn multibyte_text_splits_on_char_boundaries() {
        let parts: Vec<String> = chunks("héllo wörld", 4).collect();
        let joined: String = parts.concat();
        assert_eq!(joined, "héllo wörld");
        assert_eq!(parts[0].chars().count(), 4);
    }

    #[test]
    fn restartable_fresh_sequence_each_call() {
        let text = "abcdefgh";
        let a: Vec<String> = chunks(text, 3).collect();
        let b: Vec<String> = chunks(text, 3).collect();
        assert_eq!(a, b);
    }

    #[test]
    #[should_panic(expected = "chunk size must be >= 1")]
    fn zero_size_panics() {
        chunks("abc", 0);
    }
}
