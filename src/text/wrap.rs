//! Naive fixed-width line wrapping for page layout.
//!
//! The document writer needs each source line cut down to the printable
//! width of a page.  Real font metrics are not consulted; a line is assumed
//! to be `avg_char_width` points per character and is sliced at that
//! boundary, even mid-word.  Crude, but deterministic — and kept as-is so
//! documents generated by earlier versions lay out identically.

/// Average glyph width (points) assumed when none is given.
pub const DEFAULT_AVG_CHAR_WIDTH: f32 = 6.0;

/// Number of characters that fit into `max_width` points at
/// `avg_char_width` points per character.  Never less than 1.
pub fn max_chars_for(max_width: f32, avg_char_width: f32) -> usize {
    ((max_width / avg_char_width) as usize).max(1)
}

/// Wrap each input line to at most `max_chars_for(max_width,
/// avg_char_width)` characters.
///
/// A line longer than the limit is emitted as a run of full-width slices
/// followed by the remainder.  The remainder is emitted even when empty so
/// blank lines in the source survive the wrap.
///
/// # Example
///
/// ```rust
/// use pdfvoice::text::wrap_lines;
///
/// // max_chars = floor(30 / 6) = 5
/// let out: Vec<String> = wrap_lines(["abcdefghij"], 30.0, 6.0).collect();
/// assert_eq!(out, vec!["abcde", "fghij", ""]);
/// ```
pub fn wrap_lines<I>(
    lines: I,
    max_width: f32,
    avg_char_width: f32,
) -> impl Iterator<Item = String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let max_chars = max_chars_for(max_width, avg_char_width);
    lines
        .into_iter()
        .flat_map(move |line| wrap_one(line.as_ref(), max_chars))
}

/// Slice a single line into `max_chars`-character pieces plus the remainder.
fn wrap_one(line: &str, max_chars: usize) -> Vec<String> {
    let mut rest: Vec<char> = line.chars().collect();
    let mut out = Vec::with_capacity(rest.len() / max_chars + 1);
    while rest.len() >= max_chars {
        out.push(rest[..max_chars].iter().collect());
        rest.drain(..max_chars);
    }
    out.push(rest.into_iter().collect());
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn example_from_docs() {
        let out: Vec<String> = wrap_lines(["abcdefghij"], 30.0, 6.0).collect();
        assert_eq!(out, vec!["abcde", "fghij", ""]);
    }

    #[test]
    fn short_line_passes_through() {
        let out: Vec<String> = wrap_lines(["abc"], 30.0, 6.0).collect();
        assert_eq!(out, vec!["abc"]);
    }

    #[test]
    fn blank_lines_survive() {
        let out: Vec<String> = wrap_lines(["a", "", "b"], 30.0, 6.0).collect();
        assert_eq!(out, vec!["a", "", "b"]);
    }

    #[test]
    fn concat_reproduces_original_lines() {
        let lines = ["the quick brown fox", "", "jumps over the lazy dog"];
        let out: Vec<String> = wrap_lines(lines, 42.0, 6.0).collect();
        let rejoined: String = out.concat();
        assert_eq!(rejoined, lines.concat());
    }

    #[test]
    fn no_output_line_exceeds_max_chars() {
        let lines = ["abcdefghijklmnopqrstuvwxyz"];
        let max_chars = max_chars_for(30.0, 6.0);
        for line in wrap_lines(lines, 30.0, 6.0) {
            assert!(line.chars().count() <= max_chars, "too long: {line:?}");
        }
    }

    #[test]
    fn narrow_width_clamps_to_one_char() {
        assert_eq!(max_chars_for(2.0, 6.0), 1);
        let out: Vec<String> = wrap_lines(["ab"], 2.0, 6.0).collect();
        assert_eq!(out, vec!["a", "b", ""]);
    }

    #[test]
    fn width_floor_not_round() {
        // 35 / 6 = 5.83… → 5 chars, not 6
        assert_eq!(max_chars_for(35.0, 6.0), 5);
    }

    #[test]
    fn exact_split_emits_empty_remainder() {
        // A line that divides evenly still ends with the empty remainder,
        // same as the blank-line rule.
        let out: Vec<String> = wrap_lines(["abcde"], 30.0, 6.0).collect();
        assert_eq!(out, vec!["abcde", ""]);

        let out: Vec<String> = wrap_lines(["abcdefghijklmno"], 30.0, 6.0).collect();
        assert_eq!(out, vec!["abcde", "fghij", "klmno", ""]);
    }

    #[test]
    fn splits_mid_word() {
        // Boundary splitting is intentional — no word-wrap.
        let out: Vec<String> = wrap_lines(["hello world"], 36.0, 6.0).collect();
        assert_eq!(out, vec!["hello ", "world"]);
    }
}
