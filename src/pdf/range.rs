//! 1-based inclusive page ranges.

use crate::pdf::PdfError;

// ---------------------------------------------------------------------------
// PageRange
// ---------------------------------------------------------------------------

/// A user-supplied page selection, 1-based and inclusive at both ends.
///
/// Both bounds are optional: an absent start means "from page 1", an absent
/// (or out-of-bounds) end means "to the last page".  `PageRange::default()`
/// therefore selects the whole document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageRange {
    /// First page to include (1-based).  `None` → 1.
    pub start: Option<usize>,
    /// Last page to include (1-based, inclusive).  `None` or beyond the
    /// document → last page.
    pub end: Option<usize>,
}

impl PageRange {
    pub fn new(start: Option<usize>, end: Option<usize>) -> Self {
        Self { start, end }
    }

    /// Resolve the optional bounds against a concrete `page_count`.
    ///
    /// After normalization the invariant `1 <= start <= end <= page_count`
    /// holds, otherwise [`PdfError::InvalidRange`] is returned.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pdfvoice::pdf::PageRange;
    ///
    /// assert_eq!(PageRange::default().normalize(4).unwrap(), (1, 4));
    /// assert_eq!(PageRange::new(Some(2), None).normalize(4).unwrap(), (2, 4));
    /// assert!(PageRange::new(Some(5), Some(2)).normalize(10).is_err());
    /// ```
    pub fn normalize(self, page_count: usize) -> Result<(usize, usize), PdfError> {
        let start = self.start.unwrap_or(1);
        let end = match self.end {
            Some(end) if end <= page_count => end,
            _ => page_count,
        };
        if start < 1 || start > end {
            return Err(PdfError::InvalidRange {
                start,
                end,
                page_count,
            });
        }
        Ok((start, end))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_selects_whole_document() {
        assert_eq!(PageRange::default().normalize(7).unwrap(), (1, 7));
    }

    #[test]
    fn explicit_full_range_equals_default() {
        let explicit = PageRange::new(Some(1), Some(7)).normalize(7).unwrap();
        let implicit = PageRange::default().normalize(7).unwrap();
        assert_eq!(explicit, implicit);
    }

    #[test]
    fn absent_start_becomes_one() {
        assert_eq!(PageRange::new(None, Some(3)).normalize(7).unwrap(), (1, 3));
    }

    #[test]
    fn out_of_bounds_end_clamps_to_last_page() {
        assert_eq!(
            PageRange::new(Some(2), Some(99)).normalize(5).unwrap(),
            (2, 5)
        );
    }

    #[test]
    fn start_after_end_is_invalid() {
        let err = PageRange::new(Some(5), Some(2)).normalize(10).unwrap_err();
        assert!(matches!(err, PdfError::InvalidRange { start: 5, end: 2, .. }));
    }

    #[test]
    fn zero_start_is_invalid() {
        let err = PageRange::new(Some(0), None).normalize(3).unwrap_err();
        assert!(matches!(err, PdfError::InvalidRange { .. }));
    }

    #[test]
    fn empty_document_is_invalid() {
        assert!(PageRange::default().normalize(0).is_err());
    }

    #[test]
    fn single_page_range() {
        assert_eq!(
            PageRange::new(Some(3), Some(3)).normalize(5).unwrap(),
            (3, 3)
        );
    }

    #[test]
    fn start_beyond_document_is_invalid() {
        // end normalizes to page_count (4), start 6 > 4
        let err = PageRange::new(Some(6), None).normalize(4).unwrap_err();
        assert!(matches!(err, PdfError::InvalidRange { start: 6, end: 4, .. }));
    }
}
