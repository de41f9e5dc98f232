//! Response segmentation
//!
//! Splits a response on the code-fence delimiter into alternating prose and
//! code segments. Classification is purely positional: after the split, even
//! indices are prose and odd indices are code. An unterminated fence therefore
//! classifies the trailing segment by parity alone.

/// The literal three-backtick marker separating prose from code
pub const CODE_FENCE: &str = "```";

/// Role of a segment, derived from its position in the split
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentRole {
    Text,
    Code,
}

impl SegmentRole {
    /// Role implied by a 0-based segment index
    pub fn for_index(index: usize) -> Self {
        if index % 2 == 1 {
            SegmentRole::Code
        } else {
            SegmentRole::Text
        }
    }
}

/// One slice of a response, borrowed from the response text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    pub index: usize,
    pub role: SegmentRole,
    raw: &'a str,
}

impl<'a> Segment<'a> {
    /// Text as it should be displayed and copied
    ///
    /// Code is trimmed of surrounding whitespace; prose is returned verbatim.
    pub fn display_text(&self) -> &'a str {
        match self.role {
            SegmentRole::Code => self.raw().trim(),
            SegmentRole::Text => self.raw(),
        }
    }

    /// Untouched substring between delimiters
    pub fn raw(&self) -> &'a str {
        self.raw
    }

    pub fn is_code(&self) -> bool {
        self.role == SegmentRole::Code
    }
}

/// Split a response into segments
///
/// `n` delimiter occurrences always yield `n + 1` segments.
pub fn segment_response(text: &str) -> Vec<Segment<'_>> {
    text.split(CODE_FENCE)
        .enumerate()
        .map(|(index, raw)| Segment {
            index,
            role: SegmentRole::for_index(index),
            raw,
        })
        .collect()
}

/// Indices of all code segments, in display order
pub fn code_indices(text: &str) -> Vec<usize> {
    segment_response(text)
        .iter()
        .filter(|s| s.is_code())
        .map(|s| s.index)
        .collect()
}
