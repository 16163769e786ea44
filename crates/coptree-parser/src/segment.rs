//! Sentence segmentation of raw document text.
//!
//! The tagging collaborator decides where sentences end; this module only
//! turns its boundary signal into ordered, trimmed byte ranges. Any tagger
//! can plug in through [`BoundarySignal`]; [`PunctuationBoundary`] is the
//! default used when no tagger is available.

use std::ops::Range;

/// Decides where sentences end in raw text.
pub trait BoundarySignal {
    /// Returns `true` if a sentence ends right after `ch`.
    fn ends_sentence(&self, ch: char) -> bool;
}

/// Ends sentences at Greek and Coptic sentence punctuation.
///
/// Recognised marks are `.`, `;` (the Greek question mark), the ano teleia
/// (U+0387, or U+00B7 as it is often typed), `:`, and the Coptic full stops
/// `⳹` and `⳾`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PunctuationBoundary;

impl PunctuationBoundary {
    const MARKS: [char; 7] = [
        '.', ';', '\u{0387}', '\u{00B7}', ':', '\u{2CF9}', '\u{2CFE}',
    ];
}

impl BoundarySignal for PunctuationBoundary {
    fn ends_sentence(&self, ch: char) -> bool {
        Self::MARKS.contains(&ch)
    }
}

impl<F> BoundarySignal for F
where
    F: Fn(char) -> bool,
{
    fn ends_sentence(&self, ch: char) -> bool {
        self(ch)
    }
}

/// Byte range of one sentence within the segmented text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentenceBoundary {
    range: Range<usize>,
}

impl SentenceBoundary {
    pub fn range(&self) -> Range<usize> {
        self.range.clone()
    }

    /// Returns the sentence text out of the text it was segmented from.
    pub fn slice<'a>(&self, text: &'a str) -> &'a str {
        &text[self.range.clone()]
    }
}

/// Splits `text` into sentences using `signal`.
///
/// Boundaries are ordered, non-overlapping, and trimmed of surrounding
/// whitespace. Runs of closing marks stay with their sentence and
/// whitespace-only pieces are dropped. Trailing text without a closing mark
/// forms a final sentence.
///
/// # Examples
///
/// ```
/// use coptree_parser::segment::{PunctuationBoundary, segment};
///
/// let text = "ⲁⲛⲟⲕ ⲡⲉ ⲡⲛⲟⲩⲧⲉ. ⲁϥⲥⲱⲧⲙ·  ⲛⲧⲟⲕ";
/// let sentences: Vec<_> = segment(text, &PunctuationBoundary)
///     .iter()
///     .map(|b| b.slice(text))
///     .collect();
///
/// assert_eq!(sentences, vec!["ⲁⲛⲟⲕ ⲡⲉ ⲡⲛⲟⲩⲧⲉ.", "ⲁϥⲥⲱⲧⲙ·", "ⲛⲧⲟⲕ"]);
/// ```
pub fn segment(text: &str, signal: &impl BoundarySignal) -> Vec<SentenceBoundary> {
    let mut boundaries = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((offset, ch)) = chars.next() {
        if !signal.ends_sentence(ch) {
            continue;
        }
        // Keep runs like `...` or `.;` inside one sentence.
        if chars
            .peek()
            .is_some_and(|&(_, next)| signal.ends_sentence(next))
        {
            continue;
        }
        let end = offset + ch.len_utf8();
        push_trimmed(text, start..end, &mut boundaries);
        start = end;
    }
    push_trimmed(text, start..text.len(), &mut boundaries);

    boundaries
}

fn push_trimmed(text: &str, range: Range<usize>, boundaries: &mut Vec<SentenceBoundary>) {
    let piece = &text[range.clone()];
    let trimmed_start = piece.trim_start();
    let leading = piece.len() - trimmed_start.len();
    let trimmed = trimmed_start.trim_end();
    if trimmed.is_empty() {
        return;
    }
    let start = range.start + leading;
    boundaries.push(SentenceBoundary {
        range: start..start + trimmed.len(),
    });
}
