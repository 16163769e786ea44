//! Seam for the tagging and parsing collaborator.
//!
//! Raw text is split with a [`BoundarySignal`] and each sentence is handed
//! to a [`Tagger`], which returns its token records. A tagger failure is
//! confined to its sentence: the sentence becomes an empty batch, which
//! the navigator shows as a placeholder.

use std::fmt;

use log::{debug, warn};

use coptree_core::record::{SentenceBatch, TokenRecord};
use coptree_parser::segment::{BoundarySignal, segment};

/// Produces token records for one sentence of raw text.
pub trait Tagger {
    type Error: fmt::Display;

    /// Tags and parses `sentence`.
    ///
    /// # Errors
    ///
    /// Returns the tagger's own error when the sentence cannot be analysed.
    fn annotate(&self, sentence: &str) -> Result<Vec<TokenRecord>, Self::Error>;
}

impl<F, E> Tagger for F
where
    F: Fn(&str) -> Result<Vec<TokenRecord>, E>,
    E: fmt::Display,
{
    type Error = E;

    fn annotate(&self, sentence: &str) -> Result<Vec<TokenRecord>, E> {
        self(sentence)
    }
}

/// Segments `text` and annotates every sentence, in document order.
///
/// Each batch keeps its sentence text. Sentences the tagger rejects come
/// back empty.
pub fn annotate_document(
    text: &str,
    signal: &impl BoundarySignal,
    tagger: &impl Tagger,
) -> Vec<SentenceBatch> {
    let boundaries = segment(text, signal);
    debug!(sentences = boundaries.len(); "Text segmented");

    boundaries
        .iter()
        .enumerate()
        .map(|(position, boundary)| {
            let sentence = boundary.slice(text);
            let records = tagger.annotate(sentence).unwrap_or_else(|err| {
                warn!(sentence = position + 1, reason:% = err; "Tagger failed, sentence left empty");
                Vec::new()
            });
            SentenceBatch::new(records).with_text(sentence)
        })
        .collect()
}
