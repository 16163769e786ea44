//! Document navigation.
//!
//! A [`Navigator`] owns the sentences of one document and a cursor over
//! them. Every sentence stays navigable: sentences that fail validation
//! are kept as [`UnparseableSentence`] entries carrying their error, and
//! empty sentences become placeholder trees.
//!
//! Loading is staged. [`Navigator::begin_load`] opens a load,
//! [`Navigator::push_sentence`] validates and builds one sentence at a
//! time, and [`Navigator::commit_load`] swaps the finished document in.
//! Until the commit the previous document stays in place, so abandoning a
//! load never leaves a partial collection behind.
//!
//! The navigator has a single owner; callers that load on a worker thread
//! must hand all mutations to that owner.

use std::fmt;

use log::{debug, info, warn};
use serde::Serialize;

use coptree_core::record::SentenceBatch;
use coptree_parser::validate::{Validated, ValidationError, validate};

use crate::{error::NavigationError, structure::DependencyTree};

/// A sentence whose records do not form a tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnparseableSentence {
    number: usize,
    error: ValidationError,
    batch: SentenceBatch,
}

impl UnparseableSentence {
    /// One-based position of the sentence in its document.
    pub fn number(&self) -> usize {
        self.number
    }

    pub fn error(&self) -> &ValidationError {
        &self.error
    }

    /// The rejected records, unchanged.
    pub fn batch(&self) -> &SentenceBatch {
        &self.batch
    }
}

impl fmt::Display for UnparseableSentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "sentence {} could not be parsed: {}",
            self.number, self.error
        )
    }
}

/// One navigable sentence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SentenceEntry {
    /// A built tree, possibly the placeholder of an empty sentence.
    Tree(DependencyTree),
    Unparseable(UnparseableSentence),
}

impl SentenceEntry {
    /// Validates `batch` and builds its entry. `number` is one-based.
    pub fn from_batch(number: usize, batch: SentenceBatch) -> Self {
        match validate(batch) {
            Ok(Validated::Tree(batch)) => Self::Tree(DependencyTree::build(batch)),
            Ok(Validated::Empty(batch)) => {
                warn!(sentence = number; "Sentence has no tokens, using a placeholder");
                Self::Tree(DependencyTree::placeholder(&batch))
            }
            Err(invalid) => {
                let (error, batch) = invalid.into_parts();
                warn!(sentence = number, reason:% = error; "Sentence could not be parsed");
                Self::Unparseable(UnparseableSentence {
                    number,
                    error,
                    batch,
                })
            }
        }
    }

    pub fn tree(&self) -> Option<&DependencyTree> {
        match self {
            Self::Tree(tree) => Some(tree),
            Self::Unparseable(_) => None,
        }
    }

    pub fn unparseable(&self) -> Option<&UnparseableSentence> {
        match self {
            Self::Tree(_) => None,
            Self::Unparseable(sentence) => Some(sentence),
        }
    }

    pub fn is_unparseable(&self) -> bool {
        matches!(self, Self::Unparseable(_))
    }

    /// The `# sent_id` of the sentence, if it had one.
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::Tree(tree) => tree.id(),
            Self::Unparseable(sentence) => sentence.batch.id(),
        }
    }

    /// Number of real tokens; placeholders count none.
    pub fn token_count(&self) -> usize {
        match self {
            Self::Tree(tree) if tree.is_placeholder() => 0,
            Self::Tree(tree) => tree.len(),
            Self::Unparseable(sentence) => sentence.batch.len(),
        }
    }
}

/// Counts over a loaded document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DocumentStats {
    pub sentences: usize,
    pub tokens: usize,
    pub unparseable: usize,
    pub empty: usize,
}

/// Cursor over the sentences of one document.
#[derive(Debug, Default)]
pub struct Navigator {
    sentences: Vec<SentenceEntry>,
    current: usize,
    pending: Option<Vec<SentenceEntry>>,
}

impl Navigator {
    /// Create a navigator without a document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a whole document, replacing the current one.
    ///
    /// Sentences that fail validation become unparseable entries; they
    /// never abort the load.
    ///
    /// # Errors
    ///
    /// Returns [`NavigationError::LoadInProgress`] if a staged load is still
    /// open and [`NavigationError::EmptyDocument`] if `batches` is empty.
    /// The current document is kept in both cases.
    ///
    /// # Examples
    ///
    /// ```
    /// use coptree::navigator::Navigator;
    /// use coptree_core::record::{SentenceBatch, TokenRecord};
    ///
    /// let good = SentenceBatch::new(vec![TokenRecord::new(1, "ⲁⲙⲏⲛ", "ⲁⲙⲏⲛ", "INTJ", 0, "root")]);
    /// let bad = SentenceBatch::new(vec![TokenRecord::new(1, "ⲁⲙⲏⲛ", "ⲁⲙⲏⲛ", "INTJ", 4, "root")]);
    ///
    /// let mut navigator = Navigator::new();
    /// assert_eq!(navigator.load([good, bad]), Ok(2));
    /// assert!(navigator.next().is_some_and(|entry| entry.is_unparseable()));
    /// assert_eq!(navigator.position_label(), "Sentence 2 of 2");
    /// ```
    pub fn load<I>(&mut self, batches: I) -> Result<usize, NavigationError>
    where
        I: IntoIterator<Item = SentenceBatch>,
    {
        self.begin_load()?;
        for batch in batches {
            self.push_sentence(batch)?;
        }
        self.commit_load()
    }

    /// Opens a staged load.
    ///
    /// # Errors
    ///
    /// Returns [`NavigationError::LoadInProgress`] if one is already open.
    pub fn begin_load(&mut self) -> Result<(), NavigationError> {
        if self.pending.is_some() {
            return Err(NavigationError::LoadInProgress);
        }
        debug!("Document load started");
        self.pending = Some(Vec::new());
        Ok(())
    }

    /// Validates and builds the next sentence of the open load.
    ///
    /// # Errors
    ///
    /// Returns [`NavigationError::NoLoadInProgress`] if no load is open.
    pub fn push_sentence(
        &mut self,
        batch: SentenceBatch,
    ) -> Result<&SentenceEntry, NavigationError> {
        let pending = self
            .pending
            .as_mut()
            .ok_or(NavigationError::NoLoadInProgress)?;
        let entry = SentenceEntry::from_batch(pending.len() + 1, batch);
        pending.push(entry);
        Ok(&pending[pending.len() - 1])
    }

    /// Replaces the current document with the staged one and moves the
    /// cursor to the first sentence. Returns the sentence count.
    ///
    /// # Errors
    ///
    /// Returns [`NavigationError::NoLoadInProgress`] if no load is open and
    /// [`NavigationError::EmptyDocument`] if nothing was pushed; the staged
    /// load is discarded in the latter case.
    pub fn commit_load(&mut self) -> Result<usize, NavigationError> {
        let pending = self.pending.take().ok_or(NavigationError::NoLoadInProgress)?;
        if pending.is_empty() {
            return Err(NavigationError::EmptyDocument);
        }
        self.sentences = pending;
        self.current = 0;

        let stats = self.stats();
        info!(
            sentences = stats.sentences,
            tokens = stats.tokens,
            unparseable = stats.unparseable;
            "Document loaded"
        );
        Ok(self.sentences.len())
    }

    /// Discards the staged load, keeping the current document. Returns the
    /// number of sentences dropped.
    pub fn abandon_load(&mut self) -> usize {
        let dropped = self.pending.take().map_or(0, |pending| pending.len());
        if dropped > 0 {
            debug!(sentences = dropped; "Document load abandoned");
        }
        dropped
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Sentences built so far by the open load.
    pub fn loaded_so_far(&self) -> usize {
        self.pending.as_ref().map_or(0, Vec::len)
    }

    /// Drops the current document.
    ///
    /// # Errors
    ///
    /// Returns [`NavigationError::LoadInProgress`] while a staged load is
    /// open; finish or abandon it first.
    pub fn close(&mut self) -> Result<(), NavigationError> {
        if self.pending.is_some() {
            return Err(NavigationError::LoadInProgress);
        }
        self.sentences.clear();
        self.current = 0;
        Ok(())
    }

    /// The entry under the cursor, `None` without a document.
    pub fn current(&self) -> Option<&SentenceEntry> {
        self.sentences.get(self.current)
    }

    /// Zero-based cursor position.
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Moves to the next sentence; stays put on the last one.
    pub fn next(&mut self) -> Option<&SentenceEntry> {
        if self.can_go_next() {
            self.current += 1;
        }
        self.current()
    }

    /// Moves to the previous sentence; stays put on the first one.
    pub fn previous(&mut self) -> Option<&SentenceEntry> {
        if self.can_go_previous() {
            self.current -= 1;
        }
        self.current()
    }

    /// Moves the cursor to the zero-based position `index`.
    ///
    /// # Errors
    ///
    /// Returns [`NavigationError::OutOfRange`] and leaves the cursor alone
    /// if `index` is past the end.
    pub fn jump(&mut self, index: usize) -> Result<&SentenceEntry, NavigationError> {
        if index >= self.sentences.len() {
            return Err(NavigationError::OutOfRange {
                requested: index,
                len: self.sentences.len(),
            });
        }
        self.current = index;
        Ok(&self.sentences[index])
    }

    /// Total number of sentences, placeholders included.
    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    pub fn entries(&self) -> &[SentenceEntry] {
        &self.sentences
    }

    pub fn get(&self, index: usize) -> Option<&SentenceEntry> {
        self.sentences.get(index)
    }

    pub fn can_go_previous(&self) -> bool {
        self.current > 0
    }

    pub fn can_go_next(&self) -> bool {
        self.current + 1 < self.sentences.len()
    }

    /// Human-readable cursor position, e.g. `Sentence 2 of 7`.
    pub fn position_label(&self) -> String {
        if self.sentences.is_empty() {
            return "No sentences".to_string();
        }
        format!("Sentence {} of {}", self.current + 1, self.sentences.len())
    }

    pub fn stats(&self) -> DocumentStats {
        self.sentences
            .iter()
            .fold(DocumentStats::default(), |mut stats, entry| {
                stats.sentences += 1;
                stats.tokens += entry.token_count();
                match entry {
                    SentenceEntry::Unparseable(_) => stats.unparseable += 1,
                    SentenceEntry::Tree(tree) if tree.is_placeholder() => stats.empty += 1,
                    SentenceEntry::Tree(_) => {}
                }
                stats
            })
    }
}
