//! Per-token annotation records and sentence batches
//!
//! A [`TokenRecord`] is one annotated word as emitted by the tagging and
//! parsing collaborator. Records are immutable once received; a
//! [`SentenceBatch`] groups the records of one sentence in surface order.

use serde::Serialize;

use crate::label::Label;

/// Head value marking a token as the root of its sentence.
pub const ROOT_HEAD: u32 = 0;

/// One annotated word of a sentence.
///
/// # Examples
///
/// ```
/// use coptree_core::record::TokenRecord;
///
/// let record = TokenRecord::new(2, "ⲡⲉ", "ⲡⲉ", "AUX", 0, "root");
/// assert!(record.is_root());
/// assert_eq!(record.pos_tag(), "AUX");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenRecord {
    index: u32,
    form: String,
    lemma: String,
    pos_tag: Label,
    head: u32,
    relation: Label,
    #[serde(skip_serializing_if = "Option::is_none")]
    feats: Option<String>,
}

impl TokenRecord {
    /// Creates a new record.
    ///
    /// An empty lemma falls back to the surface form.
    pub fn new(
        index: u32,
        form: impl Into<String>,
        lemma: impl Into<String>,
        pos_tag: impl Into<Label>,
        head: u32,
        relation: impl Into<Label>,
    ) -> Self {
        let form = form.into();
        let mut lemma = lemma.into();
        if lemma.is_empty() {
            lemma.clone_from(&form);
        }
        Self {
            index,
            form,
            lemma,
            pos_tag: pos_tag.into(),
            head,
            relation: relation.into(),
            feats: None,
        }
    }

    /// Attaches morphological features (the CoNLL-U FEATS column).
    pub fn with_feats(mut self, feats: impl Into<String>) -> Self {
        let feats = feats.into();
        self.feats = (!feats.is_empty()).then_some(feats);
        self
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn form(&self) -> &str {
        &self.form
    }

    pub fn lemma(&self) -> &str {
        &self.lemma
    }

    pub fn pos_tag(&self) -> Label {
        self.pos_tag
    }

    /// Index of the governing token, or [`ROOT_HEAD`] for the root.
    pub fn head(&self) -> u32 {
        self.head
    }

    pub fn relation(&self) -> Label {
        self.relation
    }

    pub fn feats(&self) -> Option<&str> {
        self.feats.as_deref()
    }

    /// Returns `true` if this record claims to be the sentence root.
    pub fn is_root(&self) -> bool {
        self.head == ROOT_HEAD
    }
}

/// The records of one sentence, in surface order, with optional metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SentenceBatch {
    id: Option<String>,
    text: Option<String>,
    records: Vec<TokenRecord>,
}

impl SentenceBatch {
    pub fn new(records: Vec<TokenRecord>) -> Self {
        Self {
            id: None,
            text: None,
            records,
        }
    }

    /// Sets the sentence identifier (`# sent_id`).
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets the raw sentence text (`# text`).
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn records(&self) -> &[TokenRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<TokenRecord> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the sentence text, or the forms joined by spaces in index
    /// order when no text was supplied.
    ///
    /// # Examples
    ///
    /// ```
    /// use coptree_core::record::{SentenceBatch, TokenRecord};
    ///
    /// let batch = SentenceBatch::new(vec![
    ///     TokenRecord::new(1, "ⲁⲛⲟⲕ", "ⲁⲛⲟⲕ", "PRON", 2, "nsubj"),
    ///     TokenRecord::new(2, "ⲡⲉ", "ⲡⲉ", "AUX", 0, "root"),
    /// ]);
    /// assert_eq!(batch.display_text(), "ⲁⲛⲟⲕ ⲡⲉ");
    /// ```
    pub fn display_text(&self) -> String {
        match &self.text {
            Some(text) => text.clone(),
            None => {
                let mut records: Vec<&TokenRecord> = self.records.iter().collect();
                records.sort_by_key(|record| record.index());
                records
                    .into_iter()
                    .map(TokenRecord::form)
                    .collect::<Vec<_>>()
                    .join(" ")
            }
        }
    }
}

impl From<Vec<TokenRecord>> for SentenceBatch {
    fn from(records: Vec<TokenRecord>) -> Self {
        Self::new(records)
    }
}
