//! Structural validation of one sentence's token records.
//!
//! Validation is a pure check that runs before tree building. It never
//! repairs input: a batch either passes every check and becomes a
//! [`ValidatedBatch`], is empty (a warning, shown as a placeholder), or is
//! rejected with a typed [`ValidationError`].
//!
//! Checks run in this order:
//!
//! 1. the batch is non-empty,
//! 2. no token uses index 0 and indices are unique (gaps are allowed),
//! 3. exactly one token has head 0,
//! 4. every other head names a token of the same batch,
//! 5. following heads from any token reaches the root (self-loops count
//!    as cycles).

use std::collections::{HashMap, HashSet};

use log::trace;
use thiserror::Error;

use coptree_core::record::{ROOT_HEAD, SentenceBatch, TokenRecord};

use crate::{
    conllu::SourceSentence,
    error::{Diagnostic, ErrorCode},
};

/// Structural problem that prevents a sentence from forming a tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Zero or several tokens claim to be the root.
    #[error("sentence has {} roots, expected exactly one", .roots.len())]
    MalformedTree {
        /// Indices of the tokens with head 0, in surface order.
        roots: Vec<u32>,
        /// The offending sentence's raw records.
        records: Vec<TokenRecord>,
    },

    #[error("token {index} has head {head}, which is not a token of this sentence")]
    DanglingHead { index: u32, head: u32 },

    /// Following heads from `index` revisits a token before reaching the root.
    #[error("token {index} is part of a head cycle ({})", format_cycle(.cycle))]
    CyclicDependency { index: u32, cycle: Vec<u32> },

    /// `first` and `second` are record positions within the batch.
    #[error("index {index} is used by more than one token")]
    DuplicateIndex {
        index: u32,
        first: usize,
        second: usize,
    },

    #[error("token at position {} has index 0, which is reserved for the root head", .position + 1)]
    ZeroIndex { position: usize },
}

fn format_cycle(cycle: &[u32]) -> String {
    let mut text = cycle
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(" → ");
    if let Some(first) = cycle.first() {
        text.push_str(&format!(" → {first}"));
    }
    text
}

impl ValidationError {
    /// Returns the diagnostic code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            ValidationError::MalformedTree { .. } => ErrorCode::E201,
            ValidationError::DanglingHead { .. } => ErrorCode::E202,
            ValidationError::CyclicDependency { .. } => ErrorCode::E203,
            ValidationError::DuplicateIndex { .. } => ErrorCode::E204,
            ValidationError::ZeroIndex { .. } => ErrorCode::E205,
        }
    }

    /// Converts this error into a diagnostic.
    ///
    /// When the sentence was read from CoNLL-U source, labels point at the
    /// offending token lines.
    pub fn to_diagnostic(&self, source: Option<&SourceSentence>) -> Diagnostic {
        let code = self.code();
        let mut diag = Diagnostic::error(self.to_string()).with_code(code);
        let span_of = |index: u32| source.and_then(|s| s.span_of(index));
        let span_at = |position: usize| source.and_then(|s| s.token_span(position));

        match self {
            ValidationError::MalformedTree { roots, .. } => {
                if let Some((first, rest)) = roots.split_first() {
                    for index in rest {
                        if let Some(span) = span_of(*index) {
                            diag = diag.with_label(span, "another root");
                        }
                    }
                    if let Some(span) = span_of(*first) {
                        diag = diag.with_secondary_label(span, "first root");
                    }
                    diag = diag.with_help("attach all but one root to another token");
                } else {
                    if let Some(span) = source.map(SourceSentence::span) {
                        diag = diag.with_label(span, "no token has head 0");
                    }
                    diag = diag.with_help("set the head of the main predicate to 0");
                }
            }
            ValidationError::DanglingHead { index, .. } => {
                if let Some(span) = span_of(*index) {
                    diag = diag.with_label(span, code.description());
                }
                diag = diag.with_help("point the head at an existing token or at 0 for the root");
            }
            ValidationError::CyclicDependency { index, cycle } => {
                if let Some(span) = span_of(*index) {
                    diag = diag.with_label(span, code.description());
                }
                for member in cycle.iter().filter(|member| *member != index) {
                    if let Some(span) = span_of(*member) {
                        diag = diag.with_secondary_label(span, "also in the cycle");
                    }
                }
            }
            ValidationError::DuplicateIndex { first, second, .. } => {
                if let Some(span) = span_at(*second) {
                    diag = diag.with_label(span, code.description());
                }
                if let Some(span) = span_at(*first) {
                    diag = diag.with_secondary_label(span, "first used here");
                }
            }
            ValidationError::ZeroIndex { position } => {
                if let Some(span) = span_at(*position) {
                    diag = diag.with_label(span, code.description());
                }
                diag = diag.with_help("number tokens from 1");
            }
        }
        diag
    }
}

/// Returns the warning shown for a sentence without tokens.
pub fn empty_batch_diagnostic(source: Option<&SourceSentence>) -> Diagnostic {
    let mut diag = Diagnostic::warning("sentence has no tokens").with_code(ErrorCode::W200);
    if let Some(span) = source.map(SourceSentence::span) {
        diag = diag.with_label(span, ErrorCode::W200.description());
    }
    diag.with_help("a placeholder is shown in its place")
}

/// A batch that passed every structural check.
///
/// Only [`validate`] creates values of this type, so the tree builder can
/// rely on its invariants without checking again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedBatch(SentenceBatch);

impl ValidatedBatch {
    pub fn batch(&self) -> &SentenceBatch {
        &self.0
    }

    pub fn records(&self) -> &[TokenRecord] {
        self.0.records()
    }

    pub fn into_batch(self) -> SentenceBatch {
        self.0
    }
}

/// Successful outcome of [`validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validated {
    /// Ready for tree building.
    Tree(ValidatedBatch),
    /// No tokens; callers show a placeholder and log a warning.
    Empty(SentenceBatch),
}

/// A batch rejected by [`validate`], kept for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{error}")]
pub struct InvalidBatch {
    error: ValidationError,
    batch: SentenceBatch,
}

impl InvalidBatch {
    pub fn error(&self) -> &ValidationError {
        &self.error
    }

    pub fn batch(&self) -> &SentenceBatch {
        &self.batch
    }

    pub fn into_parts(self) -> (ValidationError, SentenceBatch) {
        (self.error, self.batch)
    }
}

/// Validates one sentence's records.
///
/// # Examples
///
/// ```
/// use coptree_core::record::{SentenceBatch, TokenRecord};
/// use coptree_parser::validate::{Validated, ValidationError, validate};
///
/// let good = SentenceBatch::new(vec![
///     TokenRecord::new(1, "ⲁⲛⲟⲕ", "ⲁⲛⲟⲕ", "PRON", 2, "nsubj"),
///     TokenRecord::new(2, "ⲡⲉ", "ⲡⲉ", "AUX", 0, "root"),
/// ]);
/// assert!(matches!(validate(good), Ok(Validated::Tree(_))));
///
/// let two_roots = SentenceBatch::new(vec![
///     TokenRecord::new(1, "ⲁⲛⲟⲕ", "ⲁⲛⲟⲕ", "PRON", 0, "root"),
///     TokenRecord::new(2, "ⲡⲉ", "ⲡⲉ", "AUX", 0, "root"),
/// ]);
/// let rejected = validate(two_roots).unwrap_err();
/// assert!(matches!(rejected.error(), ValidationError::MalformedTree { .. }));
/// ```
pub fn validate(batch: SentenceBatch) -> Result<Validated, InvalidBatch> {
    if batch.is_empty() {
        return Ok(Validated::Empty(batch));
    }
    match check_records(batch.records()) {
        Ok(()) => {
            trace!(tokens = batch.len(); "Sentence validated");
            Ok(Validated::Tree(ValidatedBatch(batch)))
        }
        Err(error) => Err(InvalidBatch { error, batch }),
    }
}

/// Runs the structural checks on a non-empty record list.
pub fn check_records(records: &[TokenRecord]) -> Result<(), ValidationError> {
    let mut positions: HashMap<u32, usize> = HashMap::with_capacity(records.len());
    for (position, record) in records.iter().enumerate() {
        if record.index() == 0 {
            return Err(ValidationError::ZeroIndex { position });
        }
        if let Some(first) = positions.insert(record.index(), position) {
            return Err(ValidationError::DuplicateIndex {
                index: record.index(),
                first,
                second: position,
            });
        }
    }

    let roots: Vec<u32> = records
        .iter()
        .filter(|record| record.is_root())
        .map(TokenRecord::index)
        .collect();
    if roots.len() != 1 {
        return Err(ValidationError::MalformedTree {
            roots,
            records: records.to_vec(),
        });
    }

    if let Some(record) = records
        .iter()
        .find(|record| !record.is_root() && !positions.contains_key(&record.head()))
    {
        return Err(ValidationError::DanglingHead {
            index: record.index(),
            head: record.head(),
        });
    }

    check_acyclic(records)
}

/// Walks head pointers from every token, reusing walks that already
/// reached the root.
fn check_acyclic(records: &[TokenRecord]) -> Result<(), ValidationError> {
    let heads: HashMap<u32, u32> = records
        .iter()
        .map(|record| (record.index(), record.head()))
        .collect();
    let mut reaches_root: HashSet<u32> = HashSet::with_capacity(records.len());

    for record in records {
        let mut path: Vec<u32> = Vec::new();
        let mut current = record.index();
        while current != ROOT_HEAD && !reaches_root.contains(&current) {
            if let Some(start) = path.iter().position(|&seen| seen == current) {
                let cycle = path.split_off(start);
                return Err(ValidationError::CyclicDependency {
                    index: current,
                    cycle,
                });
            }
            path.push(current);
            current = heads.get(&current).copied().unwrap_or(ROOT_HEAD);
        }
        reaches_root.extend(path);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conllu::read_conllu;

    fn record(index: u32, head: u32) -> TokenRecord {
        let relation = if head == 0 { "root" } else { "dep" };
        TokenRecord::new(index, format!("w{index}"), "", "X", head, relation)
    }

    fn batch(pairs: &[(u32, u32)]) -> SentenceBatch {
        SentenceBatch::new(pairs.iter().map(|&(i, h)| record(i, h)).collect())
    }

    fn error_of(pairs: &[(u32, u32)]) -> ValidationError {
        validate(batch(pairs)).unwrap_err().into_parts().0
    }

    #[test]
    fn test_valid_copular_sentence() {
        let batch = SentenceBatch::new(vec![
            TokenRecord::new(1, "ⲁⲛⲟⲕ", "ⲁⲛⲟⲕ", "PRON", 2, "nsubj"),
            TokenRecord::new(2, "ⲡⲉ", "ⲡⲉ", "AUX", 0, "root"),
            TokenRecord::new(3, "ⲡⲛⲟⲩⲧⲉ", "ⲛⲟⲩⲧⲉ", "NOUN", 2, "nsubj"),
        ]);
        match validate(batch.clone()) {
            Ok(Validated::Tree(validated)) => assert_eq!(validated.into_batch(), batch),
            other => panic!("expected a validated tree, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_batch_is_not_an_error() {
        assert!(matches!(
            validate(SentenceBatch::default()),
            Ok(Validated::Empty(_))
        ));
    }

    #[test]
    fn test_index_gaps_are_allowed() {
        assert!(validate(batch(&[(2, 5), (5, 0), (9, 5)])).is_ok());
    }

    #[test]
    fn test_zero_index() {
        assert_eq!(
            error_of(&[(1, 0), (0, 1)]),
            ValidationError::ZeroIndex { position: 1 }
        );
    }

    #[test]
    fn test_duplicate_index() {
        assert_eq!(
            error_of(&[(1, 2), (2, 0), (1, 2)]),
            ValidationError::DuplicateIndex {
                index: 1,
                first: 0,
                second: 2
            }
        );
    }

    #[test]
    fn test_no_root_is_malformed() {
        match error_of(&[(1, 2), (2, 1)]) {
            ValidationError::MalformedTree { roots, records } => {
                assert!(roots.is_empty());
                assert_eq!(records.len(), 2);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_multiple_roots_carry_raw_records() {
        let err = error_of(&[(1, 0), (2, 0), (3, 2)]);
        assert_eq!(err.to_string(), "sentence has 2 roots, expected exactly one");
        match err {
            ValidationError::MalformedTree { roots, records } => {
                assert_eq!(roots, vec![1, 2]);
                assert_eq!(records, batch(&[(1, 0), (2, 0), (3, 2)]).into_records());
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_dangling_head() {
        assert_eq!(
            error_of(&[(1, 2), (2, 0), (3, 7)]),
            ValidationError::DanglingHead { index: 3, head: 7 }
        );
    }

    #[test]
    fn test_self_loop_is_a_cycle() {
        assert_eq!(
            error_of(&[(1, 1), (2, 0)]),
            ValidationError::CyclicDependency {
                index: 1,
                cycle: vec![1]
            }
        );
    }

    #[test]
    fn test_longer_cycle_is_reported_in_walk_order() {
        let err = error_of(&[(1, 0), (2, 3), (3, 4), (4, 2)]);
        assert_eq!(
            err,
            ValidationError::CyclicDependency {
                index: 2,
                cycle: vec![2, 3, 4]
            }
        );
        assert_eq!(
            err.to_string(),
            "token 2 is part of a head cycle (2 → 3 → 4 → 2)"
        );
    }

    #[test]
    fn test_tail_into_cycle_reports_cycle_only() {
        match error_of(&[(1, 0), (5, 2), (2, 3), (3, 2)]) {
            ValidationError::CyclicDependency { cycle, .. } => assert_eq!(cycle, vec![2, 3]),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(error_of(&[(1, 0), (2, 0)]).code(), ErrorCode::E201);
        assert_eq!(error_of(&[(1, 0), (2, 9)]).code(), ErrorCode::E202);
        assert_eq!(error_of(&[(1, 0), (2, 2)]).code(), ErrorCode::E203);
        assert_eq!(error_of(&[(1, 0), (1, 1)]).code(), ErrorCode::E204);
        assert_eq!(error_of(&[(0, 0)]).code(), ErrorCode::E205);
    }

    #[test]
    fn test_diagnostic_points_at_source_lines() {
        let source = "1\tⲁ\tⲁ\tAUX\t_\t_\t0\troot\t_\t_\n\
                      2\tϥ\tⲛⲧⲟϥ\tPRON\t_\t_\t0\troot\t_\t_\n";
        let sentences = read_conllu(source).unwrap();
        let invalid = validate(sentences[0].batch().clone()).unwrap_err();

        let diag = invalid.error().to_diagnostic(Some(&sentences[0]));
        assert_eq!(diag.code(), Some(ErrorCode::E201));
        assert_eq!(diag.labels().len(), 2);
        assert!(diag.labels()[0].is_primary());
        assert_eq!(diag.labels()[0].message(), "another root");
        assert!(source[diag.labels()[0].span().start()..].starts_with("2\t"));
        assert!(diag.labels()[1].is_secondary());
    }

    #[test]
    fn test_diagnostic_without_source_has_no_labels() {
        let diag = error_of(&[(1, 0), (2, 9)]).to_diagnostic(None);
        assert!(diag.labels().is_empty());
        assert!(diag.help().is_some());
    }

    #[test]
    fn test_empty_batch_diagnostic_is_warning() {
        let diag = empty_batch_diagnostic(None);
        assert!(diag.severity().is_warning());
        assert_eq!(diag.code(), Some(ErrorCode::W200));
    }
}
