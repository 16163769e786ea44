//! CoNLL-U reader for the tagging and parsing collaborator's output.
//!
//! A document is a sequence of sentence blocks separated by blank lines.
//! Each block holds optional `#` comment lines followed by token lines of
//! ten tab-separated columns:
//!
//! ```text
//! # sent_id = shenoute-1
//! # text = ⲁⲛⲟⲕ ⲡⲉ ⲡⲛⲟⲩⲧⲉ
//! 1	ⲁⲛⲟⲕ	ⲁⲛⲟⲕ	PRON	_	_	2	nsubj	_	_
//! 2	ⲡⲉ	ⲡⲉ	AUX	_	_	0	root	_	_
//! 3	ⲡⲛⲟⲩⲧⲉ	ⲛⲟⲩⲧⲉ	NOUN	_	_	2	nsubj	_	_
//! ```
//!
//! Multi-word token ranges (`1-2`) and empty nodes (`1.1`) are skipped, so
//! word indices may have gaps. The reader collects every syntax problem in
//! the file before failing; structural checks on the resulting records
//! belong to [`crate::validate`].

use std::ops::Range;

use log::{debug, trace};
use winnow::{
    Parser as _,
    ascii::{dec_uint, space0},
    combinator::{alt, opt, preceded, separated},
    error::{ContextError, ErrMode, ModalResult},
    stream::LocatingSlice,
    token::{rest, take_till},
};

use coptree_core::record::{SentenceBatch, TokenRecord};

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError},
    span::Span,
};

/// Number of tab-separated columns on a token line.
const COLUMN_COUNT: usize = 10;

/// Marker for an empty CoNLL-U field.
const EMPTY_FIELD: &str = "_";

/// One sentence read from CoNLL-U source, with the byte spans of its lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSentence {
    batch: SentenceBatch,
    span: Span,
    token_spans: Vec<Span>,
}

impl SourceSentence {
    pub fn batch(&self) -> &SentenceBatch {
        &self.batch
    }

    pub fn into_batch(self) -> SentenceBatch {
        self.batch
    }

    /// Span of the whole sentence block, comments included.
    pub fn span(&self) -> Span {
        self.span
    }

    /// Span of the token line of the record at `position` in the batch.
    pub fn token_span(&self, position: usize) -> Option<Span> {
        self.token_spans.get(position).copied()
    }

    /// Span of the token line of the first record with the given index.
    pub fn span_of(&self, index: u32) -> Option<Span> {
        self.batch
            .records()
            .iter()
            .position(|record| record.index() == index)
            .and_then(|position| self.token_span(position))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TokenId {
    Word(u32),
    Range(u32, u32),
    Empty(u32, u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Comment<'a> {
    SentId(&'a str),
    Text(&'a str),
    Other,
}

type Input<'a> = LocatingSlice<&'a str>;

/// Take one line without its terminator, along with its byte range.
fn line<'a>(input: &mut Input<'a>) -> ModalResult<(&'a str, Range<usize>)> {
    let (text, range) = take_till(0.., '\n').with_span().parse_next(input)?;
    opt('\n').parse_next(input)?;
    Ok((text, range))
}

/// Split a token line into its tab-separated fields.
fn fields<'a>(input: &mut Input<'a>) -> ModalResult<Vec<(&'a str, Range<usize>)>> {
    separated(1.., take_till(0.., '\t').with_span(), '\t').parse_next(input)
}

fn token_id(input: &mut &str) -> ModalResult<TokenId> {
    alt((
        (dec_uint, '-', dec_uint).map(|(first, _, last)| TokenId::Range(first, last)),
        (dec_uint, '.', dec_uint).map(|(word, _, node)| TokenId::Empty(word, node)),
        dec_uint.map(TokenId::Word),
    ))
    .parse_next(input)
}

fn head(input: &mut &str) -> ModalResult<u32> {
    dec_uint.parse_next(input)
}

fn metadata<'a>(
    key: &'static str,
) -> impl winnow::Parser<&'a str, &'a str, ErrMode<ContextError>> {
    preceded((key, space0, '=', space0), rest).map(|value: &'a str| value.trim())
}

fn comment<'a>(input: &mut &'a str) -> ModalResult<Comment<'a>> {
    preceded(
        ('#', space0),
        alt((
            metadata("sent_id").map(Comment::SentId),
            metadata("text").map(Comment::Text),
            rest.value(Comment::Other),
        )),
    )
    .parse_next(input)
}

/// Sentence being accumulated until the next blank line.
#[derive(Debug, Default)]
struct PendingSentence {
    id: Option<String>,
    text: Option<String>,
    records: Vec<TokenRecord>,
    token_spans: Vec<Span>,
    span: Option<Span>,
}

impl PendingSentence {
    fn extend_span(&mut self, span: Span) {
        self.span = Some(match self.span {
            Some(current) => current.union(span),
            None => span,
        });
    }

    fn finish(self) -> Option<SourceSentence> {
        let span = self.span?;
        let mut batch = SentenceBatch::new(self.records);
        if let Some(id) = self.id {
            batch = batch.with_id(id);
        }
        if let Some(text) = self.text {
            batch = batch.with_text(text);
        }
        Some(SourceSentence {
            batch,
            span,
            token_spans: self.token_spans,
        })
    }
}

/// Reader that accumulates sentences and diagnostics line by line.
struct Reader {
    sentences: Vec<SourceSentence>,
    pending: PendingSentence,
    diagnostics: DiagnosticCollector,
}

impl Reader {
    fn new() -> Self {
        Self {
            sentences: Vec::new(),
            pending: PendingSentence::default(),
            diagnostics: DiagnosticCollector::new(),
        }
    }

    fn read(&mut self, mut input: Input<'_>) {
        while !input.is_empty() {
            let Ok((text, range)) = line(&mut input) else {
                break;
            };
            let text = text.strip_suffix('\r').unwrap_or(text);
            let span = Span::new(range.start..range.start + text.len());

            if text.trim().is_empty() {
                self.flush();
            } else if text.starts_with('#') {
                self.read_comment(text, span);
            } else {
                self.read_token_line(text, span);
            }
        }
        self.flush();
    }

    fn flush(&mut self) {
        if let Some(sentence) = std::mem::take(&mut self.pending).finish() {
            trace!(
                position = self.sentences.len(),
                tokens = sentence.batch.len();
                "Sentence read"
            );
            self.sentences.push(sentence);
        }
    }

    fn read_comment(&mut self, text: &str, span: Span) {
        self.pending.extend_span(span);
        match comment.parse(text) {
            Ok(Comment::SentId(id)) => self.pending.id = Some(id.to_string()),
            Ok(Comment::Text(value)) => self.pending.text = Some(value.to_string()),
            Ok(Comment::Other) | Err(_) => {}
        }
    }

    fn read_token_line(&mut self, text: &str, line_span: Span) {
        self.pending.extend_span(line_span);

        let columns = match fields.parse(LocatingSlice::new(text)) {
            Ok(columns) => columns,
            Err(_) => vec![(text, 0..text.len())],
        };
        if columns.len() != COLUMN_COUNT {
            self.diagnostics.emit(
                Diagnostic::error(format!(
                    "expected {COLUMN_COUNT} columns, found {}",
                    columns.len()
                ))
                .with_code(ErrorCode::E001)
                .with_label(line_span, ErrorCode::E001.description())
                .with_help("separate the ID FORM LEMMA UPOS XPOS FEATS HEAD DEPREL DEPS MISC columns with single tabs"),
            );
            return;
        }

        let field_span =
            |column: usize| Span::new(columns[column].1.clone()).offset_by(line_span.start());
        let field = |column: usize| columns[column].0;

        let index = match token_id.parse(field(0)) {
            Ok(TokenId::Word(index)) => index,
            Ok(TokenId::Range(first, last)) => {
                trace!(first = first, last = last; "Skipping multi-word token line");
                return;
            }
            Ok(TokenId::Empty(word, node)) => {
                trace!(word = word, node = node; "Skipping empty node line");
                return;
            }
            Err(_) => {
                self.diagnostics.emit(
                    Diagnostic::error(format!("invalid token id `{}`", field(0)))
                        .with_code(ErrorCode::E002)
                        .with_label(field_span(0), ErrorCode::E002.description())
                        .with_help("use a word index like `3`, a range like `3-4` or an empty node like `3.1`"),
                );
                return;
            }
        };

        let mut valid = true;
        let head_value = match head.parse(field(6)) {
            Ok(value) => value,
            Err(_) => {
                self.diagnostics.emit(
                    Diagnostic::error(format!(
                        "head `{}` of token {index} is not a token index",
                        field(6)
                    ))
                    .with_code(ErrorCode::E003)
                    .with_label(field_span(6), ErrorCode::E003.description())
                    .with_help("use the index of the governing token, or 0 for the root"),
                );
                valid = false;
                0
            }
        };

        for (column, name) in [(3, "UPOS"), (7, "DEPREL")] {
            if is_empty_field(field(column)) {
                self.diagnostics.emit(
                    Diagnostic::error(format!("token {index} has no {name}"))
                        .with_code(ErrorCode::E004)
                        .with_label(field_span(column), ErrorCode::E004.description()),
                );
                valid = false;
            }
        }

        if !valid {
            return;
        }

        let lemma = if is_empty_field(field(2)) {
            ""
        } else {
            field(2)
        };
        let mut record = TokenRecord::new(index, field(1), lemma, field(3), head_value, field(7));
        if !is_empty_field(field(5)) {
            record = record.with_feats(field(5));
        }
        self.pending.records.push(record);
        self.pending.token_spans.push(line_span);
    }

    fn finish(self) -> Result<Vec<SourceSentence>, ParseError> {
        self.diagnostics.finish().map(|()| self.sentences)
    }
}

fn is_empty_field(value: &str) -> bool {
    value.is_empty() || value == EMPTY_FIELD
}

/// Read a CoNLL-U document into sentences.
///
/// # Errors
///
/// Returns a [`ParseError`] holding one diagnostic per malformed line when
/// any line cannot be read.
///
/// # Examples
///
/// ```
/// use coptree_parser::read_conllu;
///
/// let source = "# text = ⲁⲛⲟⲕ ⲡⲉ\n\
///               1\tⲁⲛⲟⲕ\tⲁⲛⲟⲕ\tPRON\t_\t_\t2\tnsubj\t_\t_\n\
///               2\tⲡⲉ\tⲡⲉ\tAUX\t_\t_\t0\troot\t_\t_\n";
///
/// let sentences = read_conllu(source).unwrap();
/// assert_eq!(sentences.len(), 1);
/// assert_eq!(sentences[0].batch().text(), Some("ⲁⲛⲟⲕ ⲡⲉ"));
/// assert_eq!(sentences[0].batch().len(), 2);
/// ```
pub fn read_conllu(source: &str) -> Result<Vec<SourceSentence>, ParseError> {
    let mut reader = Reader::new();
    reader.read(LocatingSlice::new(source));
    let result = reader.finish();
    match &result {
        Ok(sentences) => debug!(sentences = sentences.len(); "CoNLL-U document read"),
        Err(err) => debug!(errors = err.diagnostics().len(); "CoNLL-U document rejected"),
    }
    result
}

/// Read a CoNLL-U document and keep only the sentence batches.
pub fn read_batches(source: &str) -> Result<Vec<SentenceBatch>, ParseError> {
    Ok(read_conllu(source)?
        .into_iter()
        .map(SourceSentence::into_batch)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_line(columns: [&str; 10]) -> String {
        columns.join("\t")
    }

    const COPULAR: &str = "# sent_id = s1\n\
        # text = ⲁⲛⲟⲕ ⲡⲉ ⲡⲛⲟⲩⲧⲉ\n\
        1\tⲁⲛⲟⲕ\tⲁⲛⲟⲕ\tPRON\t_\t_\t2\tnsubj\t_\t_\n\
        2\tⲡⲉ\tⲡⲉ\tAUX\t_\t_\t0\troot\t_\t_\n\
        3\tⲡⲛⲟⲩⲧⲉ\tⲛⲟⲩⲧⲉ\tNOUN\t_\tDefinite=Def\t2\tnsubj\t_\t_\n";

    #[test]
    fn test_read_single_sentence_with_metadata() {
        let sentences = read_conllu(COPULAR).unwrap();
        assert_eq!(sentences.len(), 1);

        let batch = sentences[0].batch();
        assert_eq!(batch.id(), Some("s1"));
        assert_eq!(batch.text(), Some("ⲁⲛⲟⲕ ⲡⲉ ⲡⲛⲟⲩⲧⲉ"));

        let records = batch.records();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].form(), "ⲁⲛⲟⲕ");
        assert_eq!(records[1].head(), 0);
        assert_eq!(records[1].relation(), "root");
        assert_eq!(records[2].lemma(), "ⲛⲟⲩⲧⲉ");
        assert_eq!(records[2].feats(), Some("Definite=Def"));
        assert_eq!(records[0].feats(), None);
    }

    #[test]
    fn test_sentences_are_split_on_blank_lines() {
        let source = format!("{COPULAR}\n{COPULAR}\n\n\n{COPULAR}");
        let sentences = read_conllu(&source).unwrap();
        assert_eq!(sentences.len(), 3);
    }

    #[test]
    fn test_crlf_line_endings() {
        let source = COPULAR.replace('\n', "\r\n");
        let sentences = read_conllu(&source).unwrap();
        assert_eq!(sentences[0].batch().records()[2].relation(), "nsubj");
        assert_eq!(sentences[0].batch().text(), Some("ⲁⲛⲟⲕ ⲡⲉ ⲡⲛⲟⲩⲧⲉ"));
    }

    #[test]
    fn test_missing_lemma_falls_back_to_form() {
        let source = token_line(["1", "ⲥⲱⲧⲙ", "_", "VERB", "_", "_", "0", "root", "_", "_"]);
        let sentences = read_conllu(&source).unwrap();
        assert_eq!(sentences[0].batch().records()[0].lemma(), "ⲥⲱⲧⲙ");
    }

    #[test]
    fn test_range_and_empty_nodes_are_skipped() {
        let source = [
            token_line(["1-2", "ⲁϥⲥⲱⲧⲙ", "_", "_", "_", "_", "_", "_", "_", "_"]),
            token_line(["1", "ⲁϥ", "ⲁ", "AUX", "_", "_", "2", "aux", "_", "_"]),
            token_line(["2", "ⲥⲱⲧⲙ", "ⲥⲱⲧⲙ", "VERB", "_", "_", "0", "root", "_", "_"]),
            token_line(["2.1", "ⲡⲉ", "ⲡⲉ", "AUX", "_", "_", "_", "_", "_", "_"]),
            token_line(["4", "ⲉⲃⲟⲗ", "ⲉⲃⲟⲗ", "ADV", "_", "_", "2", "advmod", "_", "_"]),
        ]
        .join("\n");

        let sentences = read_conllu(&source).unwrap();
        let indices: Vec<_> = sentences[0]
            .batch()
            .records()
            .iter()
            .map(TokenRecord::index)
            .collect();
        assert_eq!(indices, vec![1, 2, 4]);
    }

    #[test]
    fn test_comment_only_block_is_an_empty_sentence() {
        let sentences = read_conllu("# sent_id = lacuna\n\n").unwrap();
        assert_eq!(sentences.len(), 1);
        assert!(sentences[0].batch().is_empty());
        assert_eq!(sentences[0].batch().id(), Some("lacuna"));
    }

    #[test]
    fn test_empty_input_has_no_sentences() {
        assert!(read_conllu("").unwrap().is_empty());
        assert!(read_conllu("\n\n").unwrap().is_empty());
    }

    #[test]
    fn test_token_spans_point_at_lines() {
        let sentences = read_conllu(COPULAR).unwrap();
        let sentence = &sentences[0];

        let span = sentence.span_of(2).unwrap();
        assert!(COPULAR[span.start()..span.end()].starts_with("2\tⲡⲉ"));
        assert!(!COPULAR[span.start()..span.end()].ends_with('\n'));
        assert_eq!(sentence.span().start(), 0);
        assert!(sentence.span_of(9).is_none());
    }

    #[test]
    fn test_wrong_column_count_is_e001() {
        let err = read_conllu("1\tⲁⲛⲟⲕ\tⲁⲛⲟⲕ\tPRON\n").unwrap_err();
        assert_eq!(err.diagnostics().len(), 1);
        assert_eq!(err.diagnostics()[0].code(), Some(ErrorCode::E001));
        assert_eq!(err.diagnostics()[0].message(), "expected 10 columns, found 4");
    }

    #[test]
    fn test_invalid_id_is_e002_with_field_span() {
        let source = token_line(["x", "ⲁⲛⲟⲕ", "ⲁⲛⲟⲕ", "PRON", "_", "_", "0", "root", "_", "_"]);
        let err = read_conllu(&source).unwrap_err();
        let diag = &err.diagnostics()[0];
        assert_eq!(diag.code(), Some(ErrorCode::E002));
        assert_eq!(diag.labels()[0].span(), Span::new(0..1));
    }

    #[test]
    fn test_invalid_head_is_e003() {
        let source = token_line(["1", "ⲁⲛⲟⲕ", "ⲁⲛⲟⲕ", "PRON", "_", "_", "_", "root", "_", "_"]);
        let err = read_conllu(&source).unwrap_err();
        assert_eq!(err.diagnostics()[0].code(), Some(ErrorCode::E003));
    }

    #[test]
    fn test_missing_tag_and_relation_are_e004() {
        let source = token_line(["1", "ⲁⲛⲟⲕ", "ⲁⲛⲟⲕ", "_", "_", "_", "0", "_", "_", "_"]);
        let err = read_conllu(&source).unwrap_err();
        let codes: Vec<_> = err.diagnostics().iter().map(|d| d.code()).collect();
        assert_eq!(codes, vec![Some(ErrorCode::E004), Some(ErrorCode::E004)]);
    }

    #[test]
    fn test_all_errors_in_file_are_collected() {
        let source = format!(
            "1\tbroken\n{}\n\n{}\n",
            token_line(["2", "ⲡⲉ", "ⲡⲉ", "AUX", "_", "_", "?", "root", "_", "_"]),
            token_line(["a", "ⲡⲉ", "ⲡⲉ", "AUX", "_", "_", "0", "root", "_", "_"]),
        );
        let err = read_conllu(&source).unwrap_err();
        let codes: Vec<_> = err.diagnostics().iter().map(|d| d.code()).collect();
        assert_eq!(
            codes,
            vec![
                Some(ErrorCode::E001),
                Some(ErrorCode::E003),
                Some(ErrorCode::E002)
            ]
        );
    }

    #[test]
    fn test_read_batches_drops_spans() {
        let batches = read_batches(COPULAR).unwrap();
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].len(), 3);
    }
}
