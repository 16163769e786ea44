//! Advisory grammar checks over a built tree.
//!
//! Lints never block rendering. They flag tag and relation combinations
//! that are unusual in Coptic treebanks and recognise a few sentence
//! patterns worth pointing out to a reader.

use coptree_core::{label::Label, record::TokenRecord};
use coptree_parser::{
    SourceSentence,
    error::{Diagnostic, ErrorCode},
};

use crate::structure::DependencyTree;

const SUBJECT_TAGS: &[&str] = &["PRON", "NOUN", "PROPN"];
const PREDICATE_TAGS: &[&str] = &["VERB", "AUX"];
const NOMINAL_TAGS: &[&str] = &["NOUN", "PROPN"];
const CONTENT_TAGS: &[&str] = &[
    "VERB", "NOUN", "PRON", "PROPN", "DET", "ADJ", "ADV", "AUX", "NUM",
];

const INDEPENDENT_PRONOUNS: &[&str] = &[
    "ⲁⲛⲟⲕ", "ⲛⲧⲟⲕ", "ⲛⲧⲟ", "ⲛⲧⲟϥ", "ⲛⲧⲟⲥ", "ⲁⲛⲟⲛ", "ⲛⲧⲱⲧⲛ", "ⲛⲧⲟⲟⲩ",
];
const COPULAS: &[&str] = &["ⲡⲉ", "ⲧⲉ", "ⲛⲉ"];

/// A recognised sentence construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    /// Independent pronoun, copula and predicate as the first three tokens.
    TripartiteNominal {
        subject: u32,
        copula: u32,
        predicate: u32,
    },
}

impl Pattern {
    pub fn describe(&self) -> String {
        match self {
            Pattern::TripartiteNominal {
                subject,
                copula,
                predicate,
            } => format!(
                "tripartite nominal sentence: subject {subject}, copula {copula}, predicate {predicate}"
            ),
        }
    }
}

/// Runs every check over `tree`, returning warnings in surface order.
///
/// Labels point into `source` when it is given.
pub fn check(tree: &DependencyTree, source: Option<&SourceSentence>) -> Vec<Diagnostic> {
    if tree.is_placeholder() {
        return Vec::new();
    }

    let span_of = |index: u32| source.and_then(|s| s.span_of(index));
    let mut diagnostics = Vec::new();
    for (position, record) in tree.records().enumerate() {
        let Some(head) = tree.head_record(position) else {
            continue;
        };
        let relation = record.relation();
        let tag = record.pos_tag();
        let head_tag = head.pos_tag();

        let finding = if relation.is_one_of(&["nsubj", "csubj"])
            && (!tag.is_one_of(SUBJECT_TAGS) || !head_tag.is_one_of(PREDICATE_TAGS))
        {
            Some((ErrorCode::W300, None))
        } else if relation == "det"
            && (tag != "DET" || !head_tag.is_one_of(NOMINAL_TAGS))
        {
            Some((ErrorCode::W301, None))
        } else if relation == "punct" && tag.is_one_of(CONTENT_TAGS) {
            Some((ErrorCode::W302, suggest_relation(tag, head_tag)))
        } else {
            None
        };

        if let Some((code, suggestion)) = finding {
            let mut diag = Diagnostic::warning(message(code, record, head)).with_code(code);
            if let Some(span) = span_of(record.index()) {
                diag = diag.with_label(span, code.description());
            }
            if let Some(span) = span_of(head.index()) {
                diag = diag.with_secondary_label(span, "head");
            }
            if let Some(relation) = suggestion {
                diag = diag.with_help(format!("consider the relation `{relation}`"));
            }
            diagnostics.push(diag);
        }
    }
    diagnostics
}

fn message(code: ErrorCode, record: &TokenRecord, head: &TokenRecord) -> String {
    format!(
        "{}: {} ({}) --{}--> {} ({})",
        code.description(),
        record.form(),
        record.pos_tag(),
        record.relation(),
        head.form(),
        head.pos_tag()
    )
}

/// Suggests a relation for a dependent from its tag and its head's tag.
pub fn suggest_relation(tag: Label, head_tag: Label) -> Option<&'static str> {
    let relation = match tag.to_string().as_str() {
        "DET" => "det",
        "PRON" => "nsubj",
        "NOUN" if head_tag == "VERB" => "obj",
        "NOUN" if head_tag == "AUX" => "nsubj",
        "NOUN" => "obl",
        "VERB" if head_tag.is_one_of(&["SCONJ", "VERB"]) => "ccomp",
        "VERB" => "root",
        "AUX" => "cop",
        "ADJ" if head_tag == "NOUN" => "amod",
        "ADV" => "advmod",
        "NUM" if head_tag == "NOUN" => "nummod",
        "NUM" => "obl",
        _ => return None,
    };
    Some(relation)
}

/// Recognises constructions in `tree`.
pub fn patterns(tree: &DependencyTree) -> Vec<Pattern> {
    let mut found = Vec::new();
    if tree.is_placeholder() {
        return found;
    }
    let records: Vec<&TokenRecord> = tree.records().take(3).collect();
    if let [subject, copula, predicate] = records.as_slice() {
        if INDEPENDENT_PRONOUNS.contains(&subject.form()) && COPULAS.contains(&copula.form()) {
            found.push(Pattern::TripartiteNominal {
                subject: subject.index(),
                copula: copula.index(),
                predicate: predicate.index(),
            });
        }
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use coptree_core::record::SentenceBatch;
    use coptree_parser::{
        error::Severity,
        read_conllu,
        validate::{Validated, validate},
    };

    fn tree(records: Vec<TokenRecord>) -> DependencyTree {
        let Ok(Validated::Tree(batch)) = validate(SentenceBatch::new(records)) else {
            panic!("sentence is a tree");
        };
        DependencyTree::build(batch)
    }

    fn codes(diagnostics: &[Diagnostic]) -> Vec<Option<ErrorCode>> {
        diagnostics.iter().map(Diagnostic::code).collect()
    }

    #[test]
    fn test_well_formed_sentence_is_clean() {
        let tree = tree(vec![
            TokenRecord::new(1, "ⲁ", "ⲁ", "AUX", 3, "aux"),
            TokenRecord::new(2, "ⲡⲣⲱⲙⲉ", "ⲣⲱⲙⲉ", "NOUN", 3, "nsubj"),
            TokenRecord::new(3, "ⲥⲱⲧⲙ", "ⲥⲱⲧⲙ", "VERB", 0, "root"),
        ]);
        assert!(check(&tree, None).is_empty());
    }

    #[test]
    fn test_unusual_subject_and_determiner() {
        let tree = tree(vec![
            TokenRecord::new(1, "ⲡ", "ⲡ", "DET", 2, "det"),
            TokenRecord::new(2, "ⲣⲱⲙⲉ", "ⲣⲱⲙⲉ", "NOUN", 0, "root"),
            TokenRecord::new(3, "ⲛⲁⲛⲟⲩ", "ⲛⲁⲛⲟⲩ", "ADJ", 2, "nsubj"),
            TokenRecord::new(4, "ⲛ", "ⲛ", "ADP", 2, "det"),
        ]);
        let diagnostics = check(&tree, None);
        assert_eq!(
            codes(&diagnostics),
            vec![Some(ErrorCode::W300), Some(ErrorCode::W301)]
        );
        assert!(diagnostics.iter().all(|d| d.severity() == Severity::Warning));
        assert_eq!(
            diagnostics[0].message(),
            "unusual subject: ⲛⲁⲛⲟⲩ (ADJ) --nsubj--> ⲣⲱⲙⲉ (NOUN)"
        );
    }

    #[test]
    fn test_content_word_as_punct_gets_suggestion() {
        let tree = tree(vec![
            TokenRecord::new(1, "ⲁϥⲥⲱⲧⲙ", "ⲥⲱⲧⲙ", "VERB", 0, "root"),
            TokenRecord::new(2, "ⲡⲣⲱⲙⲉ", "ⲣⲱⲙⲉ", "NOUN", 1, "punct"),
            TokenRecord::new(3, ".", ".", "PUNCT", 1, "punct"),
        ]);
        let diagnostics = check(&tree, None);
        assert_eq!(codes(&diagnostics), vec![Some(ErrorCode::W302)]);
        assert_eq!(diagnostics[0].help(), Some("consider the relation `obj`"));
    }

    #[test]
    fn test_suggest_relation() {
        let cases = [
            ("DET", "NOUN", Some("det")),
            ("NOUN", "VERB", Some("obj")),
            ("NOUN", "AUX", Some("nsubj")),
            ("NOUN", "ADP", Some("obl")),
            ("VERB", "SCONJ", Some("ccomp")),
            ("VERB", "NOUN", Some("root")),
            ("ADJ", "NOUN", Some("amod")),
            ("ADJ", "VERB", None),
            ("NUM", "NOUN", Some("nummod")),
            ("NUM", "VERB", Some("obl")),
        ];
        for (tag, head_tag, expected) in cases {
            assert_eq!(
                suggest_relation(tag.into(), head_tag.into()),
                expected,
                "{tag} under {head_tag}"
            );
        }
    }

    #[test]
    fn test_labels_point_into_source() {
        let source = "1\tⲡⲉ\tⲡⲉ\tAUX\t_\t_\t0\troot\t_\t_\n\
                      2\tϩⲓ\tϩⲓ\tADP\t_\t_\t1\tnsubj\t_\t_\n";
        let sentences = read_conllu(source).unwrap();
        let Ok(Validated::Tree(batch)) = validate(sentences[0].batch().clone()) else {
            panic!("sentence is a tree");
        };
        let tree = DependencyTree::build(batch);
        let diagnostics = check(&tree, Some(&sentences[0]));
        assert_eq!(diagnostics.len(), 1);
        let labels = diagnostics[0].labels();
        assert_eq!(labels.len(), 2);
        assert!(labels[0].is_primary());
        assert_eq!(labels[0].span(), sentences[0].span_of(2).unwrap());
    }

    #[test]
    fn test_tripartite_pattern() {
        let tree = tree(vec![
            TokenRecord::new(1, "ⲁⲛⲟⲕ", "ⲁⲛⲟⲕ", "PRON", 2, "nsubj"),
            TokenRecord::new(2, "ⲡⲉ", "ⲡⲉ", "AUX", 0, "root"),
            TokenRecord::new(3, "ⲡⲛⲟⲩⲧⲉ", "ⲛⲟⲩⲧⲉ", "NOUN", 2, "nsubj"),
        ]);
        let found = patterns(&tree);
        assert_eq!(
            found,
            vec![Pattern::TripartiteNominal {
                subject: 1,
                copula: 2,
                predicate: 3
            }]
        );
        assert!(found[0].describe().starts_with("tripartite nominal sentence"));
    }

    #[test]
    fn test_placeholder_has_no_findings() {
        let tree = DependencyTree::placeholder(&SentenceBatch::default());
        assert!(check(&tree, None).is_empty());
        assert!(patterns(&tree).is_empty());
    }
}
