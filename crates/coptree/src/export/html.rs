//! Standalone HTML document export.

use std::fmt::Write;

use super::table::Table;
use crate::navigator::{DocumentStats, UnparseableSentence};

const STYLE: &str = "\
body { font-family: 'Antinoou', 'Noto Sans Coptic', sans-serif; margin: 2em; }
.stats { color: #555; }
.sentence { margin-bottom: 2em; }
.sentence-text { font-size: 1.2em; }
.dependency-table { border-collapse: collapse; }
.dependency-table th, .dependency-table td { border: 1px solid #ccc; padding: 4px 8px; }
.dependency-table tr.root { background: #fff3c4; font-weight: bold; }
.unparseable { color: #a00; }
";

/// Escapes text for use in HTML element content and attribute values.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Builder for an HTML page holding every sentence of a document.
///
/// Sentences are appended in document order; unparseable ones are shown
/// with their error in place of a table.
#[derive(Debug, Clone)]
pub struct HtmlDocument {
    title: String,
    stats: Option<DocumentStats>,
    body: String,
}

impl HtmlDocument {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            stats: None,
            body: String::new(),
        }
    }

    /// Adds a statistics header.
    pub fn with_stats(mut self, stats: DocumentStats) -> Self {
        self.stats = Some(stats);
        self
    }

    /// Appends sentence `number` (one-based).
    pub fn push_table(&mut self, number: usize, table: &Table) {
        self.body.push_str("<section class=\"sentence\">\n");
        self.push_heading(number, table.id.as_deref());
        if !table.text.is_empty() {
            let _ = writeln!(
                self.body,
                "<p class=\"sentence-text\">{}</p>",
                escape(&table.text)
            );
        }
        self.body.push_str(&table.to_html());
        self.body.push_str("</section>\n");
    }

    pub fn push_unparseable(&mut self, sentence: &UnparseableSentence) {
        self.body.push_str("<section class=\"sentence\">\n");
        self.push_heading(sentence.number(), sentence.batch().id());
        let _ = writeln!(
            self.body,
            "<p class=\"unparseable\">{}</p>\n</section>",
            escape(&sentence.to_string())
        );
    }

    fn push_heading(&mut self, number: usize, id: Option<&str>) {
        match id {
            Some(id) => {
                let _ = writeln!(
                    self.body,
                    "<h2>Sentence {number} <small>{}</small></h2>",
                    escape(id)
                );
            }
            None => {
                let _ = writeln!(self.body, "<h2>Sentence {number}</h2>");
            }
        }
    }

    /// Completes the page.
    pub fn finish(self) -> String {
        let title = escape(&self.title);
        let mut html = String::new();
        html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
        let _ = writeln!(html, "<title>{title}</title>");
        let _ = writeln!(html, "<style>\n{STYLE}</style>\n</head>\n<body>");
        let _ = writeln!(html, "<h1>{title}</h1>");
        if let Some(stats) = self.stats {
            let _ = writeln!(
                html,
                "<p class=\"stats\">Sentences: {} | Tokens: {} | Unparseable: {}</p>",
                stats.sentences, stats.tokens, stats.unparseable
            );
        }
        html.push_str(&self.body);
        html.push_str("</body>\n</html>\n");
        html
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigator::SentenceEntry;
    use coptree_core::record::{SentenceBatch, TokenRecord};

    #[test]
    fn test_escape() {
        assert_eq!(escape("ⲁ<ⲃ> & \"ⲅ\" 'ⲇ'"), "ⲁ&lt;ⲃ&gt; &amp; &quot;ⲅ&quot; &#39;ⲇ&#39;");
        assert_eq!(escape("ⲡⲛⲟⲩⲧⲉ"), "ⲡⲛⲟⲩⲧⲉ");
    }

    #[test]
    fn test_document_with_stats_and_placeholder() {
        let batch = SentenceBatch::new(vec![TokenRecord::new(1, "ⲁ", "ⲁ", "X", 5, "dep")]);
        let SentenceEntry::Unparseable(sentence) = SentenceEntry::from_batch(2, batch) else {
            panic!("sentence has no root");
        };

        let table = Table {
            id: Some("s1".to_string()),
            text: "ⲁⲙⲏⲛ".to_string(),
            rows: Vec::new(),
        };
        let mut document = HtmlDocument::new("Shenoute <Canons>").with_stats(DocumentStats {
            sentences: 2,
            tokens: 1,
            unparseable: 1,
            empty: 0,
        });
        document.push_table(1, &table);
        document.push_unparseable(&sentence);
        let html = document.finish();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Shenoute &lt;Canons&gt;</title>"));
        assert!(html.contains("Sentences: 2 | Tokens: 1 | Unparseable: 1"));
        assert!(html.contains("<h2>Sentence 1 <small>s1</small></h2>"));
        assert!(html.contains("<p class=\"sentence-text\">ⲁⲙⲏⲛ</p>"));
        assert!(html.contains("sentence 2 could not be parsed: sentence has 0 roots"));
        assert!(html.trim_end().ends_with("</html>"));
    }
}
