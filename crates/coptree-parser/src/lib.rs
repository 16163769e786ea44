//! # Coptree Parser
//!
//! Input processing for Coptic dependency annotations: reading the tagging
//! and parsing collaborator's CoNLL-U output, segmenting raw text into
//! sentences, and validating each sentence's token records before a tree
//! is built from them.
//!
//! ## Usage
//!
//! ```
//! use coptree_parser::{read_conllu, validate::{Validated, validate}};
//!
//! let source = "1\tⲁⲛⲟⲕ\tⲁⲛⲟⲕ\tPRON\t_\t_\t2\tnsubj\t_\t_\n\
//!               2\tⲡⲉ\tⲡⲉ\tAUX\t_\t_\t0\troot\t_\t_\n";
//!
//! for sentence in read_conllu(source).unwrap() {
//!     assert!(matches!(validate(sentence.into_batch()), Ok(Validated::Tree(_))));
//! }
//! ```

mod conllu;
pub mod error;
pub mod segment;
mod span;
pub mod validate;

pub use conllu::{SourceSentence, read_batches, read_conllu};
pub use span::Span;
