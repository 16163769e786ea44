//! Render adapters for Coptree sentences.
//!
//! This module provides the [`Exporter`] trait, implemented by every
//! adapter that turns one laid-out tree into an output format, and the
//! document-level writers built on top of them.
//!
//! # Pipeline Position
//!
//! ```text
//! CoNLL-U text
//!     ↓ read + validate
//! Token records
//!     ↓ build
//! Dependency tree
//!     ↓ layout
//! Grid cells (TreeLayout)
//!     ↓ export (this module)
//! Outline / graph description / table / SVG / CoNLL-U
//! ```
//!
//! # Available Adapters
//!
//! - [`text`] - column-aligned outline, one line per token
//! - [`graph`] - node positions and child→head edges, serialisable to JSON
//! - [`table`] - rows with depth levels, rendered as an HTML table
//! - [`svg`] - drawing of the graph description
//! - [`conllu`] - CoNLL-U round trip of the table fields
//!
//! [`html`] assembles table output into a standalone HTML document.
//!
//! All adapters agree on token order (surface order) and on the values of
//! the shared fields.
//!
//! # Error Handling
//!
//! Export operations return [`Error`], covering rendering failures and I/O
//! errors. [`Error`] converts into [`CoptreeError::Export`] at the crate
//! boundary.
//!
//! [`CoptreeError::Export`]: crate::CoptreeError::Export

pub mod conllu;
pub mod graph;
pub mod html;
pub mod svg;
pub mod table;
pub mod text;

use std::{fs, path::Path};

use log::{error, info};

use crate::{layout::TreeLayout, structure::DependencyTree};

/// Abstraction over the render adapters.
///
/// Implementors are pure: exporting the same tree and layout twice gives
/// the same output.
pub trait Exporter {
    /// The rendered form of one sentence.
    type Output;

    /// Renders `tree` using the cells of `layout`.
    ///
    /// # Arguments
    ///
    /// * `tree` - The sentence to render.
    /// * `layout` - Grid cells of `tree`, indexed by surface position.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the tree cannot be converted to the
    /// target format.
    fn export_tree(&self, tree: &DependencyTree, layout: &TreeLayout)
    -> Result<Self::Output, Error>;
}

/// Errors that can occur during export.
///
/// This type is converted into [`CoptreeError::Export`] at the crate
/// boundary via the [`From`] implementation in [`crate::error`].
///
/// [`CoptreeError::Export`]: crate::CoptreeError::Export
#[derive(Debug)]
pub enum Error {
    /// A rendering or conversion failure described by `message`.
    Render(String),
    /// An I/O error encountered while writing output.
    Io(std::io::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Render(msg) => write!(f, "Render error: {msg}"),
            Self::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Render(_) => None,
            Self::Io(err) => Some(err),
        }
    }
}

/// Writes rendered output to `path`, replacing any existing file.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be written.
pub fn write_output(path: impl AsRef<Path>, contents: &str) -> Result<(), Error> {
    let path = path.as_ref();
    info!(file_name:% = path.display(); "Writing output file");
    fs::write(path, contents).map_err(|err| {
        error!(file_name:% = path.display(), err:err = err; "Failed to write output file");
        Error::Io(err)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            Error::Render("no nodes".to_string()).to_string(),
            "Render error: no nodes"
        );
        let io = Error::Io(std::io::Error::other("disk full"));
        assert_eq!(io.to_string(), "I/O error: disk full");
        assert!(std::error::Error::source(&io).is_some());
    }

    #[test]
    fn test_write_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sentence.txt");
        write_output(&path, "ⲁⲛⲟⲕ ⲡⲉ").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "ⲁⲛⲟⲕ ⲡⲉ");

        let missing = dir.path().join("missing").join("sentence.txt");
        assert!(matches!(write_output(missing, ""), Err(Error::Io(_))));
    }
}
