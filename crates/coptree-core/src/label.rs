//! Open-vocabulary labels backed by string interning
//!
//! Part-of-speech tags and dependency relations come from an upstream model
//! that may emit any string. This module provides the [`Label`] type, which
//! keeps those values as opaque strings while making copies and comparisons
//! cheap.

use std::{
    fmt,
    sync::{Mutex, MutexGuard, OnceLock, PoisonError},
};

use serde::{Serialize, Serializer};
use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner shared by every [`Label`].
///
/// # Thread Safety
///
/// This uses `Mutex` for thread-safe access to the string interner.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn interner() -> MutexGuard<'static, DefaultStringInterner> {
    INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        // The interner is append-only, so a poisoned lock still holds valid data.
        .unwrap_or_else(PoisonError::into_inner)
}

/// An interned tag or relation label
///
/// The core never assumes a fixed tag inventory: `"NOUN"`, `"nsubj"` and
/// `"nsubj:pass"` are all just labels.
///
/// # Examples
///
/// ```
/// use coptree_core::label::Label;
///
/// let tag = Label::new("PRON");
/// let relation: Label = "nsubj".into();
///
/// assert_eq!(tag, "PRON");
/// assert_eq!(relation.to_string(), "nsubj");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Label(DefaultSymbol);

impl Label {
    /// Creates a `Label` from &str.
    pub fn new(name: &str) -> Self {
        Self(interner().get_or_intern(name))
    }

    /// Returns `true` if this label equals any of the given names.
    ///
    /// # Examples
    ///
    /// ```
    /// use coptree_core::label::Label;
    ///
    /// let tag = Label::new("PROPN");
    /// assert!(tag.is_one_of(&["NOUN", "PROPN"]));
    /// assert!(!tag.is_one_of(&["VERB"]));
    /// ```
    pub fn is_one_of(&self, names: &[&str]) -> bool {
        let interner = interner();
        interner
            .resolve(self.0)
            .is_some_and(|value| names.contains(&value))
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let interner = interner();
        f.write_str(interner.resolve(self.0).unwrap_or_default())
    }
}

impl From<&str> for Label {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for Label {
    /// Allows direct comparison with string slices: `label == "string"`
    fn eq(&self, other: &str) -> bool {
        let interner = interner();
        interner.resolve(self.0) == Some(other)
    }
}

impl PartialEq<&str> for Label {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl Serialize for Label {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
