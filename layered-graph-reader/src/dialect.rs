//! Identifier conventions of the supported annotation schemas.
//!
//! The graph builder never inspects identifiers directly: every step that
//! needs to tell a word reference from a term reference, or to compute the
//! order of a word, asks the [`Dialect`] it was handed.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ReaderError;

/// Annotation schema dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dialect {
    /// KYOTO Annotation Format
    Kaf,
    /// NLP Annotation Format
    Naf,
}

impl Dialect {
    /// Case-insensitive lookup of `KAF` or `NAF`.
    pub fn from_name(name: &str) -> Result<Self, ReaderError> {
        name.parse()
    }

    pub fn name(self) -> &'static str {
        match self {
            Dialect::Kaf => "KAF",
            Dialect::Naf => "NAF",
        }
    }

    /// Leading character of word identifiers.
    pub fn word_marker(self) -> char {
        'w'
    }

    /// Prefix of term identifiers.
    pub fn term_prefix(self) -> &'static str {
        "t"
    }

    /// True when `id` refers to a word rather than a term.
    ///
    /// Dependencies produced by Stanford-style converters point at words.
    pub fn is_word_reference(self, id: &str) -> bool {
        id.starts_with(self.word_marker())
    }

    /// Numeric part of an identifier (`w12` -> 12).
    pub fn numeric_part(self, id: &str) -> Option<usize> {
        id.get(1..)?.parse().ok()
    }

    /// Identifier of the term that follows `term_id` in document order.
    pub fn successor_term_id(self, term_id: &str) -> Option<String> {
        let number = self.numeric_part(term_id)?;
        Some(format!("{}{}", self.term_prefix(), number + 1))
    }
}

impl FromStr for Dialect {
    type Err = ReaderError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.trim().to_ascii_uppercase().as_str() {
            "KAF" => Ok(Dialect::Kaf),
            "NAF" => Ok(Dialect::Naf),
            _ => Err(ReaderError::UnknownDialect {
                name: name.to_string(),
            }),
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
