//! Record types produced by an annotation reader.
//!
//! Identifiers are kept as the strings found in the source document
//! (`w1`, `t1`, `n3`, ...). Resolving them is the graph builder's job.

use serde::{Deserialize, Serialize};

/// A surface token of the text layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordRecord {
    pub id: String,
    pub text: String,
    /// Character offset of the first character
    pub offset: usize,
    /// Length in characters
    pub length: usize,
}

impl WordRecord {
    /// Create a word whose length is the character count of `text`.
    pub fn new(id: impl Into<String>, text: impl Into<String>, offset: usize) -> Self {
        let text = text.into();
        let length = text.chars().count();
        Self {
            id: id.into(),
            text,
            offset,
            length,
        }
    }
}

/// A term: one or more words with morphological information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermRecord {
    pub id: String,
    /// Part-of-speech tag (Penn Treebank tagging)
    pub morphofeat: String,
    /// Lemma, `"-"` or absent when the tagger produced none
    #[serde(default)]
    pub lemma: Option<String>,
    /// Ids of the covered words
    pub words: Vec<String>,
}

impl TermRecord {
    pub fn new(id: impl Into<String>, morphofeat: impl Into<String>, words: Vec<String>) -> Self {
        Self {
            id: id.into(),
            morphofeat: morphofeat.into(),
            lemma: None,
            words,
        }
    }

    pub fn with_lemma(mut self, lemma: impl Into<String>) -> Self {
        self.lemma = Some(lemma.into());
        self
    }
}

/// A named entity with one or more references, each a list of term ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRecord {
    pub id: String,
    pub entity_type: String,
    pub references: Vec<Vec<String>>,
}

/// A coreference chain; each mention is a list of term ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorefChainRecord {
    pub id: String,
    pub mentions: Vec<Vec<String>>,
}

/// A dependency between two terms (or two words, for Stanford-style output).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyRecord {
    pub from: String,
    pub to: String,
    pub function: String,
}

impl DependencyRecord {
    pub fn new(from: impl Into<String>, to: impl Into<String>, function: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            function: function.into(),
        }
    }
}

/// A non-terminal constituency node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NonTerminalRecord {
    pub id: String,
    pub label: String,
}

/// A terminal constituency node spanning one or more terms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerminalRecord {
    pub id: String,
    pub terms: Vec<String>,
}

/// A constituency edge, directed from child (`from`) to parent (`to`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeEdgeRecord {
    pub from: String,
    pub to: String,
    #[serde(default)]
    pub head: bool,
}

impl TreeEdgeRecord {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            head: false,
        }
    }

    pub fn head(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            head: true,
            ..Self::new(from, to)
        }
    }
}

/// The constituency layer of one sentence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstituencyTree {
    #[serde(default)]
    pub non_terminals: Vec<NonTerminalRecord>,
    #[serde(default)]
    pub terminals: Vec<TerminalRecord>,
    #[serde(default)]
    pub edges: Vec<TreeEdgeRecord>,
}

impl ConstituencyTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn non_terminal(mut self, id: &str, label: &str) -> Self {
        self.non_terminals.push(NonTerminalRecord {
            id: id.to_string(),
            label: label.to_string(),
        });
        self
    }

    pub fn terminal(mut self, id: &str, terms: &[&str]) -> Self {
        self.terminals.push(TerminalRecord {
            id: id.to_string(),
            terms: terms.iter().map(|t| t.to_string()).collect(),
        });
        self
    }

    pub fn edge(mut self, edge: TreeEdgeRecord) -> Self {
        self.edges.push(edge);
        self
    }
}
