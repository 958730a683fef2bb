//! Constituent tag taxonomy and tree-label conventions.
//!
//! Bracketed trees mark heads with a suffix on the node label (`NP=H`,
//! `NP-H`) and inline named entities with a separator (`NNP|PERSON`).
//! Worklist trees identify their root by tag.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

static PENN: Lazy<Tagset> = Lazy::new(|| Tagset {
    root_tags: vec!["ROOT".into(), "TOP".into()],
    ner_constituent_tags: vec!["NE".into(), "NER".into(), "ENAMEX".into()],
    head_markers: vec!["=H".into(), "-H".into()],
    ner_separator: "|".into(),
});

/// Tag classification used while reconstructing trees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tagset {
    /// Tags of the designated root of a constituency tree
    pub root_tags: Vec<String>,
    /// Constituent tags that denote a named-entity mention
    pub ner_constituent_tags: Vec<String>,
    /// Label suffixes marking the head child of a constituent
    pub head_markers: Vec<String>,
    /// Separator between a label and its inline entity type
    pub ner_separator: String,
}

impl Default for Tagset {
    fn default() -> Self {
        PENN.clone()
    }
}

/// A tree label split into its parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeLabel {
    /// Syntactic category with markers removed
    pub tag: String,
    pub is_head: bool,
    pub ner: Option<String>,
}

impl Tagset {
    /// The Penn Treebank conventions.
    pub fn penn() -> &'static Tagset {
        &PENN
    }

    pub fn is_root(&self, tag: &str) -> bool {
        self.root_tags.iter().any(|t| t == tag)
    }

    pub fn is_ner_constituent(&self, tag: &str) -> bool {
        self.ner_constituent_tags.iter().any(|t| t == tag)
    }

    /// Split `NP=H|PERSON` style labels.
    ///
    /// The head marker is recognised as a suffix of either part; the entity
    /// type is the text after the last separator.
    pub fn parse_label(&self, label: &str) -> TreeLabel {
        let (tag_part, ner_part) = if self.ner_separator.is_empty() {
            (label, None)
        } else {
            match label.split_once(self.ner_separator.as_str()) {
                Some((tag, rest)) => (tag, rest.rsplit(self.ner_separator.as_str()).next()),
                None => (label, None),
            }
        };

        let (tag, head_on_tag) = self.strip_head_marker(tag_part);
        let (ner, head_on_ner) = match ner_part {
            Some(ner) => {
                let (ner, is_head) = self.strip_head_marker(ner);
                let ner = if ner.is_empty() { None } else { Some(ner.to_string()) };
                (ner, is_head)
            }
            None => (None, false),
        };

        TreeLabel {
            tag: tag.to_string(),
            is_head: head_on_tag || head_on_ner,
            ner,
        }
    }

    fn strip_head_marker<'a>(&self, text: &'a str) -> (&'a str, bool) {
        for marker in &self.head_markers {
            if let Some(stripped) = text.strip_suffix(marker.as_str()) {
                return (stripped, true);
            }
        }
        (text, false)
    }
}
