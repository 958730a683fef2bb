//! The reader interface and its in-memory implementation.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{ReaderError, ReaderResult};
use crate::records::{
    ConstituencyTree, CorefChainRecord, DependencyRecord, EntityRecord, TermRecord, WordRecord,
};

/// Record accessors over one parsed annotation document.
pub trait AnnotationReader {
    fn words(&self) -> &[WordRecord];

    fn terms(&self) -> &[TermRecord];

    fn entities(&self) -> &[EntityRecord];

    fn coreference_chains(&self) -> &[CorefChainRecord];

    fn dependencies(&self) -> &[DependencyRecord];

    /// Constituency trees, one per sentence, in document order.
    fn constituency_trees(&self) -> &[ConstituencyTree];
}

/// All records of one document, held in memory.
///
/// Every layer is optional in the serialized form so fixtures only need to
/// spell out what they exercise.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSet {
    #[serde(default)]
    pub words: Vec<WordRecord>,
    #[serde(default)]
    pub terms: Vec<TermRecord>,
    #[serde(default)]
    pub entities: Vec<EntityRecord>,
    #[serde(default)]
    pub coreference_chains: Vec<CorefChainRecord>,
    #[serde(default)]
    pub dependencies: Vec<DependencyRecord>,
    #[serde(default)]
    pub constituency_trees: Vec<ConstituencyTree>,
}

impl RecordSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a RON record document.
    pub fn from_ron_str(input: &str) -> ReaderResult<Self> {
        ron::from_str(input).map_err(|e| ReaderError::Parse {
            message: e.to_string(),
        })
    }

    /// Load a RON record document from disk.
    pub fn load(path: &Path) -> ReaderResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| ReaderError::Load {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_ron_str(&content)
    }
}

impl AnnotationReader for RecordSet {
    fn words(&self) -> &[WordRecord] {
        &self.words
    }

    fn terms(&self) -> &[TermRecord] {
        &self.terms
    }

    fn entities(&self) -> &[EntityRecord] {
        &self.entities
    }

    fn coreference_chains(&self) -> &[CorefChainRecord] {
        &self.coreference_chains
    }

    fn dependencies(&self) -> &[DependencyRecord] {
        &self.dependencies
    }

    fn constituency_trees(&self) -> &[ConstituencyTree] {
        &self.constituency_trees
    }
}

impl<R: AnnotationReader + ?Sized> AnnotationReader for &R {
    fn words(&self) -> &[WordRecord] {
        (**self).words()
    }

    fn terms(&self) -> &[TermRecord] {
        (**self).terms()
    }

    fn entities(&self) -> &[EntityRecord] {
        (**self).entities()
    }

    fn coreference_chains(&self) -> &[CorefChainRecord] {
        (**self).coreference_chains()
    }

    fn dependencies(&self) -> &[DependencyRecord] {
        (**self).dependencies()
    }

    fn constituency_trees(&self) -> &[ConstituencyTree] {
        (**self).constituency_trees()
    }
}
