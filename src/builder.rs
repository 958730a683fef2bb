//! Document-level orchestration.
//!
//! A [`GraphBuilder`] turns one annotated document at a time into graph
//! nodes: word nodes first, then entity and gold mentions, dependencies, and
//! finally one tree per sentence. Per-document state is reset at the start
//! of every [`GraphBuilder::process_document`] call; statistics accumulate.

use layered_graph_reader::{AnnotationReader, ConstituencyTree, Dialect, RecordSet};

use crate::config::BuilderConfig;
use crate::dependencies::link_dependencies;
use crate::error::{GraphError, GraphResult};
use crate::graph::{Graph, Node, NodeId, SentenceNode};
use crate::mentions::{index_entities, index_gold_mentions, MentionIndex};
use crate::penn::parse_tree;
use crate::syntax::{penn, worklist, SentenceContext, WordCursor};
use crate::terms::{extract_terms, TermIndex};

/// Records of one document plus its optional raw side streams.
#[derive(Debug, Clone, Default)]
pub struct AnnotatedDocument<R = RecordSet> {
    pub records: R,
    /// Newline-delimited bracketed trees, one sentence per line
    pub sentences: Option<String>,
    /// Newline-delimited speaker labels, one per term
    pub speakers: Option<String>,
}

impl<R: AnnotationReader> AnnotatedDocument<R> {
    pub fn new(records: R) -> Self {
        Self {
            records,
            sentences: None,
            speakers: None,
        }
    }

    pub fn with_sentences(mut self, sentences: impl Into<String>) -> Self {
        self.sentences = Some(sentences.into());
        self
    }

    pub fn with_speakers(mut self, speakers: impl Into<String>) -> Self {
        self.speakers = Some(speakers.into());
        self
    }
}

/// The syntactic description of one sentence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SentenceInput {
    /// A bracketed Penn Treebank string
    Penn(String),
    /// Flat constituency records from the document itself
    Constituency(ConstituencyTree),
}

/// Running totals over every document processed by one builder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildStatistics {
    pub documents: usize,
    pub words: usize,
    pub sentences: usize,
    /// Words attached to sentence trees
    pub leaves: usize,
    /// Constituents created, collapsed ones included
    pub constituents: usize,
    /// Single-word constituents replaced by their word
    pub collapsed: usize,
    pub dependencies: usize,
}

#[derive(Debug, Default)]
struct DocumentState {
    terms: TermIndex,
    entities: MentionIndex,
    gold: MentionIndex,
    cursor: WordCursor,
    sentence_order: usize,
}

/// Builds document graphs from annotation records.
///
/// ```
/// use layered_graph::{AnnotatedDocument, BuilderConfig, GraphBuilder};
/// use layered_graph_reader::RecordSet;
///
/// let records = RecordSet::from_ron_str(
///     r#"(
///         words: [(id: "w1", text: "Hello", offset: 0, length: 5)],
///         terms: [(id: "t1", morphofeat: "UH", words: ["w1"])],
///     )"#,
/// )
/// .unwrap();
/// let document = AnnotatedDocument::new(records).with_sentences("(UH Hello)");
///
/// let mut builder = GraphBuilder::new(BuilderConfig::default()).unwrap();
/// let graph = builder.build(&document).unwrap();
/// assert_eq!(builder.statistics().sentences, 1);
/// assert!(graph.node_by_name("S1").is_some());
/// ```
#[derive(Debug)]
pub struct GraphBuilder {
    config: BuilderConfig,
    dialect: Dialect,
    statistics: BuildStatistics,
    document: DocumentState,
}

impl GraphBuilder {
    /// Fails with [`GraphError::UnknownDialect`] for anything but KAF or NAF.
    pub fn new(config: BuilderConfig) -> GraphResult<Self> {
        let dialect = Dialect::from_name(&config.dialect).map_err(|_| GraphError::UnknownDialect {
            name: config.dialect.clone(),
        })?;
        Ok(Self {
            config,
            dialect,
            statistics: BuildStatistics::default(),
            document: DocumentState::default(),
        })
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn statistics(&self) -> BuildStatistics {
        self.statistics
    }

    /// Word node of a term of the current document.
    pub fn term(&self, term_id: &str) -> Option<NodeId> {
        self.document.terms.get(term_id)
    }

    /// Word node covering a word of the current document.
    pub fn term_by_word(&self, word_id: &str) -> Option<NodeId> {
        self.document.terms.get_by_word(word_id)
    }

    /// Word nodes of the current document, in document order.
    pub fn words(&self) -> &[NodeId] {
        &self.document.terms.pool
    }

    pub fn entities_at(&self, word: NodeId) -> &[NodeId] {
        self.document.entities.starting_at(word)
    }

    pub fn gold_mentions_at(&self, word: NodeId) -> &[NodeId] {
        self.document.gold.starting_at(word)
    }

    /// Create word, mention and dependency structure for `document`.
    ///
    /// Sentence trees are built separately, see [`Self::sentences`] and
    /// [`Self::process_sentence`].
    pub fn process_document<R: AnnotationReader>(
        &mut self,
        graph: &mut Graph,
        document: &AnnotatedDocument<R>,
    ) -> GraphResult<()> {
        self.document = DocumentState::default();
        let reader = &document.records;

        let terms = extract_terms(graph, reader, self.dialect, document.speakers.as_deref())?;
        let entities = index_entities(graph, reader, &terms, self.dialect)?;
        let gold = index_gold_mentions(graph, reader, &terms)?;
        let dependencies = link_dependencies(graph, reader, &terms, self.dialect)?;

        log::debug!(
            "Document: {} words, {} entity mentions, {} gold mentions, {} dependencies",
            terms.len(),
            entities.len(),
            gold.len(),
            dependencies
        );

        self.statistics.documents += 1;
        self.statistics.words += terms.len();
        self.statistics.dependencies += dependencies;
        self.document.terms = terms;
        self.document.entities = entities;
        self.document.gold = gold;
        Ok(())
    }

    /// Sentence inputs of `document`: the segmentation text when present,
    /// the document's constituency trees otherwise.
    pub fn sentences<R: AnnotationReader>(&self, document: &AnnotatedDocument<R>) -> Vec<SentenceInput> {
        match &document.sentences {
            Some(text) => text
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(|line| SentenceInput::Penn(line.to_string()))
                .collect(),
            None => document
                .records
                .constituency_trees()
                .iter()
                .cloned()
                .map(SentenceInput::Constituency)
                .collect(),
        }
    }

    /// Build the tree of one sentence and return its sentence node.
    pub fn process_sentence(
        &mut self,
        graph: &mut Graph,
        sentence: &SentenceInput,
        namespace: &str,
    ) -> GraphResult<NodeId> {
        self.document.sentence_order += 1;
        self.statistics.sentences += 1;
        let root = graph.add_node(Node::Sentence(SentenceNode {
            id: namespace.to_string(),
            label: namespace.to_string(),
            sentence_order: self.document.sentence_order,
            ..Default::default()
        }));

        let mut ctx = SentenceContext {
            sentence: root,
            sentence_order: self.document.sentence_order,
            tagset: &self.config.tagset,
            entities: &self.document.entities,
            gold: &self.document.gold,
            stats: &mut self.statistics,
        };
        let head = match sentence {
            SentenceInput::Penn(text) => {
                let tree = parse_tree(text)?;
                penn::reconstruct(
                    graph,
                    &mut ctx,
                    &mut self.document.cursor,
                    &self.document.terms.pool,
                    &tree,
                )?
            }
            SentenceInput::Constituency(tree) => worklist::reconstruct(
                graph,
                &mut ctx,
                tree,
                &self.document.terms,
                self.config.secure_tree,
            )?,
        };

        log::debug!(
            "Sentence {} ({}): head {}",
            self.document.sentence_order,
            namespace,
            graph.node(head).name()
        );
        Ok(root)
    }

    /// Build the full graph of `document`, naming sentences `S1`, `S2`, ...
    pub fn build<R: AnnotationReader>(&mut self, document: &AnnotatedDocument<R>) -> GraphResult<Graph> {
        let mut graph = Graph::new();
        self.process_document(&mut graph, document)?;
        for (idx, sentence) in self.sentences(document).iter().enumerate() {
            self.process_sentence(&mut graph, sentence, &format!("S{}", idx + 1))?;
        }
        Ok(graph)
    }
}
