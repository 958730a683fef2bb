//! Attributed document graphs from KAF / NAF annotation records.
//!
//! A [`GraphBuilder`] reads one annotated document through an
//! [`AnnotationReader`](layered_graph_reader::AnnotationReader) and populates
//! a [`Graph`] with word nodes, entity and coreference mentions, dependency
//! edges and one syntax tree per sentence.
//!
//! ## Components
//!
//! - [`terms`] - Word nodes, speakers, utterances and quotation scopes
//! - [`mentions`] - Named-entity and gold-mention indexing
//! - [`dependencies`] - Labelled dependency edges
//! - [`syntax::penn`] - Trees from bracketed Penn Treebank strings
//! - [`syntax::worklist`] - Trees from flat constituency records
//! - [`text`] - Surface-form aggregation
//!
//! ## Supporting Modules
//!
//! - [`graph`] - The node arena, edge kinds and [`TreeDisplay`]
//! - [`penn`] - Bracketed tree parsing
//! - [`tagset`] - Root, head and named-entity tag conventions
//! - [`config`] - [`BuilderConfig`], loadable from TOML
//!
//! ## Example
//!
//! ```
//! use layered_graph::{AnnotatedDocument, BuilderConfig, GraphBuilder, TreeDisplay};
//! use layered_graph_reader::RecordSet;
//!
//! let records = RecordSet::from_ron_str(
//!     r#"(
//!         words: [
//!             (id: "w1", text: "Dogs", offset: 0, length: 4),
//!             (id: "w2", text: "bark", offset: 5, length: 4),
//!         ],
//!         terms: [
//!             (id: "t1", morphofeat: "NNS", lemma: Some("dog"), words: ["w1"]),
//!             (id: "t2", morphofeat: "VBP", words: ["w2"]),
//!         ],
//!     )"#,
//! )
//! .unwrap();
//! let document = AnnotatedDocument::new(records).with_sentences("(S (NNS=H Dogs) (VBP bark))");
//!
//! let mut builder = GraphBuilder::new(BuilderConfig::default()).unwrap();
//! let graph = builder.build(&document).unwrap();
//! let sentence = graph.node_by_name("S1").unwrap();
//! println!("{}", TreeDisplay::new(&graph, sentence));
//! ```

mod builder;
pub mod config;
pub mod dependencies;
mod error;
pub mod graph;
pub mod mentions;
pub mod penn;
pub mod syntax;
pub mod tagset;
pub mod terms;
pub mod text;

pub use builder::{AnnotatedDocument, BuildStatistics, GraphBuilder, SentenceInput};
pub use config::BuilderConfig;
pub use error::{GraphError, GraphResult};
pub use graph::{
    ConstituentNode, DocType, Edge, EdgeKind, Graph, MentionNode, MentionSource, Node, NodeId,
    NodeKind, NodeStatus, OrdSpan, SentenceNode, TreeDisplay, WordNode,
};
pub use tagset::{Tagset, TreeLabel};

#[cfg(test)]
mod tests {
    mod fixtures;

    mod dependencies;
    mod mentions;
    mod penn;
    mod terms;
    mod worklist;
}
