//! Error types for graph construction.

use layered_graph_reader::ReaderError;
use thiserror::Error;

use crate::graph::NodeId;

/// Errors that abort the construction of a document graph.
///
/// Recoverable input problems (unbalanced quotes, missing head markers, a
/// worklist tree without a root) are logged and never surface here.
#[derive(Debug, Error)]
pub enum GraphError {
    /// The configured dialect is not KAF or NAF.
    #[error("unknown annotation dialect: {name}")]
    UnknownDialect { name: String },

    /// A reference into the record set does not resolve.
    #[error("missing {kind} record: {id}")]
    MissingRecord { kind: &'static str, id: String },

    /// The same identifier was defined twice in one document.
    #[error("duplicate {kind} record: {id}")]
    DuplicateRecord { kind: &'static str, id: String },

    /// An identifier whose numeric part cannot be read.
    #[error("malformed identifier: {id}")]
    MalformedId { id: String },

    /// A term or mention reference that covers nothing.
    #[error("{kind} {id} covers no records")]
    EmptySpan { kind: &'static str, id: String },

    /// A bracketed tree that cannot be parsed.
    #[error("treebank parse error at byte {position}: {message}")]
    Treebank { position: usize, message: String },

    /// A constituency tree with nothing to attach to the sentence.
    #[error("sentence {sentence} has no constituents")]
    EmptyTree { sentence: usize },

    /// A head designation the graph cannot hold (word parent, self loop).
    #[error("cannot make {head:?} the head of {parent:?}")]
    InvalidHead { parent: NodeId, head: NodeId },

    /// Builder configuration that cannot be read.
    #[error("invalid configuration: {message}")]
    Config { message: String },

    #[error(transparent)]
    Reader(#[from] ReaderError),
}

/// Result type for graph construction.
pub type GraphResult<T> = Result<T, GraphError>;
