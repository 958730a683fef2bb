//! Dependency edges between word nodes.

use layered_graph_reader::{AnnotationReader, Dialect};

use crate::error::{GraphError, GraphResult};
use crate::graph::{Graph, NodeId};
use crate::terms::TermIndex;

/// Resolve a dependency endpoint that names either a word or a term.
fn resolve_endpoint(terms: &TermIndex, dialect: Dialect, id: &str) -> GraphResult<NodeId> {
    let (found, kind) = if dialect.is_word_reference(id) {
        (terms.get_by_word(id), "word")
    } else {
        (terms.get(id), "term")
    };
    found.ok_or_else(|| GraphError::MissingRecord {
        kind,
        id: id.to_string(),
    })
}

/// Add one labelled edge per dependency record; returns how many were added.
///
/// Records are trusted: cycles and repeated dependencies are kept as given.
pub fn link_dependencies<R: AnnotationReader + ?Sized>(
    graph: &mut Graph,
    reader: &R,
    terms: &TermIndex,
    dialect: Dialect,
) -> GraphResult<usize> {
    let mut count = 0;
    for dependency in reader.dependencies() {
        let from = resolve_endpoint(terms, dialect, &dependency.from)?;
        let to = resolve_endpoint(terms, dialect, &dependency.to)?;
        graph.link_dependency(from, to, &dependency.function);
        count += 1;
    }
    Ok(count)
}
