use layered_graph_reader::DependencyRecord;

use super::fixtures::john_loves_mary;
use crate::{AnnotatedDocument, BuilderConfig, EdgeKind, Graph, GraphBuilder, GraphError};

fn process(records: layered_graph_reader::RecordSet) -> Result<(GraphBuilder, Graph), GraphError> {
    let mut builder = GraphBuilder::new(BuilderConfig::default())?;
    let mut graph = Graph::new();
    builder.process_document(&mut graph, &AnnotatedDocument::new(records))?;
    Ok((builder, graph))
}

#[test]
fn term_and_word_endpoints() {
    let mut records = john_loves_mary();
    records.dependencies = vec![
        DependencyRecord::new("t2", "t1", "nsubj"),
        DependencyRecord::new("w2", "w3", "dobj"),
    ];
    let (builder, graph) = process(records).unwrap();

    let loves = builder.term("t2").unwrap();
    let john = builder.term("t1").unwrap();
    let mary = builder.term("t3").unwrap();
    assert_eq!(graph.dependencies_from(loves), vec![(john, "nsubj"), (mary, "dobj")]);
    assert_eq!(builder.statistics().dependencies, 2);

    let edge = graph.edges_to(john).find(|edge| edge.from == loves).unwrap();
    assert_eq!(edge.kind.label(), "nsubj");
    assert_eq!(edge.kind.glyph(), Some("→"));
}

#[test]
fn dependencies_are_kept_as_given() {
    let mut records = john_loves_mary();
    records.dependencies = vec![
        DependencyRecord::new("t1", "t2", "dep"),
        DependencyRecord::new("t2", "t1", "dep"),
        DependencyRecord::new("t2", "t1", "dep"),
    ];
    let (builder, graph) = process(records).unwrap();

    let loves = builder.term("t2").unwrap();
    assert_eq!(graph.dependencies_from(loves).len(), 2);
    let count = graph
        .edges()
        .filter(|edge| matches!(edge.kind, EdgeKind::Dependency { .. }))
        .count();
    assert_eq!(count, 3);
}

#[test]
fn unresolved_endpoint() {
    let mut records = john_loves_mary();
    records.dependencies = vec![DependencyRecord::new("w2", "w7", "dobj")];
    let err = process(records).err().unwrap();
    assert!(matches!(err, GraphError::MissingRecord { kind: "word", ref id } if id == "w7"));

    let mut records = john_loves_mary();
    records.dependencies = vec![DependencyRecord::new("t9", "t1", "nsubj")];
    let err = process(records).err().unwrap();
    assert!(matches!(err, GraphError::MissingRecord { kind: "term", ref id } if id == "t9"));
}
