use layered_graph_reader::{CorefChainRecord, EntityRecord};

use super::fixtures::{build, records};
use crate::{AnnotatedDocument, BuilderConfig, Graph, GraphBuilder, GraphError, MentionSource, Node};

fn entity(id: &str, entity_type: &str, references: &[&[&str]]) -> EntityRecord {
    EntityRecord {
        id: id.to_string(),
        entity_type: entity_type.to_string(),
        references: references
            .iter()
            .map(|terms| terms.iter().map(|t| t.to_string()).collect())
            .collect(),
    }
}

fn tokens() -> layered_graph_reader::RecordSet {
    records(&[
        ("Mary", "NNP"),
        ("'s", "POS"),
        ("dog", "NN"),
        ("met", "VBD"),
        ("John", "NNP"),
        ("Smith", "NNP"),
    ])
}

#[test]
fn possessive_is_attached() {
    let mut records = tokens();
    records.entities.push(entity("e1", "PERSON", &[&["t1"]]));
    let mut builder = GraphBuilder::new(BuilderConfig::default()).unwrap();
    let mut graph = Graph::new();
    builder
        .process_document(&mut graph, &AnnotatedDocument::new(records))
        .unwrap();

    let mary = builder.term("t1").unwrap();
    let possessive = builder.term("t2").unwrap();
    let mention = builder.entities_at(mary)[0];
    let node = graph.node(mention).as_mention().unwrap();
    assert_eq!(node.form, "Mary 's");
    assert_eq!(node.label, "Mary 's | PERSON");
    assert_eq!(node.ord, (1, 2));
    assert_eq!(node.begin, graph.node(mary).begin());
    assert_eq!(node.end, graph.node(possessive).end());
    assert_eq!(graph.words_of(mention), vec![mary, possessive]);
}

#[test]
fn entity_span_follows_covered_words() {
    let mut records = tokens();
    records
        .entities
        .push(entity("e2", "PERSON", &[&["t6", "t5"], &["t3"]]));
    let mut builder = GraphBuilder::new(BuilderConfig::default()).unwrap();
    let mut graph = Graph::new();
    builder
        .process_document(&mut graph, &AnnotatedDocument::new(records))
        .unwrap();

    let john = builder.term("t5").unwrap();
    let smith = builder.term("t6").unwrap();
    let mention = builder.entities_at(john)[0];
    assert_eq!(graph.node(mention).form(), "John Smith");
    assert_eq!(graph.node(mention).begin(), graph.node(john).begin());
    assert_eq!(graph.node(mention).end(), graph.node(smith).end());
    assert!(builder.entities_at(smith).is_empty());

    let dog = builder.term("t3").unwrap();
    assert_eq!(builder.entities_at(dog).len(), 1);
    assert_eq!(graph.node(builder.entities_at(dog)[0]).name(), "e2");
}

#[test]
fn gold_mentions_are_indexed_separately() {
    let mut records = tokens();
    records.entities.push(entity("e1", "PERSON", &[&["t1"]]));
    records.coreference_chains.push(CorefChainRecord {
        id: "co1".to_string(),
        mentions: vec![vec!["t1".to_string()], vec!["t5".to_string(), "t6".to_string()]],
    });
    let document = AnnotatedDocument::new(records)
        .with_sentences("(S (NP (NP (NNP Mary) (POS 's)) (NN=H dog)) (VP=H (VBD=H met) (NP (NNP John) (NNP=H Smith))))");
    let (builder, graph, sentence) = build(&document);

    let mary = builder.term("t1").unwrap();
    let gold = builder.gold_mentions_at(mary);
    assert_eq!(gold.len(), 1);
    assert!(matches!(graph.node(gold[0]), Node::GoldMention(_)));
    assert_eq!(graph.node(gold[0]).name(), "co1#1");
    assert_eq!(graph.node(gold[0]).form(), "Mary");

    let in_sentence: Vec<_> = graph
        .mentions_in(sentence, MentionSource::Gold)
        .into_iter()
        .map(|id| graph.node(id).name().to_string())
        .collect();
    assert_eq!(in_sentence, vec!["co1#1", "co1#2"]);
    assert_eq!(graph.mentions_in(sentence, MentionSource::NamedEntity).len(), 1);
}

#[test]
fn unknown_term_in_entity() {
    let mut records = tokens();
    records.entities.push(entity("e1", "ORG", &[&["t42"]]));
    let mut builder = GraphBuilder::new(BuilderConfig::default()).unwrap();
    let err = builder
        .process_document(&mut Graph::new(), &AnnotatedDocument::new(records))
        .unwrap_err();
    assert!(matches!(err, GraphError::MissingRecord { kind: "term", ref id } if id == "t42"));
}

#[test]
fn empty_reference() {
    let mut records = tokens();
    records.entities.push(entity("e1", "ORG", &[&[]]));
    let mut builder = GraphBuilder::new(BuilderConfig::default()).unwrap();
    let err = builder
        .process_document(&mut Graph::new(), &AnnotatedDocument::new(records))
        .unwrap_err();
    assert!(matches!(err, GraphError::EmptySpan { kind: "entity", .. }));
}
