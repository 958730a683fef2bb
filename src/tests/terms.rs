use layered_graph_reader::{RecordSet, TermRecord, WordRecord};

use super::fixtures::{john_loves_mary, records};
use crate::{AnnotatedDocument, BuilderConfig, DocType, Graph, GraphBuilder, GraphError, WordNode};

fn process(document: &AnnotatedDocument) -> (GraphBuilder, Graph) {
    let mut builder = GraphBuilder::new(BuilderConfig::default()).unwrap();
    let mut graph = Graph::new();
    builder.process_document(&mut graph, document).unwrap();
    (builder, graph)
}

fn word<'g>(builder: &GraphBuilder, graph: &'g Graph, term_id: &str) -> &'g WordNode {
    graph.node(builder.term(term_id).unwrap()).as_word().unwrap()
}

#[test]
fn one_word_node_per_term() {
    let mut records = RecordSet::new();
    records.words = vec![
        WordRecord::new("w2", "York", 4),
        WordRecord::new("w1", "New", 0),
        WordRecord::new("w3", "grows", 9),
    ];
    records.terms = vec![
        TermRecord::new("t1", "NNP", vec!["w2".into(), "w1".into()]).with_lemma("-"),
        TermRecord::new("t2", "VBZ", vec!["w3".into()]).with_lemma("grow"),
    ];
    let (builder, graph) = process(&AnnotatedDocument::new(records));

    assert_eq!(builder.words().len(), 2);
    let new_york = builder.term("t1").unwrap();
    assert_eq!(builder.term_by_word("w1"), Some(new_york));
    assert_eq!(builder.term_by_word("w2"), Some(new_york));
    assert_eq!(builder.term_by_word("w3"), builder.term("t2"));

    let node = word(&builder, &graph, "t1");
    assert_eq!(node.form, "New York");
    assert_eq!(node.lemma, "New York");
    assert_eq!(node.ord, (1, 2));
    assert_eq!((node.begin, node.end), (0, 7));
    assert_eq!(node.source_ref, "t1#w1|w2");
    assert_eq!(node.label, "New York\nNNP\nNew York\nt1");
    assert_eq!(word(&builder, &graph, "t2").lemma, "grow");
    assert_eq!(builder.statistics().words, 2);
}

#[test]
fn nested_quotes_depth() {
    let tokens = [
        ("``", "``"),
        ("A", "NN"),
        ("``", "``"),
        ("B", "NN"),
        ("''", "''"),
        ("''", "''"),
        ("C", "NN"),
    ];
    let (builder, graph) = process(&AnnotatedDocument::new(records(&tokens)));

    let a = word(&builder, &graph, "t2");
    assert_eq!(a.quote_depth, 1);
    assert!(a.quoted);
    assert_eq!((a.speaker.as_str(), a.utterance), ("PER2", 2));

    let b = word(&builder, &graph, "t4");
    assert_eq!(b.quote_depth, 2);
    assert_eq!((b.speaker.as_str(), b.utterance), ("PER3", 3));

    assert_eq!(word(&builder, &graph, "t6").quote_depth, 0);
    let c = word(&builder, &graph, "t7");
    assert_eq!(c.quote_depth, 0);
    assert!(!c.quoted);
    assert_eq!((c.speaker.as_str(), c.utterance), ("PER0", 0));
}

#[test]
fn unbalanced_quote_is_not_fatal() {
    let tokens = [("''", "''"), ("Hi", "UH"), ("\"", "``"), ("there", "RB")];
    let (builder, graph) = process(&AnnotatedDocument::new(records(&tokens)));

    assert!(!word(&builder, &graph, "t1").quoted);
    assert!(!word(&builder, &graph, "t2").quoted);
    let there = word(&builder, &graph, "t4");
    assert!(there.quoted);
    assert_eq!(there.quote_depth, 1);
}

#[test]
fn speakers_and_utterances() {
    let tokens = [("Hi", "UH"), ("Bob", "NNP"), ("Hey", "UH"), ("-", ":")];
    let document = AnnotatedDocument::new(records(&tokens)).with_speakers("Ann_Lee\nAnn_Lee\n\nBob\n-\n");
    let (builder, graph) = process(&document);

    let hi = word(&builder, &graph, "t1");
    assert_eq!(hi.speaker, "Ann Lee");
    assert_eq!(hi.utterance, 0);
    assert_eq!(hi.prev_speaker, None);
    assert_eq!(hi.doc_type, DocType::Conversation);

    assert_eq!(word(&builder, &graph, "t2").prev_speaker.as_deref(), Some("Ann Lee"));

    let hey = word(&builder, &graph, "t3");
    assert_eq!((hey.speaker.as_str(), hey.utterance), ("Bob", 1));

    let unknown = word(&builder, &graph, "t4");
    assert_eq!((unknown.speaker.as_str(), unknown.utterance), ("PER2", 2));
}

#[test]
fn single_speaker_is_an_article() {
    let document = AnnotatedDocument::new(john_loves_mary()).with_speakers("Ann\nAnn\nAnn");
    let (builder, graph) = process(&document);
    let john = word(&builder, &graph, "t1");
    assert_eq!(john.doc_type, DocType::Article);
    assert_eq!(john.speaker, "Ann");
}

#[test]
fn state_resets_between_documents() {
    let mut builder = GraphBuilder::new(BuilderConfig::default()).unwrap();
    let mut graph = Graph::new();
    builder
        .process_document(&mut graph, &AnnotatedDocument::new(john_loves_mary()))
        .unwrap();
    let first = builder.term("t1").unwrap();
    builder
        .process_document(&mut graph, &AnnotatedDocument::new(records(&[("Hi", "UH")])))
        .unwrap();

    assert_ne!(builder.term("t1"), Some(first));
    assert_eq!(builder.term("t2"), None);
    assert_eq!(builder.statistics().words, 4);
    assert_eq!(builder.statistics().documents, 2);
}

#[test]
fn missing_word_record() {
    let mut records = john_loves_mary();
    records.terms[1].words = vec!["w9".into()];
    let mut builder = GraphBuilder::new(BuilderConfig::default()).unwrap();
    let err = builder
        .process_document(&mut Graph::new(), &AnnotatedDocument::new(records))
        .unwrap_err();
    assert!(matches!(err, GraphError::MissingRecord { kind: "word", ref id } if id == "w9"));
}

#[test]
fn duplicate_and_empty_terms() {
    let mut duplicate = john_loves_mary();
    duplicate.terms[2].id = "t1".into();
    let mut builder = GraphBuilder::new(BuilderConfig::default()).unwrap();
    let err = builder
        .process_document(&mut Graph::new(), &AnnotatedDocument::new(duplicate))
        .unwrap_err();
    assert!(matches!(err, GraphError::DuplicateRecord { kind: "term", .. }));

    let mut empty = john_loves_mary();
    empty.terms[0].words.clear();
    let err = builder
        .process_document(&mut Graph::new(), &AnnotatedDocument::new(empty))
        .unwrap_err();
    assert!(matches!(err, GraphError::EmptySpan { kind: "term", .. }));
}

#[test]
fn malformed_word_id() {
    let mut records = RecordSet::new();
    records.words = vec![WordRecord::new("wx", "Hi", 0)];
    records.terms = vec![TermRecord::new("t1", "UH", vec!["wx".into()])];
    let mut builder = GraphBuilder::new(BuilderConfig::default()).unwrap();
    let err = builder
        .process_document(&mut Graph::new(), &AnnotatedDocument::new(records))
        .unwrap_err();
    assert!(matches!(err, GraphError::MalformedId { ref id } if id == "wx"));
}

#[test]
fn unknown_dialect() {
    let err = GraphBuilder::new(BuilderConfig::default().with_dialect("TEI")).unwrap_err();
    assert!(matches!(err, GraphError::UnknownDialect { ref name } if name == "TEI"));
    assert!(GraphBuilder::new(BuilderConfig::default().with_dialect("kaf")).is_ok());
}
