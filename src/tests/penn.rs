use layered_graph_reader::EntityRecord;

use super::fixtures::{build, john_loves_mary, records, render};
use crate::{AnnotatedDocument, GraphBuilder, GraphError, MentionSource, Node, NodeKind};

#[test]
fn john_loves_mary_is_headed_by_s_over_john() {
    let document =
        AnnotatedDocument::new(john_loves_mary()).with_sentences("(S (NP=H John) (VP loves (NP Mary)))");
    let (builder, graph, sentence) = build(&document);

    let s = graph.head(sentence).unwrap();
    assert_eq!(graph.node(s).as_constituent().unwrap().tag, "S");
    let john = builder.term("t1").unwrap();
    assert_eq!(graph.head(s), Some(john));
    assert_eq!(graph.head_word(sentence), Some(john));

    let vp = graph.children(s)[1];
    assert_eq!(graph.node(vp).form(), "loves Mary");
    assert_eq!(graph.node(sentence).form(), "John loves Mary");

    insta::assert_snapshot!(render(&graph, sentence), @r###"
    #1: John loves Mary    [1,3]
    └─*S: John loves Mary  [1,3]
      ├─*John/NNP          [1,1]
      └─ VP: loves Mary    [2,3]
        ├─*loves/VBZ       [2,2]
        └─ Mary/NNP        [3,3]
    "###);
}

#[test]
fn every_constituent_has_one_head_and_spans_its_children() {
    let tokens = [
        ("The", "DT"),
        ("old", "JJ"),
        ("man", "NN"),
        ("saw", "VBD"),
        ("the", "DT"),
        ("boats", "NNS"),
    ];
    let document = AnnotatedDocument::new(records(&tokens))
        .with_sentences("(S (NP (DT The) (JJ old) (NN-H man)) (VP=H (VBD=H saw) (NP (DT the) (NNS boats))))");
    let (_, graph, _) = build(&document);

    let constituents: Vec<_> = graph.nodes_of_kind(NodeKind::Constituent).map(|(id, _)| id).collect();
    assert_eq!(constituents.len(), 4);
    for id in constituents {
        let heads = graph
            .edges_from(id)
            .filter(|edge| edge.kind == crate::EdgeKind::Head)
            .count();
        assert_eq!(heads, 1);

        let children = graph.children(id);
        let first = children.iter().map(|&c| graph.node(c).ord().0).min().unwrap();
        let last = children.iter().map(|&c| graph.node(c).ord().1).max().unwrap();
        assert_eq!(graph.node(id).ord(), (first, last));
    }

    let s = graph.node_by_name("C1").unwrap();
    let vp = graph.head(s).unwrap();
    assert_eq!(graph.node(vp).form(), "saw the boats");
    let np = graph.children(s)[0];
    assert_eq!(graph.node(graph.head(np).unwrap()).form(), "man");
    assert_eq!(graph.node(np).lemma(), "The old man");
}

#[test]
fn inline_entity_types() {
    let tokens = [("Acme", "NNP"), ("Corp", "NNP"), ("hired", "VBD"), ("Ann", "NNP")];
    let document = AnnotatedDocument::new(records(&tokens))
        .with_sentences("(S (NE (NNP Acme) (NNP Corp)) (VP=H (VBD=H hired) (NNP|PERSON Ann)))");
    let (builder, graph, sentence) = build(&document);

    let ann = builder.term("t4").unwrap();
    assert_eq!(graph.node(ann).as_word().unwrap().ner.as_deref(), Some("PERSON"));

    let mentions = graph.mentions_in(sentence, MentionSource::NamedEntity);
    assert_eq!(mentions.len(), 1);
    assert_eq!(graph.node(mentions[0]).form(), "Acme Corp");

    insta::assert_snapshot!(render(&graph, sentence), @r###"
    #1: Acme Corp hired Ann    [1,4]
    └─*S: Acme Corp hired Ann  [1,4]
      ├─ NE: Acme Corp         [1,2]
      │ ├─*Acme/NNP            [1,1]
      │ └─ Corp/NNP            [2,2]
      └─*VP: hired Ann         [3,4]
        ├─*hired/VBD           [3,3]
        └─ Ann/NNP |PERSON     [4,4]
    "###);
}

#[test]
fn sentences_consume_words_in_order() {
    let tokens = [("Dogs", "NNS"), ("bark", "VBP"), ("Cats", "NNS"), ("purr", "VBP")];
    let document = AnnotatedDocument::new(records(&tokens))
        .with_sentences("(S (NNS=H Dogs) (VBP bark))\n\n  (S (NNS Cats) (VBP=H purr))\n");
    let mut builder = GraphBuilder::new(Default::default()).unwrap();
    let graph = builder.build(&document).unwrap();

    let first = graph.node_by_name("S1").unwrap();
    let second = graph.node_by_name("S2").unwrap();
    assert_eq!(graph.node(second).as_sentence().unwrap().sentence_order, 2);
    assert_eq!(graph.node(first).form(), "Dogs bark");
    assert_eq!(graph.node(second).form(), "Cats purr");
    assert_eq!(graph.head_word(second), builder.term("t4"));
    assert_eq!(graph.members(second).len(), 3);

    let stats = builder.statistics();
    assert_eq!(stats.sentences, 2);
    assert_eq!(stats.leaves, 4);
    assert_eq!(stats.constituents, 2);
}

#[test]
fn exhausted_word_pool_reuses_last_word() {
    let document = AnnotatedDocument::new(records(&[("Hi", "UH")])).with_sentences("(S (UH Hi) (. !))");
    let (builder, graph, sentence) = build(&document);

    let hi = builder.term("t1").unwrap();
    let s = graph.head(sentence).unwrap();
    assert_eq!(graph.children(s), vec![hi]);
    assert_eq!(graph.node(sentence).form(), "Hi");
}

#[test]
fn one_word_sentence_is_headed_by_the_word() {
    let document = AnnotatedDocument::new(records(&[("Hello", "UH")])).with_sentences("(UH Hello)");
    let (builder, graph, sentence) = build(&document);

    assert_eq!(graph.head(sentence), builder.term("t1"));
    assert_eq!(graph.node(sentence).ord(), (1, 1));
}

#[test]
fn mentions_are_registered_on_their_sentence() {
    let mut records = john_loves_mary();
    records.entities.push(EntityRecord {
        id: "e1".to_string(),
        entity_type: "PERSON".to_string(),
        references: vec![vec!["t3".to_string()]],
    });
    let document = AnnotatedDocument::new(records).with_sentences("(S (NP=H John) (VP loves (NP Mary)))");
    let (builder, graph, sentence) = build(&document);

    let mary = builder.term("t3").unwrap();
    let entities = builder.entities_at(mary);
    assert_eq!(entities.len(), 1);
    assert_eq!(graph.mentions_in(sentence, MentionSource::NamedEntity), entities.to_vec());
    assert!(graph.mentions_in(sentence, MentionSource::Gold).is_empty());
    assert!(matches!(graph.node(entities[0]), Node::NamedEntity(_)));
}

#[test]
fn malformed_tree_is_an_error() {
    let document = AnnotatedDocument::new(john_loves_mary()).with_sentences("(S (NP John) (VP loves Mary)");
    let mut builder = GraphBuilder::new(Default::default()).unwrap();
    let err = builder.build(&document).unwrap_err();
    assert!(matches!(err, GraphError::Treebank { .. }));
}
