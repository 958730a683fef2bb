//! Named-entity and gold-mention indexing.
//!
//! Mentions are built up front, once per document, and indexed by the first
//! word they cover so tree reconstruction can find every mention starting at
//! a word in constant time.

use std::collections::HashMap;

use layered_graph_reader::{AnnotationReader, Dialect};

use crate::error::{GraphError, GraphResult};
use crate::graph::{Graph, MentionNode, Node, NodeId};
use crate::terms::TermIndex;
use crate::text::expand_form;

const POSSESSIVE: &str = "'s";
const GOLD: &str = "Gold";

/// Mentions keyed by the word node they start at.
#[derive(Debug, Clone, Default)]
pub struct MentionIndex {
    by_first_word: HashMap<NodeId, Vec<NodeId>>,
    count: usize,
}

impl MentionIndex {
    fn insert(&mut self, first_word: NodeId, mention: NodeId) {
        self.by_first_word.entry(first_word).or_default().push(mention);
        self.count += 1;
    }

    /// Mentions whose first word is `word`.
    pub fn starting_at(&self, word: NodeId) -> &[NodeId] {
        self.by_first_word
            .get(&word)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

fn covered_terms(
    graph: &Graph,
    terms: &TermIndex,
    kind: &'static str,
    id: &str,
    term_ids: &[String],
) -> GraphResult<Vec<NodeId>> {
    let mut covered = term_ids
        .iter()
        .map(|term_id| {
            terms.get(term_id).ok_or_else(|| GraphError::MissingRecord {
                kind: "term",
                id: term_id.clone(),
            })
        })
        .collect::<GraphResult<Vec<_>>>()?;
    covered.sort_by_key(|&word| (graph.node(word).ord(), word));
    covered.dedup();
    if covered.is_empty() {
        return Err(GraphError::EmptySpan {
            kind,
            id: id.to_string(),
        });
    }
    Ok(covered)
}

/// Extend `covered` with a directly following `'s` term.
fn attach_possessive(graph: &Graph, terms: &TermIndex, dialect: Dialect, covered: &mut Vec<NodeId>) {
    let next = covered
        .last()
        .and_then(|&last| dialect.successor_term_id(graph.node(last).name()))
        .and_then(|next_id| terms.get(&next_id));
    if let Some(next) = next {
        if graph.node(next).form() == POSSESSIVE && !covered.contains(&next) {
            covered.push(next);
        }
    }
}

/// Create a mention node over `covered` and link it to its words.
fn add_mention(
    graph: &mut Graph,
    id: String,
    entity_type: &str,
    gold: bool,
    covered: &[NodeId],
) -> NodeId {
    let form = expand_form(graph, covered);
    let first = graph.node(covered[0]);
    let last = graph.node(covered[covered.len() - 1]);
    let mention = MentionNode {
        id,
        entity_type: entity_type.to_string(),
        label: format!("{} | {}", form, entity_type),
        begin: first.begin(),
        end: last.end(),
        ord: (first.ord().0, last.ord().1),
        form,
    };
    let node = if gold {
        graph.add_node(Node::GoldMention(mention))
    } else {
        graph.add_node(Node::NamedEntity(mention))
    };
    for &word in covered {
        graph.link_word(node, word);
    }
    node
}

/// One named-entity node per entity reference.
///
/// A reference immediately followed by a `'s` term takes the possessive in.
pub fn index_entities<R: AnnotationReader + ?Sized>(
    graph: &mut Graph,
    reader: &R,
    terms: &TermIndex,
    dialect: Dialect,
) -> GraphResult<MentionIndex> {
    let mut index = MentionIndex::default();
    for entity in reader.entities() {
        for reference in &entity.references {
            let mut covered = covered_terms(graph, terms, "entity", &entity.id, reference)?;
            attach_possessive(graph, terms, dialect, &mut covered);
            let node = add_mention(graph, entity.id.clone(), &entity.entity_type, false, &covered);
            index.insert(covered[0], node);
        }
    }
    Ok(index)
}

/// One gold-mention node per coreference mention, named `chain#n`.
pub fn index_gold_mentions<R: AnnotationReader + ?Sized>(
    graph: &mut Graph,
    reader: &R,
    terms: &TermIndex,
) -> GraphResult<MentionIndex> {
    let mut index = MentionIndex::default();
    for chain in reader.coreference_chains() {
        for (position, mention) in chain.mentions.iter().enumerate() {
            let id = format!("{}#{}", chain.id, position + 1);
            let covered = covered_terms(graph, terms, "coreference mention", &id, mention)?;
            let node = add_mention(graph, id, GOLD, true, &covered);
            index.insert(covered[0], node);
        }
    }
    Ok(index)
}
