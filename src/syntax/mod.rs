//! Sentence tree reconstruction.
//!
//! Two reconstructors share the helpers here: [`penn`] walks a bracketed
//! tree, [`worklist`] links flat constituency records edge by edge. Both
//! attach words to the sentence the same way and finish constituents with
//! the same aggregation.

pub mod penn;
pub mod worklist;

use crate::builder::BuildStatistics;
use crate::error::{GraphError, GraphResult};
use crate::graph::{Graph, MentionSource, Node, NodeId};
use crate::mentions::MentionIndex;
use crate::tagset::Tagset;
use crate::text::{expand_form, expand_lemma};

/// Per-sentence view of the document state.
pub struct SentenceContext<'a> {
    pub sentence: NodeId,
    /// 1-based position of the sentence in its document
    pub sentence_order: usize,
    pub tagset: &'a Tagset,
    pub entities: &'a MentionIndex,
    pub gold: &'a MentionIndex,
    pub stats: &'a mut BuildStatistics,
}

impl<'a> SentenceContext<'a> {
    /// Make `word` a member of the sentence and register the mentions
    /// starting at it.
    pub fn attach_word(&mut self, graph: &mut Graph, word: NodeId) {
        graph.link_member(self.sentence, word);
        if graph.link_word(self.sentence, word) {
            self.stats.leaves += 1;
        }
        for &mention in self.entities.starting_at(word) {
            graph.add_mention(self.sentence, mention, MentionSource::NamedEntity);
        }
        for &mention in self.gold.starting_at(word) {
            graph.add_mention(self.sentence, mention, MentionSource::Gold);
        }
    }
}

/// Monotonic position in the document-ordered word pool.
///
/// Once the pool is exhausted the last word handed out is returned again.
#[derive(Debug, Clone, Default)]
pub struct WordCursor {
    position: usize,
    last: Option<NodeId>,
}

impl WordCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of words consumed so far.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn advance(&mut self, pool: &[NodeId]) -> GraphResult<NodeId> {
        if let Some(&word) = pool.get(self.position) {
            self.position += 1;
            self.last = Some(word);
            return Ok(word);
        }
        match self.last {
            Some(word) => {
                log::warn!(
                    "Word pool exhausted after {} words, reusing the last word",
                    self.position
                );
                Ok(word)
            }
            None => Err(GraphError::MissingRecord {
                kind: "word",
                id: format!("#{}", self.position + 1),
            }),
        }
    }
}

/// Give `constituent` its first child as head when none was marked.
pub(crate) fn ensure_head(graph: &mut Graph, constituent: NodeId) -> GraphResult<()> {
    if graph.head(constituent).is_some() {
        return Ok(());
    }
    match graph.children(constituent).first() {
        Some(&first) => {
            log::debug!(
                "No head marked under {}, using its first child {}",
                graph.node(constituent).name(),
                graph.node(first).name()
            );
            graph.set_head(constituent, first)
        }
        None => {
            log::debug!("Constituent {} has no children", graph.node(constituent).name());
            Ok(())
        }
    }
}

/// Recompute the surface and discourse fields of `constituent` from the
/// words under it.
pub(crate) fn aggregate(graph: &mut Graph, constituent: NodeId) {
    let words = graph.words_under(constituent);
    let first = match words.first() {
        Some(&first) => first,
        None => return,
    };

    let form = expand_form(graph, &words);
    let lemma = expand_lemma(graph, &words);
    let begin = words.iter().map(|&w| graph.node(w).begin()).min().unwrap_or(0);
    let end = words.iter().map(|&w| graph.node(w).end()).max().unwrap_or(0);
    let last_ord = words.iter().map(|&w| graph.node(w).ord().1).max().unwrap_or(0);
    let ord = (graph.node(first).ord().0, last_ord);
    let discourse = graph
        .head_word(constituent)
        .and_then(|head| graph.node(head).as_word())
        .map(|word| (word.doc_type, word.utterance, word.quoted));

    if let Some(node) = graph.node_mut(constituent).as_constituent_mut() {
        node.label = format!("{} | {}", form, node.tag);
        node.form = form;
        node.lemma = lemma;
        node.begin = begin;
        node.end = end;
        node.ord = ord;
        if let Some((doc_type, utterance, quoted)) = discourse {
            node.doc_type = doc_type;
            node.utterance = utterance;
            node.quoted = quoted;
        }
    }
}

/// Hang `head` under the sentence and copy its surface fields up.
pub(crate) fn finish_sentence(graph: &mut Graph, sentence: NodeId, head: NodeId) -> GraphResult<()> {
    graph.link_syntax_child(sentence, head);
    graph.set_head(sentence, head)?;

    let (form, lemma, ord, begin, end) = {
        let node = graph.node(head);
        (
            node.form().to_string(),
            node.lemma().to_string(),
            node.ord(),
            node.begin(),
            node.end(),
        )
    };
    if let Node::Sentence(node) = graph.node_mut(sentence) {
        node.form = form;
        node.lemma = lemma;
        node.ord = ord;
        node.begin = begin;
        node.end = end;
    }
    Ok(())
}
