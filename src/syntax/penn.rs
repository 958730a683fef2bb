//! Recursive reconstruction of a bracketed sentence tree.

use crate::error::GraphResult;
use crate::graph::{ConstituentNode, Graph, MentionSource, Node, NodeId};
use crate::penn::PennTree;

use super::{aggregate, ensure_head, finish_sentence, SentenceContext, WordCursor};

struct Visited {
    node: NodeId,
    is_head: bool,
}

struct PennReconstructor<'c, 'a> {
    ctx: &'c mut SentenceContext<'a>,
    cursor: &'c mut WordCursor,
    pool: &'c [NodeId],
}

impl<'c, 'a> PennReconstructor<'c, 'a> {
    fn visit(&mut self, graph: &mut Graph, tree: &PennTree) -> GraphResult<Visited> {
        match tree {
            PennTree::Leaf { label, token } => self.leaf(graph, label.as_deref(), token),
            PennTree::Branch { label, children } => self.branch(graph, label, children),
        }
    }

    fn leaf(&mut self, graph: &mut Graph, label: Option<&str>, token: &str) -> GraphResult<Visited> {
        let word = self.cursor.advance(self.pool)?;
        if graph.node(word).form() != token {
            log::debug!(
                "Leaf {:?} consumed word {:?} ({})",
                token,
                graph.node(word).form(),
                graph.node(word).name()
            );
        }

        let parsed = label.map(|label| self.ctx.tagset.parse_label(label));
        let is_head = parsed.as_ref().map_or(false, |parsed| parsed.is_head);
        if let Some(ner) = parsed.and_then(|parsed| parsed.ner) {
            if let Some(node) = graph.node_mut(word).as_word_mut() {
                node.ner = Some(ner);
            }
        }

        self.ctx.attach_word(graph, word);
        Ok(Visited { node: word, is_head })
    }

    fn branch(&mut self, graph: &mut Graph, label: &str, children: &[PennTree]) -> GraphResult<Visited> {
        let parsed = self.ctx.tagset.parse_label(label);
        self.ctx.stats.constituents += 1;
        let order = self.ctx.stats.constituents;
        let mut constituent =
            ConstituentNode::new(format!("C{}", order), parsed.tag.as_str(), order, parsed.tag.as_str());
        constituent.ner = parsed.ner.clone();
        let node = graph.add_node(Node::Constituent(constituent));

        let mut visited = Vec::with_capacity(children.len());
        for child in children {
            visited.push(self.visit(graph, child)?);
        }
        visited.sort_by_key(|child| (graph.node(child.node).ord(), child.node));

        for child in &visited {
            graph.link_syntax_child(node, child.node);
            if child.is_head {
                graph.set_head(node, child.node)?;
            }
        }
        ensure_head(graph, node)?;
        aggregate(graph, node);
        graph.link_member(self.ctx.sentence, node);

        if parsed.ner.is_some() || self.ctx.tagset.is_ner_constituent(&parsed.tag) {
            graph.add_mention(self.ctx.sentence, node, MentionSource::NamedEntity);
        }

        Ok(Visited {
            node,
            is_head: parsed.is_head,
        })
    }
}

/// Build the constituents of `tree` under `ctx.sentence`, consuming words
/// from `pool` at `cursor`.
///
/// The top node (a constituent, or a word for a one-word sentence) becomes
/// the sentence head and is returned.
pub fn reconstruct(
    graph: &mut Graph,
    ctx: &mut SentenceContext<'_>,
    cursor: &mut WordCursor,
    pool: &[NodeId],
    tree: &PennTree,
) -> GraphResult<NodeId> {
    let top = PennReconstructor {
        ctx: &mut *ctx,
        cursor,
        pool,
    }
    .visit(graph, tree)?;
    finish_sentence(graph, ctx.sentence, top.node)?;
    Ok(top.node)
}
