//! Worklist reconstruction of a flat constituency tree.
//!
//! Tree edges point from child to parent. In secure mode every departure
//! id is processed exactly once, in reverse edge order. In non-secure mode
//! processing starts from the terminals and climbs: a parent is enqueued
//! once one of its children is linked, until the root is reached. A node
//! is linked at most once in either mode, so cyclic input terminates.

use std::collections::{HashMap, HashSet, VecDeque};

use layered_graph_reader::{ConstituencyTree, TreeEdgeRecord};

use crate::error::{GraphError, GraphResult};
use crate::graph::{ConstituentNode, Graph, Node, NodeId, NodeKind};
use crate::terms::TermIndex;

use super::{aggregate, ensure_head, finish_sentence, SentenceContext};

enum TreeNode {
    NonTerminal(NodeId),
    Terminal(Vec<NodeId>),
}

struct WorklistTree<'t> {
    constituents: Vec<(&'t str, NodeId)>,
    nodes: HashMap<&'t str, TreeNode>,
    root: Option<NodeId>,
    edges_by_child: HashMap<&'t str, &'t TreeEdgeRecord>,
    children_per_parent: HashMap<&'t str, usize>,
    /// Children linked to the root, with their head flag
    root_children: Vec<(NodeId, bool)>,
    explicit_heads: HashSet<NodeId>,
}

impl<'t> WorklistTree<'t> {
    fn new(
        graph: &mut Graph,
        ctx: &mut SentenceContext<'_>,
        tree: &'t ConstituencyTree,
        terms: &TermIndex,
    ) -> GraphResult<Self> {
        let mut constituents = Vec::with_capacity(tree.non_terminals.len());
        let mut nodes = HashMap::new();
        let mut root = None;

        for record in &tree.non_terminals {
            if nodes.contains_key(record.id.as_str()) {
                return Err(GraphError::DuplicateRecord {
                    kind: "non-terminal",
                    id: record.id.clone(),
                });
            }
            let parsed = ctx.tagset.parse_label(&record.label);
            ctx.stats.constituents += 1;
            let mut constituent = ConstituentNode::new(
                record.id.as_str(),
                parsed.tag.as_str(),
                ctx.stats.constituents,
                parsed.tag.as_str(),
            );
            constituent.ner = parsed.ner;
            let node = graph.add_node(Node::Constituent(constituent));

            if root.is_none() && ctx.tagset.is_root(&parsed.tag) {
                root = Some(node);
            } else {
                graph.link_member(ctx.sentence, node);
            }
            constituents.push((record.id.as_str(), node));
            nodes.insert(record.id.as_str(), TreeNode::NonTerminal(node));
        }

        for record in &tree.terminals {
            if nodes.contains_key(record.id.as_str()) {
                return Err(GraphError::DuplicateRecord {
                    kind: "terminal",
                    id: record.id.clone(),
                });
            }
            let mut words = record
                .terms
                .iter()
                .map(|term_id| {
                    terms.get(term_id).ok_or_else(|| GraphError::MissingRecord {
                        kind: "term",
                        id: term_id.clone(),
                    })
                })
                .collect::<GraphResult<Vec<_>>>()?;
            if words.is_empty() {
                return Err(GraphError::EmptySpan {
                    kind: "terminal",
                    id: record.id.clone(),
                });
            }
            words.sort_by_key(|&word| (graph.node(word).ord(), word));
            nodes.insert(record.id.as_str(), TreeNode::Terminal(words));
        }

        let mut edges_by_child = HashMap::new();
        let mut children_per_parent: HashMap<&str, usize> = HashMap::new();
        for edge in &tree.edges {
            if edges_by_child.contains_key(edge.from.as_str()) {
                log::warn!("Tree node {} has more than one parent edge, keeping the first", edge.from);
                continue;
            }
            edges_by_child.insert(edge.from.as_str(), edge);
            *children_per_parent.entry(edge.to.as_str()).or_default() += 1;
        }

        Ok(Self {
            constituents,
            nodes,
            root,
            edges_by_child,
            children_per_parent,
            root_children: Vec::new(),
            explicit_heads: HashSet::new(),
        })
    }

    fn parent_of(&self, child: &str) -> Option<&'t str> {
        self.edges_by_child.get(child).map(|edge| edge.to.as_str())
    }

    /// Link `child` to its parent along its departure edge.
    ///
    /// Returns `false` when the child has no departure edge.
    fn link(&mut self, graph: &mut Graph, ctx: &mut SentenceContext<'_>, child: &str) -> GraphResult<bool> {
        let edge = match self.edges_by_child.get(child) {
            Some(edge) => *edge,
            None => return Ok(false),
        };
        let target = match self.nodes.get(edge.to.as_str()) {
            Some(TreeNode::NonTerminal(node)) => graph.resolve(*node),
            _ => {
                return Err(GraphError::MissingRecord {
                    kind: "constituent",
                    id: edge.to.clone(),
                })
            }
        };
        let to_root = self.root == Some(target);
        if !to_root && graph.node(target).kind() != NodeKind::Constituent {
            log::warn!(
                "Tree edge {} -> {} targets a collapsed node, skipping",
                edge.from,
                edge.to
            );
            return Ok(true);
        }

        match self.nodes.get(child) {
            Some(TreeNode::NonTerminal(node)) => {
                let node = graph.resolve(*node);
                if node == target {
                    log::warn!("Tree edge {} -> {} loops on itself, skipping", edge.from, edge.to);
                    return Ok(true);
                }
                if to_root {
                    self.root_children.push((node, edge.head));
                } else {
                    graph.link_syntax_child(target, node);
                    if edge.head {
                        match graph.set_head(target, node) {
                            Ok(()) => {
                                self.explicit_heads.insert(target);
                            }
                            Err(err) => log::warn!("Cannot set head of {}: {}", edge.to, err),
                        }
                    }
                }
            }
            Some(TreeNode::Terminal(words)) => {
                let words = words.clone();
                self.link_terminal(graph, ctx, edge, target, to_root, &words)?;
            }
            None => {
                return Err(GraphError::MissingRecord {
                    kind: "tree node",
                    id: child.to_string(),
                })
            }
        }
        Ok(true)
    }

    fn link_terminal(
        &mut self,
        graph: &mut Graph,
        ctx: &mut SentenceContext<'_>,
        edge: &TreeEdgeRecord,
        target: NodeId,
        to_root: bool,
        words: &[NodeId],
    ) -> GraphResult<()> {
        for &word in words {
            ctx.attach_word(graph, word);
        }
        let (first, last) = match (words.first(), words.last()) {
            (Some(&first), Some(&last)) => (first, last),
            _ => return Ok(()),
        };

        if to_root {
            self.root_children.push((first, edge.head));
            return Ok(());
        }

        let only_child = self.children_per_parent.get(edge.to.as_str()) == Some(&1);
        let same_tag = match (graph.node(first).as_word(), graph.node(target).as_constituent()) {
            (Some(word), Some(constituent)) => word.pos == constituent.tag,
            _ => false,
        };
        if words.len() == 1 && only_child && same_tag {
            graph.supersede(target, first);
            ctx.stats.collapsed += 1;
            return Ok(());
        }

        for &word in words {
            graph.link_syntax_child(target, word);
        }
        if edge.head {
            graph.set_head(target, last)?;
            self.explicit_heads.insert(target);
        } else if !self.explicit_heads.contains(&target) {
            let replace = match graph.head(target) {
                Some(current) => graph.node(last).ord() > graph.node(current).ord(),
                None => true,
            };
            if replace {
                graph.set_head(target, last)?;
            }
        }
        Ok(())
    }

    fn run_secure(&mut self, graph: &mut Graph, ctx: &mut SentenceContext<'_>, tree: &'t ConstituencyTree) -> GraphResult<()> {
        let mut processed = HashSet::new();
        for edge in tree.edges.iter().rev() {
            let child = edge.from.as_str();
            if !processed.insert(child) {
                continue;
            }
            if !self.link(graph, ctx, child)? {
                return Err(GraphError::MissingRecord {
                    kind: "tree edge",
                    id: child.to_string(),
                });
            }
        }
        Ok(())
    }

    fn run_non_secure(
        &mut self,
        graph: &mut Graph,
        ctx: &mut SentenceContext<'_>,
        tree: &'t ConstituencyTree,
    ) -> GraphResult<()> {
        let mut worklist: VecDeque<&str> = tree.terminals.iter().map(|t| t.id.as_str()).collect();
        let mut queued: HashSet<&str> = worklist.iter().copied().collect();
        let mut resolved: HashSet<&str> = HashSet::new();

        while let Some(child) = worklist.pop_front() {
            if !resolved.insert(child) {
                continue;
            }
            if !self.link(graph, ctx, child)? {
                log::warn!("Tree node {} has no parent edge, skipping", child);
                continue;
            }
            if let Some(parent) = self.parent_of(child) {
                let parent_is_root = match self.nodes.get(parent) {
                    Some(TreeNode::NonTerminal(node)) => self.root == Some(*node),
                    _ => false,
                };
                if !parent_is_root && !resolved.contains(parent) && queued.insert(parent) {
                    worklist.push_back(parent);
                }
            }
        }
        Ok(())
    }

    /// Surviving non-root constituents in creation order.
    fn live_constituents(&self, graph: &Graph) -> Vec<NodeId> {
        self.constituents
            .iter()
            .map(|&(_, node)| node)
            .filter(|&node| Some(node) != self.root && graph.is_live(node))
            .collect()
    }

    /// The head-marked root child, else the root child earliest in word
    /// order. Ties resolve to the earlier node.
    fn root_head(&self, graph: &Graph) -> Option<NodeId> {
        let marked = self.root_children.iter().any(|&(_, head)| head);
        self.root_children
            .iter()
            .filter(|&&(_, head)| head || !marked)
            .map(|&(node, _)| graph.resolve(node))
            .min_by_key(|&node| (graph.node(node).ord(), node))
    }

    fn fallback_head(&self, graph: &Graph) -> Option<NodeId> {
        let live = self.live_constituents(graph);
        live.iter()
            .copied()
            .find(|&node| graph.parent(node).is_none())
            .or_else(|| live.first().copied())
    }
}

/// Link the records of `tree` under `ctx.sentence`.
///
/// Returns the sentence head.
pub fn reconstruct(
    graph: &mut Graph,
    ctx: &mut SentenceContext<'_>,
    tree: &ConstituencyTree,
    terms: &TermIndex,
    secure: bool,
) -> GraphResult<NodeId> {
    let mut worklist = WorklistTree::new(graph, ctx, tree, terms)?;
    if secure {
        worklist.run_secure(graph, ctx, tree)?;
    } else {
        worklist.run_non_secure(graph, ctx, tree)?;
    }

    // Spans first so children sort in word order, then heads, then the
    // discourse fields that depend on the heads.
    let live = worklist.live_constituents(graph);
    for &node in &live {
        aggregate(graph, node);
    }
    for &node in &live {
        ensure_head(graph, node)?;
    }
    for &node in &live {
        aggregate(graph, node);
    }

    let head = match worklist.root_head(graph) {
        Some(head) => head,
        None => {
            log::warn!("No ROOT found, using the first constituent");
            worklist
                .fallback_head(graph)
                .ok_or(GraphError::EmptyTree {
                    sentence: ctx.sentence_order,
                })?
        }
    };

    finish_sentence(graph, ctx.sentence, head)?;
    if let Some(root) = worklist.root {
        graph.supersede(root, ctx.sentence);
    }
    Ok(head)
}
