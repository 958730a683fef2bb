//! Arena-backed document graph.
//!
//! Nodes live in a vector and are addressed by [`NodeId`]. Nothing is ever
//! physically removed: a node replaced during tree reconstruction is marked
//! [`NodeStatus::Superseded`] and every edge that pointed at it is
//! redirected to its replacement, so ids held elsewhere stay valid.

mod display;
mod edge;
mod node;

use std::collections::HashSet;

pub use display::TreeDisplay;
pub use edge::{Edge, EdgeKind, MentionSource};
pub use node::{
    ConstituentNode, DocType, MentionNode, Node, NodeKind, OrdSpan, SentenceNode, WordNode,
};

use crate::error::{GraphError, GraphResult};

/// Stable index of a node in its [`Graph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Lifecycle of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeStatus {
    Live,
    /// Replaced by another node; edges now point there
    Superseded(NodeId),
}

#[derive(Debug, Clone)]
struct NodeEntry {
    node: Node,
    status: NodeStatus,
    outgoing: Vec<usize>,
    incoming: Vec<usize>,
}

#[derive(Debug, Clone)]
struct EdgeEntry {
    edge: Edge,
    live: bool,
}

/// The attributed graph of one document.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: Vec<NodeEntry>,
    edges: Vec<EdgeEntry>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeEntry {
            node,
            status: NodeStatus::Live,
            outgoing: Vec::new(),
            incoming: Vec::new(),
        });
        id
    }

    /// Panics if `id` was not issued by this graph.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0].node
    }

    /// Panics if `id` was not issued by this graph.
    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0].node
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0).map(|entry| &entry.node)
    }

    pub fn status(&self, id: NodeId) -> NodeStatus {
        self.nodes[id.0].status
    }

    pub fn is_live(&self, id: NodeId) -> bool {
        self.status(id) == NodeStatus::Live
    }

    /// Follow supersession links to the node currently standing for `id`.
    pub fn resolve(&self, id: NodeId) -> NodeId {
        let mut current = id;
        for _ in 0..=self.nodes.len() {
            match self.status(current) {
                NodeStatus::Live => return current,
                NodeStatus::Superseded(next) => current = next,
            }
        }
        current
    }

    /// Number of nodes ever created, superseded ones included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn live_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|entry| entry.status == NodeStatus::Live)
            .count()
    }

    /// Live nodes in creation order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.status == NodeStatus::Live)
            .map(|(idx, entry)| (NodeId(idx), &entry.node))
    }

    /// First live node whose [`Node::name`] is `name`.
    pub fn node_by_name(&self, name: &str) -> Option<NodeId> {
        self.nodes()
            .find(|(_, node)| node.name() == name)
            .map(|(id, _)| id)
    }

    /// Live nodes of one kind, in creation order.
    pub fn nodes_of_kind(&self, kind: NodeKind) -> impl Iterator<Item = (NodeId, &Node)> + '_ {
        self.nodes().filter(move |(_, node)| node.kind() == kind)
    }

    /// Add an edge. Structural edges already present are not duplicated.
    ///
    /// Returns `true` when a new edge was stored.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, kind: EdgeKind) -> bool {
        if kind.is_structural() && self.find_edge(from, to, &kind).is_some() {
            return false;
        }
        let idx = self.edges.len();
        self.edges.push(EdgeEntry {
            edge: Edge { from, to, kind },
            live: true,
        });
        self.nodes[from.0].outgoing.push(idx);
        self.nodes[to.0].incoming.push(idx);
        true
    }

    fn find_edge(&self, from: NodeId, to: NodeId, kind: &EdgeKind) -> Option<usize> {
        self.nodes[from.0].outgoing.iter().copied().find(|&idx| {
            let entry = &self.edges[idx];
            entry.live && entry.edge.to == to && &entry.edge.kind == kind
        })
    }

    pub fn edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.edges
            .iter()
            .filter(|entry| entry.live)
            .map(|entry| &entry.edge)
    }

    pub fn edges_from(&self, id: NodeId) -> impl Iterator<Item = &Edge> + '_ {
        self.nodes[id.0]
            .outgoing
            .iter()
            .map(move |&idx| &self.edges[idx])
            .filter(|entry| entry.live)
            .map(|entry| &entry.edge)
    }

    pub fn edges_to(&self, id: NodeId) -> impl Iterator<Item = &Edge> + '_ {
        self.nodes[id.0]
            .incoming
            .iter()
            .map(move |&idx| &self.edges[idx])
            .filter(move |entry| entry.live && entry.edge.to == id)
            .map(|entry| &entry.edge)
    }

    pub fn link_syntax_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        self.add_edge(parent, child, EdgeKind::SyntaxChild)
    }

    /// Make `head` the single head of `parent`, replacing any previous one.
    pub fn set_head(&mut self, parent: NodeId, head: NodeId) -> GraphResult<()> {
        if parent == head || self.node(parent).kind() == NodeKind::Word {
            return Err(GraphError::InvalidHead { parent, head });
        }
        let previous: Vec<usize> = self.nodes[parent.0]
            .outgoing
            .iter()
            .copied()
            .filter(|&idx| self.edges[idx].live && self.edges[idx].edge.kind == EdgeKind::Head)
            .collect();
        for idx in previous {
            self.edges[idx].live = false;
        }
        self.add_edge(parent, head, EdgeKind::Head);
        Ok(())
    }

    /// Record that `word` is covered by `owner` (a mention or a sentence).
    pub fn link_word(&mut self, owner: NodeId, word: NodeId) -> bool {
        self.add_edge(owner, word, EdgeKind::WordOf)
    }

    pub fn link_member(&mut self, sentence: NodeId, element: NodeId) -> bool {
        self.add_edge(sentence, element, EdgeKind::Member)
    }

    pub fn add_mention(&mut self, sentence: NodeId, mention: NodeId, source: MentionSource) -> bool {
        self.add_edge(sentence, mention, EdgeKind::MentionOf(source))
    }

    pub fn link_dependency(&mut self, from: NodeId, to: NodeId, function: &str) {
        self.add_edge(
            from,
            to,
            EdgeKind::Dependency {
                function: function.to_string(),
            },
        );
    }

    /// Replace `old` by `new`.
    ///
    /// Edges pointing at `old` are redirected to `new` (dropping those that
    /// would duplicate an existing structural edge or loop on `new`); edges
    /// leaving `old` are dropped.
    pub fn supersede(&mut self, old: NodeId, new: NodeId) {
        if old == new {
            return;
        }
        let incoming = std::mem::take(&mut self.nodes[old.0].incoming);
        for idx in incoming {
            if !self.edges[idx].live || self.edges[idx].edge.to != old {
                continue;
            }
            let from = self.edges[idx].edge.from;
            let kind = self.edges[idx].edge.kind.clone();
            let duplicate = kind.is_structural() && self.find_edge(from, new, &kind).is_some();
            if from == new || duplicate {
                self.edges[idx].live = false;
                continue;
            }
            self.edges[idx].edge.to = new;
            self.nodes[new.0].incoming.push(idx);
        }

        let outgoing = std::mem::take(&mut self.nodes[old.0].outgoing);
        for idx in outgoing {
            self.edges[idx].live = false;
        }
        self.nodes[old.0].status = NodeStatus::Superseded(new);
    }

    fn targets(&self, id: NodeId, kind: &EdgeKind) -> Vec<NodeId> {
        self.edges_from(id)
            .filter(|edge| &edge.kind == kind)
            .map(|edge| edge.to)
            .collect()
    }

    fn sort_by_ord(&self, ids: &mut Vec<NodeId>) {
        ids.sort_by_key(|&id| (self.node(id).ord(), id));
        ids.dedup();
    }

    /// Syntactic children, in word order.
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        let mut children = self.targets(id, &EdgeKind::SyntaxChild);
        self.sort_by_ord(&mut children);
        children
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.edges_to(id)
            .find(|edge| edge.kind == EdgeKind::SyntaxChild)
            .map(|edge| edge.from)
    }

    pub fn head(&self, id: NodeId) -> Option<NodeId> {
        self.targets(id, &EdgeKind::Head).into_iter().next()
    }

    /// Follow head edges down to a word.
    pub fn head_word(&self, id: NodeId) -> Option<NodeId> {
        let mut current = id;
        for _ in 0..=self.nodes.len() {
            if self.node(current).kind() == NodeKind::Word {
                return Some(current);
            }
            current = self.head(current)?;
        }
        None
    }

    /// Every word reachable through syntax-child edges, in word order.
    pub fn words_under(&self, id: NodeId) -> Vec<NodeId> {
        let mut words = Vec::new();
        let mut visited = HashSet::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if !visited.insert(current) {
                continue;
            }
            if self.node(current).kind() == NodeKind::Word {
                words.push(current);
                continue;
            }
            stack.extend(self.targets(current, &EdgeKind::SyntaxChild));
        }
        self.sort_by_ord(&mut words);
        words
    }

    /// Words linked to a mention or sentence through word-of edges.
    pub fn words_of(&self, owner: NodeId) -> Vec<NodeId> {
        let mut words = self.targets(owner, &EdgeKind::WordOf);
        self.sort_by_ord(&mut words);
        words
    }

    /// Elements linked to a sentence through member edges.
    pub fn members(&self, sentence: NodeId) -> Vec<NodeId> {
        let mut members = self.targets(sentence, &EdgeKind::Member);
        self.sort_by_ord(&mut members);
        members
    }

    /// Mentions a sentence contains, from one source.
    pub fn mentions_in(&self, sentence: NodeId, source: MentionSource) -> Vec<NodeId> {
        let mut mentions = self.targets(sentence, &EdgeKind::MentionOf(source));
        self.sort_by_ord(&mut mentions);
        mentions
    }

    /// Outgoing dependencies with their function labels.
    pub fn dependencies_from(&self, id: NodeId) -> Vec<(NodeId, &str)> {
        self.edges_from(id)
            .filter_map(|edge| match &edge.kind {
                EdgeKind::Dependency { function } => Some((edge.to, function.as_str())),
                _ => None,
            })
            .collect()
    }
}
