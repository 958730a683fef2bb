use std::collections::HashSet;
use std::fmt;

use unicode_width::UnicodeWidthStr;

use super::{Graph, Node, NodeId, OrdSpan};

/// Indented rendering of the syntax tree under a node.
///
/// Heads are marked with `*`; every line ends with the word span of its
/// node, aligned in a column.
///
/// ```text
/// #1: John sleeps    [1,2]
/// └─*S: John sleeps  [1,2]
///   ├─*John/NNP      [1,1]
///   └─ sleeps/VBZ    [2,2]
/// ```
pub struct TreeDisplay<'a> {
    graph: &'a Graph,
    root: NodeId,
}

impl<'a> TreeDisplay<'a> {
    pub fn new(graph: &'a Graph, root: NodeId) -> Self {
        TreeDisplay { graph, root }
    }

    fn describe(&self, id: NodeId) -> String {
        match self.graph.node(id) {
            Node::Word(word) => match &word.ner {
                Some(ner) => format!("{}/{} |{}", word.form, word.pos, ner),
                None => format!("{}/{}", word.form, word.pos),
            },
            Node::Constituent(constituent) => format!("{}: {}", constituent.tag, constituent.form),
            Node::Sentence(sentence) => format!("#{}: {}", sentence.sentence_order, sentence.form),
            Node::NamedEntity(mention) | Node::GoldMention(mention) => mention.label.clone(),
        }
    }

    fn collect(
        &self,
        id: NodeId,
        prefix: &str,
        visited: &mut HashSet<NodeId>,
        lines: &mut Vec<(String, OrdSpan)>,
    ) {
        if !visited.insert(id) {
            return;
        }
        let head = self.graph.head(id);
        let children = self.graph.children(id);
        let last = children.len().saturating_sub(1);
        for (idx, child) in children.into_iter().enumerate() {
            let connector = if idx == last { "└─" } else { "├─" };
            let marker = if head == Some(child) { "*" } else { " " };
            lines.push((
                format!("{}{}{}{}", prefix, connector, marker, self.describe(child)),
                self.graph.node(child).ord(),
            ));
            let nested = if idx == last { "  " } else { "│ " };
            self.collect(child, &format!("{}{}", prefix, nested), visited, lines);
        }
    }
}

impl<'a> fmt::Display for TreeDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const SPAN_PADDING: usize = 2;

        let mut lines = vec![(self.describe(self.root), self.graph.node(self.root).ord())];
        self.collect(self.root, "", &mut HashSet::new(), &mut lines);

        let width = lines
            .iter()
            .map(|(text, _)| UnicodeWidthStr::width(text.as_str()))
            .max()
            .unwrap_or(0);

        for (idx, (text, (first, last))) in lines.iter().enumerate() {
            if idx > 0 {
                f.write_str("\n")?;
            }
            let padding = width - UnicodeWidthStr::width(text.as_str()) + SPAN_PADDING;
            write!(f, "{}{:padding$}[{},{}]", text, "", first, last, padding = padding)?;
        }

        Ok(())
    }
}
