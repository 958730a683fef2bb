//! Typed edges between graph nodes.

use super::NodeId;

/// Which index a mention came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MentionSource {
    /// Named-entity layer, or an entity-bearing constituent
    NamedEntity,
    /// Coreference chain of the annotation
    Gold,
}

/// The relationship an edge encodes.
///
/// Direction is always from the owning node: parent to child, constituent
/// to head, mention/sentence to word, sentence to mention, governor to
/// dependent.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    SyntaxChild,
    Head,
    WordOf,
    /// The target element belongs to the source sentence
    Member,
    MentionOf(MentionSource),
    Dependency { function: String },
}

impl EdgeKind {
    /// Stable label used in displays and queries.
    pub fn label(&self) -> &str {
        match self {
            EdgeKind::SyntaxChild => "syntax-child",
            EdgeKind::Head => "head-of",
            EdgeKind::WordOf => "word-of",
            EdgeKind::Member => "member",
            EdgeKind::MentionOf(MentionSource::NamedEntity) => "mention-of",
            EdgeKind::MentionOf(MentionSource::Gold) => "gold-mention-of",
            EdgeKind::Dependency { function } => function,
        }
    }

    /// Optional single-character glyph rendered before the label.
    pub fn glyph(&self) -> Option<&'static str> {
        match self {
            EdgeKind::Head => Some("*"),
            EdgeKind::MentionOf(_) => Some("@"),
            EdgeKind::Dependency { .. } => Some("→"),
            _ => None,
        }
    }

    /// Structural edges exist at most once per (source, target) pair.
    pub fn is_structural(&self) -> bool {
        !matches!(self, EdgeKind::Dependency { .. })
    }
}

/// A directed edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
    pub kind: EdgeKind,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_and_glyphs() {
        assert_eq!(EdgeKind::SyntaxChild.label(), "syntax-child");
        assert_eq!(EdgeKind::Head.glyph(), Some("*"));
        assert_eq!(EdgeKind::MentionOf(MentionSource::Gold).label(), "gold-mention-of");
        assert_eq!(EdgeKind::WordOf.glyph(), None);

        let dependency = EdgeKind::Dependency {
            function: "nsubj".to_string(),
        };
        assert_eq!(dependency.label(), "nsubj");
        assert!(!dependency.is_structural());
        assert!(EdgeKind::Member.is_structural());
    }
}
