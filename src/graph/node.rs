//! Node variants of the document graph.

/// Inclusive `(first, last)` word positions; doubles as the total order key.
pub type OrdSpan = (usize, usize);

/// Whether the document is a dialogue or running text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DocType {
    Conversation,
    #[default]
    Article,
}

/// One annotation term.
#[derive(Debug, Clone, PartialEq)]
pub struct WordNode {
    /// Term identifier
    pub id: String,
    pub form: String,
    pub lemma: String,
    pub pos: String,
    /// `form\npos\nlemma\nid`
    pub label: String,
    pub ord: OrdSpan,
    /// Character offset of the first character
    pub begin: usize,
    /// Character offset of the last character (inclusive)
    pub end: usize,
    pub speaker: String,
    /// Speaker label in effect before this term
    pub prev_speaker: Option<String>,
    pub utterance: usize,
    pub quoted: bool,
    /// Number of open quotation scopes around this term
    pub quote_depth: usize,
    pub doc_type: DocType,
    /// `term#word|word` reference back into the source document
    pub source_ref: String,
    /// Inline named-entity type from a bracketed tree
    pub ner: Option<String>,
}

impl WordNode {
    /// Alias of [`ord`](Self::ord) kept for span-based consumers.
    pub fn span(&self) -> OrdSpan {
        self.ord
    }
}

/// A syntactic constituent.
///
/// Aggregated fields (`form`, `lemma`, offsets, `ord`, discourse fields) are
/// empty until the subtree under the constituent is resolved.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConstituentNode {
    /// Record id (`n3`) or a generated one (`C3`)
    pub node_id: String,
    pub tag: String,
    /// Creation sequence number, only meaningful as a tie-break
    pub order: usize,
    pub label: String,
    pub form: String,
    pub lemma: String,
    pub begin: usize,
    pub end: usize,
    pub ord: OrdSpan,
    pub doc_type: DocType,
    pub utterance: usize,
    pub quoted: bool,
    pub ner: Option<String>,
}

impl ConstituentNode {
    pub fn new(node_id: impl Into<String>, tag: impl Into<String>, order: usize, label: impl Into<String>) -> Self {
        Self {
            node_id: node_id.into(),
            tag: tag.into(),
            order,
            label: label.into(),
            ..Default::default()
        }
    }

    pub fn span(&self) -> OrdSpan {
        self.ord
    }
}

/// A named entity reference or a gold coreference mention.
#[derive(Debug, Clone, PartialEq)]
pub struct MentionNode {
    pub id: String,
    /// Entity type, `Gold` for coreference mentions
    pub entity_type: String,
    /// `form | type`
    pub label: String,
    pub form: String,
    pub begin: usize,
    pub end: usize,
    pub ord: OrdSpan,
}

/// Root of one sentence.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SentenceNode {
    pub id: String,
    pub label: String,
    /// 1-based position in the document
    pub sentence_order: usize,
    pub form: String,
    pub lemma: String,
    pub ord: OrdSpan,
    pub begin: usize,
    pub end: usize,
}

/// Discriminant of [`Node`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Word,
    Constituent,
    NamedEntity,
    GoldMention,
    Sentence,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Word(WordNode),
    Constituent(ConstituentNode),
    NamedEntity(MentionNode),
    GoldMention(MentionNode),
    Sentence(SentenceNode),
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Word(_) => NodeKind::Word,
            Node::Constituent(_) => NodeKind::Constituent,
            Node::NamedEntity(_) => NodeKind::NamedEntity,
            Node::GoldMention(_) => NodeKind::GoldMention,
            Node::Sentence(_) => NodeKind::Sentence,
        }
    }

    /// Identifier of the node within its kind.
    pub fn name(&self) -> &str {
        match self {
            Node::Word(word) => &word.id,
            Node::Constituent(constituent) => &constituent.node_id,
            Node::NamedEntity(mention) | Node::GoldMention(mention) => &mention.id,
            Node::Sentence(sentence) => &sentence.id,
        }
    }

    pub fn form(&self) -> &str {
        match self {
            Node::Word(word) => &word.form,
            Node::Constituent(constituent) => &constituent.form,
            Node::NamedEntity(mention) | Node::GoldMention(mention) => &mention.form,
            Node::Sentence(sentence) => &sentence.form,
        }
    }

    /// Lemma; mentions have none and report their form.
    pub fn lemma(&self) -> &str {
        match self {
            Node::Word(word) => &word.lemma,
            Node::Constituent(constituent) => &constituent.lemma,
            Node::NamedEntity(mention) | Node::GoldMention(mention) => &mention.form,
            Node::Sentence(sentence) => &sentence.lemma,
        }
    }

    pub fn ord(&self) -> OrdSpan {
        match self {
            Node::Word(word) => word.ord,
            Node::Constituent(constituent) => constituent.ord,
            Node::NamedEntity(mention) | Node::GoldMention(mention) => mention.ord,
            Node::Sentence(sentence) => sentence.ord,
        }
    }

    pub fn begin(&self) -> usize {
        match self {
            Node::Word(word) => word.begin,
            Node::Constituent(constituent) => constituent.begin,
            Node::NamedEntity(mention) | Node::GoldMention(mention) => mention.begin,
            Node::Sentence(sentence) => sentence.begin,
        }
    }

    pub fn end(&self) -> usize {
        match self {
            Node::Word(word) => word.end,
            Node::Constituent(constituent) => constituent.end,
            Node::NamedEntity(mention) | Node::GoldMention(mention) => mention.end,
            Node::Sentence(sentence) => sentence.end,
        }
    }

    pub fn as_word(&self) -> Option<&WordNode> {
        match self {
            Node::Word(word) => Some(word),
            _ => None,
        }
    }

    pub fn as_word_mut(&mut self) -> Option<&mut WordNode> {
        match self {
            Node::Word(word) => Some(word),
            _ => None,
        }
    }

    pub fn as_constituent(&self) -> Option<&ConstituentNode> {
        match self {
            Node::Constituent(constituent) => Some(constituent),
            _ => None,
        }
    }

    pub fn as_constituent_mut(&mut self) -> Option<&mut ConstituentNode> {
        match self {
            Node::Constituent(constituent) => Some(constituent),
            _ => None,
        }
    }

    pub fn as_mention(&self) -> Option<&MentionNode> {
        match self {
            Node::NamedEntity(mention) | Node::GoldMention(mention) => Some(mention),
            _ => None,
        }
    }

    pub fn as_sentence(&self) -> Option<&SentenceNode> {
        match self {
            Node::Sentence(sentence) => Some(sentence),
            _ => None,
        }
    }

    pub fn as_sentence_mut(&mut self) -> Option<&mut SentenceNode> {
        match self {
            Node::Sentence(sentence) => Some(sentence),
            _ => None,
        }
    }
}
