//! Term extraction: one word node per annotation term.
//!
//! Besides copying the morphological layer, extraction decides the
//! discourse context of every term: who speaks it, which utterance it
//! belongs to and whether it sits inside a quotation.

use std::collections::{HashMap, VecDeque};

use layered_graph_reader::{AnnotationReader, Dialect, WordRecord};

use crate::error::{GraphError, GraphResult};
use crate::graph::{DocType, Graph, Node, NodeId, WordNode};
use crate::text::join_tokens;

const UNKNOWN_LEMMA: &str = "-";
const UNKNOWN_SPEAKER: &str = "-";

/// Speaker labels, one per term, from a newline-delimited listing.
#[derive(Debug, Clone, Default)]
pub struct SpeakerTurns {
    labels: VecDeque<String>,
    turns: usize,
}

impl SpeakerTurns {
    /// Blank lines are ignored; `turns` counts runs of equal labels.
    pub fn parse(text: &str) -> Self {
        let mut labels = VecDeque::new();
        let mut turns = 0;
        let mut current: Option<&str> = None;
        for line in text.split('\n') {
            if line.is_empty() {
                continue;
            }
            if current != Some(line) {
                turns += 1;
                current = Some(line);
            }
            labels.push_back(line.to_string());
        }
        Self { labels, turns }
    }

    pub fn turns(&self) -> usize {
        self.turns
    }

    /// A document with at least two speaker turns is a conversation.
    pub fn doc_type(&self) -> DocType {
        if self.turns >= 2 {
            DocType::Conversation
        } else {
            DocType::Article
        }
    }

    fn next_label(&mut self) -> Option<String> {
        self.labels.pop_front()
    }
}

/// Quotation scopes opened and closed while walking the terms.
///
/// Every scope gets its own synthetic utterance id, allocated past the ids
/// used by speaker turns.
#[derive(Debug, Clone)]
pub struct QuoteTracker {
    stack: Vec<usize>,
    inside_plain_quotes: bool,
    last_utterance: usize,
    unbalanced: usize,
}

impl QuoteTracker {
    pub fn new(last_utterance: usize) -> Self {
        Self {
            stack: Vec::new(),
            inside_plain_quotes: false,
            last_utterance,
            unbalanced: 0,
        }
    }

    /// Update the scope stack for a term surface form.
    ///
    /// Plain `"` marks cannot be told apart, so they alternate between
    /// opening and closing.
    pub fn observe(&mut self, form: &str) {
        let plain = form == "\"";
        if form == "``" || (plain && !self.inside_plain_quotes) {
            self.last_utterance += 1;
            self.stack.push(self.last_utterance);
            if plain {
                self.inside_plain_quotes = true;
            }
        } else if form == "''" || (plain && self.inside_plain_quotes) {
            if plain {
                self.inside_plain_quotes = false;
            }
            if self.stack.pop().is_none() {
                self.unbalanced += 1;
                log::warn!("Unbalanced quotes: closing {:?} without an opening mark", form);
            }
        }
    }

    /// Utterance id of the innermost open scope.
    pub fn current(&self) -> Option<usize> {
        self.stack.last().copied()
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Closing marks seen without a matching opening mark.
    pub fn unbalanced(&self) -> usize {
        self.unbalanced
    }
}

/// Word nodes of a document and the maps used to find them.
#[derive(Debug, Clone, Default)]
pub struct TermIndex {
    pub by_id: HashMap<String, NodeId>,
    /// Word id to the node of the term covering it
    pub by_word_id: HashMap<String, NodeId>,
    /// Word nodes in document order
    pub pool: Vec<NodeId>,
}

impl TermIndex {
    pub fn get(&self, term_id: &str) -> Option<NodeId> {
        self.by_id.get(term_id).copied()
    }

    pub fn get_by_word(&self, word_id: &str) -> Option<NodeId> {
        self.by_word_id.get(word_id).copied()
    }

    pub fn len(&self) -> usize {
        self.pool.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pool.is_empty()
    }
}

fn word_order(dialect: Dialect, word: &WordRecord) -> GraphResult<usize> {
    dialect
        .numeric_part(&word.id)
        .ok_or_else(|| GraphError::MalformedId {
            id: word.id.clone(),
        })
}

/// Create one word node per term of `reader`.
///
/// `speakers` is the optional per-term speaker listing.
pub fn extract_terms<R: AnnotationReader + ?Sized>(
    graph: &mut Graph,
    reader: &R,
    dialect: Dialect,
    speakers: Option<&str>,
) -> GraphResult<TermIndex> {
    let words: HashMap<&str, &WordRecord> = reader
        .words()
        .iter()
        .map(|word| (word.id.as_str(), word))
        .collect();

    let mut speakers = speakers.map(SpeakerTurns::parse);
    let (doc_type, last_utterance) = match &speakers {
        Some(turns) => (turns.doc_type(), turns.turns().saturating_sub(1)),
        None => (DocType::Article, 1),
    };
    let mut quotes = QuoteTracker::new(last_utterance);

    let mut index = TermIndex::default();
    let mut utterance = 0;
    let mut prev_speaker: Option<String> = None;

    for term in reader.terms() {
        let mut term_words = term
            .words
            .iter()
            .map(|word_id| {
                words
                    .get(word_id.as_str())
                    .copied()
                    .ok_or_else(|| GraphError::MissingRecord {
                        kind: "word",
                        id: word_id.clone(),
                    })
            })
            .collect::<GraphResult<Vec<_>>>()?;
        term_words.sort_by_key(|word| word.offset);

        let (first, last) = match (term_words.first(), term_words.last()) {
            (Some(first), Some(last)) => (*first, *last),
            _ => {
                return Err(GraphError::EmptySpan {
                    kind: "term",
                    id: term.id.clone(),
                })
            }
        };
        if index.by_id.contains_key(&term.id) {
            return Err(GraphError::DuplicateRecord {
                kind: "term",
                id: term.id.clone(),
            });
        }

        let form = join_tokens(term_words.iter().map(|word| word.text.as_str()));
        let lemma = match term.lemma.as_deref() {
            Some(lemma) if lemma != UNKNOWN_LEMMA => lemma.to_string(),
            _ => form.clone(),
        };
        let ord = (word_order(dialect, first)?, word_order(dialect, last)?);
        let begin = first.offset;
        let end = (last.offset + last.length).saturating_sub(1);
        let source_ref = format!(
            "{}#{}",
            term.id,
            term_words
                .iter()
                .map(|word| word.id.as_str())
                .collect::<Vec<_>>()
                .join("|")
        );

        let previous = prev_speaker.clone();
        let label = speakers.as_mut().and_then(SpeakerTurns::next_label);
        let turn_speaker = match label {
            Some(label) => {
                let speaker = label.replace('_', " ");
                if prev_speaker.as_deref() != Some(speaker.as_str()) {
                    if prev_speaker.is_some() {
                        utterance += 1;
                    }
                    prev_speaker = Some(speaker.clone());
                }
                if speaker.is_empty() || speaker == UNKNOWN_SPEAKER {
                    format!("PER{}", utterance)
                } else {
                    speaker
                }
            }
            None => format!("PER{}", utterance),
        };

        quotes.observe(&form);
        let (speaker, word_utterance, quoted) = match quotes.current() {
            Some(scope) => (format!("PER{}", scope), scope, true),
            None => (turn_speaker, utterance, false),
        };

        let node = graph.add_node(Node::Word(WordNode {
            id: term.id.clone(),
            label: format!("{}\n{}\n{}\n{}", form, term.morphofeat, lemma, term.id),
            form,
            lemma,
            pos: term.morphofeat.clone(),
            ord,
            begin,
            end,
            speaker,
            prev_speaker: previous,
            utterance: word_utterance,
            quoted,
            quote_depth: quotes.depth(),
            doc_type,
            source_ref,
            ner: None,
        }));

        for word in &term_words {
            index.by_word_id.insert(word.id.clone(), node);
        }
        index.by_id.insert(term.id.clone(), node);
        index.pool.push(node);
    }

    if quotes.depth() > 0 {
        log::warn!(
            "Unbalanced quotes: {} quotation scope(s) still open at document end",
            quotes.depth()
        );
    }

    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speaker_turns_count_changes() {
        let turns = SpeakerTurns::parse("A\nA\n\nB\nA\n");
        assert_eq!(turns.turns(), 3);
        assert_eq!(turns.doc_type(), DocType::Conversation);

        let single = SpeakerTurns::parse("A\nA\nA");
        assert_eq!(single.turns(), 1);
        assert_eq!(single.doc_type(), DocType::Article);
    }

    #[test]
    fn nested_quotes() {
        let mut quotes = QuoteTracker::new(1);
        quotes.observe("``");
        assert_eq!(quotes.current(), Some(2));
        quotes.observe("``");
        assert_eq!(quotes.depth(), 2);
        assert_eq!(quotes.current(), Some(3));
        quotes.observe("''");
        assert_eq!(quotes.current(), Some(2));
        quotes.observe("''");
        assert_eq!(quotes.depth(), 0);
        assert_eq!(quotes.unbalanced(), 0);
    }

    #[test]
    fn plain_quotes_toggle() {
        let mut quotes = QuoteTracker::new(1);
        quotes.observe("\"");
        assert_eq!(quotes.depth(), 1);
        quotes.observe("word");
        assert_eq!(quotes.depth(), 1);
        quotes.observe("\"");
        assert_eq!(quotes.depth(), 0);
    }

    #[test]
    fn stray_closing_quote_is_counted() {
        let mut quotes = QuoteTracker::new(1);
        quotes.observe("''");
        assert_eq!(quotes.depth(), 0);
        assert_eq!(quotes.unbalanced(), 1);
        quotes.observe("``");
        assert_eq!(quotes.current(), Some(2));
    }
}
