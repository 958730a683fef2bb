//! Bracketed (Penn Treebank) tree parsing.
//!
//! `(S (NP=H John) (VP loves (NP Mary)))` parses into branches and leaves.
//! A bracket holding a single bare token is a leaf carrying the bracket's
//! label; a bare token next to other children is an unlabelled leaf.

use crate::error::{GraphError, GraphResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PennTree {
    Branch {
        label: String,
        children: Vec<PennTree>,
    },
    Leaf {
        label: Option<String>,
        token: String,
    },
}

impl PennTree {
    pub fn label(&self) -> Option<&str> {
        match self {
            PennTree::Branch { label, .. } => Some(label),
            PennTree::Leaf { label, .. } => label.as_deref(),
        }
    }

    /// Leaf tokens, left to right.
    pub fn tokens(&self) -> Vec<&str> {
        let mut tokens = Vec::new();
        self.collect_tokens(&mut tokens);
        tokens
    }

    fn collect_tokens<'a>(&'a self, tokens: &mut Vec<&'a str>) {
        match self {
            PennTree::Branch { children, .. } => {
                for child in children {
                    child.collect_tokens(tokens);
                }
            }
            PennTree::Leaf { token, .. } => tokens.push(token),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token<'a> {
    Open,
    Close,
    Atom(&'a str),
}

fn tokenize(input: &str) -> Vec<(usize, Token<'_>)> {
    let mut tokens = Vec::new();
    let mut atom_start: Option<usize> = None;

    for (pos, ch) in input.char_indices() {
        if ch == '(' || ch == ')' || ch.is_whitespace() {
            if let Some(start) = atom_start.take() {
                tokens.push((start, Token::Atom(&input[start..pos])));
            }
            match ch {
                '(' => tokens.push((pos, Token::Open)),
                ')' => tokens.push((pos, Token::Close)),
                _ => {}
            }
        } else if atom_start.is_none() {
            atom_start = Some(pos);
        }
    }
    if let Some(start) = atom_start {
        tokens.push((start, Token::Atom(&input[start..])));
    }
    tokens
}

struct Parser<'a> {
    tokens: Vec<(usize, Token<'a>)>,
    cursor: usize,
    input_len: usize,
}

impl<'a> Parser<'a> {
    fn error(&self, message: &str) -> GraphError {
        let position = self
            .tokens
            .get(self.cursor)
            .map(|(pos, _)| *pos)
            .unwrap_or(self.input_len);
        GraphError::Treebank {
            position,
            message: message.to_string(),
        }
    }

    fn next(&mut self) -> Option<Token<'a>> {
        let token = self.tokens.get(self.cursor).map(|(_, token)| token.clone());
        if token.is_some() {
            self.cursor += 1;
        }
        token
    }

    fn peek(&self) -> Option<&Token<'a>> {
        self.tokens.get(self.cursor).map(|(_, token)| token)
    }

    /// Parse a bracket whose `(` has already been consumed.
    fn bracket(&mut self) -> GraphResult<PennTree> {
        let label = match self.peek() {
            Some(Token::Atom(atom)) => {
                let label = atom.to_string();
                self.cursor += 1;
                label
            }
            _ => String::new(),
        };

        let mut children = Vec::new();
        loop {
            match self.next() {
                Some(Token::Close) => break,
                Some(Token::Open) => children.push(self.bracket()?),
                Some(Token::Atom(atom)) => children.push(PennTree::Leaf {
                    label: None,
                    token: atom.to_string(),
                }),
                None => return Err(self.error("unclosed bracket")),
            }
        }

        match children.len() {
            0 => Err(self.error(&format!("empty constituent {:?}", label))),
            1 => match children.pop() {
                Some(PennTree::Leaf { label: None, token }) => Ok(PennTree::Leaf {
                    label: Some(label),
                    token,
                }),
                // `( (S ...) )` wrappers carry no information
                Some(child) if label.is_empty() => Ok(child),
                Some(child) => Ok(PennTree::Branch {
                    label,
                    children: vec![child],
                }),
                None => Err(self.error("empty constituent")),
            },
            _ => Ok(PennTree::Branch { label, children }),
        }
    }
}

/// Parse one bracketed sentence tree.
pub fn parse_tree(input: &str) -> GraphResult<PennTree> {
    let input = input.trim();
    let mut parser = Parser {
        tokens: tokenize(input),
        cursor: 0,
        input_len: input.len(),
    };

    let tree = match parser.next() {
        Some(Token::Open) => parser.bracket()?,
        Some(Token::Atom(atom)) => PennTree::Leaf {
            label: None,
            token: atom.to_string(),
        },
        Some(Token::Close) => {
            parser.cursor -= 1;
            return Err(parser.error("unexpected ')'"));
        }
        None => return Err(parser.error("empty tree")),
    };

    if parser.peek().is_some() {
        return Err(parser.error("trailing input after tree"));
    }
    Ok(tree)
}
