//! Surface-form aggregation helpers.

use crate::graph::{Graph, NodeId};

/// Join tokens with single spaces, trimming the result.
pub fn join_tokens<I, S>(tokens: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut text = String::new();
    for token in tokens {
        if !text.is_empty() {
            text.push(' ');
        }
        text.push_str(token.as_ref());
    }
    text.trim().to_string()
}

/// Space-joined forms of `nodes`, in the given order.
pub fn expand_form(graph: &Graph, nodes: &[NodeId]) -> String {
    join_tokens(nodes.iter().map(|&id| graph.node(id).form()))
}

/// Space-joined lemmas of `nodes`, in the given order.
pub fn expand_lemma(graph: &Graph, nodes: &[NodeId]) -> String {
    join_tokens(nodes.iter().map(|&id| graph.node(id).lemma()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_with_single_spaces() {
        assert_eq!(join_tokens(["New", "York"]), "New York");
        assert_eq!(join_tokens(vec!["solo".to_string()]), "solo");
        assert_eq!(join_tokens(Vec::<String>::new()), "");
    }

    #[test]
    fn trims_outer_whitespace() {
        assert_eq!(join_tokens([" a", "b "]), "a b");
    }
}
