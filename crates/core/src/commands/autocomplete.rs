use super::node::{CommandGrammar, GrammarNode, candidates};
use itertools::Itertools;
use tracing::trace;

/// Candidates for the last (possibly partial, possibly empty) token.
///
/// Never parses values. Earlier tokens are routed with the binder's rule: an
/// exact literal wins, otherwise every typed sibling stays in play, since any
/// of them might accept the token. Nothing is suggested past a greedy node,
/// since it owns the rest of the line.
pub fn complete(grammar: &CommandGrammar, tokens: &[&str]) -> Vec<String> {
    let Some((partial, typed)) = tokens.split_last() else {
        return Vec::new();
    };

    let mut levels: Vec<&[GrammarNode]> = vec![grammar.nodes()];
    for token in typed {
        levels = levels
            .into_iter()
            .flat_map(|level| candidates(level, token))
            .filter(|node| !node.is_greedy())
            .map(GrammarNode::children)
            .collect();
        if levels.is_empty() {
            trace!(token, "no grammar node for token");
            return Vec::new();
        }
    }

    let prefix = partial.to_lowercase();
    levels
        .into_iter()
        .flatten()
        .flat_map(|node| node.suggest(partial))
        .filter(|candidate| candidate.to_lowercase().starts_with(&prefix))
        .unique()
        .collect()
}

/// Splits a raw line and completes it. Trailing whitespace starts a new,
/// empty token.
pub fn complete_line(grammar: &CommandGrammar, line: &str) -> Vec<String> {
    let mut tokens: Vec<&str> = line.split_whitespace().collect();
    if line.is_empty() || line.ends_with(char::is_whitespace) {
        tokens.push("");
    }
    complete(grammar, &tokens)
}
