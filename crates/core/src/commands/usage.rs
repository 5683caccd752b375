use super::node::{CommandGrammar, GrammarNode, NodeKind};
use itertools::Itertools;

/// Renders the argument part of the usage string.
///
/// Nodes are laid out in columns by depth: every node at one depth, across
/// all branches, is joined with `|` in declaration order, and the columns are
/// joined with spaces. Typed nodes render as `<name>`, or `[<name>]` when
/// they execute.
pub fn generate_usage(grammar: &CommandGrammar) -> String {
    let mut columns = Vec::new();
    collect_columns(grammar.nodes(), 0, &mut columns);
    columns
        .iter()
        .map(|column| column.iter().unique().join("|"))
        .join(" ")
}

/// `/alias` followed by the argument usage, if any.
pub fn generate_command_usage(grammar: &CommandGrammar, alias: &str) -> String {
    let usage = generate_usage(grammar);
    if usage.is_empty() {
        format!("/{}", alias)
    } else {
        format!("/{} {}", alias, usage)
    }
}

fn collect_columns(nodes: &[GrammarNode], depth: usize, columns: &mut Vec<Vec<String>>) {
    if nodes.is_empty() {
        return;
    }
    if columns.len() <= depth {
        columns.resize_with(depth + 1, Vec::new);
    }

    for node in nodes {
        columns[depth].push(get_display_name(node));
        collect_columns(&node.children, depth + 1, columns);
    }
}

fn get_display_name(node: &GrammarNode) -> String {
    match node.kind() {
        NodeKind::Literal => node.name().to_string(),
        NodeKind::Typed(_) if node.executes() => format!("[<{}>]", node.name()),
        NodeKind::Typed(_) => format!("<{}>", node.name()),
    }
}
