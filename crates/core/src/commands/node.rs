use super::argument::ArgumentType;
use super::error::InternalError;
use std::fmt;
use std::sync::Arc;

pub type SuggestionProvider = Arc<dyn Fn(&str) -> Vec<String> + Send + Sync>;

/// One token position in a command grammar.
#[derive(Clone)]
pub struct GrammarNode {
    pub(super) name: String,
    pub(super) kind: NodeKind,
    pub(super) children: Vec<GrammarNode>,
    pub(super) executes: bool,
    pub(super) suggestions: Option<SuggestionProvider>,
}

#[derive(Clone)]
pub enum NodeKind {
    /// Matches its own name exactly, case-sensitive.
    Literal,
    Typed(Arc<dyn ArgumentType>),
}

impl GrammarNode {
    pub fn literal(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::Literal,
            children: Vec::new(),
            executes: false,
            suggestions: None,
        }
    }

    /// Typed nodes are executing stops unless marked otherwise.
    pub fn required(name: impl Into<String>, arg_type: impl ArgumentType + 'static) -> Self {
        Self::required_shared(name, Arc::new(arg_type))
    }

    pub fn required_shared(name: impl Into<String>, arg_type: Arc<dyn ArgumentType>) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::Typed(arg_type),
            children: Vec::new(),
            executes: true,
            suggestions: None,
        }
    }

    pub fn then(mut self, child: GrammarNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn mark_executes(mut self) -> Self {
        self.executes = true;
        self
    }

    pub fn mark_not_executes(mut self) -> Self {
        self.executes = false;
        self
    }

    /// Replaces the argument type's suggestions for this node.
    pub fn suggests<F>(mut self, provider: F) -> Self
    where
        F: Fn(&str) -> Vec<String> + Send + Sync + 'static,
    {
        let NodeKind::Typed(_) = &self.kind else {
            panic!("Can not attach suggestions to literal grammar nodes")
        };
        self.suggestions = Some(Arc::new(provider));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn children(&self) -> &[GrammarNode] {
        &self.children
    }

    pub fn executes(&self) -> bool {
        self.executes
    }

    pub fn is_literal(&self) -> bool {
        matches!(self.kind, NodeKind::Literal)
    }

    pub fn argument_type(&self) -> Option<&dyn ArgumentType> {
        match &self.kind {
            NodeKind::Literal => None,
            NodeKind::Typed(arg_type) => Some(arg_type.as_ref()),
        }
    }

    pub fn is_greedy(&self) -> bool {
        self.argument_type().is_some_and(|arg| arg.is_greedy())
    }

    pub(super) fn suggest(&self, partial: &str) -> Vec<String> {
        match (&self.kind, &self.suggestions) {
            (NodeKind::Literal, _) => vec![self.name.clone()],
            (NodeKind::Typed(_), Some(provider)) => provider(partial),
            (NodeKind::Typed(arg_type), None) => arg_type.suggest(partial),
        }
    }

    fn check_names(&self) -> Result<(), InternalError> {
        if self.name.is_empty() {
            return Err(InternalError::EmptyName);
        }
        self.children.iter().try_for_each(GrammarNode::check_names)
    }
}

impl fmt::Debug for GrammarNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("GrammarNode");
        s.field("name", &self.name);
        if let NodeKind::Typed(arg_type) = &self.kind {
            s.field("type", &arg_type.type_name());
        }
        s.field("executes", &self.executes)
            .field("children", &self.children)
            .finish()
    }
}

/// The children that may consume `token`: the first literal whose name equals
/// it, otherwise every typed child in declaration order. Typed children are
/// not parsed here; the binder tries them in the returned order.
pub(super) fn candidates<'g>(children: &'g [GrammarNode], token: &str) -> Vec<&'g GrammarNode> {
    match children
        .iter()
        .find(|child| child.is_literal() && child.name == token)
    {
        Some(literal) => vec![literal],
        None => children.iter().filter(|child| !child.is_literal()).collect(),
    }
}

/// The declared syntax of one command. Immutable once built.
#[derive(Debug, Clone)]
pub struct CommandGrammar {
    nodes: Vec<GrammarNode>,
    executes: bool,
}

impl CommandGrammar {
    pub fn builder() -> GrammarBuilder {
        GrammarBuilder::default()
    }

    pub fn nodes(&self) -> &[GrammarNode] {
        &self.nodes
    }

    /// Whether the command runs when invoked with no arguments.
    pub fn executes(&self) -> bool {
        self.executes
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// First node named `name` in depth-first order.
    pub fn find(&self, name: &str) -> Option<&GrammarNode> {
        fn find_in<'g>(nodes: &'g [GrammarNode], name: &str) -> Option<&'g GrammarNode> {
            nodes.iter().find_map(|node| {
                if node.name == name {
                    Some(node)
                } else {
                    find_in(&node.children, name)
                }
            })
        }
        find_in(&self.nodes, name)
    }

    /// Every typed node in depth-first order, paired with the number of typed
    /// ancestors on its path. Literals route but never take a slot.
    pub fn addressable(&self) -> Vec<(&GrammarNode, usize)> {
        fn collect<'g>(
            nodes: &'g [GrammarNode],
            slot: usize,
            out: &mut Vec<(&'g GrammarNode, usize)>,
        ) {
            for node in nodes {
                if node.is_literal() {
                    collect(&node.children, slot, out);
                } else {
                    out.push((node, slot));
                    collect(&node.children, slot + 1, out);
                }
            }
        }
        let mut out = Vec::new();
        collect(&self.nodes, 0, &mut out);
        out
    }
}

#[derive(Default)]
pub struct GrammarBuilder {
    nodes: Vec<GrammarNode>,
    executes: bool,
}

impl GrammarBuilder {
    pub fn then(mut self, node: GrammarNode) -> Self {
        self.nodes.push(node);
        self
    }

    pub fn mark_executes(mut self) -> Self {
        self.executes = true;
        self
    }

    /// The tree must be acyclic; ownership of every child already guarantees it.
    pub fn build(self) -> Result<CommandGrammar, InternalError> {
        self.nodes.iter().try_for_each(GrammarNode::check_names)?;
        Ok(CommandGrammar {
            nodes: self.nodes,
            executes: self.executes,
        })
    }
}
