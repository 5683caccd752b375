use super::error::{CommandResult, InternalError, ParseFailure, RuntimeError};
use super::node::GrammarNode;
use super::value::{FromValue, Value};
use std::any::Any;

/// Where a binding's text sits, counted in whitespace-delimited tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    Index(usize),
    /// Inclusive range, only produced by greedy nodes.
    Range { start: usize, end: usize },
}

impl Position {
    pub fn start(&self) -> usize {
        match *self {
            Position::Index(index) => index,
            Position::Range { start, .. } => start,
        }
    }

    pub fn end(&self) -> usize {
        match *self {
            Position::Index(index) => index,
            Position::Range { end, .. } => end,
        }
    }

    pub fn is_range(&self) -> bool {
        matches!(self, Position::Range { .. })
    }
}

/// The outcome of matching one typed node against the input.
///
/// A node the walk never reached has every field absent. A reached node has
/// `raw_text` and `position`, plus exactly one of `value` or `failure`.
#[derive(Debug, Clone)]
pub struct Binding<'g> {
    pub(super) node: &'g GrammarNode,
    pub(super) slot: usize,
    pub(super) raw_text: Option<String>,
    pub(super) value: Option<Value>,
    pub(super) position: Option<Position>,
    pub(super) failure: Option<ParseFailure>,
}

impl<'g> Binding<'g> {
    pub(super) fn unreached(node: &'g GrammarNode, slot: usize) -> Self {
        Self {
            node,
            slot,
            raw_text: None,
            value: None,
            position: None,
            failure: None,
        }
    }

    pub fn node(&self) -> &'g GrammarNode {
        self.node
    }

    pub fn name(&self) -> &'g str {
        self.node.name()
    }

    /// Number of typed ancestors of the node.
    pub fn slot(&self) -> usize {
        self.slot
    }

    pub fn raw_text(&self) -> Option<&str> {
        self.raw_text.as_deref()
    }

    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    pub fn position(&self) -> Option<Position> {
        self.position
    }

    pub fn failure(&self) -> Option<&ParseFailure> {
        self.failure.as_ref()
    }

    pub fn is_attempted(&self) -> bool {
        self.raw_text.is_some() || self.failure.is_some()
    }
}

/// How the binder's walk ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindStatus {
    /// Input exhausted on a node (or an empty line on a root) that executes.
    Complete,
    /// Input exhausted on a node that does not execute.
    Partial,
    InvalidArgument { name: String },
    /// Input left over after a node with no children.
    TooManyArguments { remaining: String },
    /// Input left over that no child accepted.
    Unmatched { remaining: String },
}

/// Every binding produced by one parse of one input line.
#[derive(Debug, Clone)]
pub struct BindingSet<'g> {
    pub(super) bindings: Vec<Binding<'g>>,
    pub(super) token_count: usize,
    pub(super) terminal: Option<&'g GrammarNode>,
    pub(super) status: BindStatus,
}

impl<'g> BindingSet<'g> {
    pub fn bindings(&self) -> &[Binding<'g>] {
        &self.bindings
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn token_count(&self) -> usize {
        self.token_count
    }

    pub fn status(&self) -> &BindStatus {
        &self.status
    }

    pub fn should_execute(&self) -> bool {
        self.status == BindStatus::Complete
    }

    /// The last node the walk consumed, literal or typed. `None` when nothing
    /// was consumed.
    pub fn terminal_node(&self) -> Option<&'g GrammarNode> {
        self.terminal
    }

    /// Bindings share names across branches; prefer the one the walk reached.
    pub fn get_binding(&self, name: &str) -> CommandResult<&Binding<'g>> {
        let mut named = self.bindings.iter().filter(|b| b.name() == name).peekable();
        let first = named.peek().copied().ok_or_else(|| InternalError::UnknownArgument {
            name: name.to_string(),
        })?;
        Ok(named.find(|b| b.is_attempted()).unwrap_or(first))
    }

    pub fn is_bound(&self, name: &str) -> CommandResult<bool> {
        Ok(self.get_binding(name)?.is_attempted())
    }

    /// The exact text the walk matched to `name`, whether or not it parsed.
    /// Use `typed_value` or `require` to tell a failed parse apart.
    pub fn raw_value(&self, name: &str) -> CommandResult<Option<&str>> {
        Ok(self.get_binding(name)?.raw_text())
    }

    pub fn slot(&self, name: &str) -> CommandResult<usize> {
        Ok(self.get_binding(name)?.slot)
    }

    /// `Ok(None)` when the node was not reached or failed to parse.
    pub fn typed_value<T: FromValue>(&self, name: &str) -> CommandResult<Option<T>> {
        let binding = self.get_binding(name)?;
        let Some(value) = &binding.value else {
            return Ok(None);
        };
        match T::from_value(value) {
            Some(value) => Ok(Some(value)),
            None => Err(InternalError::WrongArgumentType {
                name: name.to_string(),
                expected: T::EXPECTED.to_string(),
                found: value.kind().to_string(),
            }
            .into()),
        }
    }

    /// Like `typed_value`, but an absent value becomes a runtime error the
    /// handler can hand back to the invoker.
    pub fn require<T: FromValue>(&self, name: &str) -> CommandResult<T> {
        if let Some(value) = self.typed_value(name)? {
            return Ok(value);
        }
        Err(self.unavailable(name)?.into())
    }

    pub fn custom_value<T: Any>(&self, name: &str) -> CommandResult<Option<&T>> {
        let binding = self.get_binding(name)?;
        let Some(value) = &binding.value else {
            return Ok(None);
        };
        match value.downcast_ref::<T>() {
            Some(value) => Ok(Some(value)),
            None => Err(InternalError::WrongArgumentType {
                name: name.to_string(),
                expected: std::any::type_name::<T>().to_string(),
                found: value.kind().to_string(),
            }
            .into()),
        }
    }

    fn unavailable(&self, name: &str) -> CommandResult<RuntimeError> {
        let binding = self.get_binding(name)?;
        Ok(match &binding.failure {
            Some(failure) => RuntimeError::InvalidArgument(failure.clone()),
            None => RuntimeError::MissingArgument {
                name: name.to_string(),
            },
        })
    }

    /// The failed binding if there is one, otherwise the binding whose
    /// position ends on the last token.
    pub fn last_bound_node(&self) -> Option<&Binding<'g>> {
        if let Some(failed) = self.bindings.iter().find(|b| b.failure.is_some()) {
            return Some(failed);
        }
        let last = self.token_count.checked_sub(1)?;
        self.bindings
            .iter()
            .find(|b| b.position.is_some_and(|pos| pos.end() == last))
    }
}
