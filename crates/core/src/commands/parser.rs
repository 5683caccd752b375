use super::argument_parser::consume_token;
use super::binding::{BindStatus, Binding, BindingSet, Position};
use super::error::ParseFailure;
use super::node::{CommandGrammar, GrammarNode, candidates};
use tracing::trace;

/// Binds `input` (the line without the command label) against `grammar`.
///
/// Never fails as a whole: per-node failures and absences are recorded on the
/// returned bindings. There is no backtracking; once a child is chosen at a
/// level, a failure ends the walk.
pub fn bind<'g>(grammar: &'g CommandGrammar, input: &str) -> BindingSet<'g> {
    let bindings = grammar
        .addressable()
        .into_iter()
        .map(|(node, slot)| Binding::unreached(node, slot))
        .collect();

    let mut walk = Walk {
        input,
        token_count: input.split_whitespace().count(),
        bindings,
        path: Vec::new(),
    };

    let mut level = grammar.nodes();
    let mut remaining = input;
    let end = loop {
        let rest = remaining.trim_start();
        if rest.is_empty() {
            break None;
        }
        match walk.step(level, rest) {
            Step::Advance { node, rest } => {
                level = node.children();
                remaining = rest;
            }
            Step::Stop(status) => break Some(status),
        }
    };

    let terminal = walk.path.last().copied();
    let status = end.unwrap_or_else(|| {
        let executes = terminal.map_or(grammar.executes(), GrammarNode::executes);
        if executes {
            BindStatus::Complete
        } else {
            BindStatus::Partial
        }
    });
    trace!(input, ?status, "bound command input");

    BindingSet {
        bindings: walk.bindings,
        token_count: walk.token_count,
        terminal,
        status,
    }
}

enum Step<'g, 'i> {
    Advance { node: &'g GrammarNode, rest: &'i str },
    Stop(BindStatus),
}

struct Walk<'g, 'i> {
    input: &'i str,
    token_count: usize,
    bindings: Vec<Binding<'g>>,
    path: Vec<&'g GrammarNode>,
}

impl<'g, 'i> Walk<'g, 'i> {
    /// `rest` starts on a non-whitespace character.
    fn step(&mut self, level: &'g [GrammarNode], rest: &'i str) -> Step<'g, 'i> {
        let index = self.token_index(rest);
        let (token, after_token) = consume_token(rest).unwrap_or((rest, ""));

        if level.is_empty() {
            return Step::Stop(BindStatus::TooManyArguments {
                remaining: rest.trim_end().to_string(),
            });
        }

        let routes = candidates(level, token);
        if let Some(&literal) = routes.iter().find(|node| node.is_literal()) {
            trace!(literal = literal.name(), index, "matched literal");
            self.path.push(literal);
            return Step::Advance {
                node: literal,
                rest: after_token,
            };
        }

        let mut first_failure: Option<(&'g GrammarNode, ParseFailure)> = None;
        for node in routes {
            let Some(arg_type) = node.argument_type() else {
                continue;
            };

            match arg_type.parse(rest) {
                Ok((value, _)) if arg_type.is_greedy() => {
                    let raw = rest.trim_end();
                    let position = Position::Range {
                        start: index,
                        end: self.token_count - 1,
                    };
                    trace!(node = node.name(), raw, "bound greedy argument");
                    self.record(node, |binding| {
                        binding.raw_text = Some(raw.to_string());
                        binding.value = Some(value);
                        binding.position = Some(position);
                    });
                    self.path.push(node);
                    return Step::Advance { node, rest: "" };
                }
                Ok((value, after)) => {
                    let consumed = &rest[..rest.len() - after.len()];
                    let raw = consumed.trim_end();
                    trace!(node = node.name(), raw, index, "bound argument");
                    self.record(node, |binding| {
                        binding.raw_text = Some(raw.to_string());
                        binding.value = Some(value);
                        binding.position = Some(Position::Index(index));
                    });
                    self.path.push(node);
                    return Step::Advance { node, rest: after };
                }
                Err(failure) => {
                    trace!(node = node.name(), %failure, "argument rejected input");
                    if first_failure.is_none() {
                        first_failure = Some((node, failure));
                    }
                }
            }
        }

        match first_failure {
            Some((node, failure)) => {
                let raw = if failure.raw.is_empty() {
                    token.to_string()
                } else {
                    failure.raw.clone()
                };
                self.record(node, |binding| {
                    binding.raw_text = Some(raw);
                    binding.position = Some(Position::Index(index));
                    binding.failure = Some(failure);
                });
                Step::Stop(BindStatus::InvalidArgument {
                    name: node.name().to_string(),
                })
            }
            None => Step::Stop(BindStatus::Unmatched {
                remaining: rest.trim_end().to_string(),
            }),
        }
    }

    /// Number of whitespace-delimited tokens before `rest`.
    fn token_index(&self, rest: &str) -> usize {
        let offset = self.input.len() - rest.len();
        self.input[..offset].split_whitespace().count()
    }

    fn record(&mut self, node: &'g GrammarNode, fill: impl FnOnce(&mut Binding<'g>)) {
        if let Some(binding) = self
            .bindings
            .iter_mut()
            .find(|binding| std::ptr::eq(binding.node, node))
        {
            fill(binding);
        }
    }
}
