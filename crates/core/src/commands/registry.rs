use super::argument_parser::consume_token;
use super::autocomplete;
use super::context::ExecutionContext;
use super::error::{CommandResult, InternalError};
use super::node::CommandGrammar;
use super::usage;
use crate::config::RegistryConfig;
use itertools::Itertools;
use rustc_hash::FxHashMap;
use std::sync::Arc;
use tracing::{debug, warn};

pub type Handler = Arc<dyn Fn(&mut ExecutionContext<'_>) -> CommandResult<()> + Send + Sync>;

pub fn handler<F>(f: F) -> Handler
where
    F: Fn(&mut ExecutionContext<'_>) -> CommandResult<()> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Receives finished grammars from the host.
pub trait RegistrationSink {
    fn register(
        &mut self,
        aliases: &[&str],
        grammar: CommandGrammar,
        handler: Handler,
    ) -> CommandResult<()>;
}

pub struct RegisteredCommand {
    aliases: Vec<String>,
    grammar: CommandGrammar,
    pub(super) handler: Handler,
}

impl RegisteredCommand {
    /// Every name the command answers to, prefixed ones included.
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    pub fn grammar(&self) -> &CommandGrammar {
        &self.grammar
    }
}

pub struct CommandRegistry {
    commands: Vec<RegisteredCommand>,
    alias_index: FxHashMap<String, usize>,
    custom_aliases: Vec<(String, String)>,
    fallback_prefix: Option<String>,
    pub(super) show_usage_on_error: bool,
    max_suggestions: usize,
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            alias_index: FxHashMap::default(),
            custom_aliases: Vec::new(),
            fallback_prefix: None,
            show_usage_on_error: true,
            max_suggestions: 0,
        }
    }

    /// Custom aliases are not taken from `config` here, since they must point
    /// at registered commands. See [`CommandRegistry::apply_custom_aliases`].
    pub fn with_config(config: &RegistryConfig) -> Self {
        let prefix = config.fallback_prefix.trim();
        Self {
            fallback_prefix: (!prefix.is_empty()).then(|| prefix.to_string()),
            show_usage_on_error: config.show_usage_on_error,
            max_suggestions: usize::try_from(config.max_suggestions).unwrap_or(0),
            ..Self::new()
        }
    }

    pub fn get(&self, alias: &str) -> Option<&RegisteredCommand> {
        self.alias_index
            .get(&alias.to_lowercase())
            .map(|&index| &self.commands[index])
    }

    pub fn commands(&self) -> &[RegisteredCommand] {
        &self.commands
    }

    pub fn apply_custom_aliases(&mut self, config: &RegistryConfig) {
        for (alias, replacement) in &config.command_aliases {
            self.add_custom_alias(alias.trim(), replacement.trim());
        }
    }

    /// Returns false, and keeps nothing, when `replacement` does not start
    /// with a registered command.
    pub fn add_custom_alias(
        &mut self,
        alias: impl Into<String>,
        replacement: impl Into<String>,
    ) -> bool {
        let (alias, replacement) = (alias.into(), replacement.into());
        let target = consume_token(&replacement).map(|(label, _)| label.to_string());
        match target {
            Some(label) if self.get(&label).is_some() => {
                debug!("Custom alias '{}' expands to '{}'", alias, replacement);
                self.custom_aliases.push((alias, replacement));
                true
            }
            _ => {
                warn!(
                    "Custom alias replacement '{}' did not match any command",
                    replacement
                );
                false
            }
        }
    }

    pub fn get_custom_aliases(&self) -> &[(String, String)] {
        &self.custom_aliases
    }

    pub fn usage(&self, alias: &str) -> Option<String> {
        let command = self.get(alias)?;
        Some(usage::generate_command_usage(&command.grammar, alias))
    }

    /// Suggestions for a partially typed line, label included.
    pub fn complete(&self, line: &str) -> Vec<String> {
        let line = line.strip_prefix('/').unwrap_or(line);
        let mut suggestions = match line.find(char::is_whitespace) {
            None => {
                let prefix = line.to_lowercase();
                self.commands
                    .iter()
                    .flat_map(|command| &command.aliases)
                    .filter(|alias| alias.to_lowercase().starts_with(&prefix))
                    .cloned()
                    .unique()
                    .collect()
            }
            Some(split) => match self.get(&line[..split]) {
                Some(command) => autocomplete::complete_line(&command.grammar, &line[split..]),
                None => Vec::new(),
            },
        };
        if self.max_suggestions > 0 {
            suggestions.truncate(self.max_suggestions);
        }
        suggestions
    }

    fn aliases_free(&self, aliases: &[String]) -> bool {
        aliases
            .iter()
            .all(|alias| !self.alias_index.contains_key(&alias.to_lowercase()))
    }
}

impl RegistrationSink for CommandRegistry {
    fn register(
        &mut self,
        aliases: &[&str],
        grammar: CommandGrammar,
        handler: Handler,
    ) -> CommandResult<()> {
        let aliases = prefixed_aliases(self.fallback_prefix.as_deref(), aliases);
        if aliases.is_empty() || aliases.iter().any(String::is_empty) {
            return Err(InternalError::EmptyName.into());
        }
        if !self.aliases_free(&aliases) {
            let taken = aliases
                .iter()
                .find(|alias| self.alias_index.contains_key(&alias.to_lowercase()))
                .cloned()
                .unwrap_or_default();
            return Err(InternalError::AliasTaken { alias: taken }.into());
        }

        debug!("Registering command with aliases {:?}", aliases);
        let index = self.commands.len();
        for alias in &aliases {
            self.alias_index.insert(alias.to_lowercase(), index);
        }
        self.commands.push(RegisteredCommand {
            aliases,
            grammar,
            handler,
        });
        Ok(())
    }
}

/// All plain aliases, then each one again as `prefix:alias` with the prefix
/// lower-cased. Duplicates are dropped.
pub fn prefixed_aliases(fallback_prefix: Option<&str>, aliases: &[&str]) -> Vec<String> {
    let plain = aliases.iter().map(|alias| alias.trim().to_string());
    let prefixed = fallback_prefix.into_iter().flat_map(|prefix| {
        let prefix = prefix.to_lowercase();
        aliases
            .iter()
            .map(move |alias| format!("{}:{}", prefix, alias.trim()))
    });
    plain.chain(prefixed).unique().collect()
}
