use super::{
    argument_parser::consume_token,
    binding::{BindStatus, BindingSet},
    context::{ExecutionContext, Reply},
    error::{CommandError, InternalError},
    parser,
    registry::{CommandRegistry, RegisteredCommand},
    usage,
};
use tracing::debug;

impl CommandRegistry {
    /// Runs one command line. User mistakes come back as error replies; only
    /// internal errors are returned as `Err`.
    pub fn dispatch(&self, command_line: &str) -> Result<Vec<Reply>, InternalError> {
        let command_line = command_line.trim();
        let command_line = command_line.strip_prefix('/').unwrap_or(command_line);
        if command_line.is_empty() {
            return Ok(Vec::new());
        }

        let command_line = self.expand_custom_aliases(command_line);
        let Some((label, rest)) = consume_token(&command_line) else {
            return Ok(Vec::new());
        };
        let Some(command) = self.get(label) else {
            debug!("No command registered for '{}'", label);
            return Ok(vec![Reply::Error("Command not found!".to_string())]);
        };

        let arguments = parser::bind(command.grammar(), rest);
        let status = arguments.status().clone();
        let message = match &status {
            BindStatus::Complete => return Self::execute_impl(command, label, arguments),
            BindStatus::Partial => "Not enough arguments".to_string(),
            BindStatus::TooManyArguments { remaining } => {
                format!("Too many arguments: {remaining}")
            }
            BindStatus::InvalidArgument { name } => match arguments.get_binding(name) {
                Ok(binding) => match binding.failure() {
                    Some(failure) => format!("Invalid argument: {failure}"),
                    None => format!("Invalid argument: {name}"),
                },
                Err(err) => return Err(unwrap_internal(err)),
            },
            BindStatus::Unmatched { remaining } => format!("Unknown argument: {remaining}"),
        };

        Ok(self.handle_parse_error(command, label, message))
    }

    fn execute_impl(
        command: &RegisteredCommand,
        label: &str,
        arguments: BindingSet<'_>,
    ) -> Result<Vec<Reply>, InternalError> {
        debug!("Executing '{}'", label);
        let mut ctx = ExecutionContext::new(label, arguments);
        match (command.handler)(&mut ctx) {
            Ok(()) => {}
            Err(CommandError::Runtime(err)) => ctx.error(err.to_string()),
            Err(CommandError::Internal(err)) => return Err(err),
        }
        Ok(ctx.into_replies())
    }

    fn expand_custom_aliases(&self, command_line: &str) -> String {
        for (alias, expansion) in self.get_custom_aliases() {
            // Matched like command labels, ignoring case.
            let Some(rest) = strip_prefix_ignore_case(command_line, alias) else {
                continue;
            };
            if !rest.is_empty() && !rest.starts_with(char::is_whitespace) {
                continue;
            }
            let rest = rest.trim_start();
            if expansion.contains("{}") {
                return expansion.replace("{}", rest);
            } else {
                return format!("{} {}", expansion, rest);
            }
        }

        command_line.to_string()
    }

    fn handle_parse_error(
        &self,
        command: &RegisteredCommand,
        label: &str,
        error_message: String,
    ) -> Vec<Reply> {
        let mut replies = vec![Reply::Error(error_message)];
        if self.show_usage_on_error {
            let usage = usage::generate_command_usage(command.grammar(), label);
            replies.push(Reply::Info(format!("Usage: {}", usage)));
        }
        replies
    }
}

fn strip_prefix_ignore_case<'a>(line: &'a str, prefix: &str) -> Option<&'a str> {
    let head = line.get(..prefix.len())?;
    (head.to_lowercase() == prefix.to_lowercase()).then(|| &line[prefix.len()..])
}

fn unwrap_internal(err: CommandError) -> InternalError {
    match err {
        CommandError::Internal(err) => err,
        CommandError::Runtime(err) => InternalError::Message {
            message: format!("Runtime Error: {}", err),
        },
    }
}
