mod argument;
mod argument_parser;
mod autocomplete;
mod binding;
mod context;
mod error;
mod executor;
mod node;
mod parser;
mod registry;
mod usage;
mod value;

pub use argument::{
    ArgumentParseResult, ArgumentType, boolean, choice, float, float_range, greedy_string,
    integer, integer_range, string, word,
};
pub use argument_parser::{
    BooleanArgument, ChoiceArgument, FloatArgument, IntegerArgument, StringArgument, StringKind,
    consume_token,
};
pub use autocomplete::{complete, complete_line};
pub use binding::{BindStatus, Binding, BindingSet, Position};
pub use context::{ExecutionContext, Reply};
pub use error::{CommandError, CommandResult, InternalError, ParseFailure, RuntimeError};
pub use node::{CommandGrammar, GrammarBuilder, GrammarNode, NodeKind, SuggestionProvider};
pub use parser::bind;
pub use registry::{
    CommandRegistry, Handler, RegisteredCommand, RegistrationSink, handler, prefixed_aliases,
};
pub use usage::{generate_command_usage, generate_usage};
pub use value::{FromValue, Value};
